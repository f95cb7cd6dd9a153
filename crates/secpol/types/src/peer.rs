use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::key::KeyInfo;

/// Trust category of a peer entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerType {
    /// Matches every peer, authenticated or not. Must be the only
    /// entry in its ACL's peer set.
    All,
    /// Matches any peer that completed authentication.
    AnyTrusted,
    /// Matches peers holding a certificate issued by the given
    /// certificate authority key.
    FromCertificateAuthority,
    /// Matches the peer holding exactly the given public key.
    WithPublicKey,
    /// Matches peers holding a membership certificate for the given
    /// security group, issued under the given key.
    WithMembership,
}

/// A principal descriptor inside an ACL's peer set.
///
/// `public_key` is present for every type except [`PeerType::All`] and
/// [`PeerType::AnyTrusted`]; `security_group_id` only for
/// [`PeerType::WithMembership`]. The codec validators enforce this.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub peer_type: PeerType,
    pub public_key: Option<KeyInfo>,
    pub security_group_id: Option<Uuid>,
}

impl Peer {
    pub fn all() -> Self {
        Self {
            peer_type: PeerType::All,
            public_key: None,
            security_group_id: None,
        }
    }

    pub fn any_trusted() -> Self {
        Self {
            peer_type: PeerType::AnyTrusted,
            public_key: None,
            security_group_id: None,
        }
    }

    pub fn from_certificate_authority(key: KeyInfo) -> Self {
        Self {
            peer_type: PeerType::FromCertificateAuthority,
            public_key: Some(key),
            security_group_id: None,
        }
    }

    pub fn with_public_key(key: KeyInfo) -> Self {
        Self {
            peer_type: PeerType::WithPublicKey,
            public_key: Some(key),
            security_group_id: None,
        }
    }

    pub fn with_membership(key: KeyInfo, group: Uuid) -> Self {
        Self {
            peer_type: PeerType::WithMembership,
            public_key: Some(key),
            security_group_id: Some(group),
        }
    }
}
