//! Fixed policy document schema: element names, child positions, and
//! the per-peer-type constraint table shared by both validators.

use secpol_types::PeerType;
use xmltree::{Element, XMLNode};

pub(crate) const POLICY_ELEMENT: &str = "policy";
pub(crate) const POLICY_VERSION_ELEMENT: &str = "policyVersion";
pub(crate) const SERIAL_NUMBER_ELEMENT: &str = "serialNumber";
pub(crate) const ACLS_ELEMENT: &str = "acls";
pub(crate) const ACL_ELEMENT: &str = "acl";
pub(crate) const PEERS_ELEMENT: &str = "peers";
pub(crate) const PEER_ELEMENT: &str = "peer";
pub(crate) const TYPE_ELEMENT: &str = "type";
pub(crate) const PUBLIC_KEY_ELEMENT: &str = "publicKey";
pub(crate) const SGID_ELEMENT: &str = "sgID";
pub(crate) const RULES_ELEMENT: &str = "rules";

// Child positions. Element order is part of the schema and is checked
// before any positional access.
pub(crate) const POLICY_CHILDREN: usize = 3;
pub(crate) const POLICY_VERSION_INDEX: usize = 0;
pub(crate) const SERIAL_NUMBER_INDEX: usize = 1;
pub(crate) const ACLS_INDEX: usize = 2;
pub(crate) const ACL_CHILDREN: usize = 2;
pub(crate) const PEERS_INDEX: usize = 0;
pub(crate) const RULES_INDEX: usize = 1;
pub(crate) const PEER_TYPE_INDEX: usize = 0;
pub(crate) const PEER_PUBLIC_KEY_INDEX: usize = 1;
pub(crate) const PEER_SGID_INDEX: usize = 2;

/// Peer-type name table. Immutable and read-only for the process
/// lifetime.
pub(crate) const PEER_TYPE_NAMES: [(&str, PeerType); 5] = [
    ("ALL", PeerType::All),
    ("ANY_TRUSTED", PeerType::AnyTrusted),
    ("FROM_CERTIFICATE_AUTHORITY", PeerType::FromCertificateAuthority),
    ("WITH_PUBLIC_KEY", PeerType::WithPublicKey),
    ("WITH_MEMBERSHIP", PeerType::WithMembership),
];

pub(crate) fn peer_type_from_name(name: &str) -> Option<PeerType> {
    PEER_TYPE_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, peer_type)| *peer_type)
}

pub(crate) fn peer_type_name(peer_type: PeerType) -> &'static str {
    match peer_type {
        PeerType::All => "ALL",
        PeerType::AnyTrusted => "ANY_TRUSTED",
        PeerType::FromCertificateAuthority => "FROM_CERTIFICATE_AUTHORITY",
        PeerType::WithPublicKey => "WITH_PUBLIC_KEY",
        PeerType::WithMembership => "WITH_MEMBERSHIP",
    }
}

/// How peers of one type may appear within a single ACL.
///
/// Both the tree-side and object-side validators read this table, so
/// the two directions enforce one invariant set.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PeerShape {
    /// Exact element-children count of a `<peer>` of this type.
    pub children: usize,
    pub requires_key: bool,
    pub requires_group: bool,
    /// An exclusive peer must be the only entry in its peer set.
    pub exclusive: bool,
}

pub(crate) const fn peer_shape(peer_type: PeerType) -> PeerShape {
    match peer_type {
        PeerType::All => PeerShape {
            children: 1,
            requires_key: false,
            requires_group: false,
            exclusive: true,
        },
        PeerType::AnyTrusted => PeerShape {
            children: 1,
            requires_key: false,
            requires_group: false,
            exclusive: false,
        },
        PeerType::FromCertificateAuthority | PeerType::WithPublicKey => PeerShape {
            children: 2,
            requires_key: true,
            requires_group: false,
            exclusive: false,
        },
        PeerType::WithMembership => PeerShape {
            children: 3,
            requires_key: true,
            requires_group: true,
            exclusive: false,
        },
    }
}

/// Element children only; text and CDATA nodes are layout noise.
pub(crate) fn child_elements(element: &Element) -> Vec<&Element> {
    element
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(child) => Some(child),
            _ => None,
        })
        .collect()
}

/// Concatenated, whitespace-trimmed text content of an element.
pub(crate) fn text_content(element: &Element) -> String {
    element
        .get_text()
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
