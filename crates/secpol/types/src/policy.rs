use serde::{Deserialize, Serialize};

use crate::peer::Peer;

/// The only specification version this model supports. Both codec
/// directions pin `specification_version` to this value.
pub const SPECIFICATION_VERSION: u32 = 1;

/// A complete authorization policy.
///
/// The serial number is assigned monotonically by the policy author;
/// the model does not interpret it beyond requiring it to be an
/// unsigned decimal. ACL order carries no semantics but is preserved
/// for round-trip stability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub specification_version: u32,
    pub serial_number: u64,
    pub acls: Vec<Acl>,
}

impl Policy {
    /// Builds a policy at the supported specification version.
    pub fn new(serial_number: u64, acls: Vec<Acl>) -> Self {
        Self {
            specification_version: SPECIFICATION_VERSION,
            serial_number,
            acls,
        }
    }
}

/// One access-control entry, binding a peer set to a rule set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    pub peers: Vec<Peer>,
    pub rules: Vec<Rule>,
}

impl Acl {
    pub fn new(peers: Vec<Peer>, rules: Vec<Rule>) -> Self {
        Self { peers, rules }
    }
}

/// An opaque permission rule.
///
/// Rules pass through the policy codec untouched: each value holds the
/// canonical XML serialization of one `<rule>` element, produced and
/// consumed by the rules sub-codec in `secpol-xml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule(String);

impl Rule {
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    pub fn as_xml(&self) -> &str {
        &self.0
    }
}
