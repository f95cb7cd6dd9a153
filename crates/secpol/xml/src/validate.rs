//! Validation for both codec directions.
//!
//! The tree-side validator checks schema conformance (element names,
//! order, counts, field formats) plus the peer-set invariants; the
//! object-side validator checks the same invariants over typed fields.
//! Both feed peers through one [`PeerSetTracker`] driven by the
//! [`schema::peer_shape`] table, so the directions cannot drift.
//!
//! Validation is read-only and fails fast: the first violation found
//! terminates with a single error.

use std::collections::HashSet;

use secpol_types::{
    group_id_to_string, parse_group_id, Acl, KeyInfo, Peer, PeerType, Policy,
    SPECIFICATION_VERSION,
};
use xmltree::Element;

use crate::error::PolicyXmlError;
use crate::schema;

/// What a peer-set constraint rejected.
#[derive(Debug)]
pub(crate) enum PeerSetViolation {
    AllTypeWithOthers,
    Duplicate,
}

impl PeerSetViolation {
    fn message(&self) -> &'static str {
        match self {
            PeerSetViolation::AllTypeWithOthers => {
                "an ALL type peer must be the only peer in its ACL"
            }
            PeerSetViolation::Duplicate => "duplicate peer entry within one ACL",
        }
    }
}

/// Per-ACL bookkeeping for the peer-set invariants.
///
/// A peer's identity is its type plus its type-specific fields, so the
/// same key under FROM_CERTIFICATE_AUTHORITY and WITH_PUBLIC_KEY is
/// two distinct peers. Uniqueness is scoped to one ACL; a fresh
/// tracker is used per peer set.
#[derive(Default)]
pub(crate) struct PeerSetTracker {
    seen: HashSet<(PeerType, String)>,
    exclusive_present: bool,
    admitted: usize,
}

impl PeerSetTracker {
    pub(crate) fn admit(
        &mut self,
        peer_type: PeerType,
        identity: String,
    ) -> Result<(), PeerSetViolation> {
        let shape = schema::peer_shape(peer_type);
        if self.exclusive_present || (shape.exclusive && self.admitted > 0) {
            return Err(PeerSetViolation::AllTypeWithOthers);
        }
        if !self.seen.insert((peer_type, identity)) {
            return Err(PeerSetViolation::Duplicate);
        }
        if shape.exclusive {
            self.exclusive_present = true;
        }
        self.admitted += 1;
        Ok(())
    }
}

fn key_identity(key: &KeyInfo) -> String {
    key.key_id().iter().map(|byte| format!("{byte:02x}")).collect()
}

// ---------------------------------------------------------------------
// Tree-side validation (decode)
// ---------------------------------------------------------------------

/// Validates a parsed policy document against the fixed schema and the
/// peer-set invariants.
pub(crate) fn validate_document(root: &Element) -> Result<(), PolicyXmlError> {
    expect_name(root, schema::POLICY_ELEMENT)?;
    let children = schema::child_elements(root);
    expect_count(schema::POLICY_ELEMENT, &children, schema::POLICY_CHILDREN)?;

    validate_version_element(children[schema::POLICY_VERSION_INDEX])?;
    validate_serial_element(children[schema::SERIAL_NUMBER_INDEX])?;
    validate_acls_element(children[schema::ACLS_INDEX])
}

pub(crate) fn expect_name(element: &Element, expected: &str) -> Result<(), PolicyXmlError> {
    if element.name != expected {
        return Err(PolicyXmlError::SchemaViolation(format!(
            "expected <{expected}> element, found <{}>",
            element.name
        )));
    }
    Ok(())
}

fn expect_count(name: &str, children: &[&Element], expected: usize) -> Result<(), PolicyXmlError> {
    if children.len() != expected {
        return Err(PolicyXmlError::SchemaViolation(format!(
            "<{name}> must have exactly {expected} child elements, found {}",
            children.len()
        )));
    }
    Ok(())
}

/// Parses and pins the policy version. Shared with the builder.
pub(crate) fn parse_version_text(text: &str) -> Result<u32, PolicyXmlError> {
    let version = text.parse::<u32>().map_err(|_| {
        PolicyXmlError::SchemaViolation(format!(
            "policyVersion is not an unsigned decimal: {text:?}"
        ))
    })?;
    if version != SPECIFICATION_VERSION {
        return Err(PolicyXmlError::SchemaViolation(format!(
            "unsupported policy version {version}, expected {SPECIFICATION_VERSION}"
        )));
    }
    Ok(version)
}

/// Parses the serial number. Shared with the builder.
pub(crate) fn parse_serial_text(text: &str) -> Result<u64, PolicyXmlError> {
    text.parse::<u64>().map_err(|_| {
        PolicyXmlError::SchemaViolation(format!(
            "serialNumber is not an unsigned decimal: {text:?}"
        ))
    })
}

fn validate_version_element(element: &Element) -> Result<(), PolicyXmlError> {
    expect_name(element, schema::POLICY_VERSION_ELEMENT)?;
    parse_version_text(&schema::text_content(element)).map(|_| ())
}

fn validate_serial_element(element: &Element) -> Result<(), PolicyXmlError> {
    expect_name(element, schema::SERIAL_NUMBER_ELEMENT)?;
    parse_serial_text(&schema::text_content(element)).map(|_| ())
}

fn validate_acls_element(acls: &Element) -> Result<(), PolicyXmlError> {
    expect_name(acls, schema::ACLS_ELEMENT)?;
    let entries = schema::child_elements(acls);
    if entries.is_empty() {
        return Err(PolicyXmlError::SchemaViolation(
            "<acls> contains no <acl> entries".into(),
        ));
    }
    for acl in entries {
        validate_acl_element(acl)?;
    }
    Ok(())
}

fn validate_acl_element(acl: &Element) -> Result<(), PolicyXmlError> {
    expect_name(acl, schema::ACL_ELEMENT)?;
    let children = schema::child_elements(acl);
    expect_count(schema::ACL_ELEMENT, &children, schema::ACL_CHILDREN)?;
    validate_peers_element(children[schema::PEERS_INDEX])?;
    validate_rules_element(children[schema::RULES_INDEX])
}

fn validate_peers_element(peers: &Element) -> Result<(), PolicyXmlError> {
    expect_name(peers, schema::PEERS_ELEMENT)?;
    let entries = schema::child_elements(peers);
    if entries.is_empty() {
        return Err(PolicyXmlError::SchemaViolation(
            "<peers> contains no <peer> entries".into(),
        ));
    }
    let mut tracker = PeerSetTracker::default();
    for peer in entries {
        validate_peer_element(peer, &mut tracker)?;
    }
    Ok(())
}

fn validate_rules_element(rules: &Element) -> Result<(), PolicyXmlError> {
    expect_name(rules, schema::RULES_ELEMENT)?;
    if schema::child_elements(rules).is_empty() {
        return Err(PolicyXmlError::SchemaViolation(
            "<rules> contains no rule entries".into(),
        ));
    }
    // Rule contents are opaque to this codec.
    Ok(())
}

fn validate_peer_element(
    peer: &Element,
    tracker: &mut PeerSetTracker,
) -> Result<(), PolicyXmlError> {
    expect_name(peer, schema::PEER_ELEMENT)?;
    let children = schema::child_elements(peer);
    if children.is_empty() {
        return Err(PolicyXmlError::SchemaViolation(
            "<peer> has no child elements".into(),
        ));
    }
    let peer_type = peer_type_from_element(children[schema::PEER_TYPE_INDEX])?;
    let shape = schema::peer_shape(peer_type);
    expect_count(schema::PEER_ELEMENT, &children, shape.children)?;

    let mut identity = String::new();
    if shape.requires_key {
        let key_element = children[schema::PEER_PUBLIC_KEY_INDEX];
        expect_name(key_element, schema::PUBLIC_KEY_ELEMENT)?;
        let key = KeyInfo::from_pem(&schema::text_content(key_element))
            .map_err(|err| PolicyXmlError::InvalidKeyEncoding(err.to_string()))?;
        identity.push_str(&key_identity(&key));
    }
    if shape.requires_group {
        let sgid_element = children[schema::PEER_SGID_INDEX];
        expect_name(sgid_element, schema::SGID_ELEMENT)?;
        let group = parse_group_id(&schema::text_content(sgid_element))
            .map_err(|err| PolicyXmlError::InvalidGuidEncoding(err.to_string()))?;
        identity.push('/');
        identity.push_str(&group_id_to_string(&group));
    }
    tracker
        .admit(peer_type, identity)
        .map_err(|violation| PolicyXmlError::SchemaViolation(violation.message().into()))
}

/// Extracts a known peer type from a `<type>` element. Shared with the
/// builder.
pub(crate) fn peer_type_from_element(element: &Element) -> Result<PeerType, PolicyXmlError> {
    expect_name(element, schema::TYPE_ELEMENT)?;
    let name = schema::text_content(element);
    schema::peer_type_from_name(&name).ok_or_else(|| {
        PolicyXmlError::SchemaViolation(format!("unknown peer type {name:?}"))
    })
}

// ---------------------------------------------------------------------
// Object-side validation (encode)
// ---------------------------------------------------------------------

/// Validates that a policy object maps to schema-valid XML.
pub(crate) fn validate_policy(policy: &Policy) -> Result<(), PolicyXmlError> {
    if policy.specification_version != SPECIFICATION_VERSION {
        return Err(PolicyXmlError::InvalidPolicy(format!(
            "unsupported specification version {}, expected {SPECIFICATION_VERSION}",
            policy.specification_version
        )));
    }
    if policy.acls.is_empty() {
        return Err(PolicyXmlError::InvalidPolicy("policy contains no ACLs".into()));
    }
    for acl in &policy.acls {
        validate_acl(acl)?;
    }
    Ok(())
}

fn validate_acl(acl: &Acl) -> Result<(), PolicyXmlError> {
    if acl.peers.is_empty() {
        return Err(PolicyXmlError::InvalidPolicy("ACL contains no peers".into()));
    }
    if acl.rules.is_empty() {
        return Err(PolicyXmlError::InvalidPolicy("ACL contains no rules".into()));
    }
    let mut tracker = PeerSetTracker::default();
    for peer in &acl.peers {
        validate_peer(peer, &mut tracker)?;
    }
    Ok(())
}

fn validate_peer(peer: &Peer, tracker: &mut PeerSetTracker) -> Result<(), PolicyXmlError> {
    let shape = schema::peer_shape(peer.peer_type);
    let type_name = schema::peer_type_name(peer.peer_type);
    let mut identity = String::new();

    match (&peer.public_key, shape.requires_key) {
        (Some(key), true) => identity.push_str(&key_identity(key)),
        (None, true) => {
            return Err(PolicyXmlError::InvalidPolicy(format!(
                "{type_name} peer is missing its public key"
            )));
        }
        (Some(_), false) => {
            return Err(PolicyXmlError::InvalidPolicy(format!(
                "{type_name} peer must not carry a public key"
            )));
        }
        (None, false) => {}
    }

    match (&peer.security_group_id, shape.requires_group) {
        (Some(group), true) => {
            identity.push('/');
            identity.push_str(&group_id_to_string(group));
        }
        (None, true) => {
            return Err(PolicyXmlError::InvalidPolicy(format!(
                "{type_name} peer is missing its security group id"
            )));
        }
        (Some(_), false) => {
            return Err(PolicyXmlError::InvalidPolicy(format!(
                "{type_name} peer must not carry a security group id"
            )));
        }
        (None, false) => {}
    }

    tracker
        .admit(peer.peer_type, identity)
        .map_err(|violation| PolicyXmlError::InvalidPolicy(violation.message().into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_rejects_all_type_with_others_in_either_order() {
        let mut tracker = PeerSetTracker::default();
        tracker.admit(PeerType::AnyTrusted, String::new()).unwrap();
        assert!(matches!(
            tracker.admit(PeerType::All, String::new()),
            Err(PeerSetViolation::AllTypeWithOthers)
        ));

        let mut tracker = PeerSetTracker::default();
        tracker.admit(PeerType::All, String::new()).unwrap();
        assert!(matches!(
            tracker.admit(PeerType::AnyTrusted, String::new()),
            Err(PeerSetViolation::AllTypeWithOthers)
        ));
    }

    #[test]
    fn tracker_rejects_duplicate_identity_of_same_type() {
        let mut tracker = PeerSetTracker::default();
        tracker
            .admit(PeerType::WithPublicKey, "key-a".into())
            .unwrap();
        assert!(matches!(
            tracker.admit(PeerType::WithPublicKey, "key-a".into()),
            Err(PeerSetViolation::Duplicate)
        ));
    }

    #[test]
    fn tracker_allows_same_identity_under_different_types() {
        let mut tracker = PeerSetTracker::default();
        tracker
            .admit(PeerType::FromCertificateAuthority, "key-a".into())
            .unwrap();
        assert!(tracker
            .admit(PeerType::WithPublicKey, "key-a".into())
            .is_ok());
    }

    #[test]
    fn tracker_caps_any_trusted_at_one() {
        let mut tracker = PeerSetTracker::default();
        tracker.admit(PeerType::AnyTrusted, String::new()).unwrap();
        assert!(matches!(
            tracker.admit(PeerType::AnyTrusted, String::new()),
            Err(PeerSetViolation::Duplicate)
        ));
    }
}
