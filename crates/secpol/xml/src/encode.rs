use secpol_types::{group_id_to_string, Acl, Peer, Policy};
use tracing::debug;
use xmltree::{Element, XMLNode};

use crate::error::PolicyXmlError;
use crate::rules;
use crate::schema;
use crate::validate;

/// Encodes a [`Policy`] as a Security 2.0 policy XML document.
///
/// The policy is validated first; a policy that would not decode back
/// to an equal object is rejected with [`PolicyXmlError::InvalidPolicy`]
/// and nothing is emitted. Output is deterministic: equal policies
/// always serialize to identical bytes.
pub fn to_xml(policy: &Policy) -> Result<String, PolicyXmlError> {
    debug!(
        serial = policy.serial_number,
        acls = policy.acls.len(),
        "encoding policy XML"
    );
    validate::validate_policy(policy)?;
    let document = build_document(policy)?;
    rules::write_canonical(&document).map_err(|err| {
        PolicyXmlError::InvalidPolicy(format!("policy document could not be serialized: {err}"))
    })
}

fn text_element(name: &str, text: String) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text));
    element
}

fn push_child(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}

fn build_document(policy: &Policy) -> Result<Element, PolicyXmlError> {
    let mut root = Element::new(schema::POLICY_ELEMENT);
    push_child(
        &mut root,
        text_element(
            schema::POLICY_VERSION_ELEMENT,
            policy.specification_version.to_string(),
        ),
    );
    push_child(
        &mut root,
        text_element(
            schema::SERIAL_NUMBER_ELEMENT,
            policy.serial_number.to_string(),
        ),
    );

    let mut acls = Element::new(schema::ACLS_ELEMENT);
    for acl in &policy.acls {
        push_child(&mut acls, build_acl(acl)?);
    }
    push_child(&mut root, acls);
    Ok(root)
}

fn build_acl(acl: &Acl) -> Result<Element, PolicyXmlError> {
    let mut element = Element::new(schema::ACL_ELEMENT);
    let mut peers = Element::new(schema::PEERS_ELEMENT);
    for peer in &acl.peers {
        push_child(&mut peers, build_peer(peer)?);
    }
    push_child(&mut element, peers);
    push_child(&mut element, rules::encode_rules(&acl.rules)?);
    Ok(element)
}

fn build_peer(peer: &Peer) -> Result<Element, PolicyXmlError> {
    let mut element = Element::new(schema::PEER_ELEMENT);
    push_child(
        &mut element,
        text_element(
            schema::TYPE_ELEMENT,
            schema::peer_type_name(peer.peer_type).to_string(),
        ),
    );
    if let Some(key) = &peer.public_key {
        let pem = key
            .to_pem()
            .map_err(|err| PolicyXmlError::InvalidKeyEncoding(err.to_string()))?;
        push_child(&mut element, text_element(schema::PUBLIC_KEY_ELEMENT, pem));
    }
    if let Some(group) = &peer.security_group_id {
        push_child(
            &mut element,
            text_element(schema::SGID_ELEMENT, group_id_to_string(group)),
        );
    }
    Ok(element)
}
