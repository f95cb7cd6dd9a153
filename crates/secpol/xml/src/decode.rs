use secpol_types::{parse_group_id, Acl, KeyInfo, Peer, Policy};
use tracing::debug;
use xmltree::Element;

use crate::error::PolicyXmlError;
use crate::rules;
use crate::schema;
use crate::validate;

/// Decodes a Security 2.0 policy XML document into a freshly built
/// [`Policy`].
///
/// Fails with [`PolicyXmlError::MalformedInput`] when the text is not
/// well-formed XML, and with [`PolicyXmlError::SchemaViolation`] (or a
/// field-encoding variant) when the document does not match the fixed
/// schema or violates a policy invariant. On failure no policy is
/// produced.
pub fn from_xml(xml: &str) -> Result<Policy, PolicyXmlError> {
    debug!(len = xml.len(), "decoding policy XML");
    let root = Element::parse(xml.as_bytes())
        .map_err(|err| PolicyXmlError::MalformedInput(err.to_string()))?;
    validate::validate_document(&root)?;
    build_policy(&root)
}

// The document passed validation, so element order and positions are
// known; extraction below is positional.

fn build_policy(root: &Element) -> Result<Policy, PolicyXmlError> {
    let children = schema::child_elements(root);
    let specification_version = validate::parse_version_text(&schema::text_content(
        children[schema::POLICY_VERSION_INDEX],
    ))?;
    let serial_number = validate::parse_serial_text(&schema::text_content(
        children[schema::SERIAL_NUMBER_INDEX],
    ))?;
    let acls = schema::child_elements(children[schema::ACLS_INDEX])
        .into_iter()
        .map(build_acl)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Policy {
        specification_version,
        serial_number,
        acls,
    })
}

fn build_acl(acl: &Element) -> Result<Acl, PolicyXmlError> {
    let children = schema::child_elements(acl);
    let peers = schema::child_elements(children[schema::PEERS_INDEX])
        .into_iter()
        .map(build_peer)
        .collect::<Result<Vec<_>, _>>()?;
    let rules = rules::decode_rules(children[schema::RULES_INDEX])?;
    Ok(Acl { peers, rules })
}

fn build_peer(peer: &Element) -> Result<Peer, PolicyXmlError> {
    let children = schema::child_elements(peer);
    let peer_type = validate::peer_type_from_element(children[schema::PEER_TYPE_INDEX])?;
    // publicKey/sgID presence follows from the child count of the
    // already-validated fixed-order layout.
    let public_key = match children.get(schema::PEER_PUBLIC_KEY_INDEX) {
        Some(element) => Some(
            KeyInfo::from_pem(&schema::text_content(element))
                .map_err(|err| PolicyXmlError::InvalidKeyEncoding(err.to_string()))?,
        ),
        None => None,
    };
    let security_group_id = match children.get(schema::PEER_SGID_INDEX) {
        Some(element) => Some(
            parse_group_id(&schema::text_content(element))
                .map_err(|err| PolicyXmlError::InvalidGuidEncoding(err.to_string()))?,
        ),
        None => None,
    };
    Ok(Peer {
        peer_type,
        public_key,
        security_group_id,
    })
}
