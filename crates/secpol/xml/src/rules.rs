//! Rules sub-codec.
//!
//! Rule contents are opaque to the policy codec. Decoding captures
//! each element child of `<rules>` as its canonical serialization;
//! encoding parses those fragments back and grafts them under a fresh
//! `<rules>` element. Canonical output (no XML declaration, no
//! indentation) keeps re-encoding byte-stable.

use secpol_types::Rule;
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::PolicyXmlError;
use crate::schema;

pub(crate) fn decode_rules(rules_element: &Element) -> Result<Vec<Rule>, PolicyXmlError> {
    schema::child_elements(rules_element)
        .into_iter()
        .map(|rule| {
            write_canonical(rule).map(Rule::new).map_err(|err| {
                PolicyXmlError::SchemaViolation(format!(
                    "rule fragment could not be serialized: {err}"
                ))
            })
        })
        .collect()
}

pub(crate) fn encode_rules(rules: &[Rule]) -> Result<Element, PolicyXmlError> {
    let mut element = Element::new(schema::RULES_ELEMENT);
    for rule in rules {
        let fragment = Element::parse(rule.as_xml().as_bytes()).map_err(|err| {
            PolicyXmlError::InvalidPolicy(format!(
                "rule is not a well-formed XML fragment: {err}"
            ))
        })?;
        element.children.push(XMLNode::Element(fragment));
    }
    Ok(element)
}

/// Serializes an element without an XML declaration or indentation.
/// The output is deterministic for a given tree.
pub(crate) fn write_canonical(element: &Element) -> Result<String, xmltree::Error> {
    let mut buffer = Vec::new();
    let config = EmitterConfig::new()
        .write_document_declaration(false)
        .perform_indent(false);
    element.write_with_config(&mut buffer, config)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
