//! Two-way transcoder between the Security 2.0 policy XML document
//! format and the [`secpol_types::Policy`] object model.
//!
//! - [`from_xml`]: XML text → schema and invariant validation → policy.
//! - [`to_xml`]: policy → invariant validation → deterministic XML text.
//!
//! Both directions validate before building anything and fail fast on
//! the first violation found. The codec holds no state and never
//! mutates its input, so concurrent calls on independent inputs are
//! safe; the peer-type name table is a compile-time constant.
//!
//! Element order within the document is fixed and part of the schema.
//! Because order is checked up front, the builders extract children by
//! position rather than by tag lookup; extending the schema means
//! extending the order check first.

#![deny(unsafe_code)]

mod decode;
mod encode;
mod error;
mod rules;
mod schema;
mod validate;

pub use decode::from_xml;
pub use encode::to_xml;
pub use error::PolicyXmlError;
