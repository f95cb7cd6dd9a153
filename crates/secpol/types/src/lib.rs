//! Object model for Security 2.0 access-control policies.
//!
//! A [`Policy`] binds a serial number to an ordered set of [`Acl`]
//! entries; each ACL pairs a set of [`Peer`] principals with a set of
//! opaque [`Rule`] values. The XML wire format for these types lives
//! in the `secpol-xml` crate; this crate only holds the model and the
//! field-level codecs it needs (PEM public keys, group ids).
//!
//! None of these types are mutated by the codecs: decoding populates a
//! freshly built policy, encoding borrows immutably.

#![deny(unsafe_code)]

mod group;
mod key;
mod peer;
mod policy;

pub use group::{group_id_to_string, parse_group_id, GroupIdError};
pub use key::{KeyError, KeyInfo};
pub use peer::{Peer, PeerType};
pub use policy::{Acl, Policy, Rule, SPECIFICATION_VERSION};
