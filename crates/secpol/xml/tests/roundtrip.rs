//! Round-trip properties over generated policies: decoding an encoded
//! policy yields an equal object, and re-encoding it yields identical
//! bytes.

use proptest::prelude::*;
use secpol_types::{Acl, KeyInfo, Peer, Policy, Rule};
use secpol_xml::{from_xml, to_xml};
use uuid::Uuid;

fn key(seed: u8) -> KeyInfo {
    let mut bytes = [0u8; 32];
    bytes[31] = seed;
    let secret = p256::SecretKey::from_slice(&bytes).unwrap();
    KeyInfo::from(secret.public_key())
}

fn group(seed: u8) -> Uuid {
    Uuid::from_bytes([seed; 16])
}

/// Distinct peers that may legally share one peer set.
fn candidate_peers() -> Vec<Peer> {
    vec![
        Peer::any_trusted(),
        Peer::from_certificate_authority(key(1)),
        Peer::from_certificate_authority(key(2)),
        Peer::with_public_key(key(1)),
        Peer::with_public_key(key(3)),
        Peer::with_membership(key(1), group(1)),
        Peer::with_membership(key(1), group(2)),
        Peer::with_membership(key(4), group(1)),
    ]
}

fn peer_set_strategy() -> impl Strategy<Value = Vec<Peer>> {
    prop_oneof![
        Just(vec![Peer::all()]),
        proptest::sample::subsequence(candidate_peers(), 1..=8),
    ]
}

fn rules_strategy() -> impl Strategy<Value = Vec<Rule>> {
    proptest::collection::vec(0u32..16, 1..4).prop_map(|nodes| {
        nodes
            .into_iter()
            .map(|node| Rule::new(format!("<rule><objPath>/Node{node}</objPath></rule>")))
            .collect()
    })
}

fn acl_strategy() -> impl Strategy<Value = Acl> {
    (peer_set_strategy(), rules_strategy()).prop_map(|(peers, rules)| Acl::new(peers, rules))
}

fn policy_strategy() -> impl Strategy<Value = Policy> {
    (any::<u64>(), proptest::collection::vec(acl_strategy(), 1..4))
        .prop_map(|(serial, acls)| Policy::new(serial, acls))
}

proptest! {
    #[test]
    fn decode_of_encode_is_identity(policy in policy_strategy()) {
        let xml = to_xml(&policy).unwrap();
        prop_assert_eq!(from_xml(&xml).unwrap(), policy);
    }

    #[test]
    fn encode_is_byte_stable(policy in policy_strategy()) {
        let first = to_xml(&policy).unwrap();
        let second = to_xml(&from_xml(&first).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
