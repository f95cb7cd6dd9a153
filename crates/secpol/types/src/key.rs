use p256::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the PEM public-key codec.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("not a valid PEM-encoded NIST P-256 public key: {0}")]
    InvalidPem(String),
    #[error("public key SPKI encoding failed: {0}")]
    Encoding(String),
}

/// A NIST P-256 public key attached to a peer.
///
/// Equality is point equality, independent of the PEM text the key was
/// decoded from; `to_pem` always emits the canonical SPKI form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo(p256::PublicKey);

impl KeyInfo {
    /// Decodes an SPKI PEM block. Surrounding whitespace is tolerated.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        p256::PublicKey::from_public_key_pem(pem.trim())
            .map(Self)
            .map_err(|err| KeyError::InvalidPem(err.to_string()))
    }

    /// Canonical SPKI PEM form with LF line endings.
    pub fn to_pem(&self) -> Result<String, KeyError> {
        self.0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|err| KeyError::Encoding(err.to_string()))
    }

    /// Uncompressed SEC1 point bytes, used as the key's identity when
    /// checking peer uniqueness.
    pub fn key_id(&self) -> Vec<u8> {
        self.0.to_sec1_bytes().into_vec()
    }
}

impl From<p256::PublicKey> for KeyInfo {
    fn from(key: p256::PublicKey) -> Self {
        Self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_PEM: &str = "-----BEGIN PUBLIC KEY-----\n\
        MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE6kuo/Ys1Dr9YvlAPyvGXpZIIMvnx\n\
        kX4a+9zoUCW/LpovDLSTreqyY14WvRcnY1KWI/BnR26fLMp2XI7DHeePFg==\n\
        -----END PUBLIC KEY-----";

    #[test]
    fn decodes_a_valid_spki_pem() {
        assert!(KeyInfo::from_pem(VALID_PEM).is_ok());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let padded = format!(" \n{VALID_PEM}\n ");
        assert!(KeyInfo::from_pem(&padded).is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            KeyInfo::from_pem("InvalidPublicKey"),
            Err(KeyError::InvalidPem(_))
        ));
    }

    #[test]
    fn pem_round_trip_is_stable() {
        let key = KeyInfo::from_pem(VALID_PEM).unwrap();
        let pem = key.to_pem().unwrap();
        let again = KeyInfo::from_pem(&pem).unwrap();
        assert_eq!(key, again);
        assert_eq!(pem, again.to_pem().unwrap());
    }

    #[test]
    fn key_id_distinguishes_keys() {
        let key = KeyInfo::from_pem(VALID_PEM).unwrap();
        let other = {
            let mut bytes = [0u8; 32];
            bytes[31] = 7;
            let secret = p256::SecretKey::from_slice(&bytes).unwrap();
            KeyInfo::from(secret.public_key())
        };
        assert_ne!(key.key_id(), other.key_id());
    }
}
