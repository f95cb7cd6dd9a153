use thiserror::Error;

/// Failure taxonomy for the policy XML codec.
///
/// Every error is detected synchronously and names the first violation
/// found; no partial policy or partial XML is ever produced.
#[derive(Debug, Error)]
pub enum PolicyXmlError {
    /// The input text is not well-formed XML (decode only).
    #[error("malformed policy XML: {0}")]
    MalformedInput(String),

    /// Well-formed XML that does not match the fixed element layout or
    /// violates a policy invariant (decode side).
    #[error("policy XML violates the schema: {0}")]
    SchemaViolation(String),

    /// A policy object that cannot be represented as schema-valid XML
    /// (encode side).
    #[error("policy cannot be encoded: {0}")]
    InvalidPolicy(String),

    /// A publicKey value is not a PEM-encoded NIST P-256 key.
    #[error("invalid public key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// An sgID value is not a 32-hex-digit GUID.
    #[error("invalid security group id encoding: {0}")]
    InvalidGuidEncoding(String),
}
