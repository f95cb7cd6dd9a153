use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GroupIdError {
    #[error("security group id must be 32 hex digits, got {0:?}")]
    Malformed(String),
}

/// Parses the textual GUID128 form: exactly 32 hex digits, with
/// surrounding whitespace tolerated. Hyphenated UUID text is rejected;
/// the wire format only carries the compact form.
pub fn parse_group_id(text: &str) -> Result<Uuid, GroupIdError> {
    let trimmed = text.trim();
    if trimmed.len() != 32 || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(GroupIdError::Malformed(trimmed.to_string()));
    }
    Uuid::try_parse(trimmed).map_err(|_| GroupIdError::Malformed(trimmed.to_string()))
}

/// Emits the 32-hex-digit lowercase GUID128 form.
pub fn group_id_to_string(id: &Uuid) -> String {
    id.simple().to_string()
}
