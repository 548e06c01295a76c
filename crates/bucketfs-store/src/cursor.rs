//! Opaque listing cursor encoding.
//!
//! A cursor records the last position emitted by a page: either an object
//! key or, in delimited listings, a rolled-up prefix. Callers must treat the
//! encoded form as opaque and round-trip it unmodified.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::error::StoreError;

/// Last position emitted by a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorPosition {
    /// The listing stopped after this object key.
    Key(String),
    /// The listing stopped after this delimited prefix; every key under it
    /// has been accounted for.
    Prefix(String),
}

/// Encode a position as an opaque cursor string.
///
/// # Examples
///
/// ```
/// use bucketfs_store::cursor::{CursorPosition, decode_cursor, encode_cursor};
///
/// let token = encode_cursor(&CursorPosition::Key("photos/a.jpg".to_owned()));
/// assert_eq!(decode_cursor(&token).unwrap(), CursorPosition::Key("photos/a.jpg".to_owned()));
/// ```
#[must_use]
pub fn encode_cursor(position: &CursorPosition) -> String {
    let raw = match position {
        CursorPosition::Key(key) => format!("k:{key}"),
        CursorPosition::Prefix(prefix) => format!("p:{prefix}"),
    };
    BASE64_STANDARD.encode(raw.as_bytes())
}

/// Decode a cursor produced by [`encode_cursor`].
///
/// # Errors
///
/// Returns [`StoreError::InvalidCursor`] if the token is not valid base64,
/// not UTF-8, or lacks a position tag.
pub fn decode_cursor(token: &str) -> Result<CursorPosition, StoreError> {
    let bytes = BASE64_STANDARD
        .decode(token)
        .map_err(|_| StoreError::InvalidCursor)?;
    let raw = String::from_utf8(bytes).map_err(|_| StoreError::InvalidCursor)?;
    if let Some(key) = raw.strip_prefix("k:") {
        Ok(CursorPosition::Key(key.to_owned()))
    } else if let Some(prefix) = raw.strip_prefix("p:") {
        Ok(CursorPosition::Prefix(prefix.to_owned()))
    } else {
        Err(StoreError::InvalidCursor)
    }
}
