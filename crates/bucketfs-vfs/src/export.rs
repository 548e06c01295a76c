//! Public URL rendering for object keys.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::VfsError;

/// Characters escaped inside a key segment. `/` is kept as the separator.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'[')
    .add(b']');

/// A validated public domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicDomain(String);

impl PublicDomain {
    /// Normalize `domain`: trim whitespace, drop a scheme and trailing `/`.
    ///
    /// # Errors
    /// [`VfsError::InvalidInput`] if nothing is left.
    pub fn new(domain: &str) -> Result<Self, VfsError> {
        let trimmed = domain.trim();
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed)
            .trim_end_matches('/');
        if host.is_empty() {
            return Err(VfsError::invalid_input("public domain must not be blank"));
        }
        Ok(Self(host.to_owned()))
    }

    /// The normalized host (and optional path).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The public URL of `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketfs_vfs::export::PublicDomain;
    ///
    /// let domain = PublicDomain::new("cdn.example.com/").unwrap();
    /// assert_eq!(domain.url_for("photos/my trip.jpg"), "https://cdn.example.com/photos/my%20trip.jpg");
    /// ```
    #[must_use]
    pub fn url_for(&self, key: &str) -> String {
        format!("https://{}/{}", self.0, utf8_percent_encode(key, SEGMENT))
    }
}

/// Render one URL per key, preserving order.
///
/// # Errors
/// [`VfsError::InvalidInput`] for a blank domain.
pub fn render_urls<I, S>(domain: &str, keys: I) -> Result<Vec<String>, VfsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let domain = PublicDomain::new(domain)?;
    Ok(keys.into_iter().map(|k| domain.url_for(k.as_ref())).collect())
}
