//! Display normalization for upstream text fields.

/// Reverse percent-encoding, then resolve HTML entities.
///
/// Input that does not percent-decode to valid UTF-8 is returned unchanged.
/// Plain text without escapes passes through as-is, so applying `decode`
/// to already-decoded text is a no-op.
#[must_use]
pub fn decode(text: &str) -> String {
    match urlencoding::decode(text) {
        Ok(url_decoded) => html_escape::decode_html_entities(&url_decoded).into_owned(),
        Err(_) => text.to_owned(),
    }
}
