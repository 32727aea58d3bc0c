//! Escaping for text nodes and attribute values.
//!
//! Thin wrappers over [`html_escape`] that hand back owned strings for the
//! builder buffer. Already-escaped input is escaped again; callers pass raw
//! text.

/// Escape `text` for use inside an element body.
pub fn esc_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escape `value` for use inside a double-quoted attribute.
pub fn esc_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
