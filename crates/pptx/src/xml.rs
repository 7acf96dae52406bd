//! String-building helpers for package parts.

use deck_core::{Error, Result};
use std::borrow::Cow;
use std::fmt::Write as _;

/// Escape a value for use inside an attribute or text node.
pub fn attr(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// Growable XML text buffer.
#[derive(Debug, Default)]
pub struct XmlBuf {
    buf: String,
}

impl XmlBuf {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Append markup verbatim.
    pub fn raw(&mut self, markup: &str) {
        self.buf.push_str(markup);
    }

    /// Append escaped character data.
    pub fn text(&mut self, text: &str) {
        self.buf.push_str(&attr(text));
    }

    pub fn fmt(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        self.buf
            .write_fmt(args)
            .map_err(|e| Error::XmlError(format!("Failed to format markup: {}", e)))
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(attr(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(attr("plain"), "plain");
    }

    #[test]
    fn test_buffer() {
        let mut xml = XmlBuf::default();
        xml.raw("<a:t>");
        xml.text("R&D");
        xml.raw("</a:t>");
        xml.fmt(format_args!(r#"<a:off x="{}"/>"#, 42)).unwrap();
        assert_eq!(xml.finish(), r#"<a:t>R&amp;D</a:t><a:off x="42"/>"#);
    }
}
