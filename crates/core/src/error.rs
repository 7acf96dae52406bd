//! Error types for deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a theme, validating a spec, or
/// writing and reading presentation packages.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A brand or slide document is not valid JSON, or does not fit the
    /// expected shape.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The slide specification failed validation. Carries every violation.
    #[error("Spec validation failed:\n{}", format_messages(.0))]
    Validation(Vec<String>),

    /// A shape was given zero or negative dimensions, or a similar caller bug.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// An image could not be identified or read.
    #[error("Image error: {0}")]
    ImageError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML generation or parsing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid or corrupted package.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),
}

fn format_messages(messages: &[String]) -> String {
    messages
        .iter()
        .map(|m| format!("  - {}", m))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_lists_every_message() {
        let err = Error::Validation(vec!["first".to_string(), "second".to_string()]);
        let text = err.to_string();
        assert!(text.contains("  - first"));
        assert!(text.contains("  - second"));
    }
}
