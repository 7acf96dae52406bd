//! Text hygiene for content written into presentation XML.
//!
//! Slide text arrives from hand-written JSON. Before it reaches the document
//! it is NFC-normalized, line endings are folded to `\n`, and characters that
//! XML 1.0 cannot represent are dropped.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// C0 controls other than tab and newline, plus the noncharacters XML rejects.
static XML_INVALID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x{FFFE}\x{FFFF}]").unwrap()
});

/// Normalize one string for use as run text.
///
/// - NFC composition, so the same visible text always serializes the same way
/// - `\r\n` and lone `\r` become `\n`
/// - XML-invalid control characters are removed
pub fn clean_text(text: &str) -> String {
    let folded = text.replace("\r\n", "\n").replace('\r', "\n");
    let composed: String = folded.nfc().collect();
    XML_INVALID_REGEX.replace_all(&composed, "").into_owned()
}

/// Clean text and split it into lines, one per paragraph.
///
/// Empty lines are kept: a blank line in a body block is a deliberate gap.
pub fn paragraph_lines(text: &str) -> Vec<String> {
    clean_text(text).split('\n').map(str::to_string).collect()
}
