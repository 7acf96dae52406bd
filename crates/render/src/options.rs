//! Per-run options that are not part of the brand.

use chrono::{DateTime, Utc};

/// Team slides never show more member cards than this unless configured.
pub const DEFAULT_MAX_TEAM_MEMBERS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct DeckOptions {
    /// Footer caption. An empty string leaves the caption out.
    pub footer_text: String,
    pub max_team_members: usize,
    /// Document title property; falls back to the deck document's `title`.
    pub title: Option<String>,
    /// Creation timestamp for the document properties. `None` keeps the
    /// output byte-for-byte reproducible.
    pub created: Option<DateTime<Utc>>,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            footer_text: String::new(),
            max_team_members: DEFAULT_MAX_TEAM_MEMBERS,
            title: None,
            created: None,
        }
    }
}

impl DeckOptions {
    /// Options with the conventional "© year brand" footer.
    pub fn for_brand(brand_name: &str, year: i32) -> Self {
        Self {
            footer_text: format!("\u{a9} {} {}", year, brand_name),
            ..Default::default()
        }
    }

    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.footer_text = text.into();
        self
    }

    pub fn with_max_team_members(mut self, max: usize) -> Self {
        self.max_team_members = max;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Footer for cover slides, which are always marked confidential.
    pub fn cover_footer(&self) -> String {
        if self.footer_text.is_empty() {
            "Confidential".to_string()
        } else {
            format!("Confidential  |  {}", self.footer_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DeckOptions::default();
        assert_eq!(options.max_team_members, 6);
        assert!(options.created.is_none());
        assert_eq!(options.cover_footer(), "Confidential");
    }

    #[test]
    fn test_brand_footer() {
        let options = DeckOptions::for_brand("Acme", 2025).with_max_team_members(3);
        assert_eq!(options.footer_text, "\u{a9} 2025 Acme");
        assert_eq!(options.cover_footer(), "Confidential  |  \u{a9} 2025 Acme");
        assert_eq!(options.max_team_members, 3);
    }
}
