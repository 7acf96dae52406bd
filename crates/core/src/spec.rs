//! Slide specification types.
//!
//! A deck spec is `{ "title"?: ..., "slides": [ { "type": ..., ... }, ... ] }`.
//! Each record deserializes into one [`SlideSpec`] case; required fields are
//! plain `String`/`Vec` members, optional ones are `Option` or `#[serde(default)]`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The fixed registry of slide types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Cover,
    SectionDivider,
    Agenda,
    Content,
    TwoColumn,
    Quote,
    Metrics,
    Team,
    CaseStudy,
    Closing,
    Blank,
}

impl SlideKind {
    /// Every registered kind, in registry order.
    pub const ALL: [SlideKind; 11] = [
        SlideKind::Cover,
        SlideKind::SectionDivider,
        SlideKind::Agenda,
        SlideKind::Content,
        SlideKind::TwoColumn,
        SlideKind::Quote,
        SlideKind::Metrics,
        SlideKind::Team,
        SlideKind::CaseStudy,
        SlideKind::Closing,
        SlideKind::Blank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlideKind::Cover => "cover",
            SlideKind::SectionDivider => "section_divider",
            SlideKind::Agenda => "agenda",
            SlideKind::Content => "content",
            SlideKind::TwoColumn => "two_column",
            SlideKind::Quote => "quote",
            SlideKind::Metrics => "metrics",
            SlideKind::Team => "team",
            SlideKind::CaseStudy => "case_study",
            SlideKind::Closing => "closing",
            SlideKind::Blank => "blank",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Fields that must be present on a record of this kind.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SlideKind::Cover => &["title"],
            SlideKind::SectionDivider => &["title"],
            SlideKind::Agenda => &["items"],
            SlideKind::Content => &["title"],
            SlideKind::TwoColumn => &["title", "left_title", "right_title"],
            SlideKind::Quote => &["text"],
            SlideKind::Metrics => &["title", "metrics"],
            SlideKind::Team => &["title", "members"],
            SlideKind::CaseStudy => &["title", "challenge", "solution", "results"],
            SlideKind::Closing => &["title"],
            SlideKind::Blank => &[],
        }
    }

    /// Comma-separated list of every registered type name.
    pub fn registry_names() -> String {
        Self::ALL
            .iter()
            .map(SlideKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed deck specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub title: Option<String>,
    pub slides: Vec<SlideSpec>,
}

/// One slide record, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideSpec {
    Cover(CoverSlide),
    SectionDivider(SectionDividerSlide),
    Agenda(AgendaSlide),
    Content(ContentSlide),
    TwoColumn(TwoColumnSlide),
    Quote(QuoteSlide),
    Metrics(MetricsSlide),
    Team(TeamSlide),
    CaseStudy(CaseStudySlide),
    Closing(ClosingSlide),
    Blank(BlankSlide),
}

impl SlideSpec {
    pub fn kind(&self) -> SlideKind {
        match self {
            SlideSpec::Cover(_) => SlideKind::Cover,
            SlideSpec::SectionDivider(_) => SlideKind::SectionDivider,
            SlideSpec::Agenda(_) => SlideKind::Agenda,
            SlideSpec::Content(_) => SlideKind::Content,
            SlideSpec::TwoColumn(_) => SlideKind::TwoColumn,
            SlideSpec::Quote(_) => SlideKind::Quote,
            SlideSpec::Metrics(_) => SlideKind::Metrics,
            SlideSpec::Team(_) => SlideKind::Team,
            SlideSpec::CaseStudy(_) => SlideKind::CaseStudy,
            SlideSpec::Closing(_) => SlideKind::Closing,
            SlideSpec::Blank(_) => SlideKind::Blank,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverSlide {
    pub title: String,
    pub subtitle: Option<String>,
    pub date: Option<String>,
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDividerSlide {
    pub title: String,
    pub subtitle: Option<String>,
    /// Background color as hex; the theme's dark primary when absent.
    pub bg_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaSlide {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSlide {
    pub title: String,
    pub body: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bullet_items: Vec<String>,
    pub image_placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoColumnSlide {
    pub title: String,
    pub left_title: String,
    pub left_body: Option<String>,
    pub right_title: String,
    pub right_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSlide {
    pub text: String,
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSlide {
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: Vec<Metric>,
    pub chart_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Strings are kept as written; numbers are shown in their JSON form.
    #[serde(default = "default_metric_value", deserialize_with = "metric_value")]
    pub value: String,
    #[serde(default, deserialize_with = "metric_label")]
    pub label: String,
}

fn default_metric_value() -> String {
    "\u{2014}".to_string()
}

/// `null` reads as the type's default, so `"items": null` is an empty list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A string or number, as display text. `None` for `null`.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

fn metric_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(deserializer)?.unwrap_or_else(default_metric_value))
}

fn metric_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSlide {
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudySlide {
    pub title: String,
    pub challenge: String,
    pub solution: String,
    pub results: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingSlide {
    pub title: String,
    pub subtitle: Option<String>,
    pub contact: Option<String>,
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlankSlide {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in SlideKind::ALL {
            assert_eq!(SlideKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(SlideKind::from_name("unicorn"), None);
    }

    #[test]
    fn test_registry_names() {
        let names = SlideKind::registry_names();
        assert!(names.starts_with("cover, section_divider"));
        assert!(names.ends_with("closing, blank"));
    }

    #[test]
    fn test_tagged_records() {
        let spec: SlideSpec = serde_json::from_value(json!({
            "type": "metrics",
            "title": "Numbers",
            "metrics": [{ "value": "98%", "label": "Happy" }, { "label": "No value" }]
        }))
        .unwrap();

        assert_eq!(spec.kind(), SlideKind::Metrics);
        match spec {
            SlideSpec::Metrics(m) => {
                assert_eq!(m.metrics[0].value, "98%");
                assert_eq!(m.metrics[1].value, "\u{2014}");
                assert_eq!(m.chart_label, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_blank_and_extra_fields() {
        let spec: SlideSpec =
            serde_json::from_value(json!({ "type": "blank", "notes": "ignored" })).unwrap();
        assert_eq!(spec, SlideSpec::Blank(BlankSlide {}));

        let spec: SlideSpec = serde_json::from_value(json!({
            "type": "content",
            "title": "T",
            "speaker_notes": "ignored"
        }))
        .unwrap();
        match spec {
            SlideSpec::Content(c) => assert!(c.bullet_items.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_numeric_metrics_become_text() {
        let spec: SlideSpec = serde_json::from_value(json!({
            "type": "metrics",
            "title": "Numbers",
            "metrics": [
                { "value": 98, "label": "Uptime" },
                { "value": 3.5, "label": 2025 },
                { "value": null }
            ]
        }))
        .unwrap();
        match spec {
            SlideSpec::Metrics(m) => {
                assert_eq!(m.metrics[0].value, "98");
                assert_eq!(m.metrics[1].value, "3.5");
                assert_eq!(m.metrics[1].label, "2025");
                assert_eq!(m.metrics[2].value, "\u{2014}");
                assert_eq!(m.metrics[2].label, "");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_null_lists_are_empty() {
        let spec: SlideSpec = serde_json::from_value(json!({
            "type": "content",
            "title": "T",
            "bullet_items": null
        }))
        .unwrap();
        assert!(matches!(spec, SlideSpec::Content(c) if c.bullet_items.is_empty()));

        let spec: SlideSpec =
            serde_json::from_value(json!({ "type": "agenda", "items": null })).unwrap();
        assert!(matches!(spec, SlideSpec::Agenda(a) if a.items.is_empty()));
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let result: Result<SlideSpec, _> = serde_json::from_value(json!({ "type": "quote" }));
        assert!(result.is_err());
    }
}
