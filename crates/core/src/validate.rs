//! Slide specification validation.
//!
//! Validation runs on the raw JSON document so that every problem can be
//! reported at once, before anything is rendered.

use crate::error::{Error, Result};
use crate::spec::{Deck, SlideKind, SlideSpec};
use serde_json::Value;

/// Check a spec document. Returns one message per problem; empty means valid.
pub fn validate(doc: &Value) -> Vec<String> {
    let Some(slides) = doc.get("slides").and_then(Value::as_array) else {
        return vec!["Spec must contain a 'slides' array.".to_string()];
    };

    let mut errors = Vec::new();
    for (idx, slide) in slides.iter().enumerate() {
        errors.extend(validate_slide(idx + 1, slide));
    }
    errors
}

/// Check one record. `number` is 1-based.
fn validate_slide(number: usize, slide: &Value) -> Vec<String> {
    let Some(record) = slide.as_object() else {
        return vec![format!("Slide {}: expected an object.", number)];
    };

    let type_name = match record.get("type").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name,
        _ => return vec![format!("Slide {}: missing 'type' field.", number)],
    };

    let Some(kind) = SlideKind::from_name(type_name) else {
        return vec![format!(
            "Slide {}: unknown type '{}'. Valid types: {}",
            number,
            type_name,
            SlideKind::registry_names()
        )];
    };

    let missing: Vec<String> = kind
        .required_fields()
        .iter()
        .filter(|field| !record.contains_key(**field))
        .map(|field| {
            format!(
                "Slide {} ({}): missing required field '{}'.",
                number, kind, field
            )
        })
        .collect();
    if !missing.is_empty() {
        return missing;
    }

    // Every required field is present; what remains is the shape of the values.
    match serde_json::from_value::<SlideSpec>(slide.clone()) {
        Ok(_) => Vec::new(),
        Err(e) => vec![format!("Slide {} ({}): {}", number, kind, e)],
    }
}

/// Validate and parse a spec document into a typed [`Deck`].
pub fn parse_deck(doc: &Value) -> Result<Deck> {
    let errors = validate(doc);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }
    Ok(serde_json::from_value(doc.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_minimal_spec() {
        let spec = json!({ "slides": [{ "type": "cover", "title": "Hello" }] });
        assert_eq!(validate(&spec), Vec::<String>::new());
    }

    #[test]
    fn test_missing_slides_key() {
        let errors = validate(&json!({}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_lowercase().contains("slides"));
    }

    #[test]
    fn test_slides_not_an_array() {
        let errors = validate(&json!({ "slides": "cover" }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'slides'"));
    }

    #[test]
    fn test_missing_type_field() {
        let errors = validate(&json!({ "slides": [{ "title": "No type" }] }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'type'"));
    }

    #[test]
    fn test_unknown_type() {
        let errors = validate(&json!({ "slides": [{ "type": "unicorn" }] }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unicorn"));
        assert!(errors[0].contains("unknown"));
        assert!(errors[0].contains("case_study"));
    }

    #[test]
    fn test_missing_required_field() {
        let errors = validate(&json!({ "slides": [{ "type": "quote" }] }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'text'"));
    }

    #[test]
    fn test_each_missing_field_reported() {
        let errors = validate(&json!({ "slides": [{ "type": "case_study", "title": "T" }] }));
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("'challenge'"));
        assert!(errors[1].contains("'solution'"));
        assert!(errors[2].contains("'results'"));
    }

    #[test]
    fn test_errors_across_slides_collected() {
        let errors = validate(&json!({
            "slides": [
                { "type": "cover" },
                { "type": "blank" },
                { "type": "nope" },
                42
            ]
        }));
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Slide 1 (cover)"));
        assert!(errors[1].starts_with("Slide 3:"));
        assert!(errors[2].starts_with("Slide 4:"));
    }

    #[test]
    fn test_wrong_value_shape() {
        let errors = validate(&json!({ "slides": [{ "type": "agenda", "items": "one, two" }] }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Slide 1 (agenda)"));
    }

    #[test]
    fn test_numeric_metric_value_accepted() {
        let doc = json!({ "slides": [{
            "type": "metrics",
            "title": "T",
            "metrics": [{ "value": 98, "label": "Uptime" }]
        }] });
        assert!(validate(&doc).is_empty());
        match &parse_deck(&doc).unwrap().slides[0] {
            SlideSpec::Metrics(m) => assert_eq!(m.metrics[0].value, "98"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_metric_value_object_rejected() {
        let doc = json!({ "slides": [{
            "type": "metrics",
            "title": "T",
            "metrics": [{ "value": { "n": 1 } }]
        }] });
        let errors = validate(&doc);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Slide 1 (metrics)"));
    }

    #[test]
    fn test_null_lists_validate_as_empty() {
        let doc = json!({ "slides": [
            { "type": "agenda", "items": null },
            { "type": "content", "title": "T", "bullet_items": null },
            { "type": "team", "title": "T", "members": null }
        ] });
        assert!(validate(&doc).is_empty());
        let slides = parse_deck(&doc).unwrap().slides;
        assert!(matches!(&slides[0], SlideSpec::Agenda(a) if a.items.is_empty()));
        assert!(matches!(&slides[1], SlideSpec::Content(c) if c.bullet_items.is_empty()));
        assert!(matches!(&slides[2], SlideSpec::Team(t) if t.members.is_empty()));
    }

    #[test]
    fn test_blank_slide_no_required_fields() {
        assert!(validate(&json!({ "slides": [{ "type": "blank" }] })).is_empty());
    }

    #[test]
    fn test_empty_slide_list_is_valid() {
        assert!(validate(&json!({ "slides": [] })).is_empty());
    }

    #[test]
    fn test_parse_deck() {
        let deck = parse_deck(&json!({
            "title": "Quarterly",
            "slides": [{ "type": "cover", "title": "Hello" }, { "type": "blank" }]
        }))
        .unwrap();
        assert_eq!(deck.title.as_deref(), Some("Quarterly"));
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[1].kind(), SlideKind::Blank);
    }

    #[test]
    fn test_parse_deck_reports_all_errors() {
        let err = parse_deck(&json!({ "slides": [{ "type": "quote" }, { "type": "x" }] }))
            .unwrap_err();
        match err {
            Error::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
