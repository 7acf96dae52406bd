//! Deck orchestration: validate, render every record, serialize.

use crate::options::DeckOptions;
use crate::renderers::render_slide;
use deck_core::{validate, Error, Result, SlideSpec, Theme};
use deck_pptx::{DocProps, Presentation};
use serde_json::Value;
use std::path::Path;

/// A slide that was skipped while building the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideFailure {
    /// 1-based position in the `slides` array.
    pub number: usize,
    /// The record's `type`, or `"?"` when it has none.
    pub kind: String,
    pub message: String,
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct DeckOutput {
    /// The serialized `.pptx` package.
    pub bytes: Vec<u8>,
    pub rendered: usize,
    pub failures: Vec<SlideFailure>,
}

/// Validate a spec document and render it into a presentation.
///
/// Validation problems abort before anything is drawn. After that a slide
/// that fails to render is logged and left out; the rest of the deck still
/// builds.
pub fn build_presentation(
    doc: &Value,
    theme: &Theme,
    options: &DeckOptions,
) -> Result<(Presentation, Vec<SlideFailure>)> {
    let errors = validate(doc);
    if !errors.is_empty() {
        for error in &errors {
            log::error!("{}", error);
        }
        return Err(Error::Validation(errors));
    }

    let title = options
        .title
        .clone()
        .or_else(|| doc.get("title").and_then(Value::as_str).map(str::to_string));
    let mut pres = Presentation::for_theme(theme).with_props(DocProps {
        title,
        creator: Some(theme.brand_name.clone()),
        created: options.created,
    });

    let records = doc
        .get("slides")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut failures = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let number = idx + 1;
        let kind = record
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_string();

        let spec = match serde_json::from_value::<SlideSpec>(record.clone()) {
            Ok(spec) => spec,
            Err(e) => {
                log::error!("Slide {}: cannot render type '{}': {}", number, kind, e);
                failures.push(SlideFailure {
                    number,
                    kind,
                    message: e.to_string(),
                });
                continue;
            }
        };

        match render_slide(theme, options, &spec) {
            Ok(slide) => {
                log::info!("Slide {}: {}", number, kind);
                pres.push_slide(slide);
            }
            Err(e) => {
                log::error!("Slide {} ({}) failed: {}", number, kind, e);
                failures.push(SlideFailure {
                    number,
                    kind,
                    message: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Rendered {} of {} slides ({} skipped)",
        pres.slide_count(),
        records.len(),
        failures.len()
    );
    Ok((pres, failures))
}

/// Render a spec document to `.pptx` bytes.
pub fn generate(doc: &Value, theme: &Theme, options: &DeckOptions) -> Result<DeckOutput> {
    let (pres, failures) = build_presentation(doc, theme, options)?;
    let bytes = pres.to_bytes()?;
    Ok(DeckOutput {
        bytes,
        rendered: pres.slide_count(),
        failures,
    })
}

/// Render a spec document and write the package to `out`.
///
/// Nothing is written when validation or serialization fails.
pub fn generate_to_path(
    doc: &Value,
    theme: &Theme,
    options: &DeckOptions,
    out: &Path,
) -> Result<DeckOutput> {
    let output = generate(doc, theme, options)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, &output.bytes)?;
    log::info!(
        "Saved {} ({} slides, {} bytes)",
        out.display(),
        output.rendered,
        output.bytes.len()
    );
    Ok(output)
}
