//! PPTX (Office Open XML) support for branded decks.
//!
//! A typed document model ([`Presentation`], [`Slide`], [`Shape`]) with the
//! styling primitives the slide builder uses, a writer that serializes it to a
//! `.pptx` package, and a reader plus brand audit for generated files.

pub mod audit;
pub mod document;
pub mod media;
pub mod reader;
pub mod shape;
pub mod template;
pub mod writer;
mod xml;

pub use audit::{audit, audit_path, AuditReport, Finding};
pub use document::{DocProps, PackageTheme, Presentation, Slide};
pub use media::ImageData;
pub use reader::{DeckSummary, PptxReader, ShapeSummary, SlideSummary};
pub use shape::{
    set_alpha, set_border, set_corner_radius, set_fill, set_linear_gradient, set_no_border,
    set_shadow, Align, Anchor, Border, Fill, Frame, GradientStop, Paragraph, Run, Shadow, Shape,
    ShapeKind, ShapeStyle, TextBody,
};
pub use writer::PackageWriter;
