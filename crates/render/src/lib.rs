//! Branded slide rendering.
//!
//! [`generate`] takes a slide specification document and a resolved
//! [`Theme`](deck_core::Theme), renders one slide per record with the
//! brand-aware [`SlideBuilder`], and returns the serialized `.pptx` package.
//!
//! # Example
//!
//! ```no_run
//! use deck_core::{demo::demo_spec, Theme};
//! use deck_render::{generate_to_path, DeckOptions};
//! use std::path::Path;
//!
//! let theme = Theme::default();
//! let options = DeckOptions::for_brand(&theme.brand_name, 2025);
//! let output = generate_to_path(&demo_spec(), &theme, &options, Path::new("demo.pptx"))?;
//! println!("{} slides", output.rendered);
//! # Ok::<(), deck_core::Error>(())
//! ```

pub mod builder;
pub mod generate;
pub mod options;
pub mod renderers;

pub use builder::{ButtonOptions, Card, LogoVariant, SlideBuilder, TextOptions};
pub use generate::{build_presentation, generate, generate_to_path, DeckOutput, SlideFailure};
pub use options::DeckOptions;
pub use renderers::render_slide;
