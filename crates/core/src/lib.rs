//! Core domain types for branded deck generation: colors, the resolved brand
//! theme, typed slide specifications and their validation.

pub mod color;
pub mod demo;
pub mod error;
pub mod spec;
pub mod text;
pub mod theme;
pub mod units;
pub mod validate;

pub use color::{contrast_ratio, hex_to_color, pick_readable_text_color, relative_luminance, Color};
pub use error::{Error, Result};
pub use spec::{Deck, SlideKind, SlideSpec};
pub use theme::{load_theme, resolve_theme, AssetPath, BrandTokens, Placement, Theme};
pub use units::{inches, points, Emu};
pub use validate::{parse_deck, validate};
