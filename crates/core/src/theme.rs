//! Brand tokens and the resolved, read-only theme.
//!
//! A brand file is a loosely structured JSON document; every group in it is
//! optional. [`resolve_theme`] turns it into a [`Theme`] in which every field
//! is populated, falling back to built-in defaults for anything absent or
//! malformed.

use crate::color::Color;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Raw brand token groups, as found in `brand.json`.
///
/// A group that is missing, `null` or not an object reads as empty, so its
/// tokens fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct BrandTokens {
    /// Display name of the brand, used in default footers.
    pub name: Option<String>,
    pub colors: Map<String, Value>,
    pub color_roles: Map<String, Value>,
    pub typography: Map<String, Value>,
    pub type_scale_pt: Map<String, Value>,
    pub spacing_inches: Map<String, Value>,
    pub card_style: Map<String, Value>,
    pub button_style: Map<String, Value>,
    pub logo_rules: Map<String, Value>,
    pub logo_assets: Map<String, Value>,
    pub slide_dimensions: Map<String, Value>,
}

impl BrandTokens {
    /// Parse brand tokens from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a brand token file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl From<Map<String, Value>> for BrandTokens {
    fn from(mut raw: Map<String, Value>) -> Self {
        let name = match raw.remove("name") {
            Some(Value::String(name)) => Some(name),
            None | Some(Value::Null) => None,
            Some(other) => {
                log::warn!("Brand name '{}' is not a string, ignoring", other);
                None
            }
        };
        let mut group = |key: &str| match raw.remove(key) {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => Map::new(),
            Some(other) => {
                log::warn!("Brand token group '{}' is not an object ({}), using defaults", key, other);
                Map::new()
            }
        };
        BrandTokens {
            name,
            colors: group("colors"),
            color_roles: group("color_roles"),
            typography: group("typography"),
            type_scale_pt: group("type_scale_pt"),
            spacing_inches: group("spacing_inches"),
            card_style: group("card_style"),
            button_style: group("button_style"),
            logo_rules: group("logo_rules"),
            logo_assets: group("logo_assets"),
            slide_dimensions: group("slide_dimensions"),
        }
    }
}

/// Named brand colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub primary_dark: Color,
    pub primary_bright: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub neutral_light: Color,
    pub neutral_dark: Color,
    pub gray: Color,
}

impl Palette {
    /// Every palette color, in declaration order.
    pub fn all(&self) -> [Color; 7] {
        [
            self.primary_dark,
            self.primary_bright,
            self.accent,
            self.accent_alt,
            self.neutral_light,
            self.neutral_dark,
            self.gray,
        ]
    }
}

/// Font families per typographic role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fonts {
    pub headline: String,
    pub body: String,
    pub utility: String,
    pub fallback: String,
}

/// Type scale in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeScale {
    pub h1: f64,
    pub h2: f64,
    pub h3: f64,
    pub h4: f64,
    pub body: f64,
    pub body_lg: f64,
    pub small: f64,
    pub caption: f64,
}

/// Spacing in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spacing {
    pub margin: f64,
    pub gutter: f64,
    pub section_pad: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardStyle {
    pub radius_pt: f64,
    /// Drop shadow opacity, 0–100.
    pub shadow_alpha_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonStyle {
    pub radius_pt: f64,
    pub fill: Color,
    pub text: Color,
}

/// Slide canvas size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideSize {
    pub width: f64,
    pub height: f64,
}

/// A logo file declared by the brand. Whether it can be used is only known
/// once [`AssetPath::locate`] has checked the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AssetPath {
    /// The brand file names no asset for this slot.
    Unset,
    /// An absolute path, which may or may not exist.
    Declared(PathBuf),
}

impl AssetPath {
    /// The path, if it is declared and points at an existing file.
    pub fn locate(&self) -> Option<&Path> {
        match self {
            AssetPath::Declared(path) if path.is_file() => Some(path.as_path()),
            AssetPath::Declared(path) => {
                log::warn!("Asset not found: {}", path.display());
                None
            }
            AssetPath::Unset => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, AssetPath::Declared(_))
    }
}

/// Logo and favicon variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoSet {
    pub colored_horizontal: AssetPath,
    pub colored_vertical: AssetPath,
    pub white_horizontal: AssetPath,
    pub black_horizontal: AssetPath,
    pub favicon_colored: AssetPath,
    pub favicon_white: AssetPath,
}

/// Where a logo may be anchored on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Placement {
    UpperLeft,
    UpperCenter,
    UpperRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl Placement {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "upper-left" => Some(Self::UpperLeft),
            "upper-center" => Some(Self::UpperCenter),
            "upper-right" => Some(Self::UpperRight),
            "lower-left" => Some(Self::LowerLeft),
            "lower-center" => Some(Self::LowerCenter),
            "lower-right" => Some(Self::LowerRight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpperLeft => "upper-left",
            Self::UpperCenter => "upper-center",
            Self::UpperRight => "upper-right",
            Self::LowerLeft => "lower-left",
            Self::LowerCenter => "lower-center",
            Self::LowerRight => "lower-right",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved brand theme. Built once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub brand_name: String,
    pub colors: Palette,
    pub fonts: Fonts,
    pub type_scale: TypeScale,
    pub spacing: Spacing,
    pub card: CardStyle,
    pub button: ButtonStyle,
    pub slide: SlideSize,
    pub logos: LogoSet,
    pub allowed_placements: Vec<Placement>,
}

impl Default for Theme {
    fn default() -> Self {
        resolve_theme(&BrandTokens::default(), Path::new("."))
    }
}

/// Built-in fallbacks for every theme field.
mod defaults {
    use crate::color::Color;
    use crate::theme::Placement;

    pub const BRAND_NAME: &str = "Brand";

    pub const PRIMARY_DARK: Color = Color::rgb(0x02, 0x27, 0x91);
    pub const PRIMARY_BRIGHT: Color = Color::rgb(0x4D, 0x75, 0xFE);
    pub const ACCENT: Color = Color::rgb(0xFF, 0x8A, 0x69);
    pub const ACCENT_ALT: Color = Color::rgb(0xFA, 0xA9, 0x44);
    pub const NEUTRAL_LIGHT: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const NEUTRAL_DARK: Color = Color::rgb(0x0C, 0x0C, 0x0C);
    pub const GRAY: Color = Color::rgb(0x26, 0x26, 0x26);

    pub const HEADLINE_FONT: &str = "Inter Tight";
    pub const BODY_FONT: &str = "Inter Tight";
    pub const UTILITY_FONT: &str = "Roboto";
    pub const FALLBACK_FONT: &str = "Arial";

    pub const MARGIN: f64 = 0.6;
    pub const GUTTER: f64 = 0.35;
    pub const SECTION_PAD: f64 = 0.5;

    pub const CARD_RADIUS_PT: f64 = 12.0;
    pub const CARD_SHADOW_ALPHA_PCT: f64 = 15.0;
    pub const BUTTON_RADIUS_PT: f64 = 20.0;

    pub const SLIDE_WIDTH: f64 = 13.333;
    pub const SLIDE_HEIGHT: f64 = 7.5;

    pub const PLACEMENTS: [Placement; 4] = [
        Placement::UpperLeft,
        Placement::LowerLeft,
        Placement::UpperCenter,
        Placement::LowerCenter,
    ];
}

/// Merge brand tokens with defaults into a [`Theme`].
///
/// Relative logo paths are joined onto `base_dir`. The function never fails:
/// every absent or malformed token falls back to its default.
pub fn resolve_theme(tokens: &BrandTokens, base_dir: &Path) -> Theme {
    let palette = Palette {
        primary_dark: role_color(tokens, "primary_dark", "night_navy", defaults::PRIMARY_DARK),
        primary_bright: role_color(tokens, "primary_bright", "day_blue", defaults::PRIMARY_BRIGHT),
        accent: role_color(tokens, "accent", "salmon", defaults::ACCENT),
        accent_alt: role_color(tokens, "accent_alt", "yellow", defaults::ACCENT_ALT),
        neutral_light: role_color(tokens, "neutral_light", "white", defaults::NEUTRAL_LIGHT),
        neutral_dark: role_color(tokens, "neutral_dark", "black", defaults::NEUTRAL_DARK),
        gray: role_color(tokens, "gray", "gray", defaults::GRAY),
    };

    let typo = &tokens.typography;
    let fonts = Fonts {
        headline: str_token(typo, "headline_font").unwrap_or(defaults::HEADLINE_FONT).to_string(),
        body: str_token(typo, "body_font").unwrap_or(defaults::BODY_FONT).to_string(),
        utility: str_token(typo, "utility_font").unwrap_or(defaults::UTILITY_FONT).to_string(),
        fallback: str_token(typo, "fallback").unwrap_or(defaults::FALLBACK_FONT).to_string(),
    };

    let ts = &tokens.type_scale_pt;
    let type_scale = TypeScale {
        h1: num_token(ts, "h1").unwrap_or(44.0),
        h2: num_token(ts, "h2").unwrap_or(32.0),
        h3: num_token(ts, "h3").unwrap_or(24.0),
        h4: num_token(ts, "h4").unwrap_or(18.0),
        body: num_token(ts, "body").unwrap_or(14.0),
        body_lg: num_token(ts, "body_lg").unwrap_or(18.0),
        small: num_token(ts, "small").unwrap_or(11.0),
        caption: num_token(ts, "caption").unwrap_or(10.0),
    };

    let sp = &tokens.spacing_inches;
    let spacing = Spacing {
        margin: num_token(sp, "margin").unwrap_or(defaults::MARGIN),
        gutter: num_token(sp, "gutter").unwrap_or(defaults::GUTTER),
        section_pad: num_token(sp, "section_pad").unwrap_or(defaults::SECTION_PAD),
    };

    let card = CardStyle {
        radius_pt: num_token(&tokens.card_style, "radius_pt").unwrap_or(defaults::CARD_RADIUS_PT),
        shadow_alpha_pct: num_token(&tokens.card_style, "shadow_alpha_pct")
            .unwrap_or(defaults::CARD_SHADOW_ALPHA_PCT)
            .clamp(0.0, 100.0),
    };

    let bs = &tokens.button_style;
    let button = ButtonStyle {
        radius_pt: num_token(bs, "radius_pt").unwrap_or(defaults::BUTTON_RADIUS_PT),
        fill: style_color(tokens, str_token(bs, "fill_color"), palette.primary_bright),
        text: style_color(tokens, str_token(bs, "text_color"), palette.neutral_light),
    };

    let sd = &tokens.slide_dimensions;
    let slide = SlideSize {
        width: num_token(sd, "width_inches").filter(|w| *w > 0.0).unwrap_or(defaults::SLIDE_WIDTH),
        height: num_token(sd, "height_inches").filter(|h| *h > 0.0).unwrap_or(defaults::SLIDE_HEIGHT),
    };

    let la = &tokens.logo_assets;
    let asset = |key: &str| match str_token(la, key) {
        Some(rel) => AssetPath::Declared(base_dir.join(rel)),
        None => AssetPath::Unset,
    };
    let logos = LogoSet {
        colored_horizontal: asset("colored_horizontal_png"),
        colored_vertical: asset("colored_vertical_png"),
        white_horizontal: asset("white_horizontal_png"),
        black_horizontal: asset("black_horizontal_png"),
        favicon_colored: asset("favicon_colored_png"),
        favicon_white: asset("favicon_white_png"),
    };

    Theme {
        brand_name: tokens
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults::BRAND_NAME)
            .to_string(),
        colors: palette,
        fonts,
        type_scale,
        spacing,
        card,
        button,
        slide,
        logos,
        allowed_placements: allowed_placements(&tokens.logo_rules),
    }
}

/// Load a brand file and resolve it. Only file and JSON errors propagate.
pub fn load_theme(brand_path: &Path, base_dir: &Path) -> Result<Theme> {
    let tokens = BrandTokens::from_path(brand_path)?;
    Ok(resolve_theme(&tokens, base_dir))
}

/// A non-empty string token.
fn str_token<'a>(group: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    group
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// A numeric token.
fn num_token(group: &Map<String, Value>, key: &str) -> Option<f64> {
    group.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}

/// A color from the `colors` group, parsed. Malformed values log and yield `None`.
fn named_color(tokens: &BrandTokens, name: &str) -> Option<Color> {
    let raw = str_token(&tokens.colors, name)?;
    let parsed = Color::parse(raw);
    if parsed.is_none() {
        log::warn!("Brand color '{}' has malformed value '{}', using default", name, raw);
    }
    parsed
}

/// Resolve a palette slot: through `color_roles`, then the brand palette name.
fn role_color(tokens: &BrandTokens, role: &str, palette_name: &str, default: Color) -> Color {
    str_token(&tokens.color_roles, role)
        .and_then(|name| named_color(tokens, name))
        .or_else(|| named_color(tokens, palette_name))
        .unwrap_or(default)
}

/// Resolve a style color: literal hex, else a `colors` key, else the default.
fn style_color(tokens: &BrandTokens, raw: Option<&str>, default: Color) -> Color {
    let Some(raw) = raw else {
        return default;
    };
    if raw.starts_with('#') {
        return Color::parse(raw).unwrap_or_else(|| {
            log::warn!("Malformed style color '{}', using default", raw);
            default
        });
    }
    named_color(tokens, raw).unwrap_or(default)
}

fn allowed_placements(rules: &Map<String, Value>) -> Vec<Placement> {
    let parsed: Vec<Placement> = rules
        .get("allowed_placements")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|s| {
                    let placement = Placement::parse(s);
                    if placement.is_none() {
                        log::warn!("Ignoring unknown logo placement '{}'", s);
                    }
                    placement
                })
                .collect()
        })
        .unwrap_or_default();

    if parsed.is_empty() {
        defaults::PLACEMENTS.to_vec()
    } else {
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tokens(value: Value) -> BrandTokens {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_tokens_use_defaults() {
        let theme = resolve_theme(&BrandTokens::default(), Path::new("/brand"));
        assert_eq!(theme.colors.primary_dark, Color::rgb(0x02, 0x27, 0x91));
        assert_eq!(theme.colors.primary_bright, Color::rgb(0x4D, 0x75, 0xFE));
        assert_eq!(theme.fonts.utility, "Roboto");
        assert_eq!(theme.type_scale.h1, 44.0);
        assert_eq!(theme.spacing.margin, 0.6);
        assert_eq!(theme.slide.width, 13.333);
        assert_eq!(theme.slide.height, 7.5);
        assert_eq!(theme.button.fill, theme.colors.primary_bright);
        assert_eq!(theme.button.text, Color::WHITE);
        assert_eq!(theme.logos.colored_horizontal, AssetPath::Unset);
        assert_eq!(theme.allowed_placements.len(), 4);
        assert!(!theme.allowed_placements.contains(&Placement::UpperRight));
        assert_eq!(theme.brand_name, "Brand");
    }

    #[test]
    fn test_palette_names_and_roles() {
        let theme = resolve_theme(
            &tokens(json!({
                "colors": {
                    "night_navy": "#111111",
                    "ink": "#222222",
                    "day_blue": "333333"
                },
                "color_roles": { "primary_dark": "ink" }
            })),
            Path::new("."),
        );
        // The role mapping wins over the palette name.
        assert_eq!(theme.colors.primary_dark, Color::rgb(0x22, 0x22, 0x22));
        assert_eq!(theme.colors.primary_bright, Color::rgb(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_malformed_color_falls_back() {
        let theme = resolve_theme(
            &tokens(json!({ "colors": { "salmon": "pinkish" } })),
            Path::new("."),
        );
        assert_eq!(theme.colors.accent, Color::rgb(0xFF, 0x8A, 0x69));
    }

    #[test]
    fn test_button_colors_by_hex_or_name() {
        let theme = resolve_theme(
            &tokens(json!({
                "colors": { "yellow": "#FAA944" },
                "button_style": { "fill_color": "yellow", "text_color": "#010203", "radius_pt": 8 }
            })),
            Path::new("."),
        );
        assert_eq!(theme.button.fill, Color::rgb(0xFA, 0xA9, 0x44));
        assert_eq!(theme.button.text, Color::rgb(1, 2, 3));
        assert_eq!(theme.button.radius_pt, 8.0);
    }

    #[test]
    fn test_unknown_button_color_name_uses_default() {
        let theme = resolve_theme(
            &tokens(json!({ "button_style": { "fill_color": "chartreuse" } })),
            Path::new("."),
        );
        assert_eq!(theme.button.fill, theme.colors.primary_bright);
    }

    #[test]
    fn test_numbers_and_empty_strings() {
        let theme = resolve_theme(
            &tokens(json!({
                "typography": { "headline_font": "", "body_font": "Lato" },
                "type_scale_pt": { "h1": 50, "body": "big" },
                "spacing_inches": { "margin": 0.75 },
                "slide_dimensions": { "width_inches": 10, "height_inches": -1 }
            })),
            Path::new("."),
        );
        assert_eq!(theme.fonts.headline, "Inter Tight");
        assert_eq!(theme.fonts.body, "Lato");
        assert_eq!(theme.type_scale.h1, 50.0);
        assert_eq!(theme.type_scale.body, 14.0);
        assert_eq!(theme.spacing.margin, 0.75);
        assert_eq!(theme.slide.width, 10.0);
        assert_eq!(theme.slide.height, 7.5);
    }

    #[test]
    fn test_logo_paths_joined_and_located() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/logo.png"), b"not really a png").unwrap();

        let theme = resolve_theme(
            &tokens(json!({
                "logo_assets": {
                    "colored_horizontal_png": "assets/logo.png",
                    "white_horizontal_png": "assets/missing.png"
                }
            })),
            dir.path(),
        );

        assert_eq!(
            theme.logos.colored_horizontal,
            AssetPath::Declared(dir.path().join("assets/logo.png"))
        );
        assert!(theme.logos.colored_horizontal.locate().is_some());
        assert!(theme.logos.white_horizontal.is_set());
        assert!(theme.logos.white_horizontal.locate().is_none());
        assert!(theme.logos.favicon_colored.locate().is_none());
    }

    #[test]
    fn test_allowed_placements_from_rules() {
        let theme = resolve_theme(
            &tokens(json!({
                "logo_rules": { "allowed_placements": ["lower-center", "sideways", "upper-left"] }
            })),
            Path::new("."),
        );
        assert_eq!(
            theme.allowed_placements,
            vec![Placement::LowerCenter, Placement::UpperLeft]
        );
    }

    #[test]
    fn test_unknown_groups_ignored() {
        let parsed = BrandTokens::from_json(
            r##"{"name": "Acme", "gradient": {"angle": 135}, "website_cues": {}}"##,
        )
        .unwrap();
        let theme = resolve_theme(&parsed, Path::new("."));
        assert_eq!(theme.brand_name, "Acme");
    }

    #[test]
    fn test_malformed_groups_fall_back() {
        let parsed = BrandTokens::from_json(
            r##"{"name": 5, "colors": "red", "typography": null, "spacing_inches": [1, 2],
                "button_style": {"fill_color": "#112233"}}"##,
        )
        .unwrap();
        assert!(parsed.name.is_none());
        assert!(parsed.colors.is_empty());
        assert!(parsed.typography.is_empty());
        assert!(parsed.spacing_inches.is_empty());

        let theme = resolve_theme(&parsed, Path::new("."));
        let defaults = resolve_theme(&BrandTokens::default(), Path::new("."));
        assert_eq!(theme.colors, defaults.colors);
        assert_eq!(theme.fonts, defaults.fonts);
        assert_eq!(theme.spacing, defaults.spacing);
        assert_eq!(theme.brand_name, defaults.brand_name);
        assert_eq!(theme.button.fill, Color::rgb(0x11, 0x22, 0x33));
    }

    #[test]
    fn test_load_theme_with_malformed_group() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brand.json");
        std::fs::write(&path, r#"{"name": "Acme", "colors": "red"}"#).unwrap();
        let theme = load_theme(&path, dir.path()).unwrap();
        assert_eq!(theme.brand_name, "Acme");
        assert_eq!(theme.colors.primary_dark, Color::rgb(0x02, 0x27, 0x91));
    }

    #[test]
    fn test_non_object_document_rejected() {
        assert!(BrandTokens::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let t = tokens(json!({ "colors": { "day_blue": "#123456" } }));
        assert_eq!(resolve_theme(&t, Path::new("/x")), resolve_theme(&t, Path::new("/x")));
    }
}
