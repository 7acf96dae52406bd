//! Color parsing and WCAG contrast helpers.
//!
//! Colors travel through the system as [`Color`] values. The free functions
//! taking `&str` accept the hex strings found in brand files and slide specs;
//! they never fail, substituting black (or a luminance of 0.0) for input that
//! does not parse.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Six hex digits, with an optional leading `#`.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").unwrap());

/// Text color returned for dark backgrounds.
pub const WHITE_TEXT: &str = "#FFFFFF";

/// Text color returned for light backgrounds.
pub const BLACK_TEXT: &str = "#000000";

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color, returning `None` for anything but six hex digits.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = HEX_COLOR_REGEX.captures(s.trim())?;
        let digits = caps.get(1)?.as_str();
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase hex digits without `#`, as DrawingML expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG contrast ratio against another color, in `[1, 21]`.
    pub fn contrast_with(&self, other: &Color) -> f64 {
        ratio(self.luminance(), other.luminance())
    }

    /// White or black, whichever reads better on this color. Ties go to white.
    pub fn readable_text(&self) -> Color {
        if self.contrast_with(&Color::WHITE) >= self.contrast_with(&Color::BLACK) {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

fn ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Parse a hex color, falling back to black on malformed input.
pub fn hex_to_color(s: &str) -> Color {
    match Color::parse(s) {
        Some(color) => color,
        None => {
            log::warn!("Malformed color '{}', substituting black", s);
            Color::BLACK
        }
    }
}

/// Relative luminance of a hex color. Malformed input yields 0.0.
pub fn relative_luminance(hex: &str) -> f64 {
    Color::parse(hex).map(|c| c.luminance()).unwrap_or(0.0)
}

/// Contrast ratio between two hex colors.
pub fn contrast_ratio(hex1: &str, hex2: &str) -> f64 {
    ratio(relative_luminance(hex1), relative_luminance(hex2))
}

/// Pick `#FFFFFF` or `#000000` for text on the given background.
pub fn pick_readable_text_color(background_hex: &str) -> &'static str {
    if contrast_ratio(background_hex, WHITE_TEXT) >= contrast_ratio(background_hex, BLACK_TEXT) {
        WHITE_TEXT
    } else {
        BLACK_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(hex_to_color("#FF0000"), Color::rgb(0xFF, 0, 0));
        assert_eq!(hex_to_color("00FF00"), Color::rgb(0, 0xFF, 0));
        assert_eq!(hex_to_color("#4d75fe"), Color::rgb(0x4D, 0x75, 0xFE));
    }

    #[test]
    fn test_malformed_falls_back_to_black() {
        assert_eq!(hex_to_color("not-a-color"), Color::BLACK);
        assert_eq!(hex_to_color(""), Color::BLACK);
        assert_eq!(hex_to_color("#FFF"), Color::BLACK);
        assert_eq!(hex_to_color("#GGGGGG"), Color::BLACK);
        assert_eq!(hex_to_color("#FF00001"), Color::BLACK);
    }

    #[test]
    fn test_hex_and_display() {
        let c = Color::rgb(0x02, 0x27, 0x91);
        assert_eq!(c.hex(), "022791");
        assert_eq!(c.to_string(), "#022791");
    }

    #[test]
    fn test_luminance_extremes() {
        assert!((relative_luminance("#FFFFFF") - 1.0).abs() < 0.01);
        assert!(relative_luminance("#000000").abs() < 0.01);
        assert_eq!(relative_luminance("bogus"), 0.0);
    }

    #[test]
    fn test_contrast_ratio() {
        assert!((contrast_ratio("#000000", "#FFFFFF") - 21.0).abs() < 0.1);
        assert!((contrast_ratio("#FFFFFF", "#000000") - 21.0).abs() < 0.1);
        assert!((contrast_ratio("#4D75FE", "#4D75FE") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_readable_text_color() {
        assert_eq!(pick_readable_text_color("#022791"), "#FFFFFF");
        assert_eq!(pick_readable_text_color("#FFFFFF"), "#000000");
        assert_eq!(Color::rgb(0x02, 0x27, 0x91).readable_text(), Color::WHITE);
        assert_eq!(Color::WHITE.readable_text(), Color::BLACK);

        let mid = pick_readable_text_color("#808080");
        assert!(mid == WHITE_TEXT || mid == BLACK_TEXT);
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), hash in any::<bool>()) {
            let s = format!("{}{:02x}{:02X}{:02x}", if hash { "#" } else { "" }, r, g, b);
            let color = hex_to_color(&s);
            prop_assert_eq!(color, Color::rgb(r, g, b));
        }

        #[test]
        fn prop_contrast_at_least_one(a in "[0-9A-F]{6}", b in "[0-9A-F]{6}") {
            let cr = contrast_ratio(&a, &b);
            prop_assert!(cr >= 1.0 - 1e-9);
            prop_assert!(cr <= 21.0 + 1e-9);
            prop_assert!((contrast_ratio(&a, &a) - 1.0).abs() < 1e-9);
        }
    }
}
