//! Brand-aware drawing primitives.
//!
//! A [`SlideBuilder`] owns one detached slide and draws onto it using the
//! theme's colors, fonts and spacing. Positions and sizes are in inches;
//! conversion to EMUs happens when a shape is placed.

use crate::options::DeckOptions;
use deck_core::text::{clean_text, paragraph_lines};
use deck_core::theme::LogoSet;
use deck_core::{inches, points, AssetPath, Color, Placement, Result, Theme};
use deck_pptx::shape::{
    set_alpha, set_border, set_corner_radius, set_fill, set_linear_gradient, set_no_border,
    set_shadow, Align, Anchor, Frame, Paragraph, Run, Shadow, Shape, ShapeKind,
};
use deck_pptx::{ImageData, Slide};
use std::path::Path;

/// Aspect ratio assumed for logos whose pixel size cannot be read.
pub const FALLBACK_LOGO_ASPECT: f64 = 1841.0 / 483.0;

/// Smallest width a logo may be shown at, in inches.
pub const MIN_LOGO_WIDTH: f64 = 1.04;

/// Placeholder and chart fill.
pub const PLACEHOLDER_FILL: Color = Color::rgb(0xE8, 0xED, 0xFB);

const FOOTER_HEIGHT: f64 = 0.5;
const FOOTER_ICON: f64 = 0.3;
const LINE_SPACING: f64 = 1.4;

/// Which logo asset to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoVariant {
    Colored,
    White,
    Black,
    Favicon,
}

impl LogoVariant {
    fn asset(self, logos: &LogoSet) -> &AssetPath {
        match self {
            LogoVariant::Colored => &logos.colored_horizontal,
            LogoVariant::White => &logos.white_horizontal,
            LogoVariant::Black => &logos.black_horizontal,
            LogoVariant::Favicon => &logos.favicon_colored,
        }
    }
}

/// Overrides for a text primitive. Anything left `None` takes the
/// primitive's default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOptions {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub size: Option<f64>,
    pub color: Option<Color>,
    pub bold: Option<bool>,
    pub align: Align,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full frame, in inches.
    pub fn at(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
            ..Default::default()
        }
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Resolved text styling for one text box.
struct TextStyle<'f> {
    size: f64,
    color: Color,
    bold: bool,
    font: &'f str,
    align: Align,
    space_after: Option<f64>,
}

impl TextStyle<'_> {
    fn run(&self, text: String) -> Run {
        Run::new(text)
            .size(self.size)
            .bold(self.bold)
            .color(self.color)
            .font(self.font)
    }
}

/// Card appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Card {
    pub fill: Color,
    pub border: Option<Color>,
    pub shadow: bool,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            border: None,
            shadow: true,
        }
    }
}

/// Button overrides; unset fields come from the theme's button style.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ButtonOptions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fill: Option<Color>,
    pub text: Option<Color>,
}

fn frame(x: f64, y: f64, w: f64, h: f64) -> Frame {
    Frame::new(inches(x), inches(y), inches(w), inches(h))
}

/// Draws brand primitives onto one slide.
pub struct SlideBuilder<'a> {
    theme: &'a Theme,
    options: &'a DeckOptions,
    slide: Slide,
}

impl<'a> SlideBuilder<'a> {
    pub fn new(theme: &'a Theme, options: &'a DeckOptions) -> Self {
        Self {
            theme,
            options,
            slide: Slide::new(),
        }
    }

    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    pub fn options(&self) -> &'a DeckOptions {
        self.options
    }

    /// Canvas width, in inches.
    pub fn width(&self) -> f64 {
        self.theme.slide.width
    }

    pub fn height(&self) -> f64 {
        self.theme.slide.height
    }

    pub fn margin(&self) -> f64 {
        self.theme.spacing.margin
    }

    pub fn gutter(&self) -> f64 {
        self.theme.spacing.gutter
    }

    /// The slide as drawn so far.
    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    pub fn finish(self) -> Slide {
        self.slide
    }

    pub fn set_background(&mut self, color: Color) {
        self.slide.set_background(color);
    }

    fn add_lines(
        &mut self,
        frame: Frame,
        lines: Vec<String>,
        style: &TextStyle<'_>,
    ) -> Result<&mut Shape> {
        let shape = self.slide.add_text_box(frame)?;
        let body = shape.text_body();
        body.word_wrap = true;
        for line in lines {
            let mut paragraph = Paragraph::new(style.align).with_run(style.run(line));
            paragraph.space_after = style.space_after;
            body.paragraphs.push(paragraph);
        }
        Ok(shape)
    }

    /// Headline text. Defaults: full width at the top margin, h1, dark, bold.
    pub fn add_title(&mut self, text: &str, opts: TextOptions) -> Result<&mut Shape> {
        let theme = self.theme;
        let (m, w) = (self.margin(), self.width());
        let frame = frame(
            opts.x.unwrap_or(m),
            opts.y.unwrap_or(m),
            opts.w.unwrap_or(w - 2.0 * m),
            opts.h.unwrap_or(1.0),
        );
        let style = TextStyle {
            size: opts.size.unwrap_or(theme.type_scale.h1),
            color: opts.color.unwrap_or(theme.colors.primary_dark),
            bold: opts.bold.unwrap_or(true),
            font: &theme.fonts.headline,
            align: opts.align,
            space_after: None,
        };
        self.add_lines(frame, paragraph_lines(text), &style)
    }

    /// Secondary heading. Defaults: y 1.6, h3, bright, regular weight.
    pub fn add_subtitle(&mut self, text: &str, opts: TextOptions) -> Result<&mut Shape> {
        let theme = self.theme;
        let (m, w) = (self.margin(), self.width());
        let frame = frame(
            opts.x.unwrap_or(m),
            opts.y.unwrap_or(1.6),
            opts.w.unwrap_or(w - 2.0 * m),
            opts.h.unwrap_or(0.8),
        );
        let style = TextStyle {
            size: opts.size.unwrap_or(theme.type_scale.h3),
            color: opts.color.unwrap_or(theme.colors.primary_bright),
            bold: opts.bold.unwrap_or(false),
            font: &theme.fonts.body,
            align: opts.align,
            space_after: None,
        };
        self.add_lines(frame, paragraph_lines(text), &style)
    }

    /// Body copy, one paragraph per line. Defaults: y 2.5, body size, gray.
    pub fn add_body(&mut self, text: &str, opts: TextOptions) -> Result<&mut Shape> {
        let theme = self.theme;
        let (m, w) = (self.margin(), self.width());
        let frame = frame(
            opts.x.unwrap_or(m),
            opts.y.unwrap_or(2.5),
            opts.w.unwrap_or(w - 2.0 * m),
            opts.h.unwrap_or(3.0),
        );
        let size = opts.size.unwrap_or(theme.type_scale.body);
        let style = TextStyle {
            size,
            color: opts.color.unwrap_or(theme.colors.gray),
            bold: opts.bold.unwrap_or(false),
            font: &theme.fonts.body,
            align: opts.align,
            space_after: Some(size * (LINE_SPACING - 1.0)),
        };
        self.add_lines(frame, paragraph_lines(text), &style)
    }

    /// One paragraph per item: a bullet glyph in `bullet_color` (bright by
    /// default) followed by the item text.
    pub fn add_bullet_list(
        &mut self,
        items: &[String],
        opts: TextOptions,
        bullet_color: Option<Color>,
    ) -> Result<&mut Shape> {
        let theme = self.theme;
        let (m, w) = (self.margin(), self.width());
        let frame = frame(
            opts.x.unwrap_or(m),
            opts.y.unwrap_or(2.5),
            opts.w.unwrap_or(w - 2.0 * m),
            opts.h.unwrap_or(3.5),
        );
        let size = opts.size.unwrap_or(theme.type_scale.body);
        let color = opts.color.unwrap_or(theme.colors.gray);
        let bullet_color = bullet_color.unwrap_or(theme.colors.primary_bright);
        let font = theme.fonts.body.as_str();

        let shape = self.slide.add_text_box(frame)?;
        let body = shape.text_body();
        body.word_wrap = true;
        for item in items {
            let mut paragraph = Paragraph::new(opts.align)
                .with_run(
                    Run::new("\u{25CF}  ")
                        .size(size - 2.0)
                        .color(bullet_color)
                        .font(font),
                )
                .with_run(Run::new(clean_text(item)).size(size).color(color).font(font));
            paragraph.space_after = Some(8.0);
            body.paragraphs.push(paragraph);
        }
        Ok(shape)
    }

    /// Place a logo in a placement zone, fitted into `max_w` × `max_h` inches.
    ///
    /// Returns `false` without drawing when the asset is unset, missing or
    /// unreadable. A placement the brand does not allow becomes upper-left.
    pub fn add_logo(
        &mut self,
        variant: LogoVariant,
        placement: Placement,
        max_w: f64,
        max_h: f64,
    ) -> Result<bool> {
        let theme = self.theme;
        let placement = if theme.allowed_placements.contains(&placement) {
            placement
        } else {
            log::debug!("Logo placement '{}' not allowed, using upper-left", placement);
            Placement::UpperLeft
        };

        let Some(path) = variant.asset(&theme.logos).locate() else {
            return Ok(false);
        };
        let image = match ImageData::load(path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Skipping logo {}: {}", path.display(), e);
                return Ok(false);
            }
        };

        let aspect = image.aspect_ratio().unwrap_or(FALLBACK_LOGO_ASPECT);
        let (w, h) = fit_logo(aspect, max_w, max_h);
        let (x, y) = self.placement_origin(placement, w, h);
        self.slide.add_picture(image, frame(x, y, w, h))?;
        Ok(true)
    }

    /// Top-left corner of a `w` × `h` box anchored in a placement zone.
    pub fn placement_origin(&self, placement: Placement, w: f64, h: f64) -> (f64, f64) {
        let m = self.margin();
        let (width, height) = (self.width(), self.height());
        let top = m * 0.6;
        let bottom = height - h - m * 0.6;
        match placement {
            Placement::UpperLeft => (m, top),
            Placement::UpperCenter => ((width - w) / 2.0, top),
            Placement::UpperRight => (width - w - m, top),
            Placement::LowerLeft => (m, bottom),
            Placement::LowerCenter => ((width - w) / 2.0, bottom),
            Placement::LowerRight => (width - w - m, bottom),
        }
    }

    /// Place an image file at an explicit frame. Missing or unreadable files
    /// are skipped.
    pub fn add_image(&mut self, path: &Path, x: f64, y: f64, w: f64, h: f64) -> Result<bool> {
        let image = match ImageData::load(path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Skipping image {}: {}", path.display(), e);
                return Ok(false);
            }
        };
        self.slide.add_picture(image, frame(x, y, w, h))?;
        Ok(true)
    }

    /// Solid rectangle without outline; bright by default.
    pub fn add_accent_bar(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Option<Color>,
    ) -> Result<&mut Shape> {
        let color = color.unwrap_or(self.theme.colors.primary_bright);
        let shape = self.slide.add_shape(ShapeKind::Rectangle, frame(x, y, w, h))?;
        set_fill(shape, color);
        set_no_border(shape);
        Ok(shape)
    }

    /// Rectangle with a two-stop linear gradient.
    #[allow(clippy::too_many_arguments)]
    pub fn add_gradient_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        from: Color,
        to: Color,
        angle: f64,
    ) -> Result<&mut Shape> {
        let shape = self.slide.add_shape(ShapeKind::Rectangle, frame(x, y, w, h))?;
        set_linear_gradient(shape, from, to, angle);
        set_no_border(shape);
        Ok(shape)
    }

    /// Decorative circle, optionally translucent (`alpha` 0–100).
    pub fn add_dot(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        color: Color,
        alpha: Option<f64>,
    ) -> Result<&mut Shape> {
        let shape = self.slide.add_shape(ShapeKind::Ellipse, frame(x, y, size, size))?;
        set_fill(shape, color);
        set_no_border(shape);
        if let Some(alpha) = alpha {
            set_alpha(shape, alpha);
        }
        Ok(shape)
    }

    /// Filled circle with one centered label run.
    pub fn add_badge(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        fill: Color,
        label: Run,
    ) -> Result<&mut Shape> {
        let shape = self.add_dot(x, y, size, fill, None)?;
        let body = shape.text_body();
        body.anchor = Anchor::Middle;
        body.paragraphs.push(Paragraph::new(Align::Center).with_run(label));
        Ok(shape)
    }

    /// Rounded card with the brand radius, and the brand drop shadow unless
    /// disabled.
    pub fn add_card(&mut self, x: f64, y: f64, w: f64, h: f64, card: Card) -> Result<&mut Shape> {
        let theme = self.theme;
        let shape = self
            .slide
            .add_shape(ShapeKind::RoundedRectangle, frame(x, y, w, h))?;
        set_fill(shape, card.fill);
        set_corner_radius(shape, points(theme.card.radius_pt))?;
        match card.border {
            Some(color) => set_border(shape, color, points(1.0))?,
            None => set_no_border(shape),
        }
        if card.shadow {
            set_shadow(
                shape,
                Shadow {
                    blur: 152_400,
                    distance: 38_100,
                    direction: 90.0,
                    color: Color::BLACK,
                    opacity: theme.card.shadow_alpha_pct,
                },
            );
        }
        Ok(shape)
    }

    /// Pill button with a single centered label.
    pub fn add_button(&mut self, text: &str, x: f64, y: f64, opts: ButtonOptions) -> Result<&mut Shape> {
        let theme = self.theme;
        let w = opts.width.unwrap_or(2.2);
        let h = opts.height.unwrap_or(0.55);
        let fill = opts.fill.unwrap_or(theme.button.fill);
        let text_color = opts.text.unwrap_or(theme.button.text);

        let shape = self
            .slide
            .add_shape(ShapeKind::RoundedRectangle, frame(x, y, w, h))?;
        set_fill(shape, fill);
        set_no_border(shape);
        set_corner_radius(shape, points(theme.button.radius_pt))?;

        let body = shape.text_body();
        body.word_wrap = false;
        body.anchor = Anchor::Middle;
        let mut paragraph = Paragraph::new(Align::Center).with_run(
            Run::new(clean_text(text))
                .size(13.0)
                .bold(true)
                .color(text_color)
                .font(theme.fonts.body.as_str()),
        );
        paragraph.space_before = Some(0.0);
        paragraph.space_after = Some(0.0);
        body.paragraphs.push(paragraph);
        Ok(shape)
    }

    /// Flat card marking where an image or chart goes.
    pub fn add_placeholder_image(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        label: &str,
    ) -> Result<&mut Shape> {
        let theme = self.theme;
        let shape = self.add_card(
            x,
            y,
            w,
            h,
            Card {
                fill: PLACEHOLDER_FILL,
                border: None,
                shadow: false,
            },
        )?;
        let body = shape.text_body();
        body.anchor = Anchor::Middle;
        body.paragraphs.push(
            Paragraph::new(Align::Center).with_run(
                Run::new(format!("[ {} ]", clean_text(label)))
                    .size(12.0)
                    .color(theme.colors.primary_bright)
                    .font(theme.fonts.utility.as_str()),
            ),
        );
        Ok(shape)
    }

    /// Caption line along the bottom edge, with an optional band and favicon.
    pub fn add_footer(&mut self, text: &str, show_logo: bool, bg: Option<Color>) -> Result<()> {
        let theme = self.theme;
        let (m, w) = (self.margin(), self.width());
        let y = self.height() - FOOTER_HEIGHT;

        if let Some(color) = bg {
            self.add_accent_bar(0.0, y, w, FOOTER_HEIGHT, Some(color))?;
        }

        if !text.is_empty() {
            let text_color = bg.unwrap_or(Color::WHITE).readable_text();
            let style = TextStyle {
                size: theme.type_scale.caption,
                color: text_color,
                bold: false,
                font: &theme.fonts.utility,
                align: Align::Left,
                space_after: None,
            };
            self.add_lines(frame(m, y + 0.08, 8.0, 0.35), vec![clean_text(text)], &style)?;
        }

        if show_logo {
            if let Some(path) = theme.logos.favicon_colored.locate() {
                let icon_y = y + (FOOTER_HEIGHT - FOOTER_ICON) / 2.0;
                self.add_image(path, w - m - FOOTER_ICON, icon_y, FOOTER_ICON, FOOTER_ICON)?;
            }
        }
        Ok(())
    }

    /// Full-bleed section opener: background, accent bar, title and subtitle.
    ///
    /// The title color is whichever of black and white reads better on the
    /// background. The subtitle uses the bright or dark brand color, or the
    /// title color when that pairing falls below 3:1 contrast.
    pub fn add_section_header(&mut self, title: &str, subtitle: &str, bg: Option<Color>) -> Result<()> {
        let theme = self.theme;
        let colors = &theme.colors;
        let bg = bg.unwrap_or(colors.primary_dark);
        self.set_background(bg);
        let text_color = bg.readable_text();

        let bar_color = if bg != colors.primary_bright {
            colors.primary_bright
        } else {
            colors.accent_alt
        };
        let m = self.margin();
        self.add_accent_bar(m, 2.8, 0.8, 0.06, Some(bar_color))?;

        let h1 = theme.type_scale.h1;
        self.add_title(title, TextOptions::new().y(3.0).size(h1).color(text_color))?;

        if !subtitle.is_empty() {
            let sub_color = subtitle_color(bg, colors.primary_bright, colors.primary_dark, text_color);
            let h3 = theme.type_scale.h3;
            self.add_body(subtitle, TextOptions::new().y(4.2).size(h3).color(sub_color))?;
        }
        Ok(())
    }

    /// Card with a top accent stripe, a large value and a caption.
    #[allow(clippy::too_many_arguments)]
    pub fn add_metric_card(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        value: &str,
        label: &str,
        accent: Color,
    ) -> Result<()> {
        let theme = self.theme;
        let (colors, fonts) = (&theme.colors, &theme.fonts);
        self.add_card(x, y, w, h, Card::default())?;
        self.add_accent_bar(x, y, w, 0.06, Some(accent))?;

        let value_style = TextStyle {
            size: 36.0,
            color: colors.primary_dark,
            bold: true,
            font: &fonts.headline,
            align: Align::Left,
            space_after: None,
        };
        self.add_lines(frame(x + 0.2, y + 0.3, w - 0.4, 0.8), vec![clean_text(value)], &value_style)?;

        let label_style = TextStyle {
            size: 12.0,
            color: colors.gray,
            bold: false,
            font: &fonts.body,
            align: Align::Left,
            space_after: None,
        };
        self.add_lines(frame(x + 0.2, y + 1.0, w - 0.4, 0.5), vec![clean_text(label)], &label_style)?;
        Ok(())
    }
}

/// Fit a logo of the given aspect into a box, then enforce the minimum width.
pub fn fit_logo(aspect: f64, max_w: f64, max_h: f64) -> (f64, f64) {
    let (mut w, mut h) = (max_w, max_w / aspect);
    if h > max_h {
        h = max_h;
        w = max_h * aspect;
    }
    if w < MIN_LOGO_WIDTH {
        w = MIN_LOGO_WIDTH;
        h = MIN_LOGO_WIDTH / aspect;
    }
    (w, h)
}

fn subtitle_color(bg: Color, bright: Color, dark: Color, fallback: Color) -> Color {
    let preferred = if bg.luminance() < 0.3 { bright } else { dark };
    if bg.contrast_with(&preferred) < 3.0 {
        fallback
    } else {
        preferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{resolve_theme, BrandTokens};
    use deck_pptx::shape::Fill;
    use serde_json::json;

    fn theme_with_logo(dir: &Path, width: u32, height: u32, placements: &[&str]) -> Theme {
        image::RgbaImage::new(width, height)
            .save(dir.join("logo.png"))
            .unwrap();
        let tokens: BrandTokens = serde_json::from_value(json!({
            "logo_assets": {
                "colored_horizontal_png": "logo.png",
                "favicon_colored_png": "logo.png",
                "white_horizontal_png": "missing.png"
            },
            "logo_rules": { "allowed_placements": placements }
        }))
        .unwrap();
        resolve_theme(&tokens, dir)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_fit_logo_respects_box() {
        let (w, h) = fit_logo(4.0, 2.4, 0.65);
        assert!(approx(w, 2.4) && approx(h, 0.6));

        let (w, h) = fit_logo(2.0, 2.4, 0.65);
        assert!(approx(h, 0.65) && approx(w, 1.3));
    }

    #[test]
    fn test_fit_logo_minimum_width_may_exceed_height() {
        let (w, h) = fit_logo(1.0, 1.8, 0.45);
        assert!(approx(w, MIN_LOGO_WIDTH));
        assert!(approx(h, MIN_LOGO_WIDTH));
        assert!(h > 0.45);
    }

    #[test]
    fn test_logo_placed_upper_left() {
        let dir = tempfile::tempdir().unwrap();
        let theme = theme_with_logo(dir.path(), 400, 100, &["upper-left", "lower-center"]);
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);

        assert!(sb
            .add_logo(LogoVariant::Colored, Placement::UpperLeft, 1.8, 0.45)
            .unwrap());
        let pic = &sb.slide().shapes()[0];
        assert!(pic.is_picture());
        assert_eq!(pic.frame.x, inches(0.6));
        assert_eq!(pic.frame.y, inches(0.36));
        assert_eq!(pic.frame.cx, inches(1.8));
        assert_eq!(pic.frame.cy, inches(0.45));
    }

    #[test]
    fn test_disallowed_placement_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let theme = theme_with_logo(dir.path(), 400, 100, &["upper-left"]);
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);

        sb.add_logo(LogoVariant::Colored, Placement::LowerRight, 1.8, 0.45)
            .unwrap();
        let pic = &sb.slide().shapes()[0];
        assert_eq!((pic.frame.x, pic.frame.y), (inches(0.6), inches(0.36)));
    }

    #[test]
    fn test_lower_center_placement() {
        let dir = tempfile::tempdir().unwrap();
        let theme = theme_with_logo(dir.path(), 400, 100, &["lower-center"]);
        let options = DeckOptions::default();
        let sb = SlideBuilder::new(&theme, &options);
        let (x, y) = sb.placement_origin(Placement::LowerCenter, 2.0, 0.5);
        assert!(approx(x, (13.333 - 2.0) / 2.0));
        assert!(approx(y, 7.5 - 0.5 - 0.36));
    }

    #[test]
    fn test_missing_logo_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let theme = theme_with_logo(dir.path(), 10, 10, &["upper-left"]);
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);

        assert!(!sb
            .add_logo(LogoVariant::White, Placement::UpperLeft, 1.8, 0.45)
            .unwrap());
        assert!(!sb
            .add_logo(LogoVariant::Black, Placement::UpperLeft, 1.8, 0.45)
            .unwrap());
        assert_eq!(sb.slide().shape_count(), 0);
    }

    #[test]
    fn test_body_one_paragraph_per_line() {
        let theme = Theme::default();
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);
        let shape = sb.add_body("one\r\ntwo\n\nfour", TextOptions::new()).unwrap();
        let body = shape.text.as_ref().unwrap();
        assert_eq!(body.paragraphs.len(), 4);
        let run = &body.paragraphs[0].runs[0];
        assert_eq!(run.size, Some(14.0));
        assert_eq!(run.color, Some(theme.colors.gray));
        assert!(approx(body.paragraphs[0].space_after.unwrap(), 14.0 * 0.4));
    }

    #[test]
    fn test_bullet_runs() {
        let theme = Theme::default();
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);
        let items = vec!["Alpha".to_string(), "Beta".to_string()];
        let shape = sb
            .add_bullet_list(&items, TextOptions::new().size(15.0), None)
            .unwrap();
        let body = shape.text.as_ref().unwrap();
        assert_eq!(body.paragraphs.len(), 2);
        let runs = &body.paragraphs[1].runs;
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].size, Some(13.0));
        assert_eq!(runs[0].color, Some(theme.colors.primary_bright));
        assert_eq!(runs[1].text, "Beta");
    }

    #[test]
    fn test_section_header_colors() {
        let theme = Theme::default();
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);
        sb.add_section_header("Part One", "Overview", None).unwrap();
        let slide = sb.finish();
        assert_eq!(slide.background(), Some(theme.colors.primary_dark));

        let shapes = slide.shapes();
        assert_eq!(shapes.len(), 3);
        let title_run = &shapes[1].text.as_ref().unwrap().paragraphs[0].runs[0];
        assert_eq!(title_run.color, Some(Color::WHITE));
        let subtitle_run = &shapes[2].text.as_ref().unwrap().paragraphs[0].runs[0];
        assert_eq!(subtitle_run.color, Some(theme.colors.primary_bright));
    }

    #[test]
    fn test_subtitle_color_contrast_fallback() {
        let bright = Color::rgb(0x4D, 0x75, 0xFE);
        let dark = Color::rgb(0x02, 0x27, 0x91);
        // Bright background: the dark color is preferred and readable.
        let light_bg = Color::rgb(0xFF, 0xFF, 0xFF);
        assert_eq!(subtitle_color(light_bg, bright, dark, Color::BLACK), dark);
        // Mid-luminance background where neither brand color reaches 3:1.
        let mid = Color::rgb(0x30, 0x50, 0xD0);
        assert_eq!(subtitle_color(mid, bright, dark, Color::WHITE), Color::WHITE);
    }

    #[test]
    fn test_card_and_button_styles() {
        let theme = Theme::default();
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);
        let card = sb.add_card(1.0, 1.0, 3.0, 2.0, Card::default()).unwrap();
        assert!(card.style.shadow.is_some());
        assert!(card.style.corner_radius.unwrap() < 1.0);

        let button = sb
            .add_button("Go", 1.0, 5.0, ButtonOptions::default())
            .unwrap();
        assert_eq!(button.style.fill, Fill::Solid { color: theme.button.fill, alpha: None });
        let body = button.text.as_ref().unwrap();
        assert!(!body.word_wrap);
        assert_eq!(body.anchor, Anchor::Middle);
        assert!(body.paragraphs[0].runs[0].bold);
    }

    #[test]
    fn test_footer_text_and_favicon() {
        let dir = tempfile::tempdir().unwrap();
        let theme = theme_with_logo(dir.path(), 64, 64, &["upper-left"]);
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);
        sb.add_footer("\u{a9} 2025 Acme", true, None).unwrap();
        let slide = sb.finish();
        assert_eq!(slide.shape_count(), 2);
        let caption = &slide.shapes()[0];
        assert_eq!(caption.frame.y, inches(7.0 + 0.08));
        let run = &caption.text.as_ref().unwrap().paragraphs[0].runs[0];
        assert_eq!(run.color, Some(Color::BLACK));
        assert_eq!(run.font.as_deref(), Some("Roboto"));
        assert!(slide.shapes()[1].is_picture());
    }

    #[test]
    fn test_empty_footer_text_skipped() {
        let theme = Theme::default();
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);
        sb.add_footer("", true, Some(theme.colors.primary_dark)).unwrap();
        assert_eq!(sb.slide().shape_count(), 1);
    }

    #[test]
    fn test_invalid_geometry_propagates() {
        let theme = Theme::default();
        let options = DeckOptions::default();
        let mut sb = SlideBuilder::new(&theme, &options);
        assert!(sb.add_accent_bar(0.0, 0.0, 0.0, 1.0, None).is_err());
    }
}
