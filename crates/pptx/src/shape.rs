//! Shape model and styling primitives.
//!
//! Shapes carry typed style values (fills, borders, radii, gradients, shadows,
//! transparency). Nothing here knows about DrawingML; the package writer
//! turns these values into markup.

use crate::media::ImageData;
use deck_core::{Color, Emu, Error, Result};

/// Largest corner radius, as a fraction of half the shorter side. Kept below
/// 1.0 so a pill-shaped button never degenerates.
pub const MAX_CORNER_FRACTION: f64 = 0.99;

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Frame {
    pub fn new(x: Emu, y: Emu, cx: Emu, cy: Emu) -> Self {
        Self { x, y, cx, cy }
    }

    /// Fail for zero or negative extents.
    pub fn validate(&self) -> Result<()> {
        if self.cx <= 0 || self.cy <= 0 {
            return Err(Error::InvalidGeometry(format!(
                "shape extent must be positive, got {}x{} EMU",
                self.cx, self.cy
            )));
        }
        Ok(())
    }

    pub fn right(&self) -> Emu {
        self.x + self.cx
    }

    pub fn bottom(&self) -> Emu {
        self.y + self.cy
    }
}

/// What kind of drawing object a shape is.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    TextBox,
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Picture(ImageData),
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::TextBox => "TextBox",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::RoundedRectangle => "Rounded Rectangle",
            ShapeKind::Ellipse => "Oval",
            ShapeKind::Picture(_) => "Picture",
        }
    }
}

/// One gradient stop. `position` is 0–100 along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
    /// Opacity 0–100; `None` is fully opaque.
    pub alpha: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    None,
    Solid {
        color: Color,
        alpha: Option<f64>,
    },
    LinearGradient {
        stops: Vec<GradientStop>,
        /// Degrees, clockwise from left-to-right.
        angle: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Border {
    None,
    Solid { color: Color, width: Emu },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub blur: Emu,
    pub distance: Emu,
    /// Degrees; 90 casts straight down.
    pub direction: f64,
    pub color: Color,
    /// Opacity 0–100.
    pub opacity: f64,
}

/// Visual attributes of a shape outline and interior.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: Fill,
    pub border: Border,
    /// Fraction of half the shorter side; only meaningful on rounded rectangles.
    pub corner_radius: Option<f64>,
    pub shadow: Option<Shadow>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: Fill::None,
            border: Border::None,
            corner_radius: None,
            shadow: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// A styled run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub color: Option<Color>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            size: None,
            bold: false,
            color: None,
        }
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub align: Align,
    /// Space after the paragraph, in points.
    pub space_after: Option<f64>,
    pub space_before: Option<f64>,
}

impl Paragraph {
    pub fn new(align: Align) -> Self {
        Self {
            align,
            ..Default::default()
        }
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
    pub word_wrap: bool,
    pub anchor: Anchor,
}

impl Default for TextBody {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            word_wrap: true,
            anchor: Anchor::Top,
        }
    }
}

impl TextBody {
    /// All paragraph text joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A shape on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: u32,
    pub name: String,
    pub kind: ShapeKind,
    pub frame: Frame,
    pub style: ShapeStyle,
    pub text: Option<TextBody>,
}

impl Shape {
    pub(crate) fn new(id: u32, kind: ShapeKind, frame: Frame) -> Self {
        let name = format!("{} {}", kind.label(), id);
        Self {
            id,
            name,
            kind,
            frame,
            style: ShapeStyle::default(),
            text: None,
        }
    }

    /// The text body, created empty on first use.
    pub fn text_body(&mut self) -> &mut TextBody {
        self.text.get_or_insert_with(TextBody::default)
    }

    pub fn is_picture(&self) -> bool {
        matches!(self.kind, ShapeKind::Picture(_))
    }
}

/// Fill the shape with one opaque color.
pub fn set_fill(shape: &mut Shape, color: Color) {
    shape.style.fill = Fill::Solid { color, alpha: None };
}

/// Remove the shape's outline.
pub fn set_no_border(shape: &mut Shape) {
    shape.style.border = Border::None;
}

/// Draw a solid outline.
pub fn set_border(shape: &mut Shape, color: Color, width: Emu) -> Result<()> {
    if width <= 0 {
        return Err(Error::InvalidGeometry(format!(
            "border width must be positive, got {} EMU",
            width
        )));
    }
    shape.style.border = Border::Solid { color, width };
    Ok(())
}

/// Round the corners of a rounded rectangle to `radius` EMUs.
///
/// The radius is stored relative to half the shorter side and capped at
/// [`MAX_CORNER_FRACTION`].
pub fn set_corner_radius(shape: &mut Shape, radius: Emu) -> Result<()> {
    shape.frame.validate()?;
    let half_short = shape.frame.cx.min(shape.frame.cy) as f64 / 2.0;
    let fraction = (radius.max(0) as f64 / half_short).min(MAX_CORNER_FRACTION);
    shape.style.corner_radius = Some(fraction);
    Ok(())
}

/// Replace the fill with a two-stop linear gradient.
pub fn set_linear_gradient(shape: &mut Shape, from: Color, to: Color, angle: f64) {
    shape.style.fill = Fill::LinearGradient {
        stops: vec![
            GradientStop {
                position: 0.0,
                color: from,
                alpha: None,
            },
            GradientStop {
                position: 100.0,
                color: to,
                alpha: None,
            },
        ],
        angle: angle.rem_euclid(360.0),
    };
}

/// Attach an outer drop shadow.
pub fn set_shadow(shape: &mut Shape, shadow: Shadow) {
    shape.style.shadow = Some(Shadow {
        opacity: shadow.opacity.clamp(0.0, 100.0),
        direction: shadow.direction.rem_euclid(360.0),
        ..shadow
    });
}

/// Make the fill partially transparent. `opacity` is 0–100.
///
/// Applies to the solid color, or to every stop of a gradient. A shape with
/// no fill is left alone.
pub fn set_alpha(shape: &mut Shape, opacity: f64) {
    let opacity = opacity.clamp(0.0, 100.0);
    match &mut shape.style.fill {
        Fill::Solid { alpha, .. } => *alpha = Some(opacity),
        Fill::LinearGradient { stops, .. } => {
            for stop in stops.iter_mut() {
                stop.alpha = Some(opacity);
            }
        }
        Fill::None => log::debug!("set_alpha on '{}' without a fill", shape.name),
    }
}
