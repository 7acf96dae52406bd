//! In-memory presentation document.
//!
//! A [`Presentation`] owns its slides until it is serialized. Slides are built
//! detached and appended whole, so a slide that fails halfway never reaches
//! the document.

use crate::media::ImageData;
use crate::shape::{Frame, Shape, ShapeKind};
use crate::writer::PackageWriter;
use chrono::{DateTime, Utc};
use deck_core::{inches, Color, Emu, Result, Theme};
use std::path::Path;

/// Theme part content: the brand palette and fonts the package's own theme
/// advertises to PowerPoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageTheme {
    pub name: String,
    pub dark1: Color,
    pub light1: Color,
    pub dark2: Color,
    pub light2: Color,
    pub accents: [Color; 6],
    pub major_font: String,
    pub minor_font: String,
}

impl PackageTheme {
    pub fn from_theme(theme: &Theme) -> Self {
        let c = &theme.colors;
        Self {
            name: theme.brand_name.clone(),
            dark1: c.neutral_dark,
            light1: c.neutral_light,
            dark2: c.primary_dark,
            light2: Color::rgb(0xF7, 0xF8, 0xFC),
            accents: [
                c.primary_bright,
                c.primary_dark,
                c.accent_alt,
                c.accent,
                c.gray,
                Color::rgb(0x3A, 0xD5, 0x8E),
            ],
            major_font: theme.fonts.headline.clone(),
            minor_font: theme.fonts.body.clone(),
        }
    }
}

impl Default for PackageTheme {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Core document properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocProps {
    pub title: Option<String>,
    pub creator: Option<String>,
    /// Omitted from the package when `None`, keeping output reproducible.
    pub created: Option<DateTime<Utc>>,
}

/// One slide: an optional background and shapes in z-order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slide {
    pub(crate) shapes: Vec<Shape>,
    pub(crate) background: Option<Color>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    /// Add a shape and return it for styling. Fails on non-positive extents.
    pub fn add_shape(&mut self, kind: ShapeKind, frame: Frame) -> Result<&mut Shape> {
        frame.validate()?;
        // id 1 is the slide's group shape.
        let id = (self.shapes.len() + 2) as u32;
        self.shapes.push(Shape::new(id, kind, frame));
        let idx = self.shapes.len() - 1;
        Ok(&mut self.shapes[idx])
    }

    pub fn add_text_box(&mut self, frame: Frame) -> Result<&mut Shape> {
        self.add_shape(ShapeKind::TextBox, frame)
    }

    pub fn add_picture(&mut self, image: ImageData, frame: Frame) -> Result<&mut Shape> {
        let description = image
            .source()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let shape = self.add_shape(ShapeKind::Picture(image), frame)?;
        if !description.is_empty() {
            shape.name = description;
        }
        Ok(shape)
    }

    /// Concatenated text of every shape, in z-order.
    pub fn text(&self) -> Vec<String> {
        self.shapes
            .iter()
            .filter_map(|s| s.text.as_ref().map(|t| t.text()))
            .collect()
    }
}

/// A presentation being assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    slides: Vec<Slide>,
    slide_width: Emu,
    slide_height: Emu,
    theme: PackageTheme,
    props: DocProps,
}

impl Presentation {
    /// Create an empty presentation with the given canvas size in EMUs.
    pub fn new(slide_width: Emu, slide_height: Emu) -> Self {
        Self {
            slides: Vec::new(),
            slide_width,
            slide_height,
            theme: PackageTheme::default(),
            props: DocProps::default(),
        }
    }

    /// Create an empty presentation sized and themed after a brand theme.
    pub fn for_theme(theme: &Theme) -> Self {
        Self::new(inches(theme.slide.width), inches(theme.slide.height))
            .with_package_theme(PackageTheme::from_theme(theme))
    }

    pub fn with_package_theme(mut self, theme: PackageTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_props(mut self, props: DocProps) -> Self {
        self.props = props;
        self
    }

    pub fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide_width(&self) -> Emu {
        self.slide_width
    }

    pub fn slide_height(&self) -> Emu {
        self.slide_height
    }

    pub fn package_theme(&self) -> &PackageTheme {
        &self.theme
    }

    pub fn props(&self) -> &DocProps {
        &self.props
    }

    /// Serialize to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::new(self).to_bytes()
    }

    /// Serialize and write to a file in one step.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{set_fill, Paragraph, Run};

    #[test]
    fn test_create_presentation() {
        let pres = Presentation::new(inches(13.333), inches(7.5));
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), 12_191_695);
        assert_eq!(pres.slide_height(), 6_858_000);
    }

    #[test]
    fn test_for_theme_uses_canvas() {
        let theme = Theme::default();
        let pres = Presentation::for_theme(&theme);
        assert_eq!(pres.slide_width(), inches(13.333));
        assert_eq!(pres.package_theme().major_font, "Inter Tight");
    }

    #[test]
    fn test_shape_ids_are_sequential() {
        let mut slide = Slide::new();
        let a = slide.add_text_box(Frame::new(0, 0, 10, 10)).unwrap().id;
        let b = slide
            .add_shape(ShapeKind::Ellipse, Frame::new(0, 0, 10, 10))
            .unwrap()
            .id;
        assert_eq!((a, b), (2, 3));
        assert_eq!(slide.shape_count(), 2);
    }

    #[test]
    fn test_invalid_frame_adds_nothing() {
        let mut slide = Slide::new();
        assert!(slide.add_text_box(Frame::new(0, 0, 0, 10)).is_err());
        assert_eq!(slide.shape_count(), 0);
    }

    #[test]
    fn test_slide_text() {
        let mut slide = Slide::new();
        let shape = slide.add_text_box(Frame::new(0, 0, 10, 10)).unwrap();
        shape
            .text_body()
            .paragraphs
            .push(Paragraph::default().with_run(Run::new("Hello")));
        let rect = slide
            .add_shape(ShapeKind::Rectangle, Frame::new(0, 0, 10, 10))
            .unwrap();
        set_fill(rect, Color::BLACK);
        assert_eq!(slide.text(), vec!["Hello"]);
    }
}
