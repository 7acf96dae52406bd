//! PPTX package reader.
//!
//! Reads a `.pptx` back into a flat summary of its slides and shapes. Used by
//! the brand audit and by tests that inspect generated decks.

use deck_core::{Emu, Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// A shape as found in slide markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShapeSummary {
    pub name: String,
    pub is_picture: bool,
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
    /// Paragraph text joined with newlines.
    pub text: String,
    /// Uppercase hex of every color outside run properties (fills, lines, shadows).
    pub fill_colors: Vec<String>,
    /// Uppercase hex of every run color.
    pub text_colors: Vec<String>,
    /// Run typefaces.
    pub fonts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideSummary {
    /// 1-based position in the deck.
    pub number: usize,
    pub background: Option<String>,
    pub shapes: Vec<ShapeSummary>,
}

impl SlideSummary {
    /// Text of every shape that has some, in z-order.
    pub fn texts(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .map(|s| s.text.as_str())
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn pictures(&self) -> impl Iterator<Item = &ShapeSummary> {
        self.shapes.iter().filter(|s| s.is_picture)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeckSummary {
    pub slide_width: Emu,
    pub slide_height: Emu,
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Reader for PPTX (Office Open XML) packages.
pub struct PptxReader;

impl PptxReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_path(&self, path: &Path) -> Result<DeckSummary> {
        let file = std::fs::File::open(path)?;
        self.read(std::io::BufReader::new(file))
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<DeckSummary> {
        self.read(std::io::Cursor::new(bytes))
    }

    /// Read a package from any seekable source.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let presentation = self.read_file_from_archive(&mut archive, "ppt/presentation.xml")?;
        let (slide_width, slide_height) = slide_size(&presentation)?;

        let slide_order = self.get_slide_order(&mut archive)?;
        let mut slides = Vec::with_capacity(slide_order.len());
        for (idx, slide_path) in slide_order.iter().enumerate() {
            let content = self.read_file_from_archive(&mut archive, slide_path)?;
            let mut slide = parse_slide(&content);
            slide.number = idx + 1;
            slides.push(slide);
        }

        Ok(DeckSummary {
            slide_width,
            slide_height,
            slides,
        })
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let rel_type = attr_value(e, b"Type").unwrap_or_default();
                    let target = attr_value(e, b"Target").unwrap_or_default();
                    let id = attr_value(e, b"Id").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order_num =
                            extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

fn slide_size(xml: &str) -> Result<(Emu, Emu)> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                let cx = attr_emu(e, b"cx");
                let cy = attr_emu(e, b"cy");
                return match (cx, cy) {
                    (Some(cx), Some(cy)) => Ok((cx, cy)),
                    _ => Err(Error::CorruptedFile("sldSz without cx/cy".to_string())),
                };
            }
            Ok(Event::Eof) => {
                return Err(Error::CorruptedFile(
                    "presentation.xml has no slide size".to_string(),
                ))
            }
            Err(e) => return Err(Error::XmlError(format!("Error parsing presentation: {}", e))),
            _ => {}
        }
    }
}

/// Collect shapes, their geometry, text and colors from slide markup.
fn parse_slide(xml: &str) -> SlideSummary {
    let mut parser = SlideParser::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => parser.open(e, false),
            Ok(Event::Empty(ref e)) => parser.open(e, true),
            Ok(Event::Text(ref e)) => {
                if parser.in_text {
                    let text = e.unescape().unwrap_or_default();
                    if let Some(last) = parser.paragraphs.last_mut() {
                        last.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => parser.close(local_name(e.name().as_ref())),
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error (continuing): {}", e);
            }
            _ => {}
        }
    }

    parser.slide
}

#[derive(Default)]
struct SlideParser {
    slide: SlideSummary,
    current: Option<ShapeSummary>,
    has_xfrm: bool,
    in_background: bool,
    in_run_props: bool,
    in_text: bool,
    paragraphs: Vec<String>,
}

impl SlideParser {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) {
        let name = e.name();
        let tag = local_name(name.as_ref());
        match tag {
            b"sp" | b"pic" if !empty => {
                self.current = Some(ShapeSummary {
                    is_picture: tag == b"pic",
                    ..Default::default()
                });
                self.has_xfrm = false;
                self.paragraphs.clear();
            }
            b"bg" if !empty => self.in_background = true,
            b"rPr" | b"endParaRPr" if !empty => self.in_run_props = true,
            b"t" if !empty => self.in_text = true,
            b"p" if self.current.is_some() => self.paragraphs.push(String::new()),
            b"srgbClr" => {
                if let Some(val) = attr_value(e, b"val") {
                    let val = val.to_ascii_uppercase();
                    match self.current.as_mut() {
                        Some(shape) if self.in_run_props => shape.text_colors.push(val),
                        Some(shape) => shape.fill_colors.push(val),
                        None if self.in_background => self.slide.background = Some(val),
                        None => {}
                    }
                }
            }
            b"latin" if self.in_run_props => {
                if let (Some(shape), Some(face)) = (self.current.as_mut(), attr_value(e, b"typeface")) {
                    shape.fonts.push(face);
                }
            }
            b"cNvPr" => {
                if let (Some(shape), Some(shape_name)) = (self.current.as_mut(), attr_value(e, b"name")) {
                    shape.name = shape_name;
                }
            }
            b"off" if !self.has_xfrm => {
                if let Some(shape) = self.current.as_mut() {
                    shape.x = attr_emu(e, b"x").unwrap_or_default();
                    shape.y = attr_emu(e, b"y").unwrap_or_default();
                }
            }
            b"ext" if !self.has_xfrm => {
                if let Some(shape) = self.current.as_mut() {
                    shape.cx = attr_emu(e, b"cx").unwrap_or_default();
                    shape.cy = attr_emu(e, b"cy").unwrap_or_default();
                    self.has_xfrm = true;
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: &[u8]) {
        match tag {
            b"sp" | b"pic" => {
                if let Some(mut shape) = self.current.take() {
                    shape.text = self.paragraphs.join("\n").trim().to_string();
                    self.slide.shapes.push(shape);
                }
                self.paragraphs.clear();
                self.in_run_props = false;
                self.in_text = false;
            }
            b"bg" => self.in_background = false,
            b"rPr" | b"endParaRPr" => self.in_run_props = false,
            b"t" => self.in_text = false,
            _ => {}
        }
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn attr_emu(e: &BytesStart<'_>, key: &[u8]) -> Option<Emu> {
    attr_value(e, key).and_then(|v| v.parse().ok())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Presentation, Slide};
    use crate::shape::{set_fill, Frame, Paragraph, Run, ShapeKind};
    use deck_core::{inches, Color};

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_parse_slide_markup() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld>
            <p:bg><p:bgPr><a:solidFill><a:srgbClr val="f7f8fc"/></a:solidFill></p:bgPr></p:bg>
            <p:spTree>
              <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/></p:nvSpPr>
                <p:spPr><a:xfrm><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></a:xfrm>
                  <a:solidFill><a:srgbClr val="022791"/></a:solidFill></p:spPr>
                <p:txBody><a:p><a:r><a:rPr sz="1800"><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill>
                  <a:latin typeface="Inter Tight"/></a:rPr><a:t>Hello &amp; </a:t></a:r>
                  <a:r><a:t>world</a:t></a:r></a:p><a:p/><a:p><a:r><a:t>Second</a:t></a:r></a:p></p:txBody>
              </p:sp>
            </p:spTree></p:cSld></p:sld>"#;
        let slide = parse_slide(xml);
        assert_eq!(slide.background.as_deref(), Some("F7F8FC"));
        assert_eq!(slide.shapes.len(), 1);
        let shape = &slide.shapes[0];
        assert_eq!(shape.name, "Title");
        assert_eq!((shape.x, shape.y, shape.cx, shape.cy), (10, 20, 30, 40));
        assert_eq!(shape.text, "Hello & world\n\nSecond");
        assert_eq!(shape.fill_colors, vec!["022791"]);
        assert_eq!(shape.text_colors, vec!["FFFFFF"]);
        assert_eq!(shape.fonts, vec!["Inter Tight"]);
    }

    #[test]
    fn test_reads_written_package() {
        let mut pres = Presentation::new(inches(13.333), inches(7.5));
        for label in ["one", "two", "three"] {
            let mut slide = Slide::new();
            slide.set_background(Color::WHITE);
            let shape = slide
                .add_shape(ShapeKind::Rectangle, Frame::new(inches(1.0), 0, inches(2.0), inches(1.0)))
                .unwrap();
            set_fill(shape, Color::BLACK);
            shape
                .text_body()
                .paragraphs
                .push(Paragraph::default().with_run(Run::new(label).font("Roboto")));
            pres.push_slide(slide);
        }

        let summary = PptxReader::new().read_bytes(&pres.to_bytes().unwrap()).unwrap();
        assert_eq!(summary.slide_count(), 3);
        assert_eq!(summary.slide_width, inches(13.333));
        assert_eq!(summary.slide_height, inches(7.5));
        let texts: Vec<_> = summary.slides.iter().map(|s| s.texts().join("|")).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);

        let shape = &summary.slides[1].shapes[0];
        assert_eq!(shape.x, inches(1.0));
        assert_eq!(shape.cx, inches(2.0));
        assert_eq!(shape.fill_colors[0], "000000");
        assert_eq!(shape.fonts, vec!["Roboto"]);
        assert_eq!(summary.slides[2].number, 3);
        assert_eq!(summary.slides[0].background.as_deref(), Some("FFFFFF"));
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(PptxReader::new().read_bytes(b"not a zip").is_err());
    }
}
