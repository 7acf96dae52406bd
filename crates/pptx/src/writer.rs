//! PPTX package writer.
//!
//! Serializes a [`Presentation`] into an Office Open XML zip. Parts are written
//! in a fixed order with fixed timestamps, so identical documents produce
//! identical bytes.

use crate::document::{DocProps, Presentation, Slide};
use crate::media::ImageData;
use crate::shape::{Align, Anchor, Border, Fill, Paragraph, Run, Shadow, Shape, ShapeKind, TextBody};
use crate::template::{self, NS_A, NS_P, NS_R, XML_DECL};
use crate::xml::{attr, XmlBuf};
use deck_core::text::clean_text;
use deck_core::{Color, Error, Result};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const REL_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// First slide id PowerPoint accepts.
const FIRST_SLIDE_ID: usize = 256;
const MASTER_ID: u64 = 2_147_483_648;
/// Notes page size (portrait letter), in EMUs.
const NOTES_SIZE: (i64, i64) = (6_858_000, 9_144_000);

/// A relationship list for one `.rels` part.
#[derive(Debug, Default)]
struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    /// Append a relationship and return its id.
    fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.into()));
        id
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.entries.len() * 160);
        xml.push_str(XML_DECL);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.entries {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id,
                rel_type,
                attr(target)
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// One embedded media part, shared by every slide that shows it.
#[derive(Debug)]
struct MediaPart<'a> {
    file_name: String,
    image: &'a ImageData,
}

/// Media parts deduplicated by source path, in order of first use.
#[derive(Debug, Default)]
struct MediaCatalog<'a> {
    parts: Vec<MediaPart<'a>>,
    by_source: HashMap<PathBuf, usize>,
}

impl<'a> MediaCatalog<'a> {
    fn collect(slides: &'a [Slide]) -> Self {
        let mut catalog = Self::default();
        for slide in slides {
            for shape in &slide.shapes {
                if let ShapeKind::Picture(image) = &shape.kind {
                    catalog.intern(image);
                }
            }
        }
        catalog
    }

    fn intern(&mut self, image: &'a ImageData) -> usize {
        if let Some(&idx) = self.by_source.get(image.source()) {
            return idx;
        }
        let idx = self.parts.len();
        self.parts.push(MediaPart {
            file_name: format!("image{}.{}", idx + 1, image.extension()),
            image,
        });
        self.by_source.insert(image.source().to_path_buf(), idx);
        idx
    }

    fn file_name(&self, source: &Path) -> Option<&str> {
        self.by_source
            .get(source)
            .map(|&idx| self.parts[idx].file_name.as_str())
    }
}

/// Serializes one presentation to package bytes.
pub struct PackageWriter<'a> {
    pres: &'a Presentation,
    media: MediaCatalog<'a>,
}

impl<'a> PackageWriter<'a> {
    pub fn new(pres: &'a Presentation) -> Self {
        Self {
            pres,
            media: MediaCatalog::collect(pres.slides()),
        }
    }

    /// Build the complete `.pptx` archive in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let xml_options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        // Images are already compressed.
        let media_options = xml_options.compression_method(CompressionMethod::Stored);

        let slide_count = self.pres.slide_count();
        log::debug!(
            "Writing package with {} slides and {} media parts",
            slide_count,
            self.media.parts.len()
        );

        put(&mut zip, "[Content_Types].xml", self.content_types_xml().as_bytes(), xml_options)?;
        put(&mut zip, "_rels/.rels", root_rels_xml().as_bytes(), xml_options)?;
        put(&mut zip, "docProps/core.xml", core_props_xml(self.pres.props()).as_bytes(), xml_options)?;
        put(&mut zip, "docProps/app.xml", app_props_xml(slide_count).as_bytes(), xml_options)?;
        put(&mut zip, "ppt/presentation.xml", self.presentation_xml().as_bytes(), xml_options)?;
        put(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            presentation_rels(slide_count).to_xml().as_bytes(),
            xml_options,
        )?;
        put(&mut zip, "ppt/presProps.xml", template::pres_props_xml().as_bytes(), xml_options)?;
        put(&mut zip, "ppt/viewProps.xml", template::view_props_xml().as_bytes(), xml_options)?;
        put(&mut zip, "ppt/tableStyles.xml", template::table_styles_xml().as_bytes(), xml_options)?;
        put(
            &mut zip,
            "ppt/theme/theme1.xml",
            template::theme_xml(self.pres.package_theme())?.as_bytes(),
            xml_options,
        )?;
        put(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            template::slide_master_xml().as_bytes(),
            xml_options,
        )?;
        put(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            master_rels().to_xml().as_bytes(),
            xml_options,
        )?;
        put(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            template::blank_layout_xml().as_bytes(),
            xml_options,
        )?;
        put(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            layout_rels().to_xml().as_bytes(),
            xml_options,
        )?;

        for (idx, slide) in self.pres.slides().iter().enumerate() {
            let number = idx + 1;
            let (xml, rels) = self.slide_part(slide)?;
            put(&mut zip, &format!("ppt/slides/slide{}.xml", number), xml.as_bytes(), xml_options)?;
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                rels.to_xml().as_bytes(),
                xml_options,
            )?;
        }

        for part in &self.media.parts {
            put(
                &mut zip,
                &format!("ppt/media/{}", part.file_name),
                part.image.bytes(),
                media_options,
            )?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> String {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECL);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push_str(&format!(
            r#"<Default Extension="rels" ContentType="{}"/>"#,
            CT_RELATIONSHIPS
        ));
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

        let mut extensions: Vec<(&str, &str)> = Vec::new();
        for part in &self.media.parts {
            let ext = part.image.extension();
            if !extensions.iter().any(|(e, _)| *e == ext) {
                extensions.push((ext, part.image.content_type()));
            }
        }
        for (ext, content_type) in extensions {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                ext, content_type
            ));
        }

        let mut overrides = vec![
            ("/ppt/presentation.xml".to_string(), CT_PRESENTATION),
            ("/ppt/slideMasters/slideMaster1.xml".to_string(), CT_SLIDE_MASTER),
            ("/ppt/slideLayouts/slideLayout1.xml".to_string(), CT_SLIDE_LAYOUT),
            ("/ppt/theme/theme1.xml".to_string(), CT_THEME),
            ("/ppt/presProps.xml".to_string(), CT_PRES_PROPS),
            ("/ppt/viewProps.xml".to_string(), CT_VIEW_PROPS),
            ("/ppt/tableStyles.xml".to_string(), CT_TABLE_STYLES),
            ("/docProps/core.xml".to_string(), CT_CORE_PROPS),
            ("/docProps/app.xml".to_string(), CT_EXTENDED_PROPS),
        ];
        for number in 1..=self.pres.slide_count() {
            overrides.push((format!("/ppt/slides/slide{}.xml", number), CT_SLIDE));
        }
        for (part, content_type) in overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, content_type
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn presentation_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECL);
        xml.push_str(&format!(
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            NS_A, NS_R, NS_P
        ));
        xml.push_str(&format!(
            r#"<p:sldMasterIdLst><p:sldMasterId id="{}" r:id="rId1"/></p:sldMasterIdLst>"#,
            MASTER_ID
        ));
        // An empty sldIdLst is not schema-valid; omit it for a slideless deck.
        if self.pres.slide_count() > 0 {
            xml.push_str("<p:sldIdLst>");
            for idx in 0..self.pres.slide_count() {
                xml.push_str(&format!(
                    r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                    FIRST_SLIDE_ID + idx,
                    idx + 2
                ));
            }
            xml.push_str("</p:sldIdLst>");
        }
        xml.push_str(&format!(
            r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="{}" cy="{}"/>"#,
            self.pres.slide_width(),
            self.pres.slide_height(),
            NOTES_SIZE.0,
            NOTES_SIZE.1
        ));
        xml.push_str("</p:presentation>");
        xml
    }

    /// Slide markup and its relationships. Media rIds follow the layout's rId1.
    fn slide_part(&self, slide: &Slide) -> Result<(String, Relationships)> {
        let mut rels = Relationships::default();
        rels.add(REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        let mut embeds: HashMap<&Path, String> = HashMap::new();

        let mut xml = XmlBuf::with_capacity(4096 + slide.shapes.len() * 1024);
        xml.raw(XML_DECL);
        xml.fmt(format_args!(
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            NS_A, NS_R, NS_P
        ))?;
        xml.raw("<p:cSld>");
        if let Some(color) = slide.background {
            xml.fmt(format_args!(
                r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
                color.hex()
            ))?;
        }
        xml.raw("<p:spTree>");
        xml.raw(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
        xml.raw(concat!(
            r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
            r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
        ));

        for shape in &slide.shapes {
            match &shape.kind {
                ShapeKind::Picture(image) => {
                    let source = image.source();
                    let rid = match embeds.get(source) {
                        Some(rid) => rid.clone(),
                        None => {
                            let file_name = self.media.file_name(source).ok_or_else(|| {
                                Error::CorruptedFile(format!(
                                    "image '{}' missing from media catalog",
                                    source.display()
                                ))
                            })?;
                            let rid = rels.add(REL_IMAGE, format!("../media/{}", file_name));
                            embeds.insert(source, rid.clone());
                            rid
                        }
                    };
                    write_picture(&mut xml, shape, &rid)?;
                }
                _ => write_shape(&mut xml, shape)?,
            }
        }

        xml.raw("</p:spTree></p:cSld>");
        xml.raw("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.raw("</p:sld>");
        Ok((xml.finish(), rels))
    }
}

fn put(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    bytes: &[u8],
    options: FileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", name, e)))?;
    zip.write_all(bytes)?;
    Ok(())
}

fn root_rels_xml() -> String {
    let mut rels = Relationships::default();
    rels.add(REL_OFFICE_DOCUMENT, "ppt/presentation.xml");
    rels.add(REL_CORE_PROPS, "docProps/core.xml");
    rels.add(REL_EXTENDED_PROPS, "docProps/app.xml");
    rels.to_xml()
}

/// Master first, then slides as rId2.., then the shared parts.
fn presentation_rels(slide_count: usize) -> Relationships {
    let mut rels = Relationships::default();
    rels.add(REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    for number in 1..=slide_count {
        rels.add(REL_SLIDE, format!("slides/slide{}.xml", number));
    }
    rels.add(REL_PRES_PROPS, "presProps.xml");
    rels.add(REL_VIEW_PROPS, "viewProps.xml");
    rels.add(REL_THEME, "theme/theme1.xml");
    rels.add(REL_TABLE_STYLES, "tableStyles.xml");
    rels
}

fn master_rels() -> Relationships {
    let mut rels = Relationships::default();
    rels.add(REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    rels.add(REL_THEME, "../theme/theme1.xml");
    rels
}

fn layout_rels() -> Relationships {
    let mut rels = Relationships::default();
    rels.add(REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    rels
}

fn core_props_xml(props: &DocProps) -> String {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECL);
    xml.push_str(concat!(
        r#"<cp:coreProperties "#,
        r#"xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = &props.title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", attr(&clean_text(title))));
    }
    if let Some(creator) = &props.creator {
        xml.push_str(&format!("<dc:creator>{}</dc:creator>", attr(&clean_text(creator))));
    }
    if let Some(created) = props.created {
        let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            stamp
        ));
        xml.push_str(&format!(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            stamp
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_props_xml(slide_count: usize) -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>{}</Application><PresentationFormat>Custom</PresentationFormat>",
            "<Slides>{}</Slides><AppVersion>{}</AppVersion></Properties>"
        ),
        XML_DECL,
        env!("CARGO_PKG_NAME"),
        slide_count,
        "16.0000"
    )
}

/// DrawingML angle units are 1/60000 of a degree.
fn angle(degrees: f64) -> i64 {
    (degrees * 60_000.0).round() as i64
}

/// DrawingML percentages are thousandths of a percent.
fn percent(value: f64) -> i64 {
    (value * 1_000.0).round() as i64
}

/// Hundredths of a point.
fn centipoints(points: f64) -> i64 {
    (points * 100.0).round() as i64
}

fn write_color(xml: &mut XmlBuf, color: Color, alpha: Option<f64>) -> Result<()> {
    match alpha {
        Some(alpha) => xml.fmt(format_args!(
            r#"<a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr>"#,
            color.hex(),
            percent(alpha)
        )),
        None => xml.fmt(format_args!(r#"<a:srgbClr val="{}"/>"#, color.hex())),
    }
}

fn write_fill(xml: &mut XmlBuf, fill: &Fill) -> Result<()> {
    match fill {
        Fill::None => xml.raw("<a:noFill/>"),
        Fill::Solid { color, alpha } => {
            xml.raw("<a:solidFill>");
            write_color(xml, *color, *alpha)?;
            xml.raw("</a:solidFill>");
        }
        Fill::LinearGradient { stops, angle: deg } => {
            xml.raw(r#"<a:gradFill rotWithShape="1"><a:gsLst>"#);
            for stop in stops {
                xml.fmt(format_args!(r#"<a:gs pos="{}">"#, percent(stop.position)))?;
                write_color(xml, stop.color, stop.alpha)?;
                xml.raw("</a:gs>");
            }
            xml.fmt(format_args!(
                r#"</a:gsLst><a:lin ang="{}" scaled="1"/></a:gradFill>"#,
                angle(*deg)
            ))?;
        }
    }
    Ok(())
}

fn write_border(xml: &mut XmlBuf, border: &Border) -> Result<()> {
    match border {
        Border::None => xml.raw("<a:ln><a:noFill/></a:ln>"),
        Border::Solid { color, width } => {
            xml.fmt(format_args!(r#"<a:ln w="{}"><a:solidFill>"#, width))?;
            write_color(xml, *color, None)?;
            xml.raw("</a:solidFill></a:ln>");
        }
    }
    Ok(())
}

fn write_shadow(xml: &mut XmlBuf, shadow: &Shadow) -> Result<()> {
    xml.fmt(format_args!(
        r#"<a:effectLst><a:outerShdw blurRad="{}" dist="{}" dir="{}" algn="t" rotWithShape="0">"#,
        shadow.blur,
        shadow.distance,
        angle(shadow.direction)
    ))?;
    write_color(xml, shadow.color, Some(shadow.opacity))?;
    xml.raw("</a:outerShdw></a:effectLst>");
    Ok(())
}

fn write_xfrm(xml: &mut XmlBuf, shape: &Shape) -> Result<()> {
    let f = &shape.frame;
    xml.fmt(format_args!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        f.x, f.y, f.cx, f.cy
    ))
}

fn preset_geometry(shape: &Shape) -> (&'static str, Option<i64>) {
    match shape.kind {
        ShapeKind::RoundedRectangle => (
            "roundRect",
            shape
                .style
                .corner_radius
                .map(|fraction| (fraction * 50_000.0).round() as i64),
        ),
        ShapeKind::Ellipse => ("ellipse", None),
        _ => ("rect", None),
    }
}

fn write_shape(xml: &mut XmlBuf, shape: &Shape) -> Result<()> {
    xml.raw("<p:sp><p:nvSpPr>");
    xml.fmt(format_args!(
        r#"<p:cNvPr id="{}" name="{}"/>"#,
        shape.id,
        attr(&shape.name)
    ))?;
    if matches!(shape.kind, ShapeKind::TextBox) {
        xml.raw(r#"<p:cNvSpPr txBox="1"/>"#);
    } else {
        xml.raw("<p:cNvSpPr/>");
    }
    xml.raw("<p:nvPr/></p:nvSpPr>");

    xml.raw("<p:spPr>");
    write_xfrm(xml, shape)?;
    let (preset, adjust) = preset_geometry(shape);
    xml.fmt(format_args!(r#"<a:prstGeom prst="{}">"#, preset))?;
    match adjust {
        Some(adj) => xml.fmt(format_args!(
            r#"<a:avLst><a:gd name="adj" fmla="val {}"/></a:avLst>"#,
            adj
        ))?,
        None => xml.raw("<a:avLst/>"),
    }
    xml.raw("</a:prstGeom>");
    write_fill(xml, &shape.style.fill)?;
    write_border(xml, &shape.style.border)?;
    if let Some(shadow) = &shape.style.shadow {
        write_shadow(xml, shadow)?;
    }
    xml.raw("</p:spPr>");

    if let Some(body) = &shape.text {
        write_text_body(xml, body)?;
    } else if matches!(shape.kind, ShapeKind::TextBox) {
        write_text_body(xml, &TextBody::default())?;
    }
    xml.raw("</p:sp>");
    Ok(())
}

fn write_picture(xml: &mut XmlBuf, shape: &Shape, rid: &str) -> Result<()> {
    xml.raw("<p:pic><p:nvPicPr>");
    xml.fmt(format_args!(
        r#"<p:cNvPr id="{}" name="{}" descr="{}"/>"#,
        shape.id,
        attr(&shape.name),
        attr(&shape.name)
    ))?;
    xml.raw(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);
    xml.fmt(format_args!(
        r#"<p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
        rid
    ))?;
    xml.raw("<p:spPr>");
    write_xfrm(xml, shape)?;
    xml.raw(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.raw("</p:spPr></p:pic>");
    Ok(())
}

fn write_text_body(xml: &mut XmlBuf, body: &TextBody) -> Result<()> {
    let wrap = if body.word_wrap { "square" } else { "none" };
    let anchor = match body.anchor {
        Anchor::Top => "t",
        Anchor::Middle => "ctr",
        Anchor::Bottom => "b",
    };
    xml.fmt(format_args!(
        r#"<p:txBody><a:bodyPr wrap="{}" rtlCol="0" anchor="{}"><a:noAutofit/></a:bodyPr><a:lstStyle/>"#,
        wrap, anchor
    ))?;
    if body.paragraphs.is_empty() {
        xml.raw("<a:p/>");
    }
    for paragraph in &body.paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    xml.raw("</p:txBody>");
    Ok(())
}

fn write_paragraph(xml: &mut XmlBuf, paragraph: &Paragraph) -> Result<()> {
    xml.raw("<a:p>");
    let algn = match paragraph.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    };
    if paragraph.space_before.is_none() && paragraph.space_after.is_none() {
        xml.fmt(format_args!(r#"<a:pPr algn="{}"/>"#, algn))?;
    } else {
        xml.fmt(format_args!(r#"<a:pPr algn="{}">"#, algn))?;
        if let Some(before) = paragraph.space_before {
            xml.fmt(format_args!(
                r#"<a:spcBef><a:spcPts val="{}"/></a:spcBef>"#,
                centipoints(before)
            ))?;
        }
        if let Some(after) = paragraph.space_after {
            xml.fmt(format_args!(
                r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
                centipoints(after)
            ))?;
        }
        xml.raw("</a:pPr>");
    }
    for run in &paragraph.runs {
        write_run(xml, run)?;
    }
    xml.raw("</a:p>");
    Ok(())
}

fn write_run(xml: &mut XmlBuf, run: &Run) -> Result<()> {
    xml.raw(r#"<a:r><a:rPr lang="en-US""#);
    if let Some(size) = run.size {
        xml.fmt(format_args!(r#" sz="{}""#, centipoints(size)))?;
    }
    if run.bold {
        xml.raw(r#" b="1""#);
    }
    xml.raw(r#" dirty="0">"#);
    if let Some(color) = run.color {
        xml.raw("<a:solidFill>");
        write_color(xml, color, None)?;
        xml.raw("</a:solidFill>");
    }
    if let Some(font) = &run.font {
        xml.fmt(format_args!(r#"<a:latin typeface="{}"/>"#, attr(font)))?;
    }
    xml.raw("</a:rPr><a:t>");
    xml.text(&run.text);
    xml.raw("</a:t></a:r>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{set_alpha, set_corner_radius, set_fill, set_linear_gradient, Frame};
    use chrono::TimeZone;
    use deck_core::inches;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn part_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn sample() -> Presentation {
        let mut pres = Presentation::new(inches(13.333), inches(7.5));
        let mut slide = Slide::new();
        slide.set_background(Color::WHITE);
        let card = slide
            .add_shape(ShapeKind::RoundedRectangle, Frame::new(0, 0, inches(4.0), inches(2.0)))
            .unwrap();
        set_fill(card, Color::rgb(0x4D, 0x75, 0xFE));
        set_alpha(card, 30.0);
        set_corner_radius(card, inches(0.5)).unwrap();
        let title = slide.add_text_box(Frame::new(0, 0, inches(4.0), inches(1.0))).unwrap();
        title.text_body().paragraphs.push(
            Paragraph::new(Align::Center).with_run(Run::new("R&D <Review>").size(48.0).bold(true)),
        );
        pres.push_slide(slide);

        let mut second = Slide::new();
        let band = second
            .add_shape(ShapeKind::Rectangle, Frame::new(0, 0, inches(2.0), inches(2.0)))
            .unwrap();
        set_linear_gradient(band, Color::BLACK, Color::WHITE, 135.0);
        pres.push_slide(second);
        pres
    }

    #[test]
    fn test_required_parts_present() {
        let bytes = sample().to_bytes().unwrap();
        let names = part_names(&bytes);
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/theme/theme1.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(names.iter().any(|n| n == part), "missing {}", part);
        }
        assert_eq!(names[0], "[Content_Types].xml");
    }

    #[test]
    fn test_output_is_deterministic() {
        let pres = sample();
        assert_eq!(pres.to_bytes().unwrap(), pres.to_bytes().unwrap());
    }

    #[test]
    fn test_slide_markup() {
        let bytes = sample().to_bytes().unwrap();
        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="FFFFFF"/>"#));
        assert!(slide.contains(r#"<a:srgbClr val="4D75FE"><a:alpha val="30000"/></a:srgbClr>"#));
        assert!(slide.contains(r#"<a:gd name="adj" fmla="val 25000"/>"#));
        assert!(slide.contains("<a:t>R&amp;D &lt;Review&gt;</a:t>"));
        assert!(slide.contains(r#"sz="4800" b="1""#));
        assert!(slide.contains(r#"<a:pPr algn="ctr"/>"#));

        let second = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(second.contains(r#"<a:lin ang="8100000" scaled="1"/>"#));
        assert!(second.contains(r#"<a:gs pos="100000">"#));
        assert!(!second.contains("<p:bg>"));
    }

    #[test]
    fn test_presentation_lists_slides_in_order() {
        let bytes = sample().to_bytes().unwrap();
        let pres = read_part(&bytes, "ppt/presentation.xml");
        assert!(pres.contains(r#"<p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/>"#));
        assert!(pres.contains(r#"<p:sldSz cx="12191695" cy="6858000"/>"#));

        let rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml""#));
        assert!(rels.contains(r#"Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster""#));
    }

    #[test]
    fn test_empty_presentation_omits_slide_list() {
        let bytes = Presentation::new(inches(10.0), inches(7.5)).to_bytes().unwrap();
        let pres = read_part(&bytes, "ppt/presentation.xml");
        assert!(!pres.contains("sldIdLst"));
        assert!(read_part(&bytes, "docProps/app.xml").contains("<Slides>0</Slides>"));
    }

    #[test]
    fn test_core_props() {
        let created = chrono::Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let pres = sample().with_props(DocProps {
            title: Some("Q3 & Beyond".to_string()),
            creator: Some("Acme".to_string()),
            created: Some(created),
        });
        let core = read_part(&pres.to_bytes().unwrap(), "docProps/core.xml");
        assert!(core.contains("<dc:title>Q3 &amp; Beyond</dc:title>"));
        assert!(core.contains("<dc:creator>Acme</dc:creator>"));
        assert!(core.contains("2025-03-04T05:06:07Z"));

        let plain = read_part(&sample().to_bytes().unwrap(), "docProps/core.xml");
        assert!(!plain.contains("dcterms:created"));
    }

    #[test]
    fn test_core_props_drop_control_characters() {
        let pres = sample().with_props(DocProps {
            title: Some("Q3\u{7} Review".to_string()),
            creator: Some("Ac\u{1B}me".to_string()),
            created: None,
        });
        let core = read_part(&pres.to_bytes().unwrap(), "docProps/core.xml");
        assert!(core.contains("<dc:title>Q3 Review</dc:title>"));
        assert!(core.contains("<dc:creator>Acme</dc:creator>"));
        assert!(!core.contains('\u{7}'));
    }

    #[test]
    fn test_media_deduplicated_across_slides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        image::RgbImage::new(8, 2).save(&path).unwrap();
        let logo = ImageData::load(&path).unwrap();

        let mut pres = Presentation::new(inches(13.333), inches(7.5));
        for _ in 0..3 {
            let mut slide = Slide::new();
            slide.add_picture(logo.clone(), Frame::new(0, 0, 100, 25)).unwrap();
            slide.add_picture(logo.clone(), Frame::new(200, 0, 100, 25)).unwrap();
            pres.push_slide(slide);
        }
        let bytes = pres.to_bytes().unwrap();
        let names = part_names(&bytes);
        let media: Vec<_> = names.iter().filter(|n| n.starts_with("ppt/media/")).collect();
        assert_eq!(media, vec!["ppt/media/image1.png"]);

        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));

        let rels = read_part(&bytes, "ppt/slides/_rels/slide3.xml.rels");
        assert!(rels.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png""#));
        assert!(!rels.contains("rId3"));

        let slide = read_part(&bytes, "ppt/slides/slide3.xml");
        assert_eq!(slide.matches(r#"r:embed="rId2""#).count(), 2);
        assert!(slide.contains(r#"name="logo.png""#));
    }
}
