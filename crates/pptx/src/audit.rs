//! Brand compliance audit for generated packages.
//!
//! Checks canvas size, colors and fonts against a resolved theme, and lists
//! image placements. Right-aligned images are reported as warnings only.

use crate::reader::{DeckSummary, PptxReader};
use deck_core::units::to_inches;
use deck_core::{Result, Theme};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Colors allowed on every deck regardless of palette.
pub const NEUTRAL_COLORS: [&str; 4] = ["F7F8FC", "E8EDFB", "000000", "FFFFFF"];

/// Allowed canvas deviation, in inches.
pub const CANVAS_TOLERANCE: f64 = 0.05;

/// Images whose left edge is past this fraction of the width look right-aligned.
pub const RIGHT_ALIGNED_FRACTION: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    CanvasSize {
        width: f64,
        height: f64,
        expected_width: f64,
        expected_height: f64,
    },
    OffPaletteColor {
        slide: usize,
        shape: String,
        color: String,
        on_text: bool,
    },
    OffBrandFont {
        slide: usize,
        shape: String,
        font: String,
    },
    RightAlignedImage {
        slide: usize,
        shape: String,
        left: f64,
    },
}

impl Finding {
    /// Warnings are reported but do not fail the audit.
    pub fn is_warning(&self) -> bool {
        matches!(self, Finding::RightAlignedImage { .. })
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::CanvasSize {
                width,
                height,
                expected_width,
                expected_height,
            } => write!(
                f,
                "Slide size {:.3}x{:.3} in (expected {:.3}x{:.3})",
                width, height, expected_width, expected_height
            ),
            Finding::OffPaletteColor {
                slide,
                shape,
                color,
                on_text,
            } => write!(
                f,
                "Slide {}, shape '{}': {} #{} not in brand palette",
                slide,
                shape,
                if *on_text { "text color" } else { "fill" },
                color
            ),
            Finding::OffBrandFont { slide, shape, font } => {
                write!(f, "Slide {}, shape '{}': font '{}' not a brand font", slide, shape, font)
            }
            Finding::RightAlignedImage { slide, shape, left } => write!(
                f,
                "Slide {}: image '{}' at left={:.2}in may be right-aligned",
                slide, shape, left
            ),
        }
    }
}

/// Where an image sits, in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlacement {
    pub slide: usize,
    pub name: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AuditReport {
    pub slide_width: f64,
    pub slide_height: f64,
    pub slide_count: usize,
    pub color_checks: usize,
    pub font_checks: usize,
    pub images: Vec<ImagePlacement>,
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn issues(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_warning())
    }

    pub fn issue_count(&self) -> usize {
        self.issues().count()
    }

    pub fn passed(&self) -> bool {
        self.issue_count() == 0
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Brand Compliance Audit")?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Slides: {} | size {:.3}x{:.3} in",
            self.slide_count, self.slide_width, self.slide_height
        )?;

        writeln!(f, "\n--- COLOR CHECKS ({} inspected) ---", self.color_checks)?;
        let colors: Vec<_> = self
            .findings
            .iter()
            .filter(|x| matches!(x, Finding::OffPaletteColor { .. } | Finding::CanvasSize { .. }))
            .collect();
        if colors.is_empty() {
            writeln!(f, "  All fill/text colors are within the brand palette")?;
        }
        for finding in colors {
            writeln!(f, "  {}", finding)?;
        }

        writeln!(f, "\n--- FONT CHECKS ({} inspected) ---", self.font_checks)?;
        let fonts: Vec<_> = self
            .findings
            .iter()
            .filter(|x| matches!(x, Finding::OffBrandFont { .. }))
            .collect();
        if fonts.is_empty() {
            writeln!(f, "  All fonts are brand fonts")?;
        }
        for finding in fonts {
            writeln!(f, "  {}", finding)?;
        }

        writeln!(f, "\n--- IMAGE PLACEMENTS ({} found) ---", self.images.len())?;
        for image in &self.images {
            writeln!(
                f,
                "  Slide {}: '{}' at left={:.2}in, top={:.2}in, w={:.2}in, h={:.2}in",
                image.slide, image.name, image.left, image.top, image.width, image.height
            )?;
        }
        for warning in self.findings.iter().filter(|x| x.is_warning()) {
            writeln!(f, "  WARNING: {}", warning)?;
        }

        writeln!(f, "\n{}", rule)?;
        let issues = self.issue_count();
        writeln!(
            f,
            "Summary: {} checks | {} issues",
            self.color_checks + self.font_checks + 1,
            issues
        )?;
        if issues == 0 {
            writeln!(f, "All automated checks PASSED")?;
        } else {
            writeln!(f, "{} issue(s) found", issues)?;
        }
        write!(f, "{}", rule)
    }
}

/// Audit a deck summary against a theme.
pub fn audit(summary: &DeckSummary, theme: &Theme) -> AuditReport {
    let allowed_colors: BTreeSet<String> = theme
        .colors
        .all()
        .iter()
        .map(|c| c.hex())
        .chain(NEUTRAL_COLORS.iter().map(|c| c.to_string()))
        .collect();
    let fonts = &theme.fonts;
    let allowed_fonts: BTreeSet<&str> = [
        fonts.headline.as_str(),
        fonts.body.as_str(),
        fonts.utility.as_str(),
        fonts.fallback.as_str(),
    ]
    .into_iter()
    .collect();

    let mut report = AuditReport {
        slide_width: to_inches(summary.slide_width),
        slide_height: to_inches(summary.slide_height),
        slide_count: summary.slide_count(),
        ..Default::default()
    };

    if (report.slide_width - theme.slide.width).abs() > CANVAS_TOLERANCE
        || (report.slide_height - theme.slide.height).abs() > CANVAS_TOLERANCE
    {
        report.findings.push(Finding::CanvasSize {
            width: report.slide_width,
            height: report.slide_height,
            expected_width: theme.slide.width,
            expected_height: theme.slide.height,
        });
    }

    for slide in &summary.slides {
        if let Some(background) = &slide.background {
            report.color_checks += 1;
            if !allowed_colors.contains(background) {
                report.findings.push(Finding::OffPaletteColor {
                    slide: slide.number,
                    shape: "background".to_string(),
                    color: background.clone(),
                    on_text: false,
                });
            }
        }

        for shape in &slide.shapes {
            let colors = shape
                .fill_colors
                .iter()
                .map(|c| (c, false))
                .chain(shape.text_colors.iter().map(|c| (c, true)));
            for (color, on_text) in colors {
                report.color_checks += 1;
                if !allowed_colors.contains(color) {
                    report.findings.push(Finding::OffPaletteColor {
                        slide: slide.number,
                        shape: shape.name.clone(),
                        color: color.clone(),
                        on_text,
                    });
                }
            }

            for font in &shape.fonts {
                report.font_checks += 1;
                if !allowed_fonts.contains(font.as_str()) {
                    report.findings.push(Finding::OffBrandFont {
                        slide: slide.number,
                        shape: shape.name.clone(),
                        font: font.clone(),
                    });
                }
            }

            if shape.is_picture {
                let left = to_inches(shape.x);
                report.images.push(ImagePlacement {
                    slide: slide.number,
                    name: shape.name.clone(),
                    left,
                    top: to_inches(shape.y),
                    width: to_inches(shape.cx),
                    height: to_inches(shape.cy),
                });
                if left > report.slide_width * RIGHT_ALIGNED_FRACTION {
                    report.findings.push(Finding::RightAlignedImage {
                        slide: slide.number,
                        shape: shape.name.clone(),
                        left,
                    });
                }
            }
        }
    }

    log::debug!(
        "Audited {} slides: {} color checks, {} font checks, {} findings",
        report.slide_count,
        report.color_checks,
        report.font_checks,
        report.findings.len()
    );
    report
}

/// Read a package from disk and audit it.
pub fn audit_path(path: &Path, theme: &Theme) -> Result<AuditReport> {
    let summary = PptxReader::new().read_path(path)?;
    Ok(audit(&summary, theme))
}
