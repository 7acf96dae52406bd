//! Image media embedded in slides.

use deck_core::{Error, Result};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An image loaded from disk, ready to embed.
///
/// The bytes are shared, so placing the same logo on every slide does not
/// copy it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    source: PathBuf,
    bytes: Arc<[u8]>,
    format: ImageFormat,
    dimensions: Option<(u32, u32)>,
}

impl ImageData {
    /// Read an image file and identify its format.
    ///
    /// Pixel dimensions are probed but optional; an image whose header cannot
    /// be decoded still embeds, it just has no known aspect ratio.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let format = ImageFormat::from_path(path)
            .or_else(|_| image::guess_format(&bytes))
            .map_err(|e| Error::ImageError(format!("{}: {}", path.display(), e)))?;
        let dimensions = match image::image_dimensions(path) {
            Ok(dims) => Some(dims),
            Err(e) => {
                log::warn!("Could not read dimensions of {}: {}", path.display(), e);
                None
            }
        };

        Ok(Self {
            source: path.to_path_buf(),
            bytes: bytes.into(),
            format,
            dimensions,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width and height in pixels, when the header could be read.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Width over height, when known and non-degenerate.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match self.dimensions {
            Some((w, h)) if w > 0 && h > 0 => Some(w as f64 / h as f64),
            _ => None,
        }
    }

    /// File extension used for the part name inside the package.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("bin")
    }

    pub fn content_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}
