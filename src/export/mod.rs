//! Rasterization and image export
//!
//! Converts a rendered [`Symbol`] into raster image data suitable for
//! saving to disk or embedding in a share deep link. Rasterization is the
//! only latency-bearing step in the workflow, so the trait is async.

pub mod platform;

pub use platform::{DesktopPlatform, PlatformIO};

use crate::error::{Error, Result};
use crate::symbol::Symbol;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::io::Cursor;

/// PNG raster image data produced from a rendered symbol
#[derive(Debug, Clone)]
pub struct RasterImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterImage {
    /// Wrap already-encoded PNG bytes
    pub fn from_png(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    /// The encoded PNG bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encode as a `data:image/png;base64,...` URL
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// A prepared share image held by the workflow while in the shareable state
///
/// Invalidated (dropped) whenever the payload or either color changes, so a
/// deep link never references a stale symbol.
#[derive(Debug, Clone)]
pub struct ExportImage {
    /// Environment-neutral reference to the image (a PNG data URL)
    pub reference: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl From<&RasterImage> for ExportImage {
    fn from(raster: &RasterImage) -> Self {
        Self {
            reference: raster.to_data_url(),
            width: raster.width,
            height: raster.height,
        }
    }
}

/// Converts a rendered symbol into raster image data
///
/// Failure must be distinguishable from success; callers surface it to the
/// user and return to a stable state.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Produce a raster image of the given symbol.
    async fn to_raster(&self, symbol: &Symbol) -> Result<RasterImage>;
}

/// Default rasterizer encoding PNG bytes on a blocking task
pub struct PngRasterizer;

impl PngRasterizer {
    /// Create a new PNG rasterizer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Rasterizer for PngRasterizer {
    async fn to_raster(&self, symbol: &Symbol) -> Result<RasterImage> {
        let image = symbol.image().clone();
        let (width, height) = (image.width(), image.height());

        let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let mut buffer = Vec::new();
            image::DynamicImage::ImageRgba8(image)
                .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)?;
            Ok(buffer)
        })
        .await
        .map_err(|e| Error::Rasterization(format!("PNG encoding task failed: {}", e)))??;

        Ok(RasterImage::from_png(png, width, height))
    }
}

impl Default for PngRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
