//! QR symbol rendering
//!
//! This module produces the on-screen QR symbol: an opaque handle holding
//! the rendered module matrix as an RGBA image, obtained from a
//! [`SymbolRenderer`] and consumed by the rasterizer.

mod renderer;

pub use renderer::{QrSymbolRenderer, SymbolRenderer};

use crate::color::Color;

/// An opaque handle to a rendered QR symbol
///
/// Exists only while the workflow holds a non-empty payload; required
/// before rasterization can be requested.
#[derive(Debug, Clone)]
pub struct Symbol {
    payload: String,
    foreground: Color,
    background: Color,
    image: image::RgbaImage,
}

impl Symbol {
    /// Construct a symbol handle from rendered pixels
    pub fn new(
        payload: String,
        foreground: Color,
        background: Color,
        image: image::RgbaImage,
    ) -> Self {
        Self {
            payload,
            foreground,
            background,
            image,
        }
    }

    /// The payload text encoded in this symbol
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The dark-module color this symbol was rendered with
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// The light-module color this symbol was rendered with
    pub fn background(&self) -> Color {
        self.background
    }

    /// The rendered pixels
    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }

    /// Rendered width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Rendered height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
