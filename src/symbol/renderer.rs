//! QR symbol renderer backed by the `qrcode` crate

use crate::color::Color;
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use image::Rgba;
use qrcode::QrCode;

/// Renders a payload string into a visual QR symbol
///
/// Symbol encoding correctness is the renderer's responsibility; callers
/// treat the returned [`Symbol`] as opaque.
pub trait SymbolRenderer {
    /// Render `payload` as a QR symbol with the given module colors.
    ///
    /// Payloads exceeding the capacity of the underlying symbol format are
    /// rejected with [`Error::SymbolEncode`].
    fn render(&self, payload: &str, foreground: Color, background: Color) -> Result<Symbol>;
}

/// Default symbol renderer producing RGBA images via `qrcode`
pub struct QrSymbolRenderer {
    /// Error correction level
    ecc_level: qrcode::EcLevel,
    /// Minimum rendered edge length in pixels
    min_dimension: u32,
}

impl QrSymbolRenderer {
    /// Create a renderer with default settings (Medium ECC, 400px minimum)
    pub fn new() -> Self {
        Self {
            ecc_level: qrcode::EcLevel::M,
            min_dimension: 400, // Minimum size for reliable scanning
        }
    }

    /// Create a renderer with a specific error correction level
    pub fn with_ecc_level(ecc_level: qrcode::EcLevel) -> Self {
        Self {
            ecc_level,
            min_dimension: 400,
        }
    }
}

impl SymbolRenderer for QrSymbolRenderer {
    fn render(&self, payload: &str, foreground: Color, background: Color) -> Result<Symbol> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)
            .map_err(|e| Error::SymbolEncode(format!("Failed to create QR code: {}", e)))?;

        let image = code
            .render::<Rgba<u8>>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .dark_color(foreground.to_rgba())
            .light_color(background.to_rgba())
            .build();

        Ok(Symbol::new(
            payload.to_string(),
            foreground,
            background,
            image,
        ))
    }
}

impl Default for QrSymbolRenderer {
    fn default() -> Self {
        Self::new()
    }
}
