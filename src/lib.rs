//! qrcraft - turn text or URLs into colorful QR codes
//!
//! This library implements the QR generation and export workflow: hold a
//! payload and two module colors, render a scannable symbol, download it
//! as `qr-code.png`, or share it through platform deep links.
//!
//! # Features
//!
//! - **Symbol rendering**: payload + colors to an RGBA QR symbol via `qrcode`
//! - **Export**: async PNG rasterization, file save, data-URL references
//! - **Sharing**: deep links for WhatsApp, Telegram, Facebook and X
//! - **Testable core**: the workflow is generic over its collaborators
//!
//! # Example
//!
//! ```no_run
//! use qrcraft::{QrcraftConfig, desktop_workflow};
//!
//! #[tokio::main]
//! async fn main() -> qrcraft::Result<()> {
//!     let config = QrcraftConfig::load(None)?;
//!     let mut workflow = desktop_workflow(&config, false)?;
//!
//!     workflow.set_payload("https://example.com")?;
//!     let outcome = workflow.request_download().await?;
//!
//!     if let Some(notice) = outcome.notice() {
//!         println!("{notice}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod share;
pub mod symbol;
pub mod workflow;

// Re-exports for convenience
pub use error::{Error, Result};

pub use color::{BACKGROUND_PALETTE, Color, FOREGROUND_PALETTE};
pub use config::{ExportOptions, LogRotation, LoggingOptions, PaletteOptions, QrcraftConfig};
pub use export::{DesktopPlatform, ExportImage, PlatformIO, PngRasterizer, RasterImage, Rasterizer};
pub use share::SharePlatform;
pub use symbol::{QrSymbolRenderer, Symbol, SymbolRenderer};
pub use workflow::{Outcome, Palette, QrWorkflow, WorkflowOptions, WorkflowState};

/// Workflow wired with the default desktop collaborators
pub type DesktopWorkflow = QrWorkflow<QrSymbolRenderer, PngRasterizer, DesktopPlatform>;

/// Build a workflow with the default renderer, rasterizer and platform I/O.
///
/// With `dry_run`, share deep links are printed instead of opened.
pub fn desktop_workflow(config: &QrcraftConfig, dry_run: bool) -> Result<DesktopWorkflow> {
    let options = config.workflow_options()?;
    QrWorkflow::with_parts(
        QrSymbolRenderer::new(),
        PngRasterizer::new(),
        DesktopPlatform::new(config.export.directory.clone()).with_dry_run(dry_run),
        options,
    )
}
