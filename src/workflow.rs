//! The QR generation and export workflow
//!
//! A single event-driven state machine owning all transient UI state:
//! payload text, the two module colors, the rendered symbol handle, and a
//! prepared export image. Collaborators (symbol renderer, rasterizer,
//! platform I/O) are injected behind traits so the machine can be exercised
//! without touching the host platform.
//!
//! Export always re-rasterizes the current symbol: the export image is
//! invalidated on every payload or color edit, so a download or deep link
//! can never reference a stale symbol.

use crate::color::{BACKGROUND_PALETTE, Color, FOREGROUND_PALETTE};
use crate::error::{Error, Result};
use crate::export::{ExportImage, PlatformIO, Rasterizer};
use crate::share::SharePlatform;
use crate::symbol::{Symbol, SymbolRenderer};
use rand::seq::SliceRandom;
use std::path::PathBuf;

/// Default output file name for downloads
pub const DEFAULT_FILENAME: &str = "qr-code.png";

/// Default caption embedded in share deep links
pub const DEFAULT_CAPTION: &str = "Check out this QR code!";

/// Workflow lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// No payload text; nothing rendered
    Empty,
    /// Non-empty payload with a rendered symbol, no export pending
    Ready,
    /// An asynchronous rasterization is in flight
    Exporting,
    /// A fresh export image is available for deep-link sharing
    Shareable,
}

/// Immutable color palettes the workflow draws randomized colors from
#[derive(Debug, Clone)]
pub struct Palette {
    /// Dark-module color options
    pub foreground: Vec<Color>,
    /// Light-module color options
    pub background: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: FOREGROUND_PALETTE.to_vec(),
            background: BACKGROUND_PALETTE.to_vec(),
        }
    }
}

/// Configuration injected into a workflow instance at construction
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    /// Randomization palettes
    pub palette: Palette,
    /// Initial dark-module color
    pub foreground: Color,
    /// Initial light-module color
    pub background: Color,
    /// Output file name for downloads
    pub filename: String,
    /// Caption embedded in share deep links
    pub caption: String,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            foreground: Color::BLACK,
            background: Color::WHITE,
            filename: DEFAULT_FILENAME.to_string(),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

/// User-visible result of a workflow operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request was a guarded no-op (no symbol, or an export in flight)
    Ignored,
    /// The image was saved to disk
    Saved {
        /// Full path of the written file
        path: PathBuf,
    },
    /// A fresh export image is held; `share_via` may now be called
    SharePrepared,
    /// A deep link was opened in an external browsing context
    Opened {
        /// The platform the link targets
        platform: SharePlatform,
        /// The opened URL
        url: String,
    },
    /// The platform has no deep link; the user must share manually
    ManualShareRequired {
        /// The platform lacking a URL template
        platform: SharePlatform,
    },
}

impl Outcome {
    /// Transient notice text for the user, if this outcome warrants one
    pub fn notice(&self) -> Option<String> {
        match self {
            Outcome::Ignored => None,
            Outcome::Saved { path } => Some(format!("QR code saved to {}", path.display())),
            Outcome::SharePrepared => Some("Share image ready".to_string()),
            Outcome::Opened { platform, .. } => {
                Some(format!("Opening {} share link", platform.label()))
            }
            Outcome::ManualShareRequired { platform } => Some(format!(
                "{} has no share link; save the image and share it manually",
                platform.label()
            )),
        }
    }
}

/// The QR generation and export state machine
///
/// All transitions happen in response to discrete user events, one at a
/// time. A second export request while one is in flight is ignored.
pub struct QrWorkflow<R, X, P> {
    renderer: R,
    rasterizer: X,
    platform: P,
    palette: Palette,
    filename: String,
    caption: String,
    payload: String,
    foreground: Color,
    background: Color,
    symbol: Option<Symbol>,
    export: Option<ExportImage>,
    state: WorkflowState,
}

impl<R, X, P> QrWorkflow<R, X, P>
where
    R: SymbolRenderer,
    X: Rasterizer,
    P: PlatformIO,
{
    /// Create a workflow from explicit collaborators and options
    pub fn with_parts(renderer: R, rasterizer: X, platform: P, options: WorkflowOptions) -> Result<Self> {
        if options.palette.foreground.is_empty() || options.palette.background.is_empty() {
            return Err(Error::Config(
                "Color palettes must not be empty".to_string(),
            ));
        }

        Ok(Self {
            renderer,
            rasterizer,
            platform,
            palette: options.palette,
            filename: options.filename,
            caption: options.caption,
            payload: String::new(),
            foreground: options.foreground,
            background: options.background,
            symbol: None,
            export: None,
            state: WorkflowState::Empty,
        })
    }

    /// Set the payload text, rendering or clearing the symbol accordingly.
    ///
    /// Any held export image is invalidated; it no longer corresponds to
    /// the current content.
    pub fn set_payload(&mut self, text: impl Into<String>) -> Result<()> {
        self.payload = text.into();
        self.export = None;

        if self.payload.is_empty() {
            self.symbol = None;
            self.state = WorkflowState::Empty;
            return Ok(());
        }

        self.refresh_symbol()
    }

    /// Set the dark-module color and re-render the symbol if one exists
    pub fn set_foreground(&mut self, color: Color) -> Result<()> {
        self.foreground = color;
        self.export = None;
        self.refresh_symbol_if_present()
    }

    /// Set the light-module color and re-render the symbol if one exists
    pub fn set_background(&mut self, color: Color) -> Result<()> {
        self.background = color;
        self.export = None;
        self.refresh_symbol_if_present()
    }

    /// Draw new foreground and background colors uniformly and independently
    /// from the configured palettes.
    ///
    /// The draws are independent; the same color landing in both roles is
    /// accepted, not prevented.
    pub fn randomize_colors(&mut self) -> Result<(Color, Color)> {
        let mut rng = rand::thread_rng();
        let foreground = *self
            .palette
            .foreground
            .choose(&mut rng)
            .ok_or_else(|| Error::Config("Foreground palette is empty".to_string()))?;
        let background = *self
            .palette
            .background
            .choose(&mut rng)
            .ok_or_else(|| Error::Config("Background palette is empty".to_string()))?;

        self.foreground = foreground;
        self.background = background;
        self.export = None;
        self.refresh_symbol_if_present()?;

        Ok((foreground, background))
    }

    /// Rasterize the current symbol and save it under the configured file
    /// name.
    ///
    /// With no rendered symbol, or while another export is in flight, this
    /// is a silent no-op: no collaborator is called and no notice is due.
    pub async fn request_download(&mut self) -> Result<Outcome> {
        if self.state == WorkflowState::Exporting {
            return Ok(Outcome::Ignored);
        }
        let Some(symbol) = self.symbol.clone() else {
            return Ok(Outcome::Ignored);
        };

        self.state = WorkflowState::Exporting;
        let raster = match self.rasterizer.to_raster(&symbol).await {
            Ok(raster) => raster,
            Err(e) => {
                self.state = WorkflowState::Ready;
                return Err(e);
            }
        };

        let saved = self.platform.save(&raster, &self.filename).await;
        self.state = WorkflowState::Ready;
        let path = saved?;

        tracing::info!(path = %path.display(), "QR code saved");
        Ok(Outcome::Saved { path })
    }

    /// Rasterize the current symbol and hold the result as the export image
    /// for subsequent [`share_via`](Self::share_via) calls.
    ///
    /// Same guards as [`request_download`](Self::request_download).
    pub async fn request_share(&mut self) -> Result<Outcome> {
        if self.state == WorkflowState::Exporting {
            return Ok(Outcome::Ignored);
        }
        let Some(symbol) = self.symbol.clone() else {
            return Ok(Outcome::Ignored);
        };

        self.state = WorkflowState::Exporting;
        match self.rasterizer.to_raster(&symbol).await {
            Ok(raster) => {
                self.export = Some(ExportImage::from(&raster));
                self.state = WorkflowState::Shareable;
                Ok(Outcome::SharePrepared)
            }
            Err(e) => {
                self.state = WorkflowState::Ready;
                Err(e)
            }
        }
    }

    /// Open the deep link for `platform_id` with the held export image.
    ///
    /// Unknown identifiers and Instagram are resolved before the export
    /// image is consulted: the former fail with
    /// [`Error::PlatformNotRecognized`], the latter always reports that a
    /// manual share is required. Neither navigates.
    pub fn share_via(&mut self, platform_id: &str) -> Result<Outcome> {
        let platform: SharePlatform = platform_id.parse()?;

        if platform == SharePlatform::Instagram {
            return Ok(Outcome::ManualShareRequired { platform });
        }

        let Some(export) = &self.export else {
            return Ok(Outcome::Ignored);
        };

        let url = platform
            .deep_link(&export.reference, &self.caption)
            .ok_or_else(|| {
                Error::ShareUnsupported(format!("{} has no share URL", platform.label()))
            })?;

        self.platform.open_external(&url)?;
        tracing::info!(platform = platform.label(), "Opened share deep link");
        Ok(Outcome::Opened { platform, url })
    }

    /// Current lifecycle state
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Current payload text
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Current dark-module color
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Current light-module color
    pub fn background(&self) -> Color {
        self.background
    }

    /// The rendered symbol, if the payload is non-empty
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    /// The held export image, if a share was prepared since the last edit
    pub fn export_image(&self) -> Option<&ExportImage> {
        self.export.as_ref()
    }

    /// The configured randomization palettes
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn refresh_symbol_if_present(&mut self) -> Result<()> {
        if self.payload.is_empty() {
            return Ok(());
        }
        self.refresh_symbol()
    }

    fn refresh_symbol(&mut self) -> Result<()> {
        match self
            .renderer
            .render(&self.payload, self.foreground, self.background)
        {
            Ok(symbol) => {
                self.symbol = Some(symbol);
                self.state = WorkflowState::Ready;
                Ok(())
            }
            Err(e) => {
                // Renderer rejected the payload; there is no symbol to show.
                self.symbol = None;
                self.state = WorkflowState::Empty;
                Err(e)
            }
        }
    }
}
