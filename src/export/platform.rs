//! Host platform integration for saving files and opening share links

use crate::error::{Error, Result};
use crate::export::RasterImage;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Host capabilities the workflow depends on: persisting an exported image
/// and opening a deep link in an external browsing context
#[async_trait]
pub trait PlatformIO: Send + Sync {
    /// Save the raster image under `filename`, returning the full path.
    async fn save(&self, image: &RasterImage, filename: &str) -> Result<PathBuf>;

    /// Open `url` in an external browsing context.
    fn open_external(&self, url: &str) -> Result<()>;
}

/// Default platform integration for desktop hosts
///
/// Saves into a configured directory and opens links through the host URL
/// opener. With `dry_run` the link is printed instead of opened, for
/// scripting and air-gapped use.
pub struct DesktopPlatform {
    directory: PathBuf,
    dry_run: bool,
}

impl DesktopPlatform {
    /// Create a platform sink writing into `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            dry_run: false,
        }
    }

    /// Print deep links to stdout instead of opening them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn opener() -> Result<&'static str> {
        if cfg!(target_os = "macos") {
            Ok("open")
        } else if cfg!(target_family = "unix") {
            Ok("xdg-open")
        } else {
            Err(Error::ShareUnsupported(
                "no URL opener available on this platform".to_string(),
            ))
        }
    }
}

#[async_trait]
impl PlatformIO for DesktopPlatform {
    async fn save(&self, image: &RasterImage, filename: &str) -> Result<PathBuf> {
        let path = self.directory.join(filename);
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                Error::Save(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        tokio::fs::write(&path, image.as_bytes())
            .await
            .map_err(|e| Error::Save(format!("Failed to write {}: {e}", path.display())))?;

        Ok(path)
    }

    fn open_external(&self, url: &str) -> Result<()> {
        if self.dry_run {
            println!("{url}");
            return Ok(());
        }

        let opener = Self::opener()?;
        Command::new(opener)
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::ShareUnsupported(format!("Failed to run {opener}: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_png_bytes_under_requested_filename() {
        let dir = std::env::temp_dir().join(format!("qrcraft-test-{}", std::process::id()));
        let platform = DesktopPlatform::new(&dir);
        let image = RasterImage::from_png(vec![0x89, b'P', b'N', b'G'], 1, 1);

        let path = platform.save(&image, "qr-code.png").await.unwrap();
        assert_eq!(path, dir.join("qr-code.png"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), image.as_bytes());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[test]
    fn dry_run_never_spawns_an_opener() {
        let platform = DesktopPlatform::new(".").with_dry_run(true);
        platform.open_external("https://example.com").unwrap();
    }
}
