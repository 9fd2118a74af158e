use anyhow::{Context, Result};
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::debug;

/// Server-rendered temperature chart for one search.
///
/// The bytes are written to a temporary file so the user can open the chart.
/// The file is deleted when the image is dropped, which is how a superseded
/// chart gets released.
#[derive(Debug)]
pub struct TrendImage {
    city: String,
    len: usize,
    file: NamedTempFile,
}

impl TrendImage {
    pub fn from_png(city: &str, bytes: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("weather-trend-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary file for trend image")?;

        file.write_all(bytes).context("Failed to write trend image")?;
        file.flush().context("Failed to flush trend image")?;

        Ok(Self { city: city.to_string(), len: bytes.len(), file })
    }

    /// City the chart was requested for.
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for TrendImage {
    fn drop(&mut self) {
        debug!(city = %self.city, path = %self.file.path().display(), "releasing trend image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_removes_file() {
        let image = TrendImage::from_png("Paris", b"\x89PNG fake").unwrap();
        let path = image.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");
        assert_eq!(image.len(), 9);

        drop(image);
        assert!(!path.exists());
    }
}
