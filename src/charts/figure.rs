//! Figure Output Module
//! Output format selection and the shared renderer error type.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write figure: {0}")]
    Io(#[from] std::io::Error),
    #[error("rendering backend error: {0}")]
    Backend(String),
}

impl RenderError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        RenderError::Backend(err.to_string())
    }
}

/// Supported figure formats. Chosen from the output path extension, with an
/// explicit `--format` flag taking precedence; PNG is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()?
            .to_str()?
            .to_ascii_lowercase()
            .as_str()
        {
            "png" => Some(ImageFormat::Png),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    pub fn resolve(flag: Option<Self>, output: &Path) -> Self {
        flag.or_else(|| Self::from_path(output))
            .unwrap_or(ImageFormat::Png)
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(format!("unknown image format '{other}' (expected png or svg)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension_unless_overridden() {
        let svg = Path::new("out/figure.SVG");
        assert_eq!(ImageFormat::resolve(None, svg), ImageFormat::Svg);
        assert_eq!(
            ImageFormat::resolve(Some(ImageFormat::Png), svg),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::resolve(None, Path::new("figure.tiff")),
            ImageFormat::Png
        );
    }
}
