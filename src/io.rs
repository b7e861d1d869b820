//! Reading and writing image files via the [`image`] crate.
//!
//! Input files may be in any format enabled for the `image` crate (PNG and JPEG by default)
//! and are converted to 8-bit RGB, dropping any alpha channel.
//! Output files are always encoded as PNG.

use image::{ImageError, ImageFormat, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// An error from reading or writing an image file.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    /// The source image could not be opened or decoded.
    #[error("failed to read image {}", .path.display())]
    Read {
        /// The path of the source image.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: ImageError,
    },
    /// The destination image could not be created or encoded.
    #[error("failed to write image {}", .path.display())]
    Write {
        /// The path of the destination image.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: ImageError,
    },
}

impl ImageIoError {
    /// The path of the image file that could not be read or written.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Opens and decodes the image at `path` as an [`RgbImage`].
///
/// # Errors
/// Returns [`ImageIoError::Read`] if the file cannot be opened or decoded.
pub fn open(path: impl AsRef<Path>) -> Result<RgbImage, ImageIoError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| ImageIoError::Read {
        path: path.to_owned(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );

    Ok(image.into_rgb8())
}

/// Encodes `image` as a PNG and writes it to `path`, replacing any existing file.
///
/// # Errors
/// Returns [`ImageIoError::Write`] if the file cannot be created or the image cannot be encoded.
pub fn save(image: &RgbaImage, path: impl AsRef<Path>) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ImageIoError::Write {
            path: path.to_owned(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "wrote image");
    Ok(())
}
