//! # tintmap-io
//!
//! Image I/O plumbing for tintmap.
//!
//! Reads and writes the raster formats the mapper consumes and produces:
//!
//! - **JPEG** - via `jpeg-decoder` / `jpeg-encoder`
//! - **PNG** - via the `png` crate, alpha preserved
//! - **GIF** - via the `image` crate (first frame on read)
//!
//! Every format offers both file-path and in-memory entry points, so the
//! CLI can work on files or on stdin/stdout byte streams. The top-level
//! [`read`] / [`write`] functions dispatch on detected format.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tintmap_io::{read, write};
//!
//! let image = read("input.jpg")?;
//! write("output.png", &image)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

pub mod gif;
pub mod jpeg;
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};

use std::path::Path;

/// Decoded 8-bit image data.
///
/// A format-agnostic pixel container: `channels` is 1 (gray), 3 (RGB) or
/// 4 (RGBA), rows stored top to bottom with no padding. The mapping
/// engine works on RGBA, so [`ImageData::to_rgba8`] normalizes any
/// decoded layout.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of channels (1, 3 or 4).
    pub channels: u32,
    /// Raw interleaved pixel data, `width * height * channels` bytes.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Creates an image from raw interleaved data.
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Creates a 4-channel image from an RGBA buffer.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self::new(width, height, 4, data)
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Expands the pixel data to RGBA8 regardless of stored layout.
    ///
    /// Gray becomes opaque gray RGB, RGB gains an opaque alpha, RGBA is
    /// returned as-is.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self.channels {
            4 => self.data.clone(),
            3 => self
                .data
                .chunks(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
            1 => self.data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            _ => self.data.clone(),
        }
    }

    /// Drops alpha, returning an RGB buffer.
    pub fn to_rgb8(&self) -> Vec<u8> {
        match self.channels {
            3 => self.data.clone(),
            4 => self
                .data
                .chunks(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            1 => self.data.iter().flat_map(|&g| [g, g, g]).collect(),
            _ => self.data.clone(),
        }
    }
}

/// Reads an image from a file, auto-detecting the format.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the format is not
/// supported, or the file is corrupted.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    tracing::debug!(?format, path = %path.display(), "reading image");

    match format {
        Format::Jpeg => jpeg::read(path),
        Format::Png => png::read(path),
        Format::Gif => gif::read(path),
        Format::Unknown => Err(unsupported(path)),
    }
}

/// Reads an image from a byte slice, detecting the format from magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    match Format::from_bytes(data) {
        Format::Jpeg => jpeg::read_from_memory(data),
        Format::Png => png::read_from_memory(data),
        Format::Gif => gif::read_from_memory(data),
        Format::Unknown => Err(IoError::UnsupportedFormat("unrecognized stream".into())),
    }
}

/// Writes an image to a file, detecting format from the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    tracing::debug!(?format, path = %path.display(), "writing image");

    match format {
        Format::Jpeg => jpeg::write(path, image),
        Format::Png => png::write(path, image),
        Format::Gif => gif::write(path, image),
        Format::Unknown => Err(unsupported(path)),
    }
}

/// Encodes an image to a byte vector in the given format.
pub fn write_to_memory(format: Format, image: &ImageData) -> IoResult<Vec<u8>> {
    match format {
        Format::Jpeg => jpeg::write_to_memory(image),
        Format::Png => png::write_to_memory(image),
        Format::Gif => gif::write_to_memory(image),
        Format::Unknown => Err(IoError::UnsupportedFormat("unknown output format".into())),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba8_expands_rgb() {
        let image = ImageData::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(image.to_rgba8(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_to_rgba8_expands_gray() {
        let image = ImageData::new(2, 1, 1, vec![9, 200]);
        assert_eq!(image.to_rgba8(), vec![9, 9, 9, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn test_to_rgb8_strips_alpha() {
        let image = ImageData::from_rgba8(1, 2, vec![1, 2, 3, 40, 5, 6, 7, 80]);
        assert_eq!(image.to_rgb8(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let image = ImageData::from_rgba8(1, 1, vec![0, 0, 0, 255]);
        let err = write("/tmp/out.exr", &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_unknown_stream_rejected() {
        assert!(matches!(
            read_from_memory(&[0, 1, 2, 3, 4, 5]),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
