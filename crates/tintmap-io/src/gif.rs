//! GIF format support.
//!
//! Read/write via the `image` crate. Animated inputs decode to their
//! first frame; output is always a single-frame GIF. The encoder
//! quantizes to 256 colors, so a roundtrip is not lossless.
//!
//! # Example
//!
//! ```rust,ignore
//! use tintmap_io::gif;
//!
//! let image = gif::read("anim.gif")?;
//! gif::write("still.gif", &image)?;
//! ```

use crate::{ImageData, IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};

/// Reads a GIF image from file (first frame).
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    let img = ImageReader::with_format(BufReader::new(file), ImageFormat::Gif)
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    Ok(dynamic_to_image_data(img))
}

/// Reads a GIF from a byte slice (first frame).
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    let img = ImageReader::with_format(Cursor::new(data), ImageFormat::Gif)
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    Ok(dynamic_to_image_data(img))
}

/// Writes a single-frame GIF to file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_impl(BufWriter::new(file), image)
}

/// Encodes a single-frame GIF to a byte vector.
pub fn write_to_memory(image: &ImageData) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_impl(Cursor::new(&mut buffer), image)?;
    Ok(buffer)
}

fn write_impl<W: std::io::Write>(writer: W, image: &ImageData) -> IoResult<()> {
    let rgba = image.to_rgba8();
    let mut encoder = image::codecs::gif::GifEncoder::new(writer);
    encoder
        .encode(
            &rgba,
            image.width,
            image.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

/// Flattens any decoded layout to our 8-bit container.
fn dynamic_to_image_data(img: DynamicImage) -> ImageData {
    let (width, height) = (img.width(), img.height());
    match img {
        DynamicImage::ImageRgb8(rgb) => ImageData::new(width, height, 3, rgb.into_raw()),
        DynamicImage::ImageRgba8(rgba) => ImageData::new(width, height, 4, rgba.into_raw()),
        DynamicImage::ImageLuma8(gray) => ImageData::new(width, height, 1, gray.into_raw()),
        other => {
            let rgba = other.to_rgba8();
            ImageData::new(width, height, 4, rgba.into_raw())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests memory roundtrip dimensions.
    #[test]
    fn test_memory_roundtrip() {
        let mut data = Vec::new();
        for i in 0..8u32 * 8 {
            let v = if i % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let image = ImageData::from_rgba8(8, 8, data);

        let bytes = write_to_memory(&image).expect("encode failed");
        let loaded = read_from_memory(&bytes).expect("decode failed");

        assert_eq!(loaded.width, 8);
        assert_eq!(loaded.height, 8);
    }

    /// Tests file roundtrip.
    #[test]
    fn test_file_roundtrip() {
        let image = ImageData::from_rgba8(4, 4, vec![128; 4 * 4 * 4]);
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.gif");

        write(&path, &image).expect("write failed");
        let loaded = read(&path).expect("read failed");
        assert_eq!(loaded.width, 4);
        assert_eq!(loaded.height, 4);
    }

    /// Tests garbage input fails.
    #[test]
    fn test_decode_garbage_fails() {
        assert!(read_from_memory(&[1u8; 16]).is_err());
    }
}
