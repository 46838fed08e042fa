//! JPEG format support.
//!
//! Reading via `jpeg-decoder` (grayscale and CMYK inputs are normalized
//! to RGB), writing via `jpeg-encoder` with a quality setting. JPEG has
//! no alpha channel; alpha is stripped on write.
//!
//! # Example
//!
//! ```rust,ignore
//! use tintmap_io::jpeg;
//!
//! let image = jpeg::read("photo.jpg")?;
//! jpeg::write("output.jpg", &image)?;
//! ```

use crate::{ImageData, IoError, IoResult};
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Default encode quality (1-100).
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file from disk.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let data = std::fs::read(path.as_ref())?;
    read_from_memory(&data)
}

/// Reads a JPEG from a byte slice.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    // Normalize all input layouts to RGB.
    let rgb = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::L16 => {
            // High byte of 16-bit grayscale.
            pixels.chunks(2).flat_map(|l16| [l16[0]; 3]).collect()
        }
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks(4)
            .flat_map(|cmyk| {
                let c = cmyk[0] as f32 / 255.0;
                let m = cmyk[1] as f32 / 255.0;
                let y = cmyk[2] as f32 / 255.0;
                let k = cmyk[3] as f32 / 255.0;

                [
                    ((1.0 - c) * (1.0 - k) * 255.0) as u8,
                    ((1.0 - m) * (1.0 - k) * 255.0) as u8,
                    ((1.0 - y) * (1.0 - k) * 255.0) as u8,
                ]
            })
            .collect(),
    };

    Ok(ImageData::new(width, height, 3, rgb))
}

/// Writes a JPEG file to disk with the default quality.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_QUALITY)
}

/// Writes a JPEG file to disk with an explicit quality (1-100).
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &ImageData, quality: u8) -> IoResult<()> {
    let bytes = encode(image, quality)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes a JPEG to a byte vector with the default quality.
pub fn write_to_memory(image: &ImageData) -> IoResult<Vec<u8>> {
    encode(image, DEFAULT_QUALITY)
}

fn encode(image: &ImageData, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let rgb = match image.channels {
        1 | 3 | 4 => image.to_rgb8(),
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count: {}",
                n
            )));
        }
    };

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    encoder
        .encode(
            &rgb,
            image.width as u16,
            image.height as u16,
            ColorType::Rgb,
        )
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}
