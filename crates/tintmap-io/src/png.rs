//! PNG format support.
//!
//! 8-bit and 16-bit RGB/RGBA and grayscale reads (16-bit is reduced to
//! the high byte), RGBA-preserving writes. Alpha survives a roundtrip,
//! which makes PNG the lossless path through the mapper.
//!
//! # Example
//!
//! ```rust,ignore
//! use tintmap_io::png;
//!
//! let image = png::read("input.png")?;
//! png::write("output.png", &image)?;
//! ```

use crate::{ImageData, IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    read_impl(png::Decoder::new(BufReader::new(file)))
}

/// Reads a PNG from a byte slice.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    read_impl(png::Decoder::new(Cursor::new(data)))
}

fn read_impl<R: std::io::BufRead + std::io::Seek>(decoder: png::Decoder<R>) -> IoResult<ImageData> {
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width;
    let height = info.height;
    let raw = &buf[..info.buffer_size()];

    let (channels, data) = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => (3, raw.to_vec()),
        (png::ColorType::Rgba, png::BitDepth::Eight) => (4, raw.to_vec()),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => (1, raw.to_vec()),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let rgba: Vec<u8> = raw
                .chunks(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            (4, rgba)
        }
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => (3, high_bytes(raw)),
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => (4, high_bytes(raw)),
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => (1, high_bytes(raw)),
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(ImageData::new(width, height, channels, data))
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_impl(BufWriter::new(file), image)
}

/// Encodes a PNG to a byte vector.
pub fn write_to_memory(image: &ImageData) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_impl(Cursor::new(&mut buffer), image)?;
    Ok(buffer)
}

fn write_impl<W: std::io::Write>(writer: W, image: &ImageData) -> IoResult<()> {
    let color_type = match image.channels {
        1 => png::ColorType::Grayscale,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count: {}",
                n
            )));
        }
    };

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&image.data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Reduces big-endian 16-bit samples to their high bytes.
fn high_bytes(raw: &[u8]) -> Vec<u8> {
    raw.chunks(2).map(|s| s[0]).collect()
}
