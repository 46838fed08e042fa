//! Format detection utilities.
//!
//! Detects image formats from file extensions and magic bytes. Magic
//! bytes win when both are available, which also makes detection work on
//! anonymous byte streams (stdin).

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JPEG format.
    Jpeg,
    /// PNG format.
    Png,
    /// GIF format.
    Gif,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            Some("png") => Format::Png,
            Some("gif") => Format::Gif,
            _ => Format::Unknown,
        }
    }

    /// Detects format by reading a file's magic bytes.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];

        let bytes_read = file.read(&mut header)?;
        if bytes_read < 4 {
            return Ok(Format::Unknown);
        }

        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from a leading byte slice.
    pub fn from_bytes(header: &[u8]) -> Self {
        if header.len() >= 3 && header[0] == 0xFF && header[1] == 0xD8 && header[2] == 0xFF {
            Format::Jpeg
        } else if header.len() >= 4 && header[..4] == [0x89, 0x50, 0x4E, 0x47] {
            Format::Png
        } else if header.len() >= 4 && header[..4] == *b"GIF8" {
            Format::Gif
        } else {
            Format::Unknown
        }
    }

    /// Parses a format name, e.g. for a CLI `--format` flag.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "jpg" | "jpeg" => Format::Jpeg,
            "png" => Format::Png,
            "gif" => Format::Gif,
            _ => Format::Unknown,
        }
    }

    /// Canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Jpeg => "jpg",
            Format::Png => "png",
            Format::Gif => "gif",
            Format::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("photo.jpg"), Format::Jpeg);
        assert_eq!(Format::from_extension("photo.JPEG"), Format::Jpeg);
        assert_eq!(Format::from_extension("icon.png"), Format::Png);
        assert_eq!(Format::from_extension("anim.gif"), Format::Gif);
        assert_eq!(Format::from_extension("scene.exr"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Format::Jpeg);
        assert_eq!(Format::from_bytes(&[0x89, 0x50, 0x4E, 0x47]), Format::Png);
        assert_eq!(Format::from_bytes(b"GIF89a"), Format::Gif);
        assert_eq!(Format::from_bytes(b"GIF87a"), Format::Gif);
        assert_eq!(Format::from_bytes(&[0x00, 0x01, 0x02, 0x03]), Format::Unknown);
        assert_eq!(Format::from_bytes(&[0xFF]), Format::Unknown);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Format::from_name("jpeg"), Format::Jpeg);
        assert_eq!(Format::from_name("JPG"), Format::Jpeg);
        assert_eq!(Format::from_name("png"), Format::Png);
        assert_eq!(Format::from_name("gif"), Format::Gif);
        assert_eq!(Format::from_name("webp"), Format::Unknown);
    }
}
