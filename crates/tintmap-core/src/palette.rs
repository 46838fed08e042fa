//! Palette of reference colors.
//!
//! A palette is an ordered, non-empty sequence of colors, typically given
//! as hex strings in the settings file. Each entry keeps both the native
//! color and its Lab form, converted once at load so the per-pixel search
//! never re-derives palette coordinates.
//!
//! Order matters: when two entries are equally distant from a target, the
//! earlier one wins. The sequence is read-only for the lifetime of a run.

use crate::color::Rgba8;
use crate::error::{Error, Result};
use crate::lab::Lab;

/// One palette color in both native and perceptual form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    native: Rgba8,
    lab: Lab,
}

impl PaletteEntry {
    /// The color as configured, in device sRGB.
    #[inline]
    pub fn native(&self) -> Rgba8 {
        self.native
    }

    /// The precomputed Lab coordinates.
    #[inline]
    pub fn lab(&self) -> Lab {
        self.lab
    }
}

/// An ordered, non-empty set of reference colors.
///
/// # Example
///
/// ```rust
/// use tintmap_core::Palette;
///
/// let palette = Palette::from_hex(["#000000", "#ffffff"]).unwrap();
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Builds a palette from native colors, converting each to Lab once.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPalette`] if `colors` is empty. An empty palette has
    /// no nearest entry, so it is rejected here rather than mid-run.
    pub fn new(colors: Vec<Rgba8>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        let entries = colors
            .into_iter()
            .map(|native| PaletteEntry {
                native,
                lab: Lab::from_rgba(native),
            })
            .collect();
        Ok(Self { entries })
    }

    /// Builds a palette from hex color specifications.
    ///
    /// A single malformed entry fails the whole load.
    pub fn from_hex<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = specs
            .into_iter()
            .map(|s| parse_hex(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// The entries in configured order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Number of entries, always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a constructed palette cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Parses a hex color specification into a native color.
///
/// Accepts `#rrggbb` and the `#rgb` shorthand, case-insensitive, with the
/// leading `#` optional. The result is always fully opaque.
///
/// # Example
///
/// ```rust
/// use tintmap_core::{parse_hex, Rgba8};
///
/// assert_eq!(parse_hex("#101010").unwrap(), Rgba8::opaque(16, 16, 16));
/// assert_eq!(parse_hex("fff").unwrap(), Rgba8::WHITE);
/// ```
pub fn parse_hex(spec: &str) -> Result<Rgba8> {
    let digits = spec.strip_prefix('#').unwrap_or(spec);
    if !digits.is_ascii() {
        return Err(Error::invalid_hex(spec, "non-ASCII characters"));
    }

    let parse2 = |s: &str| {
        u8::from_str_radix(s, 16)
            .map_err(|_| Error::invalid_hex(spec, format!("invalid hex digits {:?}", s)))
    };

    match digits.len() {
        6 => Ok(Rgba8::opaque(
            parse2(&digits[0..2])?,
            parse2(&digits[2..4])?,
            parse2(&digits[4..6])?,
        )),
        3 => {
            let expand = |s: &str| -> Result<u8> {
                let v = u8::from_str_radix(s, 16)
                    .map_err(|_| Error::invalid_hex(spec, format!("invalid hex digit {:?}", s)))?;
                Ok(v * 17)
            };
            Ok(Rgba8::opaque(
                expand(&digits[0..1])?,
                expand(&digits[1..2])?,
                expand(&digits[2..3])?,
            ))
        }
        n => Err(Error::invalid_hex(
            spec,
            format!("expected 3 or 6 hex digits, got {}", n),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_full() {
        assert_eq!(parse_hex("#000000").unwrap(), Rgba8::BLACK);
        assert_eq!(parse_hex("#ffffff").unwrap(), Rgba8::WHITE);
        assert_eq!(parse_hex("#1A2b3C").unwrap(), Rgba8::opaque(0x1a, 0x2b, 0x3c));
        assert_eq!(parse_hex("808080").unwrap(), Rgba8::opaque(128, 128, 128));
    }

    #[test]
    fn test_parse_hex_shorthand() {
        assert_eq!(parse_hex("#f00").unwrap(), Rgba8::opaque(255, 0, 0));
        assert_eq!(parse_hex("#abc").unwrap(), Rgba8::opaque(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_parse_hex_malformed() {
        assert!(parse_hex("#zz0000").is_err());
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("").is_err());
        assert!(parse_hex("#").is_err());
        assert!(parse_hex("#日本").is_err());
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = Palette::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyPalette));
        let err = Palette::from_hex(Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyPalette));
    }

    #[test]
    fn test_one_bad_entry_fails_load() {
        let err = Palette::from_hex(["#000000", "not-a-color", "#ffffff"]).unwrap_err();
        assert!(matches!(err, Error::InvalidHexColor { .. }));
    }

    #[test]
    fn test_order_preserved() {
        let palette = Palette::from_hex(["#ff0000", "#00ff00", "#0000ff"]).unwrap();
        let natives: Vec<_> = palette.entries().iter().map(|e| e.native()).collect();
        assert_eq!(
            natives,
            vec![
                Rgba8::opaque(255, 0, 0),
                Rgba8::opaque(0, 255, 0),
                Rgba8::opaque(0, 0, 255),
            ]
        );
    }

    #[test]
    fn test_lab_precomputed() {
        let palette = Palette::from_hex(["#ffffff"]).unwrap();
        let entry = palette.entries()[0];
        assert!((entry.lab().l - 100.0).abs() < 1e-3);
    }
}
