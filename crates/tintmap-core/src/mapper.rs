//! Per-pixel nearest-palette mapping.
//!
//! The algorithmic heart of the engine: convert a pixel to Lab, linear-scan
//! the palette for the closest entry, blend toward it by the configured
//! affinity, and convert back to a native pixel.

use crate::color::Rgba8;
use crate::lab::Lab;
use crate::palette::Palette;

/// Maps one pixel color to its palette-blended result.
///
/// Pure and deterministic for a fixed palette and affinity; the whole-image
/// cache relies on that.
///
/// # Example
///
/// ```rust
/// use tintmap_core::{Palette, PixelMapper, Rgba8};
///
/// let palette = Palette::from_hex(["#000000", "#ffffff"]).unwrap();
/// let mapper = PixelMapper::new(palette, 1.0);
///
/// // Dark gray is much closer to black in Lab lightness.
/// assert_eq!(mapper.map(Rgba8::opaque(16, 16, 16)), Rgba8::BLACK);
/// ```
#[derive(Debug, Clone)]
pub struct PixelMapper {
    palette: Palette,
    affinity: f32,
}

impl PixelMapper {
    /// Creates a mapper over the given palette.
    ///
    /// `affinity` is not clamped; values outside [0, 1] extrapolate past
    /// (or away from) the nearest palette color.
    pub fn new(palette: Palette, affinity: f32) -> Self {
        Self { palette, affinity }
    }

    /// The configured affinity.
    #[inline]
    pub fn affinity(&self) -> f32 {
        self.affinity
    }

    /// The palette this mapper searches.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Maps a source pixel to its destination color.
    ///
    /// The nearest entry is found by Lab distance with a strict `<`
    /// comparison, so among equally distant entries the earliest
    /// configured one always wins. Source alpha passes through unchanged.
    pub fn map(&self, source: Rgba8) -> Rgba8 {
        let target = Lab::from_rgba(source);

        let mut min_distance = f32::INFINITY;
        let mut nearest = target;
        for entry in self.palette.entries() {
            let distance = target.distance(entry.lab());
            if distance < min_distance {
                min_distance = distance;
                nearest = entry.lab();
            }
        }

        target.lerp(nearest, self.affinity).to_rgba(source.a)
    }
}
