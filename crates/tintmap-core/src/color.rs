//! Native device color representation.
//!
//! [`Rgba8`] is the 8-bit sRGB color as it appears in decoded image buffers.
//! It derives `Eq` and `Hash` so it can key the memoization cache: cache
//! lookups compare device colors bit for bit, never perceptually. Two
//! visually identical pixels with different alpha are distinct keys.

/// An 8-bit sRGB color with alpha.
///
/// # Example
///
/// ```rust
/// use tintmap_core::Rgba8;
///
/// let c = Rgba8::opaque(16, 16, 16);
/// assert_eq!(c.to_array(), [16, 16, 16, 255]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black (0, 0, 0, 255).
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Opaque white (255, 255, 255, 255).
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Creates a new color from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Creates a color from an `[r, g, b, a]` array.
    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Converts to an `[r, g, b, a]` array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

impl From<[u8; 4]> for Rgba8 {
    #[inline]
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Rgba8> for [u8; 4] {
    #[inline]
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_array_roundtrip() {
        let c = Rgba8::new(1, 2, 3, 4);
        assert_eq!(Rgba8::from_array(c.to_array()), c);
    }

    #[test]
    fn test_alpha_distinguishes_keys() {
        let mut map = HashMap::new();
        map.insert(Rgba8::new(10, 10, 10, 255), 1);
        map.insert(Rgba8::new(10, 10, 10, 128), 2);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Rgba8::BLACK.to_array(), [0, 0, 0, 255]);
        assert_eq!(Rgba8::WHITE.to_array(), [255, 255, 255, 255]);
    }
}
