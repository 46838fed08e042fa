//! CIE L\*a\*b\* color model and perceptual distance.
//!
//! All palette matching and blending happens in L\*a\*b\* (D65 white point),
//! where Euclidean distance approximates perceived color difference. The
//! conversion chain is sRGB 8-bit → linear light (IEC 61966-2-1 EOTF) →
//! CIE XYZ → Lab, and back.
//!
//! # Range
//!
//! - L: [0, 100] for in-gamut input (0 = black, 100 = white)
//! - a, b: roughly [-128, 128]
//!
//! Blends with an affinity outside [0, 1] can leave these ranges; the
//! return conversion clamps linear light to [0, 1] so the result always
//! decodes to a valid pixel.
//!
//! # Reference
//!
//! IEC 61966-2-1:1999 (sRGB), CIE 15:2004 (Lab)

use crate::color::Rgba8;

// D65 reference white.
const WHITE_X: f32 = 0.95047;
const WHITE_Y: f32 = 1.0;
const WHITE_Z: f32 = 1.08883;

// Lab segment boundary: delta = 6/29.
const DELTA: f32 = 6.0 / 29.0;
const DELTA_CUBED: f32 = DELTA * DELTA * DELTA;

/// sRGB EOTF: decodes a gamma-encoded value to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
#[inline]
pub fn srgb_eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: encodes linear light back to gamma-encoded sRGB.
#[inline]
pub fn srgb_oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > DELTA_CUBED {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// A color in CIE L\*a\*b\* space.
///
/// Immutable once constructed. Colors are compared only through
/// [`Lab::distance`]; raw channel equality is meaningless here because
/// the device-color cache already handles exact-key lookups.
///
/// # Example
///
/// ```rust
/// use tintmap_core::{Lab, Rgba8};
///
/// let black = Lab::from_rgba(Rgba8::BLACK);
/// let white = Lab::from_rgba(Rgba8::WHITE);
/// assert!(black.distance(white) > 99.0);
/// assert_eq!(black.distance(black), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness.
    pub l: f32,
    /// Green-red opponent axis.
    pub a: f32,
    /// Blue-yellow opponent axis.
    pub b: f32,
}

impl Lab {
    /// Creates a Lab color from raw coordinates.
    #[inline]
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Converts a native sRGB pixel to Lab. Alpha is ignored.
    pub fn from_rgba(c: Rgba8) -> Self {
        let r = srgb_eotf(c.r as f32 / 255.0);
        let g = srgb_eotf(c.g as f32 / 255.0);
        let b = srgb_eotf(c.b as f32 / 255.0);

        // Linear sRGB to XYZ (D65).
        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Converts back to a native sRGB pixel, attaching the given alpha.
    ///
    /// Out-of-gamut coordinates (extrapolated blends) clamp to the sRGB
    /// cube; in-gamut 8-bit colors round-trip exactly.
    pub fn to_rgba(self, alpha: u8) -> Rgba8 {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let x = WHITE_X * lab_f_inv(fx);
        let y = WHITE_Y * lab_f_inv(fy);
        let z = WHITE_Z * lab_f_inv(fz);

        // XYZ to linear sRGB (D65).
        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

        Rgba8::new(
            encode_channel(r),
            encode_channel(g),
            encode_channel(b),
            alpha,
        )
    }

    /// Euclidean distance between two Lab colors.
    ///
    /// Non-negative, symmetric, zero for identical colors, and satisfies
    /// the triangle inequality.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// Linear interpolation toward `other` by factor `t`.
    ///
    /// `t` is not clamped: values outside [0, 1] extrapolate beyond or
    /// short of `other`, matching the affinity contract.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// Clamps a linear channel to [0, 1], encodes it, and quantizes to 8 bits.
#[inline]
fn encode_channel(linear: f32) -> u8 {
    (srgb_oetf(linear.clamp(0.0, 1.0)) * 255.0 + 0.5) as u8
}
