//! # tintmap-core
//!
//! Palette mapping engine for image theming.
//!
//! This crate maps every pixel of an image to the closest color of a
//! configured palette, blended toward the original by an affinity factor.
//! Distances are measured in CIE L\*a\*b\*, where Euclidean distance tracks
//! perceived color difference far better than device RGB.
//!
//! The pieces, bottom up:
//!
//! - [`Rgba8`] - native device color, also the memoization key
//! - [`Lab`] - perceptual color with sRGB conversion and distance metric
//! - [`Palette`] - ordered, non-empty set of reference colors
//! - [`Settings`] - YAML-backed run configuration
//! - [`PixelMapper`] - nearest-palette search plus blend for one pixel
//! - [`ColorCache`] - concurrent memo table keyed by source color
//! - [`ImageMapper`] - full-image transform on a fixed worker pool
//!
//! # Quick Start
//!
//! ```rust
//! use tintmap_core::{ImageMapper, Settings};
//!
//! let settings = Settings::from_yaml_str(
//!     "palette:\n  - \"#282828\"\n  - \"#ebdbb2\"\npalette-affinity: 0.8\n",
//! ).unwrap();
//!
//! let mapper = ImageMapper::new(&settings).unwrap();
//! let src = vec![128u8; 4 * 4 * 4]; // 4x4 RGBA
//! let dst = mapper.map_rgba(&src, 4, 4).unwrap();
//! assert_eq!(dst.len(), src.len());
//! ```
//!
//! # Determinism
//!
//! For a fixed palette and affinity the mapping is a pure function of the
//! source color. The cache and the parallel row scheduler are optimizations
//! only; output is bit-identical for any worker count.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod color;
pub mod engine;
pub mod error;
pub mod lab;
pub mod mapper;
pub mod palette;
pub mod settings;

pub use cache::ColorCache;
pub use color::Rgba8;
pub use engine::ImageMapper;
pub use error::{Error, Result};
pub use lab::Lab;
pub use mapper::PixelMapper;
pub use palette::{parse_hex, Palette, PaletteEntry};
pub use settings::{HexColor, Settings};
