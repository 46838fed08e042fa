//! Run configuration loaded from YAML.
//!
//! The settings document provides the palette (hex strings), the blend
//! affinity, and an optional worker-count override:
//!
//! ```yaml
//! palette:
//!   - "#282828"
//!   - "#cc241d"
//!   - "#ebdbb2"
//! palette-affinity: 0.8
//! cpus: 4
//! ```
//!
//! Hex entries are parsed during deserialization, so a malformed entry
//! fails the whole document load; no partial or best-effort settings are
//! ever used. Settings are immutable once loaded.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::color::Rgba8;
use crate::error::Result;
use crate::palette::{parse_hex, Palette};

/// A palette entry parsed from its hex notation.
///
/// Thin wrapper so serde rejects malformed colors at load time instead of
/// leaving strings around to fail later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub Rgba8);

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let spec = String::deserialize(deserializer)?;
        parse_hex(&spec)
            .map(HexColor)
            .map_err(serde::de::Error::custom)
    }
}

/// Immutable run configuration.
///
/// # Example
///
/// ```rust
/// use tintmap_core::Settings;
///
/// let settings = Settings::from_yaml_str(
///     "palette: [\"#000000\", \"#ffffff\"]\npalette-affinity: 1.0\n",
/// ).unwrap();
/// assert_eq!(settings.palette.len(), 2);
/// assert_eq!(settings.cpus, 0);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Ordered palette colors; order is significant for tie-breaking.
    pub palette: Vec<HexColor>,

    /// Blend factor toward the nearest palette color.
    ///
    /// 0 leaves pixels unchanged, 1 replaces them outright; values outside
    /// [0, 1] are honored literally and extrapolate.
    #[serde(rename = "palette-affinity", default)]
    pub palette_affinity: f32,

    /// Worker-count override; 0 or absent means host parallelism.
    #[serde(default)]
    pub cpus: usize,
}

impl Settings {
    /// Parses settings from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&raw)
    }

    /// Builds the [`Palette`] for this configuration.
    ///
    /// # Errors
    ///
    /// [`crate::Error::EmptyPalette`] if no colors were configured.
    pub fn build_palette(&self) -> Result<Palette> {
        Palette::new(self.palette.iter().map(|h| h.0).collect())
    }
}
