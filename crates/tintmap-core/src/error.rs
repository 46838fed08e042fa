//! Error types for the palette mapping engine.
//!
//! Configuration problems (bad hex entries, empty palettes, unreadable
//! settings) are all surfaced before any pixel work starts; the mapping
//! itself is total over well-formed colors and cannot fail mid-run.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running a mapping.
#[derive(Debug, Error)]
pub enum Error {
    /// A palette entry that does not parse as a hex color.
    ///
    /// One malformed entry fails the whole settings load; entries are never
    /// silently dropped.
    #[error("invalid hex color {entry:?}: {reason}")]
    InvalidHexColor {
        /// The offending entry as written in the configuration.
        entry: String,
        /// Why it failed to parse.
        reason: String,
    },

    /// A successfully parsed but zero-length palette.
    ///
    /// The nearest-neighbor search has no defined winner for an empty
    /// palette, so this is rejected at construction time.
    #[error("palette must contain at least one color")]
    EmptyPalette,

    /// The settings document could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings document could not be parsed.
    #[error("failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A pixel buffer whose length disagrees with the stated dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The worker pool could not be constructed.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl Error {
    /// Creates an [`Error::InvalidHexColor`] error.
    #[inline]
    pub fn invalid_hex(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHexColor {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a configuration error (as opposed to I/O).
    #[inline]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHexColor { .. } | Self::EmptyPalette | Self::Yaml(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hex_message() {
        let err = Error::invalid_hex("#zz0000", "invalid digit");
        let msg = err.to_string();
        assert!(msg.contains("#zz0000"));
        assert!(msg.contains("invalid digit"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_empty_palette_is_config_error() {
        assert!(Error::EmptyPalette.is_config_error());
    }

    #[test]
    fn test_io_is_not_config_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(!err.is_config_error());
    }
}
