//! Full-image mapping on a fixed worker pool.
//!
//! Rows are the unit of work: the destination buffer is split into
//! disjoint row slices handed to a pool of long-lived workers, so every
//! coordinate is written exactly once by exactly one worker and no
//! synchronization is needed on the buffer itself. Whichever worker is
//! free claims the next pending row; assignment order is unspecified and
//! has no observable effect.
//!
//! The call blocks until every row has been fully processed, then returns
//! the finished buffer. Partial results are never exposed.

use rayon::prelude::*;
use tracing::debug;

use crate::cache::ColorCache;
use crate::color::Rgba8;
use crate::error::{Error, Result};
use crate::mapper::PixelMapper;
use crate::settings::Settings;

/// Bytes per RGBA pixel.
const PIXEL_STRIDE: usize = 4;

/// Whole-image palette mapper.
///
/// Owns the per-pixel mapper and the worker pool; a fresh [`ColorCache`]
/// is created for every run so results never leak between images.
///
/// # Example
///
/// ```rust
/// use tintmap_core::{ImageMapper, Settings};
///
/// let settings = Settings::from_yaml_str(
///     "palette: [\"#000000\", \"#ffffff\"]\npalette-affinity: 1.0\n",
/// ).unwrap();
/// let mapper = ImageMapper::new(&settings).unwrap();
///
/// let src = vec![16u8, 16, 16, 255]; // one dark gray pixel
/// let dst = mapper.map_rgba(&src, 1, 1).unwrap();
/// assert_eq!(dst, vec![0, 0, 0, 255]);
/// ```
#[derive(Debug)]
pub struct ImageMapper {
    mapper: PixelMapper,
    pool: rayon::ThreadPool,
    workers: usize,
}

impl ImageMapper {
    /// Builds a mapper from settings, using the configured `cpus` value.
    ///
    /// # Errors
    ///
    /// Fails on an empty palette or if the worker pool cannot be built.
    /// Both happen before any pixel is touched.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_workers(settings, settings.cpus)
    }

    /// Builds a mapper with an explicit worker count.
    ///
    /// `workers == 0` means the host's available parallelism.
    pub fn with_workers(settings: &Settings, workers: usize) -> Result<Self> {
        let palette = settings.build_palette()?;
        let mapper = PixelMapper::new(palette, settings.palette_affinity);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        let workers = pool.current_num_threads();

        debug!(
            workers,
            palette = mapper.palette().len(),
            affinity = mapper.affinity(),
            "image mapper ready"
        );

        Ok(Self {
            mapper,
            pool,
            workers,
        })
    }

    /// Number of workers in the pool.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Maps an RGBA8 pixel buffer, returning a new buffer of equal size.
    ///
    /// `src` holds `width * height` pixels, 4 bytes each, rows top to
    /// bottom. Row processing order across workers is unspecified; within
    /// a row, columns are processed left to right. Output is bit-identical
    /// for any worker count.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if the buffer length disagrees with
    /// `width * height`.
    pub fn map_rgba(&self, src: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(PIXEL_STRIDE))
            .ok_or_else(|| Error::InvalidDimensions("pixel count overflows".into()))?;
        if src.len() != expected {
            return Err(Error::InvalidDimensions(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                src.len()
            )));
        }

        let cache = ColorCache::new();
        let mut dst = vec![0u8; src.len()];
        let row_len = width as usize * PIXEL_STRIDE;

        if row_len == 0 {
            return Ok(dst);
        }

        self.pool.install(|| {
            dst.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, dst_row)| {
                    let src_row = &src[y * row_len..(y + 1) * row_len];
                    for x in 0..width as usize {
                        let i = x * PIXEL_STRIDE;
                        let pixel = Rgba8::new(
                            src_row[i],
                            src_row[i + 1],
                            src_row[i + 2],
                            src_row[i + 3],
                        );
                        let mapped = cache.get_or_compute(pixel, || self.mapper.map(pixel));
                        dst_row[i..i + PIXEL_STRIDE].copy_from_slice(&mapped.to_array());
                    }
                });
        });

        debug!(
            width,
            height,
            distinct_colors = cache.len(),
            "image mapped"
        );

        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(yaml: &str) -> Settings {
        Settings::from_yaml_str(yaml).expect("settings")
    }

    fn checkerboard(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                if (x + y) % 2 == 0 {
                    buf.extend_from_slice(&[16, 16, 16, 255]);
                } else {
                    buf.extend_from_slice(&[240, 240, 240, 255]);
                }
            }
        }
        buf
    }

    #[test]
    fn test_empty_palette_fails_before_mapping() {
        let s = settings("palette: []\n");
        assert!(matches!(ImageMapper::new(&s), Err(Error::EmptyPalette)));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let s = settings("palette: [\"#000000\"]\n");
        let m = ImageMapper::new(&s).expect("mapper");
        assert!(m.map_rgba(&[0u8; 15], 2, 2).is_err());
    }

    #[test]
    fn test_full_mapping_black_white() {
        let s = settings("palette: [\"#000000\", \"#ffffff\"]\npalette-affinity: 1.0\n");
        let m = ImageMapper::new(&s).expect("mapper");

        let src = checkerboard(8, 6);
        let dst = m.map_rgba(&src, 8, 6).expect("map");

        for (y, row) in dst.chunks(8 * 4).enumerate() {
            for (x, px) in row.chunks(4).enumerate() {
                let expected: &[u8] = if (x + y) % 2 == 0 {
                    &[0, 0, 0, 255]
                } else {
                    &[255, 255, 255, 255]
                };
                assert_eq!(px, expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_worker_counts_agree() {
        // 1 worker, 2 workers, and more workers than rows must all produce
        // the same buffer with every coordinate written.
        let s = settings("palette: [\"#223344\", \"#ddeeff\"]\npalette-affinity: 0.6\n");
        let src = checkerboard(16, 5);

        let reference = ImageMapper::with_workers(&s, 1)
            .expect("mapper")
            .map_rgba(&src, 16, 5)
            .expect("map");

        for workers in [2, 32] {
            let out = ImageMapper::with_workers(&s, workers)
                .expect("mapper")
                .map_rgba(&src, 16, 5)
                .expect("map");
            assert_eq!(out, reference, "{} workers", workers);
        }

        // Every coordinate written: alpha is 255 everywhere in the source,
        // and mapped pixels keep it, so no zeroed pixel can survive.
        assert!(reference.chunks(4).all(|px| px[3] == 255));
        assert_eq!(reference.len(), 16 * 5 * 4);
    }

    #[test]
    fn test_repeated_color_maps_identically() {
        let s = settings("palette: [\"#804020\"]\npalette-affinity: 0.5\n");
        let m = ImageMapper::new(&s).expect("mapper");

        // Same source color at many coordinates.
        let src: Vec<u8> = std::iter::repeat([10u8, 200, 60, 255])
            .take(64)
            .flatten()
            .collect();
        let dst = m.map_rgba(&src, 8, 8).expect("map");

        let first = &dst[0..4];
        assert!(dst.chunks(4).all(|px| px == first));

        // And the cache is transparent: a direct mapper call agrees.
        let direct = m.mapper.map(Rgba8::opaque(10, 200, 60));
        assert_eq!(first, &direct.to_array()[..]);
    }

    #[test]
    fn test_zero_affinity_is_identity() {
        let s = settings("palette: [\"#ff00ff\"]\npalette-affinity: 0.0\n");
        let m = ImageMapper::new(&s).expect("mapper");

        let src = checkerboard(4, 4);
        let dst = m.map_rgba(&src, 4, 4).expect("map");
        assert_eq!(dst, src);
    }

    #[test]
    fn test_empty_image() {
        let s = settings("palette: [\"#000000\"]\n");
        let m = ImageMapper::new(&s).expect("mapper");
        assert_eq!(m.map_rgba(&[], 0, 0).expect("map"), Vec::<u8>::new());
        assert_eq!(m.map_rgba(&[], 0, 7).expect("map"), Vec::<u8>::new());
    }
}
