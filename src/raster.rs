//! Occupancy raster environment.
//!
//! The simulated world is a 2D grayscale image where one luma value marks
//! impassable obstacle. The sensing pipeline only ever samples it by pixel
//! coordinate; there is no world/pixel transform, raster coordinates are the
//! world coordinates.

use std::path::Path;

use image::GrayImage;

use crate::core::Point2D;
use crate::error::Result;

/// Passive environment collaborator queried by the ray caster.
///
/// Out-of-bounds coordinates are never an obstacle; a ray leaving the raster
/// simply terminates without a hit.
pub trait Environment {
    /// Raster width in pixels
    fn width(&self) -> u32;

    /// Raster height in pixels
    fn height(&self) -> u32;

    /// Whether the pixel at the given coordinates is an obstacle.
    /// Must return `false` for coordinates outside the raster.
    fn is_obstacle(&self, px: i32, py: i32) -> bool;

    /// Whether a continuous coordinate lies within raster bounds.
    #[inline]
    fn contains(&self, point: Point2D) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width() as f32
            && point.y < self.height() as f32
    }
}

/// Occupancy raster backed by a grayscale image.
///
/// A pixel is an obstacle when its luma equals the configured mask value
/// (color-equality test, matching how sensor hardware mockups treat a
/// binarized map).
pub struct RasterMap {
    pixels: GrayImage,
    mask: u8,
}

impl RasterMap {
    /// Luma value used for obstacle pixels by the synthetic constructors.
    pub const DEFAULT_MASK: u8 = 255;

    /// Create a raster map from an already-loaded image.
    pub fn new(pixels: GrayImage, mask: u8) -> Self {
        Self { pixels, mask }
    }

    /// Build a synthetic raster from an occupancy predicate.
    ///
    /// Used by tests and benchmarks to describe walls directly.
    pub fn from_fn<F>(width: u32, height: u32, occupied: F) -> Self
    where
        F: Fn(u32, u32) -> bool,
    {
        let pixels = GrayImage::from_fn(width, height, |x, y| {
            if occupied(x, y) {
                image::Luma([Self::DEFAULT_MASK])
            } else {
                image::Luma([0u8])
            }
        });
        Self::new(pixels, Self::DEFAULT_MASK)
    }

    /// Load a raster map from an image file, converting to grayscale.
    ///
    /// `mask` is the luma value marking obstacle pixels after conversion.
    pub fn load<P: AsRef<Path>>(path: P, mask: u8) -> Result<Self> {
        let pixels = image::open(path)?.into_luma8();
        Ok(Self::new(pixels, mask))
    }

    /// Count obstacle pixels (renderers use this to cap the obstacle layer).
    pub fn obstacle_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[0] == self.mask).count()
    }

    /// Iterate over obstacle pixel coordinates.
    pub fn obstacles(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pixels
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] == self.mask)
            .map(|(x, y, _)| (x, y))
    }
}

impl Environment for RasterMap {
    #[inline]
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    fn is_obstacle(&self, px: i32, py: i32) -> bool {
        if px < 0 || py < 0 || px as u32 >= self.pixels.width() || py as u32 >= self.pixels.height()
        {
            return false;
        }
        self.pixels.get_pixel(px as u32, py as u32).0[0] == self.mask
    }
}
