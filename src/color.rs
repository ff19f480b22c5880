//! Pixel formats of the controller frame memory

use crate::config::Dimensions;
use crate::error::ConfigurationError;

/// How a panel stores pixels in controller RAM
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    /// One 1-bit plane (black/white)
    Monochrome,
    /// Two 1-bit planes: black/white plus a chromatic (red or yellow) plane
    TriColor,
    /// One plane, 4 bits per pixel (7-color ACeP)
    SevenColor,
}

impl ColorMode {
    /// Bits per pixel in each plane
    pub const fn bits_per_pixel(self) -> u64 {
        match self {
            ColorMode::Monochrome | ColorMode::TriColor => 1,
            ColorMode::SevenColor => 4,
        }
    }

    /// Number of planes transferred for one frame
    pub const fn planes(self) -> u64 {
        match self {
            ColorMode::Monochrome | ColorMode::SevenColor => 1,
            ColorMode::TriColor => 2,
        }
    }

    /// Bytes of frame data for the given dimensions
    ///
    /// Each plane is `width * height * bits_per_pixel / 8` bytes, rounded up.
    /// Fails if the result doesn't fit in `usize` on the target.
    pub fn buffer_len(self, dimensions: Dimensions) -> Result<usize, ConfigurationError> {
        dimensions
            .area()
            .checked_mul(self.bits_per_pixel())
            .map(|bits| bits.div_ceil(8))
            .and_then(|plane| plane.checked_mul(self.planes()))
            .and_then(|len| usize::try_from(len).ok())
            .ok_or(ConfigurationError::FrameTooLarge {
                width: dimensions.width,
                height: dimensions.height,
            })
    }
}
