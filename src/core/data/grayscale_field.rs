use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrayscaleFieldError {
    #[error("pixel at x:{}, y:{} is outside the field", .pixel.x, .pixel.y)]
    PixelOutsideBounds { pixel: Point, pixel_rect: PixelRect },

    #[error("field of {expected} pixels cannot hold {actual} intensities")]
    BoundsMismatch { expected: usize, actual: usize },
}

/// One 8-bit intensity per pixel, row-major over its [`PixelRect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleField {
    pixel_rect: PixelRect,
    intensities: Vec<u8>,
}

impl GrayscaleField {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            intensities: vec![0; pixel_rect.pixel_count()],
        }
    }

    pub fn from_intensities(
        pixel_rect: PixelRect,
        intensities: Vec<u8>,
    ) -> Result<Self, GrayscaleFieldError> {
        if intensities.len() != pixel_rect.pixel_count() {
            return Err(GrayscaleFieldError::BoundsMismatch {
                expected: pixel_rect.pixel_count(),
                actual: intensities.len(),
            });
        }

        Ok(Self {
            pixel_rect,
            intensities,
        })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn intensities(&self) -> &[u8] {
        &self.intensities
    }

    #[must_use]
    pub fn intensity_at(&self, pixel: Point) -> Option<u8> {
        self.pixel_rect
            .index_of(pixel)
            .map(|index| self.intensities[index])
    }

    pub fn set_intensity(&mut self, pixel: Point, value: u8) -> Result<(), GrayscaleFieldError> {
        let index = self
            .pixel_rect
            .index_of(pixel)
            .ok_or(GrayscaleFieldError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            })?;

        self.intensities[index] = value;
        Ok(())
    }

    /// Mean intensity, handy for coarse image comparisons.
    #[must_use]
    pub fn mean_intensity(&self) -> f64 {
        let total: u64 = self.intensities.iter().map(|&v| u64::from(v)).sum();
        total as f64 / self.intensities.len() as f64
    }
}
