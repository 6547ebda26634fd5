use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled, NeverCancel,
};
use crate::core::actions::shade_field::ports::intensity_map::IntensityMap;
use crate::core::data::grayscale_field::{GrayscaleField, GrayscaleFieldError};
use crate::core::data::pixel_rect::PixelRect;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShadeFieldError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error("grayscale field error: {0}")]
    Field(#[from] GrayscaleFieldError),
}

/// Maps row-major iteration counts to a [`GrayscaleField`].
pub fn shade_field<T, M>(
    input: &[T],
    map: &M,
    pixel_rect: PixelRect,
) -> Result<GrayscaleField, GrayscaleFieldError>
where
    T: Copy,
    M: IntensityMap<T>,
{
    shade_field_cancelable(input, map, pixel_rect, &NeverCancel).map_err(|e| match e {
        ShadeFieldError::Field(err) => err,
        ShadeFieldError::Cancelled(_) => {
            unreachable!("NeverCancel token should never signal cancellation")
        }
    })
}

/// Like [`shade_field`], polling `cancel` every
/// [`CANCEL_CHECK_INTERVAL_PIXELS`] values.
pub fn shade_field_cancelable<T, M, C>(
    input: &[T],
    map: &M,
    pixel_rect: PixelRect,
    cancel: &C,
) -> Result<GrayscaleField, ShadeFieldError>
where
    T: Copy,
    M: IntensityMap<T>,
    C: CancelToken,
{
    let mut intensities = Vec::with_capacity(input.len());

    for (i, &value) in input.iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
            return Err(ShadeFieldError::Cancelled(Cancelled));
        }

        intensities.push(map.intensity(value));
    }

    Ok(GrayscaleField::from_intensities(pixel_rect, intensities)?)
}
