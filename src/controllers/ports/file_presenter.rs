use std::path::Path;

use crate::core::data::grayscale_field::GrayscaleField;

pub trait FilePresenterPort {
    fn present(&self, field: &GrayscaleField, filepath: impl AsRef<Path>) -> std::io::Result<()>;

    /// File extension written by this presenter, without the dot.
    fn extension(&self) -> &'static str;
}
