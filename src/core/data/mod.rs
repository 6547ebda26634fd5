pub mod complex;
pub mod grayscale_field;
pub mod pixel_rect;
pub mod point;
pub mod scene;
pub mod split_complex;
pub mod split_double;
pub mod viewport;
