pub mod ports;
pub mod shade_field;
pub mod sqrt_ramp;
