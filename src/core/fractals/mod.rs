pub mod errors;
pub mod escape_time;
pub mod fractal_kind;
pub mod frame_contract;
pub mod frame_kernel;
pub mod precision;
