pub mod evaluate_frame_parallel;
pub mod evaluate_frame_serial;
pub mod ports;
