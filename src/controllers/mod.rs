pub mod cli;
pub mod frame_clock;
pub mod ports;
pub mod render_loop;
pub mod session;
