pub mod actions;
pub mod budget;
pub mod camera;
pub mod data;
pub mod fractals;
