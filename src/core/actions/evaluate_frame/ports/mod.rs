pub mod pixel_kernel;
