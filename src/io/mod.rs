//! Audio I/O modules
//!
//! Decoding encoded bytes to sample grids using Symphonia.

pub mod decoder;
pub mod sample_buffer;
