//! pixkit-core - Core data structures for pixkit
//!
//! This crate provides the fundamental data structures:
//!
//! - [`GrayImage`]: single-band image of any [`Pixel`] type
//! - [`InterleavedImage`]: multi-band image with interleaved samples
//! - [`BorderType`], [`GrayBorder`], [`InterleavedBorder`]: reads beyond the
//!   image edge
//! - [`misc`]: synthetic fills

pub mod border;
pub mod error;
pub mod image;
pub mod misc;
pub mod pixel;

pub use border::{BorderType, GrayBorder, InterleavedBorder, map_index};
pub use error::{Error, Result, check_same_shape};
pub use image::{AssignPixel, GrayImage, ImageBase, InterleavedImage};
pub use pixel::Pixel;
