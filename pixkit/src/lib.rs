//! pixkit - Image distortion and binary thinning
//!
//! # Overview
//!
//! - Geometric distortion: render a source image through any per-pixel
//!   transform with nearest-neighbor or bilinear sampling, with optional
//!   validity masks
//! - Warps: affine, projective, bilinear and orthogonal rotations
//! - Binary morphology: structuring elements, hit-miss transform and
//!   iterative thinning
//!
//! # Example
//!
//! ```
//! use pixkit::GrayImage;
//! use pixkit::morph::thin;
//!
//! // a 3-pixel thick bar thins to a 1-pixel line
//! let bar = GrayImage::from_fn(20, 25, |_, y| (5..=7).contains(&y) as u8).unwrap();
//! let line = thin(&bar, None).unwrap();
//! assert_eq!(line.count_nonzero(), 18);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixkit_morph as morph;
pub use pixkit_transform as transform;
