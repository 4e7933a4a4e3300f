//! pixkit-morph - Binary morphology for pixkit
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Hit-miss transform for pattern detection
//! - Iterative binary thinning (skeletonization) with a fixed family of
//!   eight 3x3 masks
//!
//! Binary images are `GrayImage<u8>` with values 0 and 1.

pub mod binary;
mod error;
pub mod sel;
pub mod thin;
pub mod thin_sels;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::hit_miss_transform;

// Re-export thinning
pub use thin::{BinaryThinning, find_one_pixels, thin};
pub use thin_sels::{NUM_THIN_MASKS, ThinMask, thin_masks};
