//! pixkit-transform - Geometric transformations for pixkit
//!
//! This crate provides:
//!
//! - [`PixelTransform`]: destination-to-source coordinate maps (closures,
//!   translations, lookup tables, affine/projective/bilinear models)
//! - [`InterpolatePixel`]: sub-pixel sampling with an explicit border path
//!   ([`NearestNeighborPixel`], [`BilinearPixel`])
//! - [`ImageDistort`]: the remapping engine, with render-all and validity
//!   mask options
//! - Affine, projective and bilinear warps of single-band images
//! - Orthogonal rotations and flips

pub mod affine;
pub mod bilinear;
pub mod distort;
mod error;
pub mod interpolate;
mod linalg;
pub mod model;
pub mod projective;
pub mod rotate;

pub use affine::{
    AffineMatrix, Point, affine, affine_pta, affine_rotate, affine_sampled, affine_sampled_pta,
    affine_scale, translate,
};
pub use bilinear::{BilinearCoeffs, bilinear, bilinear_pta, bilinear_sampled};
pub use distort::{ImageDistort, distort_gray};
pub use error::{TransformError, TransformResult};
pub use interpolate::{BilinearPixel, InterpolatePixel, NearestNeighborPixel};
pub use model::{CachedTransform, PixelTransform, Translation};
pub use projective::{
    ProjectiveCoeffs, projective, projective_pta, projective_sampled, projective_sampled_pta,
};
pub use rotate::{flip_lr, flip_tb, rotate_90, rotate_180, rotate_cw_in_place, rotate_orth};
