//! Affine transformations for images
//!
//! This module provides:
//! - Affine matrix construction (identity, translation, scale, rotation,
//!   3 point correspondences)
//! - Inverse and composition
//! - Interpolated and sampled affine warps built on [`ImageDistort`](crate::ImageDistort)
//!
//! # Affine Matrix
//!
//! An affine transformation can be represented as:
//! ```text
//! | a  b  tx |
//! | c  d  ty |
//! | 0  0  1  |
//! ```
//!
//! The transformation equations are:
//! ```text
//! x' = a*x + b*y + tx
//! y' = c*x + d*y + ty
//! ```
//!
//! The warp functions take a matrix that maps *destination* pixels to
//! *source* coordinates, which is the direction the distortion engine
//! samples in. The `*_pta` variants build that matrix from point pairs.

use pixkit_core::{BorderType, GrayImage, Pixel};

use crate::distort::distort_gray;
use crate::interpolate::{BilinearPixel, NearestNeighborPixel};
use crate::linalg::solve;
use crate::model::PixelTransform;
use crate::{TransformError, TransformResult};

/// Determinants smaller than this are treated as zero
const DET_EPS: f32 = 1.0e-10;

/// A 2D point with floating-point coordinates
///
/// Used as control points for affine, bilinear, and projective transformations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D affine transformation matrix (6 coefficients)
///
/// Represents the transformation:
/// ```text
/// x' = coeffs[0]*x + coeffs[1]*y + coeffs[2]
/// y' = coeffs[3]*x + coeffs[4]*y + coeffs[5]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AffineMatrix {
    /// Coefficients [a, b, tx, c, d, ty]
    coeffs: [f32; 6],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// Create the identity transformation
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Create from raw coefficients
    pub fn from_coeffs(coeffs: [f32; 6]) -> Self {
        Self { coeffs }
    }

    /// Get the raw coefficients
    pub fn coeffs(&self) -> &[f32; 6] {
        &self.coeffs
    }

    /// Create a translation matrix
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            coeffs: [1.0, 0.0, tx, 0.0, 1.0, ty],
        }
    }

    /// Create a scaling matrix
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            coeffs: [sx, 0.0, 0.0, 0.0, sy, 0.0],
        }
    }

    /// Create a rotation matrix about a given center
    ///
    /// # Arguments
    /// * `center_x`, `center_y` - Fixed point of the rotation
    /// * `angle` - Rotation angle in radians; positive turns +x toward +y
    pub fn rotation(center_x: f32, center_y: f32, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            coeffs: [
                cos,
                -sin,
                center_x - cos * center_x + sin * center_y,
                sin,
                cos,
                center_y - sin * center_x - cos * center_y,
            ],
        }
    }

    /// Compute the affine matrix mapping three source points onto three
    /// destination points
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` if the source points are
    /// collinear.
    pub fn from_three_points(src_pts: [Point; 3], dst_pts: [Point; 3]) -> TransformResult<Self> {
        let mut a = [[0.0f64; 3]; 3];
        let mut bx = [0.0f64; 3];
        let mut by = [0.0f64; 3];
        for i in 0..3 {
            a[i] = [src_pts[i].x as f64, src_pts[i].y as f64, 1.0];
            bx[i] = dst_pts[i].x as f64;
            by[i] = dst_pts[i].y as f64;
        }
        let [ca, cb, ctx] = solve(a, bx)?;
        let [cc, cd, cty] = solve(a, by)?;
        Ok(Self::from_coeffs([
            ca as f32, cb as f32, ctx as f32, cc as f32, cd as f32, cty as f32,
        ]))
    }

    /// Compute the inverse transformation
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` if the linear part has a
    /// zero determinant.
    pub fn inverse(&self) -> TransformResult<Self> {
        let [a, b, tx, c, d, ty] = self.coeffs;
        let det = a * d - b * c;
        if det.abs() < DET_EPS {
            return Err(TransformError::SingularMatrix);
        }
        let ia = d / det;
        let ib = -b / det;
        let ic = -c / det;
        let id = a / det;
        Ok(Self::from_coeffs([
            ia,
            ib,
            -(ia * tx + ib * ty),
            ic,
            id,
            -(ic * tx + id * ty),
        ]))
    }

    /// Compose two affine transformations (self * other)
    ///
    /// The result applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        let [sa, sb, stx, sc, sd, sty] = self.coeffs;
        let [oa, ob, otx, oc, od, oty] = other.coeffs;
        Self::from_coeffs([
            sa * oa + sb * oc,
            sa * ob + sb * od,
            sa * otx + sb * oty + stx,
            sc * oa + sd * oc,
            sc * ob + sd * od,
            sc * otx + sd * oty + sty,
        ])
    }

    /// Transform a point through this matrix
    pub fn transform_point(&self, pt: Point) -> Point {
        let (x, y) = self.transform_point_float(pt.x, pt.y);
        Point::new(x, y)
    }

    /// Transform a point returning float coordinates
    #[inline]
    pub fn transform_point_float(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, tx, c, d, ty] = self.coeffs;
        (a * x + b * y + tx, c * x + d * y + ty)
    }
}

impl PixelTransform for AffineMatrix {
    #[inline]
    fn compute(&mut self, x: i32, y: i32) -> (f32, f32) {
        self.transform_point_float(x as f32, y as f32)
    }
}

/// Apply sampled affine transformation using a matrix
///
/// `matrix` maps destination pixels to source coordinates.
pub fn affine_sampled<T: Pixel>(
    src: &GrayImage<T>,
    matrix: &AffineMatrix,
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    distort_gray(src, matrix.clone(), NearestNeighborPixel::new(fill))
}

/// Apply sampled affine transformation using point correspondences
///
/// # Arguments
/// * `src` - Input image
/// * `src_pts` - 3 source points
/// * `dst_pts` - 3 destination points, where the source points end up
/// * `fill` - Border policy for pixels that map outside the source
pub fn affine_sampled_pta<T: Pixel>(
    src: &GrayImage<T>,
    src_pts: [Point; 3],
    dst_pts: [Point; 3],
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    let matrix = AffineMatrix::from_three_points(dst_pts, src_pts)?;
    affine_sampled(src, &matrix, fill)
}

/// Apply interpolated affine transformation using a matrix
///
/// `matrix` maps destination pixels to source coordinates.
pub fn affine<T: Pixel>(
    src: &GrayImage<T>,
    matrix: &AffineMatrix,
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    distort_gray(src, matrix.clone(), BilinearPixel::new(fill))
}

/// Apply interpolated affine transformation using point correspondences
///
/// # Arguments
/// * `src` - Input image
/// * `src_pts` - 3 source points
/// * `dst_pts` - 3 destination points, where the source points end up
/// * `fill` - Border policy for pixels that map outside the source
pub fn affine_pta<T: Pixel>(
    src: &GrayImage<T>,
    src_pts: [Point; 3],
    dst_pts: [Point; 3],
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    let matrix = AffineMatrix::from_three_points(dst_pts, src_pts)?;
    affine(src, &matrix, fill)
}

/// Translate an image by (tx, ty) pixels
///
/// Uncovered pixels are zero.
pub fn translate<T: Pixel>(src: &GrayImage<T>, tx: f32, ty: f32) -> TransformResult<GrayImage<T>> {
    affine(src, &AffineMatrix::translation(-tx, -ty), BorderType::Zero)
}

/// Scale an image about the origin, keeping its size
///
/// # Errors
///
/// Returns `TransformError::InvalidParameters` if a factor is zero or not
/// finite.
pub fn affine_scale<T: Pixel>(src: &GrayImage<T>, sx: f32, sy: f32) -> TransformResult<GrayImage<T>> {
    if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "invalid scale factors {} x {}",
            sx, sy
        )));
    }
    affine(src, &AffineMatrix::scale(1.0 / sx, 1.0 / sy), BorderType::Zero)
}

/// Rotate an image by `angle` radians about (center_x, center_y)
///
/// Uncovered pixels are zero.
pub fn affine_rotate<T: Pixel>(
    src: &GrayImage<T>,
    center_x: f32,
    center_y: f32,
    angle: f32,
) -> TransformResult<GrayImage<T>> {
    affine(
        src,
        &AffineMatrix::rotation(center_x, center_y, -angle),
        BorderType::Zero,
    )
}
