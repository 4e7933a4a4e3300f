//! Bilinear transformations for images
//!
//! Bilinear transformations use 4-point correspondences to define a non-linear
//! mapping. Unlike affine transforms that preserve parallel lines, bilinear
//! transforms can map any quadrilateral to any other quadrilateral.
//!
//! Not to be confused with [`BilinearPixel`], the interpolator.

use pixkit_core::{BorderType, GrayImage, Pixel};

use crate::TransformResult;
use crate::affine::Point;
use crate::distort::distort_gray;
use crate::interpolate::{BilinearPixel, NearestNeighborPixel};
use crate::linalg::solve;
use crate::model::PixelTransform;

/// Bilinear transformation coefficients (8 values)
///
/// Defines the mapping:
/// ```text
/// x' = a*x + b*y + c*x*y + d
/// y' = e*x + f*y + g*x*y + h
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearCoeffs {
    /// Coefficients [a, b, c, d, e, f, g, h]
    coeffs: [f32; 8],
}

impl Default for BilinearCoeffs {
    fn default() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }
}

impl BilinearCoeffs {
    pub fn from_coeffs(coeffs: [f32; 8]) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[f32; 8] {
        &self.coeffs
    }

    /// Compute the bilinear map sending four source points onto four
    /// destination points
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` for degenerate point sets.
    pub fn from_four_points(src_pts: [Point; 4], dst_pts: [Point; 4]) -> TransformResult<Self> {
        let mut a = [[0.0f64; 4]; 4];
        let mut bx = [0.0f64; 4];
        let mut by = [0.0f64; 4];
        for i in 0..4 {
            let (x, y) = (src_pts[i].x as f64, src_pts[i].y as f64);
            a[i] = [x, y, x * y, 1.0];
            bx[i] = dst_pts[i].x as f64;
            by[i] = dst_pts[i].y as f64;
        }
        let [ca, cb, cc, cd] = solve(a, bx)?;
        let [ce, cf, cg, ch] = solve(a, by)?;
        Ok(Self::from_coeffs(
            [ca, cb, cc, cd, ce, cf, cg, ch].map(|v| v as f32),
        ))
    }

    /// Transform a point returning float coordinates
    #[inline]
    pub fn transform_point_float(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f, g, h] = self.coeffs;
        let xy = x * y;
        (a * x + b * y + c * xy + d, e * x + f * y + g * xy + h)
    }

    pub fn transform_point(&self, pt: Point) -> Point {
        let (x, y) = self.transform_point_float(pt.x, pt.y);
        Point::new(x, y)
    }
}

impl PixelTransform for BilinearCoeffs {
    #[inline]
    fn compute(&mut self, x: i32, y: i32) -> (f32, f32) {
        self.transform_point_float(x as f32, y as f32)
    }
}

/// Apply sampled bilinear transformation using coefficients
///
/// `coeffs` maps destination pixels to source coordinates.
pub fn bilinear_sampled<T: Pixel>(
    src: &GrayImage<T>,
    coeffs: &BilinearCoeffs,
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    distort_gray(src, coeffs.clone(), NearestNeighborPixel::new(fill))
}

/// Apply interpolated bilinear transformation using coefficients
///
/// `coeffs` maps destination pixels to source coordinates.
pub fn bilinear<T: Pixel>(
    src: &GrayImage<T>,
    coeffs: &BilinearCoeffs,
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    distort_gray(src, coeffs.clone(), BilinearPixel::new(fill))
}

/// Apply interpolated bilinear transformation using 4-point correspondences
///
/// # Arguments
/// * `src` - Input image
/// * `src_pts` - 4 source points
/// * `dst_pts` - 4 destination points, where the source points end up
/// * `fill` - Border policy for pixels that map outside the source
pub fn bilinear_pta<T: Pixel>(
    src: &GrayImage<T>,
    src_pts: [Point; 4],
    dst_pts: [Point; 4],
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    let coeffs = BilinearCoeffs::from_four_points(dst_pts, src_pts)?;
    bilinear(src, &coeffs, fill)
}
