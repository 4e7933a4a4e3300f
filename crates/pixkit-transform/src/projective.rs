//! Projective transformations for images
//!
//! Projective (homography) transformations use 4-point correspondences to define
//! a perspective mapping. These can correct for perspective distortion in images.
//!
//! As with the affine warps, the coefficients handed to [`projective`] map
//! destination pixels to source coordinates.

use pixkit_core::{BorderType, GrayImage, Pixel};

use crate::affine::Point;
use crate::distort::distort_gray;
use crate::interpolate::{BilinearPixel, NearestNeighborPixel};
use crate::linalg::solve;
use crate::model::PixelTransform;
use crate::{TransformError, TransformResult};

/// Projective transformation coefficients (8 values)
///
/// Defines the mapping:
/// ```text
/// x' = (a*x + b*y + c) / (g*x + h*y + 1)
/// y' = (d*x + e*y + f) / (g*x + h*y + 1)
/// ```
///
/// Points on the line `g*x + h*y + 1 = 0` map to infinity; the interpolators
/// treat such samples as outside the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectiveCoeffs {
    /// Coefficients [a, b, c, d, e, f, g, h]
    coeffs: [f32; 8],
}

impl Default for ProjectiveCoeffs {
    fn default() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }
}

impl ProjectiveCoeffs {
    pub fn from_coeffs(coeffs: [f32; 8]) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[f32; 8] {
        &self.coeffs
    }

    /// Compute the homography mapping four source points onto four
    /// destination points
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` if three of the points are
    /// collinear.
    pub fn from_four_points(src_pts: [Point; 4], dst_pts: [Point; 4]) -> TransformResult<Self> {
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];
        for i in 0..4 {
            let (x, y) = (src_pts[i].x as f64, src_pts[i].y as f64);
            let (u, v) = (dst_pts[i].x as f64, dst_pts[i].y as f64);
            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * u, -y * u];
            b[2 * i] = u;
            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * v, -y * v];
            b[2 * i + 1] = v;
        }
        let c = solve(a, b)?;
        Ok(Self::from_coeffs(c.map(|v| v as f32)))
    }

    /// Compute the inverse homography
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` if the 3x3 matrix is not
    /// invertible or its inverse cannot be normalized.
    pub fn inverse(&self) -> TransformResult<Self> {
        let [a, b, c, d, e, f, g, h] = self.coeffs.map(|v| v as f64);
        let m = [[a, b, c], [d, e, f], [g, h, 1.0]];

        let cof = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };
        // adjugate, row-major
        let adj = [
            [cof(1, 2, 1, 2), -cof(0, 2, 1, 2), cof(0, 1, 1, 2)],
            [-cof(1, 2, 0, 2), cof(0, 2, 0, 2), -cof(0, 1, 0, 2)],
            [cof(1, 2, 0, 1), -cof(0, 2, 0, 1), cof(0, 1, 0, 1)],
        ];
        let det = m[0][0] * adj[0][0] + m[0][1] * adj[1][0] + m[0][2] * adj[2][0];
        if det.abs() < 1.0e-12 {
            return Err(TransformError::SingularMatrix);
        }
        // scale so the bottom-right entry is 1; the determinant cancels out
        let norm = adj[2][2];
        if norm.abs() < 1.0e-12 {
            return Err(TransformError::SingularMatrix);
        }
        let n = |v: f64| (v / norm) as f32;
        Ok(Self::from_coeffs([
            n(adj[0][0]),
            n(adj[0][1]),
            n(adj[0][2]),
            n(adj[1][0]),
            n(adj[1][1]),
            n(adj[1][2]),
            n(adj[2][0]),
            n(adj[2][1]),
        ]))
    }

    /// Transform a point returning float coordinates
    #[inline]
    pub fn transform_point_float(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f, g, h] = self.coeffs;
        let den = g * x + h * y + 1.0;
        ((a * x + b * y + c) / den, (d * x + e * y + f) / den)
    }

    pub fn transform_point(&self, pt: Point) -> Point {
        let (x, y) = self.transform_point_float(pt.x, pt.y);
        Point::new(x, y)
    }
}

impl PixelTransform for ProjectiveCoeffs {
    #[inline]
    fn compute(&mut self, x: i32, y: i32) -> (f32, f32) {
        self.transform_point_float(x as f32, y as f32)
    }
}

/// Apply sampled projective transformation using coefficients
pub fn projective_sampled<T: Pixel>(
    src: &GrayImage<T>,
    coeffs: &ProjectiveCoeffs,
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    distort_gray(src, coeffs.clone(), NearestNeighborPixel::new(fill))
}

/// Apply sampled projective transformation using 4-point correspondences
///
/// # Arguments
/// * `src` - Input image
/// * `src_pts` - 4 source points
/// * `dst_pts` - 4 destination points, where the source points end up
/// * `fill` - Border policy for pixels that map outside the source
pub fn projective_sampled_pta<T: Pixel>(
    src: &GrayImage<T>,
    src_pts: [Point; 4],
    dst_pts: [Point; 4],
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    let coeffs = ProjectiveCoeffs::from_four_points(dst_pts, src_pts)?;
    projective_sampled(src, &coeffs, fill)
}

/// Apply interpolated projective transformation using coefficients
pub fn projective<T: Pixel>(
    src: &GrayImage<T>,
    coeffs: &ProjectiveCoeffs,
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    distort_gray(src, coeffs.clone(), BilinearPixel::new(fill))
}

/// Apply interpolated projective transformation using 4-point correspondences
///
/// # Arguments
/// * `src` - Input image
/// * `src_pts` - 4 source points
/// * `dst_pts` - 4 destination points, where the source points end up
/// * `fill` - Border policy for pixels that map outside the source
pub fn projective_pta<T: Pixel>(
    src: &GrayImage<T>,
    src_pts: [Point; 4],
    dst_pts: [Point; 4],
    fill: BorderType,
) -> TransformResult<GrayImage<T>> {
    let coeffs = ProjectiveCoeffs::from_four_points(dst_pts, src_pts)?;
    projective(src, &coeffs, fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_from_four_points_reproduces_points() {
        let src = square();
        let dst = [
            Point::new(1.0, 2.0),
            Point::new(12.0, 1.0),
            Point::new(9.0, 13.0),
            Point::new(-1.0, 8.0),
        ];
        let h = ProjectiveCoeffs::from_four_points(src, dst).unwrap();
        for (s, d) in src.iter().zip(&dst) {
            let p = h.transform_point(*s);
            assert!((p.x - d.x).abs() < 1e-3 && (p.y - d.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let h = ProjectiveCoeffs::from_coeffs([1.1, 0.1, 3.0, -0.2, 0.9, 1.0, 0.001, -0.002]);
        let inv = h.inverse().unwrap();
        for &(x, y) in &[(0.0f32, 0.0f32), (5.0, 7.0), (-3.0, 2.5)] {
            let p = h.transform_point(Point::new(x, y));
            let q = inv.transform_point(p);
            assert!((q.x - x).abs() < 1e-3 && (q.y - y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_degenerate_points() {
        // all on one line: the y columns of the system vanish
        let src = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        assert!(ProjectiveCoeffs::from_four_points(src, square()).is_err());
        let zero = ProjectiveCoeffs::from_coeffs([0.0; 8]);
        assert!(zero.inverse().is_err());
    }

    #[test]
    fn test_identity_warp() {
        let src = GrayImage::from_fn(6, 5, |x, y| (x * y) as u16).unwrap();
        let out = projective(&src, &ProjectiveCoeffs::default(), BorderType::Zero).unwrap();
        assert_eq!(out, src);
        let out = projective_pta(&src, square(), square(), BorderType::Zero).unwrap();
        assert_eq!(out.dimensions(), src.dimensions());
    }

    #[test]
    fn test_projective_sampled_pta_shift() {
        // half-pixel shift keeps nearest-neighbor floors away from integers
        let src = GrayImage::from_fn(6, 5, |x, y| (1 + x + 6 * y) as u8).unwrap();
        let dst_pts = square().map(|p| Point::new(p.x + 0.5, p.y + 0.5));
        let out = projective_sampled_pta(&src, square(), dst_pts, BorderType::Value(0.0)).unwrap();
        for y in 0..5 {
            for x in 0..6 {
                let want = if x == 0 || y == 0 {
                    0
                } else {
                    src.get_pixel(x - 1, y - 1).unwrap()
                };
                assert_eq!(out.get_pixel(x, y).unwrap(), want, "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_horizon_pixels_use_fill() {
        // every pixel with x == 2 lies on the line at infinity
        let coeffs = ProjectiveCoeffs::from_coeffs([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, -0.5, 0.0]);
        let src = GrayImage::new_with_value(4, 4, 1.0f32).unwrap();
        let out = projective_sampled(&src, &coeffs, BorderType::Value(-2.0)).unwrap();
        assert_eq!(out.get_pixel(2, 1).unwrap(), -2.0);
        assert_eq!(out.get_pixel(0, 1).unwrap(), 1.0);
    }
}
