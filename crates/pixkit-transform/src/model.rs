//! Pixel transforms
//!
//! A [`PixelTransform`] maps a destination pixel to the (possibly
//! fractional) source coordinate it is sampled from. Any
//! `FnMut(i32, i32) -> (f32, f32)` closure is a transform; the geometric
//! models ([`AffineMatrix`](crate::AffineMatrix),
//! [`ProjectiveCoeffs`](crate::ProjectiveCoeffs),
//! [`BilinearCoeffs`](crate::BilinearCoeffs)) implement it as well.

use crate::{TransformError, TransformResult};

/// Map a destination pixel to a source coordinate
pub trait PixelTransform {
    /// Source coordinate sampled for destination pixel `(x, y)`
    fn compute(&mut self, x: i32, y: i32) -> (f32, f32);
}

impl<F> PixelTransform for F
where
    F: FnMut(i32, i32) -> (f32, f32),
{
    #[inline]
    fn compute(&mut self, x: i32, y: i32) -> (f32, f32) {
        self(x, y)
    }
}

/// Constant shift: `(x, y) -> (x + dx, y + dy)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub dx: f32,
    pub dy: f32,
}

impl Translation {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl PixelTransform for Translation {
    #[inline]
    fn compute(&mut self, x: i32, y: i32) -> (f32, f32) {
        (x as f32 + self.dx, y as f32 + self.dy)
    }
}

/// Lookup table holding a transform evaluated over a pixel grid
///
/// The table covers `0..=width` by `0..=height`, one entry more than the
/// image in each direction so that pixel corners can be looked up too.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedTransform {
    width: u32,
    height: u32,
    table: Vec<(f32, f32)>,
}

impl CachedTransform {
    /// Evaluate `model` at every grid point
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameters` if width or height is 0.
    pub fn new(model: &mut impl PixelTransform, width: u32, height: u32) -> TransformResult<Self> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidParameters(format!(
                "cannot cache a {}x{} grid",
                width, height
            )));
        }
        let mut table = Vec::with_capacity((width as usize + 1) * (height as usize + 1));
        for y in 0..=height as i32 {
            for x in 0..=width as i32 {
                table.push(model.compute(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            table,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cached value, `None` outside the grid
    pub fn try_compute(&self, x: i32, y: i32) -> Option<(f32, f32)> {
        if x < 0 || y < 0 || x > self.width as i32 || y > self.height as i32 {
            return None;
        }
        Some(self.table[y as usize * (self.width as usize + 1) + x as usize])
    }
}

impl PixelTransform for CachedTransform {
    /// Queries outside the grid return the nearest cached entry
    #[inline]
    fn compute(&mut self, x: i32, y: i32) -> (f32, f32) {
        let cx = x.clamp(0, self.width as i32);
        let cy = y.clamp(0, self.height as i32);
        self.table[cy as usize * (self.width as usize + 1) + cx as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_transform() {
        let mut calls = 0;
        let mut model = |x: i32, y: i32| {
            calls += 1;
            (x as f32 * 2.0, y as f32 - 1.0)
        };
        assert_eq!(model.compute(3, 4), (6.0, 3.0));
        assert_eq!(model.compute(0, 0), (0.0, -1.0));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_translation() {
        let mut t = Translation::new(0.5, -2.0);
        assert_eq!(t.compute(1, 1), (1.5, -1.0));
    }

    #[test]
    fn test_cached_transform_matches_model() {
        let mut t = Translation::new(0.25, 0.75);
        let mut cached = CachedTransform::new(&mut t, 4, 3).unwrap();
        for y in 0..=3 {
            for x in 0..=4 {
                assert_eq!(cached.try_compute(x, y), Some(t.compute(x, y)));
            }
        }
        assert_eq!(cached.try_compute(5, 0), None);
        assert_eq!(cached.try_compute(-1, 0), None);
        assert_eq!(cached.compute(9, -3), t.compute(4, 0));
        assert!(CachedTransform::new(&mut t, 0, 3).is_err());
    }
}
