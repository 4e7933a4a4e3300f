//! Miscellaneous image operations
//!
//! Helpers for filling images with synthetic content, mostly used to build
//! inputs for tests and benchmarks.

use rand::{Rng, RngExt};

use crate::error::{Error, Result};
use crate::image::{GrayImage, InterleavedImage};
use crate::pixel::Pixel;

/// Reject ranges `random_range` cannot sample from
fn check_range(low: f32, high: f32) -> Result<()> {
    if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() || low >= high {
        return Err(Error::InvalidParameter(format!(
            "invalid range [{}, {})",
            low, high
        )));
    }
    Ok(())
}

/// Fill every pixel with a value drawn uniformly from `[low, high)`
///
/// Integer images receive the truncated value.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `low >= high`, if either bound is
/// not finite, or if `high - low` overflows `f32`.
pub fn fill_uniform<T: Pixel, R: Rng + ?Sized>(
    image: &mut GrayImage<T>,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<()> {
    check_range(low, high)?;
    for y in 0..image.height() {
        for v in image.row_mut(y) {
            *v = T::from_f32(rng.random_range(low..high));
        }
    }
    Ok(())
}

/// Fill every band of every pixel with a value drawn uniformly from
/// `[low, high)`
///
/// # Errors
///
/// As [`fill_uniform`].
pub fn fill_uniform_interleaved<T: Pixel, R: Rng + ?Sized>(
    image: &mut InterleavedImage<T>,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<()> {
    check_range(low, high)?;
    let row_len = image.width() as usize * image.num_bands();
    for y in 0..image.height() {
        let start = image.index_of(0, y);
        for v in &mut image.data_mut()[start..start + row_len] {
            *v = T::from_f32(rng.random_range(low..high));
        }
    }
    Ok(())
}

/// Set every pixel inside a rectangle to `value`
///
/// The rectangle is clipped to the image; a rectangle entirely outside is a
/// no-op.
pub fn fill_rectangle<T: Pixel>(
    image: &mut GrayImage<T>,
    value: T,
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
) {
    let x_start = x0.max(0) as i64;
    let y_start = y0.max(0) as i64;
    let x_end = (x0 as i64 + width as i64).min(image.width() as i64);
    let y_end = (y0 as i64 + height as i64).min(image.height() as i64);
    if x_start >= x_end || y_start >= y_end {
        return;
    }
    for y in y_start..y_end {
        image.row_mut(y as u32)[x_start as usize..x_end as usize].fill(value);
    }
}
