//! Orthogonal rotation and flip operations
//!
//! This module provides:
//! - Orthogonal rotations (90/180/270 degrees)
//! - Horizontal and vertical flips
//! - In-place clockwise rotation of square images

use pixkit_core::{Error, GrayImage, Pixel};

use crate::TransformResult;

/// Rotate an image by 90-degree increments
///
/// # Arguments
/// * `src` - Input image
/// * `quads` - Number of 90-degree clockwise rotations (taken modulo 4)
pub fn rotate_orth<T: Pixel>(src: &GrayImage<T>, quads: u32) -> TransformResult<GrayImage<T>> {
    match quads % 4 {
        0 => Ok(src.to_contiguous()),
        1 => rotate_90(src, true),
        2 => rotate_180(src),
        _ => rotate_90(src, false),
    }
}

/// Rotate an image 90 degrees
///
/// # Arguments
/// * `src` - Input image
/// * `clockwise` - If true, rotate clockwise; otherwise counterclockwise
pub fn rotate_90<T: Pixel>(src: &GrayImage<T>, clockwise: bool) -> TransformResult<GrayImage<T>> {
    let (w, h) = src.dimensions();

    // Output dimensions are swapped
    let mut out = GrayImage::new(h, w)?;
    for y in 0..h {
        for x in 0..w {
            let val = src.get_pixel_unchecked(x, y);
            let (nx, ny) = if clockwise {
                (h - 1 - y, x)
            } else {
                (y, w - 1 - x)
            };
            out.set_pixel_unchecked(nx, ny, val);
        }
    }
    Ok(out)
}

/// Rotate an image 180 degrees
pub fn rotate_180<T: Pixel>(src: &GrayImage<T>) -> TransformResult<GrayImage<T>> {
    let (w, h) = src.dimensions();
    let mut out = GrayImage::new(w, h)?;
    for y in 0..h {
        for x in 0..w {
            out.set_pixel_unchecked(w - 1 - x, h - 1 - y, src.get_pixel_unchecked(x, y));
        }
    }
    Ok(out)
}

/// Flip an image left-right (horizontal mirror)
pub fn flip_lr<T: Pixel>(src: &GrayImage<T>) -> TransformResult<GrayImage<T>> {
    let (w, h) = src.dimensions();
    let mut out = GrayImage::new(w, h)?;
    for y in 0..h {
        let row = src.row(y);
        for (dst, &v) in out.row_mut(y).iter_mut().rev().zip(row) {
            *dst = v;
        }
    }
    Ok(out)
}

/// Flip an image top-bottom (vertical mirror)
pub fn flip_tb<T: Pixel>(src: &GrayImage<T>) -> TransformResult<GrayImage<T>> {
    let (w, h) = src.dimensions();
    let mut out = GrayImage::new(w, h)?;
    for y in 0..h {
        out.row_mut(h - 1 - y).copy_from_slice(src.row(y));
    }
    Ok(out)
}

/// Rotate a square image 90 degrees clockwise in place
///
/// The image keeps its buffer layout, so sub-images stay sub-images.
///
/// # Errors
///
/// Returns `Error::DimensionMismatch` if the image is not square.
pub fn rotate_cw_in_place<T: Pixel>(image: &mut GrayImage<T>) -> TransformResult<()> {
    let (w, h) = image.dimensions();
    if w != h {
        return Err(Error::DimensionMismatch {
            expected: (w, w),
            actual: (w, h),
        }
        .into());
    }
    let n = w;
    // rotate the four-cycles of each concentric ring
    for y in 0..n / 2 {
        for x in y..n - 1 - y {
            let top = image.get_pixel_unchecked(x, y);
            let left = image.get_pixel_unchecked(y, n - 1 - x);
            let bottom = image.get_pixel_unchecked(n - 1 - x, n - 1 - y);
            let right = image.get_pixel_unchecked(n - 1 - y, x);

            image.set_pixel_unchecked(n - 1 - y, x, top);
            image.set_pixel_unchecked(n - 1 - x, n - 1 - y, right);
            image.set_pixel_unchecked(y, n - 1 - x, bottom);
            image.set_pixel_unchecked(x, y, left);
        }
    }
    Ok(())
}
