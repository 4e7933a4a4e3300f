//! Sub-image construction
//!
//! Copies an image into the middle of a larger buffer whose padding holds a
//! sentinel value. An algorithm that ignores `start_index`/`stride`, or
//! reads outside the image, sees the sentinel and fails its test.

use pixkit_core::{GrayImage, InterleavedImage, Pixel};

use crate::error::TestResult;

/// Number of padding pixels on each side of a sub-image
pub const SUB_IMAGE_PAD: u32 = 3;

/// Value stored in the padding
const SENTINEL: f32 = 100.0;

/// Copy `image` into a padded buffer and return the strided view of it
pub fn create_sub_image_of_gray<T: Pixel>(image: &GrayImage<T>) -> TestResult<GrayImage<T>> {
    let (w, h) = image.dimensions();
    let pad = SUB_IMAGE_PAD as usize;
    let stride = w as usize + 2 * pad;
    let rows = h as usize + 2 * pad;
    let start = pad * stride + pad;

    let mut sub = GrayImage::from_parts(
        w,
        h,
        start,
        stride,
        vec![T::from_f32(SENTINEL); stride * rows],
    )?;
    for y in 0..h {
        sub.row_mut(y).copy_from_slice(image.row(y));
    }
    Ok(sub)
}

/// Copy `image` into a padded buffer and return the strided view of it
pub fn create_sub_image_of_interleaved<T: Pixel>(
    image: &InterleavedImage<T>,
) -> TestResult<InterleavedImage<T>> {
    let (w, h) = image.dimensions();
    let bands = image.num_bands();
    let pad = SUB_IMAGE_PAD as usize;
    let stride = (w as usize + 2 * pad) * bands;
    let rows = h as usize + 2 * pad;
    let start = pad * stride + pad * bands;

    let mut sub = InterleavedImage::from_parts(
        w,
        h,
        bands,
        start,
        stride,
        vec![T::from_f32(SENTINEL); stride * rows],
    )?;
    for y in 0..h {
        let row_start = sub.index_of(0, y);
        let src = image.row(y);
        sub.data_mut()[row_start..row_start + src.len()].copy_from_slice(src);
    }
    Ok(sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_image_gray() {
        let img = GrayImage::from_data(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let sub = create_sub_image_of_gray(&img).unwrap();
        assert!(!sub.is_contiguous());
        assert_eq!(sub.to_contiguous(), img);
        assert_eq!(sub.data()[0], 100);
    }

    #[test]
    fn test_sub_image_interleaved() {
        let img = InterleavedImage::from_data(2, 1, 2, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
        let sub = create_sub_image_of_interleaved(&img).unwrap();
        assert_eq!(sub.get_pixel(1, 0).unwrap(), &[3.0, 4.0]);
        assert_eq!(sub.sum(), img.sum());
    }
}
