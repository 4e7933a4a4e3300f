//! Image containers
//!
//! [`GrayImage`] holds one sample per pixel, [`InterleavedImage`] holds a
//! fixed number of bands per pixel stored next to each other. Both can live
//! inside a larger buffer: the pixel at `(x, y)` is found at
//! `start_index + y * stride + x * bands`, which lets a padded buffer carry a
//! *sub-image*.
//!
//! # Examples
//!
//! ```
//! use pixkit_core::GrayImage;
//!
//! let mut img = GrayImage::<u8>::new(4, 3).unwrap();
//! img.set_pixel(2, 1, 7).unwrap();
//! assert_eq!(img.get_pixel(2, 1).unwrap(), 7);
//! assert_eq!(img.sum(), 7.0);
//! ```

mod interleaved;

pub use interleaved::InterleavedImage;

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// Shape information shared by all image types
pub trait ImageBase {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Number of bands per pixel
    fn num_bands(&self) -> usize;

    /// Width and height as a pair
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// True if `(x, y)` addresses a pixel of this image
    fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }
}

/// Write a band vector produced by an interpolator into an image
pub trait AssignPixel: ImageBase {
    /// Store `values` at `(x, y)`, one entry per band
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image or `values` holds fewer
    /// entries than the image has bands.
    fn assign(&mut self, x: u32, y: u32, values: &[f32]);
}

/// Validate the geometry of a strided buffer
pub(crate) fn check_layout(
    width: u32,
    height: u32,
    row_len: usize,
    start_index: usize,
    stride: usize,
    data_len: usize,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    if stride < row_len {
        return Err(Error::InvalidParameter(format!(
            "stride {} is smaller than row length {}",
            stride, row_len
        )));
    }
    let required = start_index + (height as usize - 1) * stride + row_len;
    if data_len < required {
        return Err(Error::IndexOutOfBounds {
            index: required - 1,
            len: data_len,
        });
    }
    Ok(())
}

/// Single-band image
///
/// A 2D grid of samples of type `T`.
///
/// # Memory Layout
///
/// Rows are `stride` samples apart and the first pixel sits at
/// `start_index`. Images created with [`GrayImage::new`] are contiguous
/// (`start_index == 0`, `stride == width`).
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImage<T: Pixel> {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Distance between two rows, in samples
    stride: usize,
    /// Index of pixel (0, 0) in `data`
    start_index: usize,
    /// Sample storage
    data: Vec<T>,
}

impl<T: Pixel> GrayImage<T> {
    /// Create a new image with all pixels set to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixkit_core::GrayImage;
    ///
    /// let img = GrayImage::<f32>::new(640, 480).unwrap();
    /// assert_eq!(img.width(), 640);
    /// assert_eq!(img.height(), 480);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, T::ZERO)
    }

    /// Create a new image with all pixels set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: T) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(GrayImage {
            width,
            height,
            stride: width as usize,
            start_index: 0,
            data: vec![value; size],
        })
    }

    /// Create an image from raw data
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    /// * `data` - Pixel data in row-major order, no padding
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(GrayImage {
            width,
            height,
            stride: width as usize,
            start_index: 0,
            data,
        })
    }

    /// Wrap an existing strided buffer
    ///
    /// # Arguments
    ///
    /// * `start_index` - Index of pixel (0, 0) in `data`
    /// * `stride` - Distance between rows in samples (must be >= width)
    ///
    /// # Errors
    ///
    /// Returns an error if the described image does not fit in `data`.
    pub fn from_parts(
        width: u32,
        height: u32,
        start_index: usize,
        stride: usize,
        data: Vec<T>,
    ) -> Result<Self> {
        check_layout(width, height, width as usize, start_index, stride, data.len())?;
        Ok(GrayImage {
            width,
            height,
            stride,
            start_index,
            data,
        })
    }

    /// Create an image by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Result<Self> {
        let mut img = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                img.set_pixel_unchecked(x, y, f(x, y));
            }
        }
        Ok(img)
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Distance between two rows, in samples
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Index of pixel (0, 0) in the backing buffer
    #[inline]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// True if the buffer holds exactly this image, without padding
    pub fn is_contiguous(&self) -> bool {
        self.start_index == 0 && self.stride == self.width as usize
    }

    /// Raster index of `(x, y)` in the backing buffer
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        self.start_index + (y as usize) * self.stride + (x as usize)
    }

    /// True if `(x, y)` addresses a pixel of this image
    #[inline]
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<T> {
        self.check_coords(x, y)?;
        Ok(self.data[self.index_of(x, y)])
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        self.check_coords(x, y)?;
        let idx = self.index_of(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// May panic, or return a padding sample, if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> T {
        self.data[self.index_of(x, y)]
    }

    /// Set the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// May panic, or write into padding, if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: T) {
        let idx = self.index_of(x, y);
        self.data[idx] = value;
    }

    fn check_coords(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: (self.width as usize) * (self.height as usize),
            });
        }
        Ok(())
    }

    /// Get raw access to the backing buffer, padding included
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get mutable access to the backing buffer, padding included
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        assert!(y < self.height, "row {} out of range", y);
        let start = self.index_of(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Get a mutable row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        assert!(y < self.height, "row {} out of range", y);
        let start = self.index_of(0, y);
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    /// Iterate over all pixels in raster order
    pub fn pixels(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.height).flat_map(move |y| self.row(y).iter().copied())
    }

    /// Set all pixels to the specified value
    pub fn set_all(&mut self, value: T) {
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }

    /// Clear all pixels to zero
    pub fn clear(&mut self) {
        self.set_all(T::ZERO);
    }

    /// Change the shape of the image
    ///
    /// The image becomes contiguous. Pixel contents are unspecified
    /// afterwards; callers are expected to overwrite them.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn reshape(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if self.width == width && self.height == height {
            return Ok(());
        }
        let size = (width as usize) * (height as usize);
        self.data.resize(size, T::ZERO);
        self.width = width;
        self.height = height;
        self.stride = width as usize;
        self.start_index = 0;
        Ok(())
    }

    /// Copy the pixels into a new contiguous image
    pub fn to_contiguous(&self) -> GrayImage<T> {
        GrayImage {
            width: self.width,
            height: self.height,
            stride: self.width as usize,
            start_index: 0,
            data: self.pixels().collect(),
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Sum of all pixel values
    pub fn sum(&self) -> f64 {
        self.pixels().map(|v| v.to_f32() as f64).sum()
    }

    /// Number of pixels that are not zero
    pub fn count_nonzero(&self) -> usize {
        self.pixels().filter(|&v| v != T::ZERO).count()
    }
}

impl<T: Pixel> ImageBase for GrayImage<T> {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn num_bands(&self) -> usize {
        1
    }
}

impl<T: Pixel> AssignPixel for GrayImage<T> {
    #[inline]
    fn assign(&mut self, x: u32, y: u32, values: &[f32]) {
        self.set_pixel_unchecked(x, y, T::from_f32(values[0]));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_creation() {
        let img = GrayImage::<u8>::new(100, 200).unwrap();
        assert_eq!(img.dimensions(), (100, 200));
        assert!(img.is_contiguous());
        assert!(img.pixels().all(|v| v == 0));
    }

    #[test]
    fn test_gray_invalid_dimensions() {
        assert!(GrayImage::<u8>::new(0, 100).is_err());
        assert!(GrayImage::<u8>::new(100, 0).is_err());
        assert!(GrayImage::<f32>::from_data(3, 2, vec![1.0; 5]).is_err());
    }

    #[test]
    fn test_gray_from_data() {
        let img = GrayImage::from_data(3, 2, vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(img.get_pixel(2, 0).unwrap(), 3.0);
        assert_eq!(img.get_pixel(0, 1).unwrap(), 4.0);
        assert_eq!(img.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(img.sum(), 21.0);
    }

    #[test]
    fn test_gray_out_of_bounds() {
        let mut img = GrayImage::<i16>::new(10, 10).unwrap();
        assert!(img.get_pixel(10, 0).is_err());
        assert!(img.set_pixel(0, 10, 1).is_err());
        assert!(!img.is_in_bounds(-1, 0));
        assert!(!img.is_in_bounds(0, 10));
        assert!(img.is_in_bounds(9, 9));
    }

    #[test]
    fn test_gray_strided_layout() {
        // 2x2 image inside a 4x3 buffer, starting at (1, 1)
        let data: Vec<u8> = (0..12).collect();
        let img = GrayImage::from_parts(2, 2, 5, 4, data).unwrap();
        assert!(!img.is_contiguous());
        assert_eq!(img.index_of(0, 0), 5);
        assert_eq!(img.get_pixel(1, 1).unwrap(), 10);
        assert_eq!(img.pixels().collect::<Vec<_>>(), vec![5, 6, 9, 10]);
        assert_eq!(img.to_contiguous().data(), &[5, 6, 9, 10]);
    }

    #[test]
    fn test_gray_from_parts_rejects_short_buffer() {
        assert!(GrayImage::from_parts(2, 2, 5, 4, vec![0u8; 10]).is_err());
        assert!(GrayImage::from_parts(4, 2, 0, 3, vec![0u8; 12]).is_err());
    }

    #[test]
    fn test_gray_set_all_leaves_padding() {
        let mut img = GrayImage::from_parts(2, 2, 5, 4, vec![0u8; 12]).unwrap();
        img.set_all(3);
        assert_eq!(img.count_nonzero(), 4);
        assert_eq!(img.data().iter().filter(|&&v| v == 3).count(), 4);
    }

    #[test]
    fn test_gray_reshape() {
        let mut img = GrayImage::from_parts(2, 2, 5, 4, vec![0u8; 12]).unwrap();
        img.reshape(3, 5).unwrap();
        assert_eq!(img.dimensions(), (3, 5));
        assert!(img.is_contiguous());
        assert_eq!(img.data().len(), 15);
        assert!(img.reshape(0, 5).is_err());
    }

    #[test]
    fn test_gray_assign() {
        let mut img = GrayImage::<u8>::new(3, 3).unwrap();
        img.assign(1, 2, &[42.7]);
        assert_eq!(img.get_pixel(1, 2).unwrap(), 42);
        assert_eq!(ImageBase::num_bands(&img), 1);
    }
}
