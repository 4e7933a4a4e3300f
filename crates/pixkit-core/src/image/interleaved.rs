//! Multi-band image with interleaved samples

use super::{AssignPixel, ImageBase, check_layout};
use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// Image with `num_bands` samples per pixel stored next to each other
///
/// The samples of pixel `(x, y)` occupy
/// `start_index + y * stride + x * num_bands ..` plus `num_bands`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterleavedImage<T: Pixel> {
    width: u32,
    height: u32,
    num_bands: usize,
    /// Distance between two rows, in samples
    stride: usize,
    start_index: usize,
    data: Vec<T>,
}

impl<T: Pixel> InterleavedImage<T> {
    /// Create a new image with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0 and
    /// `Error::InvalidBands` if `num_bands` is 0.
    pub fn new(width: u32, height: u32, num_bands: usize) -> Result<Self> {
        Self::new_with_value(width, height, num_bands, T::ZERO)
    }

    /// Create a new image with every sample of every band set to `value`
    pub fn new_with_value(width: u32, height: u32, num_bands: usize, value: T) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if num_bands == 0 {
            return Err(Error::InvalidBands(num_bands));
        }
        let stride = width as usize * num_bands;
        Ok(InterleavedImage {
            width,
            height,
            num_bands,
            stride,
            start_index: 0,
            data: vec![value; stride * height as usize],
        })
    }

    /// Create an image from contiguous interleaved data
    ///
    /// # Errors
    ///
    /// Returns an error if the data length doesn't match
    /// `width * height * num_bands`.
    pub fn from_data(width: u32, height: u32, num_bands: usize, data: Vec<T>) -> Result<Self> {
        if num_bands == 0 {
            return Err(Error::InvalidBands(num_bands));
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * num_bands;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                num_bands,
                expected
            )));
        }
        Ok(InterleavedImage {
            width,
            height,
            num_bands,
            stride: width as usize * num_bands,
            start_index: 0,
            data,
        })
    }

    /// Wrap an existing strided buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the described image does not fit in `data`.
    pub fn from_parts(
        width: u32,
        height: u32,
        num_bands: usize,
        start_index: usize,
        stride: usize,
        data: Vec<T>,
    ) -> Result<Self> {
        if num_bands == 0 {
            return Err(Error::InvalidBands(num_bands));
        }
        check_layout(
            width,
            height,
            width as usize * num_bands,
            start_index,
            stride,
            data.len(),
        )?;
        Ok(InterleavedImage {
            width,
            height,
            num_bands,
            stride,
            start_index,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Raster index of the first band of `(x, y)`
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        self.start_index + (y as usize) * self.stride + (x as usize) * self.num_bands
    }

    #[inline]
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
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

    /// Get one band of the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates or band are out
    /// of range.
    pub fn get_band(&self, x: u32, y: u32, band: usize) -> Result<T> {
        self.check_coords(x, y)?;
        if band >= self.num_bands {
            return Err(Error::IndexOutOfBounds {
                index: band,
                len: self.num_bands,
            });
        }
        Ok(self.data[self.index_of(x, y) + band])
    }

    /// Set one band of the pixel at (x, y)
    pub fn set_band(&mut self, x: u32, y: u32, band: usize, value: T) -> Result<()> {
        self.check_coords(x, y)?;
        if band >= self.num_bands {
            return Err(Error::IndexOutOfBounds {
                index: band,
                len: self.num_bands,
            });
        }
        let idx = self.index_of(x, y) + band;
        self.data[idx] = value;
        Ok(())
    }

    /// Get one band without bounds checking
    #[inline]
    pub fn get_band_unchecked(&self, x: u32, y: u32, band: usize) -> T {
        self.data[self.index_of(x, y) + band]
    }

    /// All bands of the pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<&[T]> {
        self.check_coords(x, y)?;
        let idx = self.index_of(x, y);
        Ok(&self.data[idx..idx + self.num_bands])
    }

    /// Overwrite all bands of the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::BandMismatch` if `values` does not hold exactly one
    /// entry per band.
    pub fn set_pixel(&mut self, x: u32, y: u32, values: &[T]) -> Result<()> {
        self.check_coords(x, y)?;
        if values.len() != self.num_bands {
            return Err(Error::BandMismatch {
                expected: self.num_bands,
                actual: values.len(),
            });
        }
        let idx = self.index_of(x, y);
        self.data[idx..idx + self.num_bands].copy_from_slice(values);
        Ok(())
    }

    /// Backing buffer, padding included
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// All samples of row `y`, bands interleaved
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[T] {
        assert!(y < self.height, "row {} out of range", y);
        let start = self.index_of(0, y);
        &self.data[start..start + self.width as usize * self.num_bands]
    }

    /// Set every band of every pixel to `value`
    pub fn set_all(&mut self, value: T) {
        let row_len = self.width as usize * self.num_bands;
        for y in 0..self.height {
            let start = self.index_of(0, y);
            self.data[start..start + row_len].fill(value);
        }
    }

    /// Sum of all samples of all bands
    pub fn sum(&self) -> f64 {
        (0..self.height)
            .flat_map(|y| self.row(y).iter())
            .map(|v| v.to_f32() as f64)
            .sum()
    }
}

impl<T: Pixel> ImageBase for InterleavedImage<T> {
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
        self.num_bands
    }
}

impl<T: Pixel> AssignPixel for InterleavedImage<T> {
    #[inline]
    fn assign(&mut self, x: u32, y: u32, values: &[f32]) {
        let idx = self.index_of(x, y);
        for (dst, &v) in self.data[idx..idx + self.num_bands].iter_mut().zip(values) {
            *dst = T::from_f32(v);
        }
    }
}
