//! Border handling
//!
//! Algorithms that look at pixel neighborhoods need a value for coordinates
//! that fall outside the image. [`BorderType`] names the policy and
//! [`GrayBorder`] / [`InterleavedBorder`] apply it, so reads through them
//! never leave the image's memory.

use crate::image::{GrayImage, InterleavedImage};
use crate::pixel::Pixel;

/// How to compute values for coordinates outside an image
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BorderType {
    /// Repeat the nearest edge pixel
    #[default]
    Extend,
    /// Mirror about the edge pixel without repeating it (`dcb|abcd|cba`)
    Reflect,
    /// Tile the image periodically
    Wrap,
    /// Treat everything outside as zero
    Zero,
    /// Treat everything outside as the given value
    Value(f32),
}

impl BorderType {
    /// Value used for outside samples, `None` if the policy maps them back
    /// into the image instead
    pub fn constant(self) -> Option<f32> {
        match self {
            BorderType::Zero => Some(0.0),
            BorderType::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Map a possibly outside coordinate onto `[0, len)`
///
/// Returns `None` when the border policy supplies a constant instead of an
/// image sample, or when `len` is 0.
pub fn map_index(i: i32, len: u32, border: BorderType) -> Option<u32> {
    if len == 0 {
        return None;
    }
    if i >= 0 && (i as u32) < len {
        return Some(i as u32);
    }
    let len_i = len as i64;
    let i = i as i64;
    match border {
        BorderType::Zero | BorderType::Value(_) => None,
        BorderType::Extend => Some(i.clamp(0, len_i - 1) as u32),
        BorderType::Wrap => Some(i.rem_euclid(len_i) as u32),
        BorderType::Reflect => {
            if len == 1 {
                return Some(0);
            }
            let period = 2 * len_i - 2;
            let r = i.rem_euclid(period);
            let mapped = if r < len_i { r } else { period - r };
            Some(mapped as u32)
        }
    }
}

/// Border-safe reader for a [`GrayImage`]
#[derive(Debug, Clone, Copy)]
pub struct GrayBorder<'a, T: Pixel> {
    image: &'a GrayImage<T>,
    border: BorderType,
}

impl<'a, T: Pixel> GrayBorder<'a, T> {
    pub fn new(image: &'a GrayImage<T>, border: BorderType) -> Self {
        Self { image, border }
    }

    /// The wrapped image
    pub fn image(&self) -> &'a GrayImage<T> {
        self.image
    }

    pub fn border(&self) -> BorderType {
        self.border
    }

    /// Sample at any coordinate, converted to `f32`
    #[inline]
    pub fn get_f32(&self, x: i32, y: i32) -> f32 {
        if self.image.is_in_bounds(x, y) {
            return self.image.get_pixel_unchecked(x as u32, y as u32).to_f32();
        }
        match (
            map_index(x, self.image.width(), self.border),
            map_index(y, self.image.height(), self.border),
        ) {
            (Some(mx), Some(my)) => self.image.get_pixel_unchecked(mx, my).to_f32(),
            _ => self.border.constant().unwrap_or(0.0),
        }
    }

    /// Sample at any coordinate in the image's own type
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> T {
        if self.image.is_in_bounds(x, y) {
            return self.image.get_pixel_unchecked(x as u32, y as u32);
        }
        T::from_f32(self.get_f32(x, y))
    }
}

/// Border-safe reader for an [`InterleavedImage`]
#[derive(Debug, Clone, Copy)]
pub struct InterleavedBorder<'a, T: Pixel> {
    image: &'a InterleavedImage<T>,
    border: BorderType,
}

impl<'a, T: Pixel> InterleavedBorder<'a, T> {
    pub fn new(image: &'a InterleavedImage<T>, border: BorderType) -> Self {
        Self { image, border }
    }

    pub fn image(&self) -> &'a InterleavedImage<T> {
        self.image
    }

    /// One band at any coordinate, converted to `f32`
    #[inline]
    pub fn get_f32(&self, x: i32, y: i32, band: usize) -> f32 {
        if self.image.is_in_bounds(x, y) {
            return self
                .image
                .get_band_unchecked(x as u32, y as u32, band)
                .to_f32();
        }
        match (
            map_index(x, self.image.width(), self.border),
            map_index(y, self.image.height(), self.border),
        ) {
            (Some(mx), Some(my)) => self.image.get_band_unchecked(mx, my, band).to_f32(),
            _ => self.border.constant().unwrap_or(0.0),
        }
    }

    /// All bands at any coordinate, written into `values`
    pub fn get_pixel_f32(&self, x: i32, y: i32, values: &mut [f32]) {
        for (band, v) in values.iter_mut().enumerate().take(self.image.num_bands()) {
            *v = self.get_f32(x, y, band);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_index_extend() {
        let border = BorderType::Extend;
        assert_eq!(map_index(-3, 5, border), Some(0));
        assert_eq!(map_index(0, 5, border), Some(0));
        assert_eq!(map_index(4, 5, border), Some(4));
        assert_eq!(map_index(99, 5, border), Some(4));
    }

    #[test]
    fn test_map_index_reflect() {
        let border = BorderType::Reflect;
        for i in -8..=8 {
            assert_eq!(map_index(i, 1, border), Some(0));
        }
        let cases = [(-7, 1), (-4, 4), (-1, 1), (0, 0), (4, 4), (5, 3), (7, 1)];
        for (i, expected) in cases {
            assert_eq!(map_index(i, 5, border), Some(expected));
        }
    }

    #[test]
    fn test_map_index_wrap_and_constant() {
        assert_eq!(map_index(-1, 4, BorderType::Wrap), Some(3));
        assert_eq!(map_index(9, 4, BorderType::Wrap), Some(1));
        assert_eq!(map_index(-1, 4, BorderType::Zero), None);
        assert_eq!(map_index(2, 4, BorderType::Value(3.0)), Some(2));
        assert_eq!(map_index(0, 0, BorderType::Extend), None);
    }

    #[test]
    fn test_gray_border_reads() {
        let img = GrayImage::from_data(3, 2, vec![1u8, 2, 3, 4, 5, 6]).unwrap();

        let zero = GrayBorder::new(&img, BorderType::Zero);
        assert_eq!(zero.get(-1, 0), 0);
        assert_eq!(zero.get(2, 1), 6);

        let value = GrayBorder::new(&img, BorderType::Value(1.5));
        assert_eq!(value.get_f32(3, 0), 1.5);

        let extend = GrayBorder::new(&img, BorderType::Extend);
        assert_eq!(extend.get(5, -2), 3);
        assert_eq!(extend.get(-1, 9), 4);
    }

    #[test]
    fn test_interleaved_border_reads() {
        let img = InterleavedImage::from_data(2, 1, 2, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
        let wrap = InterleavedBorder::new(&img, BorderType::Wrap);
        let mut values = [0.0; 2];
        wrap.get_pixel_f32(-1, 0, &mut values);
        assert_eq!(values, [3.0, 4.0]);
        assert_eq!(wrap.get_f32(2, 3, 1), 2.0);
    }
}
