//! Sub-pixel sampling
//!
//! An [`InterpolatePixel`] samples an image at fractional coordinates. It
//! has two paths:
//!
//! - [`get`](InterpolatePixel::get) reads the image directly when the whole
//!   kernel footprint is inside and falls back to the border path otherwise
//! - [`get_border`](InterpolatePixel::get_border) reads every sample through
//!   a [`BorderType`] so it never touches memory outside the image
//!
//! Values are written into a caller-provided slice with one entry per band.

use pixkit_core::{
    BorderType, GrayBorder, GrayImage, ImageBase, InterleavedBorder, InterleavedImage, Pixel,
};

/// Sample an image of type `I` at sub-pixel coordinates
pub trait InterpolatePixel<I: ImageBase + ?Sized> {
    /// Pixels of support the kernel needs around a sample
    ///
    /// A coordinate is inside the image when
    /// `b - 1 <= x <= width - b` and `b - 1 <= y <= height - b`.
    fn required_border(&self) -> u32;

    /// Sample at `(x, y)`, writing one value per band into `values`
    fn get(&self, image: &I, x: f32, y: f32, values: &mut [f32]);

    /// Sample at `(x, y)` through the border policy
    fn get_border(&self, image: &I, x: f32, y: f32, values: &mut [f32]);

    /// True if `(x, y)` is inside `image` for this kernel
    fn is_inside(&self, image: &I, x: f32, y: f32) -> bool {
        let b = self.required_border() as f32;
        x >= b - 1.0
            && y >= b - 1.0
            && x <= image.width() as f32 - b
            && y <= image.height() as f32 - b
    }
}

/// Largest coordinate magnitude handed to the integer sampling code
///
/// Exactly representable in `f32`, so `floor` and the fractional part stay
/// exact, and far from `i32` overflow.
const COORD_LIMIT: f32 = 1.0e7;

/// Bring a transform output into a range the samplers can index with
///
/// `NaN` is sent far outside the image so it takes the border path.
#[inline]
fn clamp_coord(v: f32) -> f32 {
    if v.is_nan() {
        -COORD_LIMIT
    } else {
        v.clamp(-COORD_LIMIT, COORD_LIMIT)
    }
}

#[inline]
fn lerp2(p00: f32, p10: f32, p01: f32, p11: f32, ax: f32, ay: f32) -> f32 {
    let top = p00 * (1.0 - ax) + p10 * ax;
    let bottom = p01 * (1.0 - ax) + p11 * ax;
    top * (1.0 - ay) + bottom * ay
}

// ============================================================================
// Nearest neighbor
// ============================================================================

/// Nearest-neighbor sampling
///
/// The sample at `(x, y)` is the pixel at `(floor(x), floor(y))`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NearestNeighborPixel {
    border: BorderType,
}

impl NearestNeighborPixel {
    pub fn new(border: BorderType) -> Self {
        Self { border }
    }

    pub fn border(&self) -> BorderType {
        self.border
    }
}

impl<T: Pixel> InterpolatePixel<GrayImage<T>> for NearestNeighborPixel {
    fn required_border(&self) -> u32 {
        1
    }

    #[inline]
    fn get(&self, image: &GrayImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let xi = clamp_coord(x).floor() as i32;
        let yi = clamp_coord(y).floor() as i32;
        if image.is_in_bounds(xi, yi) {
            values[0] = image.get_pixel_unchecked(xi as u32, yi as u32).to_f32();
        } else {
            self.get_border(image, x, y, values);
        }
    }

    fn get_border(&self, image: &GrayImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let border = GrayBorder::new(image, self.border);
        values[0] = border.get_f32(clamp_coord(x).floor() as i32, clamp_coord(y).floor() as i32);
    }
}

impl<T: Pixel> InterpolatePixel<InterleavedImage<T>> for NearestNeighborPixel {
    fn required_border(&self) -> u32 {
        1
    }

    #[inline]
    fn get(&self, image: &InterleavedImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let xi = clamp_coord(x).floor() as i32;
        let yi = clamp_coord(y).floor() as i32;
        if image.is_in_bounds(xi, yi) {
            let idx = image.index_of(xi as u32, yi as u32);
            let pixel = &image.data()[idx..idx + image.num_bands()];
            for (v, &p) in values.iter_mut().zip(pixel) {
                *v = p.to_f32();
            }
        } else {
            self.get_border(image, x, y, values);
        }
    }

    fn get_border(&self, image: &InterleavedImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let border = InterleavedBorder::new(image, self.border);
        border.get_pixel_f32(
            clamp_coord(x).floor() as i32,
            clamp_coord(y).floor() as i32,
            values,
        );
    }
}

// ============================================================================
// Bilinear
// ============================================================================

/// Bilinear sampling over the 2x2 neighborhood of `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BilinearPixel {
    border: BorderType,
}

impl BilinearPixel {
    pub fn new(border: BorderType) -> Self {
        Self { border }
    }

    pub fn border(&self) -> BorderType {
        self.border
    }
}

/// Integer corner and fractional weights of a bilinear footprint
#[inline]
fn footprint(x: f32, y: f32) -> (i32, i32, f32, f32) {
    let x = clamp_coord(x);
    let y = clamp_coord(y);
    let x0 = x.floor();
    let y0 = y.floor();
    (x0 as i32, y0 as i32, x - x0, y - y0)
}

/// True if the 2x2 block starting at `(x0, y0)` lies inside a `w` by `h` image
#[inline]
fn block_inside(x0: i32, y0: i32, w: u32, h: u32) -> bool {
    x0 >= 0 && y0 >= 0 && (x0 as i64 + 1) < w as i64 && (y0 as i64 + 1) < h as i64
}

impl<T: Pixel> InterpolatePixel<GrayImage<T>> for BilinearPixel {
    fn required_border(&self) -> u32 {
        1
    }

    #[inline]
    fn get(&self, image: &GrayImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let (x0, y0, ax, ay) = footprint(x, y);
        if !block_inside(x0, y0, image.width(), image.height()) {
            self.get_border(image, x, y, values);
            return;
        }
        let idx = image.index_of(x0 as u32, y0 as u32);
        let stride = image.stride();
        let data = image.data();
        values[0] = lerp2(
            data[idx].to_f32(),
            data[idx + 1].to_f32(),
            data[idx + stride].to_f32(),
            data[idx + stride + 1].to_f32(),
            ax,
            ay,
        );
    }

    fn get_border(&self, image: &GrayImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let (x0, y0, ax, ay) = footprint(x, y);
        let border = GrayBorder::new(image, self.border);
        values[0] = lerp2(
            border.get_f32(x0, y0),
            border.get_f32(x0 + 1, y0),
            border.get_f32(x0, y0 + 1),
            border.get_f32(x0 + 1, y0 + 1),
            ax,
            ay,
        );
    }
}

impl<T: Pixel> InterpolatePixel<InterleavedImage<T>> for BilinearPixel {
    fn required_border(&self) -> u32 {
        1
    }

    #[inline]
    fn get(&self, image: &InterleavedImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let (x0, y0, ax, ay) = footprint(x, y);
        if !block_inside(x0, y0, image.width(), image.height()) {
            self.get_border(image, x, y, values);
            return;
        }
        let bands = image.num_bands();
        let idx = image.index_of(x0 as u32, y0 as u32);
        let stride = image.stride();
        let data = image.data();
        for (band, v) in values.iter_mut().enumerate().take(bands) {
            let i = idx + band;
            *v = lerp2(
                data[i].to_f32(),
                data[i + bands].to_f32(),
                data[i + stride].to_f32(),
                data[i + stride + bands].to_f32(),
                ax,
                ay,
            );
        }
    }

    fn get_border(&self, image: &InterleavedImage<T>, x: f32, y: f32, values: &mut [f32]) {
        let (x0, y0, ax, ay) = footprint(x, y);
        let border = InterleavedBorder::new(image, self.border);
        for (band, v) in values.iter_mut().enumerate().take(image.num_bands()) {
            *v = lerp2(
                border.get_f32(x0, y0, band),
                border.get_f32(x0 + 1, y0, band),
                border.get_f32(x0, y0 + 1, band),
                border.get_f32(x0 + 1, y0 + 1, band),
                ax,
                ay,
            );
        }
    }
}
