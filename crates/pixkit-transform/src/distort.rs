//! Image distortion engine
//!
//! [`ImageDistort`] fills a destination image by mapping every destination
//! pixel through a [`PixelTransform`] into the source and sampling there
//! with an [`InterpolatePixel`].
//!
//! Two settings combine into four behaviours:
//!
//! | render all | mask | inside source | outside source |
//! |---|---|---|---|
//! | on | no | write `get` | write `get_border` |
//! | on | yes | write `get`, mask 1 | write `get_border`, mask 0 |
//! | off | no | write `get` | untouched |
//! | off | yes | write `get`, mask 1 | untouched, mask 0 |
//!
//! The mask only reports validity; it never decides what gets written.
//!
//! # Examples
//!
//! ```
//! use pixkit_core::{BorderType, GrayImage};
//! use pixkit_transform::{BilinearPixel, ImageDistort, Translation};
//!
//! let src = GrayImage::from_fn(8, 8, |x, _| x as f32).unwrap();
//! let mut dst = GrayImage::<f32>::new(8, 8).unwrap();
//!
//! let mut distort = ImageDistort::new(
//!     Translation::new(0.5, 0.0),
//!     BilinearPixel::new(BorderType::Extend),
//! );
//! distort.set_render_all(false);
//! let written = distort.apply(&src, &mut dst).unwrap();
//! assert_eq!(written, 7 * 8);
//! assert_eq!(dst.get_pixel(2, 3).unwrap(), 2.5);
//! ```

use pixkit_core::{AssignPixel, Error, GrayImage, ImageBase, Pixel, check_same_shape};
use tracing::debug;

use crate::TransformResult;
use crate::interpolate::InterpolatePixel;
use crate::model::PixelTransform;

/// Pixel-wise remapping of one image into another
#[derive(Debug, Clone)]
pub struct ImageDistort<M, P> {
    model: M,
    interp: P,
    render_all: bool,
    /// Per-pixel band vector, reused across calls
    values: Vec<f32>,
}

impl<M: PixelTransform, P> ImageDistort<M, P> {
    /// Create an engine with render-all enabled
    pub fn new(model: M, interp: P) -> Self {
        Self {
            model,
            interp,
            render_all: true,
            values: Vec::new(),
        }
    }

    /// Replace the transform used by later calls
    pub fn set_model(&mut self, model: M) {
        self.model = model;
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn interpolator(&self) -> &P {
        &self.interp
    }

    pub fn interpolator_mut(&mut self) -> &mut P {
        &mut self.interp
    }

    /// Whether pixels that map outside the source are still written
    pub fn render_all(&self) -> bool {
        self.render_all
    }

    pub fn set_render_all(&mut self, render_all: bool) {
        self.render_all = render_all;
    }

    /// Render `src` into `dst`
    ///
    /// Returns the number of destination pixels written.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if `src` and `dst` differ in size
    /// and `Error::BandMismatch` if they differ in band count. Nothing is
    /// written in that case.
    pub fn apply<I, O>(&mut self, src: &I, dst: &mut O) -> TransformResult<usize>
    where
        I: ImageBase,
        O: AssignPixel,
        P: InterpolatePixel<I>,
    {
        self.check_images(src, dst)?;
        let written = self.render(src, dst, None);
        debug!(
            width = dst.width(),
            height = dst.height(),
            render_all = self.render_all,
            written,
            "distort applied"
        );
        Ok(written)
    }

    /// Render `src` into `dst` and record per-pixel validity in `mask`
    ///
    /// `mask` is set to 1 where the sample came from inside the source and
    /// to 0 elsewhere. The destination is written exactly as by
    /// [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// As [`apply`](Self::apply), plus `Error::DimensionMismatch` if `mask`
    /// is not the size of `dst`.
    pub fn apply_masked<I, O>(
        &mut self,
        src: &I,
        dst: &mut O,
        mask: &mut GrayImage<u8>,
    ) -> TransformResult<usize>
    where
        I: ImageBase,
        O: AssignPixel,
        P: InterpolatePixel<I>,
    {
        self.check_images(src, dst)?;
        check_same_shape(dst.dimensions(), mask.dimensions())?;
        let written = self.render(src, dst, Some(mask));
        debug!(
            width = dst.width(),
            height = dst.height(),
            render_all = self.render_all,
            written,
            "distort applied with mask"
        );
        Ok(written)
    }

    fn check_images<I: ImageBase, O: ImageBase>(&self, src: &I, dst: &O) -> TransformResult<()> {
        check_same_shape(src.dimensions(), dst.dimensions())?;
        if src.num_bands() != dst.num_bands() {
            return Err(Error::BandMismatch {
                expected: src.num_bands(),
                actual: dst.num_bands(),
            }
            .into());
        }
        Ok(())
    }

    fn render<I, O>(&mut self, src: &I, dst: &mut O, mut mask: Option<&mut GrayImage<u8>>) -> usize
    where
        I: ImageBase,
        O: AssignPixel,
        P: InterpolatePixel<I>,
    {
        self.values.clear();
        self.values.resize(src.num_bands(), 0.0);

        let (width, height) = dst.dimensions();
        let mut written = 0;
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = self.model.compute(x as i32, y as i32);
                let inside = self.interp.is_inside(src, sx, sy);

                if inside {
                    self.interp.get(src, sx, sy, &mut self.values);
                } else if self.render_all {
                    self.interp.get_border(src, sx, sy, &mut self.values);
                }
                if inside || self.render_all {
                    dst.assign(x, y, &self.values);
                    written += 1;
                }
                if let Some(mask) = mask.as_deref_mut() {
                    mask.set_pixel_unchecked(x, y, inside as u8);
                }
            }
        }
        written
    }
}

/// Render `src` through `model` into a new image of the same size
///
/// Every pixel is written; samples from outside the source follow the
/// interpolator's border policy.
pub fn distort_gray<T, M, P>(src: &GrayImage<T>, model: M, interp: P) -> TransformResult<GrayImage<T>>
where
    T: Pixel,
    M: PixelTransform,
    P: InterpolatePixel<GrayImage<T>>,
{
    let mut dst = GrayImage::new(src.width(), src.height())?;
    ImageDistort::new(model, interp).apply(src, &mut dst)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BilinearPixel, NearestNeighborPixel, Translation};
    use pixkit_core::{BorderType, InterleavedImage};

    #[test]
    fn test_identity_copies_image() {
        let src = GrayImage::from_fn(5, 4, |x, y| (x * 3 + y) as u8).unwrap();
        let mut dst = GrayImage::<u8>::new(5, 4).unwrap();
        let mut distort = ImageDistort::new(
            |x: i32, y: i32| (x as f32, y as f32),
            NearestNeighborPixel::default(),
        );
        assert_eq!(distort.apply(&src, &mut dst).unwrap(), 20);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let src = GrayImage::<f32>::new(5, 4).unwrap();
        let mut dst = GrayImage::<f32>::new(4, 4).unwrap();
        let mut distort = ImageDistort::new(Translation::default(), BilinearPixel::default());
        assert!(distort.apply(&src, &mut dst).is_err());

        let mut dst = GrayImage::<f32>::new(5, 4).unwrap();
        let mut mask = GrayImage::<u8>::new(5, 3).unwrap();
        assert!(distort.apply_masked(&src, &mut dst, &mut mask).is_err());
    }

    #[test]
    fn test_band_mismatch_rejected() {
        let src = InterleavedImage::<u8>::new(3, 3, 3).unwrap();
        let mut dst = InterleavedImage::<u8>::new(3, 3, 2).unwrap();
        let mut distort = ImageDistort::new(Translation::default(), BilinearPixel::default());
        let err = distort.apply(&src, &mut dst).unwrap_err();
        assert!(matches!(
            err,
            crate::TransformError::Core(Error::BandMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_render_all_off_leaves_outside_untouched() {
        let src = GrayImage::new_with_value(4, 4, 5u8).unwrap();
        let mut dst = GrayImage::new_with_value(4, 4, 9u8).unwrap();
        let mut distort = ImageDistort::new(
            Translation::new(2.0, 0.0),
            NearestNeighborPixel::new(BorderType::Zero),
        );
        distort.set_render_all(false);
        assert_eq!(distort.apply(&src, &mut dst).unwrap(), 8);
        assert_eq!(dst.row(0), &[5, 5, 9, 9]);

        distort.set_render_all(true);
        assert_eq!(distort.apply(&src, &mut dst).unwrap(), 16);
        assert_eq!(dst.row(0), &[5, 5, 0, 0]);
    }

    #[test]
    fn test_set_model_between_runs() {
        let src = GrayImage::from_fn(4, 1, |x, _| x as f32).unwrap();
        let mut dst = GrayImage::<f32>::new(4, 1).unwrap();
        let mut distort = ImageDistort::new(
            Translation::new(1.0, 0.0),
            NearestNeighborPixel::new(BorderType::Extend),
        );
        distort.apply(&src, &mut dst).unwrap();
        assert_eq!(dst.row(0), &[1.0, 2.0, 3.0, 3.0]);

        distort.set_model(Translation::new(-1.0, 0.0));
        distort.apply(&src, &mut dst).unwrap();
        assert_eq!(dst.row(0), &[0.0, 0.0, 1.0, 2.0]);
    }
}
