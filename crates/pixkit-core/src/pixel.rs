//! Numeric pixel types
//!
//! Every sample type an image can hold implements [`Pixel`]. Samples are
//! converted to `f32` for interpolation and converted back when written.

use std::fmt::Debug;

/// A numeric sample type stored in an image
///
/// Conversion from `f32` truncates toward zero and saturates at the range of
/// integer types; `NaN` becomes zero.
pub trait Pixel: Copy + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static {
    /// The zero value for this sample type
    const ZERO: Self;

    /// Widen the sample to `f32`
    fn to_f32(self) -> f32;

    /// Narrow an `f32` back into this sample type
    fn from_f32(value: f32) -> Self;
}

macro_rules! impl_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                const ZERO: Self = 0 as $t;

                #[inline]
                fn to_f32(self) -> f32 {
                    self as f32
                }

                #[inline]
                fn from_f32(value: f32) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_pixel!(u8, u16, i16, i32, f32, f64);
