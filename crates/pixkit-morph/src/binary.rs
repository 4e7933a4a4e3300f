//! Binary hit-miss transform
//!
//! Binary images are `GrayImage<u8>` holding only 0 (background) and 1
//! (foreground). Neighbors outside the image are background.

use pixkit_core::{BorderType, GrayBorder, GrayImage};

use crate::{MorphError, MorphResult, Sel};

/// Fail with `NotBinary` on the first pixel that is neither 0 nor 1
pub(crate) fn check_binary(binary: &GrayImage<u8>) -> MorphResult<()> {
    for y in 0..binary.height() {
        if let Some((x, &value)) = binary.row(y).iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(MorphError::NotBinary {
                x: x as u32,
                y,
                value,
            });
        }
    }
    Ok(())
}

/// Hit-miss transform
///
/// The HMT identifies pixels that match both the hit pattern (foreground)
/// AND the miss pattern (background). Used for pattern detection.
///
/// # Errors
///
/// Returns `MorphError::NotBinary` if `binary` holds values other than 0 and 1.
pub fn hit_miss_transform(binary: &GrayImage<u8>, sel: &Sel) -> MorphResult<GrayImage<u8>> {
    check_binary(binary)?;

    let (w, h) = binary.dimensions();
    let mut out = GrayImage::new(w, h)?;

    let hit_offsets: Vec<_> = sel.hit_offsets().collect();
    let miss_offsets: Vec<_> = sel.miss_offsets().collect();
    let border = GrayBorder::new(binary, BorderType::Zero);

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let hits = hit_offsets
                .iter()
                .all(|&(dx, dy)| border.get(x + dx, y + dy) == 1);
            let matched = hits
                && miss_offsets
                    .iter()
                    .all(|&(dx, dy)| border.get(x + dx, y + dy) == 0);
            if matched {
                out.set_pixel_unchecked(x as u32, y as u32, 1);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_binary() {
        let mut img = GrayImage::<u8>::new(4, 3).unwrap();
        img.set_pixel(1, 1, 1).unwrap();
        assert!(check_binary(&img).is_ok());

        img.set_pixel(2, 2, 7).unwrap();
        match check_binary(&img) {
            Err(MorphError::NotBinary { x, y, value }) => assert_eq!((x, y, value), (2, 2, 7)),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_hit_miss_isolated_pixel() {
        // set pixel with all eight neighbors unset
        let sel = Sel::from_string("ooo\noXo\nooo", 0, 0).unwrap();
        let mut img = GrayImage::<u8>::new(5, 5).unwrap();
        img.set_pixel(1, 1, 1).unwrap();
        img.set_pixel(3, 3, 1).unwrap();
        img.set_pixel(4, 3, 1).unwrap();

        let out = hit_miss_transform(&img, &sel).unwrap();
        assert_eq!(out.count_nonzero(), 1);
        assert_eq!(out.get_pixel(1, 1).unwrap(), 1);
    }

    #[test]
    fn test_hit_miss_outside_is_background() {
        let sel = Sel::from_string("ooo\noXo\nooo", 0, 0).unwrap();
        let mut img = GrayImage::<u8>::new(3, 3).unwrap();
        img.set_pixel(0, 0, 1).unwrap();
        let out = hit_miss_transform(&img, &sel).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 1);

        // a hit outside the image never matches
        let sel = Sel::from_string("xX", 1, 0).unwrap();
        let img = GrayImage::new_with_value(3, 1, 1u8).unwrap();
        let out = hit_miss_transform(&img, &sel).unwrap();
        assert_eq!(out.data(), &[0, 1, 1]);
    }
}
