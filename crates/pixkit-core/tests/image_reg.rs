//! Image container regression test
//!
//! Exercises plain and strided images, border access, and synthetic fills.
//!
//! Run with:
//! ```
//! cargo test -p pixkit-core --test image_reg
//! ```

use pixkit_core::misc::{fill_rectangle, fill_uniform};
use pixkit_core::{BorderType, GrayBorder, GrayImage, InterleavedBorder, InterleavedImage};
use pixkit_test::{RegParams, SUB_IMAGE_PAD, create_sub_image_of_gray, create_sub_image_of_interleaved};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn image_sub_image_reg() {
    let mut rp = RegParams::new("image_sub_image");

    let img = GrayImage::from_fn(6, 4, |x, y| (x + 10 * y) as u16).unwrap();
    let sub = create_sub_image_of_gray(&img).unwrap();

    rp.compare_values(0.0, if sub.is_contiguous() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(
        (6 + 2 * SUB_IMAGE_PAD) as f64,
        sub.stride() as f64,
        0.0,
    );
    rp.compare_gray(&img, &sub);
    rp.compare_values(img.sum(), sub.sum(), 0.0);
    rp.compare_gray(&img, &sub.to_contiguous());

    // writes through the view land inside the image only
    let mut sub = sub;
    sub.set_all(7);
    rp.compare_values(7.0 * 24.0, sub.sum(), 0.0);
    rp.compare_values(
        100.0,
        sub.data()[sub.start_index() - 1] as f64,
        0.0,
    );

    let inter = InterleavedImage::from_data(3, 2, 2, (0..12).map(|v| v as f32).collect()).unwrap();
    let inter_sub = create_sub_image_of_interleaved(&inter).unwrap();
    rp.compare_interleaved(&inter, &inter_sub);
    rp.compare_values(
        11.0,
        inter_sub.get_band(2, 1, 1).unwrap() as f64,
        0.0,
    );

    assert!(rp.cleanup(), "image sub-image test failed");
}

#[test]
fn image_border_reg() {
    let mut rp = RegParams::new("image_border");

    // [0 1 2 3]
    let img = GrayImage::from_data(4, 1, vec![0.0f32, 1.0, 2.0, 3.0]).unwrap();
    let sub = create_sub_image_of_gray(&img).unwrap();

    for img in [&img, &sub] {
        let at = |border: BorderType, x: i32| GrayBorder::new(img, border).get_f32(x, 0) as f64;
        rp.compare_values(0.0, at(BorderType::Extend, -2), 0.0);
        rp.compare_values(3.0, at(BorderType::Extend, 9), 0.0);
        rp.compare_values(1.0, at(BorderType::Reflect, -1), 0.0);
        rp.compare_values(2.0, at(BorderType::Reflect, 4), 0.0);
        rp.compare_values(3.0, at(BorderType::Wrap, -1), 0.0);
        rp.compare_values(0.0, at(BorderType::Zero, 4), 0.0);
        rp.compare_values(0.0, at(BorderType::Value(-5.0), 0), 0.0);
        rp.compare_values(-5.0, at(BorderType::Value(-5.0), -1), 0.0);
    }

    let inter = InterleavedImage::new_with_value(2, 2, 3, 4u8).unwrap();
    let border = InterleavedBorder::new(&inter, BorderType::Value(9.0));
    let mut values = [0.0f32; 3];
    border.get_pixel_f32(5, 5, &mut values);
    rp.compare_values(27.0, values.iter().sum::<f32>() as f64, 0.0);
    border.get_pixel_f32(1, 1, &mut values);
    rp.compare_values(12.0, values.iter().sum::<f32>() as f64, 0.0);

    assert!(rp.cleanup(), "image border test failed");
}

#[test]
fn image_fill_reg() {
    let mut rp = RegParams::new("image_fill");

    let mut rng = StdRng::seed_from_u64(234);
    let mut img = GrayImage::<f32>::new(10, 15).unwrap();
    fill_uniform(&mut img, 0.0, 2.0, &mut rng).unwrap();
    let in_range = img.pixels().all(|v| (0.0..2.0).contains(&v));
    rp.compare_values(1.0, if in_range { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if img.sum() > 0.0 { 1.0 } else { 0.0 }, 0.0);

    // same seed, same image
    let mut again = GrayImage::<f32>::new(10, 15).unwrap();
    fill_uniform(&mut again, 0.0, 2.0, &mut StdRng::seed_from_u64(234)).unwrap();
    rp.compare_gray(&img, &again);

    let mut bin = GrayImage::<u8>::new(8, 8).unwrap();
    fill_rectangle(&mut bin, 1, 6, -2, 5, 5);
    rp.compare_values(6.0, bin.count_nonzero() as f64, 0.0);
    rp.display_gray("clipped rectangle", &bin);

    assert!(fill_uniform(&mut img, 1.0, 1.0, &mut rng).is_err());

    assert!(rp.cleanup(), "image fill test failed");
}
