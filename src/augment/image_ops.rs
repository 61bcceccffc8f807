//! Pixel-level operations backing each transform.
//!
//! Every function takes the source by reference and returns a new image so
//! the caller can apply several transforms to the same source.

use image::DynamicImage;
use imageproc::filter::gaussian_blur_f32;
use rand::thread_rng;
use rand_distr::{Distribution, Normal};

use crate::augment::TransformKind;

/// Standard deviation of the additive Gaussian noise, on a 0-255 scale.
pub const NOISE_STD_DEV: f64 = 25.0;
/// Multiplicative brightness factor.
pub const BRIGHTNESS_FACTOR: f32 = 1.2;
/// Contrast factor applied around the mean luma.
pub const CONTRAST_FACTOR: f32 = 1.3;
/// Gaussian blur radius.
pub const BLUR_SIGMA: f32 = 2.0;

/// Apply one transform, returning the transformed image.
///
/// `Rotate90` is counter-clockwise, matching the label remapping in
/// [`crate::augment::coords`]; the two must not diverge.
pub fn apply(img: &DynamicImage, transform: TransformKind) -> DynamicImage {
    match transform {
        TransformKind::HorizontalFlip => img.fliph(),
        TransformKind::VerticalFlip => img.flipv(),
        TransformKind::Rotate90 => img.rotate270(),
        TransformKind::Rotate180 => img.rotate180(),
        TransformKind::GaussianNoise => gaussian_noise(img),
        TransformKind::Brightness => scale_brightness(img),
        TransformKind::Contrast => adjust_contrast(img),
        TransformKind::GaussianBlur => blur(img),
    }
}

/// Apply `f` to every color channel, leaving alpha untouched.
///
/// The output keeps the alpha-ness of the source so a JPEG input can still
/// be re-encoded as JPEG afterwards.
fn map_color_channels(img: &DynamicImage, mut f: impl FnMut(u8) -> u8) -> DynamicImage {
    if img.color().has_alpha() {
        let mut buf = img.to_rgba8();
        for px in buf.pixels_mut() {
            for ch in &mut px.0[..3] {
                *ch = f(*ch);
            }
        }
        DynamicImage::ImageRgba8(buf)
    } else {
        let mut buf = img.to_rgb8();
        for px in buf.pixels_mut() {
            for ch in &mut px.0 {
                *ch = f(*ch);
            }
        }
        DynamicImage::ImageRgb8(buf)
    }
}

fn gaussian_noise(img: &DynamicImage) -> DynamicImage {
    let normal =
        Normal::new(0.0, NOISE_STD_DEV).expect("noise standard deviation is positive and finite");
    let mut rng = thread_rng();
    map_color_channels(img, |p| {
        let noisy = p as f64 + normal.sample(&mut rng);
        noisy.round().clamp(0.0, 255.0) as u8
    })
}

fn scale_brightness(img: &DynamicImage) -> DynamicImage {
    map_color_channels(img, |p| {
        (p as f32 * BRIGHTNESS_FACTOR).round().clamp(0.0, 255.0) as u8
    })
}

fn adjust_contrast(img: &DynamicImage) -> DynamicImage {
    // Stretch every channel around the mean luma of the whole image.
    let luma = img.to_luma8();
    let total: u64 = luma.pixels().map(|p| p.0[0] as u64).sum();
    let count = (luma.width() as u64 * luma.height() as u64).max(1);
    let mean = total as f32 / count as f32;
    map_color_channels(img, |p| {
        (mean + (p as f32 - mean) * CONTRAST_FACTOR)
            .round()
            .clamp(0.0, 255.0) as u8
    })
}

fn blur(img: &DynamicImage) -> DynamicImage {
    if img.color().has_alpha() {
        DynamicImage::ImageRgba8(gaussian_blur_f32(&img.to_rgba8(), BLUR_SIGMA))
    } else {
        DynamicImage::ImageRgb8(gaussian_blur_f32(&img.to_rgb8(), BLUR_SIGMA))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::coords::remap;
    use crate::augment::labels::Annotation;
    use image::{GenericImageView, Rgb, RgbImage};

    fn marker_image(w: u32, h: u32, marker: (u32, u32)) -> DynamicImage {
        let img = RgbImage::from_fn(w, h, |x, y| {
            if (x, y) == marker {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 0])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    fn find_marker(img: &DynamicImage) -> (u32, u32) {
        for (x, y, px) in img.pixels() {
            if px.0[0] == 255 {
                return (x, y);
            }
        }
        panic!("marker pixel not found");
    }

    #[test]
    fn horizontal_flip_mirrors_x() {
        let out = apply(&marker_image(4, 3, (0, 1)), TransformKind::HorizontalFlip);
        assert_eq!(find_marker(&out), (3, 1));
    }

    #[test]
    fn vertical_flip_mirrors_y() {
        let out = apply(&marker_image(4, 3, (2, 0)), TransformKind::VerticalFlip);
        assert_eq!(find_marker(&out), (2, 2));
    }

    #[test]
    fn rotate_90_swaps_dimensions() {
        let out = apply(&marker_image(5, 3, (0, 0)), TransformKind::Rotate90);
        assert_eq!((out.width(), out.height()), (3, 5));
    }

    #[test]
    fn rotate_180_keeps_dimensions() {
        let out = apply(&marker_image(5, 3, (0, 0)), TransformKind::Rotate180);
        assert_eq!((out.width(), out.height()), (5, 3));
    }

    // Pins the rotation sense: the pixel rotation and the label remapping
    // must agree on counter-clockwise.
    #[test]
    fn rotate_90_pixels_and_labels_agree() {
        let (w, h) = (3u32, 2u32);
        let marker = (2u32, 0u32); // top-right
        let out = apply(&marker_image(w, h, marker), TransformKind::Rotate90);
        let (mx, my) = find_marker(&out);
        // Counter-clockwise sends the top-right corner to the top-left.
        assert_eq!((mx, my), (0, 0));

        let ann = Annotation {
            class_id: 0,
            x_center: (marker.0 as f64 + 0.5) / w as f64,
            y_center: (marker.1 as f64 + 0.5) / h as f64,
            width: 1.0 / w as f64,
            height: 1.0 / h as f64,
        };
        let mapped = remap(&ann, TransformKind::Rotate90);
        let expected_x = (mx as f64 + 0.5) / out.width() as f64;
        let expected_y = (my as f64 + 0.5) / out.height() as f64;
        assert!((mapped.x_center - expected_x).abs() < 1e-9);
        assert!((mapped.y_center - expected_y).abs() < 1e-9);
    }

    #[test]
    fn brightness_multiplies_channels() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([100, 50, 200])));
        let out = apply(&img, TransformKind::Brightness);
        let px = out.to_rgb8().get_pixel(0, 0).0;
        assert_eq!(px, [120, 60, 240]);
    }

    #[test]
    fn contrast_leaves_uniform_image_unchanged() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([90, 90, 90])));
        let out = apply(&img, TransformKind::Contrast);
        assert_eq!(out.to_rgb8().get_pixel(2, 2).0, [90, 90, 90]);
    }

    #[test]
    fn noise_changes_values_but_not_shape() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([128, 128, 128])));
        let out = apply(&img, TransformKind::GaussianNoise);
        assert_eq!((out.width(), out.height()), (16, 16));
        let changed = out
            .to_rgb8()
            .pixels()
            .any(|p| p.0 != [128, 128, 128]);
        assert!(changed, "expected noise to perturb at least one pixel");
    }

    #[test]
    fn blur_keeps_dimensions_and_color_type() {
        let img = marker_image(8, 6, (4, 3));
        let out = apply(&img, TransformKind::GaussianBlur);
        assert_eq!((out.width(), out.height()), (8, 6));
        assert!(!out.color().has_alpha());
    }

    #[test]
    fn photometric_output_keeps_source_alpha_ness() {
        let rgb = marker_image(4, 4, (0, 0));
        for kind in [
            TransformKind::GaussianNoise,
            TransformKind::Brightness,
            TransformKind::Contrast,
            TransformKind::GaussianBlur,
        ] {
            assert!(!apply(&rgb, kind).color().has_alpha(), "{kind:?}");
        }
    }
}
