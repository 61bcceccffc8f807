//! Normalized bounding-box remapping for geometric transforms.
//!
//! Image origin is top-left, y increasing downward. All coordinates are
//! fractions of the image dimensions.

use crate::augment::TransformKind;
use crate::augment::labels::Annotation;

/// Lower clamp bound for every output coordinate. Keeps boxes strictly
/// inside the image and non-degenerate after rounding drift.
pub const COORD_MIN: f64 = 0.001;
pub const COORD_MAX: f64 = 0.999;

fn clamp(v: f64) -> f64 {
    v.clamp(COORD_MIN, COORD_MAX)
}

/// Remap one annotation under the given transform.
///
/// Photometric transforms leave the geometry untouched; the class id is
/// never altered. Every returned coordinate is clamped to
/// `[COORD_MIN, COORD_MAX]` regardless of transform.
pub fn remap(ann: &Annotation, transform: TransformKind) -> Annotation {
    let (mut xc, mut yc, mut w, mut h) = (ann.x_center, ann.y_center, ann.width, ann.height);

    match transform {
        TransformKind::HorizontalFlip => {
            xc = 1.0 - xc;
        }
        TransformKind::VerticalFlip => {
            yc = 1.0 - yc;
        }
        // 90 degrees counter-clockwise: the right edge becomes the top edge.
        TransformKind::Rotate90 => {
            (xc, yc) = (yc, 1.0 - xc);
            (w, h) = (h, w);
        }
        TransformKind::Rotate180 => {
            xc = 1.0 - xc;
            yc = 1.0 - yc;
        }
        TransformKind::GaussianNoise
        | TransformKind::Brightness
        | TransformKind::Contrast
        | TransformKind::GaussianBlur => {}
    }

    Annotation {
        class_id: ann.class_id,
        x_center: clamp(xc),
        y_center: clamp(yc),
        width: clamp(w),
        height: clamp(h),
    }
}
