// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Center-crop mapping from image pixel space into the drawable square.

use kurbo::{Affine, Rect, Vec2};

/// Uniform scale plus translation that center-crops an image into a rect.
///
/// The translation is relative to the rect's origin and is not yet rounded;
/// [`ShaderTransform::to_affine`] produces the final paint transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShaderTransform {
    /// Uniform scale applied to image pixels.
    pub scale: f64,
    /// Horizontal offset of the scaled image inside the rect.
    pub translate_x: f64,
    /// Vertical offset of the scaled image inside the rect.
    pub translate_y: f64,
}

impl ShaderTransform {
    /// Compute the center-crop of a `source_width` x `source_height` image into `rect`.
    ///
    /// The image is scaled so that it covers `rect` on both axes and is
    /// centered on the axis that overflows. Letterboxing never happens.
    ///
    /// Source dimensions must be non-zero; bitmaps produced by this crate
    /// always are.
    pub fn center_crop(source_width: u32, source_height: u32, rect: Rect) -> Self {
        debug_assert!(
            source_width > 0 && source_height > 0,
            "center-crop source must have a non-zero size"
        );
        let bw = f64::from(source_width);
        let bh = f64::from(source_height);
        let rw = rect.width();
        let rh = rect.height();

        if bw * rh > rw * bh {
            // Source is relatively wider: fit height, crop the sides.
            let scale = rh / bh;
            Self {
                scale,
                translate_x: (rw - bw * scale) * 0.5,
                translate_y: 0.0,
            }
        } else {
            let scale = rw / bw;
            Self {
                scale,
                translate_x: 0.0,
                translate_y: (rh - bh * scale) * 0.5,
            }
        }
    }

    /// The paint transform: scale, then translate by the rounded offset plus `rect`'s origin.
    ///
    /// Offsets are rounded half-up to whole pixels so the image edge lands on
    /// the pixel grid.
    pub fn to_affine(self, rect: Rect) -> Affine {
        Affine::scale(self.scale).then_translate(Vec2::new(
            round_half_up(self.translate_x) + rect.x0,
            round_half_up(self.translate_y) + rect.y0,
        ))
    }
}

/// Round to the nearest integer, with halves going towards positive infinity.
///
/// `-0.5` rounds to `0`, `-0.6` to `-1`.
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn wide_source_is_cropped_horizontally() {
        let t = ShaderTransform::center_crop(400, 200, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.translate_x, -50.0);
        assert_eq!(t.translate_y, 0.0);
    }

    #[test]
    fn tall_source_is_cropped_vertically() {
        let t = ShaderTransform::center_crop(50, 200, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.translate_x, 0.0);
        assert_eq!(t.translate_y, -150.0);
    }

    #[test]
    fn crop_covers_rect_for_many_aspect_ratios() {
        let rect = Rect::new(9.0, 9.0, 191.0, 191.0);
        for (w, h) in [(1, 1), (3, 7), (640, 480), (17, 1000), (182, 182)] {
            let t = ShaderTransform::center_crop(w, h, rect);
            assert!(t.scale > 0.0);
            let sw = f64::from(w) * t.scale;
            let sh = f64::from(h) * t.scale;
            let eps = 1e-9;
            assert!(sw + eps >= rect.width(), "{w}x{h} width");
            assert!(sh + eps >= rect.height(), "{w}x{h} height");
            // One axis fits exactly.
            assert!(
                (sw - rect.width()).abs() < eps || (sh - rect.height()).abs() < eps,
                "{w}x{h} fits one axis"
            );
            // The overflow is split evenly.
            assert!((t.translate_x * 2.0 + sw - rect.width()).abs() < eps);
            assert!((t.translate_y * 2.0 + sh - rect.height()).abs() < eps);
        }
    }

    #[test]
    fn affine_rounds_and_offsets_by_rect_origin() {
        let rect = Rect::new(10.0, 20.0, 110.0, 120.0);
        let t = ShaderTransform {
            scale: 2.0,
            translate_x: -2.5,
            translate_y: 3.5,
        };
        let affine = t.to_affine(rect);
        assert_eq!(affine * Point::ORIGIN, Point::new(-2.0 + 10.0, 4.0 + 20.0));
        assert_eq!(affine * Point::new(1.0, 1.0), Point::new(10.0, 26.0));
    }

    #[test]
    fn half_values_round_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(1.49), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-0.6), -1.0);
        assert_eq!(round_half_up(-50.0), -50.0);
    }
}
