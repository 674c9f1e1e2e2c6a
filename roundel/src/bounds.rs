// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Padding and the centered square the circle is inscribed in.

use kurbo::Rect;

/// Direction used to resolve start/end padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Start is left.
    #[default]
    Ltr,
    /// Start is right.
    Rtl,
}

/// Padding in integer pixels, one value per edge.
///
/// Negative values are accepted and simply enlarge the available area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl Padding {
    /// No padding on any edge.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create padding from absolute edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create padding from relative edges, resolving start and end for `direction`.
    pub const fn from_relative(
        start: i32,
        top: i32,
        end: i32,
        bottom: i32,
        direction: LayoutDirection,
    ) -> Self {
        match direction {
            LayoutDirection::Ltr => Self::new(start, top, end, bottom),
            LayoutDirection::Rtl => Self::new(end, top, start, bottom),
        }
    }
}

/// Compute the largest square centered in the padded content area.
///
/// The arithmetic is done in `i64` so extreme sizes and paddings cannot
/// overflow. When the padded area has zero or negative extent the result is
/// degenerate (see [`is_empty`]); callers are expected to tolerate that.
pub fn calculate_bounds(width: i32, height: i32, padding: Padding) -> Rect {
    let available_width = i64::from(width) - i64::from(padding.left) - i64::from(padding.right);
    let available_height = i64::from(height) - i64::from(padding.top) - i64::from(padding.bottom);

    let side = available_width.min(available_height);

    let left = to_f64(i64::from(padding.left)) + to_f64(available_width - side) / 2.0;
    let top = to_f64(i64::from(padding.top)) + to_f64(available_height - side) / 2.0;
    let side = to_f64(side);

    Rect::new(left, top, left + side, top + side)
}

/// Whether `rect` has no area: `x0 >= x1` or `y0 >= y1`.
///
/// Unlike [`Rect::is_zero_area`] this treats inverted rectangles as empty.
pub fn is_empty(rect: Rect) -> bool {
    rect.x0 >= rect.x1 || rect.y0 >= rect.y1
}

// Bounded by the sum of three `i32` values, so the conversion is exact.
fn to_f64(v: i64) -> f64 {
    v as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_view_fills_bounds() {
        let rect = calculate_bounds(200, 200, Padding::ZERO);
        assert_eq!(rect, Rect::new(0.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn wide_view_is_centered_horizontally() {
        let rect = calculate_bounds(300, 100, Padding::ZERO);
        assert_eq!(rect, Rect::new(100.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn odd_leftover_splits_into_half_pixels() {
        let rect = calculate_bounds(101, 100, Padding::ZERO);
        assert_eq!(rect.x0, 0.5);
        assert_eq!(rect.width(), 100.0);
    }

    #[test]
    fn padding_is_respected() {
        let padding = Padding::new(10, 20, 30, 0);
        let rect = calculate_bounds(200, 200, padding);
        // Available 160 x 180, side 160.
        assert_eq!(rect, Rect::new(10.0, 30.0, 170.0, 190.0));
        assert!(rect.x0 >= f64::from(padding.left));
        assert!(rect.y0 >= f64::from(padding.top));
        assert!(rect.x1 <= f64::from(200 - padding.right));
        assert!(rect.y1 <= f64::from(200 - padding.bottom));
    }

    #[test]
    fn result_is_square_and_centered_for_many_sizes() {
        for (w, h) in [(1, 7), (64, 48), (333, 334), (1000, 3)] {
            let padding = Padding::new(2, 3, 4, 5);
            let rect = calculate_bounds(w, h, padding);
            assert_eq!(rect.width(), rect.height());

            let avail_w = f64::from(w - 6);
            let avail_h = f64::from(h - 8);
            let left_gap = rect.x0 - 2.0;
            let right_gap = (2.0 + avail_w) - rect.x1;
            let top_gap = rect.y0 - 3.0;
            let bottom_gap = (3.0 + avail_h) - rect.y1;
            assert_eq!(left_gap, right_gap);
            assert_eq!(top_gap, bottom_gap);
        }
    }

    #[test]
    fn zero_size_is_empty() {
        let rect = calculate_bounds(0, 0, Padding::ZERO);
        assert!(is_empty(rect));
    }

    #[test]
    fn oversized_padding_is_degenerate_not_panicking() {
        let rect = calculate_bounds(10, 10, Padding::new(20, 0, 20, 0));
        assert!(is_empty(rect));

        let rect = calculate_bounds(i32::MAX, i32::MAX, Padding::new(i32::MIN, 0, 0, 0));
        assert!(rect.width().is_finite());
    }

    #[test]
    fn relative_padding_follows_direction() {
        let ltr = Padding::from_relative(1, 2, 3, 4, LayoutDirection::Ltr);
        assert_eq!(ltr, Padding::new(1, 2, 3, 4));

        let rtl = Padding::from_relative(1, 2, 3, 4, LayoutDirection::Rtl);
        assert_eq!(rtl, Padding::new(3, 2, 1, 4));
    }
}
