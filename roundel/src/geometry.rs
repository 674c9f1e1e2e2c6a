// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Border and drawable circles derived from the view bounds.

use kurbo::{Point, Rect, RoundedRect};

use crate::bounds::is_empty;

/// The two circles a view paints: the border ring and the image disc.
///
/// Everything here is a pure function of the bounds, the border width and
/// the overlay mode; see [`CircleGeometry::compute`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CircleGeometry {
    /// Square bounding the border ring. Outlines and hit testing use this.
    pub border_rect: Rect,
    /// Radius of the border stroke's centerline.
    pub border_radius: f64,
    /// Square the image is painted into.
    pub drawable_rect: Rect,
    /// Radius of the image disc.
    pub drawable_radius: f64,
}

impl CircleGeometry {
    /// Geometry before the first layout: everything zero.
    pub const EMPTY: Self = Self {
        border_rect: Rect::ZERO,
        border_radius: 0.0,
        drawable_rect: Rect::ZERO,
        drawable_radius: 0.0,
    };

    /// Derive both circles from `bounds` (see [`calculate_bounds`](crate::calculate_bounds)).
    ///
    /// The border radius leaves room for half the stroke on each side, so the
    /// ring stays inside `bounds`. Without overlay the drawable square is
    /// inset by `border_width - 1`, leaving one pixel of overlap under the
    /// ring so antialiased edges do not show a seam. With overlay the image
    /// fills the whole border square and the ring is painted on top.
    pub fn compute(bounds: Rect, border_width: u32, border_overlay: bool) -> Self {
        let bw = f64::from(border_width);

        let border_rect = bounds;
        let border_radius =
            ((border_rect.height() - bw) / 2.0).min((border_rect.width() - bw) / 2.0);

        let drawable_rect = if !border_overlay && border_width > 0 {
            let d = bw - 1.0;
            Rect::new(
                border_rect.x0 + d,
                border_rect.y0 + d,
                border_rect.x1 - d,
                border_rect.y1 - d,
            )
        } else {
            border_rect
        };
        let drawable_radius = (drawable_rect.height() / 2.0).min(drawable_rect.width() / 2.0);

        Self {
            border_rect,
            border_radius,
            drawable_rect,
            drawable_radius,
        }
    }

    /// Center of the border ring.
    pub fn border_center(&self) -> Point {
        self.border_rect.center()
    }

    /// Center of the image disc.
    pub fn drawable_center(&self) -> Point {
        self.drawable_rect.center()
    }

    /// Whether a layout with positive area has happened.
    pub fn is_laid_out(&self) -> bool {
        !is_empty(self.border_rect)
    }

    /// Circular hit test against the border circle.
    ///
    /// Points on the circle count as inside. Before layout (empty border
    /// square) every point is accepted.
    pub fn contains(&self, point: Point) -> bool {
        if !self.is_laid_out() {
            return true;
        }
        (point - self.border_center()).hypot2() <= self.border_radius * self.border_radius
    }

    /// Outline for clipping and elevation shadows.
    ///
    /// The border square is rounded out to whole pixels and its corners are
    /// rounded with half its width, giving a circle for square bounds.
    pub fn outline(&self) -> RoundedRect {
        let rect = self.border_rect.expand();
        RoundedRect::from_rect(rect, rect.width() / 2.0)
    }
}

impl Default for CircleGeometry {
    fn default() -> Self {
        Self::EMPTY
    }
}
