// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roundel Imaging: backend-agnostic imaging IR and backend traits.
//!
//! This crate defines the small set of drawing commands a circular image
//! view emits, and the trait that concrete renderers implement to consume
//! them. It sits between the view (which owns geometry and cache state) and
//! whatever rendering surface the host provides.
//!
//! # Position in the stack
//!
//! - **View**: the `roundel` crate computes bounds, radii and the center-crop
//!   transform, and decides what to paint in which order.
//! - **Imaging IR (this crate)**: paints and circle/rect primitives expressed
//!   as [`StateOp`] (mutate state) and [`DrawOp`] (produce pixels).
//! - **Backends**: `roundel_imaging_ref` records ops for tests,
//!   `roundel_imaging_vello_cpu` rasterizes them on the CPU.
//!
//! # Paints
//!
//! A [`Paint`] carries a [`peniko::Brush`] by value plus an optional
//! [`ColorFilter`]. Image brushes are sampled through the current paint
//! transform ([`StateOp::SetPaintTransform`]), which maps image pixel space
//! into local coordinates; this is how a view installs its center-crop
//! transform without touching the geometry transform.
//!
//! # Example
//!
//! ```
//! use roundel_imaging::{DrawOp, ImagingBackend, ImagingBackendExt, ImagingOp, Paint, StateOp};
//! use kurbo::Point;
//! use peniko::Color;
//!
//! #[derive(Default)]
//! struct Log(Vec<ImagingOp>);
//!
//! impl ImagingBackend for Log {
//!     fn state(&mut self, op: StateOp) {
//!         self.0.push(ImagingOp::State(op));
//!     }
//!     fn draw(&mut self, op: DrawOp) {
//!         self.0.push(ImagingOp::Draw(op));
//!     }
//! }
//!
//! let mut log = Log::default();
//! log.fill_circle(Point::new(50.0, 50.0), 40.0, Paint::solid(Color::WHITE));
//! assert_eq!(log.0.len(), 2);
//! ```

#![no_std]

pub use kurbo::{Affine, Point, Rect};
pub use peniko::{
    Brush, Color, Extend, ImageAlphaType, ImageBrush, ImageData, ImageFormat, ImageQuality,
    ImageSampler,
};

/// Stroke style type used by the imaging IR.
///
/// This is a re-export of [`kurbo::Stroke`]; circle borders only use the
/// width, but backends receive the full style.
pub type StrokeStyle = kurbo::Stroke;

/// A 4x5 color matrix applied to straight-alpha RGBA channels.
///
/// Rows produce R, G, B and A in turn. Each row is
/// `[r, g, b, a, offset]`, where the channel inputs and the offset are in
/// `0..=255` space:
///
/// ```text
/// R' = m[0]*R + m[1]*G + m[2]*B + m[3]*A + m[4]
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    /// The identity matrix; leaves every pixel unchanged.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Per-channel scale.
    #[inline]
    pub const fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([
            r, 0.0, 0.0, 0.0, 0.0, //
            0.0, g, 0.0, 0.0, 0.0, //
            0.0, 0.0, b, 0.0, 0.0, //
            0.0, 0.0, 0.0, a, 0.0,
        ])
    }

    /// Saturation adjustment; `0.0` is grayscale, `1.0` is the identity.
    pub fn saturation(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let r = 0.213 * inv;
        let g = 0.715 * inv;
        let b = 0.072 * inv;
        Self([
            r + sat,
            g,
            b,
            0.0,
            0.0,
            r,
            g + sat,
            b,
            0.0,
            0.0,
            r,
            g,
            b + sat,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
        ])
    }

    /// Apply the matrix to one straight-alpha RGBA pixel.
    pub fn apply(&self, px: [u8; 4]) -> [u8; 4] {
        let input = [
            f32::from(px[0]),
            f32::from(px[1]),
            f32::from(px[2]),
            f32::from(px[3]),
        ];
        let mut out = [0_u8; 4];
        for (channel, row) in out.iter_mut().zip(self.0.chunks_exact(5)) {
            let v = row[0] * input[0]
                + row[1] * input[1]
                + row[2] * input[2]
                + row[3] * input[3]
                + row[4];
            *channel = clamp_to_u8(v);
        }
        out
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the u8 range before the cast"
)]
#[inline]
fn clamp_to_u8(v: f32) -> u8 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        (v + 0.5) as u8
    }
}

/// Color filter applied to the pixels sampled by a paint.
///
/// Filters are carried through the IR untouched; backends decide how to
/// apply them (the CPU backend filters image pixels before sampling).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorFilter {
    /// Replace color with `color`, keeping the source coverage (source-in).
    Tint(Color),
    /// Transform channels through a [`ColorMatrix`].
    Matrix(ColorMatrix),
}

impl ColorFilter {
    /// Apply the filter to one straight-alpha RGBA pixel.
    pub fn apply(&self, px: [u8; 4]) -> [u8; 4] {
        match self {
            Self::Tint(color) => {
                let tint = color.to_rgba8();
                let alpha = u16::from(tint.a) * u16::from(px[3]) / 255;
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "product of two u8 values divided by 255 fits in u8"
                )]
                let alpha = alpha as u8;
                [tint.r, tint.g, tint.b, alpha]
            }
            Self::Matrix(matrix) => matrix.apply(px),
        }
    }

    /// Apply the filter to a tightly packed straight-alpha RGBA8 buffer.
    ///
    /// Trailing bytes that do not form a whole pixel are left untouched.
    pub fn apply_in_place(&self, pixels: &mut [u8]) {
        for px in pixels.chunks_exact_mut(4) {
            let out = self.apply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
    }
}

/// A paint: brush plus optional color filter.
#[derive(Clone, Debug)]
pub struct Paint {
    /// Brush used when rendering (solid color or image).
    pub brush: Brush,
    /// Optional filter applied to the brush's output.
    pub color_filter: Option<ColorFilter>,
}

impl Paint {
    /// A solid color paint without a filter.
    #[inline]
    pub fn solid(color: Color) -> Self {
        Self {
            brush: Brush::Solid(color),
            color_filter: None,
        }
    }

    /// An image paint without a filter.
    #[inline]
    pub fn image(brush: ImageBrush) -> Self {
        Self {
            brush: Brush::Image(brush),
            color_filter: None,
        }
    }

    /// Set the color filter.
    #[inline]
    #[must_use]
    pub fn with_color_filter(mut self, filter: Option<ColorFilter>) -> Self {
        self.color_filter = filter;
        self
    }
}

impl From<Color> for Paint {
    #[inline]
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

/// State operations that mutate the current imaging state.
#[derive(Clone, Debug)]
pub enum StateOp {
    /// Set the current geometry transform.
    SetTransform(Affine),
    /// Set the transform used when sampling image brushes.
    ///
    /// This maps brush (image pixel) space into local space and is separate
    /// from the geometry transform.
    SetPaintTransform(Affine),
    /// Set the current paint.
    SetPaint(Paint),
    /// Set the current stroke style.
    SetStroke(StrokeStyle),
}

/// Draw operations that produce pixels given the current state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill a circle with the current paint.
    FillCircle {
        /// Center in local coordinates.
        center: Point,
        /// Radius in local units.
        radius: f64,
    },
    /// Stroke a circle with the current stroke and paint.
    ///
    /// The stroke is centered on the circle's outline.
    StrokeCircle {
        /// Center in local coordinates.
        center: Point,
        /// Radius of the stroke's centerline.
        radius: f64,
    },
    /// Fill an axis-aligned rectangle with the current paint.
    FillRect(Rect),
}

/// A single imaging operation (state or draw).
#[derive(Clone, Debug)]
pub enum ImagingOp {
    /// State operation.
    State(StateOp),
    /// Draw operation.
    Draw(DrawOp),
}

/// Backend that consumes imaging operations.
///
/// Implementations apply operations in order. State set before a draw stays
/// in effect until replaced.
pub trait ImagingBackend {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);
}

/// Convenience helpers built on top of [`ImagingBackend`].
pub trait ImagingBackendExt: ImagingBackend {
    /// Fill a circle with `paint`.
    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint) {
        self.state(StateOp::SetPaint(paint));
        self.draw(DrawOp::FillCircle { center, radius });
    }

    /// Fill a circle with `paint` sampled through `paint_transform`.
    ///
    /// The paint transform is reset to identity afterwards.
    fn fill_circle_with_paint_transform(
        &mut self,
        center: Point,
        radius: f64,
        paint: Paint,
        paint_transform: Affine,
    ) {
        self.state(StateOp::SetPaintTransform(paint_transform));
        self.state(StateOp::SetPaint(paint));
        self.draw(DrawOp::FillCircle { center, radius });
        self.state(StateOp::SetPaintTransform(Affine::IDENTITY));
    }

    /// Stroke a circle of the given stroke `width` with `paint`.
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, paint: Paint) {
        self.state(StateOp::SetStroke(StrokeStyle::new(width)));
        self.state(StateOp::SetPaint(paint));
        self.draw(DrawOp::StrokeCircle { center, radius });
    }

    /// Fill an axis-aligned rectangle with `paint`.
    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.state(StateOp::SetPaint(paint));
        self.draw(DrawOp::FillRect(rect));
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}
