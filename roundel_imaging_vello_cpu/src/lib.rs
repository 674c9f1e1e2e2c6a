// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed implementation of the Roundel imaging backend.
//!
//! This crate implements [`ImagingBackend`] on top of the sparse-strips
//! [`vello_cpu::RenderContext`], so circle fills, borders and image brushes
//! emitted by a view can be rasterized without a GPU.
//!
//! Color filters and image alpha are folded into a copy of the image pixels
//! before the brush is handed to `vello_cpu`; solid colors are filtered
//! directly.

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use kurbo::Affine;
use peniko::{Blob, Brush, Color, ImageAlphaType, ImageBrush, ImageData};
use roundel_imaging::{ColorFilter, DrawOp, ImagingBackend, Paint, StateOp};
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath, Circle, Rect, Shape, Stroke};
use vello_cpu::{
    Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings,
};

/// Flattening tolerance used when converting circles to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// CPU-backed implementation of the imaging backend using `vello_cpu`.
pub struct VelloCpuImagingBackend<'ctx> {
    /// Underlying Vello CPU render context to draw into.
    pub ctx: &'ctx mut RenderContext,
    current_paint: Option<Paint>,
}

impl fmt::Debug for VelloCpuImagingBackend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VelloCpuImagingBackend { .. }")
    }
}

impl<'ctx> VelloCpuImagingBackend<'ctx> {
    /// Create a new backend that renders into the given CPU render context.
    pub fn new(ctx: &'ctx mut RenderContext) -> Self {
        Self {
            ctx,
            current_paint: None,
        }
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }

    fn circle_path(center: kurbo::Point, radius: f64) -> BezPath {
        Circle::new((center.x, center.y), radius.max(0.0)).to_path(PATH_TOLERANCE)
    }

    fn apply_current_paint(&mut self) {
        let Some(Paint {
            brush,
            color_filter,
        }) = self.current_paint.clone()
        else {
            return;
        };
        match brush {
            Brush::Solid(color) => {
                self.ctx.set_paint(filter_color(color, color_filter.as_ref()));
            }
            Brush::Gradient(gradient) => {
                self.ctx.set_paint(gradient);
            }
            Brush::Image(image_brush) => {
                let image_brush = bake_image_brush(image_brush, color_filter.as_ref());
                let source = ImageSource::from_peniko_image_data(&image_brush.image);
                let image = CpuImage {
                    image: source,
                    sampler: image_brush.sampler,
                };
                self.ctx.set_paint(image);
            }
        }
    }
}

fn filter_color(color: Color, filter: Option<&ColorFilter>) -> Color {
    let Some(filter) = filter else {
        return color;
    };
    let rgba = color.to_rgba8();
    let [r, g, b, a] = filter.apply([rgba.r, rgba.g, rgba.b, rgba.a]);
    Color::from_rgba8(r, g, b, a)
}

/// Fold the color filter and the sampler alpha into a copy of the pixels.
///
/// Returns the brush unchanged when there is nothing to fold.
fn bake_image_brush(brush: ImageBrush, filter: Option<&ColorFilter>) -> ImageBrush {
    let alpha = brush.sampler.alpha.clamp(0.0, 1.0);
    if filter.is_none() && alpha >= 1.0 {
        return brush;
    }

    let mut pixels: Vec<u8> = brush.image.data.data().to_vec();
    let premultiplied = matches!(brush.image.alpha_type, ImageAlphaType::AlphaPremultiplied);

    if let Some(filter) = filter {
        if premultiplied {
            // Filters are defined on straight alpha.
            for px in pixels.chunks_exact_mut(4) {
                let straight = unpremultiply([px[0], px[1], px[2], px[3]]);
                let filtered = filter.apply(straight);
                px.copy_from_slice(&premultiply(filtered));
            }
        } else {
            filter.apply_in_place(&mut pixels);
        }
    }

    if alpha < 1.0 {
        for px in pixels.chunks_exact_mut(4) {
            if premultiplied {
                for channel in px.iter_mut() {
                    *channel = scale_u8(*channel, alpha);
                }
            } else {
                px[3] = scale_u8(px[3], alpha);
            }
        }
    }

    let mut sampler = brush.sampler;
    sampler.alpha = 1.0;
    ImageBrush {
        image: ImageData {
            data: Blob::from(pixels),
            format: brush.image.format,
            alpha_type: brush.image.alpha_type,
            width: brush.image.width,
            height: brush.image.height,
        },
        sampler,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "inputs are u8 values scaled by a factor in 0..=1"
)]
fn scale_u8(v: u8, factor: f32) -> u8 {
    (f32::from(v) * factor + 0.5) as u8
}

fn premultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let f = f32::from(a) / 255.0;
    [scale_u8(r, f), scale_u8(g, f), scale_u8(b, f), a]
}

fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let f = 255.0 / f32::from(a);
    let up = |c: u8| -> u8 {
        let v = f32::from(c) * f;
        if v >= 255.0 { 255 } else { scale_u8(c, f) }
    };
    [up(r), up(g), up(b), a]
}

impl ImagingBackend for VelloCpuImagingBackend<'_> {
    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::SetTransform(xf) => {
                self.ctx.set_transform(Self::affine_to_cpu(xf));
            }
            StateOp::SetPaintTransform(xf) => {
                self.ctx.set_paint_transform(Self::affine_to_cpu(xf));
            }
            StateOp::SetPaint(paint) => {
                self.current_paint = Some(paint);
                self.apply_current_paint();
            }
            StateOp::SetStroke(style) => {
                // Circles are closed, so joins and caps never show.
                self.ctx.set_stroke(Stroke::new(style.width));
            }
        }
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::FillCircle { center, radius } => {
                self.ctx.fill_path(&Self::circle_path(center, radius));
            }
            DrawOp::StrokeCircle { center, radius } => {
                self.ctx.stroke_path(&Self::circle_path(center, radius));
            }
            DrawOp::FillRect(rect) => {
                let rect = Rect::new(rect.x0, rect.y0, rect.x1, rect.y1);
                self.ctx.fill_rect(&rect);
            }
        }
    }
}

/// Render into a fresh `width` x `height` surface and return straight-alpha
/// RGBA8 bytes, row-major.
pub fn render_rgba8<F>(width: u16, height: u16, build: F) -> Vec<u8>
where
    F: FnOnce(&mut VelloCpuImagingBackend<'_>),
{
    let settings = RenderSettings {
        // Force u8 pipeline output so results are stable across feature sets.
        render_mode: RenderMode::OptimizeSpeed,
        ..RenderSettings::default()
    };
    let mut ctx = RenderContext::new_with(width, height, settings);
    let mut backend = VelloCpuImagingBackend::new(&mut ctx);
    build(&mut backend);

    let mut pixmap = Pixmap::new(width, height);
    backend.ctx.flush();
    backend.ctx.render_to_pixmap(&mut pixmap);

    let unpremul = pixmap.take_unpremultiplied();
    let mut bytes = Vec::with_capacity(unpremul.len() * 4);
    for p in unpremul {
        bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
    bytes
}
