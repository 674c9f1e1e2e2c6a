// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The circular image view.

use kurbo::{Affine, Point, RoundedRect};
use peniko::{Color, Extend, ImageBrush, ImageQuality, ImageSampler};
use roundel_imaging::{ColorFilter, ImagingBackend, ImagingBackendExt, Paint};

use crate::bitmap::SharedBitmap;
use crate::bounds::{LayoutDirection, Padding, calculate_bounds};
use crate::dirty::DirtyFlags;
use crate::drawable::{Drawable, extract_bitmap};
use crate::error::ConfigError;
use crate::geometry::CircleGeometry;
use crate::host::{ResourceId, TouchEvent, ViewHost};
use crate::shader::ShaderTransform;
use crate::style::{CircleImageStyle, ScaleType};

/// An image view that displays its content clipped to a circle.
///
/// The view keeps derived geometry (see [`CircleGeometry`]) and a cached
/// image brush up to date as the host reports size, padding and content
/// changes. Painting happens in [`CircleImageView::draw`], in a fixed
/// order: background disc, image disc, border ring.
///
/// Every mutation that changes what is on screen ends with
/// [`ViewHost::invalidate`]. Setters given the value they already hold do
/// nothing.
#[derive(Debug)]
pub struct CircleImageView<H: ViewHost> {
    host: H,
    style: CircleImageStyle,

    width: i32,
    height: i32,
    padding: Padding,
    /// Start, top, end, bottom; set when padding was given relative to the layout direction.
    relative_padding: Option<[i32; 4]>,
    layout_direction: LayoutDirection,

    drawable: Option<Drawable>,
    /// Offscreen buffer the image brush samples.
    bitmap: Option<SharedBitmap>,
    geometry: CircleGeometry,
    shader_transform: Option<ShaderTransform>,
    shader_matrix: Affine,
    image_brush: Option<ImageBrush>,
    dirty: DirtyFlags,
}

impl<H: ViewHost> CircleImageView<H> {
    /// Create a view with the default style.
    pub fn new(host: H) -> Self {
        Self::with_style(host, CircleImageStyle::default())
    }

    /// Create a view with `style`.
    pub fn with_style(host: H, style: CircleImageStyle) -> Self {
        let mut view = Self {
            host,
            style,
            width: 0,
            height: 0,
            padding: Padding::ZERO,
            relative_padding: None,
            layout_direction: LayoutDirection::Ltr,
            drawable: None,
            bitmap: None,
            geometry: CircleGeometry::EMPTY,
            shader_transform: None,
            shader_matrix: Affine::IDENTITY,
            image_brush: None,
            dirty: DirtyFlags::empty(),
        };
        view.update_dimensions();
        view
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Current configuration.
    pub fn style(&self) -> &CircleImageStyle {
        &self.style
    }

    /// The host resized the view.
    pub fn on_size_changed(&mut self, width: i32, height: i32, old_width: i32, old_height: i32) {
        log::trace!("size changed from {old_width}x{old_height} to {width}x{height}");
        self.width = width;
        self.height = height;
        self.update_dimensions();
        self.host.invalidate();
    }

    /// Set absolute padding.
    pub fn set_padding(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        self.relative_padding = None;
        self.padding = Padding::new(left, top, right, bottom);
        self.update_dimensions();
        self.host.invalidate();
    }

    /// Set padding relative to the layout direction.
    pub fn set_padding_relative(&mut self, start: i32, top: i32, end: i32, bottom: i32) {
        self.relative_padding = Some([start, top, end, bottom]);
        self.padding = Padding::from_relative(start, top, end, bottom, self.layout_direction);
        self.update_dimensions();
        self.host.invalidate();
    }

    /// Set the layout direction; relative padding is resolved again.
    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if direction == self.layout_direction {
            return;
        }
        self.layout_direction = direction;
        if let Some([start, top, end, bottom]) = self.relative_padding {
            self.padding = Padding::from_relative(start, top, end, bottom, direction);
            self.update_dimensions();
            self.host.invalidate();
        }
    }

    /// Current view size.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Resolved absolute padding.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Current layout direction.
    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    /// Display `bitmap`, or nothing.
    pub fn set_image_bitmap(&mut self, bitmap: Option<SharedBitmap>) {
        self.set_image_drawable(bitmap.map(Drawable::Bitmap));
    }

    /// Display `drawable`, or nothing.
    pub fn set_image_drawable(&mut self, drawable: Option<Drawable>) {
        self.drawable = drawable;
        self.initialize_bitmap();
        self.host.invalidate();
    }

    /// Display the host resource `id`.
    ///
    /// A resource the host cannot resolve is logged and leaves the view empty.
    pub fn set_image_resource(&mut self, id: ResourceId) {
        let drawable = match self.host.load_resource(id) {
            Ok(drawable) => Some(drawable),
            Err(err) => {
                log::warn!("unable to load image resource {}: {err}", id.0);
                None
            }
        };
        self.set_image_drawable(drawable);
    }

    /// Display the image at `uri`.
    ///
    /// A URI the host cannot resolve is logged and leaves the view empty.
    pub fn set_image_uri(&mut self, uri: &str) {
        let drawable = match self.host.load_uri(uri) {
            Ok(drawable) => Some(drawable),
            Err(err) => {
                log::warn!("unable to load image uri `{uri}`: {err}");
                None
            }
        };
        self.set_image_drawable(drawable);
    }

    /// The drawable's content changed; re-render it before the next draw.
    pub fn invalidate_drawable(&mut self) {
        self.dirty.insert(DirtyFlags::REDRAW_BUFFER);
        self.host.invalidate();
    }

    /// The current drawable.
    pub fn drawable(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    /// The offscreen buffer the image is painted from, if any.
    pub fn bitmap(&self) -> Option<&SharedBitmap> {
        self.bitmap.as_ref()
    }

    /// Only [`ScaleType::CenterCrop`] is accepted.
    pub fn set_scale_type(&mut self, scale_type: ScaleType) -> Result<(), ConfigError> {
        if scale_type == ScaleType::CenterCrop {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedScaleType(scale_type))
        }
    }

    /// Always [`ScaleType::CenterCrop`].
    pub fn scale_type(&self) -> ScaleType {
        ScaleType::CenterCrop
    }

    /// Adjusting bounds to the image is not supported; only `false` is accepted.
    pub fn set_adjust_view_bounds(&mut self, adjust: bool) -> Result<(), ConfigError> {
        if adjust {
            Err(ConfigError::AdjustViewBoundsUnsupported)
        } else {
            Ok(())
        }
    }

    /// Border ring stroke width.
    pub fn border_width(&self) -> u32 {
        self.style.border_width
    }

    /// Set the border ring stroke width.
    pub fn set_border_width(&mut self, width: u32) {
        if width == self.style.border_width {
            return;
        }
        self.style.border_width = width;
        self.update_dimensions();
        self.host.invalidate();
    }

    /// Border ring color.
    pub fn border_color(&self) -> Color {
        self.style.border_color
    }

    /// Set the border ring color.
    pub fn set_border_color(&mut self, color: Color) {
        if color == self.style.border_color {
            return;
        }
        self.style.border_color = color;
        self.host.invalidate();
    }

    /// Whether the border is painted over the image edge.
    pub fn is_border_overlay(&self) -> bool {
        self.style.border_overlay
    }

    /// Paint the border over the image edge instead of around it.
    pub fn set_border_overlay(&mut self, overlay: bool) {
        if overlay == self.style.border_overlay {
            return;
        }
        self.style.border_overlay = overlay;
        self.update_dimensions();
        self.host.invalidate();
    }

    /// Fill behind the image.
    pub fn circle_background_color(&self) -> Color {
        self.style.circle_background_color
    }

    /// Set the fill behind the image; transparent disables it.
    pub fn set_circle_background_color(&mut self, color: Color) {
        if color == self.style.circle_background_color {
            return;
        }
        self.style.circle_background_color = color;
        self.host.invalidate();
    }

    /// Whether circular clipping is off.
    pub fn is_circular_transformation_disabled(&self) -> bool {
        self.style.disable_circular_transformation
    }

    /// Turn circular clipping off (the host draws the image) or back on.
    ///
    /// Disabling drops the offscreen buffer; enabling rasterizes the current
    /// drawable again.
    pub fn set_circular_transformation_disabled(&mut self, disabled: bool) {
        if disabled == self.style.disable_circular_transformation {
            return;
        }
        self.style.disable_circular_transformation = disabled;
        self.initialize_bitmap();
        self.host.invalidate();
    }

    /// Image opacity.
    pub fn image_alpha(&self) -> u8 {
        self.style.image_alpha
    }

    /// Set image opacity. Only the low byte of `alpha` is used.
    pub fn set_image_alpha(&mut self, alpha: i32) {
        let [alpha, ..] = alpha.to_le_bytes();
        if alpha == self.style.image_alpha {
            return;
        }
        self.style.image_alpha = alpha;
        self.host.invalidate();
    }

    /// Filter applied to the image.
    pub fn color_filter(&self) -> Option<ColorFilter> {
        self.style.color_filter
    }

    /// Set the filter applied to the image.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        if filter == self.style.color_filter {
            return;
        }
        self.style.color_filter = filter;
        self.host.invalidate();
    }

    /// Current border and drawable circles.
    pub fn geometry(&self) -> &CircleGeometry {
        &self.geometry
    }

    /// Center-crop parameters for the current buffer, if there is one.
    pub fn shader_transform(&self) -> Option<ShaderTransform> {
        self.shader_transform
    }

    /// Paint transform installed for the image brush.
    pub fn shader_matrix(&self) -> Affine {
        self.shader_matrix
    }

    /// Work pending for the next draw.
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Outline for clipping and shadows; `None` while circular clipping is disabled.
    pub fn outline(&self) -> Option<RoundedRect> {
        if self.style.disable_circular_transformation {
            None
        } else {
            Some(self.geometry.outline())
        }
    }

    /// Paint the view into `backend`.
    pub fn draw(&mut self, backend: &mut dyn ImagingBackend) {
        if self.style.disable_circular_transformation {
            self.host.draw_default(self.drawable.as_ref(), backend);
            return;
        }

        let drawable_center = self.geometry.drawable_center();
        let drawable_radius = self.geometry.drawable_radius;

        if self.style.circle_background_color.to_rgba8().a != 0 && drawable_radius > 0.0 {
            backend.fill_circle(
                drawable_center,
                drawable_radius,
                Paint::solid(self.style.circle_background_color),
            );
        }

        if self.bitmap.is_some() && drawable_radius > 0.0 {
            if self.buffer_is_writable() && self.dirty.take(DirtyFlags::REDRAW_BUFFER) {
                self.redraw_buffer();
            }
            if self.dirty.contains(DirtyFlags::REBUILD_SHADER) {
                self.rebuild_image_brush();
            }
            if let Some(brush) = &self.image_brush {
                let mut brush = brush.clone();
                brush.sampler.alpha = f32::from(self.style.image_alpha) / 255.0;
                let paint = Paint::image(brush).with_color_filter(self.style.color_filter);
                backend.fill_circle_with_paint_transform(
                    drawable_center,
                    drawable_radius,
                    paint,
                    self.shader_matrix,
                );
            }
        }

        if self.style.border_width > 0 && self.geometry.border_radius > 0.0 {
            backend.stroke_circle(
                self.geometry.border_center(),
                self.geometry.border_radius,
                f64::from(self.style.border_width),
                Paint::solid(self.style.border_color),
            );
        }
    }

    /// Whether (`x`, `y`) hits the view.
    ///
    /// Always true while circular clipping is disabled or before the first
    /// layout with a positive size.
    pub fn is_inside_circle(&self, x: f64, y: f64) -> bool {
        if self.style.disable_circular_transformation {
            return true;
        }
        self.geometry.contains(Point::new(x, y))
    }

    /// Route a touch. Touches outside the circle are rejected without
    /// consulting the host.
    pub fn on_touch_event(&mut self, event: TouchEvent) -> bool {
        if self.style.disable_circular_transformation {
            return self.host.dispatch_touch(event);
        }
        self.is_inside_circle(event.x, event.y) && self.host.dispatch_touch(event)
    }

    fn initialize_bitmap(&mut self) {
        self.image_brush = None;
        self.shader_transform = None;
        self.shader_matrix = Affine::IDENTITY;
        self.dirty = DirtyFlags::empty();

        if self.style.disable_circular_transformation {
            self.bitmap = None;
            return;
        }
        self.bitmap = extract_bitmap(self.drawable.as_ref());
        self.update_shader_matrix();
    }

    fn update_dimensions(&mut self) {
        let bounds = calculate_bounds(self.width, self.height, self.padding);
        self.geometry = CircleGeometry::compute(
            bounds,
            self.style.border_width,
            self.style.border_overlay,
        );
        log::trace!("circle geometry updated: {:?}", self.geometry);
        self.update_shader_matrix();
    }

    fn update_shader_matrix(&mut self) {
        let Some(bitmap) = &self.bitmap else {
            return;
        };
        let (width, height) = match bitmap.try_borrow() {
            Ok(bitmap) => (bitmap.width(), bitmap.height()),
            Err(_) => {
                log::warn!("image bitmap is borrowed elsewhere; keeping the previous transform");
                return;
            }
        };
        let rect = self.geometry.drawable_rect;
        let transform = ShaderTransform::center_crop(width, height, rect);
        self.shader_transform = Some(transform);
        self.shader_matrix = transform.to_affine(rect);
        self.dirty.insert(DirtyFlags::REBUILD_SHADER);
    }

    fn buffer_is_writable(&self) -> bool {
        self.bitmap
            .as_ref()
            .and_then(|bitmap| bitmap.try_borrow().ok().map(|b| b.is_mutable()))
            .unwrap_or(false)
    }

    fn redraw_buffer(&mut self) {
        let (Some(bitmap), Some(drawable)) = (&self.bitmap, &self.drawable) else {
            return;
        };
        match bitmap.try_borrow_mut() {
            Ok(mut target) => {
                if let Err(err) = drawable.render_into(&mut target) {
                    log::warn!("failed to redraw drawable into its buffer: {err}");
                } else {
                    log::debug!(
                        "redrew drawable into {}x{} buffer",
                        target.width(),
                        target.height()
                    );
                }
            }
            Err(_) => log::warn!("image buffer is borrowed elsewhere; skipping redraw"),
        }
        // The brush holds a copy of the pixels.
        self.dirty.insert(DirtyFlags::REBUILD_SHADER);
    }

    fn rebuild_image_brush(&mut self) {
        let Some(bitmap) = &self.bitmap else {
            return;
        };
        let Ok(bitmap) = bitmap.try_borrow() else {
            log::warn!("image buffer is borrowed elsewhere; rebuilding the brush next draw");
            return;
        };
        let mut sampler = ImageSampler::default();
        sampler.x_extend = Extend::Pad;
        sampler.y_extend = Extend::Pad;
        sampler.quality = ImageQuality::Medium;
        self.image_brush = Some(ImageBrush {
            image: bitmap.to_image_data(),
            sampler,
        });
        log::debug!(
            "rebuilt image brush from {}x{} buffer",
            bitmap.width(),
            bitmap.height()
        );
        drop(bitmap);
        self.dirty.remove(DirtyFlags::REBUILD_SHADER);
    }
}
