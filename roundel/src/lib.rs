// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roundel: a circular image view.
//!
//! Roundel clips an image into a circle, optionally surrounded by a border
//! ring and backed by a solid circular fill. The image is scaled with an
//! aspect-preserving center-crop so it always covers the circle, and touches
//! outside the circle are rejected.
//!
//! The view does not own a window, a layout system or a renderer. A host
//! drives it through explicit callbacks ([`CircleImageView::on_size_changed`],
//! [`CircleImageView::set_padding`], [`CircleImageView::set_image_drawable`],
//! ...) and hands it an [`ImagingBackend`](roundel_imaging::ImagingBackend)
//! to draw into. The outbound half of that contract is the [`ViewHost`]
//! trait.
//!
//! ## Pieces
//!
//! - [`calculate_bounds`]: the largest centered square inside the padded
//!   content area.
//! - [`CircleGeometry`]: border and drawable circles derived from the bounds,
//!   the border width and the overlay mode.
//! - [`ShaderTransform`]: the center-crop mapping from image pixels into the
//!   drawable square.
//! - [`DirtyFlags`]: what the next draw has to rebuild.
//! - [`Bitmap`] and [`Drawable`]: image sources and their rasterization
//!   ([`extract_bitmap`]).
//! - [`CircleImageStyle`]: border, background, alpha and filter settings,
//!   optionally resolved from host attributes.
//! - [`CircleImageView`]: the view state that ties it together.
//!
//! ## Example
//!
//! ```
//! use roundel::{Bitmap, CircleImageStyle, CircleImageView, NullHost};
//! use roundel_imaging::Color;
//!
//! let style = CircleImageStyle::default()
//!     .with_border_width(4)
//!     .with_border_color(Color::WHITE);
//! let mut view = CircleImageView::with_style(NullHost, style);
//! view.on_size_changed(96, 96, 0, 0);
//!
//! let image = Bitmap::filled(64, 32, Color::from_rgba8(200, 40, 40, 255)).unwrap();
//! view.set_image_bitmap(Some(image.into_shared()));
//!
//! assert!(view.is_inside_circle(48.0, 48.0));
//! assert!(!view.is_inside_circle(2.0, 2.0));
//! ```
//!
//! ## Features
//!
//! - `decode` (default): decode PNG, JPEG, GIF and `WebP` bytes into a
//!   [`Bitmap`] with the `image` crate, and resolve `file://` URIs in
//!   [`ViewHost::load_uri`].

mod bitmap;
mod bounds;
mod dirty;
mod drawable;
mod error;
mod geometry;
mod host;
mod shader;
mod style;
mod view;

pub use bitmap::{Bitmap, MAX_BITMAP_DIMENSION, SharedBitmap};
pub use bounds::{LayoutDirection, Padding, calculate_bounds, is_empty};
pub use dirty::DirtyFlags;
pub use drawable::{COLOR_DRAWABLE_DIMENSION, Drawable, Paintable, extract_bitmap};
pub use error::{ConfigError, LoadError, RasterError};
pub use geometry::CircleGeometry;
pub use host::{NullHost, ResourceId, TouchAction, TouchEvent, ViewHost, load_file_uri};
pub use shader::{ShaderTransform, round_half_up};
pub use style::{
    AttrValue, AttributeSet, Attributes, CircleImageStyle, DEFAULT_BORDER_COLOR,
    DEFAULT_BORDER_OVERLAY, DEFAULT_BORDER_WIDTH, DEFAULT_CIRCLE_BACKGROUND_COLOR, ScaleType, attr,
};
pub use view::CircleImageView;
