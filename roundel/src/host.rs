// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outbound half of the host contract.

use kurbo::Point;
use roundel_imaging::ImagingBackend;

use crate::drawable::Drawable;
use crate::error::LoadError;

/// Opaque identifier of an image resource known to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

/// Phase of a touch gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// First contact.
    Down,
    /// Contact moved.
    Move,
    /// Contact lifted.
    Up,
    /// Gesture aborted by the host.
    Cancel,
}

/// A touch in view-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Gesture phase.
    pub action: TouchAction,
}

impl TouchEvent {
    /// Create an event.
    pub const fn new(x: f64, y: f64, action: TouchAction) -> Self {
        Self { x, y, action }
    }

    /// Position as a point.
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Services a view needs from whatever embeds it.
///
/// Only [`ViewHost::invalidate`] is required. The remaining methods have
/// defaults suitable for hosts that do not draw rectangular images, handle
/// touches, or ship bundled resources.
pub trait ViewHost {
    /// Request a repaint; the host calls [`draw`](crate::CircleImageView::draw) later.
    fn invalidate(&mut self);

    /// Draw `drawable` the host's own way, unclipped.
    ///
    /// Called instead of the circular pipeline while circular
    /// transformation is disabled. The default draws nothing.
    fn draw_default(&mut self, drawable: Option<&Drawable>, backend: &mut dyn ImagingBackend) {
        let _ = (drawable, backend);
    }

    /// Default touch handling for touches the view accepts.
    ///
    /// Returns whether the event was consumed. The default consumes nothing.
    fn dispatch_touch(&mut self, event: TouchEvent) -> bool {
        let _ = event;
        false
    }

    /// Resolve a bundled image resource.
    fn load_resource(&mut self, id: ResourceId) -> Result<Drawable, LoadError> {
        Err(LoadError::UnknownResource(id))
    }

    /// Resolve an image URI.
    ///
    /// The default handles `file://` URIs and plain paths through
    /// [`load_file_uri`].
    fn load_uri(&mut self, uri: &str) -> Result<Drawable, LoadError> {
        load_file_uri(uri)
    }
}

/// A host that ignores repaint requests and uses every default.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullHost;

impl ViewHost for NullHost {
    fn invalidate(&mut self) {}
}

/// Read and decode an image from a `file://` URI or a plain filesystem path.
///
/// Other schemes fail with [`LoadError::UnsupportedScheme`]. Without the
/// `decode` feature every load fails with [`LoadError::Decode`].
pub fn load_file_uri(uri: &str) -> Result<Drawable, LoadError> {
    let path = match uri.split_once("://") {
        Some(("file", path)) => path,
        Some(_) => return Err(LoadError::UnsupportedScheme(uri.to_owned())),
        None => uri,
    };
    read_image(path)
}

#[cfg(feature = "decode")]
fn read_image(path: &str) -> Result<Drawable, LoadError> {
    let bytes = std::fs::read(path)?;
    let bitmap = crate::Bitmap::decode(&bytes)?;
    log::debug!(
        "decoded {path} into {}x{} bitmap",
        bitmap.width(),
        bitmap.height()
    );
    Ok(Drawable::from(bitmap))
}

#[cfg(not(feature = "decode"))]
fn read_image(path: &str) -> Result<Drawable, LoadError> {
    Err(LoadError::Decode(format!(
        "cannot decode {path}: built without the `decode` feature"
    )))
}
