// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image sources and their rasterization into bitmaps.

use core::fmt;
use std::rc::Rc;

use peniko::Color;

use crate::bitmap::{Bitmap, SharedBitmap};
use crate::error::RasterError;

/// Width and height of the bitmap a sizeless drawable is rasterized into.
///
/// A solid color needs no more than this; the image brush pads it out to
/// the whole circle.
pub const COLOR_DRAWABLE_DIMENSION: u32 = 2;

/// Something that can paint itself into a bitmap.
///
/// Implemented by hosts for vector art, animations and other content that
/// is not already a bitmap.
pub trait Paintable: fmt::Debug {
    /// Natural size in pixels, or `None` if the content has no fixed size.
    fn intrinsic_size(&self) -> Option<(u32, u32)>;

    /// Paint into `target`, covering its full extent.
    ///
    /// `target` is mutable and transparent when this is called.
    fn paint(&self, target: &mut Bitmap) -> Result<(), RasterError>;
}

/// An image source a view can display.
#[derive(Clone, Debug)]
pub enum Drawable {
    /// A bitmap, displayed directly without a copy.
    Bitmap(SharedBitmap),
    /// A solid color.
    Color(Color),
    /// Host-provided content.
    Custom(Rc<dyn Paintable>),
}

impl Drawable {
    /// Natural size in pixels, if the drawable has one.
    ///
    /// A bitmap that is currently mutably borrowed reports `None`.
    pub fn intrinsic_size(&self) -> Option<(u32, u32)> {
        match self {
            Self::Bitmap(bitmap) => bitmap
                .try_borrow()
                .ok()
                .map(|bitmap| (bitmap.width(), bitmap.height())),
            Self::Color(_) => None,
            Self::Custom(paintable) => paintable.intrinsic_size(),
        }
    }

    /// Clear `target` and paint this drawable into it, covering its full extent.
    ///
    /// Bitmap drawables are displayed in place and are their own buffer, so
    /// `target` is left untouched for them.
    pub fn render_into(&self, target: &mut Bitmap) -> Result<(), RasterError> {
        match self {
            Self::Bitmap(_) => Ok(()),
            Self::Color(color) => target.fill(*color),
            Self::Custom(paintable) => {
                target.clear()?;
                paintable.paint(target)
            }
        }
    }
}

impl From<SharedBitmap> for Drawable {
    fn from(bitmap: SharedBitmap) -> Self {
        Self::Bitmap(bitmap)
    }
}

impl From<Bitmap> for Drawable {
    fn from(bitmap: Bitmap) -> Self {
        Self::Bitmap(bitmap.into_shared())
    }
}

impl From<Color> for Drawable {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// Obtain a bitmap for `drawable`.
///
/// Bitmap drawables are returned as-is. Everything else is rendered into a
/// fresh mutable bitmap of its intrinsic size, or
/// [`COLOR_DRAWABLE_DIMENSION`] square when it has none. Failures are logged
/// and reported as `None`; the view then shows no image.
pub fn extract_bitmap(drawable: Option<&Drawable>) -> Option<SharedBitmap> {
    let drawable = drawable?;
    if let Drawable::Bitmap(bitmap) = drawable {
        return Some(Rc::clone(bitmap));
    }
    match rasterize(drawable) {
        Ok(bitmap) => Some(bitmap.into_shared()),
        Err(err) => {
            log::warn!("failed to rasterize drawable {drawable:?}: {err}");
            None
        }
    }
}

fn rasterize(drawable: &Drawable) -> Result<Bitmap, RasterError> {
    let (width, height) = match drawable {
        Drawable::Color(_) => (COLOR_DRAWABLE_DIMENSION, COLOR_DRAWABLE_DIMENSION),
        _ => drawable
            .intrinsic_size()
            .filter(|&(w, h)| w > 0 && h > 0)
            .unwrap_or((COLOR_DRAWABLE_DIMENSION, COLOR_DRAWABLE_DIMENSION)),
    };
    let mut bitmap = Bitmap::new(width, height)?;
    drawable.render_into(&mut bitmap)?;
    log::debug!("rasterized drawable into {width}x{height} bitmap");
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::MAX_BITMAP_DIMENSION;

    #[derive(Debug)]
    struct Checker {
        size: Option<(u32, u32)>,
    }

    impl Paintable for Checker {
        fn intrinsic_size(&self) -> Option<(u32, u32)> {
            self.size
        }

        fn paint(&self, target: &mut Bitmap) -> Result<(), RasterError> {
            for y in 0..target.height() {
                for x in 0..target.width() {
                    let px = if (x + y) % 2 == 0 {
                        [0, 0, 0, 255]
                    } else {
                        [255, 255, 255, 255]
                    };
                    target.set_pixel(x, y, px)?;
                }
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Paintable for Broken {
        fn intrinsic_size(&self) -> Option<(u32, u32)> {
            Some((4, 4))
        }

        fn paint(&self, _target: &mut Bitmap) -> Result<(), RasterError> {
            Err(RasterError::Paint("out of ink".into()))
        }
    }

    #[test]
    fn none_in_none_out() {
        assert!(extract_bitmap(None).is_none());
    }

    #[test]
    fn bitmap_drawable_is_shared_not_copied() {
        let shared = Bitmap::new(5, 3).unwrap().into_shared();
        let drawable = Drawable::Bitmap(Rc::clone(&shared));
        let extracted = extract_bitmap(Some(&drawable)).unwrap();
        assert!(Rc::ptr_eq(&shared, &extracted));
    }

    #[test]
    fn color_becomes_two_by_two() {
        let drawable = Drawable::Color(Color::from_rgba8(10, 20, 30, 255));
        let bitmap = extract_bitmap(Some(&drawable)).unwrap();
        let bitmap = bitmap.borrow();
        assert_eq!((bitmap.width(), bitmap.height()), (2, 2));
        assert_eq!(bitmap.pixel(1, 1), Some([10, 20, 30, 255]));
        assert!(bitmap.is_mutable());
    }

    #[test]
    fn custom_uses_intrinsic_size() {
        let drawable = Drawable::Custom(Rc::new(Checker { size: Some((6, 4)) }));
        let bitmap = extract_bitmap(Some(&drawable)).unwrap();
        let bitmap = bitmap.borrow();
        assert_eq!((bitmap.width(), bitmap.height()), (6, 4));
        assert_eq!(bitmap.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(bitmap.pixel(1, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn sizeless_custom_falls_back_to_two_by_two() {
        for size in [None, Some((0, 9)), Some((9, 0))] {
            let drawable = Drawable::Custom(Rc::new(Checker { size }));
            let bitmap = extract_bitmap(Some(&drawable)).unwrap();
            assert_eq!(bitmap.borrow().width(), COLOR_DRAWABLE_DIMENSION);
        }
    }

    #[test]
    fn failures_yield_none() {
        let broken = Drawable::Custom(Rc::new(Broken));
        assert!(extract_bitmap(Some(&broken)).is_none());

        let huge = Drawable::Custom(Rc::new(Checker {
            size: Some((MAX_BITMAP_DIMENSION * 2, 1)),
        }));
        assert!(extract_bitmap(Some(&huge)).is_none());
    }

    #[test]
    fn render_into_replaces_previous_content() {
        let mut target = Bitmap::filled(2, 2, Color::from_rgba8(0, 255, 0, 255)).unwrap();
        Drawable::Color(Color::from_rgba8(0, 0, 255, 128))
            .render_into(&mut target)
            .unwrap();
        assert_eq!(target.pixel(0, 0), Some([0, 0, 255, 128]));
    }

    #[test]
    fn bitmap_drawable_leaves_target_untouched() {
        let shared = Bitmap::new(2, 2).unwrap().into_shared();
        let drawable = Drawable::Bitmap(Rc::clone(&shared));
        let mut target = Bitmap::filled(2, 2, Color::from_rgba8(0, 255, 0, 255)).unwrap();
        drawable.render_into(&mut target).unwrap();
        assert_eq!(target.pixel(1, 1), Some([0, 255, 0, 255]));

        let _guard = shared.borrow_mut();
        assert_eq!(drawable.intrinsic_size(), None);
    }
}
