// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software RGBA8 bitmaps used as image sources and offscreen buffers.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use peniko::{Blob, Color, ImageAlphaType, ImageData, ImageFormat};

use crate::error::RasterError;

/// Largest accepted width or height of a [`Bitmap`], in pixels.
pub const MAX_BITMAP_DIMENSION: u32 = 16_384;

/// A bitmap shared between the host and a view.
///
/// Hosts that animate a bitmap keep a clone of the handle, mutate the pixels
/// and call [`CircleImageView::invalidate_drawable`](crate::CircleImageView::invalidate_drawable).
pub type SharedBitmap = Rc<RefCell<Bitmap>>;

/// Tightly packed RGBA8 pixels with straight (unpremultiplied) alpha.
///
/// A bitmap is either mutable, in which case it can serve as a render
/// target, or immutable, in which case drawing into it fails with
/// [`RasterError::Immutable`].
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    mutable: bool,
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mutable", &self.mutable)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Create a transparent, mutable bitmap.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
            mutable: true,
        })
    }

    /// Create a mutable bitmap filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, RasterError> {
        let len = byte_len(width, height)?;
        let rgba = color.to_rgba8().to_u8_array();
        let mut pixels = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            pixels.extend_from_slice(&rgba);
        }
        Ok(Self {
            width,
            height,
            pixels,
            mutable: true,
        })
    }

    /// Wrap existing straight-alpha RGBA8 pixels, row-major, in a mutable bitmap.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(RasterError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            mutable: true,
        })
    }

    /// Decode PNG, JPEG, GIF or `WebP` bytes into an immutable bitmap.
    #[cfg(feature = "decode")]
    pub fn decode(bytes: &[u8]) -> Result<Self, crate::LoadError> {
        let image = image::load_from_memory(bytes)
            .map_err(|err| crate::LoadError::Decode(err.to_string()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self::from_rgba8(width, height, image.into_raw())?.into_immutable())
    }

    /// Freeze the bitmap; later draws into it fail.
    #[must_use]
    pub fn into_immutable(mut self) -> Self {
        self.mutable = false;
        self
    }

    /// Wrap the bitmap in a [`SharedBitmap`] handle.
    pub fn into_shared(self) -> SharedBitmap {
        Rc::new(RefCell::new(self))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the bitmap can be drawn into.
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The pixel at (`x`, `y`), or `None` when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite the pixel at (`x`, `y`). Out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<(), RasterError> {
        self.check_mutable()?;
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&rgba);
        }
        Ok(())
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) -> Result<(), RasterError> {
        self.check_mutable()?;
        self.pixels.fill(0);
        Ok(())
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) -> Result<(), RasterError> {
        self.check_mutable()?;
        let rgba = color.to_rgba8().to_u8_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Ok(())
    }

    /// Copy the pixels into an [`ImageData`] for an image brush.
    pub fn to_image_data(&self) -> ImageData {
        ImageData {
            data: Blob::from(self.pixels.clone()),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: self.width,
            height: self.height,
        }
    }

    fn check_mutable(&self) -> Result<(), RasterError> {
        if self.mutable {
            Ok(())
        } else {
            Err(RasterError::Immutable)
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        // Fits: the whole buffer length was checked against usize on creation.
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some(idx)
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::ZeroSize);
    }
    if width > MAX_BITMAP_DIMENSION || height > MAX_BITMAP_DIMENSION {
        return Err(RasterError::TooLarge { width, height });
    }
    usize::try_from(u64::from(width) * u64::from(height) * 4)
        .map_err(|_| RasterError::TooLarge { width, height })
}
