// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration and its resolution from host attributes.

use hashbrown::HashMap;
use peniko::Color;
use roundel_imaging::ColorFilter;

/// How an image is fitted into the view.
///
/// A circular view only supports [`ScaleType::CenterCrop`]; the other
/// variants exist so hosts can pass their own setting through and get a
/// [`ConfigError`](crate::ConfigError) back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleType {
    /// Use an explicit image matrix.
    Matrix,
    /// Stretch to fill, ignoring aspect ratio.
    FitXy,
    /// Fit inside, aligned to the start.
    FitStart,
    /// Fit inside, centered.
    FitCenter,
    /// Fit inside, aligned to the end.
    FitEnd,
    /// Center without scaling.
    Center,
    /// Scale uniformly to cover, centered, cropping the overflow.
    #[default]
    CenterCrop,
    /// Scale down uniformly to fit inside, centered.
    CenterInside,
}

/// Border width used when none is configured.
pub const DEFAULT_BORDER_WIDTH: u32 = 0;
/// Border color used when none is configured.
pub const DEFAULT_BORDER_COLOR: Color = Color::BLACK;
/// Circle background color used when none is configured.
pub const DEFAULT_CIRCLE_BACKGROUND_COLOR: Color = Color::TRANSPARENT;
/// Border overlay mode used when none is configured.
pub const DEFAULT_BORDER_OVERLAY: bool = false;

/// Attribute keys read by [`CircleImageStyle::from_attributes`].
pub mod attr {
    /// Border width in pixels (dimension).
    pub const BORDER_WIDTH: &str = "civ_border_width";
    /// Border color (color).
    pub const BORDER_COLOR: &str = "civ_border_color";
    /// Whether the border overlays the image (boolean).
    pub const BORDER_OVERLAY: &str = "civ_border_overlay";
    /// Fill color behind the image (color).
    pub const CIRCLE_BACKGROUND_COLOR: &str = "civ_circle_background_color";
}

/// Typed lookup into the host's attribute store.
///
/// Each method returns `None` when the key is absent or holds a value of a
/// different type, in which case the default applies.
pub trait AttributeSet {
    /// A dimension, already converted to whole pixels.
    fn dimension(&self, key: &str) -> Option<u32>;
    /// A color.
    fn color(&self, key: &str) -> Option<Color>;
    /// A boolean flag.
    fn boolean(&self, key: &str) -> Option<bool>;
}

/// A single attribute value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// Pixel dimension.
    Dimension(u32),
    /// Color.
    Color(Color),
    /// Boolean.
    Bool(bool),
}

/// A simple in-memory [`AttributeSet`].
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    values: HashMap<String, AttrValue>,
}

impl Attributes {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: AttrValue) -> &mut Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Builder form of [`Attributes::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.insert(key, value);
        self
    }

    /// The raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }
}

impl AttributeSet for Attributes {
    fn dimension(&self, key: &str) -> Option<u32> {
        match self.get(key)? {
            AttrValue::Dimension(v) => Some(*v),
            _ => None,
        }
    }

    fn color(&self, key: &str) -> Option<Color> {
        match self.get(key)? {
            AttrValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Everything a [`CircleImageView`](crate::CircleImageView) can be configured with.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleImageStyle {
    /// Stroke width of the border ring in pixels; `0` draws no border.
    pub border_width: u32,
    /// Color of the border ring.
    pub border_color: Color,
    /// Paint the border over the image's outer edge instead of around it.
    pub border_overlay: bool,
    /// Fill behind the image; fully transparent draws nothing.
    pub circle_background_color: Color,
    /// Skip circular clipping and let the host draw the image itself.
    pub disable_circular_transformation: bool,
    /// Opacity of the image, `0` to `255`.
    pub image_alpha: u8,
    /// Filter applied to the image pixels.
    pub color_filter: Option<ColorFilter>,
}

impl Default for CircleImageStyle {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            border_color: DEFAULT_BORDER_COLOR,
            border_overlay: DEFAULT_BORDER_OVERLAY,
            circle_background_color: DEFAULT_CIRCLE_BACKGROUND_COLOR,
            disable_circular_transformation: false,
            image_alpha: u8::MAX,
            color_filter: None,
        }
    }
}

impl CircleImageStyle {
    /// Resolve a style from host attributes, using defaults for missing keys.
    pub fn from_attributes(attrs: &dyn AttributeSet) -> Self {
        Self {
            border_width: attrs
                .dimension(attr::BORDER_WIDTH)
                .unwrap_or(DEFAULT_BORDER_WIDTH),
            border_color: attrs
                .color(attr::BORDER_COLOR)
                .unwrap_or(DEFAULT_BORDER_COLOR),
            border_overlay: attrs
                .boolean(attr::BORDER_OVERLAY)
                .unwrap_or(DEFAULT_BORDER_OVERLAY),
            circle_background_color: attrs
                .color(attr::CIRCLE_BACKGROUND_COLOR)
                .unwrap_or(DEFAULT_CIRCLE_BACKGROUND_COLOR),
            ..Self::default()
        }
    }

    /// Set the border width.
    #[must_use]
    pub fn with_border_width(mut self, width: u32) -> Self {
        self.border_width = width;
        self
    }

    /// Set the border color.
    #[must_use]
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Set the border overlay mode.
    #[must_use]
    pub fn with_border_overlay(mut self, overlay: bool) -> Self {
        self.border_overlay = overlay;
        self
    }

    /// Set the circle background color.
    #[must_use]
    pub fn with_circle_background_color(mut self, color: Color) -> Self {
        self.circle_background_color = color;
        self
    }

    /// Disable or enable circular clipping.
    #[must_use]
    pub fn with_circular_transformation_disabled(mut self, disabled: bool) -> Self {
        self.disable_circular_transformation = disabled;
        self
    }

    /// Set the image opacity.
    #[must_use]
    pub fn with_image_alpha(mut self, alpha: u8) -> Self {
        self.image_alpha = alpha;
        self
    }

    /// Set the image color filter.
    #[must_use]
    pub fn with_color_filter(mut self, filter: Option<ColorFilter>) -> Self {
        self.color_filter = filter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let style = CircleImageStyle::default();
        assert_eq!(style.border_width, 0);
        assert_eq!(style.border_color, Color::BLACK);
        assert!(!style.border_overlay);
        assert_eq!(style.circle_background_color, Color::TRANSPARENT);
        assert_eq!(style.image_alpha, 255);
        assert!(style.color_filter.is_none());
    }

    #[test]
    fn empty_attributes_give_defaults() {
        let style = CircleImageStyle::from_attributes(&Attributes::new());
        assert_eq!(style, CircleImageStyle::default());
    }

    #[test]
    fn attributes_are_resolved() {
        let attrs = Attributes::new()
            .with(attr::BORDER_WIDTH, AttrValue::Dimension(6))
            .with(attr::BORDER_COLOR, AttrValue::Color(Color::WHITE))
            .with(attr::BORDER_OVERLAY, AttrValue::Bool(true))
            .with(
                attr::CIRCLE_BACKGROUND_COLOR,
                AttrValue::Color(Color::from_rgba8(1, 2, 3, 255)),
            );
        let style = CircleImageStyle::from_attributes(&attrs);
        assert_eq!(style.border_width, 6);
        assert_eq!(style.border_color, Color::WHITE);
        assert!(style.border_overlay);
        assert_eq!(style.circle_background_color, Color::from_rgba8(1, 2, 3, 255));
    }

    #[test]
    fn mistyped_attribute_falls_back_to_default() {
        let attrs = Attributes::new().with(attr::BORDER_WIDTH, AttrValue::Bool(true));
        let style = CircleImageStyle::from_attributes(&attrs);
        assert_eq!(style.border_width, DEFAULT_BORDER_WIDTH);
    }
}
