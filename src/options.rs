//! The style context threaded through the builders
//!
//! [`Options`] records the script level, the active fonts, the color and the
//! size ceiling for the subtree being built. It is immutable: each `with_*`
//! method returns a modified copy for the children, so a builder can never
//! leak a change to its siblings.

use bon::bon;
use strum::{AsRefStr, Display};

use crate::types::{MaxSize, Settings, StyleLevel};

/// Text font weight selected by `\textbf`/`\textmd`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FontWeight {
    /// Bold font weight
    TextBf,
    /// Medium font weight
    TextMd,
    /// Means no change
    #[default]
    #[strum(serialize = "")]
    Empty,
}

/// Text font shape selected by `\textit`/`\textup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FontShape {
    /// Italic font shape
    TextIt,
    /// Upright font shape
    TextUp,
    /// Means no change
    #[default]
    #[strum(serialize = "")]
    Empty,
}

/// Immutable style context for one subtree
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Script level: 0 display, 1 text, 2 script, 3 scriptscript
    pub level: u8,
    /// Active math font (`mathbf`, `mathbb`...), empty for none
    pub font: String,
    /// Text font family (`textrm`, `textsf`, `texttt`), empty for none
    pub font_family: String,
    /// Text font weight
    pub font_weight: FontWeight,
    /// Text font shape
    pub font_shape: FontShape,
    /// Current color
    pub color: Option<String>,
    /// Whether the expression is built in display mode
    pub display_mode: bool,
    /// Ceiling for user dimensions
    pub max_size: MaxSize,
}

#[bon]
impl Options {
    /// Create a new Options instance with builder
    #[builder]
    pub fn new(
        level: Option<u8>,
        font: Option<String>,
        font_family: Option<String>,
        font_weight: Option<FontWeight>,
        font_shape: Option<FontShape>,
        color: Option<String>,
        display_mode: Option<bool>,
        max_size: Option<MaxSize>,
    ) -> Self {
        Self {
            level: level.unwrap_or(StyleLevel::Text.level()).min(Self::MAX_LEVEL),
            font: font.unwrap_or_default(),
            font_family: font_family.unwrap_or_default(),
            font_weight: font_weight.unwrap_or_default(),
            font_shape: font_shape.unwrap_or_default(),
            color,
            display_mode: display_mode.unwrap_or(false),
            max_size: max_size.unwrap_or_default(),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Options {
    /// Deepest script level.
    pub const MAX_LEVEL: u8 = 3;

    /// Starting options for a conversion under `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let level = if settings.display_mode {
            StyleLevel::Display
        } else {
            StyleLevel::Text
        };
        Self::builder()
            .level(level.level())
            .display_mode(settings.display_mode)
            .max_size(settings.max_size)
            .maybe_color(settings.color.clone())
            .build()
    }

    /// Options at an explicit level.
    #[must_use]
    pub fn with_level(&self, level: u8) -> Self {
        Self {
            level: level.min(Self::MAX_LEVEL),
            ..self.clone()
        }
    }

    /// Options one level deeper, stopping at scriptscript.
    #[must_use]
    pub fn increment_level(&self) -> Self {
        self.with_level(self.level.saturating_add(1))
    }

    /// Options for a sub- or superscript of the current node.
    #[must_use]
    pub fn in_sub_or_sup(&self) -> Self {
        let level = if self.level < StyleLevel::Script.level() {
            StyleLevel::Script
        } else {
            StyleLevel::ScriptScript
        };
        self.with_level(level.level())
    }

    /// Options with a new math font.
    #[must_use]
    pub fn with_font(&self, font: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            ..self.clone()
        }
    }

    /// Options with a new color.
    #[must_use]
    pub fn with_color(&self, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..self.clone()
        }
    }

    /// Options with a new text font family. The math font is cleared.
    #[must_use]
    pub fn with_text_font_family(&self, font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            font: String::new(),
            ..self.clone()
        }
    }

    /// Options with a new text font weight. The math font is cleared.
    #[must_use]
    pub fn with_text_font_weight(&self, font_weight: FontWeight) -> Self {
        Self {
            font_weight,
            font: String::new(),
            ..self.clone()
        }
    }

    /// Options with a new text font shape. The math font is cleared.
    #[must_use]
    pub fn with_text_font_shape(&self, font_shape: FontShape) -> Self {
        Self {
            font_shape,
            font: String::new(),
            ..self.clone()
        }
    }

    /// Whether inter-atom spacing applies at this level.
    #[must_use]
    pub const fn spacing_enabled(&self) -> bool {
        self.level < StyleLevel::Script.level()
    }
}
