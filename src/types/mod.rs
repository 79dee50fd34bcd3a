//! Core type definitions shared by the builders and the output trees

use core::fmt;

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

mod parse_error;
pub use parse_error::{ParseError, ParseErrorKind};

mod settings;
pub use settings::{
    MaxSize, Settings, StrictFunction, StrictMode, StrictReturn, StrictSetting, TrustContext,
    TrustFunction, TrustSetting,
};

pub use crate::symbols::Mode;

/// Style property names understood by the output trees.
///
/// Names are kept in their camelCase form (the way they are written when a
/// style is assigned property by property on a live node); markup
/// serialization hyphenates them through [`crate::utils::hyphenate`].
#[derive(EnumIter, Debug, Copy, AsRefStr, PartialEq, Eq, Hash, Clone, Display, EnumCount)]
#[strum(serialize_all = "camelCase")]
pub enum CssProperty {
    /// Text color. See: <https://developer.mozilla.org/docs/Web/CSS/color>
    Color,
    /// Display type. See: <https://developer.mozilla.org/docs/Web/CSS/display>
    Display,
    /// Font weight. See: <https://developer.mozilla.org/docs/Web/CSS/font-weight>
    FontWeight,
    /// Box height. See: <https://developer.mozilla.org/docs/Web/CSS/height>
    Height,
    /// Left offset of a positioned box. See: <https://developer.mozilla.org/docs/Web/CSS/left>
    Left,
    /// Left margin. See: <https://developer.mozilla.org/docs/Web/CSS/margin-left>
    MarginLeft,
    /// MathML script depth. See: <https://developer.mozilla.org/docs/Web/CSS/math-depth>
    MathDepth,
    /// Minimum width. See: <https://developer.mozilla.org/docs/Web/CSS/min-width>
    MinWidth,
    /// Overflow clipping. See: <https://developer.mozilla.org/docs/Web/CSS/overflow>
    Overflow,
    /// Positioning scheme. See: <https://developer.mozilla.org/docs/Web/CSS/position>
    Position,
    /// Right offset of a positioned box. See: <https://developer.mozilla.org/docs/Web/CSS/right>
    Right,
    /// Top offset of a positioned box. See: <https://developer.mozilla.org/docs/Web/CSS/top>
    Top,
    /// Vertical alignment. See: <https://developer.mozilla.org/docs/Web/CSS/vertical-align>
    VerticalAlign,
    /// Box width. See: <https://developer.mozilla.org/docs/Web/CSS/width>
    Width,
}

/// Insertion-ordered style map.
///
/// Re-inserting a property replaces its value in place, so serialization order
/// is the order in which each property was first set.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CssStyle {
    entries: Vec<(CssProperty, String)>,
}

impl fmt::Debug for CssStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("CssStyle");
        for (property, value) in &self.entries {
            ds.field(property.as_ref(), value);
        }
        ds.finish()
    }
}

impl<'a> IntoIterator for &'a CssStyle {
    type Item = (CssProperty, &'a str);
    type IntoIter = CssStyleIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        CssStyleIter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over CSS style properties in insertion order
pub struct CssStyleIter<'a> {
    inner: core::slice::Iter<'a, (CssProperty, String)>,
}

impl<'a> Iterator for CssStyleIter<'a> {
    type Item = (CssProperty, &'a str);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(p, v)| (*p, v.as_str()))
    }
}

impl CssStyle {
    /// Inserts or updates a CSS property with the given value.
    pub fn insert<T>(&mut self, property: CssProperty, value: T)
    where
        T: Into<String>,
    {
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.entries.push((property, value));
        }
    }

    /// Removes a property, returning its previous value.
    pub fn remove(&mut self, property: CssProperty) -> Option<String> {
        let idx = self.entries.iter().position(|(p, _)| *p == property)?;
        Some(self.entries.remove(idx).1)
    }

    /// Extends the current style with properties from another `CssStyle`.
    pub fn extend(&mut self, other: &Self) {
        for (property, value) in other {
            self.insert(property, value);
        }
    }

    /// Checks if the style contains a specific CSS property.
    #[must_use]
    pub fn contains_key(&self, property: CssProperty) -> bool {
        self.entries.iter().any(|(p, _)| *p == property)
    }

    /// Retrieves the value of a specific CSS property, if it exists.
    #[must_use]
    pub fn get(&self, property: CssProperty) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Checks if the style is empty (contains no properties).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of properties set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over all CSS properties and their values in insertion order.
    #[must_use]
    pub fn iter(&self) -> CssStyleIter<'_> {
        self.into_iter()
    }
}

/// Insertion-ordered attribute list with unique keys.
///
/// Setting an existing key overwrites its value without moving it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Whether `key` has been set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attribute is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::default();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Kinds of arguments a construct can declare.
///
/// The front end parses each argument according to its declared type;
/// [`crate::MathContext::construct`] checks that the supplied nodes match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A color specification such as `red` or `#ff0000`, delivered as a
    /// `raw` node.
    Color,
    /// A dimension, delivered as a `size` node.
    Size,
    /// A URL, delivered as a `url` node.
    Url,
    /// A raw string, delivered as a `raw` node.
    Raw,
    /// Parsed in the surrounding mode.
    Original,
    /// A single token or group, not re-wrapped.
    Primitive,
    /// Parsed in a fixed mode.
    Mode(Mode),
}

/// Script levels, ordered from largest to smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum StyleLevel {
    /// `\displaystyle`
    Display = 0,
    /// `\textstyle`
    Text = 1,
    /// `\scriptstyle`
    Script = 2,
    /// `\scriptscriptstyle`
    #[strum(serialize = "scriptscript")]
    ScriptScript = 3,
}

impl StyleLevel {
    /// Numeric level used by [`crate::options::Options`].
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// `scriptlevel` and `displaystyle` attribute values for an `mstyle`.
    #[must_use]
    pub const fn mstyle_attributes(self) -> (&'static str, &'static str) {
        match self {
            Self::Display => ("0", "true"),
            Self::Text => ("0", "false"),
            Self::Script => ("1", "false"),
            Self::ScriptScript => ("2", "false"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_style_keeps_insertion_order() {
        let mut style = CssStyle::default();
        style.insert(CssProperty::Width, "1em");
        style.insert(CssProperty::Color, "red");
        style.insert(CssProperty::Width, "2em");
        let collected: Vec<_> = style.iter().collect();
        assert_eq!(
            collected,
            vec![(CssProperty::Width, "2em"), (CssProperty::Color, "red")]
        );
        assert_eq!(style.remove(CssProperty::Width).as_deref(), Some("2em"));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn css_property_names_are_camel_case() {
        assert_eq!(CssProperty::MathDepth.as_ref(), "mathDepth");
        assert_eq!(CssProperty::Color.as_ref(), "color");
        assert_eq!(CssProperty::VerticalAlign.to_string(), "verticalAlign");
    }

    #[test]
    fn attributes_have_unique_keys() {
        let mut attrs: Attributes = [("lspace", "0em"), ("rspace", "0em")].into_iter().collect();
        attrs.insert("lspace", "0.2222em");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("lspace"), Some("0.2222em"));
        assert_eq!(attrs.iter().next(), Some(("lspace", "0.2222em")));
        assert_eq!(attrs.remove("rspace").as_deref(), Some("0em"));
        assert!(!attrs.contains_key("rspace"));
    }

    #[test]
    fn style_level_parses_from_name() {
        use core::str::FromStr as _;
        assert_eq!(StyleLevel::from_str("script"), Ok(StyleLevel::Script));
        assert_eq!(
            StyleLevel::from_str("scriptscript"),
            Ok(StyleLevel::ScriptScript)
        );
        assert_eq!(StyleLevel::Display.mstyle_attributes(), ("0", "true"));
    }
}
