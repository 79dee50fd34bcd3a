//! The node contract shared by both output families
//!
//! Structural MathML nodes ([`crate::mathml_tree`]) and presentational HTML/SVG
//! nodes ([`crate::dom_tree`]) implement the same [`VirtualNode`] trait. The
//! escaping, class joining, style hyphenation and attribute validation used
//! while serializing live here once so that the two families cannot drift
//! apart.

use core::cell::RefCell;
use core::fmt::{self, Write as _};

use crate::types::{Attributes, CssStyle, ParseError, ParseErrorKind};
use crate::utils::{create_class, escape_into, hyphenate};
#[cfg(feature = "wasm")]
use crate::web_context::WebContext;

/// Base virtual DOM node interface used by both output families.
pub trait VirtualNode {
    /// Serialize into markup by writing into the provided formatter.
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError>;

    /// Convenience helper that renders the node into a [`String`].
    fn to_markup(&self) -> Result<String, ParseError>
    where
        Self: Sized,
    {
        markup_to_string(self)
    }

    /// Materialize a live DOM node.
    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError>;
}

/// Renders the provided [`VirtualNode`] into a [`String`] buffer.
pub fn markup_to_string<T: VirtualNode + ?Sized>(node: &T) -> Result<String, ParseError> {
    struct DisplayAdapter<'a, T: VirtualNode + ?Sized> {
        node: &'a T,
        error: &'a RefCell<Option<ParseError>>,
    }

    impl<T: VirtualNode + ?Sized> fmt::Display for DisplayAdapter<'_, T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.node.write_markup(f).map_err(|err| {
                self.error.replace(Some(err));
                fmt::Error
            })
        }
    }

    let mut buffer = String::new();
    let error = RefCell::new(None);
    let adapter = DisplayAdapter {
        node,
        error: &error,
    };

    if write!(buffer, "{adapter}").is_err() {
        return Err(error
            .into_inner()
            .unwrap_or_else(|| ParseError::new(ParseErrorKind::MarkupWriteFailure)));
    }

    Ok(buffer)
}

pub(crate) fn map_fmt(result: fmt::Result) -> Result<(), ParseError> {
    result.map_err(ParseError::from)
}

/// Whether `name` may be written as an attribute name.
#[must_use]
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(|c: char| {
            c.is_whitespace() || "\"'>/=".contains(c) || ('\x00'..='\x1f').contains(&c)
        })
}

pub(crate) fn write_class<W: fmt::Write>(writer: &mut W, classes: &[String]) -> fmt::Result {
    let joined = create_class(classes);
    if joined.is_empty() {
        return Ok(());
    }
    writer.write_str(" class=\"")?;
    escape_into(writer, &joined)?;
    writer.write_char('"')
}

/// Renders a style map as `prop:value;` pairs with hyphenated property names.
#[must_use]
pub fn style_string(style: &CssStyle) -> String {
    let mut out = String::new();
    for (property, value) in style {
        out.push_str(&hyphenate(property.as_ref()));
        out.push(':');
        out.push_str(value);
        out.push(';');
    }
    out
}

pub(crate) fn write_style<W: fmt::Write>(writer: &mut W, style: &CssStyle) -> fmt::Result {
    if style.is_empty() {
        return Ok(());
    }
    writer.write_str(" style=\"")?;
    escape_into(writer, &style_string(style))?;
    writer.write_char('"')
}

pub(crate) fn write_attributes<W: fmt::Write>(
    writer: &mut W,
    attributes: &Attributes,
) -> Result<(), ParseError> {
    for (name, value) in attributes.iter() {
        if !is_valid_attribute_name(name) {
            return Err(ParseError::new(ParseErrorKind::InvalidAttributeName {
                attr: name.to_owned(),
            }));
        }
        map_fmt(write!(writer, " {name}=\""))?;
        map_fmt(escape_into(writer, value))?;
        map_fmt(writer.write_char('"'))?;
    }
    Ok(())
}

#[cfg(feature = "wasm")]
pub(crate) fn dom_error(err: &wasm_bindgen::JsValue) -> ParseError {
    ParseError::new(ParseErrorKind::DomCreationFailure {
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    })
}

/// Copies attributes, classes and styles onto a live element. Styles are set
/// one property at a time.
#[cfg(feature = "wasm")]
pub(crate) fn decorate_element(
    element: &web_sys::Element,
    attributes: &Attributes,
    classes: &[String],
    style: &CssStyle,
) -> Result<(), ParseError> {
    use wasm_bindgen::JsCast as _;

    for (name, value) in attributes.iter() {
        if !is_valid_attribute_name(name) {
            return Err(ParseError::new(ParseErrorKind::InvalidAttributeName {
                attr: name.to_owned(),
            }));
        }
        element
            .set_attribute(name, value)
            .map_err(|e| dom_error(&e))?;
    }

    let class = create_class(classes);
    if !class.is_empty() {
        element
            .set_attribute("class", &class)
            .map_err(|e| dom_error(&e))?;
    }

    if !style.is_empty() {
        let declaration = element.unchecked_ref::<web_sys::HtmlElement>().style();
        for (property, value) in style {
            declaration
                .set_property(&hyphenate(property.as_ref()), value)
                .map_err(|e| dom_error(&e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CssProperty;

    struct Raw(&'static str);

    impl VirtualNode for Raw {
        fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
            map_fmt(escape_into(fmt, self.0))
        }

        #[cfg(feature = "wasm")]
        fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
            Ok(ctx.document.create_text_node(self.0).into())
        }
    }

    #[test]
    fn markup_to_string_escapes() {
        assert_eq!(Raw("a<b").to_markup().unwrap(), "a&lt;b");
    }

    #[test]
    fn style_string_hyphenates() {
        let mut style = CssStyle::default();
        style.insert(CssProperty::MathDepth, "0");
        style.insert(CssProperty::MinWidth, "1.75em");
        assert_eq!(style_string(&style), "math-depth:0;min-width:1.75em;");
    }

    #[test]
    fn rejects_bad_attribute_names() {
        assert!(is_valid_attribute_name("data-x"));
        assert!(!is_valid_attribute_name("on click"));
        assert!(!is_valid_attribute_name("a\"b"));
        assert!(!is_valid_attribute_name(""));

        let attrs: Attributes = [("x=y", "1")].into_iter().collect();
        let mut out = String::new();
        let err = write_attributes(&mut out, &attrs).unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::InvalidAttributeName { .. }
        ));
    }
}
