//! Presentational node definitions
//!
//! These nodes cover what the MathML tree cannot express on its own: wrapper
//! spans, inline SVG drawings and raster images. They are embedded in the
//! MathML tree through [`crate::mathml_tree::MathDomNode::Html`], usually
//! inside an `<mtext>`.

use core::fmt::{self, Write as _};

use bon::bon;

use crate::tree::{VirtualNode, map_fmt, write_attributes, write_class, write_style};
use crate::types::{Attributes, CssStyle, ParseError};
use crate::utils::escape_into;
#[cfg(feature = "wasm")]
use crate::web_context::WebContext;
#[cfg(feature = "wasm")]
use wasm_bindgen::JsCast as _;

#[cfg(feature = "wasm")]
const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Presentational node
#[derive(Debug, Clone)]
pub enum HtmlDomNode {
    /// `<span>` wrapping other presentational nodes
    Span(Span),
    /// `<img>` element
    Img(Img),
    /// Inline `<svg>` drawing
    Svg(SvgNode),
}

/// Span wrapping other presentational nodes
#[derive(Debug, Clone, Default)]
pub struct Span {
    /// Child nodes contained within this span
    pub children: Vec<HtmlDomNode>,
    /// HTML attributes for this span element
    pub attributes: Attributes,
    /// CSS classes applied to this span
    pub classes: Vec<String>,
    /// Inline CSS style object
    pub style: CssStyle,
}

#[bon]
impl Span {
    /// Create a new Span with builder
    #[builder]
    pub fn new(
        /// Child nodes contained within this span
        children: Vec<HtmlDomNode>,
        /// Attributes for this span element
        attributes: Option<Attributes>,
        /// Classes applied to this span
        classes: Option<Vec<String>>,
        /// Inline CSS style object
        style: Option<CssStyle>,
    ) -> Self {
        Self {
            children,
            attributes: attributes.unwrap_or_default(),
            classes: classes.unwrap_or_default(),
            style: style.unwrap_or_default(),
        }
    }
}

/// Image embed element
#[derive(Debug, Clone)]
pub struct Img {
    /// Source URL of the image
    pub src: String,
    /// Alternative text for the image
    pub alt: String,
    /// CSS classes applied to this image
    pub classes: Vec<String>,
    /// Inline CSS style object
    pub style: CssStyle,
}

impl Img {
    /// Create a new Img
    #[must_use]
    pub fn new(src: impl Into<String>, alt: impl Into<String>, style: CssStyle) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            classes: Vec::new(),
            style,
        }
    }
}

/// Inline SVG drawing
#[derive(Debug, Clone, Default)]
pub struct SvgNode {
    /// Path children
    pub children: Vec<PathNode>,
    /// SVG attributes (`width`, `height`, `viewBox`...)
    pub attributes: Attributes,
    /// Inline CSS style object
    pub style: CssStyle,
}

#[bon]
impl SvgNode {
    /// Create a new SvgNode
    #[builder]
    pub fn new(
        /// Children for the SVG node
        children: Vec<PathNode>,
        /// Attributes for the SVG node
        attributes: Option<Attributes>,
        /// Inline style
        style: Option<CssStyle>,
    ) -> Self {
        Self {
            children,
            attributes: attributes.unwrap_or_default(),
            style: style.unwrap_or_default(),
        }
    }
}

/// SVG path element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    /// Name of the drawing this path belongs to
    pub path_name: String,
    /// Path data (`d` attribute)
    pub data: String,
}

impl PathNode {
    /// Create a path with resolved data
    #[must_use]
    pub fn new(path_name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            path_name: path_name.into(),
            data: data.into(),
        }
    }
}

impl VirtualNode for Span {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        map_fmt(fmt.write_str("<span"))?;
        write_attributes(fmt, &self.attributes)?;
        map_fmt(write_class(fmt, &self.classes))?;
        map_fmt(write_style(fmt, &self.style))?;
        map_fmt(fmt.write_char('>'))?;
        for child in &self.children {
            child.write_markup(fmt)?;
        }
        map_fmt(fmt.write_str("</span>"))
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        use crate::tree::{decorate_element, dom_error};

        let element = ctx
            .document
            .create_element("span")
            .map_err(|e| dom_error(&e))?;
        decorate_element(&element, &self.attributes, &self.classes, &self.style)?;
        for child in &self.children {
            element
                .append_child(&child.to_node(ctx)?)
                .map_err(|e| dom_error(&e))?;
        }
        Ok(element.unchecked_into())
    }
}

impl VirtualNode for Img {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        map_fmt(fmt.write_str("<img src=\""))?;
        map_fmt(escape_into(fmt, &self.src))?;
        map_fmt(fmt.write_str("\" alt=\""))?;
        map_fmt(escape_into(fmt, &self.alt))?;
        map_fmt(fmt.write_char('"'))?;
        map_fmt(write_class(fmt, &self.classes))?;
        map_fmt(write_style(fmt, &self.style))?;
        map_fmt(fmt.write_str("/>"))
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        use crate::tree::{decorate_element, dom_error};

        let element = ctx
            .document
            .create_element("img")
            .map_err(|e| dom_error(&e))?;
        let attributes: Attributes = [("src", self.src.as_str()), ("alt", self.alt.as_str())]
            .into_iter()
            .collect();
        decorate_element(&element, &attributes, &self.classes, &self.style)?;
        Ok(element.unchecked_into())
    }
}

impl VirtualNode for SvgNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        map_fmt(fmt.write_str("<svg xmlns=\"http://www.w3.org/2000/svg\""))?;
        write_attributes(fmt, &self.attributes)?;
        map_fmt(write_style(fmt, &self.style))?;
        map_fmt(fmt.write_char('>'))?;
        for child in &self.children {
            child.write_markup(fmt)?;
        }
        map_fmt(fmt.write_str("</svg>"))
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        use crate::tree::{decorate_element, dom_error};

        let element = ctx
            .document
            .create_element_ns(Some(SVG_NS), "svg")
            .map_err(|e| dom_error(&e))?;
        decorate_element(&element, &self.attributes, &[], &self.style)?;
        for child in &self.children {
            element
                .append_child(&child.to_node(ctx)?)
                .map_err(|e| dom_error(&e))?;
        }
        Ok(element.unchecked_into())
    }
}

impl VirtualNode for PathNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        map_fmt(fmt.write_str("<path d=\""))?;
        map_fmt(escape_into(fmt, &self.data))?;
        map_fmt(fmt.write_str("\"/>"))
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        use crate::tree::dom_error;

        let element = ctx
            .document
            .create_element_ns(Some(SVG_NS), "path")
            .map_err(|e| dom_error(&e))?;
        element
            .set_attribute("d", &self.data)
            .map_err(|e| dom_error(&e))?;
        Ok(element.unchecked_into())
    }
}

impl VirtualNode for HtmlDomNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        match self {
            Self::Span(span) => span.write_markup(fmt),
            Self::Img(img) => img.write_markup(fmt),
            Self::Svg(svg) => svg.write_markup(fmt),
        }
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        match self {
            Self::Span(span) => span.to_node(ctx),
            Self::Img(img) => img.to_node(ctx),
            Self::Svg(svg) => svg.to_node(ctx),
        }
    }
}

impl HtmlDomNode {
    /// Inline style of the node
    #[must_use]
    pub const fn style(&self) -> &CssStyle {
        match self {
            Self::Span(span) => &span.style,
            Self::Img(img) => &img.style,
            Self::Svg(svg) => &svg.style,
        }
    }

    /// Number of SVG drawings in this subtree.
    #[must_use]
    pub fn svg_count(&self) -> usize {
        match self {
            Self::Span(span) => span.children.iter().map(Self::svg_count).sum(),
            Self::Img(_) => 0,
            Self::Svg(_) => 1,
        }
    }
}

impl From<Span> for HtmlDomNode {
    fn from(span: Span) -> Self {
        Self::Span(span)
    }
}

impl From<Img> for HtmlDomNode {
    fn from(img: Img) -> Self {
        Self::Img(img)
    }
}

impl From<SvgNode> for HtmlDomNode {
    fn from(svg: SvgNode) -> Self {
        Self::Svg(svg)
    }
}
