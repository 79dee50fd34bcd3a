//! MathML tree node definitions
//!
//! These objects store data about MathML nodes. Builders create them, may
//! mutate them while they still own them, then hand them up the call stack
//! where they are treated as finished.

use core::fmt::{self, Write as _};

use bon::bon;
use strum::{AsRefStr, Display};

use crate::dom_tree::HtmlDomNode;
use crate::tree::{VirtualNode, map_fmt, write_attributes, write_class, write_style};
use crate::types::{Attributes, CssStyle, ParseError};
use crate::utils::escape_into;
#[cfg(feature = "wasm")]
use crate::web_context::WebContext;
#[cfg(feature = "wasm")]
use wasm_bindgen::JsCast as _;

#[cfg(feature = "wasm")]
const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";

/// MathML element names emitted by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MathNodeType {
    /// `<math>` element
    Math,
    /// `<mi>` element
    Mi,
    /// `<mn>` element
    Mn,
    /// `<mo>` element
    Mo,
    /// `<mtext>` element
    Mtext,
    /// `<mspace>` element
    Mspace,
    /// `<mrow>` element
    Mrow,
    /// `<mstyle>` element
    Mstyle,
    /// `<mpadded>` element
    Mpadded,
    /// `<mphantom>` element
    Mphantom,
    /// `<mover>` element
    Mover,
    /// `<munder>` element
    Munder,
    /// `<munderover>` element
    Munderover,
    /// `<msub>` element
    Msub,
    /// `<msup>` element
    Msup,
    /// `<msubsup>` element
    Msubsup,
}

/// Get the Unicode space character matching an em width, if there is one.
///
/// See <https://www.w3.org/TR/2000/WD-MathML2-20000328/chapter6.html>
/// for a table of space-like characters.
#[must_use]
pub fn get_space_character(width: f64) -> Option<&'static str> {
    if (0.05555..=0.05556).contains(&width) {
        Some("\u{200a}") // &VeryThinSpace;
    } else if (0.1666..=0.1667).contains(&width) {
        Some("\u{2009}") // &ThinSpace;
    } else if (0.2222..=0.2223).contains(&width) {
        Some("\u{2005}") // &MediumSpace;
    } else if (0.2777..=0.2778).contains(&width) {
        Some("\u{2005}\u{200a}") // &ThickSpace;
    } else if (-0.05556..=-0.05555).contains(&width) {
        Some("\u{200a}\u{2063}") // &NegativeVeryThinSpace;
    } else if (-0.1667..=-0.1666).contains(&width) {
        Some("\u{2009}\u{2063}") // &NegativeThinSpace;
    } else if (-0.2223..=-0.2222).contains(&width) {
        Some("\u{205f}\u{2063}") // &NegativeMediumSpace;
    } else if (-0.2778..=-0.2777).contains(&width) {
        Some("\u{2005}\u{2063}") // &NegativeThickSpace;
    } else {
        None
    }
}

/// A node of the MathML output tree.
#[derive(Debug, Clone)]
pub enum MathDomNode {
    /// MathML element node
    Math(MathNode),
    /// Text content node
    Text(TextNode),
    /// Presentational leaf embedded in the MathML tree
    Html(HtmlDomNode),
    /// A run of siblings without an element of its own. Spliced into the
    /// parent row by the expression builder.
    Fragment(Vec<MathDomNode>),
}

/// General purpose MathML element
#[derive(Debug, Clone)]
pub struct MathNode {
    /// The element name
    pub node_type: MathNodeType,
    /// Attributes, unique by key, in insertion order
    pub attributes: Attributes,
    /// Inline style
    pub style: CssStyle,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child nodes
    pub children: Vec<MathDomNode>,
}

#[bon]
impl MathNode {
    /// Create a new MathNode with builder
    #[builder]
    pub fn new(
        /// Element name
        node_type: MathNodeType,
        /// Initial attributes
        attributes: Option<Attributes>,
        /// Child nodes
        children: Option<Vec<MathDomNode>>,
        /// CSS classes
        classes: Option<Vec<String>>,
        /// Inline style
        style: Option<CssStyle>,
    ) -> Self {
        Self {
            node_type,
            attributes: attributes.unwrap_or_default(),
            style: style.unwrap_or_default(),
            classes: classes.unwrap_or_default(),
            children: children.unwrap_or_default(),
        }
    }

    /// Create a new MathNode with the given type and children
    #[must_use]
    pub fn with_children(node_type: MathNodeType, children: Vec<MathDomNode>) -> Self {
        Self {
            node_type,
            attributes: Attributes::default(),
            style: CssStyle::default(),
            classes: Vec::new(),
            children,
        }
    }

    /// Create a token element (`mi`, `mo`, `mtext`...) holding one text run.
    #[must_use]
    pub fn with_text(node_type: MathNodeType, text: impl Into<String>) -> Self {
        Self::with_children(node_type, vec![TextNode::new(text).into()])
    }

    /// Set an attribute on this node
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key, value);
    }

    /// Read an attribute
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// Add a CSS class to this node
    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.push(class.into());
    }

    /// Whether the node carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.children.iter().map(MathDomNode::to_text).collect()
    }

    /// The text of a token element with exactly one text child.
    #[must_use]
    pub fn single_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [MathDomNode::Text(text)] => Some(&text.text),
            _ => None,
        }
    }
}

impl VirtualNode for MathNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        let tag = self.node_type.as_ref();
        map_fmt(write!(fmt, "<{tag}"))?;
        write_attributes(fmt, &self.attributes)?;
        map_fmt(write_class(fmt, &self.classes))?;
        map_fmt(write_style(fmt, &self.style))?;
        map_fmt(fmt.write_char('>'))?;
        for child in &self.children {
            child.write_markup(fmt)?;
        }
        map_fmt(write!(fmt, "</{tag}>"))
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        use crate::tree::{decorate_element, dom_error};

        let element = ctx
            .document
            .create_element_ns(Some(MATHML_NS), self.node_type.as_ref())
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

/// Text content of a token element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    /// The text content of the node
    pub text: String,
}

impl TextNode {
    /// Create a new text run
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl VirtualNode for TextNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        map_fmt(escape_into(fmt, &self.text))
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        Ok(ctx.document.create_text_node(&self.text).unchecked_into())
    }
}

impl MathDomNode {
    /// Convert the node to plain text
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Math(node) => node.to_text(),
            Self::Text(node) => node.text.clone(),
            Self::Html(_) => String::new(),
            Self::Fragment(children) => children.iter().map(Self::to_text).collect(),
        }
    }

    /// Type-safe access to the element variant
    #[must_use]
    pub const fn as_math_node(&self) -> Option<&MathNode> {
        match self {
            Self::Math(node) => Some(node),
            _ => None,
        }
    }

    /// Mutable type-safe access to the element variant
    pub const fn as_math_node_mut(&mut self) -> Option<&mut MathNode> {
        match self {
            Self::Math(node) => Some(node),
            _ => None,
        }
    }

    /// Element name, when this is an element.
    #[must_use]
    pub const fn node_type(&self) -> Option<MathNodeType> {
        match self {
            Self::Math(node) => Some(node.node_type),
            _ => None,
        }
    }

    /// Whether this is an element of type `node_type`.
    #[must_use]
    pub fn is(&self, node_type: MathNodeType) -> bool {
        self.node_type() == Some(node_type)
    }

    /// Flattens a fragment into its children; other nodes become a single
    /// element vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Self> {
        match self {
            Self::Fragment(children) => children,
            other => vec![other],
        }
    }
}

impl VirtualNode for MathDomNode {
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError> {
        match self {
            Self::Math(node) => node.write_markup(fmt),
            Self::Text(node) => node.write_markup(fmt),
            Self::Html(node) => node.write_markup(fmt),
            Self::Fragment(children) => children.iter().try_for_each(|c| c.write_markup(fmt)),
        }
    }

    #[cfg(feature = "wasm")]
    fn to_node(&self, ctx: &WebContext) -> Result<web_sys::Node, ParseError> {
        use crate::tree::dom_error;

        match self {
            Self::Math(node) => node.to_node(ctx),
            Self::Text(node) => node.to_node(ctx),
            Self::Html(node) => node.to_node(ctx),
            Self::Fragment(children) => {
                let fragment = ctx.document.create_document_fragment();
                for child in children {
                    fragment
                        .append_child(&child.to_node(ctx)?)
                        .map_err(|e| dom_error(&e))?;
                }
                Ok(fragment.unchecked_into())
            }
        }
    }
}

impl From<MathNode> for MathDomNode {
    fn from(node: MathNode) -> Self {
        Self::Math(node)
    }
}

impl From<TextNode> for MathDomNode {
    fn from(node: TextNode) -> Self {
        Self::Text(node)
    }
}

impl From<HtmlDomNode> for MathDomNode {
    fn from(node: HtmlDomNode) -> Self {
        Self::Html(node)
    }
}

/// Wraps a built expression in `<mstyle>`.
///
/// `mstyle` is its own inferred row, so a lone `mrow` is retagged rather than
/// nested.
#[must_use]
pub fn wrap_with_mstyle(mut expression: Vec<MathDomNode>) -> MathNode {
    if matches!(expression.as_slice(), [node] if node.is(MathNodeType::Mrow))
        && let Some(MathDomNode::Math(mut node)) = expression.pop()
    {
        node.node_type = MathNodeType::Mstyle;
        return node;
    }
    MathNode::with_children(MathNodeType::Mstyle, expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CssProperty;

    #[test]
    fn serializes_attributes_class_and_style_in_order() {
        let mut node = MathNode::with_text(MathNodeType::Mo, "+");
        node.set_attribute("lspace", "0.2222em");
        node.set_attribute("rspace", "0.2222em");
        node.add_class("");
        node.add_class("tml-x");
        node.style.insert(CssProperty::MathDepth, "0");
        assert_eq!(
            node.to_markup().unwrap(),
            r#"<mo lspace="0.2222em" rspace="0.2222em" class="tml-x" style="math-depth:0;">+</mo>"#
        );
    }

    #[test]
    fn debug_lists_every_field() {
        let mut node = MathNode::with_text(MathNodeType::Mo, "+");
        node.add_class("tml-x");
        let debug = format!("{node:?}");
        assert!(
            debug.starts_with("MathNode { node_type: Mo, attributes: Attributes"),
            "{debug}"
        );
        assert!(debug.contains("classes: [\"tml-x\"]"), "{debug}");
        assert!(debug.contains("children: ["), "{debug}");
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut node = MathNode::with_text(MathNodeType::Mtext, "a<b & 'c'");
        node.set_attribute("alttext", "\"q\"");
        assert_eq!(
            node.to_markup().unwrap(),
            "<mtext alttext=\"&quot;q&quot;\">a&lt;b &amp; &#x27;c&#x27;</mtext>"
        );
    }

    #[test]
    fn to_text_concatenates_descendants() {
        let row = MathNode::with_children(
            MathNodeType::Mrow,
            vec![
                MathNode::with_text(MathNodeType::Mi, "x").into(),
                MathNode::with_text(MathNodeType::Mo, "+").into(),
                MathDomNode::Fragment(vec![MathNode::with_text(MathNodeType::Mn, "1").into()]),
            ],
        );
        assert_eq!(row.to_text(), "x+1");
    }

    #[test]
    fn mstyle_unwraps_sole_row() {
        let row = MathNode::with_children(
            MathNodeType::Mrow,
            vec![MathNode::with_text(MathNodeType::Mi, "x").into()],
        );
        let styled = wrap_with_mstyle(vec![row.into()]);
        assert_eq!(styled.node_type, MathNodeType::Mstyle);
        assert_eq!(styled.children.len(), 1);
        assert!(styled.children[0].is(MathNodeType::Mi));

        let leaf = wrap_with_mstyle(vec![MathNode::with_text(MathNodeType::Mi, "y").into()]);
        assert!(leaf.children[0].is(MathNodeType::Mi));
    }
}
