//! The typed AST consumed by the builders
//!
//! Nodes are produced by an external front end (directly, or through the
//! parse handlers registered in [`crate::MathContext`]) and are immutable once
//! built. Every variant carries its parsing [`Mode`]; the [`NodeType`]
//! discriminant selects the builder.

use strum::{AsRefStr, Display, EnumCount, EnumDiscriminants, EnumIter};

use crate::spacing::AtomClass;
use crate::symbols::{Atom, Mode};
use crate::types::StyleLevel;
use crate::units::Measurement;

/// Parse node produced by the front end.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(vis(pub))]
#[strum_discriminants(doc = "Discriminant type identifying the builder for a parse node")]
#[strum_discriminants(derive(Display, Hash, AsRefStr, EnumCount, EnumIter))]
#[strum_discriminants(strum(serialize_all = "lowercase"))]
#[strum_discriminants(name(NodeType))]
pub enum ParseNode {
    /// ## Structural nodes
    /// A braced group
    OrdGroup(ParseNodeOrdGroup),
    /// Superscript/subscript combinations
    SupSub(ParseNodeSupSub),

    /// ## Symbol nodes
    /// Ordinary math symbols (letters, Greek)
    MathOrd(ParseNodeMathOrd),
    /// Ordinary symbols that render upright (digits, punctuation, text)
    TextOrd(ParseNodeTextOrd),
    /// Symbols with an atom family (operators, relations, delimiters)
    Atom(ParseNodeAtom),
    /// Explicit space characters and break hints
    Spacing(ParseNodeSpacing),

    /// ## Decorations
    /// Accents over a base (`\hat`, `\widehat`, `\'`)
    Accent(Box<ParseNodeAccent>),
    /// Stretchy accents under a base (`\utilde`, `\underleftarrow`)
    #[strum_discriminants(strum(serialize = "accentUnder"))]
    AccentUnder(Box<ParseNodeAccentUnder>),
    /// Horizontal braces and brackets (`\overbrace`, `\underbracket`)
    #[strum_discriminants(strum(serialize = "horizBrace"))]
    HorizBrace(ParseNodeHorizBrace),
    /// Extensible arrows with optional labels (`\xrightarrow`)
    #[strum_discriminants(strum(serialize = "xArrow"))]
    XArrow(ParseNodeXArrow),
    /// Two arrows stacked on top of each other (`\xrightleftharpoons`)
    #[strum_discriminants(strum(serialize = "stackedArrow"))]
    StackedArrow(Box<ParseNodeStackedArrow>),

    /// ## Text and styling
    /// Math font changes (`\mathbf`, `\mathbb`)
    Font(ParseNodeFont),
    /// Color changes
    Color(ParseNodeColor),
    /// Math class overrides (`\mathbin`, `\mathrel`)
    Mclass(ParseNodeMclass),
    /// Text inside math (`\text`, `\textbf`)
    Text(ParseNodeText),
    /// Style level changes (`\displaystyle`)
    Styling(ParseNodeStyling),

    /// ## Spacing and boxes
    /// Explicit kerns (`\kern`, `\mkern`)
    Kern(ParseNodeKern),
    /// Invisible content keeping its full size
    Phantom(ParseNodePhantom),
    /// Invisible content keeping only its width
    Hphantom(ParseNodeHphantom),
    /// Invisible content keeping only its height and depth
    Vphantom(ParseNodeVphantom),
    /// Embedded raster images
    Includegraphics(ParseNodeIncludegraphics),

    /// ## Argument-only nodes
    /// A parsed dimension argument
    Size(ParseNodeSize),
    /// A raw string argument
    Raw(ParseNodeRaw),
    /// A URL argument
    Url(ParseNodeUrl),
}

/// A braced group
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeOrdGroup {
    /// The parsing mode
    pub mode: Mode,
    /// Grouped expressions
    pub body: Vec<ParseNode>,
    /// Set for groups that only delimit scope (`\begingroup…\endgroup`).
    /// Unlike plain braces they keep the spacing of edge operators.
    pub semisimple: bool,
}

/// Superscript/subscript combination
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSupSub {
    /// The parsing mode
    pub mode: Mode,
    /// Base expression, absent for a bare `^2`
    pub base: Option<Box<ParseNode>>,
    /// Superscript
    pub sup: Option<Box<ParseNode>>,
    /// Subscript
    pub sub: Option<Box<ParseNode>>,
}

/// Ordinary math symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeMathOrd {
    /// The parsing mode
    pub mode: Mode,
    /// Symbol text or control sequence (`x`, `\alpha`)
    pub text: String,
}

/// Ordinary upright symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeTextOrd {
    /// The parsing mode
    pub mode: Mode,
    /// Symbol text or control sequence (`1`, `\prime`)
    pub text: String,
}

/// Symbol with an atom family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeAtom {
    /// The parsing mode
    pub mode: Mode,
    /// Atom family
    pub family: Atom,
    /// Symbol text or control sequence (`+`, `\leq`)
    pub text: String,
}

/// Explicit space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeSpacing {
    /// The parsing mode
    pub mode: Mode,
    /// Space command (`~`, `\ `, `\nobreak`)
    pub text: String,
}

/// Accent over (or, for `\c`, under) a base
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeAccent {
    /// The parsing mode
    pub mode: Mode,
    /// Accent command (`\hat`, `\widetilde`, `\'`)
    pub label: String,
    /// Whether the accent stretches to the width of its base
    pub is_stretchy: bool,
    /// Whether the accent shifts with the skew of its base
    pub is_shifty: bool,
    /// The accented expression
    pub base: ParseNode,
}

/// Accent under a base
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeAccentUnder {
    /// The parsing mode
    pub mode: Mode,
    /// Accent command
    pub label: String,
    /// Whether the accent stretches to the width of its base
    pub is_stretchy: bool,
    /// Whether the accent shifts with the skew of its base
    pub is_shifty: bool,
    /// The accented expression
    pub base: ParseNode,
}

/// Horizontal brace or bracket
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeHorizBrace {
    /// The parsing mode
    pub mode: Mode,
    /// Brace command
    pub label: String,
    /// Whether the brace sits above the base
    pub is_over: bool,
    /// The braced expression
    pub base: Box<ParseNode>,
}

/// Extensible arrow
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeXArrow {
    /// The parsing mode
    pub mode: Mode,
    /// Arrow command
    pub label: String,
    /// Label above the arrow
    pub body: Box<ParseNode>,
    /// Optional label below the arrow
    pub below: Option<Box<ParseNode>>,
}

/// Two stacked extensible arrows
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeStackedArrow {
    /// The parsing mode
    pub mode: Mode,
    /// Arrow command
    pub label: String,
    /// Label above the upper arrow
    pub body: ParseNode,
    /// Label below the lower arrow
    pub below: Option<ParseNode>,
    /// Invisible copy of `below` that widens the upper arrow
    pub upper_arrow_below: Option<ParseNode>,
    /// Invisible copy of `body` that widens the lower arrow
    pub lower_arrow_body: ParseNode,
}

/// Math font change
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeFont {
    /// The parsing mode
    pub mode: Mode,
    /// Font name without the backslash (`mathbf`)
    pub font: String,
    /// Expression in the new font
    pub body: Box<ParseNode>,
}

/// Color change
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeColor {
    /// The parsing mode
    pub mode: Mode,
    /// CSS color
    pub color: String,
    /// Colored expressions
    pub body: Vec<ParseNode>,
}

/// Math class override
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeMclass {
    /// The parsing mode
    pub mode: Mode,
    /// Target atom class
    pub mclass: AtomClass,
    /// Classified expressions
    pub body: Vec<ParseNode>,
    /// Whether the body is a single character
    pub is_character_box: bool,
    /// Whether the body is plain symbol text that can become one `mo`
    pub must_promote: bool,
}

/// Text inside math
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeText {
    /// The parsing mode
    pub mode: Mode,
    /// Text content
    pub body: Vec<ParseNode>,
    /// Text font command without the backslash (`textbf`), if any
    pub font: Option<String>,
}

/// Style level change
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeStyling {
    /// The parsing mode
    pub mode: Mode,
    /// Target style
    pub style: StyleLevel,
    /// Styled expressions
    pub body: Vec<ParseNode>,
}

/// Explicit kern
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeKern {
    /// The parsing mode
    pub mode: Mode,
    /// Kern width
    pub dimension: Measurement,
}

/// Full phantom
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodePhantom {
    /// The parsing mode
    pub mode: Mode,
    /// Hidden expressions
    pub body: Vec<ParseNode>,
}

/// Width-only phantom
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeHphantom {
    /// The parsing mode
    pub mode: Mode,
    /// Hidden expression
    pub body: Box<ParseNode>,
}

/// Height-only phantom
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeVphantom {
    /// The parsing mode
    pub mode: Mode,
    /// Hidden expression
    pub body: Box<ParseNode>,
}

/// Embedded image
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeIncludegraphics {
    /// The parsing mode
    pub mode: Mode,
    /// Alternative text
    pub alt: String,
    /// Image width, zero for automatic
    pub width: Measurement,
    /// Height above the baseline
    pub height: Measurement,
    /// Total height; the part beyond `height` hangs below the baseline
    pub totalheight: Measurement,
    /// Image source URL
    pub src: String,
}

/// Dimension argument
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSize {
    /// The parsing mode
    pub mode: Mode,
    /// Parsed dimension
    pub value: Measurement,
    /// Whether the argument was left empty
    pub is_blank: bool,
}

/// Raw string argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeRaw {
    /// The parsing mode
    pub mode: Mode,
    /// Unparsed text
    pub string: String,
}

/// URL argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeUrl {
    /// The parsing mode
    pub mode: Mode,
    /// The URL
    pub url: String,
}

impl NodeType {
    /// Tags that only occur as arguments of other constructs and have no
    /// builder of their own.
    #[must_use]
    pub const fn is_argument_only(self) -> bool {
        matches!(self, Self::Size | Self::Raw | Self::Url)
    }
}

impl ParseNode {
    /// The discriminant of this node.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        NodeType::from(self)
    }

    /// TeXbook algorithms often reference "character boxes", which are simply
    /// groups with a single character in them. To decide if something is a
    /// character box, we find its innermost group, and see if it is a
    /// single character.
    #[must_use]
    pub fn is_character_box(&self) -> bool {
        matches!(
            self.to_base_elem(),
            Self::MathOrd(_) | Self::TextOrd(_) | Self::Atom(_)
        )
    }

    /// Pulls the innermost element out of single-element groups, colors and
    /// font changes.
    #[must_use]
    pub fn to_base_elem(&self) -> &Self {
        match self {
            Self::OrdGroup(group) if group.body.len() == 1 => group.body[0].to_base_elem(),
            Self::Color(color) if color.body.len() == 1 => color.body[0].to_base_elem(),
            Self::Font(font) => font.body.to_base_elem(),
            _ => self,
        }
    }

    /// Get the mode of current node
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::OrdGroup(node) => node.mode,
            Self::SupSub(node) => node.mode,
            Self::MathOrd(node) => node.mode,
            Self::TextOrd(node) => node.mode,
            Self::Atom(node) => node.mode,
            Self::Spacing(node) => node.mode,
            Self::Accent(node) => node.mode,
            Self::AccentUnder(node) => node.mode,
            Self::HorizBrace(node) => node.mode,
            Self::XArrow(node) => node.mode,
            Self::StackedArrow(node) => node.mode,
            Self::Font(node) => node.mode,
            Self::Color(node) => node.mode,
            Self::Mclass(node) => node.mode,
            Self::Text(node) => node.mode,
            Self::Styling(node) => node.mode,
            Self::Kern(node) => node.mode,
            Self::Phantom(node) => node.mode,
            Self::Hphantom(node) => node.mode,
            Self::Vphantom(node) => node.mode,
            Self::Includegraphics(node) => node.mode,
            Self::Size(node) => node.mode,
            Self::Raw(node) => node.mode,
            Self::Url(node) => node.mode,
        }
    }

    /// Get the text field of symbol nodes
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::MathOrd(node) => Some(&node.text),
            Self::TextOrd(node) => Some(&node.text),
            Self::Atom(node) => Some(&node.text),
            Self::Spacing(node) => Some(&node.text),
            _ => None,
        }
    }

    /// Get the label field of decoration nodes
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Accent(node) => Some(&node.label),
            Self::AccentUnder(node) => Some(&node.label),
            Self::HorizBrace(node) => Some(&node.label),
            Self::XArrow(node) => Some(&node.label),
            Self::StackedArrow(node) => Some(&node.label),
            _ => None,
        }
    }

    /// Builds an ordinary group around `body`.
    #[must_use]
    pub const fn ord_group(mode: Mode, body: Vec<Self>) -> Self {
        Self::OrdGroup(ParseNodeOrdGroup {
            mode,
            body,
            semisimple: false,
        })
    }
}

macro_rules! impl_from_node {
    ($($variant:ident($inner:ty)),* $(,)?) => {
        $(
            impl From<$inner> for ParseNode {
                fn from(node: $inner) -> Self {
                    Self::$variant(node.into())
                }
            }
        )*
    };
}

impl_from_node!(
    OrdGroup(ParseNodeOrdGroup),
    SupSub(ParseNodeSupSub),
    MathOrd(ParseNodeMathOrd),
    TextOrd(ParseNodeTextOrd),
    Atom(ParseNodeAtom),
    Spacing(ParseNodeSpacing),
    Accent(ParseNodeAccent),
    AccentUnder(ParseNodeAccentUnder),
    HorizBrace(ParseNodeHorizBrace),
    XArrow(ParseNodeXArrow),
    StackedArrow(ParseNodeStackedArrow),
    Font(ParseNodeFont),
    Color(ParseNodeColor),
    Mclass(ParseNodeMclass),
    Text(ParseNodeText),
    Styling(ParseNodeStyling),
    Kern(ParseNodeKern),
    Phantom(ParseNodePhantom),
    Hphantom(ParseNodeHphantom),
    Vphantom(ParseNodeVphantom),
    Includegraphics(ParseNodeIncludegraphics),
    Size(ParseNodeSize),
    Raw(ParseNodeRaw),
    Url(ParseNodeUrl),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn mathord(text: &str) -> ParseNode {
        ParseNodeMathOrd {
            mode: Mode::Math,
            text: text.to_owned(),
        }
        .into()
    }

    #[test]
    fn node_type_names() {
        assert_eq!(NodeType::OrdGroup.as_ref(), "ordgroup");
        assert_eq!(NodeType::AccentUnder.as_ref(), "accentUnder");
        assert_eq!(NodeType::XArrow.to_string(), "xArrow");
        assert_eq!(NodeType::Includegraphics.as_ref(), "includegraphics");
        assert_eq!(mathord("x").node_type(), NodeType::MathOrd);
    }

    #[test]
    fn character_boxes_look_through_groups() {
        let single = ParseNode::ord_group(Mode::Math, vec![mathord("x")]);
        assert!(single.is_character_box());

        let font: ParseNode = ParseNodeFont {
            mode: Mode::Math,
            font: "mathbf".to_owned(),
            body: Box::new(single),
        }
        .into();
        assert!(font.is_character_box());

        let double = ParseNode::ord_group(Mode::Math, vec![mathord("a"), mathord("b")]);
        assert!(!double.is_character_box());
        assert!(matches!(double.to_base_elem(), ParseNode::OrdGroup(_)));
    }

    #[test]
    fn argument_only_tags() {
        assert!(NodeType::Size.is_argument_only());
        assert!(NodeType::Url.is_argument_only());
        assert!(!NodeType::Kern.is_argument_only());
    }
}
