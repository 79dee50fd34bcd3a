//! MathML building driver
//!
//! This module walks the AST, dispatches every node to the builder registered
//! for its [`NodeType`](crate::parse_node::NodeType) and joins the results into
//! rows. The builders themselves live in [`crate::functions`].

use crate::context::MathContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType, TextNode};
use crate::options::{FontShape, FontWeight, Options};
use crate::parse_node::ParseNode;
use crate::spacing::AtomClass;
use crate::symbols::{Atom, resolve_text};
use crate::tree::VirtualNode as _;
use crate::types::{CssProperty, Mode, ParseError, ParseErrorKind};

/// Namespace of the `<math>` root.
pub const MATHML_XMLNS: &str = "http://www.w3.org/1998/Math/MathML";

/// Creates a text run, replacing control sequences by their Unicode text.
#[must_use]
pub fn make_text(text: &str, mode: Mode) -> TextNode {
    TextNode::new(resolve_text(mode, text))
}

/// Joins built nodes into one.
///
/// A lone node is returned as is; anything else becomes an `<mrow>`. Unless
/// the row is `semisimple`, operators at both of its ends lose their spacing,
/// matching TeX, where an operator at the edge of a group has nothing to
/// space against.
#[must_use]
pub fn make_row(body: Vec<MathDomNode>, semisimple: bool) -> MathDomNode {
    let mut body: Vec<MathDomNode> = body.into_iter().flat_map(MathDomNode::into_vec).collect();
    if body.len() == 1
        && let Some(node) = body.pop()
    {
        return node;
    }

    if !semisimple {
        if let Some(MathDomNode::Math(first)) = body.first_mut() {
            suppress_edge_spacing(first);
        }
        if let Some(MathDomNode::Math(last)) = body.last_mut() {
            suppress_edge_spacing(last);
        }
    }
    MathNode::with_children(MathNodeType::Mrow, body).into()
}

fn suppress_edge_spacing(node: &mut MathNode) {
    if node.node_type == MathNodeType::Mo && node.get_attribute("fence") != Some("true") {
        node.set_attribute("lspace", "0em");
        node.set_attribute("rspace", "0em");
    }
}

/// Determines the `mathvariant` for a symbol node under `options`.
///
/// Text fonts take precedence over math fonts. `None` means the renderer
/// default: italic for single letters, upright otherwise.
#[must_use]
pub fn get_variant(group: &ParseNode, options: &Options) -> Option<&'static str> {
    let text_bold = options.font_weight == FontWeight::TextBf;
    let text_italic = options.font_shape == FontShape::TextIt;
    match options.font_family.as_str() {
        "texttt" => return Some("monospace"),
        "textsf" => {
            return Some(match (text_italic, text_bold) {
                (true, true) => "sans-serif-bold-italic",
                (true, false) => "sans-serif-italic",
                (false, true) => "bold-sans-serif",
                (false, false) => "sans-serif",
            });
        }
        _ => {}
    }
    match (text_italic, text_bold) {
        (true, true) => return Some("bold-italic"),
        (true, false) => return Some("italic"),
        (false, true) => return Some("bold"),
        (false, false) => {}
    }

    match options.font.as_str() {
        "mathit" => Some("italic"),
        "mathrm" => {
            // Lower case Greek stays italic under \mathrm.
            let greek_lower = group
                .text()
                .map(|text| resolve_text(group.mode(), text))
                .and_then(|text| text.chars().next())
                .is_some_and(|c| ('\u{3ac}'..='\u{3ce}').contains(&c));
            Some(if greek_lower { "italic" } else { "normal" })
        }
        "mathup" | "textrm" => Some("normal"),
        "boldsymbol" => match group {
            ParseNode::TextOrd(_) => Some("bold"),
            _ => Some("bold-italic"),
        },
        "mathbf" | "textbf" => Some("bold"),
        "mathbb" => Some("double-struck"),
        "mathfrak" => Some("fraktur"),
        "mathscr" | "mathcal" => Some("script"),
        "mathsf" | "textsf" => Some("sans-serif"),
        "mathsfit" => Some("sans-serif-italic"),
        "mathtt" | "texttt" => Some("monospace"),
        _ => None,
    }
}

/// Whether `node` is a relation, as an atom or as a class override.
fn is_rel(node: &ParseNode) -> bool {
    match node {
        ParseNode::Atom(atom) => atom.family == Atom::Rel,
        ParseNode::Mclass(mclass) => mclass.mclass == AtomClass::Mrel,
        _ => false,
    }
}

/// `<mi>.</mi>` following a number.
fn is_number_punctuation(node: &MathNode) -> bool {
    node.node_type == MathNodeType::Mi && node.single_text() == Some(".")
}

/// A token element holding exactly one character.
fn is_single_char_token(node: &MathDomNode) -> bool {
    let Some(node) = node.as_math_node() else {
        return false;
    };
    matches!(
        node.node_type,
        MathNodeType::Mi | MathNodeType::Mn | MathNodeType::Mo | MathNodeType::Mtext
    ) && node
        .single_text()
        .is_some_and(|text| text.chars().count() == 1)
}

/// Splits fragments, and the plain token rows of color and font groups, into
/// their children.
fn splice(node: &ParseNode, group: MathDomNode) -> Vec<MathDomNode> {
    match group {
        MathDomNode::Fragment(children) => children,
        MathDomNode::Math(row)
            if matches!(node, ParseNode::Color(_) | ParseNode::Font(_))
                && row.node_type == MathNodeType::Mrow
                && row.attributes.is_empty()
                && row.style.is_empty()
                && row.classes.is_empty()
                && row.children.iter().all(is_single_char_token) =>
        {
            row.children
        }
        other => vec![other],
    }
}

fn can_merge(last: &MathNode, current: &MathNode) -> bool {
    match (last.node_type, current.node_type) {
        (MathNodeType::Mtext, MathNodeType::Mtext) => {
            last.get_attribute("mathvariant") == current.get_attribute("mathvariant")
                && last.style == current.style
        }
        (MathNodeType::Mn, MathNodeType::Mn) => last.attributes == current.attributes,
        (MathNodeType::Mn, _) => is_number_punctuation(current),
        _ => false,
    }
}

fn push_merged(groups: &mut Vec<MathDomNode>, group: MathDomNode) {
    let merge = match (groups.last(), &group) {
        (Some(MathDomNode::Math(last)), MathDomNode::Math(current)) => can_merge(last, current),
        _ => false,
    };
    match group {
        MathDomNode::Math(current) if merge => {
            if let Some(MathDomNode::Math(last)) = groups.last_mut() {
                last.children.extend(current.children);
            }
        }
        other => groups.push(other),
    }
}

/// Builds a list of nodes into a flat run of siblings.
///
/// Fragments and plain font/color rows are spliced into the run, adjacent
/// numbers and same-variant text runs are merged, and relations next to
/// relations lose the space between them. A lone operator in a group that is
/// not `semisimple` loses its spacing altogether.
pub fn build_expression(
    ctx: &MathContext,
    expression: &[ParseNode],
    options: &Options,
    semisimple: bool,
) -> Result<Vec<MathDomNode>, ParseError> {
    if let [node] = expression
        && !semisimple
    {
        let mut groups = splice(node, build_group(ctx, node, options)?);
        if let [MathDomNode::Math(group)] = groups.as_mut_slice()
            && group.node_type == MathNodeType::Mo
        {
            group.set_attribute("lspace", "0em");
            group.set_attribute("rspace", "0em");
        }
        return Ok(groups);
    }

    let mut built = expression
        .iter()
        .map(|node| build_group(ctx, node, options))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, group) in built.iter_mut().enumerate() {
        if !is_rel(&expression[i]) {
            continue;
        }
        let Some(node) = group.as_math_node_mut() else {
            continue;
        };
        if expression.get(i + 1).is_some_and(is_rel) {
            node.set_attribute("rspace", "0em");
        }
        if i > 0 && is_rel(&expression[i - 1]) {
            node.set_attribute("lspace", "0em");
        }
    }

    let mut groups = Vec::with_capacity(built.len());
    for (node, group) in expression.iter().zip(built) {
        for group in splice(node, group) {
            push_merged(&mut groups, group);
        }
    }
    Ok(groups)
}

/// Builds a list of nodes and joins the result with [`make_row`].
pub fn build_expression_row(
    ctx: &MathContext,
    expression: &[ParseNode],
    options: &Options,
    semisimple: bool,
) -> Result<MathDomNode, ParseError> {
    let body = build_expression(ctx, expression, options, semisimple)?;
    Ok(make_row(body, semisimple))
}

/// Builds one node with the builder registered for its type.
///
/// Argument-only nodes (`size`, `raw`, `url`) and tags without a registered
/// builder fail with [`ParseErrorKind::UnknownGroupType`].
pub fn build_group(
    ctx: &MathContext,
    group: &ParseNode,
    options: &Options,
) -> Result<MathDomNode, ParseError> {
    let group_type = group.node_type();
    let Some(builder) = ctx.builder(group_type) else {
        return Err(ParseError::new(ParseErrorKind::UnknownGroupType {
            group_type,
        }));
    };
    log::debug!("building {group_type} at level {}", options.level);
    builder(group, options, ctx)
}

/// Builds the `<math>` root for a whole expression.
///
/// The expression is built under the context's settings. In display mode the
/// root is marked `display="block"`.
pub fn build_mathml(ctx: &MathContext, tree: &[ParseNode]) -> Result<MathNode, ParseError> {
    let settings = ctx.settings();
    let options = Options::from_settings(settings);
    let mut expression = build_expression(ctx, tree, &options, false)?;

    let wrapper = if expression.len() == 1
        && expression.first().is_some_and(|node| node.as_math_node().is_some())
        && let Some(node) = expression.pop()
    {
        node
    } else {
        MathNode::with_children(MathNodeType::Mrow, expression).into()
    };

    let mut math = MathNode::with_children(MathNodeType::Math, vec![wrapper]);
    math.set_attribute("xmlns", MATHML_XMLNS);
    if settings.display_mode {
        math.set_attribute("display", "block");
        math.style.insert(CssProperty::Display, "block");
    }
    if let Some(color) = &settings.color {
        math.style.insert(CssProperty::Color, color.clone());
    }
    Ok(math)
}

/// Builds an expression and serializes it to MathML markup.
pub fn render_to_string(ctx: &MathContext, tree: &[ParseNode]) -> Result<String, ParseError> {
    build_mathml(ctx, tree)?.to_markup()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_node::{ParseNodeAtom, ParseNodeMathOrd, ParseNodeRaw, ParseNodeTextOrd};
    use crate::types::Settings;

    fn mathord(text: &str) -> ParseNode {
        ParseNodeMathOrd {
            mode: Mode::Math,
            text: text.to_owned(),
        }
        .into()
    }

    fn textord(text: &str) -> ParseNode {
        ParseNodeTextOrd {
            mode: Mode::Math,
            text: text.to_owned(),
        }
        .into()
    }

    fn atom(family: Atom, text: &str) -> ParseNode {
        ParseNodeAtom {
            mode: Mode::Math,
            family,
            text: text.to_owned(),
        }
        .into()
    }

    fn markup(tree: &[ParseNode]) -> String {
        render_to_string(&MathContext::default(), tree).unwrap()
    }

    #[test]
    fn root_carries_namespace() {
        assert_eq!(
            markup(&[mathord("x")]),
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mi>x</mi></math>"
        );
    }

    #[test]
    fn several_nodes_are_wrapped_in_a_row() {
        let tree = [mathord("a"), atom(Atom::Bin, "+"), mathord("b")];
        assert_eq!(
            markup(&tree),
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mrow><mi>a</mi><mo>+</mo><mi>b</mi></mrow></math>"
        );
    }

    #[test]
    fn display_mode_marks_the_root() {
        let ctx = MathContext::new(Settings::builder().display_mode(true).build());
        let math = build_mathml(&ctx, &[mathord("x")]).unwrap();
        assert_eq!(math.get_attribute("display"), Some("block"));
        assert_eq!(math.style.get(CssProperty::Display), Some("block"));
    }

    #[test]
    fn digits_merge_into_one_number() {
        let ctx = MathContext::default();
        let tree = [textord("1"), textord("."), textord("5"), mathord("x")];
        let built = build_expression(&ctx, &tree, &Options::default(), false).unwrap();
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].node_type(), Some(MathNodeType::Mn));
        assert_eq!(built[0].to_text(), "1.5");
    }

    #[test]
    fn adjacent_relations_lose_inner_space() {
        let ctx = MathContext::default();
        let tree = [atom(Atom::Rel, "<"), atom(Atom::Rel, "=")];
        let built = build_expression(&ctx, &tree, &Options::default(), false).unwrap();
        let first = built[0].as_math_node().unwrap();
        let second = built[1].as_math_node().unwrap();
        assert_eq!(first.get_attribute("rspace"), Some("0em"));
        assert_eq!(first.get_attribute("lspace"), None);
        assert_eq!(second.get_attribute("lspace"), Some("0em"));
    }

    #[test]
    fn lone_operator_in_braces_loses_spacing() {
        let ctx = MathContext::default();
        let plus = [atom(Atom::Bin, "+")];
        let braced = build_expression(&ctx, &plus, &Options::default(), false).unwrap();
        assert_eq!(
            braced[0].as_math_node().unwrap().get_attribute("lspace"),
            Some("0em")
        );
        let scoped = build_expression(&ctx, &plus, &Options::default(), true).unwrap();
        assert_eq!(scoped[0].as_math_node().unwrap().get_attribute("lspace"), None);
    }

    #[test]
    fn rows_zero_edge_operators() {
        let row = make_row(
            vec![
                MathNode::with_text(MathNodeType::Mo, "-").into(),
                MathNode::with_text(MathNodeType::Mi, "x").into(),
            ],
            false,
        );
        assert_eq!(
            row.to_markup().unwrap(),
            "<mrow><mo lspace=\"0em\" rspace=\"0em\">-</mo><mi>x</mi></mrow>"
        );
        let single = make_row(vec![MathNode::with_text(MathNodeType::Mo, "-").into()], false);
        assert_eq!(single.to_markup().unwrap(), "<mo>-</mo>");
    }

    #[test]
    fn argument_nodes_have_no_builder() {
        let raw: ParseNode = ParseNodeRaw {
            mode: Mode::Math,
            string: "x".to_owned(),
        }
        .into();
        let err = build_group(&MathContext::default(), &raw, &Options::default()).unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::UnknownGroupType { .. }));
    }

    #[test]
    fn variants_follow_fonts() {
        let x = mathord("x");
        let alpha = mathord("\\alpha");
        let opts = Options::default();
        assert_eq!(get_variant(&x, &opts), None);
        assert_eq!(get_variant(&x, &opts.with_font("mathbf")), Some("bold"));
        assert_eq!(get_variant(&x, &opts.with_font("mathrm")), Some("normal"));
        assert_eq!(get_variant(&alpha, &opts.with_font("mathrm")), Some("italic"));
        assert_eq!(
            get_variant(&x, &opts.with_text_font_family("textsf").with_text_font_weight(FontWeight::TextBf)),
            Some("bold-sans-serif")
        );
    }
}
