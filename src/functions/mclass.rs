//! Math class overrides: `\mathbin`, `\mathrel` and friends
//!
//! The body is built as usual, then given the spacing an atom of the target
//! class would get. When the body is plain symbol text it is promoted to a
//! single `<mo>` (or `<mi>` for `\mathord`) so the renderer treats it as one
//! token.

use core::str::FromStr as _;

use crate::MathContext;
use crate::build_mathml::build_expression;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeMathOrd, ParseNodeMclass};
use crate::spacing::{AtomClass, apply_spacing};
use crate::symbols::resolve_text;
use crate::types::{ParseError, ParseErrorKind};

/// Registers the class override commands.
pub fn define_mclass(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Mclass),
        names: &[
            "\\mathord",
            "\\mathbin",
            "\\mathrel",
            "\\mathopen",
            "\\mathclose",
            "\\mathpunct",
            "\\mathinner",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            primitive: true,
            ..Default::default()
        },
        handler: Some(handler),
        mathml_builder: Some(mathml_builder),
    });
}

/// Text of a symbol-like node, or `None` if the node is anything else.
fn promotable_text(node: &ParseNode) -> Option<String> {
    match node {
        ParseNode::MathOrd(_) | ParseNode::TextOrd(_) | ParseNode::Atom(_) => node
            .text()
            .map(|text| resolve_text(node.mode(), text).to_owned()),
        // Any child without text of its own keeps the body a row
        ParseNode::Text(text) => text
            .body
            .iter()
            .map(|child| child.text().map(|t| resolve_text(child.mode(), t)))
            .collect(),
        _ => None,
    }
}

fn handler(
    context: FunctionContext,
    mut args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let body = args.remove(0);
    let class_name = context
        .func_name
        .strip_prefix("\\math")
        .map(|name| format!("m{name}"))
        .unwrap_or_default();
    let mclass = AtomClass::from_str(&class_name).map_err(|_| {
        ParseError::new(ParseErrorKind::UnknownMathClass {
            class: context.func_name.to_owned(),
        })
    })?;
    let is_character_box = body.is_character_box();

    let items = match &body {
        ParseNode::OrdGroup(group) => group.body.as_slice(),
        other => core::slice::from_ref(other),
    };
    let merged: Option<String> = items.iter().map(promotable_text).collect();

    let Some(text) = merged else {
        return Ok(ParseNodeMclass {
            mode: context.mode,
            mclass,
            body: ord_argument(body),
            is_character_box,
            must_promote: false,
        }
        .into());
    };

    let mord: ParseNode = ParseNodeMathOrd {
        mode: context.mode,
        text,
    }
    .into();
    if mclass == AtomClass::Mord && mord.text().is_some_and(|t| t.chars().count() > 1) {
        return Ok(mord);
    }
    Ok(ParseNodeMclass {
        mode: context.mode,
        mclass,
        body: vec![mord],
        is_character_box,
        must_promote: true,
    }
    .into())
}

/// Retags a lone built element; anything else comes back untouched.
fn retag_single(
    mut inner: Vec<MathDomNode>,
    node_type: MathNodeType,
) -> Result<MathNode, Vec<MathDomNode>> {
    if !matches!(inner.as_slice(), [MathDomNode::Math(_)]) {
        return Err(inner);
    }
    match inner.pop() {
        Some(MathDomNode::Math(mut node)) => {
            node.node_type = node_type;
            Ok(node)
        }
        other => Err(other.into_iter().collect()),
    }
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Mclass(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Mclass,
        }));
    };

    let inner = build_expression(ctx, &group.body, options, false)?;
    let mut built = match group.mclass {
        AtomClass::Minner => MathNode::with_children(MathNodeType::Mpadded, inner),
        AtomClass::Mord => match retag_single(inner, MathNodeType::Mi) {
            Ok(mut mi) => {
                if mi.single_text() == Some("\u{2207}") {
                    mi.set_attribute("mathvariant", "normal");
                }
                mi
            }
            Err(inner) => MathNode::with_children(MathNodeType::Mi, inner),
        },
        _ if group.must_promote => match retag_single(inner, MathNodeType::Mo) {
            Ok(mut mo) => {
                let latin = group
                    .body
                    .first()
                    .and_then(ParseNode::text)
                    .is_some_and(|t| t.chars().any(|c| c.is_ascii_alphabetic()));
                if group.is_character_box && latin {
                    mo.set_attribute("mathvariant", "italic");
                }
                mo
            }
            Err(inner) => MathNode::with_children(MathNodeType::Mrow, inner),
        },
        _ => MathNode::with_children(MathNodeType::Mrow, inner),
    };

    if group.mclass != AtomClass::Mord {
        apply_spacing(&mut built, group.mclass, options);
    }
    Ok(built.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_mathml::build_group;
    use crate::functions::test_util::{atom, group, mathord, text_char};
    use crate::parse_node::{ParseNodeColor, ParseNodeText};
    use crate::spacing::is_padding;
    use crate::symbols::Atom;
    use crate::tree::VirtualNode as _;
    use crate::types::Mode;

    fn construct(name: &str, arg: ParseNode) -> ParseNode {
        MathContext::default()
            .construct(name, Mode::Math, vec![arg], vec![])
            .unwrap()
    }

    fn build(node: &ParseNode, options: &Options) -> MathNode {
        let built = build_group(&MathContext::default(), node, options).unwrap();
        let MathDomNode::Math(node) = built else {
            panic!("expected an element");
        };
        node
    }

    fn row_class(class: AtomClass) -> ParseNode {
        ParseNodeMclass {
            mode: Mode::Math,
            mclass: class,
            body: vec![mathord("a"), mathord("b")],
            is_character_box: false,
            must_promote: false,
        }
        .into()
    }

    #[test]
    fn symbol_text_is_promoted_to_one_operator() {
        let node = construct("\\mathbin", group(vec![mathord("a"), mathord("b")]));
        assert_promoted(&node, true);
        assert_eq!(
            build(&node, &Options::default().with_level(0)).to_markup().unwrap(),
            "<mo lspace=\"0.2222em\" rspace=\"0.2222em\">ab</mo>"
        );
        assert_eq!(
            build(&node, &Options::default().with_level(2)).to_markup().unwrap(),
            "<mo lspace=\"0\" rspace=\"0\">ab</mo>"
        );
    }

    fn assert_promoted(node: &ParseNode, must_promote: bool) {
        let ParseNode::Mclass(mclass) = node else {
            panic!("expected an mclass node, got {node:?}");
        };
        assert_eq!(mclass.must_promote, must_promote);
    }

    #[test]
    fn rows_get_spacers_only_at_shallow_levels() {
        let bin = row_class(AtomClass::Mbin);
        let shallow = build(&bin, &Options::default().with_level(0));
        assert_eq!(shallow.node_type, MathNodeType::Mrow);
        assert_eq!(shallow.children.len(), 4);
        assert!(is_padding(&shallow.children[0]));
        assert!(is_padding(&shallow.children[3]));
        assert_eq!(
            shallow.children[0].as_math_node().unwrap().get_attribute("width"),
            Some("0.2222em")
        );

        let deep = build(&bin, &Options::default().with_level(2));
        assert_eq!(deep.children.len(), 2);
        assert!(!deep.children.iter().any(is_padding));
    }

    #[test]
    fn ord_over_a_character_is_an_identifier() {
        let node = construct("\\mathord", group(vec![atom(Atom::Bin, "+")]));
        assert_eq!(
            build(&node, &Options::default()).to_markup().unwrap(),
            "<mi>+</mi>"
        );

        let nabla = construct("\\mathord", mathord("\\nabla"));
        assert_eq!(
            build(&nabla, &Options::default()).to_markup().unwrap(),
            "<mi mathvariant=\"normal\">\u{2207}</mi>"
        );
    }

    #[test]
    fn long_ord_text_becomes_a_plain_mathord() {
        let node = construct("\\mathord", group(vec![mathord("a"), mathord("b")]));
        assert_eq!(node, mathord("ab"));
    }

    #[test]
    fn single_letter_relation_stays_italic() {
        let node = construct("\\mathrel", mathord("R"));
        let built = build(&node, &Options::default());
        assert_eq!(built.node_type, MathNodeType::Mo);
        assert_eq!(built.get_attribute("mathvariant"), Some("italic"));
        assert_eq!(built.get_attribute("lspace"), Some("0.2778em"));
    }

    #[test]
    fn text_with_styled_content_stays_a_row() {
        let colored: ParseNode = ParseNodeColor {
            mode: Mode::Text,
            color: "red".to_owned(),
            body: vec![text_char("b")],
        }
        .into();
        let text: ParseNode = ParseNodeText {
            mode: Mode::Math,
            body: vec![text_char("a"), colored],
            font: None,
        }
        .into();
        let node = construct("\\mathbin", text);
        assert_promoted(&node, false);

        let built = build(&node, &Options::default());
        assert_eq!(built.node_type, MathNodeType::Mrow);
        assert!(is_padding(&built.children[0]));
        let markup = built.to_markup().unwrap();
        assert!(markup.contains(">a<"), "{markup}");
        assert!(markup.contains("color:red;"), "{markup}");
        assert!(markup.contains(">b<"), "{markup}");
    }

    #[test]
    fn inner_is_padded() {
        let inner = build(&row_class(AtomClass::Minner), &Options::default());
        assert_eq!(inner.node_type, MathNodeType::Mpadded);
        assert_eq!(inner.children.len(), 4);
    }
}
