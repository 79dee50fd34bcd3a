//! Color changes: `\textcolor{c}{body}` and the switch form `\color{c}`
//!
//! The switch form colors the rest of its group; the front end hands that
//! remainder over as the second argument, so both commands share a handler.

use crate::MathContext;
use crate::build_mathml::build_expression;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeColor};
use crate::types::{ArgType, CssProperty, ParseError, ParseErrorKind};

/// Registers `\textcolor` and `\color`.
pub fn define_color(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Color),
        names: &["\\textcolor"],
        props: FunctionPropSpec {
            num_args: 2,
            allowed_in_text: true,
            allowed_in_argument: true,
            arg_types: Some(vec![ArgType::Color, ArgType::Original]),
            ..Default::default()
        },
        handler: Some(handler),
        mathml_builder: Some(mathml_builder),
    });

    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Color),
        names: &["\\color"],
        props: FunctionPropSpec {
            num_args: 2,
            allowed_in_text: true,
            arg_types: Some(vec![ArgType::Color, ArgType::Original]),
            ..Default::default()
        },
        handler: Some(handler),
        mathml_builder: None,
    });
}

/// Checks a color specification, normalizing bare six-digit hex to `#rrggbb`.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, bare `rrggbb` and color
/// names made of ASCII letters.
pub fn validate_color(color: &str) -> Result<String, ParseError> {
    let is_hex = |s: &str| s.chars().all(|c| c.is_ascii_hexdigit());
    let valid = match color.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 4 | 6 | 8) && is_hex(hex),
        None if color.len() == 6 && is_hex(color) => return Ok(format!("#{color}")),
        None => !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic()),
    };
    if valid {
        Ok(color.to_owned())
    } else {
        Err(ParseError::new(ParseErrorKind::InvalidColor {
            color: color.to_owned(),
        }))
    }
}

fn handler(
    context: FunctionContext,
    mut args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let body = args.pop();
    let color = match args.pop() {
        Some(ParseNode::Raw(raw)) => validate_color(raw.string.trim())?,
        _ => {
            return Err(ParseError::new(ParseErrorKind::UnexpectedArgumentType {
                func: context.func_name.to_owned(),
                index: 0,
                expected: NodeType::Raw,
            }));
        }
    };
    Ok(ParseNodeColor {
        mode: context.mode,
        color,
        body: body.map(ord_argument).unwrap_or_default(),
    }
    .into())
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Color(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Color,
        }));
    };

    let options = options.with_color(group.color.as_str());
    let mut inner = build_expression(ctx, &group.body, &options, true)?;
    if inner.is_empty() {
        inner.push(MathNode::with_children(MathNodeType::Mrow, Vec::new()).into());
    }
    for child in &mut inner {
        if let Some(math) = child.as_math_node_mut() {
            math.style.insert(CssProperty::Color, group.color.as_str());
        }
    }
    Ok(MathDomNode::Fragment(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_mathml::{build_expression_row, build_group};
    use crate::functions::test_util::{atom, group, mathord, textord};
    use crate::parse_node::ParseNodeRaw;
    use crate::symbols::Atom;
    use crate::tree::VirtualNode as _;
    use crate::types::Mode;

    fn raw(text: &str) -> ParseNode {
        ParseNodeRaw {
            mode: Mode::Math,
            string: text.to_owned(),
        }
        .into()
    }

    fn textcolor(color: &str, body: ParseNode) -> Result<ParseNode, ParseError> {
        MathContext::default().construct(
            "\\textcolor",
            Mode::Math,
            vec![raw(color), body],
            vec![],
        )
    }

    #[test]
    fn colors_are_validated() {
        assert_eq!(validate_color("red").unwrap(), "red");
        assert_eq!(validate_color("#0f0").unwrap(), "#0f0");
        assert_eq!(validate_color("#ff000080").unwrap(), "#ff000080");
        assert_eq!(validate_color("FF0000").unwrap(), "#FF0000");
        for bad in ["#12", "#ggg", "red5", ""] {
            assert!(validate_color(bad).is_err(), "{bad}");
        }

        let err = textcolor("#12345", mathord("x")).unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::InvalidColor { .. }));
        assert_eq!(err.command(), Some("\\textcolor"));
    }

    #[test]
    fn color_argument_must_be_raw() {
        let err = textcolor_with(mathord("r")).unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::UnexpectedArgumentType { expected: NodeType::Raw, index: 0, .. }
        ));
    }

    fn textcolor_with(color: ParseNode) -> Result<ParseNode, ParseError> {
        MathContext::default().construct(
            "\\textcolor",
            Mode::Math,
            vec![color, mathord("x")],
            vec![],
        )
    }

    #[test]
    fn every_child_is_colored() {
        let ctx = MathContext::default();
        let node = textcolor(
            "blue",
            group(vec![mathord("x"), atom(Atom::Bin, "+"), textord("1")]),
        )
        .unwrap();
        let built = build_group(&ctx, &node, &Options::default()).unwrap();
        let MathDomNode::Fragment(children) = built else {
            panic!("expected a fragment");
        };
        assert_eq!(children.len(), 3);
        for child in &children {
            assert_eq!(
                child.as_math_node().unwrap().style.get(CssProperty::Color),
                Some("blue")
            );
        }
    }

    #[test]
    fn fragments_join_the_surrounding_row() {
        let ctx = MathContext::default();
        let colored = textcolor("red", group(vec![mathord("a"), mathord("b")])).unwrap();
        let row = build_expression_row(&ctx, &[mathord("x"), colored], &Options::default(), false)
            .unwrap();
        assert_eq!(
            row.to_markup().unwrap(),
            "<mrow><mi>x</mi><mi style=\"color:red;\">a</mi><mi style=\"color:red;\">b</mi></mrow>"
        );
    }

    #[test]
    fn empty_body_keeps_a_placeholder() {
        let ctx = MathContext::default();
        let node = ctx
            .construct("\\color", Mode::Math, vec![raw("red"), group(vec![])], vec![])
            .unwrap();
        let built = build_group(&ctx, &node, &Options::default()).unwrap();
        assert_eq!(built.to_markup().unwrap(), "<mrow style=\"color:red;\"></mrow>");
    }
}
