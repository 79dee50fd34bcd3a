//! Extensible arrows with labels, single (`\xrightarrow`) and stacked
//! (`\xrightleftharpoons`)
//!
//! A labelled arrow is an `munderover` around a stretchy operator. Each label
//! is stacked over an invisible spacer so the arrow never shrinks below its
//! minimum width. Stacked arrows build one such row per arrow, raise the top
//! row and center the pair on the math axis.

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{
    NodeType, ParseNode, ParseNodeHphantom, ParseNodeStackedArrow, ParseNodeXArrow,
};
use crate::spacing::padding;
use crate::stretchy;
use crate::types::{CssProperty, ParseError, ParseErrorKind, Settings};
use crate::units::{em_scale, round4};

/// Single arrows, including the chemistry and commutative-diagram arrows.
const X_ARROWS: &[&str] = &[
    "\\xleftarrow",
    "\\xrightarrow",
    "\\xLeftarrow",
    "\\xRightarrow",
    "\\xleftrightarrow",
    "\\xLeftrightarrow",
    "\\xhookleftarrow",
    "\\xhookrightarrow",
    "\\xmapsto",
    "\\xrightharpoondown",
    "\\xrightharpoonup",
    "\\xleftharpoondown",
    "\\xleftharpoonup",
    "\\xlongequal",
    "\\xtwoheadrightarrow",
    "\\xtwoheadleftarrow",
    "\\xleftrightarrows",
    "\\xrightleftarrows",
    "\\xrightequilibrium",
    "\\xleftequilibrium",
    "\\cdrightarrow",
    "\\cdleftarrow",
    "\\cdlongequal",
    "\\yields",
    "\\yieldsLeft",
    "\\mesomerism",
    "\\longrightharpoonup",
    "\\longleftharpoondown",
    "\\longLeftrightharpoons",
    "\\longRightleftharpoons",
];

/// Stacked arrows and the single arrows making up their rows, top first.
const STACKED_ARROWS: &[(&str, &str, &str)] = &[
    ("\\xtofrom", "\\xrightarrow", "\\xleftarrow"),
    ("\\xleftrightharpoons", "\\xleftharpoonup", "\\xrightharpoondown"),
    ("\\xrightleftharpoons", "\\xrightharpoonup", "\\xleftharpoondown"),
    ("\\yieldsLeftRight", "\\yields", "\\yieldsLeft"),
    ("\\equilibrium", "\\longrightharpoonup", "\\longleftharpoondown"),
    ("\\equilibriumRight", "\\longrightharpoonup", "\\eqleftharpoondown"),
    ("\\equilibriumLeft", "\\eqrightharpoonup", "\\longleftharpoondown"),
];

/// Space around a plain labelled arrow, as around a relation.
const ARROW_SPACE: f64 = 0.2778;

/// Registers the labelled arrow commands.
pub fn define_arrow(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::XArrow),
        names: X_ARROWS,
        props: FunctionPropSpec {
            num_args: 1,
            num_optional_args: 1,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, mut opt_args| {
            let body = args.remove(0);
            let below = opt_args.pop().flatten();
            Ok(ParseNodeXArrow {
                mode: context.mode,
                label: context.func_name.to_owned(),
                body: Box::new(body),
                below: below.map(Box::new),
            }
            .into())
        }),
        mathml_builder: Some(xarrow_builder),
    });

    let stacked: Vec<&str> = STACKED_ARROWS.iter().map(|(name, _, _)| *name).collect();
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::StackedArrow),
        names: &stacked,
        props: FunctionPropSpec {
            num_args: 1,
            num_optional_args: 1,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, mut opt_args| {
            let body = args.remove(0);
            let below = opt_args.pop().flatten();
            let hphantom = |node: &ParseNode| -> ParseNode {
                ParseNodeHphantom {
                    mode: context.mode,
                    body: Box::new(node.clone()),
                }
                .into()
            };
            Ok(ParseNodeStackedArrow {
                mode: context.mode,
                label: context.func_name.to_owned(),
                upper_arrow_below: below.as_ref().map(hphantom),
                lower_arrow_body: hphantom(&body),
                body,
                below,
            }
            .into())
        }),
        mathml_builder: Some(stacked_builder),
    });
}

/// Whether a label has anything to show.
fn has_content(node: &ParseNode) -> bool {
    match node {
        ParseNode::OrdGroup(group) => !group.body.is_empty(),
        _ => true,
    }
}

/// Pads a built label on both sides.
fn padded_label(label: MathDomNode, space: f64, smash: bool) -> MathNode {
    let children = vec![padding(space).into(), label, padding(space).into()];
    if smash {
        let mut node = MathNode::with_children(MathNodeType::Mpadded, children);
        node.set_attribute("height", "0");
        node
    } else {
        MathNode::with_children(MathNodeType::Mrow, children)
    }
}

/// Builds one labelled arrow row.
///
/// `name` selects the stretchy operator and the minimum width. `body` goes
/// above the arrow and `below` under it; an absent or empty label still
/// reserves the minimum width.
pub fn munderover_node(
    ctx: &MathContext,
    name: &str,
    body: Option<&ParseNode>,
    below: Option<&ParseNode>,
    options: &Options,
    settings: &Settings,
) -> Result<MathNode, ParseError> {
    let mut arrow = stretchy::mathml_node(name, settings)?;
    let is_eq = name.get(1..3) == Some("eq");
    arrow.set_attribute("lspace", "0");
    arrow.set_attribute("rspace", if is_eq { "0.5em" } else { "0" });

    let is_cd = name.starts_with("\\cd");
    let min_width = if name.starts_with("\\x") {
        1.75
    } else if is_cd {
        3.0
    } else if is_eq {
        1.0
    } else {
        2.0
    };

    let label_level = if options.level < 2 { 2 } else { 3 };
    let label_options = options.with_level(label_level);
    let empty_label = || padding(round4(min_width / em_scale(label_level)));
    let dummy_node = || padding(round4(min_width / em_scale(3)));
    let space = round4(if is_eq { 0.0 } else { 0.3 } / em_scale(label_level));
    let smash = matches!(name, "\\cdrightarrow" | "\\cdleftarrow");

    let upper = match body.filter(|node| has_content(node)) {
        Some(node) => {
            let label = build_group(ctx, node, &label_options)?;
            let label = padded_label(label, space, smash);
            Some(MathNode::with_children(
                MathNodeType::Mover,
                vec![label.into(), dummy_node().into()],
            ))
        }
        None => None,
    };
    let lower = match below.filter(|node| has_content(node)) {
        Some(node) => {
            let label = build_group(ctx, node, &label_options)?;
            let label = padded_label(label, space, false);
            Some(MathNode::with_children(
                MathNodeType::Munder,
                vec![label.into(), dummy_node().into()],
            ))
        }
        None => None,
    };

    let mut node = match (upper, lower) {
        (Some(upper), Some(lower)) => MathNode::with_children(
            MathNodeType::Munderover,
            vec![arrow.into(), lower.into(), upper.into()],
        ),
        (Some(upper), None) => {
            MathNode::with_children(MathNodeType::Mover, vec![arrow.into(), upper.into()])
        }
        (None, Some(lower)) => {
            MathNode::with_children(MathNodeType::Munder, vec![arrow.into(), lower.into()])
        }
        (None, None) => MathNode::with_children(
            MathNodeType::Mover,
            vec![arrow.into(), empty_label().into()],
        ),
    };
    if is_cd {
        node.style.insert(CssProperty::Height, "1em");
    }
    node.set_attribute("accent", "false");
    Ok(node)
}

fn xarrow_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::XArrow(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::XArrow,
        }));
    };
    let arrow = munderover_node(
        ctx,
        &group.label,
        Some(&group.body),
        group.below.as_deref(),
        options,
        ctx.settings(),
    )?;
    Ok(MathNode::with_children(
        MathNodeType::Mrow,
        vec![
            padding(ARROW_SPACE).into(),
            arrow.into(),
            padding(ARROW_SPACE).into(),
        ],
    )
    .into())
}

fn stacked_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::StackedArrow(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::StackedArrow,
        }));
    };
    let Some((_, top_label, bottom_label)) = STACKED_ARROWS
        .iter()
        .find(|(name, _, _)| *name == group.label)
    else {
        return Err(ParseError::with_command(
            ParseErrorKind::UnknownStretchyElement {
                label: group.label.clone(),
            },
            group.label.clone(),
        ));
    };

    let settings = ctx.settings();
    let top = munderover_node(
        ctx,
        top_label,
        Some(&group.body),
        group.upper_arrow_below.as_ref(),
        options,
        settings,
    )?;
    let bottom = munderover_node(
        ctx,
        bottom_label,
        Some(&group.lower_arrow_body),
        group.below.as_ref(),
        options,
        settings,
    )?;

    let mut raised = MathNode::with_children(MathNodeType::Mpadded, vec![top.into()]);
    raised.set_attribute("voffset", "0.3em");
    raised.set_attribute("height", "+0.3em");
    raised.set_attribute("depth", "-0.3em");

    let children: Vec<MathDomNode> = if group.label == "\\equilibriumLeft" {
        let mut bottom_node = MathNode::with_children(MathNodeType::Mpadded, vec![bottom.into()]);
        bottom_node.set_attribute("width", "0.5em");
        vec![
            padding(ARROW_SPACE).into(),
            bottom_node.into(),
            raised.into(),
            padding(ARROW_SPACE).into(),
        ]
    } else {
        let width = if group.label == "\\equilibriumRight" {
            "0.5em"
        } else {
            "0"
        };
        raised.set_attribute("width", width);
        vec![
            padding(ARROW_SPACE).into(),
            raised.into(),
            bottom.into(),
            padding(ARROW_SPACE).into(),
        ]
    };

    let mut wrapper = MathNode::with_children(MathNodeType::Mpadded, children);
    wrapper.set_attribute("voffset", "-0.18em");
    wrapper.set_attribute("height", "-0.18em");
    wrapper.set_attribute("depth", "+0.18em");
    Ok(wrapper.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::test_util::{group, mathord};
    use crate::tree::VirtualNode as _;
    use crate::types::Mode;

    fn construct(name: &str, body: ParseNode, below: Option<ParseNode>) -> ParseNode {
        MathContext::default()
            .construct(name, Mode::Math, vec![body], vec![below])
            .unwrap()
    }

    fn build(node: &ParseNode) -> MathNode {
        match build_group(&MathContext::default(), node, &Options::default()).unwrap() {
            MathDomNode::Math(node) => node,
            other => panic!("expected an element, got {other:?}"),
        }
    }

    fn arrow_of(wrapper: &MathNode) -> &MathNode {
        wrapper.children[1].as_math_node().unwrap()
    }

    #[test]
    fn empty_arrow_reserves_min_width() {
        let node = construct("\\xrightarrow", group(vec![]), None);
        let row = build(&node);
        assert_eq!(row.node_type, MathNodeType::Mrow);
        assert_eq!(
            row.children[0].as_math_node().unwrap().get_attribute("width"),
            Some("0.2778em")
        );
        let arrow = arrow_of(&row);
        assert_eq!(
            arrow.to_markup().unwrap(),
            "<mover accent=\"false\"><mo stretchy=\"true\" lspace=\"0\" rspace=\"0\">\u{2192}</mo>\
             <mspace width=\"2.5em\"></mspace></mover>"
        );
    }

    #[test]
    fn labels_pick_the_stacking_element() {
        let over = build(&construct("\\xrightarrow", mathord("f"), None));
        assert_eq!(arrow_of(&over).node_type, MathNodeType::Mover);

        let both = build(&construct("\\xleftarrow", mathord("f"), Some(mathord("g"))));
        let both = arrow_of(&both);
        assert_eq!(both.node_type, MathNodeType::Munderover);
        assert!(both.children[1].is(MathNodeType::Munder));
        assert!(both.children[2].is(MathNodeType::Mover));

        let under = build(&construct("\\xleftarrow", group(vec![]), Some(mathord("g"))));
        assert_eq!(arrow_of(&under).node_type, MathNodeType::Munder);
    }

    #[test]
    fn labels_are_built_at_script_level() {
        let node = build(&construct("\\xrightarrow", mathord("f"), None));
        let upper = arrow_of(&node).children[1].as_math_node().unwrap();
        let label = upper.children[0].as_math_node().unwrap();
        assert_eq!(
            label.to_markup().unwrap(),
            "<mrow><mspace width=\"0.4286em\"></mspace><mi>f</mi><mspace width=\"0.4286em\"></mspace></mrow>"
        );
    }

    #[test]
    fn cd_arrows_are_tall_and_smashed() {
        let ctx = MathContext::default();
        let node = munderover_node(
            &ctx,
            "\\cdrightarrow",
            Some(&mathord("f")),
            None,
            &Options::default(),
            ctx.settings(),
        )
        .unwrap();
        assert_eq!(node.style.get(CssProperty::Height), Some("1em"));
        let upper = node.children[1].as_math_node().unwrap();
        let label = upper.children[0].as_math_node().unwrap();
        assert_eq!(label.node_type, MathNodeType::Mpadded);
        assert_eq!(label.get_attribute("height"), Some("0"));
    }

    #[test]
    fn stacked_arrows_raise_the_top_row() {
        let node = build(&construct("\\xrightleftharpoons", mathord("a"), Some(mathord("b"))));
        assert_eq!(node.node_type, MathNodeType::Mpadded);
        assert_eq!(node.get_attribute("voffset"), Some("-0.18em"));
        assert_eq!(node.get_attribute("depth"), Some("+0.18em"));
        let raised = node.children[1].as_math_node().unwrap();
        assert_eq!(raised.get_attribute("voffset"), Some("0.3em"));
        assert_eq!(raised.get_attribute("width"), Some("0"));
        assert!(node.children[2].is(MathNodeType::Munderover));
    }

    #[test]
    fn equilibrium_variants_shift_one_row() {
        let right = build(&construct("\\equilibriumRight", mathord("a"), None));
        let raised = right.children[1].as_math_node().unwrap();
        assert_eq!(raised.get_attribute("width"), Some("0.5em"));

        let left = build(&construct("\\equilibriumLeft", mathord("a"), None));
        let bottom = left.children[1].as_math_node().unwrap();
        assert_eq!(bottom.get_attribute("width"), Some("0.5em"));
        let raised = left.children[2].as_math_node().unwrap();
        assert_eq!(raised.get_attribute("voffset"), Some("0.3em"));
    }

    #[test]
    fn vector_arrows_embed_a_drawing() {
        let node = build(&construct("\\xrightequilibrium", mathord("a"), None));
        let arrow = arrow_of(&node);
        let operator = arrow.children[0].as_math_node().unwrap();
        assert_eq!(operator.node_type, MathNodeType::Mtext);
    }
}
