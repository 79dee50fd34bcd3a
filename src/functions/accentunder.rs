//! Stretchy accents under a base

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeAccentUnder};
use crate::stretchy;
use crate::types::{CssProperty, ParseError, ParseErrorKind};

/// Registers the under-accent commands.
pub fn define_accentunder(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::AccentUnder),
        names: &[
            "\\underleftarrow",
            "\\underrightarrow",
            "\\underleftrightarrow",
            "\\undergroup",
            "\\underparen",
            "\\utilde",
            "\\underlinesegment",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            Ok(ParseNodeAccentUnder {
                mode: context.mode,
                label: context.func_name.to_owned(),
                is_stretchy: true,
                is_shifty: false,
                base: args.remove(0),
            }
            .into())
        }),
        mathml_builder: Some(mathml_builder),
    });
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::AccentUnder(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::AccentUnder,
        }));
    };

    let mut accent = stretchy::mathml_node(&group.label, ctx.settings())?;
    accent.style.insert(CssProperty::MathDepth, "0");
    let base = build_group(ctx, &group.base, options)?;
    Ok(MathNode::with_children(MathNodeType::Munder, vec![base, accent.into()]).into())
}
