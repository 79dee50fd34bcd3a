//! Superscripts and subscripts
//!
//! The front end attaches scripts to their base as a `supsub` node. Scripts
//! are built one script level down. A horizontal brace carrying a script on
//! its own side stacks the script over (or under) the brace instead.

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode};
use crate::types::{ParseError, ParseErrorKind};

/// Registers the `supsub` builder.
pub fn define_supsub(ctx: &mut MathContext) {
    ctx.define_function_builder(NodeType::SupSub, mathml_builder);
}

/// Builds one script and pins deep scripts at `scriptlevel="2"`.
fn build_script(
    ctx: &MathContext,
    script: &ParseNode,
    options: &Options,
) -> Result<MathDomNode, ParseError> {
    let mut built = build_group(ctx, script, &options.in_sub_or_sup())?;
    if options.level == 3
        && let Some(node) = built.as_math_node_mut()
    {
        node.set_attribute("scriptlevel", "2");
    }
    Ok(built)
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::SupSub(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::SupSub,
        }));
    };

    // Over-brace with a superscript, or under-brace with a subscript
    let brace_side = match group.base.as_deref() {
        Some(ParseNode::HorizBrace(brace))
            if (brace.is_over && group.sup.is_some()) || (!brace.is_over && group.sub.is_some()) =>
        {
            Some(brace.is_over)
        }
        _ => None,
    };

    let base = match &group.base {
        Some(base) => build_group(ctx, base, options)?,
        None => MathNode::with_children(MathNodeType::Mrow, Vec::new()).into(),
    };
    let sub = group
        .sub
        .as_deref()
        .map(|sub| build_script(ctx, sub, options))
        .transpose()?;
    let sup = match group.sup.as_deref() {
        Some(sup) => {
            let mut sup = build_script(ctx, sup, options)?;
            let base_text = group.base.as_deref().and_then(ParseNode::text);
            if matches!(base_text, Some("f" | "F"))
                && let Some(prime) = prime_node(&mut sup)
            {
                // Keeps the prime clear of the italic overhang
                prime.add_class("prime-pad");
            }
            Some(sup)
        }
        None => None,
    };

    let node = match (brace_side, sub, sup) {
        // The script on the brace's side stacks, the other one attaches to the stack
        (Some(true), sub, Some(sup)) => {
            let stacked = MathNode::with_children(MathNodeType::Mover, vec![base, sup]);
            match sub {
                Some(sub) => MathNode::with_children(MathNodeType::Msub, vec![stacked.into(), sub]),
                None => stacked,
            }
        }
        (Some(false), Some(sub), sup) => {
            let stacked = MathNode::with_children(MathNodeType::Munder, vec![base, sub]);
            match sup {
                Some(sup) => MathNode::with_children(MathNodeType::Msup, vec![stacked.into(), sup]),
                None => stacked,
            }
        }
        (_, None, Some(sup)) => MathNode::with_children(MathNodeType::Msup, vec![base, sup]),
        (_, Some(sub), None) => MathNode::with_children(MathNodeType::Msub, vec![base, sub]),
        (_, Some(sub), Some(sup)) => {
            MathNode::with_children(MathNodeType::Msubsup, vec![base, sub, sup])
        }
        (_, None, None) => MathNode::with_children(MathNodeType::Mrow, vec![base]),
    };
    Ok(node.into())
}

/// The prime operator of a superscript, looking into a leading row.
fn prime_node(sup: &mut MathDomNode) -> Option<&mut MathNode> {
    let node = sup.as_math_node_mut()?;
    let target = if node.node_type == MathNodeType::Mrow {
        node.children.first_mut()?.as_math_node_mut()?
    } else {
        node
    };
    (target.node_type == MathNodeType::Mo && target.has_class("tml-prime")).then_some(target)
}
