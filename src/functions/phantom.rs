//! Invisible placeholders: `\phantom`, `\hphantom` and `\vphantom`
//!
//! All three hide their content with `<mphantom>`. The `h` and `v` forms wrap
//! it in an `<mpadded>` that zeroes the dimension they discard.

use crate::MathContext;
use crate::build_mathml::build_expression;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{
    NodeType, ParseNode, ParseNodeHphantom, ParseNodePhantom, ParseNodeVphantom,
};
use crate::types::{ParseError, ParseErrorKind};

/// Registers the phantom commands.
pub fn define_phantom(ctx: &mut MathContext) {
    let props = FunctionPropSpec {
        num_args: 1,
        allowed_in_text: true,
        ..Default::default()
    };

    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Phantom),
        names: &["\\phantom"],
        props: props.clone(),
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            Ok(ParseNodePhantom {
                mode: context.mode,
                body: ord_argument(args.remove(0)),
            }
            .into())
        }),
        mathml_builder: Some(phantom_builder),
    });

    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Hphantom),
        names: &["\\hphantom"],
        props: props.clone(),
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            Ok(ParseNodeHphantom {
                mode: context.mode,
                body: Box::new(args.remove(0)),
            }
            .into())
        }),
        mathml_builder: Some(hphantom_builder),
    });

    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Vphantom),
        names: &["\\vphantom"],
        props,
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            Ok(ParseNodeVphantom {
                mode: context.mode,
                body: Box::new(args.remove(0)),
            }
            .into())
        }),
        mathml_builder: Some(vphantom_builder),
    });
}

/// `<mphantom>` around the built body.
fn mphantom(
    ctx: &MathContext,
    body: &[ParseNode],
    options: &Options,
) -> Result<MathNode, ParseError> {
    let inner = build_expression(ctx, body, options, false)?;
    Ok(MathNode::with_children(MathNodeType::Mphantom, inner))
}

/// The items of an argument without taking it apart.
fn ord_slice(node: &ParseNode) -> &[ParseNode] {
    match node {
        ParseNode::OrdGroup(group) => &group.body,
        other => core::slice::from_ref(other),
    }
}

fn phantom_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Phantom(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Phantom,
        }));
    };
    Ok(mphantom(ctx, &group.body, options)?.into())
}

fn hphantom_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Hphantom(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Hphantom,
        }));
    };
    let phantom = mphantom(ctx, ord_slice(&group.body), options)?;
    let mut node = MathNode::with_children(MathNodeType::Mpadded, vec![phantom.into()]);
    node.set_attribute("height", "0px");
    node.set_attribute("depth", "0px");
    Ok(node.into())
}

fn vphantom_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Vphantom(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Vphantom,
        }));
    };
    let phantom = mphantom(ctx, ord_slice(&group.body), options)?;
    let mut node = MathNode::with_children(MathNodeType::Mpadded, vec![phantom.into()]);
    node.set_attribute("width", "0px");
    Ok(node.into())
}
