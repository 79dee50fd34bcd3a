//! Horizontal braces and brackets over or under an expression

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeHorizBrace};
use crate::stretchy;
use crate::types::{CssProperty, ParseError, ParseErrorKind};

/// Registers `\overbrace` and its relatives.
pub fn define_horiz_brace(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::HorizBrace),
        names: &["\\overbrace", "\\underbrace", "\\overbracket", "\\underbracket"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            Ok(ParseNodeHorizBrace {
                mode: context.mode,
                label: context.func_name.to_owned(),
                is_over: context.func_name.starts_with("\\over"),
                base: Box::new(args.remove(0)),
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
    let ParseNode::HorizBrace(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::HorizBrace,
        }));
    };

    let mut brace = stretchy::mathml_node(&group.label, ctx.settings())?;
    brace.style.insert(CssProperty::MathDepth, "0");
    let node_type = if group.is_over {
        MathNodeType::Mover
    } else {
        MathNodeType::Munder
    };
    let base = build_group(ctx, &group.base, options)?;
    Ok(MathNode::with_children(node_type, vec![base, brace.into()]).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::test_util::{group, mathord};
    use crate::tree::VirtualNode as _;
    use crate::types::Mode;

    fn construct(name: &str) -> ParseNode {
        MathContext::default()
            .construct(name, Mode::Math, vec![group(vec![mathord("a"), mathord("b")])], vec![])
            .unwrap()
    }

    #[test]
    fn side_follows_the_name() {
        let ParseNode::HorizBrace(over) = construct("\\overbracket") else {
            panic!("expected a brace");
        };
        assert!(over.is_over);
        let ParseNode::HorizBrace(under) = construct("\\underbrace") else {
            panic!("expected a brace");
        };
        assert!(!under.is_over);
    }

    #[test]
    fn brace_markup() {
        let node = construct("\\underbrace");
        let markup = build_group(&MathContext::default(), &node, &Options::default())
            .unwrap()
            .to_markup()
            .unwrap();
        assert_eq!(
            markup,
            "<munder><mrow><mi>a</mi><mi>b</mi></mrow>\
             <mo stretchy=\"true\" style=\"math-depth:0;\">\u{23df}</mo></munder>"
        );
    }
}
