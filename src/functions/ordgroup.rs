//! Braced groups

use crate::MathContext;
use crate::build_mathml::build_expression_row;
use crate::mathml_tree::MathDomNode;
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode};
use crate::types::{ParseError, ParseErrorKind};

/// Registers the `ordgroup` builder.
pub fn define_ordgroup(ctx: &mut MathContext) {
    ctx.define_function_builder(NodeType::OrdGroup, mathml_builder);
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::OrdGroup(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::OrdGroup,
        }));
    };
    build_expression_row(ctx, &group.body, options, group.semisimple)
}

#[cfg(test)]
mod tests {
    use crate::MathContext;
    use crate::build_mathml::build_group;
    use crate::functions::test_util::{atom, group, mathord};
    use crate::options::Options;
    use crate::parse_node::{ParseNode, ParseNodeOrdGroup};
    use crate::symbols::Atom;
    use crate::tree::VirtualNode as _;
    use crate::types::Mode;

    #[test]
    fn braces_zero_edge_operators() {
        let ctx = MathContext::default();
        let body = vec![atom(Atom::Bin, "-"), mathord("x")];
        let braced = build_group(&ctx, &group(body.clone()), &Options::default()).unwrap();
        assert_eq!(
            braced.to_markup().unwrap(),
            "<mrow><mo lspace=\"0em\" rspace=\"0em\">\u{2212}</mo><mi>x</mi></mrow>"
        );

        let scoped: ParseNode = ParseNodeOrdGroup {
            mode: Mode::Math,
            body,
            semisimple: true,
        }
        .into();
        let scoped = build_group(&ctx, &scoped, &Options::default()).unwrap();
        assert_eq!(
            scoped.to_markup().unwrap(),
            "<mrow><mo>\u{2212}</mo><mi>x</mi></mrow>"
        );
    }

    #[test]
    fn single_child_is_not_wrapped() {
        let ctx = MathContext::default();
        let built = build_group(&ctx, &group(vec![mathord("y")]), &Options::default()).unwrap();
        assert_eq!(built.to_markup().unwrap(), "<mi>y</mi>");
    }
}
