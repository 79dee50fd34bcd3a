//! Explicit style changes: `\displaystyle` through `\scriptscriptstyle`
//!
//! A style switch affects the rest of its group, which the front end passes
//! as the single argument.

use core::str::FromStr as _;

use crate::MathContext;
use crate::build_mathml::build_expression;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::{MathDomNode, wrap_with_mstyle};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeStyling};
use crate::types::{ParseError, ParseErrorKind, StyleLevel};

/// Registers the style switches.
pub fn define_styling(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Styling),
        names: &[
            "\\displaystyle",
            "\\textstyle",
            "\\scriptstyle",
            "\\scriptscriptstyle",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_text: true,
            primitive: true,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            let name = context
                .func_name
                .strip_prefix('\\')
                .and_then(|name| name.strip_suffix("style"))
                .unwrap_or_default();
            Ok(ParseNodeStyling {
                mode: context.mode,
                style: StyleLevel::from_str(name)?,
                body: ord_argument(args.remove(0)),
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
    let ParseNode::Styling(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Styling,
        }));
    };

    let options = options.with_level(group.style.level());
    let inner = build_expression(ctx, &group.body, &options, false)?;
    let mut node = wrap_with_mstyle(inner);
    let (scriptlevel, displaystyle) = group.style.mstyle_attributes();
    node.set_attribute("scriptlevel", scriptlevel);
    node.set_attribute("displaystyle", displaystyle);
    Ok(node.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_mathml::build_group;
    use crate::functions::test_util::{group, mathord, textord};
    use crate::parse_node::ParseNodeMclass;
    use crate::spacing::AtomClass;
    use crate::tree::VirtualNode as _;
    use crate::types::Mode;

    fn styled(name: &str, body: Vec<ParseNode>) -> ParseNode {
        MathContext::default()
            .construct(name, Mode::Math, vec![group(body)], vec![])
            .unwrap()
    }

    fn render(node: &ParseNode) -> String {
        build_group(&MathContext::default(), node, &Options::default())
            .unwrap()
            .to_markup()
            .unwrap()
    }

    #[test]
    fn style_names_resolve() {
        let ParseNode::Styling(node) = styled("\\scriptscriptstyle", vec![mathord("x")]) else {
            panic!("expected a styling node");
        };
        assert_eq!(node.style, StyleLevel::ScriptScript);
    }

    #[test]
    fn mstyle_carries_the_level() {
        assert_eq!(
            render(&styled("\\displaystyle", vec![mathord("x"), textord("2")])),
            "<mstyle scriptlevel=\"0\" displaystyle=\"true\"><mi>x</mi><mn>2</mn></mstyle>"
        );
        assert_eq!(
            render(&styled("\\scriptstyle", vec![mathord("x")])),
            "<mstyle scriptlevel=\"1\" displaystyle=\"false\"><mi>x</mi></mstyle>"
        );
    }

    #[test]
    fn lone_row_is_retagged() {
        let row = group(vec![mathord("a"), mathord("b")]);
        assert_eq!(
            render(&styled("\\textstyle", vec![row])),
            "<mstyle scriptlevel=\"0\" displaystyle=\"false\"><mi>a</mi><mi>b</mi></mstyle>"
        );
    }

    #[test]
    fn body_is_built_at_the_new_level() {
        let bin: ParseNode = ParseNodeMclass {
            mode: Mode::Math,
            mclass: AtomClass::Mbin,
            body: vec![mathord("a"), mathord("b")],
            is_character_box: false,
            must_promote: false,
        }
        .into();
        let markup = render(&styled("\\scriptstyle", vec![mathord("x"), bin]));
        assert!(!markup.contains("mspace"));
    }
}
