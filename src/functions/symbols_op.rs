//! Builder for `atom` nodes: operators, relations, delimiters and punctuation

use crate::MathContext;
use crate::build_mathml::make_text;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode};
use crate::symbols::Atom;
use crate::types::{ParseError, ParseErrorKind};

/// Registers the `atom` builder.
pub fn define_symbols_op(ctx: &mut MathContext) {
    ctx.define_function_builder(NodeType::Atom, mathml_builder);
}

/// Arrows in the Arrows and Supplemental Arrows-A blocks.
fn is_arrow(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('\u{2190}'..='\u{21ff}' | '\u{27f0}'..='\u{27ff}'), None)
    )
}

fn mathml_builder(
    node: &ParseNode,
    _options: &Options,
    _ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Atom(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Atom,
        }));
    };

    let text = make_text(&group.text, group.mode);
    let is_arrow = is_arrow(&text.text);
    let mut mo = MathNode::with_children(MathNodeType::Mo, vec![text.into()]);
    match group.family {
        Atom::Punct => mo.set_attribute("separator", "true"),
        // Delimiters built here never stretch vertically
        Atom::Open => {
            mo.set_attribute("form", "prefix");
            mo.set_attribute("stretchy", "false");
        }
        Atom::Close => {
            mo.set_attribute("form", "postfix");
            mo.set_attribute("stretchy", "false");
        }
        Atom::Rel if group.text == "\\mid" => {
            mo.set_attribute("lspace", "0.22em");
            mo.set_attribute("rspace", "0.22em");
            mo.set_attribute("stretchy", "false");
        }
        Atom::Rel if is_arrow => mo.set_attribute("stretchy", "false"),
        _ => {}
    }
    Ok(mo.into())
}
