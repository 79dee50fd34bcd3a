//! Builder for explicit spaces and line-break hints

use phf::{Set, phf_set};

use crate::MathContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode};
use crate::types::{ParseError, ParseErrorKind};

/// Commands producing an ordinary inter-word space.
static REGULAR_SPACE: Set<&'static str> = phf_set! {
    " ", "\\ ", "~", "\\space", "\\nobreakspace",
};

/// Registers the `spacing` builder.
pub fn define_symbols_spacing(ctx: &mut MathContext) {
    ctx.define_function_builder(NodeType::Spacing, mathml_builder);
}

fn mathml_builder(
    node: &ParseNode,
    _options: &Options,
    _ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Spacing(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Spacing,
        }));
    };

    let text = group.text.as_str();
    if REGULAR_SPACE.contains(text) {
        // A plain space collapses inside <mtext>
        return Ok(MathNode::with_text(MathNodeType::Mtext, "\u{a0}").into());
    }
    let linebreak = match text {
        "\\nobreak" => "nobreak",
        "\\allowbreak" => "goodbreak",
        _ => {
            return Err(ParseError::new(ParseErrorKind::UnknownSpaceType {
                name: group.text.clone(),
            }));
        }
    };
    let mut mo = MathNode::with_children(MathNodeType::Mo, Vec::new());
    mo.set_attribute("linebreak", linebreak);
    Ok(mo.into())
}
