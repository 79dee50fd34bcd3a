//! Builders for ordinary symbols: `mathord` and `textord` nodes

use phf::{Set, phf_set};

use crate::MathContext;
use crate::build_mathml::{get_variant, make_text};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode};
use crate::types::{Mode, ParseError, ParseErrorKind};

/// Prime marks, which render as operators so they hug their base.
static PRIMES: Set<&'static str> = phf_set! {
    "\\prime", "\\dprime", "\\trprime", "\\qprime",
    "\u{2032}", "\u{2033}", "\u{2034}", "\u{2057}",
};

/// Registers the `mathord` and `textord` builders.
pub fn define_symbols_ord(ctx: &mut MathContext) {
    ctx.define_function_builder(NodeType::MathOrd, mathord_builder);
    ctx.define_function_builder(NodeType::TextOrd, textord_builder);
}

/// `\d`, or `\d[\d,.]*\d`.
fn is_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes {
        [] => false,
        [only] => only.is_ascii_digit(),
        [first, inner @ .., last] => {
            first.is_ascii_digit()
                && last.is_ascii_digit()
                && inner
                    .iter()
                    .all(|b| b.is_ascii_digit() || matches!(b, b',' | b'.'))
        }
    }
}

fn mathord_builder(
    node: &ParseNode,
    options: &Options,
    _ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::MathOrd(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::MathOrd,
        }));
    };

    let text = make_text(&group.text, group.mode);
    // Upper case Greek is upright by default
    let upper_greek = text
        .text
        .chars()
        .next()
        .is_some_and(|c| ('\u{391}'..='\u{3a9}').contains(&c));
    let default_variant = if upper_greek { "normal" } else { "italic" };
    let variant = get_variant(node, options).unwrap_or(default_variant);

    let mut mi = MathNode::with_children(MathNodeType::Mi, vec![text.into()]);
    if variant != "italic" {
        mi.set_attribute("mathvariant", variant);
    }
    Ok(mi.into())
}

fn textord_builder(
    node: &ParseNode,
    options: &Options,
    _ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::TextOrd(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::TextOrd,
        }));
    };

    let text = make_text(&group.text, group.mode);
    let variant = get_variant(node, options).unwrap_or("normal");
    let with_variant = |mut node: MathNode| {
        if variant != "normal" {
            node.set_attribute("mathvariant", variant);
        }
        node
    };

    let built = if group.mode == Mode::Text {
        with_variant(MathNode::with_children(MathNodeType::Mtext, vec![text.into()]))
    } else if is_number(&group.text) {
        with_variant(MathNode::with_children(MathNodeType::Mn, vec![text.into()]))
    } else if PRIMES.contains(group.text.as_str()) {
        let mut mo = MathNode::with_children(MathNodeType::Mo, vec![text.into()]);
        mo.add_class("tml-prime");
        mo
    } else {
        // A lone Latin letter would default to italic
        let latin = {
            let mut chars = text.text.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.next().is_none()
        };
        let mut mi = MathNode::with_children(MathNodeType::Mi, vec![text.into()]);
        if variant != "normal" || latin {
            mi.set_attribute("mathvariant", variant);
        }
        mi
    };
    Ok(built.into())
}
