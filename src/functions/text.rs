//! Text inside math: `\text`, `\textbf`, `\emph` and friends

use phf::{Map, phf_map};

use crate::MathContext;
use crate::build_mathml::build_expression_row;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType, TextNode};
use crate::options::{FontShape, FontWeight, Options};
use crate::parse_node::{NodeType, ParseNode, ParseNodeText};
use crate::types::{ArgType, ParseError, ParseErrorKind};

/// Text font families, keyed by command without the backslash.
static TEXT_FONT_FAMILIES: Map<&'static str, &'static str> = phf_map! {
    "textrm" => "textrm",
    "textsf" => "textsf",
    "texttt" => "texttt",
    "textnormal" => "textrm",
};

static TEXT_FONT_WEIGHTS: Map<&'static str, FontWeight> = phf_map! {
    "textbf" => FontWeight::TextBf,
    "textmd" => FontWeight::TextMd,
};

static TEXT_FONT_SHAPES: Map<&'static str, FontShape> = phf_map! {
    "textit" => FontShape::TextIt,
    "textup" => FontShape::TextUp,
};

/// Registers the text commands.
pub fn define_text(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Text),
        names: &[
            // font families
            "\\text",
            "\\textrm",
            "\\textsf",
            "\\texttt",
            "\\textnormal",
            // font weights
            "\\textbf",
            "\\textmd",
            // font shapes
            "\\textit",
            "\\textup",
            "\\emph",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Original]),
            allowed_in_argument: true,
            allowed_in_text: true,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            let font = context
                .func_name
                .strip_prefix('\\')
                .unwrap_or(context.func_name);
            Ok(ParseNodeText {
                mode: context.mode,
                body: ord_argument(args.remove(0)),
                font: Some(font.to_owned()),
            }
            .into())
        }),
        mathml_builder: Some(mathml_builder),
    });
}

/// Options for the body of a text group.
fn options_with_font(group: &ParseNodeText, options: &Options) -> Options {
    let Some(font) = group.font.as_deref() else {
        return options.clone();
    };
    if let Some(family) = TEXT_FONT_FAMILIES.get(font) {
        return options.with_text_font_family(*family);
    }
    if let Some(weight) = TEXT_FONT_WEIGHTS.get(font) {
        return options.with_text_font_weight(*weight);
    }
    if font == "emph" {
        let shape = if options.font_shape == FontShape::TextIt {
            FontShape::TextUp
        } else {
            FontShape::TextIt
        };
        return options.with_text_font_shape(shape);
    }
    // Plain `\text` only drops the math font
    options.with_text_font_shape(TEXT_FONT_SHAPES.get(font).copied().unwrap_or_default())
}

/// Turns a row of same-variant `<mtext>` runs into one `<mtext>`.
fn consolidate(built: MathDomNode) -> MathDomNode {
    let MathDomNode::Math(row) = built else {
        return built;
    };
    if row.node_type != MathNodeType::Mrow || row.children.is_empty() {
        return MathDomNode::Math(row);
    }

    let mut variant = None;
    for (i, child) in row.children.iter().enumerate() {
        // Styled runs (a color change, say) keep their own element
        let Some(mtext) = child.as_math_node().filter(|n| {
            n.node_type == MathNodeType::Mtext && n.style.is_empty() && n.classes.is_empty()
        }) else {
            return MathDomNode::Math(row);
        };
        let local = mtext.get_attribute("mathvariant");
        if i > 0 && local != variant {
            return MathDomNode::Math(row);
        }
        variant = local;
    }

    let text: String = row.children.iter().map(MathDomNode::to_text).collect();
    let mut mtext = MathNode::with_children(MathNodeType::Mtext, vec![TextNode::new(text).into()]);
    if let Some(variant) = variant {
        mtext.set_attribute("mathvariant", variant);
    }
    MathDomNode::Math(mtext)
}

/// Edge spaces of an `<mtext>` are dropped by renderers unless they are
/// non-breaking.
fn protect_edge_spaces(node: &mut MathDomNode) {
    let Some(mtext) = node.as_math_node_mut() else {
        return;
    };
    if mtext.node_type != MathNodeType::Mtext
        || !mtext.children.iter().all(|c| matches!(c, MathDomNode::Text(_)))
    {
        return;
    }
    let text = mtext.to_text();
    let core = text.trim_matches(' ');
    if core.len() == text.len() {
        return;
    }
    let leading = text.len() - text.trim_start_matches(' ').len();
    let trailing = if core.is_empty() {
        0
    } else {
        text.len() - text.trim_end_matches(' ').len()
    };
    let protected = format!("{}{core}{}", "\u{a0}".repeat(leading), "\u{a0}".repeat(trailing));
    mtext.children = vec![TextNode::new(protected).into()];
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Text(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Text,
        }));
    };

    let options = options_with_font(group, options);
    let row = build_expression_row(ctx, &group.body, &options, false)?;
    let mut built = consolidate(row);
    protect_edge_spaces(&mut built);
    Ok(built)
}
