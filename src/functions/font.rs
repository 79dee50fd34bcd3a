//! Math font changes: `\mathbf`, `\mathbb`, `\boldsymbol` and the legacy
//! switches that alias them

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{
    FunctionContext, FunctionDefSpec, FunctionPropSpec, normalize_argument,
};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType, TextNode};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeFont};
use crate::types::{CssProperty, ParseError, ParseErrorKind};

const FONT_NAMES: &[&str] = &[
    // styles
    "\\mathrm",
    "\\mathit",
    "\\mathbf",
    "\\mathnormal",
    "\\mathsfit",
    "\\mathup",
    "\\boldsymbol",
    // families
    "\\mathbb",
    "\\mathcal",
    "\\mathfrak",
    "\\mathscr",
    "\\mathsf",
    "\\mathtt",
];

/// Legacy and package spellings of the font commands.
const FONT_ALIASES: &[(&str, &str)] = &[
    ("\\rm", "\\mathrm"),
    ("\\bf", "\\mathbf"),
    ("\\it", "\\mathit"),
    ("\\sf", "\\mathsf"),
    ("\\tt", "\\mathtt"),
    ("\\cal", "\\mathcal"),
    ("\\Bbb", "\\mathbb"),
    ("\\bold", "\\mathbf"),
    ("\\frak", "\\mathfrak"),
    ("\\bm", "\\boldsymbol"),
];

/// Registers the font commands and their aliases.
pub fn define_font(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Font),
        names: FONT_NAMES,
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_argument: true,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            let font = context
                .func_name
                .strip_prefix('\\')
                .unwrap_or(context.func_name);
            Ok(ParseNodeFont {
                mode: context.mode,
                font: font.to_owned(),
                body: Box::new(normalize_argument(args.remove(0))),
            }
            .into())
        }),
        mathml_builder: Some(mathml_builder),
    });

    for (alias, canonical) in FONT_ALIASES {
        ctx.define_alias(alias, canonical);
    }
}

/// Text and variant of a one-character `<mi>`.
fn single_char_mi(node: &MathDomNode) -> Option<(&str, Option<&str>)> {
    let mi = node.as_math_node()?;
    if mi.node_type != MathNodeType::Mi {
        return None;
    }
    let text = mi.single_text()?;
    (text.chars().count() == 1).then(|| (text, mi.get_attribute("mathvariant")))
}

/// Merges a row of one-character identifiers sharing an explicit variant
/// into a single `<mi>`.
fn consolidate(row: &MathNode) -> Option<MathNode> {
    if row.node_type != MathNodeType::Mrow || row.children.len() < 2 {
        return None;
    }
    let mut text = String::new();
    let mut shared: Option<&str> = None;
    for child in &row.children {
        let (chr, variant) = single_char_mi(child)?;
        let variant = variant?;
        if shared.is_some_and(|v| v != variant) {
            return None;
        }
        shared = Some(variant);
        text.push_str(chr);
    }
    let mut mi = MathNode::with_children(MathNodeType::Mi, vec![TextNode::new(text).into()]);
    mi.set_attribute("mathvariant", shared?);
    Some(mi)
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Font(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Font,
        }));
    };

    let mut built = build_group(ctx, &group.body, &options.with_font(group.font.as_str()))?;
    let Some(math) = built.as_math_node_mut() else {
        return Ok(built);
    };
    if math.children.is_empty() {
        return Ok(built);
    }

    if group.font == "boldsymbol"
        && matches!(
            math.node_type,
            MathNodeType::Mo | MathNodeType::Mrow | MathNodeType::Mpadded
        )
    {
        math.style.insert(CssProperty::FontWeight, "bold");
    }
    if let Some(mi) = consolidate(math) {
        return Ok(mi.into());
    }
    Ok(built)
}
