//! Accents over a base
//!
//! Math accents (`\hat`, `\vec`...) are fixed glyphs placed with `<mover>`.
//! Wide accents (`\widehat`, `\overrightarrow`...) stretch over their base.
//! Text accents (`\'`, `\^`...) collapse into a combining mark on a single
//! letter in text mode, and are otherwise built like math accents.

use phf::{Map, Set, phf_map, phf_set};

use crate::MathContext;
use crate::build_mathml::build_group;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, normalize_argument};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeAccent, ParseNodeTextOrd};
use crate::stretchy;
use crate::symbols::resolve_text;
use crate::types::{ArgType, CssProperty, Mode, ParseError, ParseErrorKind};

/// Math mode accent commands
const MATH_ACCENTS: &[&str] = &[
    "\\acute",
    "\\grave",
    "\\ddot",
    "\\dddot",
    "\\ddddot",
    "\\tilde",
    "\\bar",
    "\\breve",
    "\\check",
    "\\hat",
    "\\vec",
    "\\dot",
    "\\mathring",
    "\\widecheck",
    "\\widehat",
    "\\widetilde",
    "\\wideparen",
    "\\overrightarrow",
    "\\overleftarrow",
    "\\Overrightarrow",
    "\\overleftrightarrow",
    "\\overgroup",
    "\\overparen",
    "\\overlinesegment",
    "\\overleftharpoon",
    "\\overrightharpoon",
];

/// Text mode accent commands
const TEXT_ACCENTS: &[&str] = &[
    "\\'", "\\`", "\\^", "\\~", "\\=", "\\u", "\\.", "\\\"", "\\c", "\\r", "\\H", "\\v",
    "\\textcircled",
];

/// Math accents drawn with a fixed-width glyph.
static NON_STRETCHY_ACCENTS: Set<&'static str> = phf_set! {
    "\\acute", "\\grave", "\\ddot", "\\dddot", "\\ddddot", "\\tilde", "\\bar",
    "\\breve", "\\check", "\\hat", "\\vec", "\\dot", "\\mathring",
};

/// Glyph for each fixed-width accent.
static ACCENT_GLYPHS: Map<&'static str, &'static str> = phf_map! {
    "\\acute" => "\u{b4}",
    "\\grave" => "`",
    "\\ddot" => "\u{a8}",
    "\\dddot" => "\u{20db}",
    "\\ddddot" => "\u{20dc}",
    "\\tilde" => "~",
    "\\bar" => "\u{203e}",
    "\\breve" => "\u{2d8}",
    "\\check" => "\u{2c7}",
    "\\hat" => "^",
    "\\vec" => "\u{20d7}",
    "\\dot" => "\u{2d9}",
    "\\mathring" => "\u{2da}",
    "\\'" => "\u{b4}",
    "\\`" => "`",
    "\\^" => "^",
    "\\~" => "~",
    "\\=" => "\u{af}",
    "\\u" => "\u{2d8}",
    "\\." => "\u{2d9}",
    "\\\"" => "\u{a8}",
    "\\c" => "\u{b8}",
    "\\r" => "\u{2da}",
    "\\H" => "\u{2dd}",
    "\\v" => "\u{2c7}",
    "\\textcircled" => "\u{25ef}",
};

/// Combining marks for text accents over a single small letter.
static COMBINING_MARKS: Map<&'static str, &'static str> = phf_map! {
    "\\`" => "\u{300}",
    "\\'" => "\u{301}",
    "\\^" => "\u{302}",
    "\\~" => "\u{303}",
    "\\=" => "\u{304}",
    "\\u" => "\u{306}",
    "\\." => "\u{307}",
    "\\\"" => "\u{308}",
    "\\r" => "\u{30a}",
    "\\H" => "\u{30b}",
    "\\v" => "\u{30c}",
    "\\c" => "\u{327}",
};

/// Letters a combining mark sits on without colliding.
const SMALL_LETTERS: &str = "acegmnopqrsuvwxyz\u{131}\u{237}";

/// Registers the accent commands.
pub fn define_accent(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Accent),
        names: MATH_ACCENTS,
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, mut args, _opt_args| {
            let base = normalize_argument(args.remove(0));
            let is_stretchy = !NON_STRETCHY_ACCENTS.contains(context.func_name);
            let is_shifty = !is_stretchy
                || matches!(context.func_name, "\\widehat" | "\\widetilde" | "\\widecheck");
            Ok(ParseNodeAccent {
                mode: context.mode,
                label: context.func_name.to_owned(),
                is_stretchy,
                is_shifty,
                base,
            }
            .into())
        }),
        mathml_builder: Some(mathml_builder),
    });

    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Accent),
        names: TEXT_ACCENTS,
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_text: true,
            allowed_in_math: true,
            arg_types: Some(vec![ArgType::Primitive]),
            ..Default::default()
        },
        handler: Some(text_accent_handler),
        mathml_builder: Some(mathml_builder),
    });
}

fn text_accent_handler(
    context: FunctionContext,
    mut args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let base = normalize_argument(args.remove(0));
    let func_name = context.func_name;

    if context.mode == Mode::Math {
        context.settings.report_nonstrict(
            "mathVsTextAccents",
            &format!("LaTeX's accent {func_name} works only in text mode"),
        )?;
    } else if let Some(mark) = COMBINING_MARKS.get(func_name)
        && let Some(letter) = single_char(&base)
        && (func_name == "\\c" || SMALL_LETTERS.contains(letter))
    {
        return Ok(ParseNodeTextOrd {
            mode: Mode::Text,
            text: format!("{letter}{mark}"),
        }
        .into());
    }

    Ok(ParseNodeAccent {
        mode: context.mode,
        label: func_name.to_owned(),
        is_stretchy: false,
        is_shifty: true,
        base,
    }
    .into())
}

/// The character of a one-character symbol node.
fn single_char(node: &ParseNode) -> Option<char> {
    let mut chars = node.text()?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Accent(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Accent,
        }));
    };
    let label = group.label.as_str();
    let settings = ctx.settings();

    let mut accent = if group.is_stretchy {
        stretchy::mathml_node(label, settings)?
    } else {
        let Some(glyph) = ACCENT_GLYPHS.get(label) else {
            return Err(ParseError::with_command(
                ParseErrorKind::UnknownAccent {
                    label: label.to_owned(),
                },
                label,
            ));
        };
        let mut mo = MathNode::with_text(MathNodeType::Mo, *glyph);
        mo.set_attribute("stretchy", "false");
        mo
    };
    if label != "\\vec" {
        accent.style.insert(CssProperty::MathDepth, "0");
    }

    let base = build_group(ctx, &group.base, options)?;
    let node_type = if label == "\\c" {
        MathNodeType::Munder
    } else {
        MathNodeType::Mover
    };
    let mut node = MathNode::with_children(node_type, vec![base, accent.into()]);

    if !group.is_stretchy && group.base.is_character_box() {
        let base_elem = group.base.to_base_elem();
        if let Some(text) = base_elem.text() {
            let text = resolve_text(base_elem.mode(), text);
            for class in settings.font_profile.accent_classes(label, text) {
                node.add_class(class);
            }
        }
    }
    Ok(node.into())
}
