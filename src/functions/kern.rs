//! Explicit horizontal kerns: `\kern`, `\mkern`, `\hskip`, `\mskip`

use crate::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType, get_space_character};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeKern};
use crate::types::{ArgType, CssProperty, Mode, ParseError, ParseErrorKind};
use crate::units::calculate_size;

/// Registers the kern commands.
pub fn define_kern(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Kern),
        names: &["\\kern", "\\mkern", "\\hskip", "\\mskip"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Size]),
            primitive: true,
            allowed_in_text: true,
            ..Default::default()
        },
        handler: Some(handler),
        mathml_builder: Some(mathml_builder),
    });
}

fn handler(
    context: FunctionContext,
    mut args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let ParseNode::Size(size) = args.remove(0) else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Size,
        }));
    };
    let func_name = context.func_name;
    let settings = context.settings;

    if settings.is_strict() {
        // \mkern and \mskip are the math-only forms
        let math_function = func_name.starts_with("\\m");
        let unit = size.value.unit.as_str();
        let mu_unit = unit == "mu";
        if math_function {
            if !mu_unit {
                settings.report_nonstrict(
                    "mathVsTextUnits",
                    &format!("LaTeX's {func_name} supports only mu units, not {unit} units"),
                )?;
            }
            if context.mode != Mode::Math {
                settings.report_nonstrict(
                    "mathVsTextUnits",
                    &format!("LaTeX's {func_name} works only in math mode"),
                )?;
            }
        } else if mu_unit {
            settings.report_nonstrict(
                "mathVsTextUnits",
                &format!("LaTeX's {func_name} doesn't support mu units"),
            )?;
        }
    }

    Ok(ParseNodeKern {
        mode: context.mode,
        dimension: size.value,
    }
    .into())
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    _ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Kern(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Kern,
        }));
    };

    let dimension = calculate_size(&group.dimension, options)?;
    let character = (dimension.unit == "em" && dimension.number > 0.0)
        .then(|| get_space_character(dimension.number))
        .flatten();
    if group.mode == Mode::Text
        && let Some(character) = character
    {
        return Ok(MathNode::with_text(MathNodeType::Mtext, character).into());
    }

    let width = dimension.to_css();
    if dimension.number < 0.0 {
        // Only the margin moves the following content left
        let mut row = MathNode::with_children(MathNodeType::Mrow, Vec::new());
        row.style.insert(CssProperty::MarginLeft, width);
        return Ok(row.into());
    }
    let mut mspace = MathNode::with_children(MathNodeType::Mspace, Vec::new());
    mspace.set_attribute("width", width.as_str());
    Ok(mspace.into())
}
