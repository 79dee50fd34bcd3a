//! Embedded images: `\includegraphics[key=value,...]{url}`

use crate::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::dom_tree::{HtmlDomNode, Img};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode, ParseNodeIncludegraphics};
use crate::types::{ArgType, CssProperty, CssStyle, ParseError, ParseErrorKind, TrustContext};
use crate::units::{Measurement, calculate_size, format_number, size_data};
use crate::utils::file_stem;

/// Registers `\includegraphics`.
pub fn define_includegraphics(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Includegraphics),
        names: &["\\includegraphics"],
        props: FunctionPropSpec {
            num_args: 1,
            num_optional_args: 1,
            arg_types: Some(vec![ArgType::Raw, ArgType::Url]),
            ..Default::default()
        },
        handler: Some(handler),
        mathml_builder: Some(mathml_builder),
    });
}

fn handler(
    context: FunctionContext,
    mut args: Vec<ParseNode>,
    mut opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let ParseNode::Url(url) = args.remove(0) else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Url,
        }));
    };

    let mut width = Measurement::new(0.0, "em");
    // Roughly the height of a capital letter
    let mut height = Measurement::new(0.9, "em");
    let mut totalheight = Measurement::new(0.0, "em");
    let mut alt = String::new();

    if let Some(Some(ParseNode::Raw(raw))) = opt_args.pop() {
        for attribute in raw.string.split(',') {
            let Some((key, value)) = attribute.split_once('=') else {
                continue;
            };
            if value.contains('=') {
                continue;
            }
            let value = value.trim();
            match key.trim() {
                "alt" => value.clone_into(&mut alt),
                "width" => width = size_data(value)?,
                "height" => height = size_data(value)?,
                "totalheight" => totalheight = size_data(value)?,
                other => {
                    return Err(ParseError::new(ParseErrorKind::InvalidIncludeGraphicsKey {
                        key: other.to_owned(),
                    }));
                }
            }
        }
    }

    if alt.is_empty() {
        file_stem(&url.url).clone_into(&mut alt);
    }

    Ok(ParseNodeIncludegraphics {
        mode: context.mode,
        alt,
        width,
        height,
        totalheight,
        src: url.url,
    }
    .into())
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &MathContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Includegraphics(group) = node else {
        return Err(ParseError::new(ParseErrorKind::ExpectedNode {
            node: NodeType::Includegraphics,
        }));
    };

    let command = "\\includegraphics";
    let mut trust = TrustContext {
        command: command.to_owned(),
        url: Some(group.src.clone()),
        protocol: None,
    };
    if !ctx.settings().is_trusted(&mut trust) {
        log::debug!("untrusted image source: {}", group.src);
        return Err(ParseError::with_command(
            ParseErrorKind::CommandNotTrusted {
                name: command.to_owned(),
            },
            command,
        ));
    }

    let height = calculate_size(&group.height, options)?;
    // The part of the total height below the baseline
    let depth = if group.totalheight.unit == height.unit
        && group.totalheight.number > height.number
    {
        group.totalheight.number - height.number
    } else {
        0.0
    };

    let mut style = CssStyle::default();
    style.insert(
        CssProperty::Height,
        format!("{}{}", format_number(height.number + depth), height.unit),
    );
    if group.width.number > 0.0 {
        let width = calculate_size(&group.width, options)?;
        style.insert(CssProperty::Width, width.to_css());
    }
    if depth > 0.0 {
        style.insert(
            CssProperty::VerticalAlign,
            format!("{}{}", format_number(-depth), height.unit),
        );
    }

    let img = Img::new(group.src.as_str(), group.alt.as_str(), style);
    Ok(MathNode::with_children(MathNodeType::Mtext, vec![HtmlDomNode::from(img).into()]).into())
}
