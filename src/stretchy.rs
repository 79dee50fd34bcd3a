//! Stretchy operators for wide accents, braces and extensible arrows
//!
//! Most constructs map to a single Unicode glyph that the renderer stretches
//! itself (`<mo stretchy="true">`). The few with no such glyph are drawn as
//! two vector end caps, each clipped to half of a full-width wrapper, so the
//! shaft between them can grow without distortion.

use phf::{Map, phf_map};

use crate::dom_tree::{HtmlDomNode, PathNode, Span, SvgNode};
use crate::mathml_tree::{MathNode, MathNodeType};
use crate::svg_paths::{SVG_PATHS, definition_name};
use crate::types::{Attributes, CssProperty, CssStyle, ParseError, ParseErrorKind, Settings};
use crate::units::make_em;

/// Glyphs for the stretchy constructs the renderer can extend itself, keyed
/// by command name without the backslash.
pub static STRETCHY_CODE_POINT: Map<&'static str, &'static str> = phf_map! {
    "widehat" => "^",
    "widecheck" => "\u{2c7}",
    "widetilde" => "~",
    "wideparen" => "\u{23dc}",
    "utilde" => "~",
    "overleftarrow" => "\u{2190}",
    "underleftarrow" => "\u{2190}",
    "xleftarrow" => "\u{2190}",
    "overrightarrow" => "\u{2192}",
    "underrightarrow" => "\u{2192}",
    "xrightarrow" => "\u{2192}",
    "underbrace" => "\u{23df}",
    "overbrace" => "\u{23de}",
    "overbracket" => "\u{23b4}",
    "underbracket" => "\u{23b5}",
    "overgroup" => "\u{23e0}",
    "overparen" => "\u{23dc}",
    "undergroup" => "\u{23e1}",
    "underparen" => "\u{23dd}",
    "overleftrightarrow" => "\u{2194}",
    "underleftrightarrow" => "\u{2194}",
    "xleftrightarrow" => "\u{2194}",
    "Overrightarrow" => "\u{21d2}",
    "xRightarrow" => "\u{21d2}",
    "overleftharpoon" => "\u{21bc}",
    "xleftharpoonup" => "\u{21bc}",
    "overrightharpoon" => "\u{21c0}",
    "xrightharpoonup" => "\u{21c0}",
    "xLeftarrow" => "\u{21d0}",
    "xLeftrightarrow" => "\u{21d4}",
    "xhookleftarrow" => "\u{21a9}",
    "xhookrightarrow" => "\u{21aa}",
    "xmapsto" => "\u{21a6}",
    "xrightharpoondown" => "\u{21c1}",
    "xleftharpoondown" => "\u{21bd}",
    "xtwoheadleftarrow" => "\u{219e}",
    "xtwoheadrightarrow" => "\u{21a0}",
    "xlongequal" => "=",
    "xrightleftarrows" => "\u{21c4}",
    "xleftrightarrows" => "\u{21c6}",
    "yields" => "\u{2192}",
    "yieldsLeft" => "\u{2190}",
    "mesomerism" => "\u{2194}",
    "longrightharpoonup" => "\u{21c0}",
    "longleftharpoondown" => "\u{21bd}",
    "eqrightharpoonup" => "\u{21c0}",
    "eqleftharpoondown" => "\u{21bd}",
    "cdrightarrow" => "\u{2192}",
    "cdleftarrow" => "\u{2190}",
    "cdlongequal" => "=",
};

/// A construct drawn from two vector end caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchySvg {
    /// Path drawn in the left half
    pub left: &'static str,
    /// Path drawn in the right half
    pub right: &'static str,
    /// Minimum width in em
    pub min_width: f64,
    /// Height in thousandths of an em, also the view box height
    pub height: f64,
}

impl StretchySvg {
    const fn new(left: &'static str, right: &'static str, min_width: f64, height: f64) -> Self {
        Self {
            left,
            right,
            min_width,
            height,
        }
    }
}

/// Constructs without a stretchable glyph, keyed by command name without the
/// backslash.
pub static STRETCHY_SVG_DATA: Map<&'static str, StretchySvg> = phf_map! {
    "overlinesegment" => StretchySvg::new("leftlinesegment", "rightlinesegment", 0.888, 522.0),
    "underlinesegment" => StretchySvg::new("leftlinesegment", "rightlinesegment", 0.888, 522.0),
    "xrightequilibrium" => StretchySvg::new("baraboveshortleftharpoon", "rightharpoonaboveshortbar", 1.75, 716.0),
    "xleftequilibrium" => StretchySvg::new("shortbaraboveleftharpoon", "shortrightharpoonabovebar", 1.75, 716.0),
    "longLeftrightharpoons" => StretchySvg::new("leftharpoonsabove", "rightharpoonsbelow", 2.0, 716.0),
    "longRightleftharpoons" => StretchySvg::new("rightharpoonsabove", "leftharpoonsbelow", 2.0, 716.0),
};

/// View box width shared by every end cap.
const VIEW_BOX_WIDTH: u32 = 400_000;

/// Builds the stretchy node for `label` (`\widehat`, `\xrightarrow`...).
///
/// Glyph constructs give `<mo stretchy="true">`. Vector constructs give an
/// `<mtext>` holding the two-cap wrapper; their path data is read from the
/// definitions first and the built-in table second.
pub fn mathml_node(label: &str, settings: &Settings) -> Result<MathNode, ParseError> {
    let name = label.strip_prefix('\\').unwrap_or(label);
    if let Some(glyph) = STRETCHY_CODE_POINT.get(name) {
        let mut node = MathNode::with_text(MathNodeType::Mo, *glyph);
        node.set_attribute("stretchy", "true");
        return Ok(node);
    }

    let Some(data) = STRETCHY_SVG_DATA.get(name) else {
        return Err(ParseError::with_command(
            ParseErrorKind::UnknownStretchyElement {
                label: label.to_owned(),
            },
            label,
        ));
    };
    let wrapper = svg_wrapper(data, settings).map_err(|e| e.in_command(label))?;
    Ok(MathNode::builder()
        .node_type(MathNodeType::Mtext)
        .children(vec![HtmlDomNode::from(wrapper).into()])
        .build())
}

/// Resolves the path data for `name`.
pub fn path_data(name: &str, settings: &Settings) -> Result<String, ParseError> {
    let key = definition_name(name);
    if let Some(data) = settings.definition(&key) {
        return Ok(data.to_owned());
    }
    SVG_PATHS
        .get(name)
        .map(|data| (*data).to_owned())
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingDefinition { name: key }))
}

fn svg_wrapper(data: &StretchySvg, settings: &Settings) -> Result<Span, ParseError> {
    let height = make_em(data.height / 1000.0);
    let caps = [
        (data.left, "xMinYMin", CssProperty::Left),
        (data.right, "xMaxYMin", CssProperty::Right),
    ];

    let mut children: Vec<HtmlDomNode> = Vec::with_capacity(caps.len());
    for (path_name, align, side) in caps {
        let path = PathNode::new(path_name, path_data(path_name, settings)?);
        let attributes: Attributes = [
            ("width", "50%".to_owned()),
            ("height", height.clone()),
            ("viewBox", format!("0 0 {VIEW_BOX_WIDTH} {}", data.height)),
            ("preserveAspectRatio", format!("{align} slice")),
        ]
        .into_iter()
        .collect();
        let mut style = CssStyle::default();
        style.insert(CssProperty::Position, "absolute");
        style.insert(CssProperty::Top, "0");
        style.insert(side, "0");
        let svg = SvgNode::builder()
            .children(vec![path])
            .attributes(attributes)
            .style(style)
            .build();
        children.push(svg.into());
    }

    let mut style = CssStyle::default();
    style.insert(CssProperty::Position, "relative");
    style.insert(CssProperty::Display, "inline-block");
    style.insert(CssProperty::Width, "100%");
    style.insert(CssProperty::MinWidth, make_em(data.min_width));
    style.insert(CssProperty::Height, height);
    style.insert(CssProperty::Overflow, "hidden");
    Ok(Span::builder().children(children).style(style).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathml_tree::MathDomNode;
    use crate::namespace::KeyMap;
    use crate::tree::VirtualNode as _;

    fn wrapper_of(node: &MathNode) -> &Span {
        match node.children.as_slice() {
            [MathDomNode::Html(HtmlDomNode::Span(span))] => span,
            other => panic!("expected a span wrapper, got {other:?}"),
        }
    }

    #[test]
    fn glyph_constructs_become_stretchy_mo() {
        let node = mathml_node("\\widehat", &Settings::default()).unwrap();
        assert_eq!(
            node.to_markup().unwrap(),
            "<mo stretchy=\"true\">^</mo>"
        );
        let cd = mathml_node("\\cdlongequal", &Settings::default()).unwrap();
        assert_eq!(cd.to_text(), "=");
    }

    #[test]
    fn every_svg_construct_has_two_half_width_caps() {
        let settings = Settings::default();
        for (name, data) in &STRETCHY_SVG_DATA {
            let node = mathml_node(&format!("\\{name}"), &settings).unwrap();
            assert_eq!(node.node_type, MathNodeType::Mtext);
            let wrapper = wrapper_of(&node);
            assert_eq!(wrapper.children.len(), 2, "{name}");

            let expected_height = make_em(data.height / 1000.0);
            for cap in &wrapper.children {
                let HtmlDomNode::Svg(svg) = cap else {
                    panic!("{name}: cap is not an svg");
                };
                assert_eq!(svg.attributes.get("width"), Some("50%"));
                assert_eq!(svg.attributes.get("height"), Some(expected_height.as_str()));
                assert_eq!(svg.style.get(CssProperty::Position), Some("absolute"));
            }
            assert_eq!(
                wrapper.style.get(CssProperty::MinWidth),
                Some(make_em(data.min_width).as_str())
            );
        }
    }

    #[test]
    fn caps_align_to_opposite_edges() {
        let node = mathml_node("\\overlinesegment", &Settings::default()).unwrap();
        let wrapper = wrapper_of(&node);
        let aligns: Vec<_> = wrapper
            .children
            .iter()
            .filter_map(|cap| match cap {
                HtmlDomNode::Svg(svg) => svg.attributes.get("preserveAspectRatio"),
                _ => None,
            })
            .collect();
        assert_eq!(aligns, vec!["xMinYMin slice", "xMaxYMin slice"]);
        let markup = node.to_markup().unwrap();
        assert!(markup.contains("viewBox=\"0 0 400000 522\""));
    }

    #[test]
    fn definitions_override_builtin_paths() {
        let mut definitions = KeyMap::default();
        definitions.insert(
            "\\@svgpath@leftlinesegment".to_owned(),
            "M0 0 H400000z".to_owned(),
        );
        let settings = Settings::builder().definitions(definitions).build();
        assert_eq!(path_data("leftlinesegment", &settings).unwrap(), "M0 0 H400000z");

        let err = path_data("nosuchpath", &settings).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = mathml_node("\\notanarrow", &Settings::default()).unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::UnknownStretchyElement { ref label } if label == "\\notanarrow"
        ));
        assert_eq!(err.command(), Some("\\notanarrow"));
    }
}
