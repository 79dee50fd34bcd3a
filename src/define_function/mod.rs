//! Construct definition utilities
//!
//! Every construct family registers its command names, parse-time properties,
//! an optional parse handler and a MathML builder through
//! [`MathContext::define_function`](crate::MathContext::define_function).

use crate::MathContext;
use crate::mathml_tree::MathDomNode;
use crate::options::Options;
use crate::parse_node::{NodeType, ParseNode};
use crate::types::{ArgType, Mode, ParseError, Settings};

/// Context structure passed to parse handlers.
#[derive(Debug, Clone, Copy)]
pub struct FunctionContext<'a> {
    /// Canonical command name, after alias resolution
    pub func_name: &'a str,
    /// Mode the command appeared in
    pub mode: Mode,
    /// Settings of the owning context
    pub settings: &'a Settings,
}

/// Type alias for parse handlers turning parsed arguments into an AST node.
pub type FunctionHandler = fn(
    context: FunctionContext,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError>;

/// Type alias for functions that build MathML nodes from parse nodes.
pub type MathMLBuilder =
    fn(node: &ParseNode, options: &Options, ctx: &MathContext) -> Result<MathDomNode, ParseError>;

/// Parse-time properties of a construct.
#[derive(Debug, Clone)]
pub struct FunctionPropSpec {
    /// The number of required arguments
    pub num_args: usize,

    /// An array corresponding to each argument of the function, giving the
    /// type of argument that should be parsed
    pub arg_types: Option<Vec<ArgType>>,

    /// Whether the command may itself appear as an argument without braces
    pub allowed_in_argument: bool,

    /// Whether the function is allowed inside text mode
    pub allowed_in_text: bool,

    /// Whether the function is allowed inside math mode
    pub allowed_in_math: bool,

    /// The number of optional arguments the function should parse
    pub num_optional_args: usize,

    /// Whether the function is a TeX primitive
    pub primitive: bool,
}

impl Default for FunctionPropSpec {
    fn default() -> Self {
        Self {
            num_args: 0,
            arg_types: None,
            allowed_in_argument: false,
            allowed_in_text: false,
            allowed_in_math: true,
            num_optional_args: 0,
            primitive: false,
        }
    }
}

/// Complete definition of a construct family.
pub struct FunctionDefSpec<'b> {
    /// Tag of the nodes the handler produces, used to register the builder
    pub node_type: Option<NodeType>,

    /// Command names sharing this definition
    pub names: &'b [&'b str],

    /// Properties that control how arguments are checked
    pub props: FunctionPropSpec,

    /// Handler function
    pub handler: Option<FunctionHandler>,

    /// MathML builder function
    pub mathml_builder: Option<MathMLBuilder>,
}

/// Registry entry for one command name.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    /// Tag of the nodes the handler produces
    pub node_type: Option<NodeType>,

    /// Number of arguments
    pub num_args: usize,

    /// Argument types
    pub arg_types: Option<Vec<ArgType>>,

    /// Allowed in argument position
    pub allowed_in_argument: bool,

    /// Allowed in text mode
    pub allowed_in_text: bool,

    /// Allowed in math mode
    pub allowed_in_math: bool,

    /// Number of optional arguments
    pub num_optional_args: usize,

    /// TeX primitive
    pub primitive: bool,

    /// Handler function
    pub handler: Option<FunctionHandler>,
}

impl FunctionSpec {
    /// Flattens a definition into a registry entry.
    #[must_use]
    pub fn from_def(
        node_type: Option<NodeType>,
        props: &FunctionPropSpec,
        handler: Option<FunctionHandler>,
    ) -> Self {
        Self {
            node_type,
            num_args: props.num_args,
            arg_types: props.arg_types.clone(),
            allowed_in_argument: props.allowed_in_argument,
            allowed_in_text: props.allowed_in_text,
            allowed_in_math: props.allowed_in_math,
            num_optional_args: props.num_optional_args,
            primitive: props.primitive,
            handler,
        }
    }

    /// Whether the command may be used in `mode`.
    #[must_use]
    pub const fn allowed_in(&self, mode: Mode) -> bool {
        match mode {
            Mode::Math => self.allowed_in_math,
            Mode::Text => self.allowed_in_text,
        }
    }

    /// Declared type of argument `index`, counting optional arguments first.
    #[must_use]
    pub fn arg_type(&self, index: usize) -> Option<ArgType> {
        self.arg_types.as_ref()?.get(index).copied()
    }
}

/// Unwraps a single-element ordinary group.
#[must_use]
pub fn normalize_argument(arg: ParseNode) -> ParseNode {
    match arg {
        ParseNode::OrdGroup(mut ord) if ord.body.len() == 1 => ord.body.remove(0),
        other => other,
    }
}

/// Turns an argument into a list of expressions: the body of an ordinary
/// group, or the node itself.
#[must_use]
pub fn ord_argument(arg: ParseNode) -> Vec<ParseNode> {
    match arg {
        ParseNode::OrdGroup(ord) => ord.body,
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_node::{ParseNodeMathOrd, ParseNodeOrdGroup};

    fn x() -> ParseNode {
        ParseNodeMathOrd {
            mode: Mode::Math,
            text: "x".to_owned(),
        }
        .into()
    }

    #[test]
    fn single_groups_unwrap() {
        let group = ParseNode::ord_group(Mode::Math, vec![x()]);
        assert_eq!(normalize_argument(group.clone()), x());
        assert_eq!(ord_argument(group), vec![x()]);
        assert_eq!(ord_argument(x()), vec![x()]);

        let pair: ParseNode = ParseNodeOrdGroup {
            mode: Mode::Math,
            body: vec![x(), x()],
            semisimple: false,
        }
        .into();
        assert!(matches!(normalize_argument(pair), ParseNode::OrdGroup(_)));
    }

    #[test]
    fn mode_permissions() {
        let spec = FunctionSpec::from_def(
            None,
            &FunctionPropSpec {
                allowed_in_text: true,
                allowed_in_math: false,
                ..Default::default()
            },
            None,
        );
        assert!(spec.allowed_in(Mode::Text));
        assert!(!spec.allowed_in(Mode::Math));
        assert_eq!(spec.arg_type(0), None);
    }
}
