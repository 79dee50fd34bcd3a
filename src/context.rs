//! The construct registry shared by every conversion

use strum::EnumCount as _;

use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionSpec, MathMLBuilder};
use crate::functions;
use crate::namespace::KeyMap;
use crate::parse_node::{NodeType, ParseNode};
use crate::types::{ArgType, Mode, ParseError, ParseErrorKind, Settings};

/// Registry of constructs plus the settings they are built under.
///
/// The context maps command names to parse-time entries and node tags to
/// MathML builders. It is filled once by [`MathContext::new`] (or by the
/// `define_*` methods, for extensions) and is read-only afterwards, so one
/// instance can serve any number of conversions on any number of threads.
#[derive(Debug, Clone)]
pub struct MathContext {
    /// All registered command names
    pub functions: KeyMap<String, FunctionSpec>,
    /// Alternative command names, resolved before lookup
    pub aliases: KeyMap<String, String>,
    /// MathML builders indexed by [`NodeType`]
    builders: [Option<MathMLBuilder>; NodeType::COUNT],
    /// Settings every construct is built under
    settings: Settings,
}

impl MathContext {
    /// Creates a context with every built-in construct registered.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let mut ctx = Self::empty(settings);
        functions::define_accent(&mut ctx);
        functions::define_accentunder(&mut ctx);
        functions::define_arrow(&mut ctx);
        functions::define_color(&mut ctx);
        functions::define_font(&mut ctx);
        functions::define_horiz_brace(&mut ctx);
        functions::define_includegraphics(&mut ctx);
        functions::define_kern(&mut ctx);
        functions::define_mclass(&mut ctx);
        functions::define_ordgroup(&mut ctx);
        functions::define_phantom(&mut ctx);
        functions::define_styling(&mut ctx);
        functions::define_supsub(&mut ctx);
        functions::define_symbols_op(&mut ctx);
        functions::define_symbols_ord(&mut ctx);
        functions::define_symbols_spacing(&mut ctx);
        functions::define_text(&mut ctx);
        ctx
    }

    /// Creates a context with no constructs registered.
    #[must_use]
    pub fn empty(settings: Settings) -> Self {
        Self {
            functions: KeyMap::default(),
            aliases: KeyMap::default(),
            builders: [None; NodeType::COUNT],
            settings,
        }
    }

    /// Settings every construct is built under.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Registers a construct family. Every name gets the same entry; a name
    /// registered earlier, as a function or an alias, is replaced.
    pub fn define_function(&mut self, spec: FunctionDefSpec) {
        let data = FunctionSpec::from_def(spec.node_type, &spec.props, spec.handler);

        for name in spec.names {
            self.aliases.remove(*name);
            self.functions.insert((*name).to_owned(), data.clone());
        }

        if let Some(node_type) = spec.node_type
            && let Some(builder) = spec.mathml_builder
        {
            self.define_function_builder(node_type, builder);
        }
    }

    /// Register only the MathML builder for a node type
    pub fn define_function_builder(&mut self, node_type: NodeType, builder: MathMLBuilder) {
        self.builders[node_type as usize] = Some(builder);
    }

    /// Makes `alias` dispatch to `canonical`.
    pub fn define_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases.insert(alias.to_owned(), canonical.to_owned());
    }

    /// The canonical name for `name`.
    #[must_use]
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// The registry entry for `name`, after alias resolution.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(self.resolve_alias(name))
    }

    /// The builder registered for `node_type`.
    #[must_use]
    pub fn builder(&self, node_type: NodeType) -> Option<MathMLBuilder> {
        self.builders[node_type as usize]
    }

    /// Builds the AST node for command `name` from its parsed arguments.
    ///
    /// This is the contract the front end parses against: the alias is
    /// resolved, the mode permission and the argument counts are checked,
    /// dimension, URL, raw and color arguments must arrive as the matching node
    /// type, and the handler is invoked last. `opt_args` holds one entry per
    /// optional argument slot actually parsed.
    pub fn construct(
        &self,
        name: &str,
        mode: Mode,
        args: Vec<ParseNode>,
        opt_args: Vec<Option<ParseNode>>,
    ) -> Result<ParseNode, ParseError> {
        let func_name = self.resolve_alias(name);
        let Some(spec) = self.functions.get(func_name) else {
            return Err(ParseError::new(ParseErrorKind::UndefinedControlSequence {
                name: name.to_owned(),
            }));
        };

        if !spec.allowed_in(mode) {
            return Err(ParseError::with_command(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: func_name.to_owned(),
                    mode,
                },
                func_name,
            ));
        }
        if args.len() != spec.num_args {
            return Err(ParseError::with_command(
                ParseErrorKind::FunctionMissingArguments {
                    func: func_name.to_owned(),
                    expected: spec.num_args,
                    found: args.len(),
                },
                func_name,
            ));
        }
        if opt_args.len() > spec.num_optional_args {
            return Err(ParseError::with_command(
                ParseErrorKind::TooManyArguments {
                    func: func_name.to_owned(),
                    max: spec.num_optional_args,
                    found: opt_args.len(),
                },
                func_name,
            ));
        }

        // Optional argument slots come first in `arg_types`.
        let supplied = opt_args
            .iter()
            .map(Option::as_ref)
            .chain(core::iter::repeat_n(
                None,
                spec.num_optional_args - opt_args.len(),
            ))
            .chain(args.iter().map(Some));
        for (index, arg) in supplied.enumerate() {
            let expected = match spec.arg_type(index) {
                Some(ArgType::Size) => NodeType::Size,
                Some(ArgType::Url) => NodeType::Url,
                Some(ArgType::Raw | ArgType::Color) => NodeType::Raw,
                _ => continue,
            };
            if let Some(arg) = arg
                && arg.node_type() != expected
            {
                return Err(ParseError::with_command(
                    ParseErrorKind::UnexpectedArgumentType {
                        func: func_name.to_owned(),
                        index,
                        expected,
                    },
                    func_name,
                ));
            }
        }

        let Some(handler) = spec.handler else {
            return Err(ParseError::new(ParseErrorKind::UndefinedControlSequence {
                name: name.to_owned(),
            }));
        };
        log::debug!("constructing {func_name} in {mode} mode");
        let context = FunctionContext {
            func_name,
            mode,
            settings: &self.settings,
        };
        handler(context, args, opt_args).map_err(|err| err.in_command(func_name))
    }
}

impl Default for MathContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_function::FunctionPropSpec;
    use crate::parse_node::{ParseNodeMathOrd, ParseNodeRaw};
    use strum::IntoEnumIterator as _;

    fn x() -> ParseNode {
        ParseNodeMathOrd {
            mode: Mode::Math,
            text: "x".to_owned(),
        }
        .into()
    }

    fn echo(
        _: FunctionContext,
        mut args: Vec<ParseNode>,
        _: Vec<Option<ParseNode>>,
    ) -> Result<ParseNode, ParseError> {
        Ok(args.pop().unwrap_or_else(x))
    }

    fn named(
        ctx: FunctionContext,
        _: Vec<ParseNode>,
        _: Vec<Option<ParseNode>>,
    ) -> Result<ParseNode, ParseError> {
        Ok(ParseNodeRaw {
            mode: ctx.mode,
            string: ctx.func_name.to_owned(),
        }
        .into())
    }

    #[test]
    fn context_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MathContext>();
    }

    #[test]
    fn every_renderable_tag_has_a_builder() {
        let ctx = MathContext::default();
        for node_type in NodeType::iter() {
            assert_eq!(
                ctx.builder(node_type).is_some(),
                !node_type.is_argument_only(),
                "{node_type}"
            );
        }
    }

    #[test]
    fn last_write_wins() {
        let mut ctx = MathContext::empty(Settings::default());
        ctx.define_function(FunctionDefSpec {
            node_type: None,
            names: &["\\foo"],
            props: FunctionPropSpec {
                num_args: 1,
                ..Default::default()
            },
            handler: Some(echo),
            mathml_builder: None,
        });
        ctx.define_function(FunctionDefSpec {
            node_type: None,
            names: &["\\foo", "\\bar"],
            props: FunctionPropSpec::default(),
            handler: Some(named),
            mathml_builder: None,
        });
        let node = ctx.construct("\\foo", Mode::Math, vec![], vec![]).unwrap();
        assert!(matches!(node, ParseNode::Raw(ref raw) if raw.string == "\\foo"));
    }

    #[test]
    fn aliases_resolve_before_dispatch() {
        let mut ctx = MathContext::empty(Settings::default());
        ctx.define_function(FunctionDefSpec {
            node_type: None,
            names: &["\\canonical"],
            props: FunctionPropSpec::default(),
            handler: Some(named),
            mathml_builder: None,
        });
        ctx.define_alias("\\short", "\\canonical");
        let node = ctx.construct("\\short", Mode::Math, vec![], vec![]).unwrap();
        assert!(matches!(node, ParseNode::Raw(ref raw) if raw.string == "\\canonical"));

        let err = ctx.construct("\\nope", Mode::Math, vec![], vec![]).unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::UndefinedControlSequence { .. }));
    }

    #[test]
    fn construct_checks_mode_and_arity() {
        let mut ctx = MathContext::empty(Settings::default());
        ctx.define_function(FunctionDefSpec {
            node_type: None,
            names: &["\\onearg"],
            props: FunctionPropSpec {
                num_args: 1,
                num_optional_args: 1,
                arg_types: Some(vec![ArgType::Raw, ArgType::Original]),
                ..Default::default()
            },
            handler: Some(echo),
            mathml_builder: None,
        });

        let err = ctx.construct("\\onearg", Mode::Text, vec![x()], vec![]).unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::FunctionDisallowedInMode { .. }));
        assert_eq!(err.command(), Some("\\onearg"));

        let err = ctx.construct("\\onearg", Mode::Math, vec![], vec![]).unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::FunctionMissingArguments { expected: 1, found: 0, .. }
        ));

        let err = ctx
            .construct("\\onearg", Mode::Math, vec![x()], vec![None, None])
            .unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::TooManyArguments { max: 1, .. }));

        let err = ctx
            .construct("\\onearg", Mode::Math, vec![x()], vec![Some(x())])
            .unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::UnexpectedArgumentType { index: 0, expected: NodeType::Raw, .. }
        ));

        assert_eq!(
            ctx.construct("\\onearg", Mode::Math, vec![x()], vec![None]).unwrap(),
            x()
        );
    }
}
