use std::panic::{UnwindSafe, catch_unwind};
use std::sync::OnceLock;

use mathml_builder::{
    MathContext, Options, ParseError, ParseNode, Settings, VirtualNode as _,
    build_expression_row,
    parse_node::{ParseNodeAtom, ParseNodeMathOrd, ParseNodeTextOrd},
    symbols::Atom,
    types::Mode,
};

static DEFAULT_CONTEXT: OnceLock<MathContext> = OnceLock::new();
pub fn default_ctx() -> &'static MathContext {
    DEFAULT_CONTEXT.get_or_init(MathContext::default)
}

pub struct TestTree<'a> {
    pub tree: Vec<ParseNode>,
    pub ctx: &'a MathContext,
    pub options: Options,
    pub file: &'static str,
    pub line: u32,
    pub code: &'static str,
}

impl<'a> TestTree<'a> {
    pub fn with_ctx<'b>(self, ctx: &'b MathContext) -> TestTree<'b> {
        TestTree {
            tree: self.tree,
            ctx,
            options: Options::from_settings(ctx.settings()),
            file: self.file,
            line: self.line,
            code: self.code,
        }
    }

    pub fn at_level(mut self, level: u8) -> Self {
        self.options = self.options.with_level(level);
        self
    }

    /// Markup of the tree without the `<math>` root
    pub fn markup(&self) -> Result<String, ParseError> {
        build_expression_row(self.ctx, &self.tree, &self.options, false)?.to_markup()
    }

    pub fn to_build(&self) -> Result<(), ParseError> {
        self.markup().map(|_| ())
    }

    pub fn to_build_like(&self, expected: &str) -> Result<(), ParseError> {
        let markup = self.markup()?;
        assert_eq!(
            markup, expected,
            "{} built differently at {}:{}",
            self.code, self.file, self.line
        );
        Ok(())
    }

    pub fn to_fail_with<F>(&self, check: F) -> Result<(), ParseError>
    where
        F: FnOnce(&ParseError) -> bool,
    {
        match self.markup() {
            Ok(markup) => panic!(
                "{} was expected to fail at {}:{}, built {markup}",
                self.code, self.file, self.line
            ),
            Err(err) => {
                assert!(
                    check(&err),
                    "{} failed with an unexpected error at {}:{}: {err}",
                    self.code,
                    self.file,
                    self.line
                );
                Ok(())
            }
        }
    }
}

pub fn expect_impl(
    tree: Vec<ParseNode>,
    file: &'static str,
    line: u32,
    code: &'static str,
) -> TestTree<'static> {
    TestTree {
        tree,
        ctx: default_ctx(),
        options: Options::default(),
        file,
        line,
        code,
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::setup::expect_impl($e, file!(), line!(), stringify!($e))
    };
}

pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), ParseError> + UnwindSafe,
{
    match catch_unwind(test_fn) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test '{desc}' failed with Result::Err: {e}"),
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_owned()
            };
            panic!("Test '{desc}' panicked: {msg}");
        }
    }
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{} \n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}

/// Settings helpers
pub fn strict_settings() -> Settings {
    Settings::builder()
        .strict(mathml_builder::StrictSetting::Bool(true))
        .build()
}

pub fn trust_settings() -> Settings {
    Settings::builder()
        .trust(mathml_builder::TrustSetting::Bool(true))
        .build()
}

pub fn display_settings() -> Settings {
    Settings::builder().display_mode(true).build()
}

/// Node helpers
pub fn mathord(text: &str) -> ParseNode {
    ParseNodeMathOrd {
        mode: Mode::Math,
        text: text.to_owned(),
    }
    .into()
}

pub fn textord(text: &str) -> ParseNode {
    ParseNodeTextOrd {
        mode: Mode::Math,
        text: text.to_owned(),
    }
    .into()
}

pub fn text_char(text: &str) -> ParseNode {
    ParseNodeTextOrd {
        mode: Mode::Text,
        text: text.to_owned(),
    }
    .into()
}

pub fn atom(family: Atom, text: &str) -> ParseNode {
    ParseNodeAtom {
        mode: Mode::Math,
        family,
        text: text.to_owned(),
    }
    .into()
}

pub fn group(body: Vec<ParseNode>) -> ParseNode {
    ParseNode::ord_group(Mode::Math, body)
}

/// Runs `name` through the default registry in math mode.
pub fn construct(name: &str, args: Vec<ParseNode>) -> Result<ParseNode, ParseError> {
    default_ctx().construct(name, Mode::Math, args, vec![])
}
