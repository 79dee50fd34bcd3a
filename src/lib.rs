//! MathML builder - turns a typed math AST into MathML
//!
//! The crate is the back half of a TeX-to-MathML converter. A front end hands
//! over a tree of [`ParseNode`]s; every node tag has a builder registered on a
//! [`MathContext`], and [`build_mathml`] walks the tree into a `<math>`
//! element. Constructs a MathML renderer cannot stretch on its own (long
//! arrows, braces, equilibrium harpoons) fall back to inline SVG carried inside
//! the MathML tree.
//!
//! ```rust
//! use mathml_builder::parse_node::ParseNodeMathOrd;
//! use mathml_builder::types::Mode;
//! use mathml_builder::{MathContext, ParseNode, render_to_string};
//!
//! fn main() -> Result<(), mathml_builder::ParseError> {
//!     let ctx = MathContext::default();
//!     let x: ParseNode = ParseNodeMathOrd {
//!         mode: Mode::Math,
//!         text: "x".to_owned(),
//!     }
//!     .into();
//!     let hat = ctx.construct("\\hat", Mode::Math, vec![x], vec![])?;
//!     let markup = render_to_string(&ctx, &[hat])?;
//!     assert!(markup.starts_with("<math"));
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::impl_trait_in_params)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::map_with_unused_argument_over_ranges)]
#![warn(clippy::missing_asserts_for_indexing)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
// Not sure
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]

extern crate alloc;
pub mod build_mathml;
pub mod context;
pub mod define_function;
pub mod dom_tree;
pub mod font_profile;
pub mod functions;
pub mod mathml_tree;
pub mod namespace;
pub mod options;
pub mod parse_node;
pub mod spacing;
pub mod stretchy;
pub mod svg_paths;
pub mod symbols;
pub mod tree;
pub mod types;
pub mod units;
pub mod utils;
#[cfg(feature = "wasm")]
pub mod web_context;

/// Registry of constructs and the settings they are built under.
///
/// A context is created once, usually with [`MathContext::default`] or
/// [`MathContext::new`], and then shared by reference. It is `Send + Sync`,
/// so one instance can serve conversions on many threads.
///
/// ```rust
/// use mathml_builder::{MathContext, Settings};
///
/// let ctx = MathContext::new(Settings::builder().display_mode(true).build());
/// assert!(ctx.function("\\overbrace").is_some());
/// ```
pub use crate::context::MathContext;

/// Builds the `<math>` root for an expression.
///
/// See [`build_mathml::build_mathml`] for the wrapping rules.
pub use crate::build_mathml::build_mathml;

/// Builds an expression and serializes the result to MathML markup.
///
/// # Examples
///
/// ```rust
/// use mathml_builder::parse_node::ParseNodeTextOrd;
/// use mathml_builder::types::Mode;
/// use mathml_builder::{MathContext, ParseNode, Settings, render_to_string};
///
/// let ctx = MathContext::new(Settings::builder().display_mode(true).build());
/// let two: ParseNode = ParseNodeTextOrd {
///     mode: Mode::Math,
///     text: "2".to_owned(),
/// }
/// .into();
/// let markup = render_to_string(&ctx, &[two]).unwrap();
/// assert!(markup.contains("display=\"block\""));
/// assert!(markup.contains("<mn>2</mn>"));
/// ```
pub use crate::build_mathml::render_to_string;

/// Builds a single node (or the nodes of a list) without the `<math>` root.
pub use crate::build_mathml::{build_expression, build_expression_row, build_group};

/// Error type for construct validation, configuration and trust failures.
///
/// Every fallible operation of the crate returns a [`ParseError`]. The error
/// carries a boxed [`ParseErrorKind`] and, when one is known, the command
/// that caused it:
///
/// ```rust
/// use mathml_builder::types::Mode;
/// use mathml_builder::{MathContext, ParseErrorKind};
///
/// let ctx = MathContext::default();
/// let err = ctx.construct("\\hat", Mode::Math, vec![], vec![]).unwrap_err();
/// assert!(matches!(*err.kind, ParseErrorKind::FunctionMissingArguments { .. }));
/// assert_eq!(err.command(), Some("\\hat"));
/// ```
pub use crate::types::{ParseError, ParseErrorKind};

/// Configuration shared by every conversion of a context.
pub use crate::types::{Settings, StrictMode, StrictSetting, TrustContext, TrustSetting};

/// The input tree and its closed set of tags.
pub use crate::parse_node::{NodeType, ParseNode};

/// Per-subtree build state (font, color, script level).
pub use crate::options::Options;

/// Shared contract of MathML and HTML output nodes.
pub use crate::tree::VirtualNode;

/// Output nodes.
pub use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};

/// Dimension helpers used by size-carrying constructs.
pub use crate::units::{Measurement, calculate_size, make_em, size_data};
