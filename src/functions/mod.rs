//! Construct implementations
//!
//! Each submodule registers one family of constructs on a
//! [`MathContext`](crate::MathContext): the command names, the parse handler
//! turning checked arguments into an AST node, and the MathML builder for the
//! node type it produces. Symbol builders (`mathord`, `textord`, `atom`,
//! `spacing`) and the structural `ordgroup`/`supsub` builders register a
//! builder only, since the front end creates those nodes itself.

mod accent;
mod accentunder;
mod arrow;
mod color;
mod font;
mod horiz_brace;
mod includegraphics;
mod kern;
mod mclass;
mod ordgroup;
mod phantom;
mod styling;
mod supsub;
mod symbols_op;
mod symbols_ord;
mod symbols_spacing;
mod text;

pub use accent::define_accent;
pub use accentunder::define_accentunder;
pub use arrow::define_arrow;
pub use color::define_color;
pub use font::define_font;
pub use horiz_brace::define_horiz_brace;
pub use includegraphics::define_includegraphics;
pub use kern::define_kern;
pub use mclass::define_mclass;
pub use ordgroup::define_ordgroup;
pub use phantom::define_phantom;
pub use styling::define_styling;
pub use supsub::define_supsub;
pub use symbols_op::define_symbols_op;
pub use symbols_ord::define_symbols_ord;
pub use symbols_spacing::define_symbols_spacing;
pub use text::define_text;
