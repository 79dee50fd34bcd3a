//! Error handling for construct building
//!
//! Every hard failure raised while constructing or building a node is a
//! [`ParseError`]. The error carries a categorised [`ParseErrorKind`] and, when
//! known, the name of the command that triggered it so callers can point at
//! the offending construct.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;
use thiserror::Error;

use crate::parse_node::NodeType;
use crate::symbols::Mode;

/// Main error type returned when something has gone wrong while turning an
/// AST into an output tree.
#[derive(Debug, Error)]
#[error("ParseError: {kind}{command}")]
pub struct ParseError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// The command being built when the error occurred.
    command: CommandContext,
    /// Backtrace of the error stack
    #[cfg(feature = "backtrace")]
    pub backtrace: Box<Backtrace>,
}

impl ParseError {
    /// Create a new ParseError with the given kind
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self {
            kind: Box::new(kind.into()),
            command: CommandContext(None),
            #[cfg(feature = "backtrace")]
            backtrace: Box::new(Backtrace::force_capture()),
        }
    }

    /// Create a new ParseError naming the construct that raised it
    pub fn with_command<T: Into<ParseErrorKind>>(kind: T, command: impl Into<String>) -> Self {
        Self::new(kind).in_command(command)
    }

    /// Attach the offending command name unless one is already recorded.
    #[must_use]
    pub fn in_command(mut self, command: impl Into<String>) -> Self {
        if self.command.0.is_none() {
            self.command.0 = Some(command.into());
        }
        self
    }

    /// The command that raised the error, if known.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.0.as_deref()
    }

    /// Whether the error is a rejection by the trust predicate rather than a
    /// validation failure.
    #[must_use]
    pub fn is_trust_rejection(&self) -> bool {
        matches!(*self.kind, ParseErrorKind::CommandNotTrusted { .. })
    }

    /// Whether the error comes from missing external configuration.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(*self.kind, ParseErrorKind::MissingDefinition { .. })
    }
}

impl From<strum::ParseError> for ParseError {
    fn from(err: strum::ParseError) -> Self {
        Self::new(ParseErrorKind::EnumParse(err))
    }
}

impl From<fmt::Error> for ParseError {
    fn from(_: fmt::Error) -> Self {
        Self::new(ParseErrorKind::MarkupWriteFailure)
    }
}

#[derive(Debug)]
struct CommandContext(Option<String>);

impl fmt::Display for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(command) => write!(f, " (in {command})"),
            None => Ok(()),
        }
    }
}

/// Describes the specific reason for a [`ParseError`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error(r"Invalid size: '{size}' in \includegraphics")]
    InvalidIncludeGraphicsSize { size: String },
    #[error(r"Invalid unit: '{unit}' in \includegraphics")]
    InvalidIncludeGraphicsUnit { unit: String },
    #[error(r"Invalid key: '{key}' in \includegraphics")]
    InvalidIncludeGraphicsKey { key: String },
    #[error("Invalid color: '{color}'")]
    InvalidColor { color: String },
    #[error("Invalid unit: '{unit}'")]
    InvalidUnit { unit: String },
    #[error("Invalid attribute name: '{attr}'")]
    InvalidAttributeName { attr: String },
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },
    #[error("Can't use function {func} in {mode} mode")]
    FunctionDisallowedInMode { func: String, mode: Mode },
    #[error("Got function '{func}' with {found} arguments, expected {expected}")]
    FunctionMissingArguments {
        func: String,
        expected: usize,
        found: usize,
    },
    #[error("Function '{func}' takes at most {max} optional arguments, got {found}")]
    TooManyArguments {
        func: String,
        max: usize,
        found: usize,
    },
    #[error("Expected {expected} node as argument {index} of {func}")]
    UnexpectedArgumentType {
        func: String,
        index: usize,
        expected: NodeType,
    },
    #[error("Got group of unknown type: {group_type}")]
    UnknownGroupType { group_type: NodeType },
    #[error("Unknown type of space: {name}")]
    UnknownSpaceType { name: String },
    #[error("Unknown stretchy element: {label}")]
    UnknownStretchyElement { label: String },
    #[error("Unknown accent: {label}")]
    UnknownAccent { label: String },
    #[error("Unknown math class: {class}")]
    UnknownMathClass { class: String },
    #[error("Missing definition for '{name}'")]
    MissingDefinition { name: String },
    #[error("Command {name} not trusted")]
    CommandNotTrusted { name: String },
    #[error("LaTeX-incompatible input and strict mode is set to 'error': {message} [{code}]")]
    StrictModeError { message: String, code: String },
    #[error("Expected {node} node")]
    ExpectedNode { node: NodeType },
    #[error("Failed to write markup")]
    MarkupWriteFailure,
    #[error("Failed to create DOM node: {message}")]
    DomCreationFailure { message: String },
    #[error(transparent)]
    EnumParse(#[from] strum::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_command() {
        let err = ParseError::with_command(
            ParseErrorKind::InvalidUnit {
                unit: "zz".to_owned(),
            },
            r"\kern",
        );
        assert_eq!(err.to_string(), r"ParseError: Invalid unit: 'zz' (in \kern)");
        assert_eq!(err.command(), Some(r"\kern"));
    }

    #[test]
    fn first_command_wins() {
        let err = ParseError::new(ParseErrorKind::MarkupWriteFailure)
            .in_command(r"\hat")
            .in_command(r"\mathbin");
        assert_eq!(err.command(), Some(r"\hat"));
    }

    #[test]
    fn trust_rejection_is_distinct() {
        let trust = ParseError::new(ParseErrorKind::CommandNotTrusted {
            name: r"\includegraphics".to_owned(),
        });
        let size = ParseError::new(ParseErrorKind::InvalidIncludeGraphicsSize {
            size: "abc".to_owned(),
        });
        assert!(trust.is_trust_rejection());
        assert!(!size.is_trust_rejection());
        assert!(!size.is_configuration_error());
    }
}
