use core::fmt;

use alloc::sync::Arc;
use bon::bon;

use crate::font_profile::{FontProfile, StandardFontProfile};
use crate::namespace::KeyMap;
use crate::types::{ParseError, ParseErrorKind};
use crate::utils::protocol_from_url;

/// Levels of strictness for LaTeX compatibility checking.
///
/// Strictness only affects soft warnings: constructs that LaTeX itself would
/// accept with a warning. Hard validation failures are raised regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictMode {
    /// Ignore non-standard input silently.
    Ignore,
    /// Log a warning through the `log` facade and continue.
    Warn,
    /// Turn the warning into a [`ParseErrorKind::StrictModeError`].
    Error,
}

/// Upper bound on user-specified dimensions, as an `[em, pt]` pair.
///
/// A negative em bound collapses every positive dimension to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxSize {
    /// Ceiling for font-relative lengths.
    pub em: f64,
    /// Ceiling for absolute lengths.
    pub pt: f64,
}

impl Default for MaxSize {
    fn default() -> Self {
        Self {
            em: f64::INFINITY,
            pt: f64::INFINITY,
        }
    }
}

/// Read-only configuration consulted while constructing and building nodes.
///
/// Settings are fixed once a [`crate::MathContext`] is created and are shared
/// by every conversion that context performs.
#[derive(Clone)]
pub struct Settings {
    /// Whether expressions are built in display (block) mode.
    pub display_mode: bool,
    /// Configuration for strict LaTeX compatibility checking.
    pub strict: StrictSetting,
    /// Trust policy for constructs that reference external resources.
    pub trust: TrustSetting,
    /// Maximum allowed size for user dimensions.
    pub max_size: MaxSize,
    /// Externally supplied definitions (vector path payloads and the like),
    /// looked up by name.
    pub definitions: KeyMap<String, String>,
    /// Glyph-shape heuristics used for accent placement.
    pub font_profile: Arc<dyn FontProfile>,
    /// Color applied to the whole expression.
    pub color: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("display_mode", &self.display_mode)
            .field("strict", &self.strict)
            .field("trust", &self.trust)
            .field("max_size", &self.max_size)
            .field("definitions", &self.definitions.len())
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

#[bon]
impl Settings {
    /// Creates a new [`Settings`] instance from optional configuration values.
    ///
    /// # Default Values
    /// - `display_mode`: `false`
    /// - `strict`: `StrictSetting::Mode(StrictMode::Warn)`
    /// - `trust`: `TrustSetting::Bool(false)`
    /// - `max_size`: unbounded
    /// - `definitions`: empty
    /// - `font_profile`: [`StandardFontProfile`]
    #[must_use]
    #[builder]
    pub fn new(
        /// Display mode (true for block, false for inline).
        display_mode: Option<bool>,
        /// Strict mode configuration.
        strict: Option<StrictSetting>,
        /// Trust configuration for external resources.
        trust: Option<TrustSetting>,
        /// Maximum allowed size.
        max_size: Option<MaxSize>,
        /// External definitions keyed by name.
        definitions: Option<KeyMap<String, String>>,
        /// Accent placement heuristics.
        font_profile: Option<Arc<dyn FontProfile>>,
        /// Color for the whole expression.
        color: Option<String>,
    ) -> Self {
        Self {
            display_mode: display_mode.unwrap_or(false),
            strict: strict.unwrap_or_default(),
            trust: trust.unwrap_or_default(),
            max_size: max_size.unwrap_or_default(),
            definitions: definitions.unwrap_or_default(),
            font_profile: font_profile.unwrap_or_else(|| Arc::new(StandardFontProfile)),
            color,
        }
    }

    /// Reports non-standard LaTeX input according to the current strict
    /// settings.
    ///
    /// # Behavior by Strict Mode
    /// - [`StrictMode::Ignore`]: silently accepts the input.
    /// - [`StrictMode::Warn`]: logs a warning and accepts the input.
    /// - [`StrictMode::Error`]: returns an error rejecting the input.
    pub fn report_nonstrict(&self, error_code: &str, error_msg: &str) -> Result<(), ParseError> {
        match self.resolve_strict(error_code, error_msg) {
            StrictMode::Ignore => Ok(()),
            StrictMode::Error => Err(ParseError::new(ParseErrorKind::StrictModeError {
                message: error_msg.to_owned(),
                code: error_code.to_owned(),
            })),
            StrictMode::Warn => {
                log::warn!(
                    "LaTeX-incompatible input and strict mode is set to 'warn': {error_msg} [{error_code}]"
                );
                Ok(())
            }
        }
    }

    /// Whether strict behavior is on at all, independent of any particular
    /// violation.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        !matches!(
            self.strict,
            StrictSetting::Mode(StrictMode::Ignore) | StrictSetting::Bool(false)
        )
    }

    /// Evaluates whether a construct referencing an external resource should
    /// be trusted.
    ///
    /// If `context.url` is set and no protocol is given, the protocol is
    /// inferred from the URL; a malformed protocol is never trusted.
    pub fn is_trusted(&self, context: &mut TrustContext) -> bool {
        if context.protocol.is_none()
            && let Some(url) = &context.url
        {
            if let Some(protocol) = protocol_from_url(url) {
                context.protocol = Some(protocol);
            } else {
                return false;
            }
        }

        match &self.trust {
            TrustSetting::Bool(b) => *b,
            TrustSetting::Function(f) => f(context).unwrap_or(false),
        }
    }

    /// Looks up an external definition by name.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(String::as_str)
    }

    fn resolve_strict(&self, error_code: &str, error_msg: &str) -> StrictMode {
        match &self.strict {
            StrictSetting::Mode(m) => *m,
            StrictSetting::Bool(b) => bool_to_mode(*b),
            StrictSetting::Function(f) => match f(error_code, error_msg) {
                Some(StrictReturn::Mode(m)) => m,
                Some(StrictReturn::Bool(b)) => bool_to_mode(b),
                None => StrictMode::Ignore,
            },
        }
    }
}

const fn bool_to_mode(b: bool) -> StrictMode {
    if b {
        StrictMode::Error
    } else {
        StrictMode::Ignore
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Return type for strict validation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictReturn {
    /// `true` maps to [`StrictMode::Error`], `false` to
    /// [`StrictMode::Ignore`].
    Bool(bool),
    /// Explicit strict mode.
    Mode(StrictMode),
}

/// Function signature for custom strict mode evaluation: receives the error
/// code and message.
pub type StrictFunction = dyn Fn(&str, &str) -> Option<StrictReturn> + Send + Sync;

/// Configuration for strict mode behavior.
#[derive(Clone)]
pub enum StrictSetting {
    /// Fixed strict mode level applied to all inputs.
    Mode(StrictMode),
    /// `true` maps to [`StrictMode::Error`], `false` to
    /// [`StrictMode::Ignore`].
    Bool(bool),
    /// Custom function deciding per violation.
    Function(Arc<StrictFunction>),
}

impl fmt::Debug for StrictSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(m) => write!(f, "StrictSetting::Mode({m:?})"),
            Self::Bool(b) => write!(f, "StrictSetting::Bool({b})"),
            Self::Function(_) => write!(f, "StrictSetting::Function(<fn>)"),
        }
    }
}

impl Default for StrictSetting {
    fn default() -> Self {
        Self::Mode(StrictMode::Warn)
    }
}

/// Description of an external resource a construct wants to embed, handed to
/// the trust predicate.
#[derive(Debug, Clone, Default)]
pub struct TrustContext {
    /// The command that triggered the trust check (e.g. `\includegraphics`).
    pub command: String,
    /// URL involved in the trust decision.
    pub url: Option<String>,
    /// Protocol inferred from the URL (`https`, `data`, `_relative`, ...).
    pub protocol: Option<String>,
}

/// Function signature for custom trust evaluation.
pub type TrustFunction = dyn Fn(&mut TrustContext) -> Option<bool> + Send + Sync;

/// Trust policy for constructs referencing external resources.
#[derive(Clone)]
pub enum TrustSetting {
    /// Blanket allow or deny.
    Bool(bool),
    /// Context-aware decision; `None` means "not trusted".
    Function(Arc<TrustFunction>),
}

impl fmt::Debug for TrustSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "TrustSetting::Bool({b})"),
            Self::Function(_) => write!(f, "TrustSetting::Function(<fn>)"),
        }
    }
}

impl Default for TrustSetting {
    fn default() -> Self {
        Self::Bool(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_nonstrict_by_mode() {
        let ignore = Settings::builder()
            .strict(StrictSetting::Mode(StrictMode::Ignore))
            .build();
        assert!(ignore.report_nonstrict("code", "msg").is_ok());
        assert!(!ignore.is_strict());

        let warn = Settings::builder()
            .strict(StrictSetting::Mode(StrictMode::Warn))
            .build();
        assert!(warn.report_nonstrict("code", "msg").is_ok());
        assert!(warn.is_strict());

        let error = Settings::builder().strict(StrictSetting::Bool(true)).build();
        let err = error.report_nonstrict("code", "msg").unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::StrictModeError { ref code, .. } if code == "code"
        ));
    }

    #[test]
    fn strict_function_decides_per_code() {
        let settings = Settings::builder()
            .strict(StrictSetting::Function(Arc::new(|code, _| {
                (code == "mathVsTextUnits").then_some(StrictReturn::Bool(true))
            })))
            .build();
        assert!(settings.report_nonstrict("mathVsTextUnits", "x").is_err());
        assert!(settings.report_nonstrict("other", "x").is_ok());
    }

    #[test]
    fn trust_function_sees_protocol() {
        let settings = Settings::builder()
            .trust(TrustSetting::Function(Arc::new(|ctx| {
                Some(ctx.protocol.as_deref() == Some("https"))
            })))
            .build();
        let mut ok = TrustContext {
            command: r"\includegraphics".to_owned(),
            url: Some("https://example.com/a.png".to_owned()),
            protocol: None,
        };
        assert!(settings.is_trusted(&mut ok));
        let mut bad = TrustContext {
            command: r"\includegraphics".to_owned(),
            url: Some("javascript:alert(1)".to_owned()),
            protocol: None,
        };
        assert!(!settings.is_trusted(&mut bad));
    }

    #[test]
    fn untrusted_by_default() {
        let mut ctx = TrustContext {
            command: r"\includegraphics".to_owned(),
            url: Some("a.png".to_owned()),
            protocol: None,
        };
        assert!(!Settings::default().is_trusted(&mut ctx));
        assert_eq!(ctx.protocol.as_deref(), Some("_relative"));
    }
}
