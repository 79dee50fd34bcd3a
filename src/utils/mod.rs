//! String helpers shared by both output node families.

use core::fmt;

/// Converts a camelCase style property name to its hyphenated CSS form.
///
/// # Examples
/// ```
/// use mathml_builder::utils::hyphenate;
///
/// assert_eq!(hyphenate("mathDepth"), "math-depth");
/// assert_eq!(hyphenate("color"), "color");
/// ```
#[must_use]
pub fn hyphenate(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Escapes the five XML-significant characters.
///
/// # Examples
/// ```
/// use mathml_builder::utils::escape;
///
/// assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape("'q'"), "&#x27;q&#x27;");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_into(&mut escaped, text);
    escaped
}

/// Writes the escaped form of `text` into `writer` without an intermediate
/// allocation.
#[inline]
pub fn escape_into<W: fmt::Write>(writer: &mut W, text: &str) -> fmt::Result {
    let mut last = 0;
    for (idx, ch) in text.char_indices() {
        let replacement = match ch {
            '&' => "&amp;",
            '>' => "&gt;",
            '<' => "&lt;",
            '"' => "&quot;",
            '\'' => "&#x27;",
            _ => continue,
        };
        writer.write_str(&text[last..idx])?;
        writer.write_str(replacement)?;
        last = idx + ch.len_utf8();
    }
    writer.write_str(&text[last..])
}

/// Joins class names with single spaces, dropping empty entries.
#[must_use]
pub fn create_class(classes: &[String]) -> String {
    let mut out = String::new();
    for class in classes.iter().filter(|c| !c.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(class);
    }
    out
}

/// Extracts the lowercase scheme of a URL.
///
/// Returns `Some("_relative")` for URLs without a scheme and `None` when the
/// scheme is malformed or the colon is spelled as an HTML entity (a common
/// way to smuggle `javascript:` past naive filters).
///
/// # Examples
/// ```
/// use mathml_builder::utils::protocol_from_url;
///
/// assert_eq!(protocol_from_url("https://example.com").as_deref(), Some("https"));
/// assert_eq!(protocol_from_url("img/a.png").as_deref(), Some("_relative"));
/// assert_eq!(protocol_from_url("java&#58;script:x"), None);
/// ```
#[must_use]
pub fn protocol_from_url(url: &str) -> Option<String> {
    let s = url.trim_start_matches(|c: char| c <= '\u{20}');
    for (i, ch) in s.char_indices() {
        match ch {
            ':' => return validate_scheme(&s[..i]),
            '&' if is_colon_entity(&s[i..]) => return None,
            '\\' | '/' | '#' | '?' => break,
            _ => {}
        }
    }
    Some("_relative".to_owned())
}

fn is_colon_entity(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    if lower.starts_with("&colon") {
        return true;
    }
    let Some(num) = lower.strip_prefix("&#") else {
        return false;
    };
    if let Some(hex) = num.strip_prefix('x') {
        hex.trim_start_matches('0').starts_with("3a")
    } else {
        num.trim_start_matches('0').starts_with("58")
    }
}

fn validate_scheme(scheme: &str) -> Option<String> {
    let mut chars = scheme.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some(scheme.to_ascii_lowercase())
}

/// The final path segment of `src` without its extension.
#[must_use]
pub fn file_stem(src: &str) -> &str {
    let name = src.rsplit(['/', '\\']).next().unwrap_or(src);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}
