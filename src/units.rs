//! Dimension literals and unit conversion
//!
//! This module validates TeX dimensions and converts them into lengths the
//! output tree can carry:
//! - [`size_data`] parses a user literal such as `1.5cm` or a bare `12`
//! - [`calculate_size`] converts a [`Measurement`] for the current script
//!   level
//! - [`make_em`] formats a number as an em string rounded to 4 decimals

use crate::options::Options;
use crate::types::{ParseError, ParseErrorKind};

/// A number paired with a TeX unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Numeric value of the measurement
    pub number: f64,
    /// Unit of measurement (e.g., "mu", "em", "pt")
    pub unit: String,
}

impl Measurement {
    /// Create a measurement
    #[must_use]
    pub fn new(number: f64, unit: impl Into<String>) -> Self {
        Self {
            number,
            unit: unit.into(),
        }
    }

    /// CSS length for this measurement (`1.5em`, `12pt`...).
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("{}{}", format_number(self.number), self.unit)
    }
}

/// Units accepted anywhere a dimension is expected.
pub const VALID_UNITS: [&str; 15] = [
    "em", "ex", "mu", "pt", "mm", "cm", "in", "px", "bp", "pc", "dd", "cc", "nd", "nc", "sp",
];

/// CSS points per unit for the units converted to `pt`, and the inverse
/// factor for the absolute CSS units.
fn pt_per_unit(unit: &str) -> Option<f64> {
    // https://en.wikibooks.org/wiki/LaTeX/Lengths
    let ratio = 800.0 / 803.0; // TeX point to PostScript point
    match unit {
        "pt" => Some(ratio),
        "pc" => Some(12.0 * ratio),                // pica
        "dd" => Some(1238.0 / 1157.0 * ratio),     // didot
        "cc" => Some(14856.0 / 1157.0 * ratio),    // cicero (12 didot)
        "nd" => Some(685.0 / 642.0 * ratio),       // new didot
        "nc" => Some(1370.0 / 107.0 * ratio),      // new cicero (12 new didot)
        "sp" => Some(1.0 / 65536.0 * ratio),       // scaled point
        "mm" => Some(25.4 / 72.0),
        "cm" => Some(2.54 / 72.0),
        "in" => Some(1.0 / 72.0),
        "px" => Some(96.0 / 72.0),
        _ => None,
    }
}

/// Check whether a unit string is a recognized length unit.
#[must_use]
pub fn valid_unit(unit: &str) -> bool {
    VALID_UNITS.contains(&unit)
}

/// Font scale of a script level: level 0 and 1 are full size, 2 is 70%, 3 is
/// 50%.
#[must_use]
pub fn em_scale(level: u8) -> f64 {
    match level.saturating_sub(1) {
        0 => 1.0,
        1 => 0.7,
        _ => 0.5,
    }
}

/// Round to 4 decimal places.
#[must_use]
pub fn round4(n: f64) -> f64 {
    (n * 10_000.0).round() / 10_000.0
}

/// Convert a measurement into a length usable at the level of `options`.
///
/// Font-relative units come back in `em`, TeX absolute units in `pt`, and
/// CSS absolute units (`mm`, `cm`, `in`, `px`) unchanged. Values are capped at
/// the configured maximum size.
pub fn calculate_size(size: &Measurement, options: &Options) -> Result<Measurement, ParseError> {
    let max = options.max_size;
    let mut number = size.number;
    if max.em < 0.0 && number > 0.0 {
        return Ok(Measurement::new(0.0, "em"));
    }

    let unit = size.unit.as_str();
    match unit {
        "mm" | "cm" | "in" | "px" => {
            let per = pt_per_unit(unit).unwrap_or(1.0);
            if number / per > max.pt {
                return Ok(Measurement::new(max.pt, "pt"));
            }
            Ok(Measurement::new(number, unit))
        }
        "em" | "ex" => {
            if unit == "ex" {
                number *= 0.431;
            }
            number = f64::min(number / em_scale(options.level), max.em);
            Ok(Measurement::new(round4(number), "em"))
        }
        "bp" => Ok(Measurement::new(f64::min(number, max.pt), "pt")),
        "pt" | "pc" | "dd" | "cc" | "nd" | "nc" | "sp" => {
            let per = pt_per_unit(unit).unwrap_or(1.0);
            number = f64::min(number * per, max.pt);
            Ok(Measurement::new(round4(number), "pt"))
        }
        "mu" => {
            number = f64::min(number / 18.0, max.em);
            Ok(Measurement::new(round4(number), "em"))
        }
        other => Err(ParseError::new(ParseErrorKind::InvalidUnit {
            unit: other.to_owned(),
        })),
    }
}

/// Parse a dimension literal.
///
/// A bare number is taken in `bp`. Otherwise the first `[+-]? number unit`
/// run is used, where the unit is two lowercase letters.
pub fn size_data(text: &str) -> Result<Measurement, ParseError> {
    if let Some(number) = parse_bare_number(text) {
        return Ok(Measurement::new(number, "bp"));
    }

    let found = text
        .char_indices()
        .find_map(|(start, _)| match_dimension(&text[start..]));
    let Some((number, unit)) = found else {
        return Err(ParseError::with_command(
            ParseErrorKind::InvalidIncludeGraphicsSize {
                size: text.to_owned(),
            },
            r"\includegraphics",
        ));
    };
    if !valid_unit(unit) {
        return Err(ParseError::with_command(
            ParseErrorKind::InvalidIncludeGraphicsUnit {
                unit: unit.to_owned(),
            },
            r"\includegraphics",
        ));
    }
    Ok(Measurement::new(number, unit))
}

/// Splits an optional sign (with trailing spaces) off `s`.
fn split_sign(s: &str) -> (f64, &str) {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => return (1.0, s),
    };
    (sign, rest.trim_start_matches(' '))
}

/// Length of the longest `\d+(\.\d*)?|\.\d+` prefix of `s`.
fn numeral_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let int = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if bytes.get(int) != Some(&b'.') {
        return int;
    }
    let frac = bytes[int + 1..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if int == 0 && frac == 0 { 0 } else { int + 1 + frac }
}

fn parse_bare_number(text: &str) -> Option<f64> {
    let (sign, rest) = split_sign(text);
    let len = numeral_len(rest);
    if len == 0 || len != rest.len() {
        return None;
    }
    rest.parse::<f64>().ok().map(|n| sign * n)
}

fn match_dimension(s: &str) -> Option<(f64, &str)> {
    let (sign, rest) = split_sign(s);
    let len = numeral_len(rest);
    if len == 0 {
        return None;
    }
    let number = rest[..len].parse::<f64>().ok()?;
    let tail = rest[len..].trim_start_matches(' ');
    let unit = tail.get(..2)?;
    unit.bytes()
        .all(|b| b.is_ascii_lowercase())
        .then_some((sign * number, unit))
}

/// Format with at most 4 decimals, dropping trailing zeros.
#[must_use]
pub fn format_number(n: f64) -> String {
    let mut s = format!("{n:.4}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        "0".clone_into(&mut s);
    }
    s
}

/// Round to 4 decimal places and append "em", dropping trailing zeros.
#[must_use]
pub fn make_em(n: f64) -> String {
    let mut s = format_number(n);
    s.push_str("em");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MaxSize;

    fn at_level(level: u8) -> Options {
        Options::builder().level(level).build()
    }

    #[test]
    fn test_valid_unit() {
        for unit in VALID_UNITS {
            assert!(valid_unit(unit));
        }
        assert!(!valid_unit("zz"));
        assert!(!valid_unit("EM"));
    }

    #[test]
    fn test_make_em_rounding() {
        assert_eq!(make_em(1.0), "1em");
        assert_eq!(make_em(1.23456), "1.2346em");
        assert_eq!(make_em(0.00004), "0em");
        assert_eq!(make_em(-0.00004), "0em");
        assert_eq!(make_em(0.2222), "0.2222em");
    }

    #[test]
    fn em_scale_by_level() {
        assert_eq!(em_scale(0), 1.0);
        assert_eq!(em_scale(1), 1.0);
        assert_eq!(em_scale(2), 0.7);
        assert_eq!(em_scale(3), 0.5);
    }

    #[test]
    fn size_data_cases() {
        assert_eq!(size_data("12").unwrap(), Measurement::new(12.0, "bp"));
        assert_eq!(size_data("1.5cm").unwrap(), Measurement::new(1.5, "cm"));
        assert_eq!(size_data("- 2 em").unwrap(), Measurement::new(-2.0, "em"));
        assert_eq!(size_data(".5").unwrap(), Measurement::new(0.5, "bp"));

        let bad = size_data("abc").unwrap_err();
        assert!(matches!(
            *bad.kind,
            ParseErrorKind::InvalidIncludeGraphicsSize { .. }
        ));
        assert_eq!(bad.command(), Some(r"\includegraphics"));

        let unit = size_data("3zz").unwrap_err();
        assert!(matches!(
            *unit.kind,
            ParseErrorKind::InvalidIncludeGraphicsUnit { ref unit } if unit == "zz"
        ));
    }

    #[test]
    fn relative_units_scale_with_level() {
        let m = Measurement::new(1.4, "em");
        assert_eq!(calculate_size(&m, &at_level(1)).unwrap().number, 1.4);
        assert_eq!(calculate_size(&m, &at_level(2)).unwrap().number, 2.0);

        let ex = calculate_size(&Measurement::new(1.0, "ex"), &at_level(0)).unwrap();
        assert_eq!(ex, Measurement::new(0.431, "em"));

        let mu = calculate_size(&Measurement::new(18.0, "mu"), &at_level(3)).unwrap();
        assert_eq!(mu, Measurement::new(1.0, "em"));
    }

    #[test]
    fn absolute_units() {
        let opts = at_level(0);
        let cm = calculate_size(&Measurement::new(2.0, "cm"), &opts).unwrap();
        assert_eq!(cm, Measurement::new(2.0, "cm"));
        let bp = calculate_size(&Measurement::new(3.0, "bp"), &opts).unwrap();
        assert_eq!(bp, Measurement::new(3.0, "pt"));
        let pt = calculate_size(&Measurement::new(803.0, "pt"), &opts).unwrap();
        assert_eq!(pt, Measurement::new(800.0, "pt"));
        assert!(calculate_size(&Measurement::new(1.0, "zz"), &opts).is_err());
    }

    #[test]
    fn max_size_caps() {
        let opts = Options::builder()
            .max_size(MaxSize { em: 2.0, pt: 10.0 })
            .build();
        let em = calculate_size(&Measurement::new(5.0, "em"), &opts).unwrap();
        assert_eq!(em.number, 2.0);
        let cm = calculate_size(&Measurement::new(100.0, "cm"), &opts).unwrap();
        assert_eq!(cm, Measurement::new(10.0, "pt"));

        let negative = Options::builder()
            .max_size(MaxSize { em: -1.0, pt: 10.0 })
            .build();
        let zero = calculate_size(&Measurement::new(5.0, "pt"), &negative).unwrap();
        assert_eq!(zero, Measurement::new(0.0, "em"));
    }
}
