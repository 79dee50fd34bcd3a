//! Symbol vocabulary: parsing modes, atom families and the control-sequence
//! to Unicode replacement tables used when turning token text into output
//! text.

use phf::phf_map;
use strum::{AsRefStr, Display, EnumString};

/// The two parsing modes a node can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Mathematical content.
    Math,
    /// Running text inside or around math.
    Text,
}

/// TeX atom families an `atom` node can carry.
///
/// Ordinary symbols are not atoms; they arrive as `mathord`/`textord` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Atom {
    /// Binary operators such as `+` or `\times`.
    Bin,
    /// Closing delimiters such as `)`.
    Close,
    /// Inner constructs such as `\ldots` between delimiters.
    Inner,
    /// Opening delimiters such as `(`.
    Open,
    /// Punctuation such as `,`.
    Punct,
    /// Relations such as `=` or `\leq`.
    Rel,
}

/// Control sequences valid in math mode and the text they render as.
static MATH_REPLACEMENTS: phf::Map<&'static str, &'static str> = phf_map! {
    // Greek lower case
    "\\alpha" => "\u{3b1}", "\\beta" => "\u{3b2}", "\\gamma" => "\u{3b3}",
    "\\delta" => "\u{3b4}", "\\epsilon" => "\u{3f5}", "\\varepsilon" => "\u{3b5}",
    "\\zeta" => "\u{3b6}", "\\eta" => "\u{3b7}", "\\theta" => "\u{3b8}",
    "\\vartheta" => "\u{3d1}", "\\iota" => "\u{3b9}", "\\kappa" => "\u{3ba}",
    "\\lambda" => "\u{3bb}", "\\mu" => "\u{3bc}", "\\nu" => "\u{3bd}",
    "\\xi" => "\u{3be}", "\\pi" => "\u{3c0}", "\\varpi" => "\u{3d6}",
    "\\rho" => "\u{3c1}", "\\varrho" => "\u{3f1}", "\\sigma" => "\u{3c3}",
    "\\varsigma" => "\u{3c2}", "\\tau" => "\u{3c4}", "\\upsilon" => "\u{3c5}",
    "\\phi" => "\u{3d5}", "\\varphi" => "\u{3c6}", "\\chi" => "\u{3c7}",
    "\\psi" => "\u{3c8}", "\\omega" => "\u{3c9}",
    // Greek upper case
    "\\Gamma" => "\u{393}", "\\Delta" => "\u{394}", "\\Theta" => "\u{398}",
    "\\Lambda" => "\u{39b}", "\\Xi" => "\u{39e}", "\\Pi" => "\u{3a0}",
    "\\Sigma" => "\u{3a3}", "\\Upsilon" => "\u{3a5}", "\\Phi" => "\u{3a6}",
    "\\Psi" => "\u{3a8}", "\\Omega" => "\u{3a9}",
    // Ordinary symbols
    "\\infty" => "\u{221e}", "\\partial" => "\u{2202}", "\\nabla" => "\u{2207}",
    "\\prime" => "\u{2032}", "\\ell" => "\u{2113}", "\\hbar" => "\u{210f}",
    "\\emptyset" => "\u{2205}", "\\forall" => "\u{2200}", "\\exists" => "\u{2203}",
    "\\neg" => "\u{ac}", "\\imath" => "\u{131}", "\\jmath" => "\u{237}",
    // Binary operators
    "\\pm" => "\u{b1}", "\\mp" => "\u{2213}", "\\times" => "\u{d7}",
    "\\div" => "\u{f7}", "\\cdot" => "\u{22c5}", "\\ast" => "\u{2217}",
    "\\circ" => "\u{2218}", "\\bullet" => "\u{2219}", "\\cup" => "\u{222a}",
    "\\cap" => "\u{2229}", "\\wedge" => "\u{2227}", "\\vee" => "\u{2228}",
    "\\oplus" => "\u{2295}", "\\otimes" => "\u{2297}", "\\setminus" => "\u{2216}",
    // Relations
    "\\leq" => "\u{2264}", "\\le" => "\u{2264}", "\\geq" => "\u{2265}",
    "\\ge" => "\u{2265}", "\\neq" => "\u{2260}", "\\ne" => "\u{2260}",
    "\\equiv" => "\u{2261}", "\\approx" => "\u{2248}", "\\sim" => "\u{223c}",
    "\\simeq" => "\u{2243}", "\\cong" => "\u{2245}", "\\propto" => "\u{221d}",
    "\\in" => "\u{2208}", "\\notin" => "\u{2209}", "\\ni" => "\u{220b}",
    "\\subset" => "\u{2282}", "\\supset" => "\u{2283}", "\\subseteq" => "\u{2286}",
    "\\supseteq" => "\u{2287}", "\\mid" => "\u{2223}", "\\parallel" => "\u{2225}",
    "\\perp" => "\u{22a5}", "\\to" => "\u{2192}", "\\rightarrow" => "\u{2192}",
    "\\leftarrow" => "\u{2190}", "\\gets" => "\u{2190}", "\\leftrightarrow" => "\u{2194}",
    "\\Rightarrow" => "\u{21d2}", "\\Leftarrow" => "\u{21d0}", "\\Leftrightarrow" => "\u{21d4}",
    "\\mapsto" => "\u{21a6}", "\\iff" => "\u{27fa}", "\\implies" => "\u{27f9}",
    // Delimiters and punctuation
    "\\lbrace" => "{", "\\rbrace" => "}", "\\{" => "{", "\\}" => "}",
    "\\langle" => "\u{27e8}", "\\rangle" => "\u{27e9}", "\\lvert" => "|",
    "\\rvert" => "|", "\\lVert" => "\u{2225}", "\\rVert" => "\u{2225}",
    "\\lfloor" => "\u{230a}", "\\rfloor" => "\u{230b}", "\\lceil" => "\u{2308}",
    "\\rceil" => "\u{2309}", "\\colon" => ":", "\\ldotp" => ".", "\\cdotp" => "\u{22c5}",
    "\\ldots" => "\u{2026}", "\\cdots" => "\u{22ef}", "\\vdots" => "\u{22ee}",
    "\\ddots" => "\u{22f1}",
    // Escaped ASCII
    "\\#" => "#", "\\$" => "$", "\\%" => "%", "\\&" => "&", "\\_" => "_",
    "-" => "\u{2212}", "*" => "\u{2217}",
};

/// Control sequences and ligatures valid in text mode.
static TEXT_REPLACEMENTS: phf::Map<&'static str, &'static str> = phf_map! {
    "\\#" => "#", "\\$" => "$", "\\%" => "%", "\\&" => "&", "\\_" => "_",
    "\\{" => "{", "\\}" => "}", "\\textbackslash" => "\\",
    "\\textasciitilde" => "~", "\\textasciicircum" => "^",
    "\\textendash" => "\u{2013}", "\\textemdash" => "\u{2014}",
    "\\textquoteleft" => "\u{2018}", "\\textquoteright" => "\u{2019}",
    "\\textquotedblleft" => "\u{201c}", "\\textquotedblright" => "\u{201d}",
    "\\ldots" => "\u{2026}", "\\textellipsis" => "\u{2026}",
    "\\ss" => "\u{df}", "\\ae" => "\u{e6}", "\\oe" => "\u{153}", "\\o" => "\u{f8}",
    "\\AE" => "\u{c6}", "\\OE" => "\u{152}", "\\O" => "\u{d8}",
    "\\i" => "\u{131}", "\\j" => "\u{237}",
    "--" => "\u{2013}", "---" => "\u{2014}", "``" => "\u{201c}", "''" => "\u{201d}",
};

/// Looks up the output text for a control sequence or ligature in `mode`.
///
/// Returns `None` when the token renders as itself.
#[must_use]
pub fn replacement(mode: Mode, text: &str) -> Option<&'static str> {
    match mode {
        Mode::Math => MATH_REPLACEMENTS.get(text).copied(),
        Mode::Text => TEXT_REPLACEMENTS.get(text).copied(),
    }
}

/// Output text for a token, falling back to the token itself.
#[must_use]
pub fn resolve_text(mode: Mode, text: &str) -> &str {
    replacement(mode, text).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_control_sequences_per_mode() {
        assert_eq!(replacement(Mode::Math, "\\alpha"), Some("\u{3b1}"));
        assert_eq!(replacement(Mode::Text, "\\alpha"), None);
        assert_eq!(replacement(Mode::Text, "--"), Some("\u{2013}"));
        assert_eq!(resolve_text(Mode::Math, "x"), "x");
        assert_eq!(resolve_text(Mode::Math, "-"), "\u{2212}");
    }

    #[test]
    fn atom_family_names() {
        use core::str::FromStr as _;
        assert_eq!(Atom::Punct.as_ref(), "punct");
        assert_eq!(Atom::from_str("rel"), Ok(Atom::Rel));
        assert_eq!(Mode::Math.to_string(), "math");
    }
}
