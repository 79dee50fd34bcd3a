//! Glyph-shape heuristics for accent placement
//!
//! Renderers position a non-stretchy accent from the glyph box of its base,
//! which is too tall for x-height letters and too short for ascenders in
//! several math fonts. The accent builder compensates by tagging the output
//! with shim classes that a stylesheet can target. Which characters count as
//! small or tall depends on the font, so the tables sit behind the
//! [`FontProfile`] trait and can be swapped through
//! [`Settings::font_profile`](crate::Settings::font_profile).

use core::fmt::Debug;

use phf::{Set, phf_set};

/// Supplies the shim classes for a non-stretchy accent.
pub trait FontProfile: Debug + Send + Sync {
    /// Classes to add to an accent `mover` whose base is the single character
    /// `base`. `label` is the accent command, e.g. `\hat`.
    fn accent_classes(&self, label: &str, base: &str) -> Vec<String>;
}

/// Shim tables tuned for Latin Modern and STIX-style math fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontProfile;

/// Characters without ascenders.
static SMALL_CHARS: Set<&'static str> = phf_set! {
    "a", "c", "e", "g", "m", "n", "o", "p", "q", "r", "s", "u", "v", "w", "x",
    "y", "z", "\u{131}", "\u{237}", "\u{3b1}", "\u{3b3}", "\u{3b5}", "\u{3b7}",
    "\u{3b9}", "\u{3ba}", "\u{3bc}", "\u{3bd}", "\u{3bf}", "\u{3c0}", "\u{3c1}",
    "\u{3c2}", "\u{3c3}", "\u{3c4}", "\u{3c5}", "\u{3c7}", "\u{3c9}", "\u{3d5}",
};

/// Capitals and lower case letters with ascenders.
static BIG_CHARS: Set<&'static str> = phf_set! {
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "b", "d", "f", "h",
    "k", "l", "t", "\u{393}", "\u{394}", "\u{398}", "\u{39b}", "\u{39e}",
    "\u{3a0}", "\u{3a3}", "\u{3a5}", "\u{3a6}", "\u{3a8}", "\u{3a9}", "\u{3b2}",
    "\u{3b4}", "\u{3b6}", "\u{3b8}", "\u{3bb}", "\u{3c6}", "\u{3c8}",
};

/// Accents WebKit positions from the ink box rather than the advance box.
static NEEDS_WEBKIT_SHIFT: Set<&'static str> = phf_set! {
    "\\acute", "\\check", "\\grave", "\\ddot", "\\dddot", "\\ddddot", "\\tilde",
    "\\bar", "\\breve", "\\hat", "\\vec", "\\dot", "\\mathring",
};

impl FontProfile for StandardFontProfile {
    fn accent_classes(&self, label: &str, base: &str) -> Vec<String> {
        let is_vec = label == "\\vec";
        let needs_shift = NEEDS_WEBKIT_SHIFT.contains(label);
        let postfix = if is_vec {
            "-vec"
        } else if needs_shift {
            "-acc"
        } else {
            ""
        };

        let mut classes = Vec::new();
        if is_vec {
            classes.push("tml-vec".to_owned());
        }
        if SMALL_CHARS.contains(base) {
            classes.push("chr-sml".to_owned());
            classes.push(format!("wbk-sml{postfix}"));
        } else if BIG_CHARS.contains(base) {
            classes.push("chr-big".to_owned());
            classes.push(format!("wbk-big{postfix}"));
        } else if needs_shift {
            classes.push("wbk-acc".to_owned());
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_and_big_bases() {
        let profile = StandardFontProfile;
        assert_eq!(
            profile.accent_classes("\\hat", "x"),
            vec!["chr-sml", "wbk-sml-acc"]
        );
        assert_eq!(
            profile.accent_classes("\\vec", "A"),
            vec!["tml-vec", "chr-big", "wbk-big-vec"]
        );
        assert_eq!(profile.accent_classes("\\hat", "1"), vec!["wbk-acc"]);
        assert!(profile.accent_classes("\\'", "1").is_empty());
    }
}
