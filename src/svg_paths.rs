//! Built-in path data for the two-cap stretchy drawings
//!
//! Every drawing lives in a `400000 x H` view box, where `H` is the height of
//! the stretchy construct in thousandths of an em. Left caps start at `x = 0`
//! and run the full width; right caps end at `x = 400000`. Clipping each half
//! to 50% of the wrapper hides the unused end of the shaft.
//!
//! A definition named `\@svgpath@<name>` in
//! [`Settings::definitions`](crate::Settings::definitions) takes precedence
//! over the entries here.

use phf::{Map, phf_map};

/// Prefix of the definition names that override built-in path data.
pub const DEFINITION_PREFIX: &str = "\\@svgpath@";

/// Path data by drawing name.
pub static SVG_PATHS: Map<&'static str, &'static str> = phf_map! {
    // Line segments with end ticks, height 522
    "leftlinesegment" => "M40 281 V428 H0 V94 H40 V241 H400000 v40z",
    "rightlinesegment" => "M399960 241 V94 h40 V428 h-40 V281 H0 v-40z",

    // Upper long harpoon over a short lower harpoon, height 716
    "baraboveshortleftharpoon" => "M0 241 H400000 v40 H0z \
        M760 475 l-420 0 c28 -60 96 -132 184 -180 l18 26 c-58 40 -96 84 -118 114 \
        H400000 v40z",
    "rightharpoonaboveshortbar" => "M399600 241 c-88 -48 -156 -120 -184 -180 \
        l26 -14 c28 56 88 118 176 154 l-18 40 H0 v-40z \
        M399240 475 H0 v40 H399240z",
    "shortbaraboveleftharpoon" => "M400 241 c88 -48 156 -120 184 -180 \
        l-26 -14 c-28 56 -88 118 -176 154 l18 40 H400000 v-40z \
        M760 475 H400000 v40 H760z",
    "shortrightharpoonabovebar" => "M399240 241 H0 v40 H399240z \
        M0 475 H399660 c-28 -60 -96 -132 -184 -180 l-18 26 c58 40 96 84 118 114 \
        H0 v40z",

    // Full-length double harpoons, height 716
    "leftharpoonsabove" => "M0 241 H400000 v40 H0z \
        M400 475 c88 48 156 120 184 180 l-26 14 c-28 -56 -88 -118 -176 -154 \
        l18 -40 H400000 v40z",
    "rightharpoonsbelow" => "M399600 241 c-88 -48 -156 -120 -184 -180 \
        l26 -14 c28 56 88 118 176 154 l-18 40 H0 v-40z \
        M0 475 H400000 v40 H0z",
    "rightharpoonsabove" => "M0 241 H400000 v40 H0z \
        M0 475 H400000 v40 H0z \
        M400 475 c88 48 156 120 184 180 l-26 14 c-28 -56 -88 -118 -176 -154z",
    "leftharpoonsbelow" => "M0 241 H400000 v40 H0z \
        M399600 241 c-88 -48 -156 -120 -184 -180 l26 -14 c28 56 88 118 176 154z \
        M0 475 H400000 v40 H0z",
};

/// Definition name that overrides the built-in path `name`.
#[must_use]
pub fn definition_name(name: &str) -> String {
    format!("{DEFINITION_PREFIX}{name}")
}
