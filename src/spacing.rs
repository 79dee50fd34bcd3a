//! TeX inter-atom spacing for class overrides
//!
//! A node given an explicit atom class gets the space TeX would put around an
//! atom of that class next to an ordinary. Rows receive `<mspace>` padding
//! children; a single operator receives `lspace`/`rspace` attributes instead.
//! Operator spacing vanishes from the second script level on.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;

/// The seven TeX atom classes, named after their `\math…` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AtomClass {
    /// Ordinary
    Mord,
    /// Binary operator
    Mbin,
    /// Relation
    Mrel,
    /// Opening delimiter
    Mopen,
    /// Closing delimiter
    Mclose,
    /// Punctuation
    Mpunct,
    /// Inner (fractions, `\left…\right` groups)
    Minner,
}

impl AtomClass {
    /// Space before and after an atom of this class, in em.
    #[must_use]
    pub const fn spacing(self) -> (f64, f64) {
        match self {
            Self::Mord | Self::Mopen | Self::Mclose => (0.0, 0.0),
            Self::Mbin => (0.2222, 0.2222),
            Self::Mrel => (0.2778, 0.2778),
            Self::Mpunct => (0.0, 0.1667),
            Self::Minner => (0.0556, 0.0556),
        }
    }

    /// Whether the class is a delimiter, which keeps its stretchiness.
    #[must_use]
    pub const fn is_fence(self) -> bool {
        matches!(self, Self::Mopen | Self::Mclose)
    }
}

/// `<mspace>` of the given width in em.
#[must_use]
pub fn padding(width: f64) -> MathNode {
    let mut node = MathNode::with_children(MathNodeType::Mspace, Vec::new());
    node.set_attribute("width", format!("{width}em"));
    node
}

/// Applies the spacing of `class` to a built node.
///
/// `mrow` and `mpadded` get padding children. An `mo` gets `lspace`/`rspace`
/// attributes, zeroed when `options` is at script level 2 or deeper. Any
/// other element is left alone. Except for delimiters, the operator
/// dictionary's `stretchy` and `form` are cleared.
pub fn apply_spacing(node: &mut MathNode, class: AtomClass, options: &Options) {
    let do_spacing = options.spacing_enabled();
    match node.node_type {
        MathNodeType::Mrow | MathNodeType::Mpadded => {
            let (left, right) = class.spacing();
            if do_spacing {
                if left > 0.0 {
                    node.children.insert(0, padding(left).into());
                }
                if right > 0.0 {
                    node.children.push(padding(right).into());
                }
            }
        }
        MathNodeType::Mo => set_operator_spacing(node, class, do_spacing),
        _ => {}
    }

    if !class.is_fence() {
        node.attributes.remove("stretchy");
        node.attributes.remove("form");
    }
}

fn set_operator_spacing(node: &mut MathNode, class: AtomClass, do_spacing: bool) {
    let scaled = |value: &'static str| if do_spacing { value } else { "0" };
    match class {
        AtomClass::Mbin => {
            node.set_attribute("lspace", scaled("0.2222em"));
            node.set_attribute("rspace", scaled("0.2222em"));
        }
        AtomClass::Mrel => {
            node.set_attribute("lspace", scaled("0.2778em"));
            node.set_attribute("rspace", scaled("0.2778em"));
        }
        AtomClass::Mpunct => {
            node.set_attribute("lspace", "0em");
            node.set_attribute("rspace", scaled("0.1667em"));
        }
        AtomClass::Mopen | AtomClass::Mclose => {
            node.set_attribute("lspace", "0em");
            node.set_attribute("rspace", "0em");
        }
        AtomClass::Minner => {
            if do_spacing {
                node.set_attribute("lspace", "0.0556em");
                node.set_attribute("width", "+0.1111em");
            }
        }
        AtomClass::Mord => {}
    }
}

/// Whether `node` is a padding element produced by [`padding`].
#[must_use]
pub fn is_padding(node: &MathDomNode) -> bool {
    node.is(MathNodeType::Mspace)
}
