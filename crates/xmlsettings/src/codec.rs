//! Typed attribute codec
//!
//! Maps a logical value onto one or more attribute slots of a node:
//!
//! | Kind | Slots for base `B` |
//! |------|--------------------|
//! | scalar | `B` |
//! | [`Vec2`] | `B_x`, `B_y` |
//! | [`Vec4`] | `B_x`, `B_y`, `B_z`, `B_w` |
//! | [`Color`] | `B_r`, `B_g`, `B_b`, `B_a` |
//! | `[T; N]` | `B_v0` .. `B_v{N-1}` |
//!
//! An empty `B` is replaced with [`DEFAULT_BASE`]. Composite encodes write
//! every field, and composite decodes report success only when every slot
//! was present. Fields that were found are written to the output even when
//! the overall decode fails.

pub mod composite;
pub mod name;
pub mod node;
pub mod scalar;

pub use composite::{Color, Composite, Vec2, Vec4};
pub use name::{format_attr_name, DEFAULT_BASE};

use crate::dom::{Document, NodeId};
use crate::text::ScalarKind;

/// Closed set of encodable value kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Scalar(ScalarKind),
    Vec2,
    Vec4,
    Color,
    Array { len: usize },
}

impl ValueKind {
    pub const fn is_composite(self) -> bool {
        !matches!(self, Self::Scalar(_))
    }
}

/// A value with a fixed mapping onto attribute slots
pub trait AttributeValue: Sized {
    const KIND: ValueKind;

    /// Physical attribute names used under `base`, in write order
    fn slot_names(base: &str) -> Vec<String>;

    /// Write every slot of `self` onto `node`
    ///
    /// With `check_duplicates` an existing slot is updated in place, without
    /// it a new attribute is always appended.
    fn encode(&self, doc: &mut Document, node: NodeId, base: &str, check_duplicates: bool);

    /// Read the slots under `base` into `out`
    ///
    /// Returns whether every slot was present. Missing slots take their part
    /// of `default` when one is given and are left untouched otherwise.
    fn decode(
        doc: &Document,
        node: NodeId,
        base: &str,
        out: &mut Self,
        default: Option<&Self>,
    ) -> bool;
}

/// Encode `value` under `base` on `node`
pub fn encode<T: AttributeValue>(
    doc: &mut Document,
    node: NodeId,
    base: &str,
    value: &T,
    check_duplicates: bool,
) {
    value.encode(doc, node, base, check_duplicates);
}

/// Decode the value under `base` on `node` into `out`
pub fn decode<T: AttributeValue>(
    doc: &Document,
    node: NodeId,
    base: &str,
    out: &mut T,
    default: Option<&T>,
) -> bool {
    T::decode(doc, node, base, out, default)
}

/// Whether every slot of a `T` under `base` exists on `node`
pub fn exists<T: AttributeValue>(doc: &Document, node: NodeId, base: &str) -> bool {
    T::slot_names(base)
        .iter()
        .all(|slot| doc.attribute(node, slot).is_some())
}

/// Remove every slot of a `T` under `base`, returning how many were removed
pub fn remove<T: AttributeValue>(doc: &mut Document, node: NodeId, base: &str) -> usize {
    T::slot_names(base)
        .iter()
        .filter(|slot| doc.remove_attribute(node, slot))
        .count()
}
