//! Composites stored as a dedicated child element
//!
//! `<pos x="1" y="2" />` rather than `pos_x="1" pos_y="2"` on the parent.
//! Attribute names are the bare field suffixes.

use crate::codec::Composite;
use crate::dom::{Document, NodeId};
use crate::text::TextValue;

/// Append a child `name` under `parent` holding `value`
pub fn append_value_node<C: Composite>(
    doc: &mut Document,
    parent: NodeId,
    name: &str,
    value: &C,
) -> Option<NodeId> {
    let id = doc.append_child(parent, name)?;
    for i in 0..C::ARITY {
        if let Some(field) = value.field(i) {
            doc.append_attribute(id, &C::suffix(i), field.to_text());
        }
    }
    Some(id)
}

/// Read the first child `name` of `parent` into `out`
///
/// Returns `false` without touching `out` when there is no such child, and
/// otherwise whether every field attribute was present.
pub fn read_value_node<C: Composite>(
    doc: &Document,
    parent: NodeId,
    name: &str,
    out: &mut C,
) -> bool {
    let Some(id) = doc.first_child(parent, name) else {
        return false;
    };
    let mut found_all = true;
    for i in 0..C::ARITY {
        let found = match (doc.attribute(id, &C::suffix(i)), out.field_mut(i)) {
            (Some(text), Some(slot)) => {
                *slot = C::Field::parse_text(text);
                true
            }
            _ => false,
        };
        found_all &= found;
    }
    found_all
}
