//! Single-slot scalar encoding

use crate::codec::name::effective_base;
use crate::codec::{AttributeValue, ValueKind};
use crate::dom::{Document, NodeId};
use crate::text::TextValue;

/// Write `value` into the attribute `name`
pub(crate) fn encode_scalar<T: TextValue>(
    doc: &mut Document,
    node: NodeId,
    name: &str,
    value: &T,
    check_duplicates: bool,
) {
    if check_duplicates {
        doc.set_attribute(node, name, value.to_text());
    } else {
        doc.append_attribute(node, name, value.to_text());
    }
}

/// Read the attribute `name` into `out`, falling back to `default`
pub(crate) fn decode_scalar<T: TextValue>(
    doc: &Document,
    node: NodeId,
    name: &str,
    out: &mut T,
    default: Option<&T>,
) -> bool {
    match doc.attribute(node, name) {
        Some(text) => {
            *out = T::parse_text(text);
            true
        }
        None => {
            if let Some(default) = default {
                *out = default.clone();
            }
            false
        }
    }
}

macro_rules! impl_scalar_value {
    ($($ty:ty),*) => {$(
        impl AttributeValue for $ty {
            const KIND: ValueKind = ValueKind::Scalar(<$ty as TextValue>::KIND);

            fn slot_names(base: &str) -> Vec<String> {
                vec![effective_base(base).to_string()]
            }

            fn encode(&self, doc: &mut Document, node: NodeId, base: &str, check_duplicates: bool) {
                encode_scalar(doc, node, effective_base(base), self, check_duplicates);
            }

            fn decode(
                doc: &Document,
                node: NodeId,
                base: &str,
                out: &mut Self,
                default: Option<&Self>,
            ) -> bool {
                decode_scalar(doc, node, effective_base(base), out, default)
            }
        }
    )*};
}

impl_scalar_value!(i32, i64, u32, u64, f32, f64, bool, String);
