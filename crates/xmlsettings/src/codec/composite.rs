//! Multi-slot composite values

use std::borrow::Cow;

use crate::codec::name::format_attr_name;
use crate::codec::scalar::{decode_scalar, encode_scalar};
use crate::codec::{AttributeValue, ValueKind};
use crate::dom::{Document, NodeId};
use crate::text::TextValue;

/// A fixed number of scalar fields, each addressed by a suffix
pub trait Composite: Sized {
    type Field: TextValue;

    const ARITY: usize;

    fn suffix(index: usize) -> Cow<'static, str>;

    fn field(&self, index: usize) -> Option<&Self::Field>;

    fn field_mut(&mut self, index: usize) -> Option<&mut Self::Field>;
}

fn slot_names<C: Composite>(base: &str) -> Vec<String> {
    (0..C::ARITY)
        .map(|i| format_attr_name(base, &C::suffix(i)))
        .collect()
}

fn encode_fields<C: Composite>(
    value: &C,
    doc: &mut Document,
    node: NodeId,
    base: &str,
    check_duplicates: bool,
) {
    for i in 0..C::ARITY {
        if let Some(field) = value.field(i) {
            encode_scalar(doc, node, &format_attr_name(base, &C::suffix(i)), field, check_duplicates);
        }
    }
}

fn decode_fields<C: Composite>(
    doc: &Document,
    node: NodeId,
    base: &str,
    out: &mut C,
    default: Option<&C>,
) -> bool {
    let mut found_all = true;
    for i in 0..C::ARITY {
        let name = format_attr_name(base, &C::suffix(i));
        let field_default = default.and_then(|d| d.field(i));
        let found = match out.field_mut(i) {
            Some(slot) => decode_scalar(doc, node, &name, slot, field_default),
            None => false,
        };
        found_all &= found;
    }
    found_all
}

/// Two-component float vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }
}

/// Four-component float vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// RGBA color with float channels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl Composite for Vec2 {
    type Field = f32;
    const ARITY: usize = 2;

    fn suffix(index: usize) -> Cow<'static, str> {
        Cow::Borrowed(["x", "y"].get(index).copied().unwrap_or_default())
    }

    fn field(&self, index: usize) -> Option<&f32> {
        match index {
            0 => Some(&self.x),
            1 => Some(&self.y),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut f32> {
        match index {
            0 => Some(&mut self.x),
            1 => Some(&mut self.y),
            _ => None,
        }
    }
}

impl Composite for Vec4 {
    type Field = f32;
    const ARITY: usize = 4;

    fn suffix(index: usize) -> Cow<'static, str> {
        Cow::Borrowed(["x", "y", "z", "w"].get(index).copied().unwrap_or_default())
    }

    fn field(&self, index: usize) -> Option<&f32> {
        match index {
            0 => Some(&self.x),
            1 => Some(&self.y),
            2 => Some(&self.z),
            3 => Some(&self.w),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut f32> {
        match index {
            0 => Some(&mut self.x),
            1 => Some(&mut self.y),
            2 => Some(&mut self.z),
            3 => Some(&mut self.w),
            _ => None,
        }
    }
}

impl Composite for Color {
    type Field = f32;
    const ARITY: usize = 4;

    fn suffix(index: usize) -> Cow<'static, str> {
        Cow::Borrowed(["r", "g", "b", "a"].get(index).copied().unwrap_or_default())
    }

    fn field(&self, index: usize) -> Option<&f32> {
        match index {
            0 => Some(&self.r),
            1 => Some(&self.g),
            2 => Some(&self.b),
            3 => Some(&self.a),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut f32> {
        match index {
            0 => Some(&mut self.r),
            1 => Some(&mut self.g),
            2 => Some(&mut self.b),
            3 => Some(&mut self.a),
            _ => None,
        }
    }
}

/// Positional suffixes `v0`, `v1`, ...
impl<T: TextValue, const N: usize> Composite for [T; N] {
    type Field = T;
    const ARITY: usize = N;

    fn suffix(index: usize) -> Cow<'static, str> {
        Cow::Owned(format!("v{index}"))
    }

    fn field(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index)
    }
}

macro_rules! impl_composite_value {
    ($ty:ty => $kind:expr) => {
        impl AttributeValue for $ty {
            const KIND: ValueKind = $kind;

            fn slot_names(base: &str) -> Vec<String> {
                slot_names::<Self>(base)
            }

            fn encode(&self, doc: &mut Document, node: NodeId, base: &str, check_duplicates: bool) {
                encode_fields(self, doc, node, base, check_duplicates);
            }

            fn decode(
                doc: &Document,
                node: NodeId,
                base: &str,
                out: &mut Self,
                default: Option<&Self>,
            ) -> bool {
                decode_fields(doc, node, base, out, default)
            }
        }
    };
}

impl_composite_value!(Vec2 => ValueKind::Vec2);
impl_composite_value!(Vec4 => ValueKind::Vec4);
impl_composite_value!(Color => ValueKind::Color);

impl<T: TextValue, const N: usize> AttributeValue for [T; N] {
    const KIND: ValueKind = ValueKind::Array { len: N };

    fn slot_names(base: &str) -> Vec<String> {
        slot_names::<Self>(base)
    }

    fn encode(&self, doc: &mut Document, node: NodeId, base: &str, check_duplicates: bool) {
        encode_fields(self, doc, node, base, check_duplicates);
    }

    fn decode(doc: &Document, node: NodeId, base: &str, out: &mut Self, default: Option<&Self>) -> bool {
        decode_fields(doc, node, base, out, default)
    }
}
