//! Property-based tests for the cursor and attribute codec
//!
//! 1. Text values, empty or next to child elements, read back unchanged
//!    after repeated save and reload
//! 2. Encoded composites decode to the same value
//! 3. Push followed by pop always restores the position
//! 4. Arbitrary input never panics the loader

use proptest::prelude::*;
use xmlsettings::{from_str, Color, Config, Cursor, Vec2, Vec4};

fn arb_tag() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Text with markup characters, possibly empty
///
/// Whitespace-only text is dropped on load, so it is left out.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9<>&\"'][a-zA-Z0-9<>&\"' ]{0,16}",
        " {1,3}[a-zA-Z0-9<>&][a-zA-Z0-9<>&\n\t ]{0,12}",
    ]
}

fn finite_f32() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn reload(cursor: &Cursor) -> Cursor {
    let mut fresh = Cursor::new();
    let result = fresh.load_str(&cursor.to_xml_string());
    assert!(result.is_ok(), "reload failed: {result:?}");
    fresh
}

proptest! {
    #[test]
    fn prop_text_value_survives_reload(
        tag in arb_tag(),
        text in arb_text(),
        children in 0usize..3,
    ) {
        let mut cursor = Cursor::new();
        cursor.add_tag(&tag);
        prop_assert!(cursor.push_tag(&tag, 0));
        for _ in 0..children {
            cursor.add_tag("child");
        }
        cursor.pop_tag();
        cursor.set_value(&tag, text.clone());

        let once = reload(&cursor);
        let twice = reload(&once);
        prop_assert_eq!(once.get_value(&tag, "dflt".to_string(), 0), text.clone());
        prop_assert_eq!(twice.get_value(&tag, "dflt".to_string(), 0), text);
        prop_assert_eq!(twice.to_xml_string(), once.to_xml_string());
    }

    #[test]
    fn prop_integers_survive_reload(value in any::<i64>(), unsigned in any::<u32>()) {
        let mut cursor = Cursor::new();
        cursor.add_tag("n");
        cursor.set_attribute("n", "signed", value);
        cursor.set_attribute("n", "unsigned", unsigned);
        let reloaded = reload(&cursor);
        prop_assert_eq!(reloaded.get_attribute("n", "signed", 0i64), value);
        prop_assert_eq!(reloaded.get_attribute("n", "unsigned", 0u32), unsigned);
    }

    #[test]
    fn prop_composites_decode_to_encoded(
        x in finite_f32(),
        y in finite_f32(),
        z in finite_f32(),
        w in finite_f32(),
    ) {
        let mut cursor = Cursor::new();
        cursor.add_tag("node");
        prop_assert!(cursor.push_tag("node", 0));
        cursor.encode("a", &Vec2::new(x, y));
        cursor.encode("b", &Vec4::new(x, y, z, w));
        cursor.encode("c", &Color::new(w, z, y, x));

        let mut reloaded = reload(&cursor);
        prop_assert!(reloaded.push_tag("node", 0));
        let mut a = Vec2::default();
        let mut b = Vec4::default();
        let mut c = Color::default();
        prop_assert!(reloaded.decode("a", &mut a, None));
        prop_assert!(reloaded.decode("b", &mut b, None));
        prop_assert!(reloaded.decode("c", &mut c, None));
        prop_assert_eq!(a, Vec2::new(x, y));
        prop_assert_eq!(b, Vec4::new(x, y, z, w));
        prop_assert_eq!(c, Color::new(w, z, y, x));
    }

    #[test]
    fn prop_reencode_keeps_single_slot(values in prop::collection::vec(any::<i32>(), 1..8)) {
        let mut cursor = Cursor::with_config(Config::default());
        cursor.add_tag("node");
        prop_assert!(cursor.push_tag("node", 0));
        for value in &values {
            cursor.encode("count", value);
        }
        prop_assert_eq!(cursor.document().attributes(cursor.current()).len(), 1);
        let mut out = 0i32;
        prop_assert!(cursor.decode("count", &mut out, None));
        prop_assert_eq!(Some(&out), values.last());
    }

    #[test]
    fn prop_push_pop_restores_position(
        path in prop::collection::vec(arb_tag(), 1..6),
        which in 0usize..3,
    ) {
        let mut cursor = Cursor::new();
        for tag in &path {
            cursor.add_tag(tag);
            prop_assert!(cursor.push_tag(tag, 0));
        }
        cursor.reset();

        let start = cursor.current();
        let mut pushed = 0;
        for tag in &path {
            if cursor.push_tag(tag, which) {
                pushed += 1;
            } else {
                break;
            }
        }
        prop_assert_eq!(cursor.depth(), pushed);
        for _ in 0..pushed {
            cursor.pop_tag();
        }
        prop_assert_eq!(cursor.current(), start);
    }

    #[test]
    fn prop_ordinals_cover_count(count in 0usize..12) {
        let mut cursor = Cursor::new();
        for expected in 0..count {
            prop_assert_eq!(cursor.add_tag("item"), expected);
        }
        prop_assert_eq!(cursor.num_tags("item"), count);
        for which in 0..count {
            prop_assert!(cursor.tag_exists("item", which));
        }
        prop_assert!(!cursor.tag_exists("item", count));
    }

    #[test]
    fn prop_loader_never_panics(input in ".{0,64}") {
        let _ = from_str(&input);
    }
}
