#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlsettings::{Cursor, Vec2};

const TAGS: [&str; 4] = ["a", "b", "item", "value"];

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new();
    for pair in data.chunks(2) {
        let (op, byte) = match pair {
            [op, byte] => (*op, *byte),
            [op] => (*op, 0),
            _ => continue,
        };
        let arg = usize::from(byte);
        let tag = TAGS[arg % TAGS.len()];
        match op % 8 {
            0 => {
                cursor.add_tag(tag);
            }
            1 => {
                cursor.push_tag(tag, arg / TAGS.len());
            }
            2 => cursor.pop_tag(),
            3 => cursor.remove_tag(tag, arg / TAGS.len()),
            4 => cursor.set_attribute(tag, "n", u32::from(byte)),
            5 => cursor.set_value(tag, i64::from(byte)),
            6 => cursor.encode(tag, &Vec2::new(f32::from(byte), 1.0)),
            _ => {
                let mut out = Vec2::default();
                cursor.decode(tag, &mut out, None);
            }
        }
    }
    let text = cursor.to_xml_string();
    assert!(xmlsettings::from_str(&text).is_ok() || cursor.document().node_count() == 1);
});
