#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlsettings::from_bytes;

fuzz_target!(|data: &[u8]| {
    if let Ok(cursor) = from_bytes(data) {
        let text = cursor.to_xml_string();
        assert!(xmlsettings::from_str(&text).is_ok());
    }
});
