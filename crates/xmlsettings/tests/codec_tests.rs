use xmlsettings::{from_str, Color, Config, Cursor, Vec2, Vec4};

fn shape_cursor(config: Config) -> Cursor {
    let mut cursor = Cursor::with_config(config);
    cursor.add_tag("shape");
    assert!(cursor.push_tag("shape", 0));
    cursor
}

fn attribute_names(cursor: &Cursor) -> Vec<String> {
    cursor
        .document()
        .attributes(cursor.current())
        .iter()
        .map(|a| a.name.clone())
        .collect()
}

#[test]
fn test_vec4_round_trip_and_slot_names() {
    let mut cursor = shape_cursor(Config::default());
    cursor.encode("pos", &Vec4::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(attribute_names(&cursor), vec!["pos_x", "pos_y", "pos_z", "pos_w"]);

    let mut out = Vec4::default();
    assert!(cursor.decode("pos", &mut out, None));
    assert_eq!(out, Vec4::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn test_full_miss_with_default_reports_failure() {
    let cursor = shape_cursor(Config::default());
    let mut out = Vec4::default();
    let found = cursor.decode("pos", &mut out, Some(&Vec4::splat(9.0)));
    assert!(!found, "no slot was present");
    assert_eq!(out, Vec4::new(9.0, 9.0, 9.0, 9.0));
}

#[test]
fn test_scalar_reencode_with_duplicate_check() {
    let mut cursor = shape_cursor(Config::default());
    cursor.encode("count", &5);
    cursor.encode("count", &7);
    assert_eq!(attribute_names(&cursor), vec!["count"]);
    let mut out = 0;
    assert!(cursor.decode("count", &mut out, None));
    assert_eq!(out, 7);
}

#[test]
fn test_scalar_reencode_without_duplicate_check() {
    let mut cursor = shape_cursor(Config::default().with_duplicate_check(false));
    cursor.encode("count", &5);
    cursor.encode("count", &7);
    cursor.encode("count", &9);
    assert_eq!(attribute_names(&cursor), vec!["count", "count", "count"]);
}

#[test]
fn test_empty_base_name_uses_value() {
    let mut cursor = shape_cursor(Config::default());
    cursor.encode("", &Vec2::new(1.0, 2.0));
    assert_eq!(attribute_names(&cursor), vec!["value_x", "value_y"]);

    let mut out = Vec2::default();
    assert!(cursor.decode("", &mut out, None));
    assert_eq!(out, Vec2::new(1.0, 2.0));
}

#[test]
fn test_partial_composite_decode() -> Result<(), Box<dyn std::error::Error>> {
    let mut cursor = from_str(r#"<shape tint_r="0.2" tint_g="0.4"/>"#)?;
    assert!(cursor.push_tag("shape", 0));

    let mut out = Color::new(0.0, 0.0, 0.0, 0.0);
    assert!(!cursor.decode("tint", &mut out, None));
    assert_eq!(out, Color::new(0.2, 0.4, 0.0, 0.0));

    let mut out = Color::new(0.0, 0.0, 0.0, 0.0);
    assert!(!cursor.decode("tint", &mut out, Some(&Color::rgb(1.0, 1.0, 1.0))));
    assert_eq!(out, Color::new(0.2, 0.4, 1.0, 1.0));
    Ok(())
}

#[test]
fn test_arrays_and_scalars_mix() {
    let mut cursor = shape_cursor(Config::default());
    cursor.encode("matrix", &[1.0f64, 0.0, 0.0, 1.0]);
    cursor.encode("label", &"corner".to_string());
    cursor.encode("enabled", &true);

    let mut matrix = [0.0f64; 4];
    let mut label = String::new();
    let mut enabled = false;
    assert!(cursor.decode("matrix", &mut matrix, None));
    assert!(cursor.decode("label", &mut label, None));
    assert!(cursor.decode("enabled", &mut enabled, None));
    assert_eq!(matrix, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(label, "corner");
    assert!(enabled);

    let mut short = [0.0f64; 5];
    assert!(!cursor.decode("matrix", &mut short, None));
    assert_eq!(short, [1.0, 0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_codec_values_survive_reload() -> Result<(), Box<dyn std::error::Error>> {
    let mut cursor = shape_cursor(Config::default());
    cursor.encode("pos", &Vec2::new(-3.5, 12.25));
    cursor.encode("tint", &Color::new(0.1, 0.2, 0.3, 0.4));
    let text = cursor.to_xml_string();

    let mut reloaded = from_str(&text)?;
    assert!(reloaded.push_tag("shape", 0));
    let mut pos = Vec2::default();
    let mut tint = Color::default();
    assert!(reloaded.decode("pos", &mut pos, None));
    assert!(reloaded.decode("tint", &mut tint, None));
    assert_eq!(pos, Vec2::new(-3.5, 12.25));
    assert_eq!(tint, Color::new(0.1, 0.2, 0.3, 0.4));
    Ok(())
}
