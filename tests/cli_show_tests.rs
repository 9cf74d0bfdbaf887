//! End-to-end tests for `layerkit show` command.

mod fixtures;
use fixtures::*;

#[test]
fn test_show_default_layers() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "show should succeed, stderr: {}",
        stderr(&output)
    );
    let stdout = stdout(&output);
    assert!(stdout.contains("Layer #0: QWERTY"));
    assert!(stdout.contains("Layer #1: Symbol"));
    assert!(stdout.contains("| LEFT HAND"));
}

#[test]
fn test_show_preserve_list_picks_default_layers() {
    let fixture = KeymapFixture::standard();
    fixture.write_preserve_list(&["symbol", "Gaming"]);

    let output = fixture.run(&["show"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.starts_with("Layer #1: Symbol\n"));
    assert!(!stdout.contains("QWERTY"));
}

#[test]
fn test_show_first_layer_when_no_defaults_exist() {
    let fixture = KeymapFixture::new(&serde_json::json!({
        "layer_names": ["Base", "Lower"],
        "layers": [kp_layer(&["A"]), kp_layer(&["B"])]
    }));

    let output = fixture.run(&["show"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.contains("Layer #0: Base"));
    assert!(!stdout.contains("Lower"));
}

#[test]
fn test_show_merged_layer_includes_override_extension() {
    let fixture = KeymapFixture::standard();

    let merged = fixture.run(&["show", "Symbol", "--keycodes"]);
    let raw = fixture.run(&["show", "Symbol", "--keycodes", "--no-overrides"]);

    assert_eq!(merged.status.code(), Some(0));
    assert_eq!(raw.status.code(), Some(0));
    assert!(stdout(&merged).contains("| F13 "));
    assert!(!stdout(&raw).contains("F13"));
    assert!(stdout(&raw).contains("EXCL"));
}

#[test]
fn test_show_friendly_labels_by_default() {
    let fixture = KeymapFixture::standard();

    let friendly = stdout(&fixture.run(&["show", "Symbol"]));
    let raw = stdout(&fixture.run(&["show", "Symbol", "--keycodes"]));

    assert!(friendly.contains("!       @"));
    assert!(!friendly.contains("EXCL"));
    assert!(raw.contains("EXCL    AT"));
}

#[test]
fn test_show_layer_by_index_and_flag() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "--layer", "1", "qwerty"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    let symbol_at = stdout.find("Layer #1: Symbol").unwrap();
    let qwerty_at = stdout.find("Layer #0: QWERTY").unwrap();
    assert!(symbol_at < qwerty_at, "--layer values come first");
}

#[test]
fn test_show_list() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "--list"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), " 0: QWERTY\n 1: Symbol\n");
}

#[test]
fn test_show_mirror_and_both() {
    let fixture = KeymapFixture::standard();

    let mirrored = stdout(&fixture.run(&["show", "QWERTY", "--mirror", "--keycodes"]));
    assert!(mirrored.contains("LEFT HAND (mirrored)"));
    assert_eq!(mirrored.matches("| LEFT HAND").count(), 1);
    // Position 9 (P) sits where position 0 (Q) is in the standard view.
    assert!(mirrored.contains("        P       O       I       U       Y"));

    let both = stdout(&fixture.run(&["show", "QWERTY", "--both"]));
    assert_eq!(both.matches("| LEFT HAND").count(), 2);
    assert_eq!(both.matches("(mirrored)").count(), 2);
}

#[test]
fn test_show_positions_and_width() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "QWERTY", "--positions", "--width", "3"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.contains("LEFT HAND positions"));
    assert!(stdout.contains("    0   1   2   3   4"));
}

#[test]
fn test_show_width_truncates_labels() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "Symbol", "--keycodes", "--width", "1"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.contains("E…"));
    assert!(!stdout.contains("EXCL"));
}

#[test]
fn test_show_locale_translation() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "QWERTY", "--keycodes", "--locale", "de"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.contains("DE_Q"));
    assert!(stdout.contains("DE_Z"));
}

#[test]
fn test_show_unknown_layer() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "Gaming"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown layer: \"Gaming\""));
}

#[test]
fn test_show_index_out_of_range() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "2"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown layer: \"2\""));
}

#[test]
fn test_show_unknown_locale() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "--locale", "xx"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown locale"));
}

#[test]
fn test_show_missing_keymap() {
    let fixture = KeymapFixture::standard();

    let output = fixture.run(&["show", "--file", "nope.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("missing keymap file: nope.json"));
}

#[test]
fn test_show_malformed_keymap() {
    let fixture = KeymapFixture::standard();
    fixture.write("broken.json", "{ \"layer_names\": ");

    let output = fixture.run(&["show", "--file", "broken.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to parse broken.json"));
}

#[test]
fn test_show_malformed_overrides_warns() {
    let fixture = KeymapFixture::new(&two_layer_keymap());
    fixture.write("custom/layer-overrides.json", "not json");

    let output = fixture.run(&["show", "Symbol", "--keycodes"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("failed to parse overrides"));
    assert!(stdout(&output).contains("EXCL"));
}

#[test]
fn test_show_unreadable_overrides_warns() {
    let fixture = KeymapFixture::new(&two_layer_keymap());
    std::fs::create_dir_all(fixture.path().join("custom")).unwrap();
    std::fs::write(fixture.path().join("custom/layer-overrides.json"), [0xff, 0xfe, 0x00]).unwrap();

    let output = fixture.run(&["show", "Symbol", "--keycodes"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("failed to read overrides at custom/layer-overrides.json"));
    assert!(stdout(&output).contains("EXCL"));
}
