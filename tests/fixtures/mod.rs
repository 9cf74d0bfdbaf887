//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Top-row keycodes of the QWERTY fixture layer (positions 0-9).
pub const QWERTY_ROW: [&str; 10] = ["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"];

/// Top-row keycodes of the Symbol fixture layer (positions 0-9).
pub const SYMBOL_ROW: [&str; 10] = [
    "EXCL", "AT", "HASH", "DLLR", "PRCNT", "CARET", "AMPS", "STAR", "LPAR", "RPAR",
];

/// `&kp <keycode>` binding node.
pub fn kp(keycode: &str) -> Value {
    json!({ "value": "&kp", "params": [{ "value": keycode, "params": [] }] })
}

/// Transparent binding node.
pub fn trans() -> Value {
    json!({ "value": "&trans", "params": [] })
}

/// Key-press layer from a list of keycodes.
pub fn kp_layer(keycodes: &[&str]) -> Vec<Value> {
    keycodes.iter().map(|keycode| kp(keycode)).collect()
}

/// Two-layer keymap document: QWERTY and Symbol, ten bindings each.
pub fn two_layer_keymap() -> Value {
    json!({
        "keyboard": "glove80",
        "locale": "en-US",
        "layer_names": ["QWERTY", "Symbol"],
        "layers": [kp_layer(&QWERTY_ROW), kp_layer(&SYMBOL_ROW)]
    })
}

/// Override document extending the Symbol layer by one binding (`F13` at position 10).
pub fn symbol_extension_overrides() -> Value {
    let mut symbol = kp_layer(&SYMBOL_ROW);
    symbol.push(kp("F13"));
    json!({ "layers": { "Symbol": symbol } })
}

/// Keymap directory in a temporary location.
pub struct KeymapFixture {
    /// Owning temp dir, removed on drop
    pub dir: TempDir,
}

impl KeymapFixture {
    /// Creates a directory holding `keymap.json`.
    pub fn new(keymap: &Value) -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        fixture.write_json("keymap.json", keymap);
        fixture
    }

    /// The standard fixture: [`two_layer_keymap`] plus [`symbol_extension_overrides`].
    pub fn standard() -> Self {
        let fixture = Self::new(&two_layer_keymap());
        fixture.write_overrides(&symbol_extension_overrides());
        fixture
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `keymap.json`.
    pub fn keymap_path(&self) -> PathBuf {
        self.path().join("keymap.json")
    }

    /// Writes `custom/layer-overrides.json`.
    pub fn write_overrides(&self, overrides: &Value) {
        self.write_json("custom/layer-overrides.json", overrides);
    }

    /// Writes `custom/layers_to_preserve.json`.
    pub fn write_preserve_list(&self, names: &[&str]) {
        self.write_json("custom/layers_to_preserve.json", &json!(names));
    }

    /// Writes pretty JSON to a path relative to the fixture directory.
    pub fn write_json(&self, relative: &str, value: &Value) {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize fixture");
        self.write(relative, &content);
    }

    /// Writes raw text to a path relative to the fixture directory.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(path, content).expect("Failed to write fixture file");
    }

    /// Reads a file relative to the fixture directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("Failed to read fixture file")
    }

    /// Reads and parses a JSON file relative to the fixture directory.
    pub fn read_json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read(relative)).expect("Fixture file is not valid JSON")
    }

    /// Runs the binary inside the fixture directory.
    ///
    /// A nonexistent `--config` keeps the user's configuration out of the test.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_layerkit"))
            .args(args)
            .arg("--config")
            .arg(self.path().join("no-such-config.toml"))
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute layerkit")
    }
}

/// Stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
