mod common;

use std::fs;
use std::process::{Command, Output};

use serde_json::Value;

use common::mod_tree::ModTree;

fn siiforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_siiforge"))
        .args(args)
        .env_remove("SIIFORGE_LOG")
        .output()
        .expect("run siiforge")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const MESSY: &str = "SiiNunit\n{\ntruck : .t\n{\nname:\"T\"\nfuel_capacity :400\n}\n}\n";
const FORMATTED: &str =
    "SiiNunit\n{\n\ttruck: .t\n\t{\n\t\tname         : \"T\"\n\t\tfuel_capacity: 400\n\t}\n}\n";

#[test]
fn fmt_prints_formatted_source_to_stdout() {
    let tree = ModTree::new();
    let file = tree.write("def/truck.sii", MESSY);
    let output = siiforge(&["fmt", file.to_str().expect("utf8 path")]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), FORMATTED);
    assert_eq!(fs::read_to_string(&file).expect("read"), MESSY);
}

#[test]
fn fmt_check_exits_one_when_changes_are_pending_and_write_fixes_them() {
    let tree = ModTree::new();
    let file = tree.write("def/truck.sii", MESSY);
    let path = file.to_str().expect("utf8 path");

    let check = siiforge(&["fmt", "--check", path]);
    assert_eq!(check.status.code(), Some(1));
    assert!(stdout(&check).contains("would reformat"));

    let write = siiforge(&["fmt", "--write", path]);
    assert_eq!(write.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&file).expect("read"), FORMATTED);

    let recheck = siiforge(&["fmt", "--check", path]);
    assert_eq!(recheck.status.code(), Some(0));
}

#[test]
fn fmt_uses_nearest_config_file() {
    let tree = ModTree::new();
    tree.write(".siifmt.toml", "[formatter]\nindentUnit = 2\nalignColons = false\n");
    let file = tree.write("def/truck.sii", MESSY);
    let output = siiforge(&["fmt", file.to_str().expect("utf8 path")]);
    assert_eq!(
        stdout(&output),
        "SiiNunit\n{\n  truck: .t\n  {\n    name: \"T\"\n    fuel_capacity: 400\n  }\n}\n"
    );
}

#[test]
fn fmt_reports_missing_file_as_error() {
    let tree = ModTree::new();
    let missing = tree.root().join("missing.sii");
    let output = siiforge(&["fmt", missing.to_str().expect("utf8 path")]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn colors_lists_presentations_as_json() {
    let tree = ModTree::new();
    let file = tree.write(
        "def/paint.sii",
        "SiiNunit\n{\n\tpaint_color: (128, 0, 255)\n\tbase_colour: #FF00CC\n}\n",
    );
    let output = siiforge(&["colors", file.to_str().expect("utf8 path"), "--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let payload: Value = serde_json::from_str(&stdout(&output)).expect("json output");
    let colors = payload.as_array().expect("array");
    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0]["line"], 2);
    assert_eq!(colors[0]["presentations"][0], "(128, 0, 255)");
    assert_eq!(colors[1]["presentations"][0], "#FF00CC");
}

#[test]
fn colors_set_rewrites_one_literal() {
    let tree = ModTree::new();
    let file = tree.write("def/paint.sii", "paint_color: (1, 0, 0)\n");
    let output = siiforge(&["colors", file.to_str().expect("utf8 path"), "--set", "0=#00FF00"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "paint_color: (0.000000, 1.000000, 0.000000)\n"
    );
}

#[test]
fn resolve_prints_candidates_and_outcome() {
    let tree = ModTree::new();
    let source = tree.write("mod/def/a.sii", "");
    tree.write("data/material/foo.mat", "");
    let output = siiforge(&[
        "resolve",
        "/material/foo.mat",
        "--source",
        source.to_str().expect("utf8 path"),
        "--mod-root",
        tree.mod_root().to_str().expect("utf8 path"),
        "--game-data-root",
        tree.data_root().to_str().expect("utf8 path"),
    ]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("candidate 0: "));
    assert!(lines[2].ends_with("(candidate 1)"));
}

#[test]
fn check_keys_reports_unknown_keys_with_positions() {
    let tree = ModTree::new();
    let file = tree.write(
        "def/truck.sii",
        "SiiNunit\n{\ntruck : .t\n{\n\tname: \"T\"\n\tpirce: 10\n}\n}\n",
    );
    let vocabulary = tree.write("keys.txt", "# known\ntruck\nname\nprice\n");
    let output = siiforge(&[
        "check-keys",
        file.to_str().expect("utf8 path"),
        "--vocabulary",
        vocabulary.to_str().expect("utf8 path"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("truck.sii:6:2: unknown key \"pirce\""), "{text}");

    let as_include = siiforge(&[
        "check-keys",
        file.to_str().expect("utf8 path"),
        "--vocabulary",
        vocabulary.to_str().expect("utf8 path"),
        "--kind",
        "sui",
    ]);
    assert_eq!(as_include.status.code(), Some(0));
    assert!(stdout(&as_include).is_empty());
}
