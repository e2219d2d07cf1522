use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const SCRIPT: &str = "radio = fallback([playlist(\"/music\"), blank()])\noutput.icecast(%mp3, mksafe(radio))\n";

fn liqhl(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_liqhl"))
        .current_dir(dir)
        .arg("--no-color")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("radio.liq"), SCRIPT).unwrap();
    dir
}

#[test]
fn test_tokens_lists_every_token() {
    let dir = workspace();
    let output = liqhl(dir.path(), &["tokens", "radio.liq"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.lines().next().unwrap().contains("\"radio\""));
    assert!(text.contains("annotation"));
    assert!(text.contains("\"%mp3\""));
}

#[test]
fn test_tokens_raw_shows_modes() {
    let dir = workspace();
    fs::write(dir.path().join("nested.liq"), "#< a #< b ># >#").unwrap();
    let output = liqhl(dir.path(), &["tokens", "--raw", "nested.liq"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[block-comment 1]"));
    assert!(text.lines().last().unwrap().ends_with("[top-level 0]"));
}

#[test]
fn test_highlight_without_color_echoes_script() {
    let dir = workspace();
    let output = liqhl(dir.path(), &["highlight", "radio.liq"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), SCRIPT);
}

#[test]
fn test_highlight_markup() {
    let dir = workspace();
    let output = liqhl(
        dir.path(),
        &["highlight", "radio.liq", "--format", "markup", "--class-prefix", "x-"],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("<span class=\"x-variable\">radio</span>"));
    assert!(text.contains("<span class=\"x-meta\">%mp3</span>"));
    assert!(text.contains("&quot;"));
}

#[test]
fn test_config_file_selects_markup() {
    let dir = workspace();
    fs::write(dir.path().join(".liqhlrc"), "format = \"markup\"\nclass_prefix = \"\"\n").unwrap();
    let output = liqhl(dir.path(), &["highlight", "radio.liq"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("<span class=\"variable\">radio</span>"));
}

#[test]
fn test_highlight_by_alias_and_unknown_language() {
    let dir = workspace();
    let ok = liqhl(dir.path(), &["highlight", "radio.liq", "--language", "LIQ"]);
    assert!(ok.status.success());

    let err = liqhl(dir.path(), &["highlight", "radio.liq", "--language", "ocaml"]);
    assert!(!err.status.success());
    assert!(String::from_utf8_lossy(&err.stderr).contains("Unknown language 'ocaml'"));
}

#[test]
fn test_score_from_stdin() {
    let dir = workspace();
    let mut child = Command::new(env!("CARGO_BIN_EXE_liqhl"))
        .current_dir(dir.path())
        .args(["--no-color", "score", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(SCRIPT.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).trim_end().ends_with(" liquidsoap"));
}

#[test]
fn test_score_of_prose() {
    let dir = workspace();
    fs::write(dir.path().join("notes.txt"), "Buy milk.\n").unwrap();
    let output = liqhl(dir.path(), &["score", "notes.txt"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("0 not liquidsoap"));
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let dir = workspace();
    let bytes = b"s = \"caf\xe9\" # \xff\xfe\n";
    fs::write(dir.path().join("latin1.liq"), bytes).unwrap();
    let output = liqhl(dir.path(), &["highlight", "latin1.liq"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), String::from_utf8_lossy(bytes));
    assert!(String::from_utf8_lossy(&output.stderr).contains("replacing invalid bytes"));

    let tokens = liqhl(dir.path(), &["tokens", "latin1.liq"]);
    assert!(tokens.status.success());
    assert!(stdout(&tokens).contains('\u{FFFD}'));
}

#[test]
fn test_missing_file_fails() {
    let dir = workspace();
    let output = liqhl(dir.path(), &["tokens", "missing.liq"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read missing.liq"));
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    assert!(liqhl(dir.path(), &["init"]).status.success());
    assert!(dir.path().join(".liqhlrc").is_file());
    assert!(!liqhl(dir.path(), &["init"]).status.success());
}
