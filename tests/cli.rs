//! End-to-end runs of the `drawodds` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn drawodds(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_drawodds"))
        .args(args)
        .env("DRAWODDS_CONFIG", "/tmp/drawodds_cli_test_no_such_config.toml")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn drawodds");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn flags_print_the_sentence() {
    let out = drawodds(&["--singleton", "--turn", "1"], "");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "The chance of drawing at least one copy of this card by turn 1 is 19.788%."
    );
}

#[test]
fn interactive_answers_print_the_sentence() {
    let out = drawodds(&[], "y\nn\n3\n5\ny\n");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Which turn do you want to play the card on?"));
    assert!(stdout.trim_end().ends_with(
        "The chance of drawing at least one copy of this card by turn 5 is 86.643%."
    ));
}

#[test]
fn json_output_parses() {
    let out = drawodds(&["--trial", "--copies", "3", "--turn", "5", "--two-draw", "--json"], "");
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["target_turn"], 5);
    assert!((json["probability"].as_f64().unwrap() - 0.8664286933516889).abs() < 1e-9);
}

#[test]
fn sweep_prints_one_row_per_turn() {
    let out = drawodds(&["--singleton", "--sweep", "4"], "");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn verbose_traces_to_stderr() {
    let out = drawodds(&["-v", "--singleton", "--turn", "2"], "");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Opening hand:"));
    assert!(stderr.contains("Card replaced. Chance of missing is now"));
    assert!(stderr.contains("Turn 2:"));
}

#[test]
fn singleton_with_copies_is_rejected() {
    let out = drawodds(&["--singleton", "--copies", "3", "--turn", "2"], "");
    assert!(!out.status.success());
}

#[test]
fn exhausted_deck_is_an_error() {
    let out = drawodds(&["--singleton", "--turn", "40", "--two-draw"], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Deck exhausted"));
}
