use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lc2k-asm-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn duplicate_label_fails_without_output() {
    let src = scratch("dup.as");
    let out = scratch("dup.mc");
    fs::write(&src, "x\tnoop\n\tnoop\nx\thalt\n").unwrap();

    let mut cmd = Command::cargo_bin("assemble").unwrap();
    cmd.arg(&src).arg(&out);
    cmd.assert()
        .failure()
        .stderr(contains("duplicate label `x`"));
    assert!(!out.exists());
}

#[test]
fn oversized_offset_is_reported_as_offset_error() {
    let src = scratch("wide.as");
    let out = scratch("wide.mc");
    fs::write(&src, "\tlw 0 1 99999999999999999999\n\thalt\n").unwrap();

    let mut cmd = Command::cargo_bin("assemble").unwrap();
    cmd.arg(&src).arg(&out);
    cmd.assert()
        .failure()
        .stderr(contains("offset 99999999999999999999 does not fit in 16 bits"));
    assert!(!out.exists());
}

#[test]
fn writes_machine_code_listing_and_symbols() {
    let src = scratch("ok.as");
    let out = scratch("ok.mc");
    let syms = scratch("ok.json");
    fs::write(&src, "\tlw 0 1 five\n\thalt\nfive\t.fill 5\n").unwrap();

    let mut cmd = Command::cargo_bin("assemble").unwrap();
    cmd.arg(&src).arg(&out).arg("--listing").arg("--symbols").arg(&syms);
    cmd.assert()
        .success()
        .stdout(contains("(Address 0): 8454146\n(Address 1): 25165824\n(Address 2): 5\n"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "8454146\n25165824\n5\n");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&syms).unwrap()).unwrap();
    assert_eq!(json["symbols"]["five"]["address"], 2);
    assert_eq!(json["symbols"]["five"]["line"], 3);
}

#[test]
fn wrong_arity_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("assemble").unwrap();
    cmd.arg("only-one.as");
    cmd.assert().failure().stderr(contains("Usage"));
}
