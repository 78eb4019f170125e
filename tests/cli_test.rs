use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

#[test]
fn bad_filter_pattern_fails_before_scanning() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("generated_tests.rs");

    let result = Command::cargo_bin("testgen")
        .unwrap()
        .args(["[", "-p"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("invalid name filter"));
    assert!(!output.exists(), "no output may be produced on a config error");
}

#[test]
fn unreadable_scan_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no_such_tree");

    let result = Command::cargo_bin("testgen")
        .unwrap()
        .arg("-p")
        .arg(&missing)
        .output()
        .unwrap();

    assert!(!result.status.success());
}

#[test]
fn scaffolds_are_written_to_the_output_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("math.rs"),
        indoc! {r#"
            pub fn add(x: i32, y: i32) -> i32 {
                x + y
            }
        "#},
    )
    .unwrap();
    let output = dir.path().join("generated_tests.rs");

    Command::cargo_bin("testgen")
        .unwrap()
        .arg("-p")
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("#[test]"));
    assert!(text.contains("fn test_add()"));
}

#[test]
fn stdout_is_the_default_destination() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("math.rs"),
        indoc! {r#"
            pub fn add(x: i32, y: i32) -> i32 {
                x + y
            }
        "#},
    )
    .unwrap();

    let result = Command::cargo_bin("testgen")
        .unwrap()
        .arg("-p")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("fn test_add()"));
}
