// Golden-file integration tests: each directory under `tests/run/` holds a
// `main.pas` source file and an `expected_output.txt` that the compiled
// binary's stdout must match exactly. Grounded in the teacher's own
// `tests/run_tests.rs`, swapped to invoke the built `pascalc` binary
// directly instead of shelling out through `cargo run`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn find_run_tests() -> Vec<PathBuf> {
    let run_dir = Path::new("tests/run");
    let mut test_dirs = Vec::new();

    if let Ok(entries) = fs::read_dir(run_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() && path.join("main.pas").exists() {
                test_dirs.push(path);
            }
        }
    }

    test_dirs.sort();
    test_dirs
}

fn run_test_case(test_dir: &Path) -> Result<(), String> {
    let test_name = test_dir.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");

    let main_file = test_dir.join("main.pas");
    let expected_output_file = test_dir.join("expected_output.txt");

    let expected_output = fs::read_to_string(&expected_output_file).map_err(|e| {
        format!("test '{test_name}': failed to read expected_output.txt: {e}")
    })?;

    let output = Command::new(env!("CARGO_BIN_EXE_pascalc"))
        .arg(&main_file)
        .output()
        .map_err(|e| format!("test '{test_name}': failed to run pascalc: {e}"))?;

    let actual = if output.status.success() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        String::from_utf8_lossy(&output.stderr).into_owned()
    };

    if actual.trim() != expected_output.trim() {
        return Err(format!(
            "test '{test_name}': output mismatch\nExpected:\n{}\nActual:\n{}",
            expected_output.trim(),
            actual.trim()
        ));
    }

    Ok(())
}

#[test]
fn golden_file_tests_pass() {
    let test_dirs = find_run_tests();
    assert!(!test_dirs.is_empty(), "no integration tests found in tests/run/");

    let mut failures = Vec::new();
    for test_dir in &test_dirs {
        if let Err(e) = run_test_case(test_dir) {
            failures.push(e);
        }
    }

    if !failures.is_empty() {
        panic!("\n{}", failures.join("\n"));
    }
}
