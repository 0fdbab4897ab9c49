/*!
 * Command line behavior of the resxlate binary
 */

use std::fs;
use std::process::Command;

use crate::common;

fn resxlate() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_resxlate"));
    command.env_remove("RESXLATE_API_KEY");
    command
}

#[test]
fn test_cli_withTwoArguments_shouldPrintUsageAndWriteNothing() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_sample_resx(dir.path(), "Strings.resx").unwrap();

    let output = resxlate()
        .current_dir(dir.path())
        .arg(&input)
        .arg(dir.path().join("out.resx"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_cli_withFourArguments_shouldBeUsageError() {
    let dir = common::create_temp_dir().unwrap();

    let output = resxlate()
        .current_dir(dir.path())
        .args(["a.resx", "b.resx", "es", "extra"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("b.resx").exists());
}

#[test]
fn test_cli_withMissingInput_shouldExitWithFailure() {
    let dir = common::create_temp_dir().unwrap();
    let out = dir.path().join("out.resx");

    let output = resxlate()
        .current_dir(dir.path())
        .arg(dir.path().join("missing.resx"))
        .arg(&out)
        .arg("es")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn test_cli_withLlmProviderAndNoKey_shouldFailValidation() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_sample_resx(dir.path(), "Strings.resx").unwrap();
    let out = dir.path().join("out.resx");

    let output = resxlate()
        .current_dir(dir.path())
        .args(["--provider", "openai"])
        .arg(&input)
        .arg(&out)
        .arg("es")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("API key"));
    assert!(!out.exists());
}

#[test]
fn test_cli_completions_shouldPrintScript() {
    let output = resxlate().args(["completions", "bash"]).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("resxlate"));
}
