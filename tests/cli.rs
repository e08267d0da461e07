use anyhow::Result;
use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn mpp2json(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_mpp2json"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()?)
}

fn stdout_json(output: &Output) -> Result<Value> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_no_file_provided() -> Result<()> {
    let output = mpp2json(&[])?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?.trim_end(),
        r#"{"error":"No file provided"}"#
    );
    Ok(())
}

#[test]
fn test_file_not_found() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.mpp");
    let missing = missing.to_str().unwrap();

    let output = mpp2json(&[missing])?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_json(&output)?,
        json!({
            "error": "PYTHON_PARSER_ERROR",
            "message": format!("File not found: {}", missing),
        })
    );
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn test_office_move() -> Result<()> {
    let path = fixture("office_move.xml");
    let output = mpp2json(&[path.to_str().unwrap()])?;
    assert_eq!(output.status.code(), Some(0));

    assert_eq!(
        stdout_json(&output)?,
        json!({
            "project": {
                "name": "office_move.xml",
                "startDate": "",
                "finishDate": "2024-09-13T17:00",
            },
            "tasks": [
                {
                    "id": 0, "wbs": "0", "name": "Office move",
                    "start": "2024-09-02T08:00", "finish": "2024-09-13T17:00",
                    "duration": "10.0d", "percentComplete": 20.0,
                    "isSummary": true, "isMilestone": false, "outlineLevel": 0,
                },
                {
                    "id": 1, "wbs": "1", "name": "Pack",
                    "start": "2024-09-02T08:00", "finish": "2024-09-06T17:00",
                    "duration": "5.0d", "percentComplete": 40.0,
                    "isSummary": false, "isMilestone": false, "outlineLevel": 1,
                },
                {
                    "id": 2, "wbs": "2", "name": "Move",
                    "start": "2024-09-09T08:00", "finish": "2024-09-13T12:00",
                    "duration": "36.0h", "percentComplete": 0.0,
                    "isSummary": false, "isMilestone": false, "outlineLevel": 1,
                },
                {
                    "id": 3, "wbs": "3", "name": "Keys handed over",
                    "start": "2024-09-13T17:00", "finish": "2024-09-13T17:00",
                    "duration": "0.0d", "percentComplete": 0.0,
                    "isSummary": false, "isMilestone": true, "outlineLevel": 1,
                },
            ],
            "resources": [
                { "id": 0, "name": "", "type": 0 },
                { "id": 1, "name": "Movers Ltd", "type": 0 },
                { "id": 2, "name": "Boxes", "type": 0 },
            ],
        })
    );
    Ok(())
}

#[test]
fn test_output_is_repeatable() -> Result<()> {
    let path = fixture("office_move.xml");
    let first = mpp2json(&[path.to_str().unwrap()])?;
    let second = mpp2json(&[path.to_str().unwrap()])?;
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout)?;
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with(r#"{"project":"#));
    Ok(())
}

#[test]
fn test_corrupt_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".xml").tempfile()?;
    file.write_all(b"<Project xmlns=\"http://schemas.microsoft.com/project\"><Tasks>")?;

    let output = mpp2json(&["--error-style", "tagged", file.path().to_str().unwrap()])?;
    assert_eq!(output.status.code(), Some(1));

    let value = stdout_json(&output)?;
    assert_eq!(value["error"], "DECODE_FAILED");
    assert!(value["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid Microsoft Project XML"));
    Ok(())
}

#[test]
fn test_mpp_requires_classpath() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".mpp").tempfile()?;
    file.write_all(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])?;

    let output = mpp2json(&[file.path().to_str().unwrap()])?;
    assert_eq!(output.status.code(), Some(1));

    let value = stdout_json(&output)?;
    assert_eq!(value["error"], "PYTHON_PARSER_ERROR");
    assert!(value["message"]
        .as_str()
        .unwrap()
        .contains("--mpxj-classpath"));
    Ok(())
}
