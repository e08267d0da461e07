use serde::Serialize;
use std::path::Path;

use crate::error::ParseError;
use crate::export::ProjectExport;
use crate::output::{self, ErrorEnvelope, ErrorStyle};
use crate::reader::ProjectReader;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub pretty: bool,
    pub error_style: ErrorStyle,
}

/// The single document to print and the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub document: String,
    pub exit_code: u8,
}

pub fn parse_project_file(
    path: &Path,
    reader: &dyn ProjectReader,
) -> Result<ProjectExport, ParseError> {
    if !path.exists() {
        return Err(ParseError::NotFound(path.to_path_buf()));
    }

    let project = reader.read(path)?;
    Ok(ProjectExport::from(&project))
}

/// Read `path` (if any) and build the JSON document for it. Nothing is
/// printed here, so a failure never leaves a partial document behind.
pub fn run(path: Option<&Path>, reader: &dyn ProjectReader, options: &Options) -> Outcome {
    let Some(path) = path else {
        return failure(&ErrorEnvelope::no_file(options.error_style), options);
    };

    let result = parse_project_file(path, reader).and_then(|export| {
        output::render(&export, options.pretty).map_err(ParseError::from)
    });

    match result {
        Ok(document) => Outcome {
            document,
            exit_code: 0,
        },
        Err(error) => {
            log::debug!("parse failed: {:?}", error);
            failure(&ErrorEnvelope::new(&error, options.error_style), options)
        }
    }
}

fn failure<T: Serialize>(envelope: &T, options: &Options) -> Outcome {
    let document = output::render(envelope, options.pretty)
        .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, output::COMPAT_ERROR_KIND));
    Outcome {
        document,
        exit_code: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::project::{ProjectFile, Resource, Task};
    use std::cell::Cell;

    /// Returns a canned project and counts how often it was asked.
    #[derive(Default)]
    struct StubReader {
        project: ProjectFile,
        calls: Cell<usize>,
    }

    impl ProjectReader for StubReader {
        fn read(&self, _path: &Path) -> Result<ProjectFile, DecodeError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.project.clone())
        }
    }

    struct FailingReader;

    impl ProjectReader for FailingReader {
        fn read(&self, _path: &Path) -> Result<ProjectFile, DecodeError> {
            Err(DecodeError::InvalidDocument("truncated".to_string()))
        }
    }

    #[test]
    fn test_missing_argument_touches_nothing() {
        let reader = StubReader::default();
        let outcome = run(None, &reader, &Options::default());
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.document, r#"{"error":"No file provided"}"#);
        assert_eq!(reader.calls.get(), 0);
    }

    #[test]
    fn test_missing_file() {
        let reader = StubReader::default();
        let path = Path::new("/definitely/not/here.mpp");
        let outcome = run(Some(path), &reader, &Options::default());
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(
            outcome.document,
            concat!(
                r#"{"error":"PYTHON_PARSER_ERROR","#,
                r#""message":"File not found: /definitely/not/here.mpp"}"#
            )
        );
        assert_eq!(reader.calls.get(), 0);
    }

    #[test]
    fn test_decode_failure_uses_envelope() -> anyhow::Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        let outcome = run(Some(file.path()), &FailingReader, &Options::default());
        assert_eq!(outcome.exit_code, 1);

        let value: serde_json::Value = serde_json::from_str(&outcome.document)?;
        assert_eq!(value["error"], "PYTHON_PARSER_ERROR");
        assert_eq!(value["message"], "Invalid Microsoft Project XML: truncated");

        let tagged = Options {
            error_style: ErrorStyle::Tagged,
            ..Options::default()
        };
        let outcome = run(Some(file.path()), &FailingReader, &tagged);
        let value: serde_json::Value = serde_json::from_str(&outcome.document)?;
        assert_eq!(value["error"], "DECODE_FAILED");
        Ok(())
    }

    #[test]
    fn test_success_is_stable() -> anyhow::Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        let reader = StubReader {
            project: ProjectFile {
                tasks: vec![
                    Task {
                        id: Some(1),
                        name: Some("Survey".to_string()),
                        ..Task::default()
                    },
                    Task::default(),
                ],
                resources: vec![Resource {
                    id: Some(3),
                    name: Some("Crane".to_string()),
                    ..Resource::default()
                }],
                ..ProjectFile::default()
            },
            ..StubReader::default()
        };

        let first = run(Some(file.path()), &reader, &Options::default());
        let second = run(Some(file.path()), &reader, &Options::default());
        assert_eq!(first.exit_code, 0);
        assert_eq!(first, second);

        let value: serde_json::Value = serde_json::from_str(&first.document)?;
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        for key in ["project", "tasks", "resources"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["tasks"].as_array().unwrap().len(), 1);
        assert_eq!(value["resources"][0]["type"], 0);
        Ok(())
    }
}
