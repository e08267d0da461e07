use clap::ValueEnum;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::error::ParseError;

/// Kind reported for every failure by the legacy envelope. Existing callers
/// match on it, so it is kept verbatim.
pub const COMPAT_ERROR_KIND: &str = "PYTHON_PARSER_ERROR";

pub const NO_FILE_MESSAGE: &str = "No file provided";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorStyle {
    /// `{"error": "PYTHON_PARSER_ERROR", "message": ...}` for every failure
    #[default]
    Compat,
    /// `{"error": <variant tag>, "message": ...}`
    Tagged,
}

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: &ParseError, style: ErrorStyle) -> Self {
        let kind = match style {
            ErrorStyle::Compat => COMPAT_ERROR_KIND,
            ErrorStyle::Tagged => error.tag(),
        };
        Self {
            error: kind.to_string(),
            message: Some(error.to_string()),
        }
    }

    /// Envelope for an invocation without a file argument. The compat shape
    /// carries the message in `error` and has no kind.
    pub fn no_file(style: ErrorStyle) -> Self {
        match style {
            ErrorStyle::Compat => Self {
                error: NO_FILE_MESSAGE.to_string(),
                message: None,
            },
            ErrorStyle::Tagged => Self::new(
                &ParseError::InvalidArgument(NO_FILE_MESSAGE.to_string()),
                style,
            ),
        }
    }
}

pub fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
