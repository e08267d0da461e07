use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning a project file into JSON.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    DecodeFailed(#[from] DecodeError),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Could not encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ParseError {
    /// Stable tag used by the tagged error style.
    pub fn tag(&self) -> &'static str {
        match self {
            ParseError::NotFound(_) => "NOT_FOUND",
            ParseError::DecodeFailed(_) => "DECODE_FAILED",
            ParseError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ParseError::Encode(_) => "ENCODE_FAILED",
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid Microsoft Project XML: {0}")]
    Xml(#[from] minidom::Error),
    #[error("Invalid Microsoft Project XML: {0}")]
    InvalidDocument(String),
    #[error("Invalid value `{value}` for <{element}>")]
    InvalidField {
        element: &'static str,
        value: String,
    },
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("MPXJ conversion failed: {0}")]
    Converter(String),
}
