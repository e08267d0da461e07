//! Read Microsoft Project files and flatten their tasks and resources into JSON.

pub mod convert;
pub mod duration;
pub mod error;
pub mod export;
pub mod output;
pub mod project;
pub mod reader;

pub use convert::{parse_project_file, run, Options, Outcome};
pub use error::{DecodeError, ParseError};
pub use export::ProjectExport;
pub use reader::{ProjectReader, UniversalProjectReader};
