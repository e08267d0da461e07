//! Binary MPP decoding through the MPXJ Java library.
//!
//! MPXJ ships a converter class that reads any format it understands and
//! writes the format implied by the output file extension. We ask it for
//! MSPDI and decode that with [`MspdiReader`].

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

use crate::error::DecodeError;
use crate::project::ProjectFile;
use crate::reader::{MspdiReader, ProjectReader};

pub const DEFAULT_MAIN_CLASS: &str = "net.sf.mpxj.sample.MpxjConvert";

const CLASSPATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

#[derive(Debug, Clone)]
pub struct MpxjConverter {
    pub java: PathBuf,
    /// A single jar, or a directory searched recursively for jars.
    pub location: PathBuf,
    pub main_class: String,
}

impl MpxjConverter {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            java: PathBuf::from("java"),
            location: location.into(),
            main_class: DEFAULT_MAIN_CLASS.to_string(),
        }
    }

    pub fn classpath(&self) -> Result<String> {
        if !self.location.is_dir() {
            return Ok(self.location.to_string_lossy().into_owned());
        }

        let mut jars: Vec<PathBuf> = WalkDir::new(&self.location)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|dir_entry| dir_entry.file_type().is_file())
            .filter(|dir_entry| dir_entry.path().extension().is_some_and(|ex| ex == "jar"))
            .map(|dir_entry| PathBuf::from(dir_entry.path()))
            .collect();

        if jars.is_empty() {
            return Err(anyhow!(
                "no jar files found under `{}`",
                self.location.display()
            ));
        }

        jars.sort();
        Ok(jars
            .iter()
            .map(|jar| jar.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(CLASSPATH_SEPARATOR))
    }

    /// Run MPXJ to rewrite `input` as MSPDI at `output`.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let classpath = self.classpath()?;
        log::info!(
            "converting {} with {} ({})",
            input.display(),
            self.main_class,
            self.java.display()
        );

        let result = Command::new(&self.java)
            .arg("-cp")
            .arg(&classpath)
            .arg(&self.main_class)
            .arg(input)
            .arg(output)
            .output()
            .with_context(|| format!("could not launch `{}`", self.java.display()))?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        if stderr.is_empty() {
            Err(anyhow!("converter exited with {}", result.status))
        } else {
            Err(anyhow!(stderr))
        }
    }
}

impl ProjectReader for MpxjConverter {
    fn read(&self, path: &Path) -> Result<ProjectFile, DecodeError> {
        // Removed on drop.
        let output = tempfile::Builder::new()
            .prefix("mpp2json-")
            .suffix(".xml")
            .tempfile()?;

        self.convert(path, output.path())
            .map_err(|error| DecodeError::Converter(format!("{:#}", error)))?;
        MspdiReader.read(output.path())
    }
}
