pub mod mpxj;
pub mod mspdi;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DecodeError;
use crate::project::ProjectFile;

pub use mpxj::MpxjConverter;
pub use mspdi::MspdiReader;

/// Decodes a project file into a [`ProjectFile`].
pub trait ProjectReader {
    fn read(&self, path: &Path) -> Result<ProjectFile, DecodeError>;
}

const OLE2_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Binary MPP, stored as an OLE2 compound document.
    Mpp,
    /// Microsoft Project XML.
    Mspdi,
}

impl FileFormat {
    pub fn detect(header: &[u8]) -> Option<Self> {
        if header.starts_with(&OLE2_SIGNATURE) {
            return Some(FileFormat::Mpp);
        }

        let text = header.strip_prefix(&UTF8_BOM).unwrap_or(header);
        text.iter()
            .find(|byte| !byte.is_ascii_whitespace())
            .filter(|&&byte| byte == b'<')
            .map(|_| FileFormat::Mspdi)
    }

    pub fn sniff(path: &Path) -> Result<Option<Self>, DecodeError> {
        let mut header = Vec::with_capacity(512);
        File::open(path)?.take(512).read_to_end(&mut header)?;
        Ok(Self::detect(&header))
    }
}

/// Picks a decoder from the file's leading bytes, independent of its extension.
#[derive(Debug, Default)]
pub struct UniversalProjectReader {
    mspdi: MspdiReader,
    mpxj: Option<MpxjConverter>,
}

impl UniversalProjectReader {
    pub fn new(mpxj: Option<MpxjConverter>) -> Self {
        Self {
            mspdi: MspdiReader,
            mpxj,
        }
    }
}

impl ProjectReader for UniversalProjectReader {
    fn read(&self, path: &Path) -> Result<ProjectFile, DecodeError> {
        let format = FileFormat::sniff(path)?;
        log::debug!("detected format {:?} for {}", format, path.display());

        match format {
            Some(FileFormat::Mspdi) => self.mspdi.read(path),
            Some(FileFormat::Mpp) => match &self.mpxj {
                Some(converter) => converter.read(path),
                None => Err(DecodeError::Converter(
                    "binary MPP files need --mpxj-classpath pointing at the MPXJ jars".to_string(),
                )),
            },
            None => Err(DecodeError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
