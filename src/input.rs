//! Input acquisition: reads a whole file or the whole of standard input.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::CliError;

/// Where an action reads its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// An absent or empty path means standard input.
    pub fn from_arg(path: Option<&str>) -> Self {
        match path {
            Some(path) if !path.is_empty() => InputSource::File(PathBuf::from(path)),
            _ => InputSource::Stdin,
        }
    }

    /// Reads the source to exhaustion. `stdin` is only touched for
    /// [`InputSource::Stdin`].
    pub fn read<R: Read>(&self, mut stdin: R) -> Result<String, CliError> {
        let bytes = match self {
            InputSource::Stdin => {
                let mut bytes = Vec::new();
                stdin.read_to_end(&mut bytes).map_err(CliError::ReadStdin)?;
                bytes
            }
            InputSource::File(path) => fs::read(path).map_err(|source| CliError::ReadFile {
                path: path.clone(),
                source,
            })?,
        };
        tracing::debug!(source = ?self, bytes = bytes.len(), "read input");
        Ok(decode(bytes, self))
    }
}

/// Decodes input as UTF-8, replacing invalid sequences.
fn decode(bytes: Vec<u8>, source: &InputSource) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(source = ?source, "input is not valid UTF-8; replacing invalid sequences");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}
