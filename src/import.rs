//! Decoding user-supplied files into input text.

use encoding_rs::{Encoding, UTF_8};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File is not valid {encoding} text")]
    DecodeFailure { encoding: &'static str },

    #[error("Unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),
}

/// Turns raw file bytes into text.
///
/// The declared encoding is a WHATWG label such as `utf-8`, `latin1` or
/// `utf-16le`; without one the content is read as UTF-8. A byte-order mark
/// takes precedence over the declared encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImporter;

impl FileImporter {
    /// Decode `contents`, rejecting malformed input instead of replacing it.
    pub fn decode(
        &self,
        contents: &[u8],
        declared_encoding: Option<&str>,
    ) -> Result<String, ImportError> {
        let declared = match declared_encoding.map(str::trim) {
            Some(label) if !label.is_empty() => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| ImportError::UnsupportedEncoding(label.to_string()))?,
            _ => UTF_8,
        };

        let (encoding, body) = match Encoding::for_bom(contents) {
            Some((bom_encoding, bom_len)) => (bom_encoding, &contents[bom_len..]),
            None => (declared, contents),
        };

        let text = encoding
            .decode_without_bom_handling_and_without_replacement(body)
            .ok_or(ImportError::DecodeFailure {
                encoding: encoding.name(),
            })?;

        debug!(
            "Decoded {} bytes as {} ({} chars)",
            contents.len(),
            encoding.name(),
            text.chars().count()
        );

        Ok(text.into_owned())
    }

    /// Read a file from disk and decode it.
    pub fn read_file(
        &self,
        path: &Path,
        declared_encoding: Option<&str>,
    ) -> Result<String, ImportError> {
        let contents = std::fs::read(path)?;
        self.decode(&contents, declared_encoding)
    }
}
