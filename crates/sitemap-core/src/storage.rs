//! Reading and writing sitemap files.
//!
//! The document model only deals in text; this module moves that text to and
//! from disk. Files whose name ends in `.gz` are transparently gzip
//! compressed. Writes go to a sibling temporary file first and are renamed
//! into place, so a failed write never leaves a truncated sitemap behind.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression as GzLevel;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::error::{Error, Result};

/// On-disk encoding of a sitemap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain UTF-8 XML.
    None,
    /// Gzip-compressed XML.
    Gzip,
}

impl Compression {
    /// Pick the encoding from the file name: `.gz` means gzip.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Self::Gzip,
            _ => Self::None,
        }
    }
}

/// Read a whole sitemap file into text, decompressing if needed.
pub fn read_document(path: &Path) -> Result<String> {
    let compression = Compression::for_path(path);
    let bytes = fs::read(path)?;

    let text = match compression {
        Compression::None => String::from_utf8(bytes)
            .map_err(|e| Error::Parse(format!("{} is not valid UTF-8: {e}", path.display())))?,
        Compression::Gzip => {
            let mut text = String::new();
            GzDecoder::new(bytes.as_slice())
                .read_to_string(&mut text)
                .map_err(|e| {
                    Error::Parse(format!("Failed to decompress {}: {e}", path.display()))
                })?;
            text
        },
    };

    debug!(path = %path.display(), ?compression, bytes = text.len(), "Read sitemap");
    Ok(text)
}

/// Write a whole sitemap file from text, compressing if needed.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    let compression = Compression::for_path(path);
    let bytes = match compression {
        Compression::None => text.as_bytes().to_vec(),
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), GzLevel::default());
            encoder.write_all(text.as_bytes())?;
            encoder.finish()?
        },
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, &bytes)?;

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    debug!(path = %path.display(), ?compression, bytes = bytes.len(), "Wrote sitemap");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
