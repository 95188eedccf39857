//! Cassette format for recording and replaying script runs.

pub mod format;
pub mod recorder;
pub mod replayer;

use std::path::Path;

use crate::error::{Error, Result};
use format::Cassette;

/// Reads and parses a cassette file.
///
/// # Errors
///
/// Returns [`Error::Cassette`] if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Cassette> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Cassette(format!("failed to read {}: {e}", path.display())))?;
    serde_yaml::from_str(&content)
        .map_err(|e| Error::Cassette(format!("failed to parse {}: {e}", path.display())))
}
