//! Replaying adapters that serve interactions from cassettes.

pub mod runner;

use std::io;

use serde::de::DeserializeOwned;

use crate::cassette::format::RecordedError;
use crate::script::ScriptError;

pub use runner::ReplayingScriptRunner;

/// Extracts a script result from a cassette output value.
///
/// Mirror of `recording::record_result`. A value that does not deserialize
/// surfaces as [`ScriptError::Io`] with `InvalidData`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    program: &str,
    context: &str,
) -> Result<T, ScriptError> {
    let malformed = |e: serde_json::Error| ScriptError::Io {
        program: program.to_string(),
        source: io::Error::new(io::ErrorKind::InvalidData, format!("{context}: {e}")),
    };
    if let Some(err) = output.get("Err") {
        let recorded: RecordedError = serde_json::from_value(err.clone()).map_err(malformed)?;
        return Err(recorded.into_error(program));
    }
    let value = output.get("Ok").unwrap_or(output);
    serde_json::from_value(value.clone()).map_err(malformed)
}
