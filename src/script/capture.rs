//! Runs a script and keeps what it printed.

use super::error::ScriptError;
use super::exec::Script;

/// Everything a captured script printed, alongside how it ended.
#[derive(Debug)]
pub struct CapturedOutput {
    /// Bytes written to standard output.
    pub stdout: Vec<u8>,
    /// Bytes written to standard error.
    pub stderr: Vec<u8>,
    /// Outcome of the run.
    pub result: Result<(), ScriptError>,
}

impl CapturedOutput {
    /// Standard output decoded lossily as UTF-8.
    #[must_use]
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Returns `(stdout, stderr)` on success, dropping the buffers on failure.
    ///
    /// # Errors
    ///
    /// Returns the script's error when it did not succeed.
    pub fn into_result(self) -> Result<(Vec<u8>, Vec<u8>), ScriptError> {
        self.result.map(|()| (self.stdout, self.stderr))
    }
}

/// Runs `script` with standard output and error captured in memory.
///
/// Both buffers are returned even when the script fails, so callers can show
/// what was printed before the failure.
pub fn capture_output(script: Script<'_>) -> CapturedOutput {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let result = {
        let mut script = script;
        script.set_stdout(&mut stdout).set_stderr(&mut stderr);
        script.execute()
    };
    CapturedOutput { stdout, stderr, result }
}

/// Runs `script` with standard output and error interleaved into one
/// buffer, returned together with the outcome.
pub fn capture_combined(script: Script<'_>) -> (Vec<u8>, Result<(), ScriptError>) {
    let mut combined = Vec::new();
    let result = {
        let mut script = script;
        script.set_combined_output(&mut combined);
        script.execute()
    };
    (combined, result)
}
