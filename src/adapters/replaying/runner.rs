//! Replaying adapter for the `ScriptRunner` port.

use std::io;
use std::sync::Mutex;

use super::replay_result;
use crate::adapters::SCRIPT_PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::runner::{ScriptRequest, ScriptRunner};
use crate::script::ScriptError;

/// Replays recorded script results from a cassette.
///
/// Every request must match the recorded one, so replay doubles as a check
/// that the same scripts are rendered in the same order. A request the
/// cassette cannot serve fails with [`ScriptError::Io`] (`InvalidData`)
/// describing the mismatch.
pub struct ReplayingScriptRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingScriptRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Number of recorded interactions not yet replayed.
    ///
    /// # Panics
    ///
    /// Panics if the replayer lock is poisoned.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().expect("replayer lock poisoned").remaining()
    }

    fn next_output(
        &self,
        method: &str,
        request: &ScriptRequest,
    ) -> Result<serde_json::Value, ScriptError> {
        let input = serde_json::to_value(request).expect("failed to serialize replay input");
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        match replayer.next_interaction(SCRIPT_PORT, method, &input) {
            Ok(interaction) => Ok(interaction.output.clone()),
            Err(e) => Err(ScriptError::Io {
                program: request.interpreter.program.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, e),
            }),
        }
    }
}

impl ScriptRunner for ReplayingScriptRunner {
    fn run(&self, request: &ScriptRequest) -> Result<(), ScriptError> {
        let output = self.next_output("run", request)?;
        replay_result(&output, &request.interpreter.program, "script::run")
    }

    fn output(&self, request: &ScriptRequest) -> Result<String, ScriptError> {
        let output = self.next_output("output", request)?;
        replay_result(&output, &request.interpreter.program, "script::output")
    }
}
