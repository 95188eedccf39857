//! Recording adapter for the `ScriptRunner` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::SCRIPT_PORT;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::runner::{ScriptRequest, ScriptRunner};
use crate::script::ScriptError;

/// Records script runs while delegating to an inner runner.
pub struct RecordingScriptRunner {
    inner: Box<dyn ScriptRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingScriptRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn ScriptRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ScriptRunner for RecordingScriptRunner {
    fn run(&self, request: &ScriptRequest) -> Result<(), ScriptError> {
        let result = self.inner.run(request);
        record_result(&self.recorder, SCRIPT_PORT, "run", request, &result);
        result
    }

    fn output(&self, request: &ScriptRequest) -> Result<String, ScriptError> {
        let result = self.inner.output(request);
        record_result(&self.recorder, SCRIPT_PORT, "output", request, &result);
        result
    }
}
