//! Script runner port: the single boundary through which tools execute.

use serde::{Deserialize, Serialize};

use crate::script::{Interpreter, RenderedScript, Script, ScriptError};

/// A rendered script bound to the interpreter that should run it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    /// Interpreter that executes the text.
    pub interpreter: Interpreter,
    /// Script source.
    pub script: String,
    /// Positional arguments after the script text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl ScriptRequest {
    /// Binds `script` to `interpreter` with no positional arguments.
    #[must_use]
    pub fn new(interpreter: &Interpreter, script: RenderedScript) -> Self {
        Self { interpreter: interpreter.clone(), script: script.into_string(), args: Vec::new() }
    }

    /// Builds the executable handle for this request.
    #[must_use]
    pub fn to_script(&self) -> Script<'static> {
        self.interpreter.script(&self.script, &self.args)
    }
}

/// Runs scripts on behalf of the tool wrappers.
///
/// Abstracting execution lets the tag workflow be recorded once against real
/// tools and replayed deterministically afterwards.
pub trait ScriptRunner: Send + Sync {
    /// Runs the script, letting its output pass through to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot start or exits unsuccessfully.
    fn run(&self, request: &ScriptRequest) -> Result<(), ScriptError>;

    /// Runs the script and returns what it wrote to standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot start or exits unsuccessfully.
    fn output(&self, request: &ScriptRequest) -> Result<String, ScriptError>;
}
