//! Renders argument vectors into shell script text.

use std::fmt;

use super::error::ScriptError;
use super::quote::quote;

/// Working directory sentinel meaning "stay where you are".
pub const CURRENT_DIR: &str = ".";

/// One shell invocation: program followed by its arguments, unquoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgVector(Vec<String>);

impl ArgVector {
    /// Starts a vector with the program to run.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self(vec![program.into()])
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.0.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program followed by its arguments.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn render(&self) -> Result<String, ScriptError> {
        let words = self.0.iter().map(|word| quote(word)).collect::<Result<Vec<_>, _>>()?;
        Ok(words.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for ArgVector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Commands to run in order, optionally from another directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSpec {
    /// Directory to change into first; `None`, `""` or `"."` means the current one.
    pub dir: Option<String>,
    /// Commands, in execution order.
    pub commands: Vec<ArgVector>,
}

impl ScriptSpec {
    /// A spec that runs `commands` from `dir`.
    #[must_use]
    pub fn new(dir: Option<String>, commands: Vec<ArgVector>) -> Self {
        Self { dir, commands }
    }

    /// Renders this spec; see [`render`].
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Quote`] when any word cannot be quoted.
    pub fn render(&self) -> Result<RenderedScript, ScriptError> {
        render(self.dir.as_deref(), &self.commands)
    }
}

/// Shell source ready to hand to an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScript(String);

impl RenderedScript {
    /// The script text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the script, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders `commands` as newline separated shell lines, preceded by a `cd`
/// into `dir` unless it is absent, empty or [`CURRENT_DIR`].
///
/// The output carries no trailing newline and is identical for identical
/// inputs.
///
/// # Errors
///
/// Returns [`ScriptError::Quote`] when the directory or any word cannot be
/// quoted.
pub fn render(dir: Option<&str>, commands: &[ArgVector]) -> Result<RenderedScript, ScriptError> {
    let mut lines = Vec::with_capacity(commands.len() + 1);
    if let Some(dir) = dir.filter(|dir| !dir.is_empty() && *dir != CURRENT_DIR) {
        lines.push(format!("cd {}", quote(dir)?));
    }
    for command in commands {
        lines.push(command.render()?);
    }
    Ok(RenderedScript(lines.join("\n")))
}
