//! Interpreters that execute literal text as code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::exec::Script;

/// Describes how to run `program [extra_flags...] execute_flag TEXT [args...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpreter {
    /// Executable name or path.
    pub program: String,
    /// Flag that makes the program execute the next argument as code.
    pub execute_flag: String,
    /// Flags placed before the execute flag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_flags: Vec<String>,
}

impl Interpreter {
    /// Describes a new interpreter.
    pub fn new<I, S>(
        program: impl Into<String>,
        execute_flag: impl Into<String>,
        extra_flags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            execute_flag: execute_flag.into(),
            extra_flags: extra_flags.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a copy with `flags` appended to the extra flags.
    #[must_use]
    pub fn with_extra_flags<I, S>(&self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut interpreter = self.clone();
        interpreter.extra_flags.extend(flags.into_iter().map(Into::into));
        interpreter
    }

    /// Argument list passed to the program.
    ///
    /// The code must directly follow the execute flag, so the order is fixed:
    /// extra flags, execute flag, `text`, then `args`.
    #[must_use]
    pub fn argv(&self, text: &str, args: &[String]) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.extra_flags.len() + 2 + args.len());
        argv.extend(self.extra_flags.iter().cloned());
        argv.push(self.execute_flag.clone());
        argv.push(text.to_string());
        argv.extend(args.iter().cloned());
        argv
    }

    /// Builds a script that runs `text` with positional `args`.
    #[must_use]
    pub fn script(&self, text: &str, args: &[String]) -> Script<'static> {
        Script::new(&self.program, self.argv(text, args))
    }
}

/// Immutable lookup table of known interpreters, keyed by short name.
#[derive(Debug, Clone)]
pub struct Interpreters {
    entries: BTreeMap<String, Interpreter>,
}

impl Interpreters {
    /// The standard table: `bash`, `ruby`, `perl` and `python`.
    #[must_use]
    pub fn standard() -> Self {
        let no_flags: [&str; 0] = [];
        let entries = [
            ("bash", Interpreter::new("bash", "-c", no_flags)),
            ("ruby", Interpreter::new("ruby", "-e", no_flags)),
            ("perl", Interpreter::new("perl", "-e", no_flags)),
            ("python", Interpreter::new("python3", "-c", no_flags)),
        ];
        Self { entries: entries.into_iter().map(|(name, i)| (name.to_string(), i)).collect() }
    }

    /// Looks up an interpreter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Interpreter> {
        self.entries.get(name)
    }

    /// Known names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
