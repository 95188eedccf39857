//! Cassette data structures for recording and replaying script runs.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::script::ScriptError;

/// A single recorded call through a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (e.g. "script").
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port, `{"Ok": ..}` or `{"Err": ..}`.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Version of gotag that recorded it.
    pub version: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// Serializable form of a [`ScriptError`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordedError {
    /// See [`ScriptError::Quote`].
    Quote {
        /// Value that could not be quoted.
        value: String,
    },
    /// See [`ScriptError::Spawn`].
    Spawn {
        /// OS error text.
        message: String,
    },
    /// See [`ScriptError::Execution`].
    Execution {
        /// Exit code, if any.
        code: Option<i32>,
        /// Captured standard error tail.
        #[serde(default)]
        stderr: String,
    },
    /// See [`ScriptError::Cancelled`].
    Cancelled,
    /// See [`ScriptError::Io`].
    Io {
        /// I/O error text.
        message: String,
    },
}

impl From<&ScriptError> for RecordedError {
    fn from(err: &ScriptError) -> Self {
        match err {
            ScriptError::Quote { value, .. } => Self::Quote { value: value.clone() },
            ScriptError::Spawn { source, .. } => Self::Spawn { message: source.to_string() },
            ScriptError::Execution { code, stderr, .. } => {
                Self::Execution { code: *code, stderr: stderr.clone() }
            }
            ScriptError::Cancelled { .. } => Self::Cancelled,
            ScriptError::Io { source, .. } => Self::Io { message: source.to_string() },
        }
    }
}

impl RecordedError {
    /// Rebuilds the error as if `program` had just failed this way.
    #[must_use]
    pub fn into_error(self, program: &str) -> ScriptError {
        let program = program.to_string();
        match self {
            Self::Quote { value } => ScriptError::Quote { value, reason: "replayed from cassette" },
            Self::Spawn { message } => {
                ScriptError::Spawn { program, source: io::Error::other(message) }
            }
            Self::Execution { code, stderr } => ScriptError::Execution { program, code, stderr },
            Self::Cancelled => ScriptError::Cancelled { program },
            Self::Io { message } => ScriptError::Io { program, source: io::Error::other(message) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_round_trip() {
        let cassette = Cassette {
            name: "tag-run".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "script".into(),
                method: "output".into(),
                input: json!({"script": "git tag -l"}),
                output: json!({"Ok": "go.r60\n"}),
            }],
        };
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        let deserialized: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(cassette, deserialized);
    }

    #[test]
    fn execution_error_survives_recording() {
        let err = ScriptError::Execution {
            program: "bash".into(),
            code: Some(128),
            stderr: "fatal\n".into(),
        };
        let recorded = serde_json::to_value(RecordedError::from(&err)).unwrap();
        assert_eq!(recorded, json!({"kind": "execution", "code": 128, "stderr": "fatal\n"}));

        let back: RecordedError = serde_json::from_value(recorded).unwrap();
        match back.into_error("bash") {
            ScriptError::Execution { program, code, stderr } => {
                assert_eq!(program, "bash");
                assert_eq!(code, Some(128));
                assert_eq!(stderr, "fatal\n");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn spawn_error_keeps_its_kind() {
        let recorded: RecordedError =
            serde_json::from_value(json!({"kind": "spawn", "message": "No such file"})).unwrap();
        let err = recorded.into_error("bash");
        assert!(matches!(err, ScriptError::Spawn { .. }));
        assert!(err.to_string().contains("No such file"));
    }
}
