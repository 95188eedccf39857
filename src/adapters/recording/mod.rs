//! Recording adapters that capture interactions to cassettes.

pub mod runner;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::format::RecordedError;
use crate::cassette::recorder::CassetteRecorder;
use crate::script::ScriptError;

pub use runner::RecordingScriptRunner;

/// Record a script result using the Ok/Err JSON convention.
///
/// Mirror of `replaying::replay_result`:
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(e)` is serialized as `{"Err": RecordedError}`
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, ScriptError>,
) where
    T: Serialize,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "Ok": inner })
        }
        Err(e) => {
            let inner = serde_json::to_value(RecordedError::from(e))
                .expect("failed to serialize recorded error");
            serde_json::json!({ "Err": inner })
        }
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
