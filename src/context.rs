//! Service context bundling the script runner with the resolved shell.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::adapters::live::LiveScriptRunner;
use crate::adapters::recording::RecordingScriptRunner;
use crate::adapters::replaying::ReplayingScriptRunner;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::error::Result;
use crate::ports::ScriptRunner;
use crate::script::{Interpreter, Interpreters};
use crate::tools::Shell;

/// Everything the workflows need to reach external tools.
///
/// Constructors wire different runner implementations (live, recording,
/// replaying) behind the same [`ScriptRunner`] port.
pub struct ServiceContext {
    /// Runner every tool script goes through.
    pub runner: Box<dyn ScriptRunner>,
    /// Shell that interprets rendered tool scripts.
    pub shell: Interpreter,
    /// Settings the context was built from.
    pub config: Config,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Picks the context `config` asks for: replaying when `GOTAG_REPLAY`
    /// is set, recording when `GOTAG_RECORD` is set, live otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be resolved or the replay
    /// cassette cannot be loaded.
    pub fn from_config(config: Config) -> Result<Self> {
        if let Some(path) = config.replay.clone() {
            return Self::replaying(config, &path);
        }
        if let Some(path) = config.record.clone() {
            return Self::recording(config, &path);
        }
        Self::live(config)
    }

    /// Runs tool scripts for real.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be resolved.
    pub fn live(config: Config) -> Result<Self> {
        let shell = config.shell(&Interpreters::standard())?;
        Ok(Self { runner: Box::new(LiveScriptRunner::default()), shell, config, recorder: None })
    }

    /// Runs tool scripts for real and writes every run to a cassette at
    /// `path` when the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be resolved.
    pub fn recording(config: Config, path: &Path) -> Result<Self> {
        let shell = config.shell(&Interpreters::standard())?;
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            "gotag-session",
            env!("CARGO_PKG_VERSION"),
        )));
        debug!(cassette = %path.display(), "recording script runs");
        let runner = RecordingScriptRunner::new(
            Box::new(LiveScriptRunner::default()),
            Arc::clone(&recorder),
        );
        Ok(Self { runner: Box::new(runner), shell, config, recorder: Some(recorder) })
    }

    /// Serves script runs from the cassette at `path` without starting any
    /// process.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be resolved or the cassette
    /// cannot be read or parsed.
    pub fn replaying(config: Config, path: &Path) -> Result<Self> {
        let shell = config.shell(&Interpreters::standard())?;
        let cassette = crate::cassette::load(path)?;
        debug!(
            cassette = %path.display(),
            interactions = cassette.interactions.len(),
            "replaying script runs"
        );
        let runner = ReplayingScriptRunner::new(CassetteReplayer::new(&cassette));
        Ok(Self { runner: Box::new(runner), shell, config, recorder: None })
    }

    /// Shell handle the tool families run their commands through.
    #[must_use]
    pub fn tools_shell(&self) -> Shell<'_> {
        Shell::new(&self.shell, self.runner.as_ref())
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        match recorder.lock() {
            Ok(recorder) => match recorder.save() {
                Ok(path) => debug!(cassette = %path.display(), "cassette written"),
                Err(e) => warn!("failed to write cassette {}: {e}", recorder.path().display()),
            },
            Err(_) => warn!("cassette recorder lock poisoned; cassette not written"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::ports::ScriptRequest;
    use crate::script::{render, ArgVector};
    use chrono::Utc;
    use serde_json::json;

    fn sh_config() -> Config {
        Config { shell: Some("sh".into()), ..Config::default() }
    }

    fn true_request(shell: &Interpreter) -> ScriptRequest {
        ScriptRequest::new(shell, render(None, &[ArgVector::new("true")]).unwrap())
    }

    #[test]
    fn recording_context_writes_cassette_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");

        let ctx = ServiceContext::recording(sh_config(), &path).unwrap();
        let request = true_request(&ctx.shell);
        ctx.runner.run(&request).unwrap();
        assert!(!path.exists());
        drop(ctx);

        let cassette = crate::cassette::load(&path).unwrap();
        assert_eq!(cassette.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].port, "script");
        assert_eq!(cassette.interactions[0].method, "run");
        assert_eq!(cassette.interactions[0].output, json!({ "Ok": null }));
    }

    #[test]
    fn replaying_context_serves_recorded_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.cassette.yaml");
        let shell = sh_config().shell(&Interpreters::standard()).unwrap();
        let request = ScriptRequest::new(
            &shell,
            render(Some("/src/widget"), &[ArgVector::new("git").args(["tag", "-l"])]).unwrap(),
        );
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "script".into(),
                method: "output".into(),
                input: serde_json::to_value(&request).unwrap(),
                output: json!({ "Ok": "go.r60\n" }),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let config = Config { replay: Some(path), ..sh_config() };
        let ctx = ServiceContext::from_config(config).unwrap();
        assert_eq!(ctx.runner.output(&request).unwrap(), "go.r60\n");
    }

    #[test]
    fn missing_replay_cassette_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { replay: Some(dir.path().join("absent.yaml")), ..sh_config() };
        assert!(ServiceContext::from_config(config).is_err());
    }

    #[test]
    fn live_context_uses_configured_shell() {
        let ctx = ServiceContext::from_config(sh_config()).unwrap();
        assert_eq!(ctx.shell.program, "sh");
        ctx.runner.run(&true_request(&ctx.shell)).unwrap();
    }
}
