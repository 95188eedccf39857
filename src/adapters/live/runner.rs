//! Live script runner that spawns real processes.

use std::io;

use tracing::debug;

use crate::ports::runner::{ScriptRequest, ScriptRunner};
use crate::script::{capture_output, CancelToken, Script, ScriptError, Tabbed};

/// Runs scripts as child processes.
///
/// Pass-through output is indented with [`Tabbed`] so tool chatter stands
/// apart from gotag's own messages.
///
/// Without a cancel token scripts stay in gotag's process group, so a
/// terminal interrupt reaches the tools too.
#[derive(Debug, Default)]
pub struct LiveScriptRunner {
    cancel: Option<CancelToken>,
}

impl LiveScriptRunner {
    /// A runner whose scripts, and everything they start, are killed when
    /// `cancel` fires.
    #[must_use]
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel: Some(cancel) }
    }

    fn prepare(&self, request: &ScriptRequest) -> Script<'static> {
        let mut script = request.to_script();
        if let Some(token) = &self.cancel {
            script.set_cancel(token.clone());
        }
        script
    }
}

impl ScriptRunner for LiveScriptRunner {
    fn run(&self, request: &ScriptRequest) -> Result<(), ScriptError> {
        debug!(script = %request.script, "run");
        let mut script = self.prepare(request);
        script.set_stdout(Tabbed::new(io::stdout())).set_stderr(Tabbed::new(io::stderr()));
        script.execute()
    }

    fn output(&self, request: &ScriptRequest) -> Result<String, ScriptError> {
        debug!(script = %request.script, "output");
        let (stdout, _) = capture_output(self.prepare(request)).into_result()?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{render, ArgVector, Interpreter};

    fn sh() -> Interpreter {
        Interpreter::new("sh", "-c", ["-e"])
    }

    #[test]
    fn output_returns_stdout() {
        let text = render(None, &[ArgVector::new("echo").arg("hello world")]).unwrap();
        let result = LiveScriptRunner::default().output(&ScriptRequest::new(&sh(), text)).unwrap();
        assert_eq!(result, "hello world\n");
    }

    #[test]
    fn failed_cd_aborts_the_script() {
        let text = render(
            Some("/nonexistent/gotag/dir"),
            &[ArgVector::new("echo").arg("should not run")],
        )
        .unwrap();
        let err = LiveScriptRunner::default().output(&ScriptRequest::new(&sh(), text)).unwrap_err();
        assert!(matches!(err, ScriptError::Execution { .. }), "{err:?}");
    }

    #[test]
    fn run_reports_exit_status() {
        let request = ScriptRequest { interpreter: sh(), script: "exit 7".into(), args: vec![] };
        let err = LiveScriptRunner::default().run(&request).unwrap_err();
        assert!(matches!(err, ScriptError::Execution { code: Some(7), .. }));
    }

    #[test]
    fn cancel_during_pass_through_run_stops_forked_tools() {
        let token = CancelToken::new();
        let canceller = {
            let token = token.clone();
            std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(100));
                token.cancel();
            })
        };
        let text = render(Some("."), &[ArgVector::new("sleep").arg("3"), ArgVector::new("true")])
            .unwrap();
        let started = std::time::Instant::now();
        let err = LiveScriptRunner::new(token).run(&ScriptRequest::new(&sh(), text)).unwrap_err();
        canceller.join().unwrap();

        assert!(matches!(err, ScriptError::Cancelled { .. }), "{err:?}");
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn cancelled_runner_stops_scripts() {
        let token = CancelToken::new();
        token.cancel();
        let request = ScriptRequest { interpreter: sh(), script: "sleep 5".into(), args: vec![] };
        let err = LiveScriptRunner::new(token).run(&request).unwrap_err();
        assert!(matches!(err, ScriptError::Cancelled { .. }));
    }
}
