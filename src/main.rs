//! Binary entrypoint for the `gotag` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are selected in commands::dispatch via GOTAG_RECORD / GOTAG_REPLAY.
    match gotag::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gotag: {err}");
            ExitCode::FAILURE
        }
    }
}
