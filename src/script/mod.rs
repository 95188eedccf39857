//! Shell script construction and execution.
//!
//! Callers describe commands as [`ArgVector`]s, [`render`] them into shell
//! text, bind that text to an [`Interpreter`] to get a [`Script`], and either
//! run it with inherited or redirected streams or [`capture_output`] to read
//! what it printed. [`Tabbed`] indents pass-through output.

pub mod capture;
pub mod error;
pub mod exec;
pub mod interpreter;
pub mod quote;
pub mod render;
pub mod tabbed;

pub use capture::{capture_combined, capture_output, CapturedOutput};
pub use error::ScriptError;
pub use exec::{CancelToken, Script};
pub use interpreter::{Interpreter, Interpreters};
pub use quote::quote;
pub use render::{render, ArgVector, RenderedScript, ScriptSpec, CURRENT_DIR};
pub use tabbed::Tabbed;
