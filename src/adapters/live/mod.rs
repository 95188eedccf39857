//! Live adapters for real external interactions.

pub mod runner;

pub use runner::LiveScriptRunner;
