//! Implementations of the script runner port.

pub mod live;
pub mod recording;
pub mod replaying;

/// Port name under which script runs are recorded.
pub(crate) const SCRIPT_PORT: &str = "script";
