//! Port traits defining external boundaries.
//!
//! Each trait separates the workflows from one family of external tools.
//! Implementations live in `src/tools/` (tool families) and `src/adapters/`
//! (script execution).

pub mod project;
pub mod repository;
pub mod runner;
pub mod toolchain;

pub use project::{build_and_clean, Project};
pub use repository::{NewTag, Repository};
pub use runner::{ScriptRequest, ScriptRunner};
pub use toolchain::{GoVersion, Toolchain};
