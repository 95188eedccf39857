//! Go version discovery through the toolchain linker.

use super::Shell;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ports::{GoVersion, Toolchain};
use crate::script::ArgVector;

/// Linker shipped for `arch`, named as in [`std::env::consts::ARCH`].
#[must_use]
pub fn linker_for_arch(arch: &str) -> Option<&'static str> {
    match arch {
        "x86_64" => Some("6l"),
        "x86" => Some("8l"),
        "arm" => Some("5l"),
        _ => None,
    }
}

/// Parses `<linker> -V` output such as `6l version weekly.2011-11-02 10300`.
///
/// # Errors
///
/// Returns [`Error::VersionOutput`] when there are fewer than two fields or
/// the last one is not a revision number.
pub fn parse_version(output: &str) -> Result<GoVersion> {
    let fields: Vec<&str> = output.split_whitespace().collect();
    let unrecognized = || Error::VersionOutput(output.trim().to_string());
    let [.., version, revision] = fields.as_slice() else {
        return Err(unrecognized());
    };
    let revision = revision.parse().map_err(|_| unrecognized())?;
    Ok(GoVersion { version: (*version).to_string(), revision })
}

/// Asks the linker which Go release it belongs to.
pub struct LinkerToolchain<'a> {
    linker: String,
    shell: Shell<'a>,
}

impl<'a> LinkerToolchain<'a> {
    /// Queries `linker`.
    #[must_use]
    pub fn new(linker: impl Into<String>, shell: Shell<'a>) -> Self {
        Self { linker: linker.into(), shell }
    }

    /// Queries the linker for `arch`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownArch`] when no linker is known for `arch`.
    pub fn for_arch(arch: &str, shell: Shell<'a>) -> Result<Self> {
        linker_for_arch(arch)
            .map(|linker| Self::new(linker, shell))
            .ok_or_else(|| Error::UnknownArch(arch.to_string()))
    }

    /// Uses the configured linker, falling back to the one for this machine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownArch`] when nothing is configured and this
    /// architecture has no known linker.
    pub fn from_config(config: &Config, shell: Shell<'a>) -> Result<Self> {
        match &config.linker {
            Some(linker) => Ok(Self::new(linker.clone(), shell)),
            None => Self::for_arch(std::env::consts::ARCH, shell),
        }
    }
}

impl Toolchain for LinkerToolchain<'_> {
    fn program(&self) -> &str {
        &self.linker
    }

    fn version(&self) -> Result<GoVersion> {
        let output = self.shell.output(None, &[ArgVector::new(&self.linker).arg("-V")])?;
        parse_version(&output)
    }
}
