//! Helpers for running configuration tests inside a [`figment::Jail`].
//!
//! A jail gives each test a private working directory and environment, which
//! is what layered settings resolution needs to be tested in isolation.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Runs `f` inside a jail and returns its output as an `anyhow::Result`.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure returned no value"))
}

/// Returns the jail's working directory as a UTF-8 path.
///
/// # Errors
///
/// Returns a [`figment::Error`] if the directory is not valid UTF-8.
pub fn jail_root(jail: &figment::Jail) -> figment::error::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(jail.directory().to_path_buf())
        .map_err(|path| figment::Error::from(format!("jail path is not UTF-8: {}", path.display())))
}
