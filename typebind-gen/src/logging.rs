//! Diagnostic logging for the command-line front end.

use tracing_subscriber::EnvFilter;

use crate::error::TypebindError;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "TYPEBIND_LOG";

/// Chooses the filter directive.
///
/// Repeated `-v` flags win over the environment; otherwise `env_directive`
/// applies, falling back to `info` for this crate.
#[must_use]
pub fn directive(verbosity: u8, env_directive: Option<String>) -> String {
    match (verbosity, env_directive) {
        (0, Some(value)) if !value.trim().is_empty() => value,
        (0, _) => "typebind_gen=info".to_owned(),
        (1, _) => "typebind_gen=debug".to_owned(),
        _ => "typebind_gen=trace".to_owned(),
    }
}

/// Installs a stderr `fmt` subscriber.
///
/// # Errors
///
/// Returns [`TypebindError::Message`] when the directive does not parse or a
/// global subscriber is already installed.
pub fn init(verbosity: u8) -> Result<(), TypebindError> {
    let chosen = directive(verbosity, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&chosen)
        .map_err(|err| TypebindError::Message(format!("invalid {LOG_ENV} directive '{chosen}': {err}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| TypebindError::Message(format!("failed to install log subscriber: {err}")))
}
