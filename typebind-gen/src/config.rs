//! Layered settings for a generation run.
//!
//! Precedence, lowest to highest: built-in defaults, `typebind.toml` in the
//! working directory, `TYPEBIND_*` environment variables, then flags given on
//! the command line. Flags that were not given leave lower layers untouched.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::TypebindError;

/// File name of the optional settings file in the working directory.
pub const CONFIG_FILE: &str = "typebind.toml";

/// Prefix of environment variables feeding the settings.
pub const ENV_PREFIX: &str = "TYPEBIND_";

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "fields mirror independent command-line switches"
)]
pub struct Settings {
    /// Template directory, relative to the working directory.
    pub templates: Utf8PathBuf,
    /// Generate into the test tree instead of the source tree.
    pub test: bool,
    /// Persist rendered artifacts.
    pub write: bool,
    /// Compare the rendered signature with the on-disk tree.
    pub check: bool,
    /// Emit the report as JSON.
    pub json: bool,
    /// Test tree, relative to the working directory.
    pub test_dir: Utf8PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates: Utf8PathBuf::from("templates"),
            test: false,
            write: false,
            check: false,
            json: false,
            test_dir: Utf8PathBuf::from("testdata"),
        }
    }
}

/// Settings supplied explicitly on the command line.
///
/// Absent fields are skipped when serialised so they never mask a value
/// from the file or environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliOverrides {
    /// `--templates`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<Utf8PathBuf>,
    /// `--test`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    /// `--write`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,
    /// `--check`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<bool>,
    /// `--json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl Settings {
    /// Resolves settings for the working directory `cwd`.
    ///
    /// # Errors
    ///
    /// Returns [`TypebindError::Config`] when a layer fails to parse or a
    /// value has the wrong type.
    pub fn load(cwd: &Utf8Path, overrides: &CliOverrides) -> Result<Self, TypebindError> {
        let settings = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(cwd.join(CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["cwd", "log"]))
            .merge(Serialized::defaults(overrides))
            .extract()?;
        Ok(settings)
    }

    /// Returns the directory generated artifacts live beneath.
    #[must_use]
    pub fn output_root(&self, cwd: &Utf8Path) -> Utf8PathBuf {
        if self.test {
            cwd.join(&self.test_dir)
        } else {
            cwd.to_path_buf()
        }
    }
}
