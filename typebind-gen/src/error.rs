//! Error types for `typebind-gen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `typebind-gen` pipeline.
#[derive(Debug, Error)]
pub enum TypebindError {
    /// No working-directory anchor was supplied.
    #[error("working directory missing; pass --cwd or set TYPEBIND_CWD")]
    MissingWorkingDirectory,

    /// The resolved output root does not exist.
    #[error("output directory does not exist: {attempted} (resolved to {resolved})")]
    OutputDirectoryMissing {
        /// Path as derived from the invocation.
        attempted: Utf8PathBuf,
        /// Absolute form of `attempted`.
        resolved: Utf8PathBuf,
    },

    /// A filesystem path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// Layered settings failed to merge or extract.
    #[error("failed to resolve configuration layers: {0}")]
    Config(#[from] Box<figment::Error>),

    /// A template file expected by an enabled artifact is absent.
    #[error("template for artifact '{artifact}' missing at {path}")]
    MissingTemplate {
        /// Artifact that owns the template.
        artifact: String,
        /// Location that was probed.
        path: Utf8PathBuf,
    },

    /// A template failed to compile.
    #[error("failed to parse template '{template}' for artifact '{artifact}'")]
    TemplateParse {
        /// Artifact that owns the template.
        artifact: String,
        /// Registered template name.
        template: String,
        /// Underlying Tera error.
        #[source]
        source: Box<tera::Error>,
    },

    /// A template section failed while rendering.
    #[error("failed to render {section} of artifact '{artifact}'{}", describe_type(.type_name.as_deref()))]
    Render {
        /// Artifact being rendered.
        artifact: String,
        /// Section identifier (`header`, `body` or `footer`).
        section: &'static str,
        /// Type being rendered, for body sections.
        type_name: Option<String>,
        /// Underlying Tera error.
        #[source]
        source: Box<tera::Error>,
    },

    /// Artifact content could not be reduced to declarations.
    #[error("failed to parse artifact '{artifact}' at {line}:{column}: {message}")]
    Parse {
        /// Artifact whose content failed to parse.
        artifact: String,
        /// One-based line of the failure.
        line: usize,
        /// One-based column of the failure.
        column: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// `--check` found the on-disk tree out of step with the generator.
    #[error("generated signature {generated} differs from on-disk signature {on_disk}")]
    SignatureDrift {
        /// Hash of the freshly rendered content.
        generated: String,
        /// Hash of the artifacts currently on disk.
        on_disk: String,
    },

    /// The JSON report could not be produced.
    #[error("failed to serialise signature report: {0}")]
    Json(#[from] serde_json::Error),

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The report could not be written to its stream.
    #[error("failed to write report")]
    Report(#[source] std::io::Error),

    /// Free-form failure raised by the front end.
    #[error("{0}")]
    Message(String),
}

fn describe_type(type_name: Option<&str>) -> String {
    type_name.map_or_else(String::new, |name| format!(" for type '{name}'"))
}

impl From<figment::Error> for TypebindError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl TypebindError {
    /// Builds an [`TypebindError::Io`] for `path`.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
