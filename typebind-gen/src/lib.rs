//! Template-driven generator for typed option binders and validators.
//!
//! A run renders every enabled artifact from the [`registry`] of value types
//! and validation operators: one header, one body per type in a curated
//! order, then one footer. The rendered content is signed by the
//! [`signature`] engine so drift between checked-in code and the generator
//! can be detected.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use typebind_gen::artifact::build_artifacts;
//! use typebind_gen::generator::SourceCodeGenerator;
//! use typebind_gen::registry::{build_operators, build_types};
//!
//! # fn main() -> Result<(), typebind_gen::TypebindError> {
//! let container = build_artifacts();
//! let templates = container.resolve_templates(Utf8Path::new("templates"), None)?;
//! let (types, operators) = (build_types(), build_operators());
//! let generator = SourceCodeGenerator::new(&container, &templates, &types, &operators, ".");
//! let signature = generator.run(false)?;
//! assert_eq!(signature.per_artifact.len(), 4);
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs_helpers;
pub mod generator;
pub mod logging;
pub mod registry;
pub mod signature;

pub use error::TypebindError;
pub use generator::{CodeContent, SourceCodeGenerator};
pub use signature::SignatureResult;
