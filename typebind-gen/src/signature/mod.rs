//! Content signatures over generated artifacts.
//!
//! Each artifact is parsed with `syn` and reduced to its distinct type and
//! function declarations. The SHA-256 digest covers, per artifact in content
//! order, the artifact key, its declaration counts and the canonical token
//! rendering of every top-level item. The canonical form drops layout, plain
//! comments, optional commas and import order, so running a formatter keeps
//! the hash stable while any change to names, literals or doc comments moves
//! it.
//!
//! The engine only produces signatures. Comparing against the embedded
//! baseline or the on-disk tree is left to the caller.

mod baseline;
mod canonical;
mod declarations;

use std::ops::AddAssign;

use camino::Utf8Path;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::artifact::SourceCodeContainer;
use crate::error::TypebindError;
use crate::fs_helpers;
use crate::generator::CodeContent;

pub use baseline::{BaselineStatus, compare_baseline, registered_baseline};

/// Distinct declaration counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeclarationCounts {
    /// Struct, enum, union, type alias and trait declarations.
    pub types: usize,
    /// Free functions, inherent and trait methods.
    pub funcs: usize,
}

impl AddAssign for DeclarationCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.types += rhs.types;
        self.funcs += rhs.funcs;
    }
}

/// Counts for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactCounts {
    /// Artifact key (output path relative to the output root).
    pub artifact: String,
    /// Declarations found in the artifact.
    pub counts: DeclarationCounts,
}

/// Whether a signature covers any artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    /// No artifact was signed.
    #[default]
    Empty,
    /// At least one artifact was signed.
    Signed,
}

/// Signature of an artifact set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignatureResult {
    /// Counts summed over every artifact.
    pub totals: DeclarationCounts,
    /// Counts per artifact, in content order.
    pub per_artifact: Vec<ArtifactCounts>,
    /// Lowercase hex SHA-256 digest; empty when nothing was signed.
    pub hash: String,
    /// Human-readable report.
    pub output: String,
    /// Whether anything was signed.
    pub status: SignatureStatus,
}

impl SignatureResult {
    /// Reports whether the signature covers no artifact.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == SignatureStatus::Empty
    }

    /// Looks up the counts recorded for `artifact`.
    #[must_use]
    pub fn counts_for(&self, artifact: &str) -> Option<DeclarationCounts> {
        self.per_artifact
            .iter()
            .find(|entry| entry.artifact == artifact)
            .map(|entry| entry.counts)
    }
}

/// Signs rendered content.
///
/// An empty content map yields [`SignatureResult::default`].
///
/// # Errors
///
/// Returns [`TypebindError::Parse`] naming the first artifact that is not
/// valid Rust.
pub fn from_content(content: &CodeContent) -> Result<SignatureResult, TypebindError> {
    if content.is_empty() {
        return Ok(SignatureResult::default());
    }

    let mut hasher = Sha256::new();
    let mut totals = DeclarationCounts::default();
    let mut per_artifact = Vec::with_capacity(content.len());

    for (artifact, text) in content.iter() {
        let declarations = declarations::parse(artifact, text)?;
        let counts = DeclarationCounts {
            types: declarations.type_count(),
            funcs: declarations.func_count(),
        };

        hasher.update(format!("artifact {artifact}\n").as_bytes());
        hasher.update(format!("types {} funcs {}\n", counts.types, counts.funcs).as_bytes());
        for item in declarations.items() {
            hasher.update(item.as_bytes());
            hasher.update(b"\n");
        }

        totals += counts;
        per_artifact.push(ArtifactCounts {
            artifact: artifact.to_owned(),
            counts,
        });
    }

    let hash = format!("{:x}", hasher.finalize());
    info!(
        artifacts = per_artifact.len(),
        types = totals.types,
        funcs = totals.funcs,
        hash = %hash,
        "signature computed"
    );
    let output = render_report(&per_artifact, totals, &hash);
    Ok(SignatureResult {
        totals,
        per_artifact,
        hash,
        output,
        status: SignatureStatus::Signed,
    })
}

/// Signs the enabled artifacts currently present beneath `output_root`.
///
/// Files that do not exist are skipped with a warning, so a partially
/// generated tree still yields a signature of what is there.
///
/// # Errors
///
/// Returns [`TypebindError::Io`] when a present file cannot be read and
/// [`TypebindError::Parse`] when one is not valid Rust.
pub fn from_filesystem(
    output_root: &Utf8Path,
    container: &SourceCodeContainer,
) -> Result<SignatureResult, TypebindError> {
    let mut content = CodeContent::new();
    let Some(dir) = fs_helpers::open_optional_dir(output_root)? else {
        warn!(root = %output_root, "output root missing; nothing to sign");
        return Ok(SignatureResult::default());
    };

    for descriptor in container.enabled() {
        for variant in descriptor.variants() {
            let relative = descriptor.output_path(variant);
            match fs_helpers::read_optional(&dir, output_root, &relative)? {
                Some(text) => content.insert(descriptor.output_key(variant), text),
                None => warn!(path = %output_root.join(&relative), "artifact missing; skipped"),
            }
        }
    }

    from_content(&content)
}

fn render_report(per_artifact: &[ArtifactCounts], totals: DeclarationCounts, hash: &str) -> String {
    let width = per_artifact
        .iter()
        .map(|entry| entry.artifact.len())
        .max()
        .unwrap_or(0);

    let line = |label: &str, counts: DeclarationCounts| {
        format!(
            "{label:<width$}  types {:>4}  funcs {:>4}\n",
            counts.types, counts.funcs
        )
    };

    let mut out: String = per_artifact
        .iter()
        .map(|entry| line(&entry.artifact, entry.counts))
        .collect();
    out.push_str(&line("total", totals));
    out.push_str(&format!("hash {hash}\n"));
    out
}

#[cfg(test)]
mod tests;
