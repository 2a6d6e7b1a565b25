//! Generation driver: renders every enabled artifact and signs the result.
//!
//! Each artifact variant is the concatenation of one header render, one body
//! render per type in the registry's curated order, and one footer render.
//! Artifacts are processed in registration order. With `write` enabled each
//! variant is written as soon as it is rendered; a later failure aborts the
//! run without removing files already written.

mod content;
mod context;

use std::ops::ControlFlow;

use camino::{Utf8Path, Utf8PathBuf};
use tera::Context;
use tracing::{debug, info};

use crate::artifact::{ArtifactDescriptor, ArtifactVariant, Section, SourceCodeContainer, TemplateSet};
use crate::error::TypebindError;
use crate::fs_helpers;
use crate::registry::{OperatorRegistry, TypeRegistry};
use crate::signature::{self, SignatureResult};

pub use content::CodeContent;

/// Renders artifacts from registries and templates.
#[derive(Debug)]
pub struct SourceCodeGenerator<'a> {
    container: &'a SourceCodeContainer,
    templates: &'a TemplateSet,
    types: &'a TypeRegistry,
    operators: &'a OperatorRegistry,
    output_root: Utf8PathBuf,
}

impl<'a> SourceCodeGenerator<'a> {
    /// Creates a generator writing beneath `output_root`.
    pub fn new(
        container: &'a SourceCodeContainer,
        templates: &'a TemplateSet,
        types: &'a TypeRegistry,
        operators: &'a OperatorRegistry,
        output_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            container,
            templates,
            types,
            operators,
            output_root: output_root.into(),
        }
    }

    /// Returns the directory outputs are written beneath.
    #[must_use]
    pub fn output_root(&self) -> &Utf8Path {
        &self.output_root
    }

    /// Renders every enabled artifact without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`TypebindError::Render`] for the first failing section.
    pub fn render(&self) -> Result<CodeContent, TypebindError> {
        self.generate(false)
    }

    /// Renders every enabled artifact, writes them when `write` is set, and
    /// signs the rendered content.
    ///
    /// # Errors
    ///
    /// Returns the first render, write or parse failure. Files written
    /// before the failure are left in place.
    pub fn run(&self, write: bool) -> Result<SignatureResult, TypebindError> {
        let content = self.generate(write)?;
        signature::from_content(&content)
    }

    fn generate(&self, write: bool) -> Result<CodeContent, TypebindError> {
        let mut content = CodeContent::new();
        let failure = self.container.for_each_until(|descriptor| {
            match self.generate_artifact(descriptor, write, &mut content) {
                Ok(()) => ControlFlow::Continue(()),
                Err(err) => ControlFlow::Break(err),
            }
        });
        failure.map_or_else(|| Ok(content), Err)
    }

    fn generate_artifact(
        &self,
        descriptor: &ArtifactDescriptor,
        write: bool,
        content: &mut CodeContent,
    ) -> Result<(), TypebindError> {
        for variant in descriptor.variants() {
            let text = self.render_variant(descriptor, variant)?;
            if write {
                let path = fs_helpers::write_file(
                    &self.output_root,
                    &descriptor.output_path(variant),
                    &text,
                )?;
                info!(path = %path, bytes = text.len(), "artifact written");
            }
            content.insert(descriptor.output_key(variant), text);
        }
        Ok(())
    }

    fn render_variant(
        &self,
        descriptor: &ArtifactDescriptor,
        variant: ArtifactVariant,
    ) -> Result<String, TypebindError> {
        debug!(artifact = descriptor.name(), ?variant, "rendering artifact");
        let empty = Context::new();

        let mut text = self
            .templates
            .render(descriptor, variant, Section::Header, &empty, None)?;
        for spec in self.types.iter() {
            let body = context::body_context(spec, self.operators);
            text.push_str(&self.templates.render(
                descriptor,
                variant,
                Section::Body,
                &body,
                Some(spec.id().as_str()),
            )?);
        }
        text.push_str(
            &self
                .templates
                .render(descriptor, variant, Section::Footer, &empty, None)?,
        );
        Ok(text)
    }
}
