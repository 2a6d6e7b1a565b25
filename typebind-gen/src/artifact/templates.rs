//! Parsed Tera templates for the enabled artifacts.

use camino::Utf8Path;
use tera::{Context, Tera};
use tracing::debug;

use super::{ArtifactDescriptor, ArtifactVariant, Section};
use crate::error::TypebindError;
use crate::fs_helpers;

/// Compiled templates, addressable by artifact, variant and section.
#[derive(Debug)]
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    pub(super) fn load<'a>(
        root: &Utf8Path,
        descriptors: impl Iterator<Item = &'a ArtifactDescriptor>,
    ) -> Result<Self, TypebindError> {
        let mut tera = Tera::default();
        // Generated Rust is never HTML.
        tera.autoescape_on(Vec::new());

        let dir = fs_helpers::open_optional_dir(root)?;
        for descriptor in descriptors {
            for variant in descriptor.variants() {
                for section in Section::ALL {
                    let relative = descriptor.template_file(variant, section);
                    let contents = match &dir {
                        Some(handle) => fs_helpers::read_optional(handle, root, &relative)?,
                        None => None,
                    };
                    let source = contents.ok_or_else(|| TypebindError::MissingTemplate {
                        artifact: descriptor.name().to_owned(),
                        path: root.join(&relative),
                    })?;

                    let name = descriptor.template_name(variant, section);
                    tera.add_raw_template(&name, &source).map_err(|err| {
                        TypebindError::TemplateParse {
                            artifact: descriptor.name().to_owned(),
                            template: name.clone(),
                            source: Box::new(err),
                        }
                    })?;
                    debug!(artifact = descriptor.name(), template = %name, "template parsed");
                }
            }
        }

        Ok(Self { tera })
    }

    /// Renders one section of `descriptor`.
    ///
    /// `type_name` only annotates errors; the data comes from `context`.
    ///
    /// # Errors
    ///
    /// Returns [`TypebindError::Render`] when Tera fails.
    pub fn render(
        &self,
        descriptor: &ArtifactDescriptor,
        variant: ArtifactVariant,
        section: Section,
        context: &Context,
        type_name: Option<&str>,
    ) -> Result<String, TypebindError> {
        let name = descriptor.template_name(variant, section);
        self.tera
            .render(&name, context)
            .map_err(|err| TypebindError::Render {
                artifact: descriptor.name().to_owned(),
                section: section.as_str(),
                type_name: type_name.map(str::to_owned),
                source: Box::new(err),
            })
    }

    /// Lists the registered template names, sorted.
    #[must_use]
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}
