//! Artifact descriptors and the container that owns them.
//!
//! An artifact is one generated output file plus, optionally, a paired test
//! file. Each artifact names a template directory holding one file per
//! [`Section`] and [`ArtifactVariant`]:
//!
//! ```text
//! <template root>/<handle>/header.rs.tera
//! <template root>/<handle>/body.rs.tera
//! <template root>/<handle>/footer.rs.tera
//! <template root>/<handle>/test_header.rs.tera   (test variant)
//! ...
//! ```

mod templates;

use std::ops::ControlFlow;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::TypebindError;
use crate::fs_helpers;

pub use templates::TemplateSet;

/// Template section rendered for every artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Rendered once, before any type.
    Header,
    /// Rendered once per type, in registry render order.
    Body,
    /// Rendered once, after every type.
    Footer,
}

impl Section {
    /// Every section, in rendering order.
    pub const ALL: [Self; 3] = [Self::Header, Self::Body, Self::Footer];

    /// Returns the section identifier used in template file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Footer => "footer",
        }
    }
}

/// Output flavour of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactVariant {
    /// The generated source file.
    Source,
    /// The paired test file.
    Test,
}

impl ArtifactVariant {
    const fn template_prefix(self) -> &'static str {
        match self {
            Self::Source => "",
            Self::Test => "test_",
        }
    }

    const fn file_suffix(self) -> &'static str {
        match self {
            Self::Source => "",
            Self::Test => "_tests",
        }
    }
}

/// Describes one generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    name: String,
    directory: Utf8PathBuf,
    enabled: bool,
    template: String,
    has_test_variant: bool,
}

impl ArtifactDescriptor {
    /// Creates an enabled descriptor with a test variant whose templates live
    /// in a directory named after the artifact.
    pub fn new(name: impl Into<String>, directory: impl Into<Utf8PathBuf>) -> Self {
        let name = name.into();
        Self {
            template: name.clone(),
            name,
            directory: directory.into(),
            enabled: true,
            has_test_variant: true,
        }
    }

    /// Sets whether the artifact takes part in generation.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Uses templates from `handle` instead of the artifact name.
    #[must_use]
    pub fn with_template(mut self, handle: impl Into<String>) -> Self {
        self.template = handle.into();
        self
    }

    /// Drops the paired test file.
    #[must_use]
    pub const fn without_test_variant(mut self) -> Self {
        self.has_test_variant = false;
        self
    }

    /// Returns the artifact name, used as the output file's base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the output directory relative to the output root.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Reports whether the artifact is generated.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the template directory handle.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the variants rendered for this artifact.
    #[must_use]
    pub fn variants(&self) -> Vec<ArtifactVariant> {
        if self.has_test_variant {
            vec![ArtifactVariant::Source, ArtifactVariant::Test]
        } else {
            vec![ArtifactVariant::Source]
        }
    }

    /// Returns the output file name for `variant`.
    #[must_use]
    pub fn file_name(&self, variant: ArtifactVariant) -> String {
        format!("{}{}.rs", self.name, variant.file_suffix())
    }

    /// Returns the output path of `variant` relative to the output root.
    #[must_use]
    pub fn output_path(&self, variant: ArtifactVariant) -> Utf8PathBuf {
        self.directory.join(self.file_name(variant))
    }

    /// Returns the platform-independent key identifying `variant` in
    /// generated content and signatures.
    #[must_use]
    pub fn output_key(&self, variant: ArtifactVariant) -> String {
        let file_name = self.file_name(variant);
        self.directory
            .components()
            .map(|component| component.as_str())
            .filter(|part| *part != ".")
            .chain(std::iter::once(file_name.as_str()))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Returns the registered Tera name for `section` of `variant`.
    #[must_use]
    pub fn template_name(&self, variant: ArtifactVariant, section: Section) -> String {
        format!(
            "{}/{}{}",
            self.template,
            variant.template_prefix(),
            section.as_str()
        )
    }

    /// Returns the template file path relative to the template root.
    #[must_use]
    pub fn template_file(&self, variant: ArtifactVariant, section: Section) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.rs.tera", self.template_name(variant, section)))
    }
}

/// Owns the ordered artifact descriptors for a run.
#[derive(Debug, Clone, Default)]
pub struct SourceCodeContainer {
    descriptors: Vec<ArtifactDescriptor>,
}

impl SourceCodeContainer {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `descriptors` in order.
    ///
    /// # Panics
    ///
    /// Panics if a descriptor name is already registered, or if any output
    /// of a descriptor is already produced by another one. Artifact sets are
    /// fixed at compile time, so either is a programming error.
    pub fn register(&mut self, descriptors: impl IntoIterator<Item = ArtifactDescriptor>) {
        for descriptor in descriptors {
            assert!(
                self.get(descriptor.name()).is_none(),
                "artifact '{}' registered twice",
                descriptor.name()
            );
            for variant in descriptor.variants() {
                let key = descriptor.output_key(variant);
                if let Some(owner) = self.owner_of(&key) {
                    panic!(
                        "artifact '{}' writes {key}, already written by '{}'",
                        descriptor.name(),
                        owner.name()
                    );
                }
            }
            self.descriptors.push(descriptor);
        }
    }

    fn owner_of(&self, key: &str) -> Option<&ArtifactDescriptor> {
        self.descriptors.iter().find(|d| {
            d.variants()
                .into_iter()
                .any(|variant| d.output_key(variant) == key)
        })
    }

    /// Looks up a descriptor by name, whether enabled or not.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArtifactDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Iterates every registered descriptor in registration order.
    pub fn all(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        self.descriptors.iter()
    }

    /// Iterates enabled descriptors in registration order.
    pub fn enabled(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        self.descriptors.iter().filter(|d| d.is_enabled())
    }

    /// Calls `f` for every enabled descriptor in registration order.
    pub fn for_each(&self, f: impl FnMut(&ArtifactDescriptor)) {
        self.enabled().for_each(f);
    }

    /// Calls `f` for enabled descriptors until it breaks, returning the break
    /// value.
    pub fn for_each_until<B>(
        &self,
        mut f: impl FnMut(&ArtifactDescriptor) -> ControlFlow<B>,
    ) -> Option<B> {
        for descriptor in self.enabled() {
            if let ControlFlow::Break(value) = f(descriptor) {
                return Some(value);
            }
        }
        None
    }

    /// Lists the enabled outputs absent beneath `output_root`.
    ///
    /// # Errors
    ///
    /// Returns [`TypebindError::Io`] when the tree cannot be probed.
    pub fn missing_outputs(&self, output_root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, TypebindError> {
        let expected: Vec<Utf8PathBuf> = self
            .enabled()
            .flat_map(|d| d.variants().into_iter().map(move |v| d.output_path(v)))
            .collect();

        let Some(dir) = fs_helpers::open_optional_dir(output_root)? else {
            return Ok(expected);
        };

        let mut missing = Vec::new();
        for path in expected {
            if !fs_helpers::file_exists(&dir, output_root, &path)? {
                debug!(path = %path, "generated artifact missing");
                missing.push(path);
            }
        }
        Ok(missing)
    }

    /// Reports whether any enabled output is absent beneath `output_root`.
    ///
    /// Diagnostic only; generation proceeds regardless.
    ///
    /// # Errors
    ///
    /// Returns [`TypebindError::Io`] when the tree cannot be probed.
    pub fn any_missing(&self, output_root: &Utf8Path) -> Result<bool, TypebindError> {
        Ok(!self.missing_outputs(output_root)?.is_empty())
    }

    /// Parses the templates of every enabled descriptor beneath
    /// `template_root`, optionally joined with `sub_path`.
    ///
    /// # Errors
    ///
    /// Returns [`TypebindError::MissingTemplate`] or
    /// [`TypebindError::TemplateParse`] naming the first failing artifact.
    pub fn resolve_templates(
        &self,
        template_root: &Utf8Path,
        sub_path: Option<&Utf8Path>,
    ) -> Result<TemplateSet, TypebindError> {
        let root = sub_path.map_or_else(|| template_root.to_path_buf(), |sub| template_root.join(sub));
        TemplateSet::load(&root, self.enabled())
    }
}

/// Builds the production artifact container.
///
/// `parsers` is declared ahead of its templates and stays disabled until
/// they land.
#[must_use]
pub fn build_artifacts() -> SourceCodeContainer {
    let mut container = SourceCodeContainer::new();
    container.register([
        ArtifactDescriptor::new("binders", "generated"),
        ArtifactDescriptor::new("validators", "generated"),
        ArtifactDescriptor::new("parsers", "generated").with_enabled(false),
    ]);
    container
}
