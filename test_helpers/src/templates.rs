//! Compact template sets for exercising the generator with small registries.
//!
//! The canned sets keep every declaration on predictable lines so tests can
//! count what a registry should produce:
//!
//! - [`BINDERS`]: one `bind_<type>` function per type, plus
//!   `bind_<type>_slice` when the type has a slice variant.
//! - [`VALIDATORS`]: one `<Type>Validator` struct, one `bind_validated_<type>`
//!   function and one `bind_validated_<type>_<operator>` function per
//!   applicable operator.
//!
//! Both test variants emit one `#[test]` function per type.

use anyhow::Result;

use crate::tree::TempTree;

/// Sources for every section of both variants of one artifact.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSources {
    /// Source header.
    pub header: &'static str,
    /// Source body, rendered per type.
    pub body: &'static str,
    /// Source footer.
    pub footer: &'static str,
    /// Test header.
    pub test_header: &'static str,
    /// Test body, rendered per type.
    pub test_body: &'static str,
    /// Test footer.
    pub test_footer: &'static str,
}

/// Compact binder templates.
pub const BINDERS: TemplateSources = TemplateSources {
    header: "//! Binders generated for tests.\n",
    body: r#"
/// Binds a `{{ spec.display }}` value.
pub fn bind_{{ spec.fn_name }}() -> &'static str {
    "{{ spec.display }}"
}
{%- if spec.has_slice %}

/// Binds repeated `{{ spec.display }}` values.
pub fn bind_{{ spec.fn_name }}_slice() -> &'static str {
    "[]{{ spec.display }}"
}
{%- endif %}
"#,
    footer: "\n// end of binders\n",
    test_header: "//! Binder tests generated for tests.\n\nuse super::binders::*;\n",
    test_body: r"
#[test]
fn {{ spec.fn_name }}_is_bound() {
    assert!(!bind_{{ spec.fn_name }}().is_empty());
}
",
    test_footer: "",
};

/// Compact validator templates.
pub const VALIDATORS: TemplateSources = TemplateSources {
    header: "//! Validators generated for tests.\n",
    body: r"
/// Validator handle for `{{ spec.display }}` values.
pub struct {{ spec.id }}Validator;

pub fn bind_validated_{{ spec.fn_name }}() -> {{ spec.id }}Validator {
    {{ spec.id }}Validator
}
{%- for op in applicable %}

pub fn bind_validated_{{ spec.fn_name }}_{{ op.fn_suffix }}() -> {{ spec.id }}Validator {
    {{ spec.id }}Validator
}
{%- endfor %}
",
    footer: "",
    test_header: "//! Validator tests generated for tests.\n\nuse super::validators::*;\n",
    test_body: r"
#[test]
fn {{ spec.fn_name }}_validator_builds() {
    let _validator = bind_validated_{{ spec.fn_name }}();
}
",
    test_footer: "\n// end of validator tests\n",
};

/// Writes `sources` for artifact template `handle` beneath `root` in `tree`.
///
/// # Errors
///
/// Returns an error if any template file cannot be written.
pub fn install(tree: &TempTree, root: &str, handle: &str, sources: &TemplateSources) -> Result<()> {
    let files = [
        ("header", sources.header),
        ("body", sources.body),
        ("footer", sources.footer),
        ("test_header", sources.test_header),
        ("test_body", sources.test_body),
        ("test_footer", sources.test_footer),
    ];
    for (section, content) in files {
        tree.write(format!("{root}/{handle}/{section}.rs.tera"), content)?;
    }
    Ok(())
}

/// Installs [`BINDERS`] as `binders` and [`VALIDATORS`] as `validators`
/// beneath `root`.
///
/// # Errors
///
/// Returns an error if any template file cannot be written.
pub fn install_compact(tree: &TempTree, root: &str) -> Result<()> {
    install(tree, root, "binders", &BINDERS)?;
    install(tree, root, "validators", &VALIDATORS)
}
