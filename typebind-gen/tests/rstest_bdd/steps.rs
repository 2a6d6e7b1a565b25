//! Step definitions for generation scenarios.

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{given, then, when};
use test_helpers::templates::install_compact;
use test_helpers::text::{count_fn_lines, unquote};
use test_helpers::tree::TempTree;
use typebind_gen::artifact::build_artifacts;
use typebind_gen::registry::{
    OperatorKind, OperatorRegistry, TypeRegistry, build_types, operator_for,
};
use typebind_gen::{SignatureResult, SourceCodeGenerator, signature};

use crate::fixtures::GenerationContext;

fn with_tree<T>(
    generation_context: &GenerationContext,
    f: impl FnOnce(&TempTree) -> Result<T>,
) -> Result<T> {
    generation_context
        .tree
        .with_ref(f)
        .ok_or_else(|| anyhow!("workspace not initialised"))?
}

fn last_result(generation_context: &GenerationContext) -> Result<SignatureResult> {
    generation_context
        .result
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("generator has not run"))
}

fn operator_named(name: &str) -> Result<OperatorKind> {
    OperatorKind::ALL
        .into_iter()
        .find(|kind| kind.name() == name)
        .ok_or_else(|| anyhow!("unknown operator {name}"))
}

fn run_generator(tree: &TempTree, ids: &[String], kinds: &[OperatorKind]) -> Result<SignatureResult> {
    let production = build_types();
    let specs = ids
        .iter()
        .map(|id| {
            production
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow!("unknown type {id}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let order: Vec<&str> = ids.iter().map(String::as_str).collect();
    let types = TypeRegistry::new(specs, &order);
    let operators = OperatorRegistry::new(kinds.iter().copied().map(operator_for));

    let container = build_artifacts();
    let templates = container.resolve_templates(&tree.path("templates"), None)?;
    let generator =
        SourceCodeGenerator::new(&container, &templates, &types, &operators, tree.path("out"));
    Ok(generator.run(true)?)
}

#[given("a workspace with compact templates")]
fn compact_workspace(generation_context: &GenerationContext) -> Result<()> {
    let tree = TempTree::new()?;
    install_compact(&tree, "templates")?;
    tree.mkdir("out")?;
    generation_context.tree.set(tree);
    Ok(())
}

#[given("the registry holds types {first} and {second}")]
fn registry_types(generation_context: &GenerationContext, first: String, second: String) -> Result<()> {
    generation_context
        .type_ids
        .set(vec![unquote(&first).to_owned(), unquote(&second).to_owned()]);
    Ok(())
}

#[given("the operator registry holds {first} and {second}")]
fn registry_operators(
    generation_context: &GenerationContext,
    first: String,
    second: String,
) -> Result<()> {
    let kinds = vec![operator_named(unquote(&first))?, operator_named(unquote(&second))?];
    generation_context.operators.set(kinds);
    Ok(())
}

#[when("the generator runs with writing enabled")]
fn generator_runs(generation_context: &GenerationContext) -> Result<()> {
    let ids = generation_context
        .type_ids
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("types not configured"))?;
    let kinds = generation_context
        .operators
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("operators not configured"))?;
    let result = with_tree(generation_context, |tree| run_generator(tree, &ids, &kinds))?;
    generation_context.result.set(result);
    Ok(())
}

#[when("the artifact {path} is deleted")]
fn artifact_deleted(generation_context: &GenerationContext, path: String) -> Result<()> {
    with_tree(generation_context, |tree| tree.remove(format!("out/{}", unquote(&path))))
}

#[then("{count} artifact files are written")]
fn files_written(generation_context: &GenerationContext, count: usize) -> Result<()> {
    let written = with_tree(generation_context, |tree| tree.files_under("out"))?;
    ensure!(written.len() == count, "written: {written:?}");
    Ok(())
}

#[then("the validators include {name}")]
fn validators_include(generation_context: &GenerationContext, name: String) -> Result<()> {
    let text = with_tree(generation_context, |tree| tree.read("out/generated/validators.rs"))?;
    let function = format!("pub fn {}(", unquote(&name));
    ensure!(text.contains(&function), "{function} missing from:\n{text}");
    Ok(())
}

#[then("the validators omit {name}")]
fn validators_omit(generation_context: &GenerationContext, name: String) -> Result<()> {
    let text = with_tree(generation_context, |tree| tree.read("out/generated/validators.rs"))?;
    let function = unquote(&name);
    ensure!(!text.contains(function), "{function} unexpectedly rendered");
    Ok(())
}

#[then("the signature counts every written function")]
fn signature_counts_functions(generation_context: &GenerationContext) -> Result<()> {
    let result = last_result(generation_context)?;
    let emitted = with_tree(generation_context, |tree| {
        tree.files_under("out")?
            .iter()
            .map(|file| Ok(count_fn_lines(&tree.read(format!("out/{file}"))?)))
            .sum::<Result<usize>>()
    })?;
    ensure!(
        result.totals.funcs == emitted,
        "signature counted {} functions, files declare {emitted}",
        result.totals.funcs
    );
    Ok(())
}

#[then("an artifact is reported missing")]
fn artifact_missing(generation_context: &GenerationContext) -> Result<()> {
    let missing = with_tree(generation_context, |tree| {
        Ok(build_artifacts().any_missing(&tree.path("out"))?)
    })?;
    ensure!(missing, "expected a missing artifact");
    Ok(())
}

#[then("no artifact is reported missing")]
fn nothing_missing(generation_context: &GenerationContext) -> Result<()> {
    let missing = with_tree(generation_context, |tree| {
        Ok(build_artifacts().any_missing(&tree.path("out"))?)
    })?;
    ensure!(!missing, "no artifact should be missing");
    Ok(())
}

#[then("signing the tree on disk reproduces the generated hash")]
fn signing_reproduces_hash(generation_context: &GenerationContext) -> Result<()> {
    let generated = last_result(generation_context)?;
    let on_disk = with_tree(generation_context, |tree| {
        Ok(signature::from_filesystem(&tree.path("out"), &build_artifacts())?)
    })?;
    ensure!(on_disk.hash == generated.hash, "hashes differ");
    ensure!(on_disk.totals == generated.totals, "counts differ");
    Ok(())
}
