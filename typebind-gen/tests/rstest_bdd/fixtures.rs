//! Shared state for generation scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::tree::TempTree;
use typebind_gen::SignatureResult;
use typebind_gen::registry::OperatorKind;

/// State carried between the steps of one scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct GenerationContext {
    /// Workspace holding templates under `templates/` and outputs under `out/`.
    pub tree: Slot<TempTree>,
    /// Type identifiers, in render order.
    pub type_ids: Slot<Vec<String>>,
    /// Operators to register, in registry order.
    pub operators: Slot<Vec<OperatorKind>>,
    /// Signature returned by the last run.
    pub result: Slot<SignatureResult>,
}

/// Creates an empty generation context.
#[fixture]
pub fn generation_context() -> GenerationContext {
    GenerationContext::default()
}
