//! Template data passed to body sections.

use serde::Serialize;
use tera::Context;

use crate::registry::{Operator, OperatorParam, OperatorRegistry, TypeSpec};

#[derive(Debug, Serialize)]
struct SpecView<'a> {
    id: &'a str,
    fn_name: String,
    underlying: &'a str,
    display: &'a str,
    has_slice: bool,
    zero: &'a str,
}

impl<'a> From<&'a TypeSpec> for SpecView<'a> {
    fn from(spec: &'a TypeSpec) -> Self {
        Self {
            id: spec.id().as_str(),
            fn_name: spec.fn_name(),
            underlying: spec.underlying(),
            display: spec.display_type(),
            has_slice: spec.has_slice(),
            zero: spec.zero(),
        }
    }
}

#[derive(Debug, Serialize)]
struct OperatorView<'a> {
    name: &'static str,
    fn_suffix: &'static str,
    category: &'static str,
    params: &'a [OperatorParam],
    predicate: &'static str,
    message_key: String,
}

impl<'a> From<&'a Operator> for OperatorView<'a> {
    fn from(op: &'a Operator) -> Self {
        Self {
            name: op.name(),
            fn_suffix: op.kind().fn_suffix(),
            category: op.category().as_str(),
            params: op.params(),
            predicate: op.predicate(),
            message_key: op.message_key(),
        }
    }
}

/// Builds the body context for `spec`: the spec itself, the full operator
/// registry, and the operators applicable to the spec.
pub(super) fn body_context(spec: &TypeSpec, operators: &OperatorRegistry) -> Context {
    let all: Vec<OperatorView<'_>> = operators.iter().map(OperatorView::from).collect();
    let applicable: Vec<OperatorView<'_>> = operators
        .applicable_to(spec)
        .map(OperatorView::from)
        .collect();

    let mut context = Context::new();
    context.insert("spec", &SpecView::from(spec));
    context.insert("operators", &all);
    context.insert("applicable", &applicable);
    context
}
