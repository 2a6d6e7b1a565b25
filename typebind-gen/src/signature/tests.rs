//! Tests for declaration counting and signature stability.

use rstest::{fixture, rstest};
use test_helpers::text::reflow;
use test_helpers::tree::TempTree;

use super::*;
use crate::artifact::build_artifacts;

const MIXED: &str = r"
pub struct A;

enum B {
    X,
}

type C = u8;

pub trait D {
    fn d(&self);
    fn e(&self) {}
}

fn free() {}

impl A {
    pub fn new() -> Self {
        A
    }

    fn helper(&self) {}
}

impl D for A {
    fn d(&self) {}
}

mod inner {
    pub struct A;

    pub fn free() {}
}
";

const BINDERS: &str = r#"
/// Binds an `int` value.
pub fn bind_int() -> &'static str {
    "int"
}

pub fn bind_int_slice() -> &'static str {
    "[]int"
}
"#;

fn content(entries: &[(&str, &str)]) -> CodeContent {
    let mut content = CodeContent::new();
    for (key, text) in entries {
        content.insert(*key, (*text).to_owned());
    }
    content
}

fn sign(entries: &[(&str, &str)]) -> SignatureResult {
    from_content(&content(entries)).expect("sign content")
}

#[fixture]
fn tree() -> TempTree {
    TempTree::new().expect("create temp tree")
}

#[rstest]
fn counts_types_functions_and_methods() {
    let result = sign(&[("generated/mixed.rs", MIXED)]);

    // A, B, C, D and inner::A.
    assert_eq!(result.totals.types, 5);
    // D::d, D::e, free, A::new, A::helper, <A as D>::d and inner::free.
    assert_eq!(result.totals.funcs, 7);
    assert_eq!(result.status, SignatureStatus::Signed);
    assert_eq!(result.hash.len(), 64);
}

#[rstest]
fn repeated_declarations_count_once() {
    let source = "#[cfg(unix)]\nfn f() {}\n#[cfg(not(unix))]\nfn f() {}\n";
    let result = sign(&[("a.rs", source)]);
    assert_eq!(result.totals.funcs, 1);
}

#[rstest]
fn totals_sum_per_artifact_counts() {
    let result = sign(&[("generated/mixed.rs", MIXED), ("generated/binders.rs", BINDERS)]);

    assert_eq!(
        result.counts_for("generated/binders.rs"),
        Some(DeclarationCounts { types: 0, funcs: 2 })
    );
    assert_eq!(result.totals, DeclarationCounts { types: 5, funcs: 9 });
    let keys: Vec<&str> = result
        .per_artifact
        .iter()
        .map(|entry| entry.artifact.as_str())
        .collect();
    assert_eq!(keys, ["generated/mixed.rs", "generated/binders.rs"]);
}

#[rstest]
fn reformatting_keeps_the_hash() {
    let original = sign(&[("generated/binders.rs", BINDERS)]);
    let reflowed = reflow(BINDERS, 4);
    let commented = format!("// regenerated\n{BINDERS}\n// trailing note\n");

    assert_eq!(sign(&[("generated/binders.rs", &reflowed)]).hash, original.hash);
    assert_eq!(sign(&[("generated/binders.rs", &commented)]).hash, original.hash);
}

#[rstest]
#[case::split_call_arguments(
    "fn f() {\n    call(a, b);\n}\n",
    "fn f() {\n    call(\n        a,\n        b,\n    );\n}\n"
)]
#[case::split_macro_arguments(
    "fn f() { assert_eq!(a, b); }",
    "fn f() {\n    assert_eq!(\n        a,\n        b,\n    );\n}\n"
)]
#[case::single_argument(
    "fn f() { call(long_argument); }",
    "fn f() {\n    call(\n        long_argument,\n    );\n}\n"
)]
#[case::struct_fields("struct S { a: u8, b: u8 }", "struct S {\n    a: u8,\n    b: u8,\n}\n")]
#[case::block_arm_commas(
    "fn f(x: u8) -> u8 { match x { 0 => { 1 }, _ => { 2 }, } }",
    "fn f(x: u8) -> u8 {\n    match x {\n        0 => {\n            1\n        }\n        _ => {\n            2\n        }\n    }\n}\n"
)]
#[case::last_arm_comma(
    "fn f(x: u8) -> u8 { match x { 0 => 1, _ => 2 } }",
    "fn f(x: u8) -> u8 {\n    match x {\n        0 => 1,\n        _ => 2,\n    }\n}\n"
)]
#[case::import_order(
    "use b::Y;\nuse a::{Z, X};\nmod q;\nmod p;\nfn f() {}\n",
    "mod p;\nmod q;\n\nuse a::{X, Z};\nuse b::Y;\n\nfn f() {}\n"
)]
fn formatter_rewrites_keep_the_hash(#[case] compact: &str, #[case] formatted: &str) {
    assert_eq!(
        sign(&[("a.rs", compact)]).hash,
        sign(&[("a.rs", formatted)]).hash
    );
}

#[rstest]
#[case::one_tuple_expression("fn f() -> u8 { (1) }", "fn f() -> (u8,) { (1,) }")]
#[case::one_tuple_binding("fn f() { let (a) = b; }", "fn f() { let (a,) = b; }")]
#[case::dropped_argument("fn f() { call(a, b); }", "fn f() { call(a); }")]
#[case::imported_item("use a::{X, Z};\n", "use a::{X, Y};\n")]
fn meaningful_commas_and_imports_are_hashed(#[case] first: &str, #[case] second: &str) {
    assert_ne!(sign(&[("a.rs", first)]).hash, sign(&[("a.rs", second)]).hash);
}

#[rstest]
#[case::literal(BINDERS.replace("\"int\"", "\"integer\""))]
#[case::doc_comment(BINDERS.replace("Binds an", "Attaches an"))]
#[case::removed_function(BINDERS.replace("pub fn bind_int_slice() -> &'static str {\n    \"[]int\"\n}\n", ""))]
#[case::added_function(format!("{BINDERS}\npub fn bind_uint() -> &'static str {{ \"uint\" }}\n"))]
fn semantic_changes_move_the_hash(#[case] changed: String) {
    let original = sign(&[("generated/binders.rs", BINDERS)]);
    assert_ne!(sign(&[("generated/binders.rs", &changed)]).hash, original.hash);
}

#[rstest]
fn artifact_names_and_order_are_hashed() {
    let original = sign(&[("a.rs", BINDERS), ("b.rs", MIXED)]);
    let renamed = sign(&[("c.rs", BINDERS), ("b.rs", MIXED)]);
    let swapped = sign(&[("b.rs", MIXED), ("a.rs", BINDERS)]);

    assert_ne!(renamed.hash, original.hash);
    assert_ne!(swapped.hash, original.hash);
}

#[rstest]
fn hashing_is_deterministic() {
    let first = sign(&[("a.rs", BINDERS), ("b.rs", MIXED)]);
    let second = sign(&[("a.rs", BINDERS), ("b.rs", MIXED)]);
    assert_eq!(first, second);
}

#[rstest]
fn parse_errors_name_artifact_and_location() {
    let source = "fn ok() {}\n\nstruct 42;\n";
    let err = from_content(&content(&[("generated/broken.rs", source)]))
        .expect_err("invalid source must fail");

    match err {
        TypebindError::Parse {
            artifact,
            line,
            column,
            ..
        } => {
            assert_eq!(artifact, "generated/broken.rs");
            assert_eq!(line, 3);
            assert_eq!(column, 8);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[rstest]
fn empty_content_yields_zero_value() {
    let result = from_content(&CodeContent::new()).expect("sign empty content");
    assert_eq!(result, SignatureResult::default());
    assert!(result.is_empty());
    assert!(result.hash.is_empty());
}

#[rstest]
fn report_lists_artifacts_totals_and_hash() {
    let result = sign(&[("generated/binders.rs", BINDERS)]);

    let lines: Vec<&str> = result.output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.first().is_some_and(|l| l.starts_with("generated/binders.rs")));
    assert!(lines.get(1).is_some_and(|l| l.starts_with("total") && l.ends_with("funcs    2")));
    assert_eq!(lines.get(2).copied(), Some(format!("hash {}", result.hash).as_str()));
}

#[rstest]
fn filesystem_signature_matches_content_signature(tree: TempTree) {
    tree.write("generated/binders.rs", BINDERS).expect("write binders");
    tree.write("generated/validators.rs", MIXED).expect("write validators");

    let on_disk = from_filesystem(tree.root(), &build_artifacts()).expect("sign tree");
    let expected = sign(&[
        ("generated/binders.rs", BINDERS),
        ("generated/validators.rs", MIXED),
    ]);
    assert_eq!(on_disk, expected);
}

#[rstest]
fn filesystem_signature_skips_missing_and_disabled_files(tree: TempTree) {
    tree.write("generated/binders.rs", BINDERS).expect("write binders");
    tree.write("generated/parsers.rs", "this is not rust").expect("write parsers");

    let on_disk = from_filesystem(tree.root(), &build_artifacts()).expect("sign tree");
    let keys: Vec<&str> = on_disk
        .per_artifact
        .iter()
        .map(|entry| entry.artifact.as_str())
        .collect();
    assert_eq!(keys, ["generated/binders.rs"]);
}

#[rstest]
fn filesystem_signature_of_missing_root_is_empty(tree: TempTree) {
    let result = from_filesystem(&tree.path("absent"), &build_artifacts()).expect("sign tree");
    assert!(result.is_empty());
}
