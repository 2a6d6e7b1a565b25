//! Type and operator registries driving body rendering.
//!
//! Both registries are plain data built once per process by
//! [`build_types`] and [`build_operators`]. Tests construct smaller
//! registries directly through [`TypeRegistry::new`] and
//! [`OperatorRegistry::new`].

mod operators;
mod types;

pub use operators::{
    Operator, OperatorCategory, OperatorKind, OperatorParam, OperatorRegistry, OperatorSet,
    ParamKind, build_operators, operator_for,
};
pub use types::{RENDER_ORDER, TypeName, TypeRegistry, TypeSpec, build_types};
