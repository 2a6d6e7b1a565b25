//! Value-type specifications and the curated registry that orders them.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use heck::ToSnakeCase;

use super::OperatorSet;

/// Identifier of a registered value type (for example `Int32`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(String);

impl TypeName {
    /// Creates a type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Metadata describing one bindable value type.
///
/// Instances are assembled with the `with_*` builders and are immutable once
/// handed to a [`TypeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    id: TypeName,
    underlying: String,
    display: Option<String>,
    has_slice: bool,
    zero: String,
    operators: OperatorSet,
}

impl TypeSpec {
    /// Creates a spec with no slice variant, no display override and no
    /// applicable operators.
    ///
    /// `zero` is a Rust expression producing a placeholder value of the
    /// underlying type, used by generated tests.
    pub fn new(
        id: impl Into<TypeName>,
        underlying: impl Into<String>,
        zero: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            underlying: underlying.into(),
            display: None,
            has_slice: false,
            zero: zero.into(),
            operators: OperatorSet::empty(),
        }
    }

    /// Overrides the name shown to users in usage text and messages.
    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Declares that a `Vec<T>` binder is generated as well.
    #[must_use]
    pub const fn with_slice(mut self) -> Self {
        self.has_slice = true;
        self
    }

    /// Sets the operators rendered for this type.
    #[must_use]
    pub const fn with_operators(mut self, operators: OperatorSet) -> Self {
        self.operators = operators;
        self
    }

    /// Returns the type identifier.
    #[must_use]
    pub const fn id(&self) -> &TypeName {
        &self.id
    }

    /// Returns the Rust type the value is bound as.
    #[must_use]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Returns the user-facing type name, falling back to the underlying type.
    #[must_use]
    pub fn display_type(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.underlying)
    }

    /// Reports whether a slice binder is generated.
    #[must_use]
    pub const fn has_slice(&self) -> bool {
        self.has_slice
    }

    /// Returns the placeholder-value expression.
    #[must_use]
    pub fn zero(&self) -> &str {
        &self.zero
    }

    /// Returns the operators applicable to this type.
    #[must_use]
    pub const fn operators(&self) -> OperatorSet {
        self.operators
    }

    /// Returns the snake-case fragment used in generated function names.
    #[must_use]
    pub fn fn_name(&self) -> String {
        self.id.as_str().to_snake_case()
    }
}

/// Type specifications keyed by identifier, iterated in a curated order.
///
/// Lookup goes through a hash map; rendering always follows the explicit
/// order supplied at construction so generated output is reproducible.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    specs: HashMap<TypeName, TypeSpec>,
    order: Vec<TypeName>,
}

impl TypeRegistry {
    /// Creates a registry from `specs`, rendered in `render_order`.
    ///
    /// # Panics
    ///
    /// Panics when a spec is registered twice, when `render_order` names an
    /// unknown or repeated type, or when a registered type is absent from
    /// `render_order`. The registry is fixed at compile time, so each case is
    /// a programming error.
    #[must_use]
    pub fn new(specs: impl IntoIterator<Item = TypeSpec>, render_order: &[&str]) -> Self {
        let mut by_id = HashMap::new();
        for spec in specs {
            let id = spec.id().clone();
            let previous = by_id.insert(id.clone(), spec);
            assert!(previous.is_none(), "type '{id}' registered twice");
        }

        let mut order: Vec<TypeName> = Vec::with_capacity(render_order.len());
        for name in render_order {
            assert!(by_id.contains_key(*name), "render order names unknown type '{name}'");
            assert!(
                !order.iter().any(|seen| seen.as_str() == *name),
                "render order lists type '{name}' twice"
            );
            order.push(TypeName::from(*name));
        }
        assert!(
            order.len() == by_id.len(),
            "render order covers {} of {} registered types",
            order.len(),
            by_id.len()
        );

        Self { specs: by_id, order }
    }

    /// Looks up a spec by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TypeSpec> {
        self.specs.get(id)
    }

    /// Iterates specs in the curated render order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeSpec> {
        self.order.iter().filter_map(|id| self.specs.get(id))
    }

    /// Returns the curated render order.
    #[must_use]
    pub fn render_order(&self) -> &[TypeName] {
        &self.order
    }

    /// Returns the number of registered specs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Reports whether the registry is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Curated render order for the production registry.
pub const RENDER_ORDER: [&str; 18] = [
    "Bool", "Int", "Int8", "Int16", "Int32", "Int64", "Uint", "Uint8", "Uint16", "Uint32",
    "Uint64", "Float32", "Float64", "String", "Duration", "IpNet", "IpMask", "Enum",
];

/// Builds the production type registry.
#[must_use]
pub fn build_types() -> TypeRegistry {
    let ordered = OperatorSet::ORDERED;
    let integer = |id: &str, underlying: &str| {
        TypeSpec::new(id, underlying, "0")
            .with_slice()
            .with_operators(ordered)
    };

    let specs = vec![
        // Strings and enumerations.
        TypeSpec::new("String", "String", "String::new()")
            .with_display("string")
            .with_slice()
            .with_operators(OperatorSet::STRING_LIKE),
        TypeSpec::new("Enum", "String", "String::new()")
            .with_display("enum")
            .with_operators(OperatorSet::STRING_LIKE),
        // Signed integers.
        integer("Int", "i64").with_display("int"),
        integer("Int8", "i8"),
        integer("Int16", "i16"),
        integer("Int32", "i32"),
        integer("Int64", "i64"),
        // Unsigned integers.
        integer("Uint", "u64").with_display("uint"),
        integer("Uint8", "u8"),
        integer("Uint16", "u16"),
        integer("Uint32", "u32"),
        integer("Uint64", "u64"),
        // Floating point.
        TypeSpec::new("Float32", "f32", "0.0")
            .with_slice()
            .with_operators(ordered),
        TypeSpec::new("Float64", "f64", "0.0")
            .with_slice()
            .with_operators(ordered),
        TypeSpec::new("Duration", "::std::time::Duration", "::std::time::Duration::ZERO")
            .with_display("duration")
            .with_slice()
            .with_operators(ordered),
        // Plain binds only: no operator-derived validators.
        TypeSpec::new("Bool", "bool", "false").with_slice(),
        TypeSpec::new("IpNet", "::ipnet::IpNet", "::ipnet::IpNet::default()")
            .with_display("IP network"),
        TypeSpec::new(
            "IpMask",
            "::std::net::IpAddr",
            "::std::net::IpAddr::from([255, 255, 255, 0])",
        )
        .with_display("IP mask"),
    ];

    TypeRegistry::new(specs, &RENDER_ORDER)
}
