//! Comparison and validation operators rendered into validator functions.

use bitflags::bitflags;
use serde::Serialize;

use super::TypeSpec;

/// Identifies one operator in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    /// Value lies in the inclusive range `[min, max]`.
    Within,
    /// Value lies outside the inclusive range `[min, max]`.
    NotWithin,
    /// Value is a member of a set.
    Contains,
    /// Value is not a member of a set.
    NotContains,
    /// Value matches a regular expression.
    IsMatch,
    /// Value does not match a regular expression.
    IsNotMatch,
    /// Value is strictly greater than a bound.
    GreaterThan,
    /// Value is greater than or equal to a bound.
    AtLeast,
    /// Value is strictly less than a bound.
    LessThan,
    /// Value is less than or equal to a bound.
    AtMost,
}

impl OperatorKind {
    /// Every operator kind, in production registry order.
    pub const ALL: [Self; 10] = [
        Self::Within,
        Self::NotWithin,
        Self::Contains,
        Self::NotContains,
        Self::IsMatch,
        Self::IsNotMatch,
        Self::GreaterThan,
        Self::AtLeast,
        Self::LessThan,
        Self::AtMost,
    ];

    /// Returns the operator's display name (for example `NotWithin`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Within => "Within",
            Self::NotWithin => "NotWithin",
            Self::Contains => "Contains",
            Self::NotContains => "NotContains",
            Self::IsMatch => "IsMatch",
            Self::IsNotMatch => "IsNotMatch",
            Self::GreaterThan => "GreaterThan",
            Self::AtLeast => "AtLeast",
            Self::LessThan => "LessThan",
            Self::AtMost => "AtMost",
        }
    }

    /// Returns the suffix appended to generated function names.
    #[must_use]
    pub const fn fn_suffix(self) -> &'static str {
        match self {
            Self::Within => "within",
            Self::NotWithin => "not_within",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::IsMatch => "is_match",
            Self::IsNotMatch => "is_not_match",
            Self::GreaterThan => "greater_than",
            Self::AtLeast => "at_least",
            Self::LessThan => "less_than",
            Self::AtMost => "at_most",
        }
    }

    /// Returns the category of types this operator can validate.
    #[must_use]
    pub const fn category(self) -> OperatorCategory {
        match self {
            Self::IsMatch | Self::IsNotMatch => OperatorCategory::Pattern,
            Self::Within
            | Self::NotWithin
            | Self::Contains
            | Self::NotContains
            | Self::GreaterThan
            | Self::AtLeast
            | Self::LessThan
            | Self::AtMost => OperatorCategory::Orderable,
        }
    }

    /// Returns the single-bit set identifying this operator.
    #[must_use]
    pub const fn flag(self) -> OperatorSet {
        match self {
            Self::Within => OperatorSet::WITHIN,
            Self::NotWithin => OperatorSet::NOT_WITHIN,
            Self::Contains => OperatorSet::CONTAINS,
            Self::NotContains => OperatorSet::NOT_CONTAINS,
            Self::IsMatch => OperatorSet::IS_MATCH,
            Self::IsNotMatch => OperatorSet::IS_NOT_MATCH,
            Self::GreaterThan => OperatorSet::GREATER_THAN,
            Self::AtLeast => OperatorSet::AT_LEAST,
            Self::LessThan => OperatorSet::LESS_THAN,
            Self::AtMost => OperatorSet::AT_MOST,
        }
    }
}

bitflags! {
    /// Set of operators applicable to a type, fixed when the type is defined.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OperatorSet: u16 {
        /// See [`OperatorKind::Within`].
        const WITHIN = 1 << 0;
        /// See [`OperatorKind::NotWithin`].
        const NOT_WITHIN = 1 << 1;
        /// See [`OperatorKind::Contains`].
        const CONTAINS = 1 << 2;
        /// See [`OperatorKind::NotContains`].
        const NOT_CONTAINS = 1 << 3;
        /// See [`OperatorKind::IsMatch`].
        const IS_MATCH = 1 << 4;
        /// See [`OperatorKind::IsNotMatch`].
        const IS_NOT_MATCH = 1 << 5;
        /// See [`OperatorKind::GreaterThan`].
        const GREATER_THAN = 1 << 6;
        /// See [`OperatorKind::AtLeast`].
        const AT_LEAST = 1 << 7;
        /// See [`OperatorKind::LessThan`].
        const LESS_THAN = 1 << 8;
        /// See [`OperatorKind::AtMost`].
        const AT_MOST = 1 << 9;

        /// Operators available to any type supporting `<`, `<=`, `>`, `>=`.
        const ORDERED = Self::WITHIN.bits()
            | Self::NOT_WITHIN.bits()
            | Self::CONTAINS.bits()
            | Self::NOT_CONTAINS.bits()
            | Self::GREATER_THAN.bits()
            | Self::AT_LEAST.bits()
            | Self::LESS_THAN.bits()
            | Self::AT_MOST.bits();
        /// Regular-expression operators for string-like types.
        const PATTERN = Self::IS_MATCH.bits() | Self::IS_NOT_MATCH.bits();
        /// Orderable string-like types receive every operator.
        const STRING_LIKE = Self::ORDERED.bits() | Self::PATTERN.bits();
    }
}

/// Partition of types an operator can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorCategory {
    /// Numeric, string and duration types with a total order.
    Orderable,
    /// String-like types only.
    Pattern,
}

impl OperatorCategory {
    /// Returns the identifier used in template data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orderable => "orderable",
            Self::Pattern => "pattern",
        }
    }
}

/// Shape of an operator parameter relative to the bound type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// A single `T`.
    Value,
    /// A `Vec<T>` membership set.
    Set,
    /// A compiled regular expression.
    Pattern,
}

/// Named parameter accepted by a generated operator function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorParam {
    /// Parameter identifier in the generated signature.
    pub name: &'static str,
    /// Parameter shape.
    pub kind: ParamKind,
}

impl OperatorParam {
    const fn value(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Value,
        }
    }
}

/// A named validation rule and the fragments needed to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    kind: OperatorKind,
    params: Vec<OperatorParam>,
    predicate: &'static str,
}

impl Operator {
    /// Creates an operator whose `predicate` is a Rust boolean expression over
    /// `value: &T` and the named `params`.
    #[must_use]
    pub const fn new(
        kind: OperatorKind,
        params: Vec<OperatorParam>,
        predicate: &'static str,
    ) -> Self {
        Self {
            kind,
            params,
            predicate,
        }
    }

    /// Returns the operator kind.
    #[must_use]
    pub const fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// Returns the operator display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns the category of types this operator validates.
    #[must_use]
    pub const fn category(&self) -> OperatorCategory {
        self.kind.category()
    }

    /// Returns the parameters accepted by the generated function.
    #[must_use]
    pub fn params(&self) -> &[OperatorParam] {
        &self.params
    }

    /// Returns the predicate expression rendered into the validator body.
    #[must_use]
    pub const fn predicate(&self) -> &'static str {
        self.predicate
    }

    /// Returns the message-catalogue key used for failures.
    #[must_use]
    pub fn message_key(&self) -> String {
        format!("validation.{}", self.kind.fn_suffix())
    }

    /// Reports whether `spec` receives a validator for this operator.
    #[must_use]
    pub const fn applies_to(&self, spec: &TypeSpec) -> bool {
        spec.operators().contains(self.kind.flag())
    }
}

/// Ordered collection of operators keyed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorRegistry {
    operators: Vec<Operator>,
}

impl OperatorRegistry {
    /// Creates a registry from operators in rendering order.
    ///
    /// # Panics
    ///
    /// Panics if two operators share a kind; the operator set is fixed at
    /// compile time so a duplicate is a programming error.
    #[must_use]
    pub fn new(operators: impl IntoIterator<Item = Operator>) -> Self {
        let mut registry = Self::default();
        for operator in operators {
            registry.register(operator);
        }
        registry
    }

    fn register(&mut self, operator: Operator) {
        assert!(
            self.get(operator.kind()).is_none(),
            "operator '{}' registered twice",
            operator.name()
        );
        self.operators.push(operator);
    }

    /// Looks up an operator by kind.
    #[must_use]
    pub fn get(&self, kind: OperatorKind) -> Option<&Operator> {
        self.operators.iter().find(|op| op.kind() == kind)
    }

    /// Iterates operators in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    /// Iterates the operators applicable to `spec`, in registry order.
    pub fn applicable_to<'a>(&'a self, spec: &'a TypeSpec) -> impl Iterator<Item = &'a Operator> {
        self.operators.iter().filter(move |op| op.applies_to(spec))
    }

    /// Returns the number of registered operators.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.operators.len()
    }

    /// Reports whether the registry is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

/// Builds the production operator registry.
#[must_use]
pub fn build_operators() -> OperatorRegistry {
    OperatorRegistry::new(OperatorKind::ALL.into_iter().map(operator_for))
}

/// Returns the production definition of `kind`.
#[must_use]
pub fn operator_for(kind: OperatorKind) -> Operator {
    let range = || vec![OperatorParam::value("min"), OperatorParam::value("max")];
    let set = || {
        vec![OperatorParam {
            name: "set",
            kind: ParamKind::Set,
        }]
    };
    let pattern = || {
        vec![OperatorParam {
            name: "pattern",
            kind: ParamKind::Pattern,
        }]
    };
    let bound = || vec![OperatorParam::value("bound")];

    match kind {
        OperatorKind::Within => Operator::new(kind, range(), "*value >= min && *value <= max"),
        OperatorKind::NotWithin => Operator::new(kind, range(), "*value < min || *value > max"),
        OperatorKind::Contains => Operator::new(kind, set(), "set.contains(value)"),
        OperatorKind::NotContains => Operator::new(kind, set(), "!set.contains(value)"),
        OperatorKind::IsMatch => Operator::new(kind, pattern(), "pattern.is_match(value)"),
        OperatorKind::IsNotMatch => Operator::new(kind, pattern(), "!pattern.is_match(value)"),
        OperatorKind::GreaterThan => Operator::new(kind, bound(), "*value > bound"),
        OperatorKind::AtLeast => Operator::new(kind, bound(), "*value >= bound"),
        OperatorKind::LessThan => Operator::new(kind, bound(), "*value < bound"),
        OperatorKind::AtMost => Operator::new(kind, bound(), "*value <= bound"),
    }
}
