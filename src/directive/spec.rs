//! Harness specifications accumulated from annotation directives.

use crate::interface::MethodSignature;
use crate::syntax::Type;
use serde::Serialize;
use std::collections::BTreeMap;

/// Token in invariant expressions that stands for the instance under check.
pub const INVARIANT_PLACEHOLDER: &str = "%var";

/// How the reference implementation is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceConstructor {
    /// Constructor name, parameters, and the injected interface return type.
    pub signature: MethodSignature,
    /// The constructor returns a value whose address must be taken.
    pub by_value: bool,
}

/// Whether a comparator is called as a method or a free function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparatorStyle {
    /// `expected.Name(actual)`
    Method,
    /// `Name(expected, actual)`
    Function,
}

/// A user-supplied equality check for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparator {
    /// Method or function name.
    pub name: String,
    /// Call shape.
    pub style: ComparatorStyle,
    /// The compared type.
    pub ty: Type,
}

impl Comparator {
    /// Render the comparison of two variables as a boolean expression.
    pub fn call(&self, expected: &str, actual: &str) -> String {
        match self.style {
            ComparatorStyle::Method => format!("{}.{}({})", expected, self.name, actual),
            ComparatorStyle::Function => format!("{}({}, {})", self.name, expected, actual),
        }
    }
}

/// A user-supplied value generator for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generator {
    /// Function name.
    pub name: String,
    /// Takes and returns the shared `state` value.
    pub stateful: bool,
}

/// Everything one `@fuzz interface:` section asks for.
///
/// Comparators and generators are keyed by [`Type::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessSpec {
    /// Target interface name.
    pub interface: String,
    /// Reference constructor, if declared.
    pub reference: Option<ReferenceConstructor>,
    /// Comparators by canonical type string.
    pub comparators: BTreeMap<String, Comparator>,
    /// Generators by canonical type string.
    pub generators: BTreeMap<String, Generator>,
    /// Initial value of the generator state, copied verbatim.
    pub generator_state: Option<String>,
    /// Invariant expressions, copied verbatim.
    pub invariants: Vec<String>,
}

impl HarnessSpec {
    /// Start an empty specification for `interface`.
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            reference: None,
            comparators: BTreeMap::new(),
            generators: BTreeMap::new(),
            generator_state: None,
            invariants: Vec::new(),
        }
    }

    /// Record the reference constructor. The return type is always the target interface.
    pub fn set_reference(&mut self, name: String, params: Vec<Type>, by_value: bool) {
        let returns = vec![Type::named(self.interface.clone())];
        self.reference = Some(ReferenceConstructor {
            signature: MethodSignature::new(name, params, returns),
            by_value,
        });
    }

    /// Register a comparator; a later registration for the same type wins.
    pub fn add_comparator(&mut self, comparator: Comparator) {
        self.comparators.insert(comparator.ty.render(), comparator);
    }

    /// Register a generator; a later registration for the same type wins.
    pub fn add_generator(&mut self, ty: &Type, generator: Generator) {
        self.generators.insert(ty.render(), generator);
    }

    /// Comparator registered for `ty`.
    pub fn comparator_for(&self, ty: &Type) -> Option<&Comparator> {
        self.comparators.get(&ty.render())
    }

    /// Generator registered for `ty`.
    pub fn generator_for(&self, ty: &Type) -> Option<&Generator> {
        self.generators.get(&ty.render())
    }

    /// The first of `types` produced by a stateful generator.
    pub fn first_stateful<'a>(&self, types: impl IntoIterator<Item = &'a Type>) -> Option<&'a Type> {
        types
            .into_iter()
            .find(|ty| self.generator_for(ty).is_some_and(|g| g.stateful))
    }
}
