//! Type-directed variable naming.
//!
//! Generated variables are named after their types so the output reads
//! naturally: an `int` argument becomes `argInt`, a `[]model.ID` result
//! becomes `expectedModelID`. Argument, expected and actual names use
//! distinct prefixes and therefore never clash with each other.

use crate::interface::MethodSignature;
use crate::syntax::Type;

/// Prefix for argument variables.
pub const ARG_PREFIX: &str = "arg";
/// Prefix for reference results.
pub const EXPECTED_PREFIX: &str = "expected";
/// Prefix for results of the implementation under test.
pub const ACTUAL_PREFIX: &str = "actual";

/// A possibly non-unique variable name for one value of `ty`.
///
/// Keeps only the letters of the canonical rendering and upper-cases the
/// first one.
pub fn type_var_name(prefix: &str, ty: &Type) -> String {
    let rendered = ty.render();
    let mut letters = rendered.chars().filter(|c| c.is_ascii_alphabetic());
    let mut name = String::from(prefix);
    if let Some(first) = letters.next() {
        name.extend(first.to_uppercase());
    }
    name.extend(letters);
    name
}

/// Unique variable names for a list of types.
///
/// A name that repeats an earlier one gets its position appended.
pub fn type_list_names(prefix: &str, types: &[Type]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(types.len());
    for (index, ty) in types.iter().enumerate() {
        let base = type_var_name(prefix, ty);
        let mut name = base.clone();
        let mut suffix = 0usize;
        while names.contains(&name) {
            name = if suffix == 0 {
                format!("{}{}", base, index)
            } else {
                format!("{}{}_{}", base, index, suffix)
            };
            suffix += 1;
        }
        names.push(name);
    }
    names
}

/// Argument variable names for a signature.
pub fn arg_names(signature: &MethodSignature) -> Vec<String> {
    type_list_names(ARG_PREFIX, &signature.params)
}

/// Reference result variable names for a signature.
pub fn expected_names(signature: &MethodSignature) -> Vec<String> {
    type_list_names(EXPECTED_PREFIX, &signature.returns)
}

/// Tested result variable names for a signature.
pub fn actual_names(signature: &MethodSignature) -> Vec<String> {
    type_list_names(ACTUAL_PREFIX, &signature.returns)
}
