//! Builtin generator and comparison tables.
//!
//! The tables live in `defaults.json` and are compiled in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/defaults_generated.rs"));

/// Generator expression for a builtin type, by canonical type string.
pub fn default_generator(ty: &str) -> Option<&'static str> {
    DEFAULT_GENERATORS
        .iter()
        .find(|(name, _)| *name == ty)
        .map(|(_, expr)| *expr)
}

/// Comparison template for a type, falling back to deep equality.
///
/// Templates refer to the compared variables as `%expected` and `%actual`.
pub fn comparison_template(ty: &str) -> &'static str {
    DEFAULT_COMPARISONS
        .iter()
        .find(|(name, _)| *name == ty)
        .map(|(_, template)| *template)
        .unwrap_or(FALLBACK_COMPARISON)
}

/// Fill a comparison template with variable names.
pub fn instantiate(template: &str, expected: &str, actual: &str) -> String {
    template
        .replace("%expected", expected)
        .replace("%actual", actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_generators() {
        assert_eq!(default_generator("int"), Some("rand.Int()"));
        assert_eq!(default_generator("bool"), Some("rand.Intn(2) == 0"));
        assert!(default_generator("string").is_none());
        assert!(default_generator("[](int)").is_none());
        assert_eq!(DEFAULT_GENERATORS.len(), 17);
    }

    #[test]
    fn test_error_presence_comparison() {
        let template = comparison_template("error");
        assert_eq!(
            instantiate(template, "expectedError", "actualError"),
            "((expectedError == nil) == (actualError == nil))"
        );
    }

    #[test]
    fn test_fallback_comparison() {
        assert_eq!(
            instantiate(comparison_template("[](int)"), "e", "a"),
            "reflect.DeepEqual(e, a)"
        );
    }

    #[test]
    fn test_standard_imports_cover_generated_code() {
        for import in ["errors", "fmt", "math/rand", "reflect", "testing"] {
            assert!(STANDARD_IMPORTS.contains(&import));
        }
    }
}
