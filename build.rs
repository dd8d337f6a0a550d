// Build script that generates the default generator/comparison tables.
// Build scripts do not ship in the library, so we allow expect() and panic().
#![allow(clippy::expect_used)]
//
// Consumes `defaults.json` and generates `defaults_generated.rs`:
// - `DEFAULT_GENERATORS` - canonical type string -> generator expression
// - `DEFAULT_COMPARISONS` - canonical type string -> comparison template
// - `FALLBACK_COMPARISON` - comparison template for every other type
// - `STANDARD_IMPORTS` - packages referenced by the generated code

use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Defaults {
    version: String,
    generators: Vec<GeneratorInfo>,
    comparisons: Vec<ComparisonInfo>,
    fallback_comparison: String,
    imports: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratorInfo {
    #[serde(rename = "type")]
    ty: String,
    expr: String,
}

#[derive(Debug, Deserialize)]
struct ComparisonInfo {
    #[serde(rename = "type")]
    ty: String,
    template: String,
}

fn main() {
    println!("cargo:rerun-if-changed=defaults.json");
    println!("cargo:rerun-if-changed=build.rs");

    let content = fs::read_to_string("defaults.json").expect("Failed to read defaults.json");
    let defaults: Defaults =
        serde_json::from_str(&content).expect("Failed to parse defaults.json");

    if defaults.version != "1" {
        panic!(
            "Unexpected defaults.json version '{}', expected '1'",
            defaults.version
        );
    }

    check_unique("generator", defaults.generators.iter().map(|g| g.ty.as_str()));
    check_unique("comparison", defaults.comparisons.iter().map(|c| c.ty.as_str()));
    check_template("fallback", &defaults.fallback_comparison);
    for comparison in &defaults.comparisons {
        check_template(&comparison.ty, &comparison.template);
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    generate_defaults_rs(Path::new(&out_dir), &defaults);
}

fn check_unique<'a>(what: &str, keys: impl Iterator<Item = &'a str>) {
    let mut seen = BTreeSet::new();
    for key in keys {
        if !seen.insert(key) {
            panic!("Duplicate default {} for type '{}'", what, key);
        }
    }
}

fn check_template(ty: &str, template: &str) {
    if !template.contains("%expected") || !template.contains("%actual") {
        panic!(
            "Comparison template for '{}' must mention %expected and %actual",
            ty
        );
    }
}

fn generate_defaults_rs(out_path: &Path, defaults: &Defaults) {
    let mut code = String::new();

    code.push_str(
        r#"// Default tables generated from defaults.json.
//
// DO NOT EDIT - This file is generated by build.rs

"#,
    );

    code.push_str("/// Generator expressions for builtin types, keyed by canonical type string.\n");
    code.push_str("pub const DEFAULT_GENERATORS: &[(&str, &str)] = &[\n");
    for generator in &defaults.generators {
        code.push_str(&format!("    ({:?}, {:?}),\n", generator.ty, generator.expr));
    }
    code.push_str("];\n\n");

    code.push_str("/// Comparison templates for builtin types, keyed by canonical type string.\n");
    code.push_str("pub const DEFAULT_COMPARISONS: &[(&str, &str)] = &[\n");
    for comparison in &defaults.comparisons {
        code.push_str(&format!(
            "    ({:?}, {:?}),\n",
            comparison.ty, comparison.template
        ));
    }
    code.push_str("];\n\n");

    code.push_str("/// Comparison template used when no other comparison applies.\n");
    code.push_str(&format!(
        "pub const FALLBACK_COMPARISON: &str = {:?};\n\n",
        defaults.fallback_comparison
    ));

    code.push_str("/// Packages the generated code refers to.\n");
    code.push_str("pub const STANDARD_IMPORTS: &[&str] = &[\n");
    for import in &defaults.imports {
        code.push_str(&format!("    {:?},\n", import));
    }
    code.push_str("];\n");

    fs::write(out_path.join("defaults_generated.rs"), code)
        .expect("Failed to write defaults_generated.rs");
}
