//! Assembling generated routines into one output text.

use super::defaults::STANDARD_IMPORTS;
use super::writer::quote;
use super::GeneratedHarness;
use crate::syntax::scan::is_name_char;
use crate::unit::Import;
use std::collections::BTreeSet;

/// How the output text is framed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Emit a package clause and an import block.
    pub complete: bool,
    /// Package name for the package clause.
    pub package: String,
}

/// Join harnesses into one text, each under a `// <I>` header.
///
/// A complete file also gets a package clause and an import block holding
/// the standard packages the code refers to plus the source file's own
/// imports that the code refers to, deduplicated and sorted by path.
pub fn assemble(harnesses: &[GeneratedHarness], imports: &[Import], options: &AssembleOptions) -> String {
    let mut body = String::new();
    for harness in harnesses {
        body.push_str("// ");
        body.push_str(&harness.interface);
        body.push_str("\n\n");
        for fragment in harness.fragments() {
            body.push_str(fragment);
            body.push_str("\n\n");
        }
    }

    if !options.complete {
        return body;
    }

    let mut out = format!("package {}\n\n", options.package);
    let needed = needed_imports(&body, imports);
    if !needed.is_empty() {
        out.push_str("import (\n");
        for import in &needed {
            out.push('\t');
            if let Some(name) = &import.name {
                out.push_str(name);
                out.push(' ');
            }
            out.push_str(&quote(&import.path));
            out.push('\n');
        }
        out.push_str(")\n\n");
    }
    out.push_str(&body);
    out
}

/// Imports the generated code refers to, sorted by path.
fn needed_imports(code: &str, imports: &[Import]) -> Vec<Import> {
    let mut needed = BTreeSet::new();
    for path in STANDARD_IMPORTS {
        let import = Import::new(*path);
        if mentions(code, import.local_name()) {
            needed.insert((import.path.clone(), import));
        }
    }
    for import in imports {
        let blank_or_dot = matches!(import.name.as_deref(), Some("_") | Some("."));
        if blank_or_dot || mentions(code, import.local_name()) {
            needed.insert((import.path.clone(), import.clone()));
        }
    }
    needed.into_iter().map(|(_, import)| import).collect()
}

/// True if `code` contains `<package>.` at the start of an identifier.
fn mentions(code: &str, package: &str) -> bool {
    let needle = format!("{}.", package);
    code.match_indices(&needle).any(|(at, _)| {
        code[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !is_name_char(c) && c != '.')
    })
}
