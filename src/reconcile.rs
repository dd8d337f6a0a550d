//! Matching requested harnesses against declared interfaces.

use crate::directive::HarnessSpec;
use crate::error::ReconcileError;
use crate::interface::InterfaceDeclaration;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// An interface paired with the harness requested for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledFuzzer {
    /// The declared interface.
    pub interface: InterfaceDeclaration,
    /// The harness requested for it.
    pub spec: HarnessSpec,
}

impl ReconciledFuzzer {
    /// The interface name.
    pub fn name(&self) -> &str {
        &self.interface.name
    }
}

/// Pair every specification with its declaration.
///
/// Reports one error per unknown interface and one per extra fuzzer for an
/// interface that already has one, in input order. The first fuzzer for a
/// name is kept.
pub fn reconcile(
    declarations: &[InterfaceDeclaration],
    specs: &[HarnessSpec],
) -> (Vec<ReconciledFuzzer>, Vec<ReconcileError>) {
    let mut by_name: HashMap<&str, Vec<&InterfaceDeclaration>> = HashMap::new();
    for decl in declarations {
        by_name.entry(decl.name.as_str()).or_default().push(decl);
    }

    let mut fuzzers = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for spec in specs {
        let Some(decls) = by_name.get(spec.interface.as_str()) else {
            errors.push(ReconcileError::UnknownInterface(spec.interface.clone()));
            continue;
        };
        for decl in decls {
            if seen.insert(decl.name.as_str()) {
                fuzzers.push(ReconciledFuzzer {
                    interface: (*decl).clone(),
                    spec: spec.clone(),
                });
            } else {
                debug!(interface = %decl.name, "duplicate fuzzer");
                errors.push(ReconcileError::DuplicateFuzzer(decl.name.clone()));
            }
        }
    }

    (fuzzers, errors)
}
