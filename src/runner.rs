//! The generation pipeline: parse, reconcile, generate, assemble.
//!
//! Each stage reports every independent error it finds, and later stages
//! run on whatever earlier stages produced successfully.
//!
//! # Usage
//!
//! ```
//! use ifuzz::{config::Options, runner::run, unit::SourceUnit};
//!
//! let unit = SourceUnit::from_json(r#"{
//!     "module": "counter",
//!     "interfaces": [{ "name": "Counter", "methods": [{ "name": "Add", "params": ["int"], "returns": ["int"] }] }],
//!     "comments": ["// @fuzz interface: Counter\n// @known correct: newCounter"]
//! }"#).unwrap();
//!
//! let report = run(&unit, &Options::standard());
//! assert!(report.is_clean());
//! assert!(report.output.contains("func FuzzCounterWith("));
//! ```

use crate::codegen::{assemble, generate, AssembleOptions, GenerateContext, GeneratedHarness};
use crate::config::Options;
use crate::directive::parse_harnesses;
use crate::error::Error;
use crate::reconcile::reconcile;
use crate::unit::SourceUnit;
use tracing::{info, warn};

/// Outcome of one pipeline run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Assembled text for every harness that generated successfully.
    pub output: String,
    /// The successfully generated harnesses, in request order.
    pub harnesses: Vec<GeneratedHarness>,
    /// Every error from every stage, in stage order.
    pub errors: Vec<Error>,
}

impl RunReport {
    /// True if no stage reported an error.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every stage over one source unit.
pub fn run(unit: &SourceUnit, options: &Options) -> RunReport {
    let mut report = RunReport::default();

    let (specs, parse_errors) = parse_harnesses(&unit.comments);
    info!(
        target: "pipeline",
        stage = "parse",
        blocks = unit.comments.len(),
        specs = specs.len(),
        errors = parse_errors.len(),
        "parsed annotations"
    );
    report.errors.extend(parse_errors.into_iter().map(Error::from));

    let (fuzzers, reconcile_errors) = reconcile(&unit.interfaces, &specs);
    info!(
        target: "pipeline",
        stage = "reconcile",
        fuzzers = fuzzers.len(),
        errors = reconcile_errors.len(),
        "reconciled harnesses"
    );
    report.errors.extend(reconcile_errors.into_iter().map(Error::from));

    let ctx = GenerateContext::from_options(unit.module.clone(), options);
    for fuzzer in &fuzzers {
        match generate(fuzzer, &ctx) {
            Ok(harness) => report.harnesses.push(harness),
            Err(err) => {
                warn!(target: "pipeline", stage = "generate", interface = fuzzer.name(), error = %err);
                report.errors.push(err.into());
            }
        }
    }
    info!(
        target: "pipeline",
        stage = "generate",
        harnesses = report.harnesses.len(),
        "generated code"
    );

    let assemble_options = AssembleOptions {
        complete: options.complete,
        package: options.package.clone().unwrap_or_else(|| unit.module.clone()),
    };
    report.output = assemble(&report.harnesses, &unit.imports, &assemble_options);
    report
}
