//! Differential-test code generation.
//!
//! Turns a [`ReconciledFuzzer`] into up to three routines of host-language
//! source text and assembles them into a file.
//!
//! # Architecture
//!
//! - [`defaults`] - builtin generator and comparison tables
//! - [`naming`] - type-directed variable names
//! - [`writer`] - indentation-aware text writer and string quoting
//! - [`emit`] - the entry, driver and core routines
//! - [`assemble`] - package header, imports and per-interface sections

pub mod assemble;
pub mod defaults;
pub mod emit;
pub mod naming;
pub mod writer;

pub use assemble::{assemble, AssembleOptions};
pub use emit::{generate_core, generate_driver, generate_entry};

use crate::config::{Options, DEFAULT_ITERATIONS, DEFAULT_SEED};
use crate::error::GenerateError;
use crate::reconcile::ReconciledFuzzer;
use tracing::debug;

/// Settings shared by every harness in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateContext {
    /// Module display name used in mismatch messages.
    pub module: String,
    /// PRNG seed in the entry routine.
    pub seed: u64,
    /// Operation budget in the entry routine.
    pub iterations: u64,
    /// Emit the entry routine.
    pub emit_test_case: bool,
    /// Emit the default-reference driver.
    pub emit_default_fuzz: bool,
}

impl GenerateContext {
    /// Every routine, default seed and iterations.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
            emit_test_case: true,
            emit_default_fuzz: true,
        }
    }

    /// Settings taken from run options.
    pub fn from_options(module: impl Into<String>, options: &Options) -> Self {
        Self {
            module: module.into(),
            seed: options.seed,
            iterations: options.iterations,
            emit_test_case: options.emit_test_case,
            emit_default_fuzz: options.emit_default_fuzz,
        }
    }

    fn wants_entry(&self) -> bool {
        self.emit_test_case && self.emit_default_fuzz
    }
}

/// Generated routines for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHarness {
    /// Interface name.
    pub interface: String,
    /// `FuzzTest<I>`, unless disabled.
    pub entry: Option<String>,
    /// `Fuzz<I>`, unless disabled.
    pub driver: Option<String>,
    /// `Fuzz<I>With`.
    pub core: String,
}

impl GeneratedHarness {
    /// The emitted routines in output order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.entry
            .as_deref()
            .into_iter()
            .chain(self.driver.as_deref())
            .chain(std::iter::once(self.core.as_str()))
    }
}

/// Generate every routine for one fuzzer.
///
/// The first failure aborts this harness only.
pub fn generate(
    fuzzer: &ReconciledFuzzer,
    ctx: &GenerateContext,
) -> Result<GeneratedHarness, GenerateError> {
    let wrap = |kind| GenerateError::new(fuzzer.name(), kind);

    let entry = if ctx.wants_entry() {
        Some(generate_entry(fuzzer, ctx).map_err(wrap)?)
    } else {
        None
    };
    let driver = if ctx.emit_default_fuzz {
        Some(generate_driver(fuzzer, ctx).map_err(wrap)?)
    } else {
        None
    };
    let core = generate_core(fuzzer, ctx).map_err(wrap)?;

    debug!(
        interface = fuzzer.name(),
        methods = fuzzer.interface.methods.len(),
        "generated harness"
    );
    Ok(GeneratedHarness {
        interface: fuzzer.name().to_string(),
        entry,
        driver,
        core,
    })
}
