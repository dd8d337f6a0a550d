//! Generation options.
//!
//! Options come from defaults, then an optional JSON config file, then
//! command-line flags. Fields missing from a config file keep their
//! defaults.

use crate::error::{Error, FuzzResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed used by the generated test entry routine.
pub const DEFAULT_SEED: u64 = 0;

/// Number of random operations the generated test entry routine performs.
pub const DEFAULT_ITERATIONS: u64 = 100;

/// Options controlling what gets generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// PRNG seed in the generated entry routine.
    pub seed: u64,
    /// Operation budget in the generated entry routine.
    pub iterations: u64,
    /// Emit the `FuzzTest<I>` entry routine.
    pub emit_test_case: bool,
    /// Emit the `Fuzz<I>` default-reference driver (and therefore allow the entry routine).
    pub emit_default_fuzz: bool,
    /// Emit a complete file with package header and imports.
    pub complete: bool,
    /// Package name for complete files; defaults to the unit's module.
    pub package: Option<String>,
}

impl Options {
    /// Defaults: every routine, seed 0, 100 operations, fragments only.
    pub const fn standard() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
            emit_test_case: true,
            emit_default_fuzz: true,
            complete: false,
            package: None,
        }
    }

    /// Load options from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> FuzzResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse options from JSON text.
    pub fn from_json(json: &str) -> FuzzResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::standard()
    }
}
