//! Source units: the declarations and comments extracted from one file.
//!
//! A unit is a JSON document produced by an upstream extractor:
//!
//! ```json
//! {
//!   "module": "store",
//!   "imports": [{ "path": "example.com/model" }],
//!   "interfaces": [
//!     { "name": "Store", "methods": [{ "name": "Len", "returns": ["int"] }] }
//!   ],
//!   "comments": ["// @fuzz interface: Store\n// @known correct: makeStore"]
//! }
//! ```

use crate::error::{Error, FuzzResult};
use crate::interface::InterfaceDeclaration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An import of the source file, copied into complete output files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Import {
    /// Explicit local name, if any.
    #[serde(default)]
    pub name: Option<String>,
    /// Import path without quotes.
    pub path: String,
}

impl Import {
    /// An import without a local name.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
        }
    }

    /// The identifier the importing file uses for this package.
    pub fn local_name(&self) -> &str {
        match &self.name {
            Some(name) => name.as_str(),
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }
}

/// Everything the generator needs to know about one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Module (package) name, also used in mismatch messages.
    pub module: String,
    /// Imports of the source file.
    #[serde(default)]
    pub imports: Vec<Import>,
    /// Declared interfaces in source order.
    #[serde(default)]
    pub interfaces: Vec<InterfaceDeclaration>,
    /// Raw comment blocks in source order.
    #[serde(default)]
    pub comments: Vec<String>,
}

impl SourceUnit {
    /// Parse a unit from JSON text.
    pub fn from_json(json: &str) -> FuzzResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a unit file.
    pub fn load<P: AsRef<Path>>(path: P) -> FuzzResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}
