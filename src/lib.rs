//! ifuzz - differential fuzz harness generator for annotated interfaces.
//!
//! Comment annotations name an interface, a trusted reference constructor,
//! and optional generators, comparators and invariants. From them this
//! crate generates test code that drives a reference implementation and an
//! implementation under test through the same random operations and reports
//! the first divergence.
//!
//! # Architecture
//!
//! The pipeline runs in four stages, each reporting every independent error:
//!
//! - [`syntax`] - type expressions, their canonical rendering and parser
//! - [`directive`] - comment blocks to [`HarnessSpec`]s
//! - [`reconcile`] - specifications paired with [`InterfaceDeclaration`]s
//! - [`codegen`] - the generated routines and file assembly
//!
//! Around them:
//!
//! - [`interface`] - declarations delivered by the upstream extractor
//! - [`unit`] - JSON source units read by the command-line tool
//! - [`config`] - generation options
//! - [`runner`] - the whole pipeline over one source unit
//! - [`logging`] - subscriber setup for the binary
//! - [`error`] - per-stage error types
//!
//! # Defaults
//!
//! The builtin generator and comparison tables are kept in `defaults.json`
//! and compiled in by build.rs.

// Generation must report bad input as errors, never by aborting.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod codegen;
pub mod config;
pub mod directive;
pub mod error;
pub mod interface;
pub mod logging;
pub mod reconcile;
pub mod runner;
pub mod syntax;
pub mod unit;

// Re-export commonly used types
pub use codegen::{generate, GenerateContext, GeneratedHarness};
pub use config::Options;
pub use directive::{parse_harnesses, HarnessSpec};
pub use error::{Error, FuzzResult};
pub use interface::{InterfaceDeclaration, MethodSignature};
pub use reconcile::{reconcile, ReconciledFuzzer};
pub use syntax::{parse_type, Type};
