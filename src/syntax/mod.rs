//! Type expressions and the scanning helpers shared by the annotation parser.
//!
//! # Architecture
//!
//! - [`scan`] - character classes, prefix matching and comment-line cleanup
//! - [`types`] - the recursive [`Type`] tree and its canonical rendering
//! - [`parser`] - recursive descent parser for type expressions
//!
//! # Grammar
//!
//! ```text
//! Type := "[]" Type | "chan" Type | "map[" Type "]" Type | "*" Type
//!       | "(" Type ")" | Name "." Name | Name
//! ```
//!
//! # Example
//!
//! ```
//! use ifuzz::syntax::{parse_type, Type};
//!
//! let (ty, rest) = parse_type("map[string]*model.ID extra").unwrap();
//! assert_eq!(ty.render(), "map[string](*(model.ID))");
//! assert_eq!(rest, "extra");
//! ```

pub mod parser;
pub mod scan;
pub mod types;

pub use parser::{parse_name, parse_type, parse_type_exact};
pub use types::Type;
