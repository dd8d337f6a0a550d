//! Annotation directives embedded in comment blocks.
//!
//! A harness is requested by a comment such as:
//!
//! ```text
//! @fuzz interface: Store
//! @known correct: & makeReferenceStore int
//! @comparison: compareMessageIterators *MessageIterator
//! @generator state: uint(0)
//! @generator:   generateChannel model.Channel
//! @generator: ! generateID      model.ID
//! @invariant: %var.MessageLimit() >= 0
//! ```
//!
//! - [`spec`] - the [`HarnessSpec`] accumulator and its parts
//! - [`parser`] - block scanning and the per-directive grammars

pub mod parser;
pub mod spec;

pub use parser::{parse_block, parse_harnesses};
pub use spec::{
    Comparator, ComparatorStyle, Generator, HarnessSpec, ReferenceConstructor,
    INVARIANT_PLACEHOLDER,
};
