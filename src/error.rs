//! Error handling for the harness generator.
//!
//! Every stage of the pipeline has its own error type so callers can tell a
//! grammar problem (fatal to one comment block) from a semantic problem
//! (fatal to one harness). Stages return errors as values and accumulate
//! them; nothing here aborts the process.

use std::path::PathBuf;
use thiserror::Error;

/// Maximum nesting depth accepted by the type parser.
pub const MAX_TYPE_DEPTH: usize = 64;

/// A malformed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// No type could be read at the start of the fragment.
    #[error("expected a type in '{0}'")]
    ExpectedType(String),

    /// A parenthesised group was not closed.
    #[error("mismatched parentheses in '{0}'")]
    MismatchedParentheses(String),

    /// A `map[` key type was not followed by `]`.
    #[error("expected ']' after map key type in '{0}'")]
    UnclosedMapKey(String),

    /// A `.` was not followed by a type name.
    #[error("expected a type name after '.' in '{0}'")]
    ExpectedQualifiedName(String),

    /// Type constructors nested beyond [`MAX_TYPE_DEPTH`].
    #[error("type nested deeper than {limit} levels in '{fragment}'")]
    TooDeep {
        /// The fragment being parsed when the limit was hit.
        fragment: String,
        /// The configured limit.
        limit: usize,
    },

    /// A complete type was read but input remained.
    #[error("unexpected left over input in '{input}' (got '{rest}')")]
    LeftoverInput {
        /// The full input.
        input: String,
        /// The unconsumed remainder.
        rest: String,
    },
}

/// The reason a single directive line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// A bare name was required.
    #[error("expected a name in '{0}'")]
    ExpectedName(String),

    /// The payload parsed but input remained.
    #[error("unexpected left over input in '{line}' (got '{rest}')")]
    LeftoverInput {
        /// The directive payload.
        line: String,
        /// The unconsumed remainder.
        rest: String,
    },

    /// `@known correct:` with nothing after it.
    #[error("@known correct has empty argument")]
    EmptyReference,

    /// `@known correct:` without a constructor name.
    #[error("@known correct must have a function name in '{0}'")]
    MissingReferenceName(String),

    /// A comparator that is neither `Type:Name` nor `Name Type`.
    #[error("'{0}' does not appear to be a method or function")]
    NotFunctionOrMethod(String),

    /// `@generator state:` with nothing after it.
    #[error("expected an initial state")]
    EmptyGeneratorState,

    /// `@invariant:` with nothing after it.
    #[error("expected an invariant expression")]
    EmptyInvariant,

    /// A harness-only directive seen before any `@fuzz interface:`.
    #[error("'{0}' appears before any @fuzz interface directive")]
    OutsideHarness(String),

    /// A type inside the directive was malformed.
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// A comment block that could not be turned into harness specifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("comment block {block}, line {line}: {kind}")]
pub struct ParseError {
    /// Zero-based index of the comment block in the source unit.
    pub block: usize,
    /// One-based line number inside the block.
    pub line: usize,
    /// What went wrong.
    pub kind: DirectiveError,
}

/// A harness request that does not line up with the declared interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// No interface with the requested name was declared.
    #[error("couldn't find interface '{0}' in this file")]
    UnknownInterface(String),

    /// More than one fuzzer would be produced for the interface.
    #[error("already have a fuzzer for '{0}'")]
    DuplicateFuzzer(String),
}

/// The reason code generation failed for one harness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateErrorKind {
    /// A parameter type has no registered or default generator.
    #[error("no generator for type {0}")]
    NoGenerator(String),

    /// A stateful generator is used but no `@generator state:` was given.
    #[error("stateful generator for type {0} used without initial state")]
    StatefulWithoutState(String),

    /// The entry routine or driver was requested without a reference constructor.
    #[error("no @known correct reference constructor given")]
    MissingReference,
}

/// Code generation failure, tagged with the owning interface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error occurred whilst generating code for '{interface}': {kind}")]
pub struct GenerateError {
    /// The interface whose harness failed.
    pub interface: String,
    /// What went wrong.
    pub kind: GenerateErrorKind,
}

impl GenerateError {
    /// Attach an interface name to a failure.
    pub fn new(interface: impl Into<String>, kind: GenerateErrorKind) -> Self {
        Self {
            interface: interface.into(),
            kind,
        }
    }
}

/// Any error the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed annotation block.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Harness requests that do not match the declarations.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Code generation failure.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Reading or writing a file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A source unit or config document was not valid JSON for its schema.
    #[error("invalid input document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for crate operations.
pub type FuzzResult<T> = Result<T, Error>;
