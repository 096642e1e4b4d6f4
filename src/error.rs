use thiserror::Error;

/// Failures surfaced by the document API and the parser.
///
/// Popping an empty array is not represented here: it is an expected
/// outcome communicated as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation requiring a specific document kind was invoked on a
    /// document of a different kind.
    #[error("`{op}` requires a {expected} document, found {found}")]
    WrongKind {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Indexed access beyond the current size.
    #[error("index {index} out of bounds for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Indexed access or conversion on the uninitialized tuple sentinel.
    #[error("tuple is uninitialized")]
    UninitTuple,

    /// Structurally invalid input. The parser recovers by substituting
    /// null values; this is a diagnostic, not an abort.
    #[error("malformed input: {0}")]
    Malformed(String),
}

impl Error {
    pub(crate) fn wrong_kind(op: &'static str, expected: &'static str, found: &'static str) -> Self {
        Error::WrongKind {
            op,
            expected,
            found,
        }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Error::OutOfRange { index, len }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::Malformed(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
