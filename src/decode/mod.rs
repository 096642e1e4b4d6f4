//! Text to document tree.

mod parser;
mod progress;
mod scanner;

pub use progress::Progress;

use crate::error::Error;
use crate::types::Doc;

/// Result of a parse: a document plus an optional diagnostic.
///
/// Parsing never aborts. Malformed input degrades to null values or a
/// truncated tree, and the first structural problem encountered is kept
/// here for callers that want to distinguish clean input from repaired
/// input.
#[derive(Debug)]
pub struct ParseOutcome {
    pub doc: Doc,
    pub diagnostic: Option<Error>,
}

impl ParseOutcome {
    /// Discards the diagnostic and keeps whatever tree was built.
    pub fn into_doc(self) -> Doc {
        self.doc
    }
}

/// Parses `input` into a document tree.
pub fn parse(input: &str) -> ParseOutcome {
    parser::Parser::new(input, None).parse()
}

/// Parses `input`, publishing cursor position into `progress` as it goes.
pub fn parse_with_progress(input: &str, progress: &Progress) -> ParseOutcome {
    parser::Parser::new(input, Some(progress)).parse()
}
