pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod types;

use std::io::Write;

pub use crate::decode::{parse, parse_with_progress, ParseOutcome, Progress};
pub use crate::error::{Error, Result};
pub use crate::types::{Arr, Dict, Doc, Kind, Tuple};

/// Parses `input`, keeping whatever tree could be built and dropping the
/// diagnostic. Use [`parse`] to observe it.
pub fn from_str(input: &str) -> Doc {
    decode::parse(input).into_doc()
}

/// Renders `doc` compactly. `visualize` switches to the human-oriented leaf
/// forms: grouped integers, scientific floats, `True`/`False`, `NullPtr`,
/// and `(...)` tuples.
pub fn to_string(doc: &Doc, visualize: bool) -> String {
    encode::to_string(doc, visualize)
}

/// Renders `doc` to `writer` with two-space indentation per dict level.
pub fn to_writer<W: Write>(writer: W, doc: &Doc, visualize: bool) -> std::io::Result<()> {
    encode::to_writer(writer, doc, visualize)
}
