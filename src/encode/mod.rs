//! Document tree to text.
//!
//! Two surfaces over one iterative traversal: [`to_string`] produces the
//! compact form (newlines only around dict entries), [`to_writer`] streams
//! the same structure with two-space indentation. Both take a `visualize`
//! flag that switches leaf formatting from parseable to human-oriented.

mod writer;

use std::io;

use smallvec::SmallVec;

use crate::types::Doc;
use writer::Writer;

struct Frame<'a> {
    doc: &'a Doc,
    key: Option<&'a str>,
    lvl: usize,
}

/// Renders `doc` to a string.
pub fn to_string(doc: &Doc, visualize: bool) -> String {
    let mut out = Vec::new();
    render(&mut out, doc, visualize, false).expect("writing to a Vec cannot fail");
    String::from_utf8(out).expect("renderer output must be valid UTF-8")
}

/// Renders `doc` to an output stream, indenting nested dicts.
pub fn to_writer<W: io::Write>(out: W, doc: &Doc, visualize: bool) -> io::Result<()> {
    render(out, doc, visualize, true)
}

/// Depth-first traversal with an explicit frame stack and a matching stack
/// of closing brackets, so nesting depth never touches the call stack.
///
/// Closing brackets are written lazily: when a leaf turns out to be the last
/// entry of one or more containers, the loop drains closers until it is back
/// at the level of the next pending frame.
fn render<W: io::Write>(out: W, doc: &Doc, visualize: bool, indented: bool) -> io::Result<()> {
    let mut w = Writer::new(out, visualize);
    let mut frames: SmallVec<[Frame; 16]> = SmallVec::new();
    let mut closers: SmallVec<[u8; 16]> = SmallVec::new();
    frames.push(Frame {
        doc,
        key: None,
        lvl: 0,
    });

    while let Some(frame) = frames.pop() {
        let mut lvl = frame.lvl;
        let in_dict = frame.key.is_some();
        if let Some(key) = frame.key {
            w.key(key)?;
        }
        match frame.doc {
            Doc::Dict(map) if !map.is_empty() => {
                w.raw("{\n")?;
                if indented {
                    w.indent(lvl + 1)?;
                }
                closers.push(b'}');
                // Reversed so the first entry is popped first.
                for (key, value) in map.iter().rev() {
                    frames.push(Frame {
                        doc: value,
                        key: Some(key.as_str()),
                        lvl: lvl + 1,
                    });
                }
            }
            Doc::Arr(arr) if !arr.is_empty() => {
                w.byte(b'[')?;
                closers.push(b']');
                for item in arr.iter().rev() {
                    frames.push(Frame {
                        doc: item,
                        key: None,
                        lvl: lvl + 1,
                    });
                }
            }
            Doc::Tuple(tuple) if !tuple.is_empty() => {
                let (open, close) = if visualize { (b'(', b')') } else { (b'[', b']') };
                w.byte(open)?;
                closers.push(close);
                for item in tuple.iter().rev() {
                    frames.push(Frame {
                        doc: item,
                        key: None,
                        lvl: lvl + 1,
                    });
                }
            }
            leaf => {
                match leaf {
                    Doc::Dict(_) => w.empty_dict()?,
                    Doc::Arr(_) => w.empty_seq(false)?,
                    Doc::Tuple(_) => w.empty_seq(true)?,
                    primitive => w.leaf(primitive)?,
                }
                match frames.last() {
                    None => {
                        while let Some(closer) = closers.pop() {
                            if indented {
                                lvl -= 1;
                                if closer == b'}' {
                                    w.newline()?;
                                    w.indent(lvl)?;
                                }
                                w.byte(closer)?;
                            } else {
                                if closer == b'}' {
                                    w.newline()?;
                                }
                                w.byte(closer)?;
                            }
                        }
                    }
                    Some(next) => {
                        let down_lvl = next.lvl;
                        if lvl == down_lvl {
                            w.raw(", ")?;
                            if in_dict {
                                w.newline()?;
                                if indented {
                                    w.indent(lvl)?;
                                }
                            }
                        }
                        while lvl > down_lvl {
                            let Some(closer) = closers.pop() else { break };
                            if indented {
                                lvl -= 1;
                                if closer == b'}' {
                                    w.newline()?;
                                    w.indent(lvl)?;
                                }
                                w.byte(closer)?;
                            } else {
                                if closer == b'}' {
                                    w.newline()?;
                                }
                                w.byte(closer)?;
                                lvl -= 1;
                            }
                            if lvl == down_lvl {
                                w.raw(",\n")?;
                                if indented {
                                    w.indent(lvl)?;
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
