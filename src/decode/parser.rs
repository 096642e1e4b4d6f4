use memchr::memchr;
use smallvec::SmallVec;

use crate::decode::progress::Progress;
use crate::decode::scanner::{is_space, scan_primitive};
use crate::decode::ParseOutcome;
use crate::error::Error;
use crate::types::{Arr, Dict, Doc};

/// One open container during parsing.
struct Frame {
    scope: Scope,
    /// Key this container hangs under in its parent dict, recorded when the
    /// frame is opened and consumed when it closes.
    key: Option<String>,
}

enum Scope {
    Dict(Dict),
    Arr(Arr),
}

impl Scope {
    fn into_doc(self) -> Doc {
        match self {
            Scope::Dict(map) => Doc::Dict(map),
            Scope::Arr(arr) => Doc::Arr(arr),
        }
    }
}

/// Iterative parser: nesting depth is bounded by memory, not the call
/// stack. Always terminates and always yields a document; structural
/// problems surface as a diagnostic next to the (possibly partial) tree.
pub(crate) struct Parser<'a> {
    bytes: &'a [u8],
    cursor: usize,
    stack: SmallVec<[Frame; 16]>,
    progress: Option<&'a Progress>,
    diagnostic: Option<Error>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, progress: Option<&'a Progress>) -> Self {
        Self {
            bytes: input.as_bytes(),
            cursor: 0,
            stack: SmallVec::new(),
            progress,
            diagnostic: None,
        }
    }

    pub fn parse(mut self) -> ParseOutcome {
        let n = self.bytes.len();
        if let Some(progress) = self.progress {
            progress.begin(n);
        }

        let mut start = 0;
        let mut end = n;
        while start < end && is_space(self.bytes[start]) {
            start += 1;
        }
        while end > start && is_space(self.bytes[end - 1]) {
            end -= 1;
        }
        if start >= end {
            return self.fail("empty input");
        }

        let first = self.bytes[start];
        let last = self.bytes[end - 1];
        match (first, last) {
            (b'{', b'}') => {
                self.cursor = start + 1;
                self.stack.push(Frame {
                    scope: Scope::Dict(Dict::new()),
                    key: None,
                });
            }
            (b'[', b']') => {
                self.cursor = start + 1;
                self.stack.push(Frame {
                    scope: Scope::Arr(Arr::new()),
                    key: None,
                });
            }
            _ if first != b'{' && first != b'[' && last != b'}' && last != b']' => {
                self.cursor = start;
                let doc = scan_primitive(self.bytes, &mut self.cursor, b']');
                self.finish_progress();
                return ParseOutcome {
                    doc,
                    diagnostic: None,
                };
            }
            _ => return self.fail("unbalanced top-level brackets"),
        }

        while self.cursor < n {
            if let Some(progress) = self.progress {
                progress.advance_to(self.cursor);
            }
            let byte = self.bytes[self.cursor];
            if is_space(byte) || byte == b',' {
                self.cursor += 1;
                continue;
            }
            if byte == b'}' || byte == b']' {
                self.cursor += 1;
                if let Some(frame) = self.stack.pop() {
                    if let Some(doc) = self.attach(frame) {
                        self.finish_progress();
                        return ParseOutcome {
                            doc,
                            diagnostic: self.diagnostic,
                        };
                    }
                }
                continue;
            }
            let top_is_dict = matches!(
                self.stack.last(),
                Some(Frame {
                    scope: Scope::Dict(_),
                    ..
                })
            );
            if top_is_dict {
                self.step_dict();
            } else {
                self.step_arr();
            }
        }

        // Input exhausted with frames still open: unwind into a partial tree.
        if self.diagnostic.is_none() {
            self.diagnostic = Some(Error::malformed("unterminated container"));
        }
        let mut doc = Doc::Null;
        while let Some(frame) = self.stack.pop() {
            if let Some(root) = self.attach(frame) {
                doc = root;
            }
        }
        self.finish_progress();
        ParseOutcome {
            doc,
            diagnostic: self.diagnostic,
        }
    }

    /// Closes a frame: attaches its container to the parent frame, or
    /// returns it as the parse result when it was the root.
    fn attach(&mut self, frame: Frame) -> Option<Doc> {
        let doc = frame.scope.into_doc();
        match self.stack.last_mut() {
            None => Some(doc),
            Some(parent) => {
                match &mut parent.scope {
                    Scope::Dict(map) => {
                        map.insert(frame.key.unwrap_or_default(), doc);
                    }
                    Scope::Arr(arr) => arr.push(doc),
                }
                None
            }
        }
    }

    /// One step with a dict frame on top: extract the next key, then open a
    /// nested frame or upsert a primitive value.
    fn step_dict(&mut self) {
        let n = self.bytes.len();
        let Some(rel) = memchr(b':', &self.bytes[self.cursor..]) else {
            self.diagnostic = Some(Error::malformed("missing ':' after key"));
            self.cursor = n;
            return;
        };
        let colon = self.cursor + rel;
        let key = self.extract_key(self.cursor, colon);

        self.cursor = colon + 1;
        while self.cursor < n && is_space(self.bytes[self.cursor]) {
            self.cursor += 1;
        }
        if self.cursor >= n {
            self.diagnostic = Some(Error::malformed("missing value after ':'"));
            return;
        }

        match self.bytes[self.cursor] {
            b'{' => {
                self.cursor += 1;
                self.stack.push(Frame {
                    scope: Scope::Dict(Dict::new()),
                    key: Some(key),
                });
            }
            b'[' => {
                self.cursor += 1;
                self.stack.push(Frame {
                    scope: Scope::Arr(Arr::new()),
                    key: Some(key),
                });
            }
            b'}' | b']' | b',' => {
                // No value between the colon and the delimiter. Null the key
                // and abandon the rest of the input, keeping the partial tree.
                self.upsert_into_top(key, Doc::Null);
                self.diagnostic = Some(Error::malformed("missing value before delimiter"));
                self.cursor = n;
            }
            _ => {
                let value = scan_primitive(self.bytes, &mut self.cursor, b'}');
                self.upsert_into_top(key, value);
            }
        }
    }

    /// One step with an array frame on top.
    fn step_arr(&mut self) {
        match self.bytes[self.cursor] {
            b'{' => {
                self.cursor += 1;
                self.stack.push(Frame {
                    scope: Scope::Dict(Dict::new()),
                    key: None,
                });
            }
            b'[' => {
                self.cursor += 1;
                self.stack.push(Frame {
                    scope: Scope::Arr(Arr::new()),
                    key: None,
                });
            }
            _ => {
                let value = scan_primitive(self.bytes, &mut self.cursor, b']');
                self.push_into_top(value);
            }
        }
    }

    /// Key text between `start` and the colon: surrounding quotes and
    /// whitespace trimmed, nothing decoded.
    fn extract_key(&self, start: usize, colon: usize) -> String {
        let bytes = self.bytes;
        let mut left = start;
        if bytes[left] == b'"' {
            left += 1;
        }
        let mut right = colon;
        while right > left && is_space(bytes[right - 1]) {
            right -= 1;
        }
        if right > left && bytes[right - 1] == b'"' {
            right -= 1;
        }
        String::from_utf8_lossy(&bytes[left..right]).into_owned()
    }

    fn upsert_into_top(&mut self, key: String, value: Doc) {
        if let Some(Frame {
            scope: Scope::Dict(map),
            ..
        }) = self.stack.last_mut()
        {
            map.insert(key, value);
        }
    }

    fn push_into_top(&mut self, value: Doc) {
        if let Some(Frame {
            scope: Scope::Arr(arr),
            ..
        }) = self.stack.last_mut()
        {
            arr.push(value);
        }
    }

    fn fail(&mut self, message: &str) -> ParseOutcome {
        self.finish_progress();
        ParseOutcome {
            doc: Doc::Null,
            diagnostic: Some(Error::malformed(message)),
        }
    }

    fn finish_progress(&self) {
        if let Some(progress) = self.progress {
            progress.advance_to(self.bytes.len());
        }
    }
}
