use std::io::{self, Write};

use crate::constants::{
    DEFAULT_INDENT, DOUBLE_SCI_PRECISION, FLOAT_SCI_PRECISION, LDOUBLE_SCI_PRECISION,
};
use crate::types::Doc;

/// Low-level output sink for the renderer. Owns the mode flag and the
/// per-kind leaf formatting; the traversal in [`super`] owns structure.
pub(crate) struct Writer<W> {
    out: W,
    visualize: bool,
    indent_cache: Vec<String>,
}

impl<W: io::Write> Writer<W> {
    pub fn new(out: W, visualize: bool) -> Self {
        Self {
            out,
            visualize,
            indent_cache: vec![String::new()],
        }
    }

    pub fn raw(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }

    pub fn byte(&mut self, byte: u8) -> io::Result<()> {
        self.out.write_all(&[byte])
    }

    pub fn newline(&mut self) -> io::Result<()> {
        self.byte(b'\n')
    }

    pub fn indent(&mut self, depth: usize) -> io::Result<()> {
        if depth == 0 {
            return Ok(());
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.out.write_all(self.indent_cache[depth].as_bytes())
    }

    /// `"key": ` prefix of a dict entry.
    pub fn key(&mut self, key: &str) -> io::Result<()> {
        self.byte(b'"')?;
        self.raw(key)?;
        self.raw("\": ")
    }

    /// A primitive document. Containers never reach here; the traversal
    /// routes non-empty ones through its own frames and empty ones through
    /// [`Writer::empty_dict`] and [`Writer::empty_seq`].
    pub fn leaf(&mut self, doc: &Doc) -> io::Result<()> {
        match doc {
            Doc::Null => self.raw(if self.visualize { "NullPtr" } else { "null" }),
            Doc::Char(value) => {
                if self.visualize {
                    let mut buf = [0u8; 4];
                    self.byte(b'\'')?;
                    self.raw((*value as u8 as char).encode_utf8(&mut buf))?;
                    self.byte(b'\'')
                } else {
                    self.integer(i64::from(*value))
                }
            }
            Doc::Int(value) => self.integer(i64::from(*value)),
            Doc::LLong(value) => self.integer(*value),
            Doc::Float(value) => {
                if self.visualize {
                    write!(self.out, "{:.*e}", FLOAT_SCI_PRECISION, value)
                } else if value.is_finite() {
                    let mut buf = ryu::Buffer::new();
                    self.out.write_all(buf.format(*value).as_bytes())
                } else {
                    self.raw("null")
                }
            }
            Doc::Double(value) => self.double(*value, DOUBLE_SCI_PRECISION),
            Doc::LDouble(value) => self.double(*value, LDOUBLE_SCI_PRECISION),
            Doc::Bool(value) => self.raw(match (self.visualize, *value) {
                (true, true) => "True",
                (true, false) => "False",
                (false, true) => "true",
                (false, false) => "false",
            }),
            Doc::Str(value) => self.quoted(value),
            Doc::Tuple(_) | Doc::Arr(_) | Doc::Dict(_) => Ok(()),
        }
    }

    pub fn empty_dict(&mut self) -> io::Result<()> {
        self.raw(if self.visualize { "{Null}" } else { "{}" })
    }

    pub fn empty_seq(&mut self, tuple: bool) -> io::Result<()> {
        self.raw(match (self.visualize, tuple) {
            (true, true) => "(Null)",
            (true, false) => "[Null]",
            (false, _) => "[]",
        })
    }

    fn integer(&mut self, value: i64) -> io::Result<()> {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(value);
        if self.visualize {
            self.grouped(digits)
        } else {
            self.out.write_all(digits.as_bytes())
        }
    }

    /// Digit grouping for readability: `1234567` becomes `1_234_567`.
    fn grouped(&mut self, digits: &str) -> io::Result<()> {
        let (sign, body) = match digits.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", digits),
        };
        self.raw(sign)?;
        let lead = match body.len() % 3 {
            0 => 3.min(body.len()),
            rem => rem,
        };
        self.raw(&body[..lead])?;
        let mut pos = lead;
        while pos < body.len() {
            self.byte(b'_')?;
            self.raw(&body[pos..pos + 3])?;
            pos += 3;
        }
        Ok(())
    }

    fn double(&mut self, value: f64, precision: usize) -> io::Result<()> {
        if self.visualize {
            write!(self.out, "{:.*e}", precision, value)
        } else if value.is_finite() {
            let mut buf = ryu::Buffer::new();
            self.out.write_all(buf.format(value).as_bytes())
        } else {
            self.raw("null")
        }
    }

    /// Strings are quoted verbatim; embedded quotes are demoted to
    /// apostrophes so the output stays parseable.
    fn quoted(&mut self, value: &str) -> io::Result<()> {
        self.byte(b'"')?;
        if value.contains('"') {
            self.raw(&value.replace('"', "'"))?;
        } else {
            self.raw(value)?;
        }
        self.byte(b'"')
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(prev) => {
                    let mut s = String::with_capacity(prev.len() + DEFAULT_INDENT);
                    s.push_str(prev);
                    s.push_str(&" ".repeat(DEFAULT_INDENT));
                    s
                }
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }
}
