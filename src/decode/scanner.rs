use memchr::memchr;

use crate::constants::{INT_WIDEN_DIGITS, LONG_WIDEN_DIGITS};
use crate::types::Doc;

/// Whitespace and control bytes skipped by the parser.
pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0)
}

/// Scans one primitive value starting at `pos`, leaving `pos` on the byte
/// after the literal.
///
/// Recognizes, in priority order: quoted strings (terminated by the next
/// quote, no escape decoding), `true`/`false`, `null`, and numeric
/// literals. A token that fits none of these is skipped up to the next
/// `,`, the `closing` delimiter, or end of input, and becomes null —
/// callers must tolerate silently-nulled malformed tokens.
pub(crate) fn scan_primitive(bytes: &[u8], pos: &mut usize, closing: u8) -> Doc {
    if *pos < bytes.len() {
        match bytes[*pos] {
            b'"' => {
                let start = *pos + 1;
                if let Some(rel) = memchr(b'"', &bytes[start..]) {
                    *pos = start + rel + 1;
                    return Doc::Str(String::from_utf8_lossy(&bytes[start..start + rel]).into_owned());
                }
                // Unterminated string: degrade like any other bad token.
            }
            b't' if bytes[*pos..].starts_with(b"true") => {
                *pos += 4;
                return Doc::Bool(true);
            }
            b'f' if bytes[*pos..].starts_with(b"false") => {
                *pos += 5;
                return Doc::Bool(false);
            }
            b'n' if bytes[*pos..].starts_with(b"null") => {
                *pos += 4;
                return Doc::Null;
            }
            b'+' | b'-' | b'.' | b'0'..=b'9' => {
                if let Some(doc) = scan_number(bytes, pos, closing) {
                    return doc;
                }
            }
            _ => {}
        }
    }
    skip_to_delimiter(bytes, pos, closing);
    Doc::Null
}

/// Numeric accumulator. Starts as a 32-bit integer; widens irreversibly to
/// 64-bit after 9 digits and to floating after 16 digits or on `.`/`e`/`E`.
enum Acc {
    Int(i32),
    Long(i64),
    Dec(f64),
}

impl Acc {
    fn to_dec(&self) -> f64 {
        match self {
            Acc::Int(v) => f64::from(*v),
            Acc::Long(v) => *v as f64,
            Acc::Dec(v) => *v,
        }
    }
}

fn scan_number(bytes: &[u8], pos: &mut usize, closing: u8) -> Option<Doc> {
    let n = bytes.len();
    let mut p = *pos;

    let mut positive = true;
    match bytes[p] {
        b'-' => {
            positive = false;
            p += 1;
        }
        b'+' => p += 1,
        _ => {}
    }

    let mut acc = Acc::Int(0);
    let mut has_point = false;
    let mut fraction_digits: i32 = 0;
    let mut digits = 0usize;

    if p < n && bytes[p] == b'.' {
        has_point = true;
        acc = Acc::Dec(0.0);
        p += 1;
    }

    while p < n {
        let byte = bytes[p];
        if byte == b'.' {
            if has_point {
                // Second decimal point: malformed, let the caller null it.
                return None;
            }
            has_point = true;
            acc = Acc::Dec(acc.to_dec());
            p += 1;
            continue;
        }
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = i32::from(byte - b'0');
        acc = match acc {
            Acc::Int(v) => Acc::Int(v * 10 + digit),
            Acc::Long(v) => Acc::Long(v * 10 + i64::from(digit)),
            Acc::Dec(v) => Acc::Dec(v * 10.0 + f64::from(digit)),
        };
        digits += 1;
        if digits == INT_WIDEN_DIGITS {
            if let Acc::Int(v) = acc {
                acc = Acc::Long(i64::from(v));
            }
        }
        if digits == LONG_WIDEN_DIGITS {
            if let Acc::Long(v) = acc {
                acc = Acc::Dec(v as f64);
            }
        }
        if has_point {
            fraction_digits += 1;
        }
        p += 1;
    }

    if has_point {
        if let Acc::Dec(v) = acc {
            acc = Acc::Dec(v * 10f64.powi(-fraction_digits));
        }
    }

    if p < n && (bytes[p] == b'e' || bytes[p] == b'E') {
        let mut value = acc.to_dec();
        p += 1;
        let mut exp_positive = true;
        if p < n && (bytes[p] == b'+' || bytes[p] == b'-') {
            exp_positive = bytes[p] == b'+';
            p += 1;
        }
        let mut exponent: i32 = 0;
        while p < n && bytes[p].is_ascii_digit() {
            exponent = exponent.saturating_mul(10) + i32::from(bytes[p] - b'0');
            p += 1;
        }
        value *= 10f64.powi(if exp_positive { exponent } else { -exponent });
        acc = Acc::Dec(value);
    }

    let terminated = p == n || is_space(bytes[p]) || bytes[p] == b',' || bytes[p] == closing;
    if !terminated {
        return None;
    }

    *pos = p;
    Some(match acc {
        Acc::Int(v) => Doc::Int(if positive { v } else { -v }),
        Acc::Long(v) => Doc::LLong(if positive { v } else { -v }),
        Acc::Dec(v) => Doc::Double(if positive { v } else { -v }),
    })
}

/// Skips a malformed token up to the next `,`, the closing delimiter, or
/// end of input.
fn skip_to_delimiter(bytes: &[u8], pos: &mut usize, closing: u8) {
    while *pos < bytes.len() {
        let byte = bytes[*pos];
        if byte == b',' || byte == closing || byte == 0 {
            break;
        }
        *pos += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str, closing: u8) -> (Doc, usize) {
        let mut pos = 0;
        let doc = scan_primitive(input.as_bytes(), &mut pos, closing);
        (doc, pos)
    }

    #[rstest::rstest]
    fn test_string_literal() {
        let (doc, pos) = scan("\"hello\" rest", b']');
        assert_eq!(doc, Doc::Str("hello".to_string()));
        assert_eq!(pos, 7);
    }

    #[rstest::rstest]
    fn test_unterminated_string_becomes_null() {
        let (doc, pos) = scan("\"oops, no end", b']');
        assert_eq!(doc, Doc::Null);
        // Skipped up to the comma inside the broken literal.
        assert_eq!(pos, 5);
    }

    #[rstest::rstest]
    #[case("true", Doc::Bool(true))]
    #[case("false", Doc::Bool(false))]
    #[case("null", Doc::Null)]
    fn test_keywords(#[case] input: &str, #[case] expected: Doc) {
        let (doc, _) = scan(input, b']');
        assert_eq!(doc, expected);
    }

    #[rstest::rstest]
    #[case("0", Doc::Int(0))]
    #[case("42", Doc::Int(42))]
    #[case("-7", Doc::Int(-7))]
    #[case("+12", Doc::Int(12))]
    #[case("12345678", Doc::Int(12_345_678))]
    fn test_int_literals(#[case] input: &str, #[case] expected: Doc) {
        let (doc, _) = scan(input, b']');
        assert_eq!(doc, expected);
    }

    #[rstest::rstest]
    fn test_widening_to_long_at_nine_digits() {
        let (doc, _) = scan("123456789", b']');
        assert_eq!(doc, Doc::LLong(123_456_789));

        let (doc, _) = scan("-1234567890123", b']');
        assert_eq!(doc, Doc::LLong(-1_234_567_890_123));
    }

    #[rstest::rstest]
    fn test_widening_to_double_on_long_digit_runs() {
        let (doc, _) = scan("12345678901234567", b']');
        assert_eq!(doc, Doc::Double(12_345_678_901_234_567f64));
    }

    #[rstest::rstest]
    #[case("3.14", 3.14)]
    #[case("1e3", 1000.0)]
    #[case("2.5e-2", 0.025)]
    #[case(".5", 0.5)]
    #[case("-1.5E2", -150.0)]
    fn test_point_and_exponent_widen(#[case] input: &str, #[case] expected: f64) {
        let (doc, _) = scan(input, b']');
        let value = doc.as_double().unwrap();
        assert!((value - expected).abs() < 1e-9, "{input} scanned as {value}");
    }

    #[rstest::rstest]
    fn test_literal_stops_at_closing_delimiter() {
        let (doc, pos) = scan("12}", b'}');
        assert_eq!(doc, Doc::Int(12));
        assert_eq!(pos, 2);

        let (doc, pos) = scan("12]", b']');
        assert_eq!(doc, Doc::Int(12));
        assert_eq!(pos, 2);
    }

    #[rstest::rstest]
    #[case("tru}", b'}')]
    #[case("12abc,", b']')]
    #[case("1.2.3,", b']')]
    #[case("nul,", b']')]
    fn test_malformed_tokens_null_and_skip(#[case] input: &str, #[case] closing: u8) {
        let mut pos = 0;
        let doc = scan_primitive(input.as_bytes(), &mut pos, closing);
        assert_eq!(doc, Doc::Null);
        let stop = input.as_bytes()[pos];
        assert!(stop == b',' || stop == closing);
    }
}
