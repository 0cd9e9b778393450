use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::node::{Bracket, Node, NodeKind};
use crate::error::{Error, Result, Warning};
use crate::storage::GrowArray;

lazy_static! {
    // The pattern set is immutable for the process; it is compiled once
    // here and reused for every line.
    static ref SPACE: Regex = Regex::new(r"^\s+").unwrap();
    static ref COMMENT: Regex = Regex::new(r"^;.*").unwrap();
    static ref NIL_BOOL: Regex = Regex::new(r"^(nil|true|false)").unwrap();
    static ref FLOAT: Regex = Regex::new(r"^([+-]*)([0-9]*\.[0-9]+)(d?)").unwrap();
    static ref BINARY: Regex = Regex::new(r"^([+-]*)0[bB]([01]+)(u?)(l?)").unwrap();
    static ref OCTAL: Regex = Regex::new(r"^([+-]*)0[oO]?([0-7]+)(u?)(l?)").unwrap();
    static ref HEX: Regex = Regex::new(r"^([+-]*)0[xX]([0-9a-fA-F]+)(u?)(l?)").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^([+-]*)([0-9]+)(u?)(l?)").unwrap();
    static ref NUMERIC_TAIL: Regex = Regex::new(r"^[a-zA-Z0-9_.]+").unwrap();
    static ref SYMBOL: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z_0-9!@#']*").unwrap();
    static ref BRACKET: Regex = Regex::new(r"^[\[\]()]").unwrap();
    static ref OPERATOR: Regex = Regex::new(r"^[\[\]+*=|/~()<>?!@#$%^&-]+").unwrap();
    static ref CHARACTER: Regex = Regex::new(r"^'(\\)?(.)'").unwrap();
    static ref STRING: Regex = Regex::new(r#"^"([^"\\]|\\.)*""#).unwrap();
}

/// Everything produced from scanning one line: the flat token sequence
/// (tree links all unset) and any non-fatal diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ScannedLine {
    /// Tokens in encounter order
    pub tokens: GrowArray<Node>,
    /// Non-fatal diagnostics, in encounter order
    pub warnings: GrowArray<Warning>,
}

/// Lexical scanner for one line of source text
///
/// Consumes the line left to right with zero backtracking across a
/// successful match. At each cursor position classification is
/// priority-ordered, first match wins: whitespace, `;` comment,
/// `nil`/`true`/`false`, float, binary, octal, hex, decimal, symbol,
/// single bracket, operator run, character literal, string literal.
pub struct Scanner<'a> {
    /// Source line (no embedded newline)
    line: &'a str,
    /// Byte offset of the cursor into `line`
    cursor: usize,
    /// Accumulated tokens
    tokens: GrowArray<Node>,
    /// Accumulated non-fatal diagnostics
    warnings: GrowArray<Warning>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over one line of source text
    pub fn new(line: &'a str) -> Self {
        Scanner {
            line,
            cursor: 0,
            tokens: GrowArray::new(),
            warnings: GrowArray::new(),
        }
    }

    /// Scans the whole line into a flat token sequence
    ///
    /// On a fatal error every token already produced for the line is
    /// discarded along with the scanner.
    pub fn scan_tokens(mut self) -> Result<ScannedLine> {
        while self.cursor < self.line.len() {
            self.scan_token()?;
        }
        Ok(ScannedLine {
            tokens: self.tokens,
            warnings: self.warnings,
        })
    }

    fn rest(&self) -> &'a str {
        &self.line[self.cursor..]
    }

    fn scan_token(&mut self) -> Result<()> {
        let rest = self.rest();

        if let Some(m) = SPACE.find(rest) {
            self.cursor += m.end();
            return Ok(());
        }
        if let Some(m) = COMMENT.find(rest) {
            self.cursor += m.end();
            return Ok(());
        }
        if let Some(m) = NIL_BOOL.find(rest) {
            // Leading character is enough to tell the three words apart.
            let kind = match &m.as_str()[..1] {
                "n" => NodeKind::Nil,
                "t" => NodeKind::Bool(true),
                _ => NodeKind::Bool(false),
            };
            self.emit(kind)?;
            self.cursor += m.end();
            return Ok(());
        }
        if let Some(caps) = FLOAT.captures(rest) {
            return self.float_literal(&caps);
        }
        if let Some(caps) = BINARY.captures(rest) {
            return self.integer_literal(&caps, 2);
        }
        if let Some(caps) = OCTAL.captures(rest) {
            return self.integer_literal(&caps, 8);
        }
        if let Some(caps) = HEX.captures(rest) {
            return self.integer_literal(&caps, 16);
        }
        if let Some(caps) = DECIMAL.captures(rest) {
            return self.integer_literal(&caps, 10);
        }
        if let Some(m) = SYMBOL.find(rest) {
            self.emit(NodeKind::Symbol(m.as_str().to_string()))?;
            self.cursor += m.end();
            return Ok(());
        }
        if let Some(m) = BRACKET.find(rest) {
            // The class matches exactly one of ( ) [ ].
            if let Some(c) = m.as_str().chars().next() {
                if let Some(kind) = NodeKind::bracket(c) {
                    self.emit(kind)?;
                }
            }
            self.cursor += m.end();
            return Ok(());
        }
        if let Some(m) = OPERATOR.find(rest) {
            self.emit(NodeKind::Symbol(m.as_str().to_string()))?;
            self.cursor += m.end();
            return Ok(());
        }
        if let Some(caps) = CHARACTER.captures(rest) {
            return self.char_literal(&caps);
        }
        if let Some(m) = STRING.find(rest) {
            return self.string_literal(m.as_str());
        }

        Err(Error::NoMatchingPattern {
            position: self.cursor,
            fragment: rest.to_string(),
        })
    }

    /// Alphanumeric/`_`/`.` characters directly after a numeric match are
    /// an illegal trailing suffix.
    fn check_numeric_tail(&self, matched: usize) -> Result<()> {
        if let Some(m) = NUMERIC_TAIL.find(&self.rest()[matched..]) {
            return Err(Error::InvalidNumericSuffix {
                fragment: format!("{}{}", &self.rest()[..matched], m.as_str()),
            });
        }
        Ok(())
    }

    fn float_literal(&mut self, caps: &Captures) -> Result<()> {
        let matched = caps[0].len();
        self.check_numeric_tail(matched)?;
        let sign = reduce_sign(&caps[1]);
        let value = accumulate_decimal(&caps[2]) * f64::from(sign);
        let kind = if caps[3].is_empty() {
            NodeKind::Double(value)
        } else {
            NodeKind::LongDouble(value)
        };
        self.emit(kind)?;
        self.cursor += matched;
        Ok(())
    }

    fn integer_literal(&mut self, caps: &Captures, base: u32) -> Result<()> {
        let matched = caps[0].len();
        self.check_numeric_tail(matched)?;

        let sign_prefix = &caps[1];
        let negative = reduce_sign(sign_prefix) < 0;
        let unsigned = !caps[3].is_empty();
        let wide = !caps[4].is_empty();

        if unsigned && !sign_prefix.is_empty() {
            let fragment = caps[0].to_string();
            tracing::warn!("unsigned number has prefixed sign: \"{}\"", fragment);
            self.warnings.push(Warning::UnsignedWithSign { fragment })?;
        }

        // Accumulated in the literal's base, wrapping like the machine
        // arithmetic it models; the sign is applied in the signed domain
        // before any unsigned cast.
        let magnitude = accumulate_integer(&caps[2], base);
        let value = if negative {
            (magnitude as i64).wrapping_neg()
        } else {
            magnitude as i64
        };
        let kind = match (unsigned, wide) {
            (true, true) => NodeKind::ULong(value as u64),
            (true, false) => NodeKind::UInt(value as u32),
            (false, true) => NodeKind::Long(value),
            (false, false) => NodeKind::Int(value as i32),
        };
        self.emit(kind)?;
        self.cursor += matched;
        Ok(())
    }

    fn char_literal(&mut self, caps: &Captures) -> Result<()> {
        let matched = caps[0].len();
        let c = caps[2].chars().next().unwrap_or('\0');
        let c = if caps.get(1).is_some() {
            decode_escape(c)
        } else {
            c
        };
        self.emit(NodeKind::Char(c))?;
        self.cursor += matched;
        Ok(())
    }

    /// A string is not a primitive node: it expands into an explicit `[`,
    /// one char node per decoded character, and a `]`.
    fn string_literal(&mut self, matched: &str) -> Result<()> {
        self.emit(NodeKind::Open(Bracket::Square))?;
        let inner = &matched[1..matched.len() - 1];
        let mut escape = false;
        for c in inner.chars() {
            if !escape && c == '\\' {
                escape = true;
                continue;
            }
            let decoded = if escape { decode_escape(c) } else { c };
            escape = false;
            self.emit(NodeKind::Char(decoded))?;
        }
        self.emit(NodeKind::Close(Bracket::Square))?;
        self.cursor += matched.len();
        Ok(())
    }

    fn emit(&mut self, kind: NodeKind) -> Result<()> {
        self.tokens.push(Node::new(kind))?;
        Ok(())
    }
}

/// Negative iff the count of `-` characters in the sign prefix is odd
fn reduce_sign(prefix: &str) -> i32 {
    if prefix.bytes().filter(|&b| b == b'-').count() % 2 == 1 {
        -1
    } else {
        1
    }
}

/// `value = value*base + digit`, wrapping, case-insensitive for hex
fn accumulate_integer(digits: &str, base: u32) -> u64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(base))
        .fold(0u64, |value, digit| {
            value
                .wrapping_mul(u64::from(base))
                .wrapping_add(u64::from(digit))
        })
}

/// Digit-by-digit decimal accumulation, dividing the running fractional
/// factor by ten after the decimal point
fn accumulate_decimal(digits: &str) -> f64 {
    let mut value = 0.0f64;
    let mut fact = 1.0f64;
    let mut after_point = false;
    for c in digits.chars() {
        if c == '.' {
            after_point = true;
            continue;
        }
        if let Some(digit) = c.to_digit(10) {
            if after_point {
                fact /= 10.0;
            }
            value = value * 10.0 + f64::from(digit);
        }
    }
    value * fact
}

fn decode_escape(c: char) -> char {
    match c {
        'a' => '\x07',
        'b' => '\x08',
        'e' => '\x1b',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(line: &str) -> ScannedLine {
        Scanner::new(line).scan_tokens().unwrap()
    }

    fn kinds(line: &str) -> Vec<NodeKind> {
        scan(line).tokens.iter().map(|n| n.kind.clone()).collect()
    }

    #[test]
    fn test_simple_sexpr() {
        let kinds = kinds("(+ 1 2)");
        assert_eq!(
            kinds,
            vec![
                NodeKind::Open(Bracket::Paren),
                NodeKind::Symbol("+".to_string()),
                NodeKind::Int(1),
                NodeKind::Int(2),
                NodeKind::Close(Bracket::Paren),
            ]
        );
    }

    #[test]
    fn test_whitespace_and_comment_emit_nothing() {
        assert!(kinds("   \t  ").is_empty());
        assert!(kinds("; the rest of the line (1 2 3)").is_empty());
        assert_eq!(kinds("7 ; trailing"), vec![NodeKind::Int(7)]);
    }

    #[test]
    fn test_nil_and_bool_literals() {
        assert_eq!(
            kinds("nil true false"),
            vec![NodeKind::Nil, NodeKind::Bool(true), NodeKind::Bool(false)]
        );
    }

    #[test]
    fn test_integer_suffixes() {
        assert_eq!(kinds("5"), vec![NodeKind::Int(5)]);
        assert_eq!(kinds("5u"), vec![NodeKind::UInt(5)]);
        assert_eq!(kinds("5l"), vec![NodeKind::Long(5)]);
        assert_eq!(kinds("5ul"), vec![NodeKind::ULong(5)]);
    }

    #[test]
    fn test_integer_bases() {
        assert_eq!(kinds("0b101"), vec![NodeKind::Int(5)]);
        assert_eq!(kinds("0o17"), vec![NodeKind::Int(15)]);
        assert_eq!(kinds("017"), vec![NodeKind::Int(15)]);
        assert_eq!(kinds("0x1A"), vec![NodeKind::Int(26)]);
        assert_eq!(kinds("0x1Au"), vec![NodeKind::UInt(26)]);
    }

    #[test]
    fn test_sign_accumulation() {
        assert_eq!(kinds("-5"), vec![NodeKind::Int(-5)]);
        assert_eq!(kinds("-+5"), vec![NodeKind::Int(-5)]);
        assert_eq!(kinds("--5"), vec![NodeKind::Int(5)]);
        assert_eq!(kinds("+-+-5"), vec![NodeKind::Int(5)]);
        assert_eq!(kinds("-1.5"), vec![NodeKind::Double(-1.5)]);
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(kinds("1.5"), vec![NodeKind::Double(1.5)]);
        assert_eq!(kinds(".25"), vec![NodeKind::Double(0.25)]);
        assert_eq!(kinds("1.5d"), vec![NodeKind::LongDouble(1.5)]);
    }

    #[test]
    fn test_unsigned_with_sign_warns_but_accepts() {
        let scanned = scan("-1u");
        assert_eq!(
            scanned.tokens.get(0).map(|n| n.kind.clone()),
            Some(NodeKind::UInt(u32::MAX))
        );
        assert_eq!(
            scanned.warnings.get(0),
            Some(&Warning::UnsignedWithSign {
                fragment: "-1u".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_numeric_suffix() {
        let err = Scanner::new("5uz").scan_tokens().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidNumericSuffix {
                fragment: "5uz".to_string()
            }
        );
        assert!(matches!(
            Scanner::new("1.").scan_tokens(),
            Err(Error::InvalidNumericSuffix { .. })
        ));
        assert!(matches!(
            Scanner::new("0b2").scan_tokens(),
            Err(Error::InvalidNumericSuffix { .. })
        ));
    }

    #[test]
    fn test_symbols_and_operators() {
        assert_eq!(
            kinds("let x'"),
            vec![
                NodeKind::Symbol("let".to_string()),
                NodeKind::Symbol("x'".to_string()),
            ]
        );
        assert_eq!(kinds("<=>"), vec![NodeKind::Symbol("<=>".to_string())]);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(kinds("'x'"), vec![NodeKind::Char('x')]);
        assert_eq!(kinds(r"'\n'"), vec![NodeKind::Char('\n')]);
        assert_eq!(kinds(r"'\e'"), vec![NodeKind::Char('\x1b')]);
        assert_eq!(kinds(r"'\\'"), vec![NodeKind::Char('\\')]);
        assert_eq!(kinds(r"'\''"), vec![NodeKind::Char('\'')]);
    }

    #[test]
    fn test_string_expands_to_char_vector() {
        assert_eq!(
            kinds(r#""ab""#),
            vec![
                NodeKind::Open(Bracket::Square),
                NodeKind::Char('a'),
                NodeKind::Char('b'),
                NodeKind::Close(Bracket::Square),
            ]
        );
        assert_eq!(
            kinds(r#""a\nb""#),
            vec![
                NodeKind::Open(Bracket::Square),
                NodeKind::Char('a'),
                NodeKind::Char('\n'),
                NodeKind::Char('b'),
                NodeKind::Close(Bracket::Square),
            ]
        );
        assert_eq!(
            kinds(r#""""#),
            vec![
                NodeKind::Open(Bracket::Square),
                NodeKind::Close(Bracket::Square),
            ]
        );
    }

    #[test]
    fn test_no_matching_pattern() {
        let err = Scanner::new("(a , b)").scan_tokens().unwrap_err();
        match err {
            Error::NoMatchingPattern { position, fragment } => {
                assert_eq!(position, 3);
                assert_eq!(fragment, ", b)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_brackets() {
        assert_eq!(
            kinds("([])"),
            vec![
                NodeKind::Open(Bracket::Paren),
                NodeKind::Open(Bracket::Square),
                NodeKind::Close(Bracket::Square),
                NodeKind::Close(Bracket::Paren),
            ]
        );
    }
}
