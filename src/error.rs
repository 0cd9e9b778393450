//! Error types for the Canopy reader

use thiserror::Error;

use crate::lexer::Bracket;

/// Canopy reader errors
///
/// Every variant is fatal for the line being read: the caller discards all
/// partial state (token arena, half-linked forest) and surfaces the error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexer errors
    /// No lexical pattern matches at the cursor
    ///
    /// **Triggered by:** input that starts with a character no pattern
    /// class accepts, e.g. a stray `"` closing quote or a control byte.
    /// The fragment is the unconsumed remainder of the line.
    #[error("no pattern matches input at offset {position}: \u{201c}{fragment}\u{201d}")]
    NoMatchingPattern {
        /// Byte offset into the line where classification failed
        position: usize,
        /// Unconsumed remainder of the line
        fragment: String,
    },

    /// Numeric literal followed by an illegal trailing run
    ///
    /// **Triggered by:** alphanumeric, `_`, or `.` characters directly
    /// after a matched number, e.g. `5uz` or `1.`.
    #[error("invalid suffix for number: \"{fragment}\"")]
    InvalidNumericSuffix {
        /// The numeric match together with its offending tail
        fragment: String,
    },

    // Forest errors
    /// Closing bracket with no matching opener
    ///
    /// `expected` is `None` when no bracket was open at all, otherwise the
    /// family of the bracket that was actually open.
    #[error("unmatched closing '{}', expected {}", .found.close_char(), expected_close(.expected))]
    UnmatchedClose {
        /// Family of the innermost open bracket, if any
        expected: Option<Bracket>,
        /// Family of the closer that was found
        found: Bracket,
    },

    /// Opening bracket never closed by end of line
    #[error("unmatched opening '{}'", .kind.open_char())]
    UnmatchedOpen {
        /// Family of the innermost unclosed bracket
        kind: Bracket,
    },

    // Storage errors
    /// Buffer growth failed
    ///
    /// The array is left at its last good capacity and the mutating call
    /// has no effect.
    #[error("allocation failed growing storage to {requested} slots")]
    AllocationFailed {
        /// Capacity that could not be reserved
        requested: usize,
    },

    /// Insertion index past the end of the array
    #[error("index {index} out of bounds for insert into array of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Array length at the time of the call
        len: usize,
    },
}

/// Non-fatal diagnostics produced while scanning a line
///
/// Warnings accompany a successful token stream; the line is still read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    /// Unsigned literal carrying an explicit sign prefix
    ///
    /// The literal is still produced, with the sign applied before the
    /// unsigned cast.
    #[error("unsigned number has prefixed sign: \"{fragment}\"")]
    UnsignedWithSign {
        /// The full matched literal, sign and suffixes included
        fragment: String,
    },
}

fn expected_close(expected: &Option<Bracket>) -> String {
    match expected {
        Some(b) => format!("'{}'", b.close_char()),
        None => String::from("no open bracket"),
    }
}

/// Result type for Canopy operations
pub type Result<T> = std::result::Result<T, Error>;
