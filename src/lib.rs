//! # Canopy - a symbolic-expression reader
//!
//! Canopy is the front end of a minimal symbolic-expression language: it
//! turns one line of source text into a **forest** of typed trees
//! representing nested lists/vectors of literals and symbols, ready for a
//! downstream evaluator.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy::{printer, ForestBuilder, Scanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Scan one line into a flat token sequence
//! let scanned = Scanner::new("(+ 1 2)").scan_tokens()?;
//!
//! // Link the tokens into a forest of trees
//! let forest = ForestBuilder::new(scanned.tokens).build()?;
//! assert_eq!(forest.root_count(), 1);
//!
//! // Render it back to text
//! assert_eq!(printer::render(&forest), "(+ 1 2)\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Canopy follows a classic reader pipeline:
//!
//! ```text
//! Source Line → Scanner → Tokens → ForestBuilder → Forest → Printer
//! ```
//!
//! ### Main Components
//!
//! - [`Scanner`] - classifies raw text into typed token nodes, priority
//!   ordered and first match wins, including numeric sign/base/suffix
//!   handling and escape decoding
//! - [`ForestBuilder`] - links the flat token sequence into
//!   first-child/next-sibling trees honoring bracket nesting
//! - [`Forest`] - an index-based node arena owning every tree
//! - [`GrowArray`] - the growable contiguous storage every stage uses
//! - [`printer`] - renders a forest back to source-like text
//!
//! ## Data Model
//!
//! A [`Node`] is a tagged value - `nil`, booleans, signed/unsigned
//! integers of two widths, floats of two advertised precisions, chars,
//! symbols, bracket markers - plus two optional tree links: `sibling`
//! (next node at the same nesting depth) and `child` (first node nested
//! directly inside a bracket-open node). A double-quoted string is not a
//! primitive: it scans into a `[` bracket, one char node per decoded
//! character, and a `]`.
//!
//! ## Error Handling
//!
//! Fatal problems (no matching pattern, bad numeric suffix, unbalanced
//! brackets, storage failure) surface as [`Error`] with enough context to
//! render a precise diagnostic; partial state for the line is discarded.
//! Non-fatal diagnostics (an unsigned literal with a sign prefix) come
//! back as [`Warning`]s alongside the token stream.

// Module declarations
/// Version of the Canopy reader
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod forest;
pub mod lexer;
pub mod printer;
pub mod storage;

// Re-export main types
pub use error::{Error, Result, Warning};
pub use forest::{Forest, ForestBuilder};
pub use lexer::{Bracket, Node, NodeId, NodeKind, ScannedLine, Scanner};
pub use storage::{GrowArray, DEFAULT_CAPACITY};
