//! Lexical analysis for parsed units.
//!
//! Converts source text into a stream of tokens using an ordered table
//! of regex patterns. Newlines are significant (they separate top-level
//! statements) and are emitted as tokens; other whitespace is skipped.
//! Any text no pattern matches fails with a positioned ParsingFailed.

pub mod lexer;
pub mod tokens;
