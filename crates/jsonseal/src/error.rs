//! Completer errors.
//!
//! Truncation is never an error; these fire only when the stream contains a
//! character no well-formed JSON prefix could contain at that point, which is
//! a breach of the producer contract rather than a recoverable condition.

use thiserror::Error;

/// A grammar violation, identified by the offending character and its 1-based
/// line/column in the stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompleterError {
    /// The character fits no production of the grammar in the current context
    /// (e.g. a bare `:` at the root, a digit straight after `}`).
    #[error("unexpected character '{character}' at {line}:{column}")]
    UnexpectedCharacter {
        /// The character that could not be placed.
        character: char,
        /// 1-based line of the character.
        line: usize,
        /// 1-based column of the character.
        column: usize,
    },

    /// A backslash was followed by something other than
    /// `" \ / b f n r t u`.
    #[error("invalid escape character '{character}' at {line}:{column}")]
    InvalidEscape {
        /// The character following the backslash.
        character: char,
        /// 1-based line of the character.
        line: usize,
        /// 1-based column of the character.
        column: usize,
    },

    /// A `\u` escape contained a non-hexadecimal digit.
    #[error("invalid unicode escape digit '{character}' at {line}:{column}")]
    InvalidUnicodeEscape {
        /// The offending non-hex character.
        character: char,
        /// 1-based line of the character.
        line: usize,
        /// 1-based column of the character.
        column: usize,
    },

    /// A high-surrogate `\uXXXX` escape was not followed by a low-surrogate
    /// escape (or a low half arrived without a high half to pair with).
    #[error("unpaired surrogate escape at {line}:{column}")]
    UnpairedSurrogate {
        /// 1-based line where the pairing broke down.
        line: usize,
        /// 1-based column where the pairing broke down.
        column: usize,
    },
}
