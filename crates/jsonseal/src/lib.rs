//! Streaming JSON completion.
//!
//! `jsonseal` turns an in-order stream of text fragments (a well-formed JSON
//! document truncated at arbitrary character boundaries) into a snapshot
//! that is valid JSON after every fragment, so named top-level sections can
//! be read long before the stream finishes. One pass, amortized O(1) per
//! character, no re-scanning: two small stacks carry all lexical state, and a
//! mirror of pending closing tokens is rendered into a suffix on demand.
//!
//! ```rust
//! use jsonseal::{CompleterOptions, StreamingCompleter};
//!
//! let mut completer = StreamingCompleter::new(CompleterOptions::default());
//!
//! completer.process_fragment("{\"response\":\"partial an")?;
//! assert_eq!(
//!     completer.completed_json(),
//!     "{\"response\":\"partial an\"}",
//! );
//!
//! completer.process_fragment("swer\",\"action_json\":{\"tool\":\"searc")?;
//! let sections = completer.completed_sections();
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].name, "response");
//! assert_eq!(sections[0].content, "partial answer");
//! assert_eq!(sections[1].content, "{\"tool\":\"searc\"}");
//! # Ok::<(), jsonseal::CompleterError>(())
//! ```
//!
//! Truncation mid-string, mid-escape, mid-number, or mid-keyword is absorbed
//! silently; input that no well-formed JSON prefix could contain fails fast
//! with the offending character, since the upstream producer is contractually
//! a truncating one, not a malformed one.

mod assembler;
mod completer;
mod error;
mod options;
mod predicates;
mod sections;
mod token;

#[cfg(test)]
mod tests;

pub use completer::StreamingCompleter;
pub use error::CompleterError;
pub use options::CompleterOptions;
pub use sections::Section;
pub use token::{Token, classify};
