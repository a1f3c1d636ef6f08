//! Section extraction from a completed snapshot.
//!
//! A single-purpose scanner, independent of the completer's stacks, walks the
//! snapshot to find each top-level `{...}` object; each object is then parsed
//! with an ordinary (non-streaming) JSON parser and its top-level keys become
//! sections in source order. The scan is O(snapshot size) and runs from
//! scratch on every call; one turn's text is small enough that memoization
//! would buy nothing.

use serde_json::Value;

/// Name of the catch-all section produced when the snapshot unexpectedly
/// fails to parse.
pub(crate) const FALLBACK_SECTION: &str = "raw";

/// One top-level key/value pair of the best-effort-complete document,
/// exposed as an independently renderable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// The top-level key.
    pub name: String,
    /// String values verbatim; any other value as serialized JSON.
    pub content: String,
}

/// Slice out every top-level `{...}` object.
///
/// Depth counts both braces and brackets so that objects nested inside a
/// root-level array are not mistaken for roots. String and escape state is
/// tracked so braces inside string content are inert.
pub(crate) fn scan_root_objects(text: &str) -> Vec<&str> {
    let mut objects = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' | '[' => {
                if depth == 0 && ch == '{' {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(s) = start.take() {
                        objects.push(&text[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }
    objects
}

/// Parse the snapshot into ordered sections.
///
/// Returns `None` when any root object fails to parse. Unreachable while the
/// completer invariant holds; the caller degrades to a raw-text section
/// rather than surfacing an error.
pub(crate) fn parse_sections(snapshot: &str) -> Option<Vec<Section>> {
    let mut sections = Vec::new();
    for object in scan_root_objects(snapshot) {
        let map: serde_json::Map<String, Value> = serde_json::from_str(object).ok()?;
        for (name, value) in map {
            let content = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            sections.push(Section { name, content });
        }
    }
    Some(sections)
}
