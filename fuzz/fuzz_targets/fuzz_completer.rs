#![no_main]
use arbitrary::Arbitrary;
use jsonseal::{CompleterOptions, StreamingCompleter};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    split_seed: u64,
    text: String,
}

/// Split a `&str` into boundary-safe chunks using a deterministic seed.
///
/// * Each chunk is at least one byte.
/// * Every slice ends on a valid UTF-8 boundary, so it can't panic.
fn split_into_safe_chunks(text: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = text.len();

    while start < len {
        let remaining = len - start;
        let mut size = (split_seed as usize % remaining) + 1;
        while start + size < len && !text.is_char_boundary(start + size) {
            size += 1;
        }
        chunks.push(&text[start..start + size]);
        start += size;
    }

    chunks
}

/// Heuristic: the input may exercise exponent notation or an explicit plus,
/// which the completer's narrowed number grammar rejects by design. The
/// strict all-snapshots-valid assertion only applies outside that territory.
fn uses_narrowed_number_syntax(text: &str) -> bool {
    text.bytes().any(|b| matches!(b, b'e' | b'E' | b'+'))
}

fuzz_target!(|input: FuzzInput| {
    if input.text.is_empty() {
        return;
    }

    // The producer-contract property: when the whole input is one
    // well-formed JSON document, every fragment must be accepted and every
    // snapshot must parse.
    let strict = serde_json::from_str::<Value>(&input.text).is_ok()
        && !uses_narrowed_number_syntax(&input.text);

    let mut completer = StreamingCompleter::new(CompleterOptions::default());
    for chunk in split_into_safe_chunks(&input.text, input.split_seed) {
        let accepted = completer.process_fragment(chunk).is_ok();
        if strict {
            assert!(accepted, "rejected a fragment of well-formed JSON");
            let snapshot = completer.completed_json();
            if !snapshot.is_empty() {
                serde_json::from_str::<Value>(&snapshot)
                    .unwrap_or_else(|e| panic!("invalid snapshot {snapshot:?}: {e}"));
            }
        }
        // Extraction must never panic, whatever state we are in.
        let _ = completer.completed_sections();
        if !accepted {
            break;
        }
    }
    let _ = completer.completed_sections();
});
