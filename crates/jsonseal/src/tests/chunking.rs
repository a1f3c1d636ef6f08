//! Fragmentation must be invisible: any chunking of a document yields valid
//! snapshots throughout and the same parse at the end.

use rstest::rstest;
use serde_json::Value;

use super::support::chunks_of;
use crate::StreamingCompleter;

const DOCUMENT: &str = concat!(
    "{\"response\":\"I looked this up.\\nHere is a summary \\u2014 enjoy! 😀\",",
    "\"action_json\":{\"tool_name\":\"search\",\"args\":{\"q\":\"streaming json\"}},",
    "\"flags\":[true,false,null],",
    "\"scores\":[-1.5,0.25,12,-0.125]}"
);

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(7)]
#[case(13)]
#[case(31)]
#[case(200)]
fn every_chunking_converges(#[case] parts: usize) {
    let expected: Value = serde_json::from_str(DOCUMENT).unwrap();

    let mut completer = StreamingCompleter::default();
    for chunk in chunks_of(DOCUMENT, parts) {
        completer.process_fragment(chunk).unwrap();
        let snapshot = completer.completed_json();
        serde_json::from_str::<Value>(&snapshot)
            .unwrap_or_else(|e| panic!("invalid snapshot {snapshot:?}: {e}"));
    }
    let parsed: Value = serde_json::from_str(&completer.completed_json()).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn final_snapshot_is_chunking_independent() {
    let mut whole = StreamingCompleter::default();
    whole.process_fragment(DOCUMENT).unwrap();

    for parts in [2, 5, 31, 200] {
        let mut pieced = StreamingCompleter::default();
        for chunk in chunks_of(DOCUMENT, parts) {
            pieced.process_fragment(chunk).unwrap();
        }
        assert_eq!(pieced.completed_json(), whole.completed_json());
        assert_eq!(pieced.completed_sections(), whole.completed_sections());
    }
}

#[test]
fn every_character_boundary_yields_a_valid_snapshot() {
    let mut completer = StreamingCompleter::default();
    let mut buf = [0u8; 4];
    for ch in DOCUMENT.chars() {
        completer.process_fragment(ch.encode_utf8(&mut buf)).unwrap();
        let snapshot = completer.completed_json();
        serde_json::from_str::<Value>(&snapshot)
            .unwrap_or_else(|e| panic!("invalid snapshot {snapshot:?}: {e}"));
    }
}
