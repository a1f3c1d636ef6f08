//! End-to-end: an assistant-style payload streamed fragment by fragment,
//! consumed through the public API only.

use jsonseal::{CompleterOptions, Section, StreamingCompleter};
use serde_json::Value;

const TURN: &str = concat!(
    "{\"thinking\":\"The user wants a search.\",",
    "\"response\":\"Let me look that up for you \\u2013 one moment.\",",
    "\"action_json\":{\"tool_name\":\"web_search\",",
    "\"arguments\":{\"query\":\"rust incremental json\",\"limit\":3}}}"
);

fn drip(completer: &mut StreamingCompleter, text: &str) {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        completer
            .process_fragment(ch.encode_utf8(&mut buf))
            .expect("well-formed stream");
        let snapshot = completer.completed_json();
        if !snapshot.is_empty() {
            serde_json::from_str::<Value>(&snapshot)
                .unwrap_or_else(|e| panic!("invalid snapshot {snapshot:?}: {e}"));
        }
    }
}

#[test]
fn sections_appear_while_streaming() {
    let mut completer = StreamingCompleter::new(CompleterOptions::default());

    // Halfway through the response string, both finished-enough sections are
    // already readable.
    let cut = TURN.find("one moment").unwrap();
    completer.process_fragment(&TURN[..cut]).unwrap();
    let sections = completer.completed_sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].name, "thinking");
    assert_eq!(sections[1].name, "response");
    assert!(sections[1].content.starts_with("Let me look that up"));

    completer.process_fragment(&TURN[cut..]).unwrap();
    let sections = completer.completed_sections();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[2].name, "action_json");
    let action: Value = serde_json::from_str(&sections[2].content).unwrap();
    assert_eq!(action["tool_name"], "web_search");
    assert_eq!(action["arguments"]["limit"], 3);
}

#[test]
fn character_drip_keeps_every_snapshot_valid() {
    let mut completer = StreamingCompleter::new(CompleterOptions::default());
    drip(&mut completer, TURN);
    assert_eq!(completer.completed_sections().len(), 3);
}

#[test]
fn allow_list_filters_while_permissive_reveals() {
    let mut filtered = StreamingCompleter::new(CompleterOptions {
        allowed_sections: Some(vec!["response".into(), "action_json".into()]),
        permissive: false,
    });
    drip(&mut filtered, TURN);
    let names: Vec<_> = filtered
        .completed_sections()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["response", "action_json"]);

    let mut permissive = StreamingCompleter::new(CompleterOptions {
        allowed_sections: Some(vec!["response".into()]),
        permissive: true,
    });
    drip(&mut permissive, TURN);
    assert_eq!(permissive.completed_sections().len(), 3);
}

#[test]
fn one_instance_serves_many_turns() {
    let mut completer = StreamingCompleter::new(CompleterOptions::default());

    drip(&mut completer, "{\"response\":\"first turn\"}");
    assert_eq!(
        completer.completed_sections(),
        vec![Section {
            name: "response".into(),
            content: "first turn".into(),
        }]
    );

    completer.reset();
    assert_eq!(completer.completed_json(), "");

    drip(&mut completer, "{\"response\":\"second turn\"}");
    assert_eq!(completer.completed_sections()[0].content, "second turn");
}

#[test]
fn a_truncated_stream_still_renders() {
    let mut completer = StreamingCompleter::new(CompleterOptions::default());
    // Producer dies mid-way through the tool name.
    let cut = TURN.find("web_se").unwrap() + "web_se".len();
    drip(&mut completer, &TURN[..cut]);

    let sections = completer.completed_sections();
    assert_eq!(sections.len(), 3);
    let action: Value = serde_json::from_str(&sections[2].content).unwrap();
    assert_eq!(action["tool_name"], "web_se");
}
