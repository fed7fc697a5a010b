//! History trimming integration tests
//!
//! Exercises the trimmer through the public API with transcripts shaped
//! like real agent turns (system prompt, user/assistant exchange, tool
//! output interleaved).

use lyra_pipeline::{DEFAULT_MAX_MESSAGES, Message, trim, trim_default};

fn human(s: &str) -> Message {
    Message::Human(s.to_string())
}

fn ai(s: &str) -> Message {
    Message::Ai(s.to_string())
}

fn system(s: &str) -> Message {
    Message::System(s.to_string())
}

fn tool(s: &str) -> Message {
    Message::Tool(s.to_string())
}

#[test]
fn test_typical_agent_turn() {
    let transcript = vec![
        system("You are Lyra."),
        human("what's the weather in Tokyo?"),
        ai(""),
        tool("{\"temp_c\": 21, \"sky\": \"clear\"}"),
        ai("It's 21°C and clear in Tokyo."),
        human("thanks!"),
    ];

    let trimmed = trim_default(transcript);
    assert_eq!(
        trimmed,
        vec![
            human("what's the weather in Tokyo?"),
            ai("It's 21°C and clear in Tokyo."),
            human("thanks!"),
        ]
    );
}

#[test]
fn test_length_bound_holds_for_any_cap() {
    let transcript: Vec<Message> = (0..50)
        .map(|i| {
            if i % 2 == 0 {
                human(&format!("q{i}"))
            } else {
                ai(&format!("a{i}"))
            }
        })
        .collect();

    for cap in [0, 1, 7, 20, 50, 100] {
        let trimmed = trim(transcript.clone(), cap);
        assert!(trimmed.len() <= cap, "cap {cap} exceeded: {}", trimmed.len());
    }
}

#[test]
fn test_cap_keeps_most_recent_window() {
    let transcript: Vec<Message> = (1..=25).map(|i| human(&format!("H{i}"))).collect();

    let trimmed = trim(transcript, DEFAULT_MAX_MESSAGES);
    let expected: Vec<Message> = (6..=25).map(|i| human(&format!("H{i}"))).collect();
    assert_eq!(trimmed, expected);
}

#[test]
fn test_no_system_or_tool_messages_survive() {
    let transcript = vec![
        system("persona"),
        human("a"),
        tool("output 1"),
        ai("b"),
        system("injected summary"),
        tool("output 2"),
        human("c"),
    ];

    let trimmed = trim(transcript, 10);
    assert!(
        trimmed
            .iter()
            .all(|m| matches!(m, Message::Human(_) | Message::Ai(_))),
        "banned kinds leaked: {trimmed:?}"
    );
    assert_eq!(trimmed, vec![human("a"), ai("b"), human("c")]);
}

#[test]
fn test_whitespace_assistant_messages_are_filtered() {
    let transcript = vec![human("a"), ai("  "), human("b"), ai("\n\t"), ai("ok")];

    let trimmed = trim(transcript, 5);
    assert_eq!(trimmed, vec![human("a"), human("b"), ai("ok")]);
}

#[test]
fn test_skipped_assistant_messages_free_slots_for_older_history() {
    // Cap 3: the two empty AI messages between recent entries must not
    // consume slots, so the window reaches further back.
    let transcript = vec![human("old"), human("mid"), ai(""), ai("   "), human("new")];

    let trimmed = trim(transcript, 3);
    assert_eq!(trimmed, vec![human("old"), human("mid"), human("new")]);
}

#[test]
fn test_empty_input() {
    assert!(trim(Vec::new(), DEFAULT_MAX_MESSAGES).is_empty());
    assert!(trim(Vec::new(), 0).is_empty());
}

#[test]
fn test_zero_cap() {
    let transcript = vec![system("s"), human("h"), ai("a"), tool("t")];
    assert!(trim(transcript, 0).is_empty());
}

#[test]
fn test_retrim_with_same_cap_is_identity() {
    let transcript: Vec<Message> = (0..30)
        .flat_map(|i| {
            vec![
                human(&format!("q{i}")),
                tool(&format!("t{i}")),
                ai(&format!("a{i}")),
            ]
        })
        .collect();

    let once = trim(transcript, 20);
    let twice = trim(once.clone(), 20);
    assert_eq!(once, twice);
}

#[test]
fn test_relative_order_is_preserved_under_heavy_filtering() {
    let transcript = vec![
        tool("x"),
        human("1"),
        system("y"),
        ai("2"),
        ai(" "),
        human("3"),
        tool("z"),
        ai("4"),
    ];

    let trimmed = trim(transcript, 10);
    assert_eq!(trimmed, vec![human("1"), ai("2"), human("3"), ai("4")]);
}
