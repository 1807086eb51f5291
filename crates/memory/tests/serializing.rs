//! Tests for the log-backed SerializingMemory.

use driftlog_memory::{
    Error, Memory, MemoryConfig, MemoryValue, RenderMode, Role, SerializingMemory,
};
use std::collections::BTreeMap;
use std::path::Path;

fn fields(key: &str, value: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(key.to_string(), value.to_string())])
}

fn save(memory: &mut SerializingMemory, human: &str, ai: &str) {
    memory
        .save_context(&fields("input", human), &fields("output", ai))
        .unwrap();
}

fn loaded(memory: &mut SerializingMemory) -> MemoryValue {
    let mut vars = memory.load_memory_variables(&BTreeMap::new()).unwrap();
    vars.remove("history").unwrap()
}

fn messages_memory(path: &Path, window: usize) -> SerializingMemory {
    SerializingMemory::new(
        path,
        window,
        MemoryConfig::new().render_mode(RenderMode::Messages),
    )
}

#[test]
fn bootstrap_creates_empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");
    let mut memory = messages_memory(&path, 4);

    let value = loaded(&mut memory);
    assert_eq!(value.as_messages().unwrap().len(), 0);
    assert!(path.exists());
}

#[test]
fn round_trip_through_a_fresh_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut writer = messages_memory(&path, 10);
    save(&mut writer, "Hi", "Hello!");
    save(&mut writer, "2+2?", "4");

    let mut reader = messages_memory(&path, 10);
    let value = loaded(&mut reader);
    let messages = value.as_messages().unwrap();
    assert_eq!(messages.len(), 4);

    let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::Human, Role::Ai, Role::Human, Role::Ai]);
    let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["Hi", "Hello!", "2+2?", "4"]);
}

#[test]
fn window_of_one_turn_keeps_only_the_last() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 1);
    save(&mut memory, "Hi", "Hello!");
    save(&mut memory, "2+2?", "4");

    let value = loaded(&mut memory);
    let messages = value.as_messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "2+2?");
    assert_eq!(messages[1].content, "4");
}

#[test]
fn window_of_two_turns_keeps_both_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 2);
    save(&mut memory, "Hi", "Hello!");
    save(&mut memory, "2+2?", "4");

    let value = loaded(&mut memory);
    let contents: Vec<_> = value
        .as_messages()
        .unwrap()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, ["Hi", "Hello!", "2+2?", "4"]);
}

#[test]
fn reload_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 3);
    save(&mut memory, "Hi", "Hello!");

    let first = loaded(&mut memory);
    let second = loaded(&mut memory);
    assert_eq!(first, second);
}

#[test]
fn add_score_annotates_only_the_last_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 10);
    save(&mut memory, "Hi", "Hello!");
    save(&mut memory, "2+2?", "4");
    memory.add_score(5).unwrap();

    let mut reader = messages_memory(&path, 10);
    let value = loaded(&mut reader);
    let messages = value.as_messages().unwrap();

    let last = &messages[3];
    assert_eq!(last.content, "4");
    assert_eq!(last.metadata["score"], 5);

    for message in &messages[..3] {
        assert!(message.metadata.is_empty());
    }
    assert_eq!(messages[1].content, "Hello!");
}

#[test]
fn add_score_on_empty_log_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 4);
    let err = memory.add_score(5).unwrap_err();
    assert!(matches!(err, Error::EmptyHistory));
}

#[test]
fn each_save_appends_exactly_two_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 4);
    save(&mut memory, "Hi", "Hello!");
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);

    save(&mut memory, "2+2?", "4");
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 4);
}

#[test]
fn ambiguous_outputs_leave_no_partial_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 4);
    save(&mut memory, "Hi", "Hello!");

    let outputs: BTreeMap<String, String> = BTreeMap::from([
        ("text".to_string(), "x".to_string()),
        ("tokens".to_string(), "3".to_string()),
    ]);
    let err = memory
        .save_context(&fields("input", "2+2?"), &outputs)
        .unwrap_err();
    assert!(matches!(err, Error::AmbiguousOutputKey(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
}

#[test]
fn explicit_keys_pick_the_configured_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let config = MemoryConfig::new()
        .render_mode(RenderMode::Messages)
        .input_key("question")
        .output_key("text");
    let mut memory = SerializingMemory::new(&path, 4, config);

    let inputs: BTreeMap<String, String> = BTreeMap::from([
        ("question".to_string(), "Hi".to_string()),
        ("context".to_string(), "docs".to_string()),
    ]);
    let outputs: BTreeMap<String, String> = BTreeMap::from([
        ("text".to_string(), "Hello!".to_string()),
        ("tokens".to_string(), "3".to_string()),
    ]);
    memory.save_context(&inputs, &outputs).unwrap();

    let value = loaded(&mut memory);
    let contents: Vec<_> = value
        .as_messages()
        .unwrap()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, ["Hi", "Hello!"]);
}

#[test]
fn clear_empties_the_view_but_not_the_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 4);
    save(&mut memory, "Hi", "Hello!");
    memory.clear().unwrap();

    // The next read replays the durable log.
    let value = loaded(&mut memory);
    assert_eq!(value.as_messages().unwrap().len(), 2);
}

#[test]
fn text_mode_renders_the_windowed_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let config = MemoryConfig::new().human_prefix("User").ai_prefix("Bot");
    let mut memory = SerializingMemory::new(&path, 1, config);
    save(&mut memory, "Hi", "Hello!");
    save(&mut memory, "2+2?", "4");

    let value = loaded(&mut memory);
    assert_eq!(value.as_text().unwrap(), "User: 2+2?\nBot: 4");
}

#[test]
fn memory_key_names_the_injected_variable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let config = MemoryConfig::new().memory_key("chat_history");
    let mut memory = SerializingMemory::new(&path, 4, config);
    assert_eq!(memory.memory_variables(), ["chat_history"]);

    save(&mut memory, "Hi", "Hello!");
    let vars = memory.load_memory_variables(&BTreeMap::new()).unwrap();
    assert!(vars.contains_key("chat_history"));
    assert_eq!(vars.len(), 1);
}

#[test]
fn malformed_record_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 4);
    save(&mut memory, "Hi", "Hello!");

    let mut raw = std::fs::read_to_string(&path).unwrap();
    raw.push_str("{\"type\":\"ai\"\n");
    std::fs::write(&path, raw).unwrap();

    let err = memory.load_memory_variables(&BTreeMap::new()).unwrap_err();
    assert!(matches!(err, Error::MalformedLogRecord { line: 3, .. }));
}

#[test]
fn scores_survive_later_turns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_log.log");

    let mut memory = messages_memory(&path, 10);
    save(&mut memory, "Hi", "Hello!");
    memory.add_score(1).unwrap();
    save(&mut memory, "2+2?", "4");
    memory.add_score(5).unwrap();

    let value = loaded(&mut memory);
    let messages = value.as_messages().unwrap();
    assert_eq!(messages[1].metadata["score"], 1);
    assert_eq!(messages[3].metadata["score"], 5);
    assert!(messages[0].metadata.is_empty());
    assert!(messages[2].metadata.is_empty());
}
