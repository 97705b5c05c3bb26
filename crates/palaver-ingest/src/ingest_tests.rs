use std::io::Write;

use indoc::indoc;
use palaver_core::{Lookback, OriginKind, StringPool};

use crate::ingest::Dataset;
use crate::records::{RawDump, VariableValue};

const SAMPLE: &str = indoc! {r#"
    {
        "actors": [
            {
                "id": 1,
                "fields": [
                    {"title": "name", "value": "Kim Kitsuragi"},
                    {"title": "characterShortName", "value": "Kim"},
                    {"title": "description", "value": "A lieutenant."},
                    {"title": "isPlayer", "value": "False"},
                    {"title": "isNpc", "value": "True"}
                ]
            }
        ],
        "variables": [
            {
                "id": 2,
                "fields": [
                    {"title": "name", "value": "reputation"},
                    {"title": "description", "value": "How liked you are."},
                    {"title": "Initial Value", "value": "10"}
                ]
            }
        ],
        "conversations": [
            {
                "id": 3,
                "fields": [{"title": "title", "value": "Opening Scene"}],
                "dialogueEntries": [
                    {
                        "id": 10,
                        "conversationId": 3,
                        "isRoot": true,
                        "fields": [
                            {"title": "dialogText", "value": "The Quick Brown Fox"},
                            {"title": "actor", "value": "1"}
                        ]
                    },
                    {
                        "id": 11,
                        "conversationId": 3,
                        "fields": [
                            {"title": "dialogText", "value": "Something else."}
                        ]
                    }
                ]
            }
        ]
    }
"#};

fn ingest_sample(pool: &mut StringPool) -> Dataset {
    let dump: RawDump = serde_json::from_str(SAMPLE).unwrap();
    Dataset::ingest(dump, pool)
}

#[test]
fn collections_are_typed_and_counted() {
    let mut pool = StringPool::new();
    let dataset = ingest_sample(&mut pool);

    assert_eq!(dataset.actors.len(), 1);
    assert_eq!(dataset.variables.len(), 1);
    assert_eq!(dataset.conversations.len(), 1);
    assert_eq!(dataset.entries.len(), 2);

    let actor = &dataset.actors[0];
    assert!(!actor.is_player);
    assert!(actor.is_npc);

    assert_eq!(dataset.variables[0].initial_value, VariableValue::Number(10.0));

    let entry = &dataset.entries[0];
    assert_eq!(entry.conversation_id, 3);
    assert_eq!(entry.actor, 1);
    assert!(entry.is_root);
}

#[test]
fn text_fields_resolve_through_the_pool() {
    let mut pool = StringPool::new();
    let dataset = ingest_sample(&mut pool);

    let (name, _) = pool.resolve(dataset.actors[0].name);
    assert_eq!(name, "Kim Kitsuragi");

    let (line, _) = pool.resolve(dataset.entries[0].text);
    assert_eq!(line, "The Quick Brown Fox");

    // Still resolvable after sealing.
    pool.finalize();
    let (line, _) = pool.resolve(dataset.entries[0].text);
    assert_eq!(line, "The Quick Brown Fox");
}

#[test]
fn lookbacks_point_back_at_owners() {
    let mut pool = StringPool::new();
    let dataset = ingest_sample(&mut pool);
    pool.finalize();

    let (_, lookback) = pool.resolve(dataset.actors[0].name);
    assert_eq!(lookback, Lookback::new(OriginKind::Actor, 0));

    let (_, lookback) = pool.resolve(dataset.variables[0].name);
    assert_eq!(lookback, Lookback::new(OriginKind::Variable, 0));

    let (_, lookback) = pool.resolve(dataset.conversations[0].title);
    assert_eq!(lookback, Lookback::new(OriginKind::Conversation, 0));

    let (_, lookback) = pool.resolve(dataset.entries[1].text);
    assert_eq!(lookback, Lookback::new(OriginKind::DialogueEntry, 1));
}

#[test]
fn conversations_link_global_entry_indices() {
    let mut pool = StringPool::new();
    let dataset = ingest_sample(&mut pool);

    assert_eq!(dataset.conversations[0].entries, [0, 1]);
}

#[test]
fn second_conversation_continues_global_indices() {
    let json = indoc! {r#"
        {
            "conversations": [
                {
                    "id": 1,
                    "fields": [{"title": "title", "value": "First"}],
                    "dialogueEntries": [
                        {"id": 1, "fields": [{"title": "dialogText", "value": "one"}]}
                    ]
                },
                {
                    "id": 2,
                    "fields": [{"title": "title", "value": "Second"}],
                    "dialogueEntries": [
                        {"id": 2, "fields": [{"title": "dialogText", "value": "two"}]},
                        {"id": 3, "fields": [{"title": "dialogText", "value": "three"}]}
                    ]
                }
            ]
        }
    "#};

    let mut pool = StringPool::new();
    let dump: RawDump = serde_json::from_str(json).unwrap();
    let dataset = Dataset::ingest(dump, &mut pool);

    assert_eq!(dataset.conversations[0].entries, [0]);
    assert_eq!(dataset.conversations[1].entries, [1, 2]);
    assert_eq!(dataset.entries.len(), 3);
}

#[test]
fn deduplicated_text_keeps_first_owner() {
    // Both dialogue entries leave `title` empty, so the empty string is
    // pooled once; the missing sequence/conditions fields intern to the
    // same record. Its lookback stays with the first owner.
    let mut pool = StringPool::new();
    let dataset = ingest_sample(&mut pool);

    assert_eq!(dataset.entries[0].title, dataset.entries[1].title);

    let (_, lookback) = pool.resolve(dataset.entries[0].title);
    assert_eq!(lookback.kind, OriginKind::DialogueEntry);
    assert_eq!(lookback.index, 0);
}

#[test]
fn variable_initial_value_coercion() {
    let json = indoc! {r#"
        {
            "variables": [
                {"id": 1, "fields": [
                    {"title": "name", "value": "a"},
                    {"title": "Initial Value", "value": "True"}
                ]},
                {"id": 2, "fields": [
                    {"title": "name", "value": "b"},
                    {"title": "Initial Value", "value": 3}
                ]},
                {"id": 3, "fields": [
                    {"title": "name", "value": "c"}
                ]}
            ]
        }
    "#};

    let mut pool = StringPool::new();
    let dump: RawDump = serde_json::from_str(json).unwrap();
    let dataset = Dataset::ingest(dump, &mut pool);

    assert_eq!(dataset.variables[0].initial_value, VariableValue::Bool(true));
    assert_eq!(dataset.variables[1].initial_value, VariableValue::Number(3.0));
    assert_eq!(dataset.variables[2].initial_value, VariableValue::Missing);
}

#[test]
fn from_path_reads_a_dump_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let mut pool = StringPool::new();
    let dataset = Dataset::from_path(file.path(), &mut pool).unwrap();
    assert_eq!(dataset.entries.len(), 2);
}

#[test]
fn from_path_propagates_errors() {
    let mut pool = StringPool::new();
    assert!(Dataset::from_path("/nonexistent/dump.json", &mut pool).is_err());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not json").unwrap();
    let mut pool = StringPool::new();
    assert!(Dataset::from_path(file.path(), &mut pool).is_err());
}
