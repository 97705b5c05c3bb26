use indoc::indoc;

use crate::records::{RawDump, flag, int, number, text};

fn parse(json: &str) -> RawDump {
    serde_json::from_str(json).unwrap()
}

#[test]
fn parses_entities_and_fields() {
    let dump = parse(indoc! {r#"
        {
            "actors": [
                {
                    "id": 1,
                    "fields": [
                        {"title": "name", "value": "Kim"},
                        {"title": "isPlayer", "value": "False"}
                    ]
                }
            ],
            "variables": [],
            "conversations": []
        }
    "#});

    assert_eq!(dump.actors.len(), 1);
    let actor = &dump.actors[0];
    assert_eq!(actor.id, 1);
    assert_eq!(text(&actor.fields, "name"), "Kim");
    assert!(!flag(&actor.fields, "isPlayer"));
}

#[test]
fn missing_collections_default_to_empty() {
    let dump = parse("{}");
    assert!(dump.actors.is_empty());
    assert!(dump.variables.is_empty());
    assert!(dump.conversations.is_empty());
}

#[test]
fn conversations_carry_dialogue_entries() {
    let dump = parse(indoc! {r#"
        {
            "conversations": [
                {
                    "id": 4,
                    "fields": [{"title": "title", "value": "Opening"}],
                    "dialogueEntries": [
                        {
                            "id": 10,
                            "conversationId": 4,
                            "isRoot": true,
                            "fields": [{"title": "dialogText", "value": "Hello."}]
                        }
                    ]
                }
            ]
        }
    "#});

    let conversation = &dump.conversations[0];
    assert_eq!(conversation.entity.id, 4);
    assert_eq!(text(&conversation.entity.fields, "title"), "Opening");

    let entry = &conversation.dialogue_entries[0];
    assert_eq!(entry.id, 10);
    assert_eq!(entry.conversation_id, 4);
    assert!(entry.is_root);
    assert!(!entry.is_group);
    assert_eq!(text(&entry.fields, "dialogText"), "Hello.");
}

#[test]
fn flag_coerces_strings_and_booleans() {
    let dump = parse(indoc! {r#"
        {
            "actors": [{
                "id": 1,
                "fields": [
                    {"title": "a", "value": "True"},
                    {"title": "b", "value": "false"},
                    {"title": "c", "value": true},
                    {"title": "d", "value": "1"}
                ]
            }]
        }
    "#});

    let fields = &dump.actors[0].fields;
    assert!(flag(fields, "a"));
    assert!(!flag(fields, "b"));
    assert!(flag(fields, "c"));
    // Only "true"/"false" strings coerce; anything else is false.
    assert!(!flag(fields, "d"));
    assert!(!flag(fields, "missing"));
}

#[test]
fn int_and_number_coerce_strings_and_numbers() {
    let dump = parse(indoc! {r#"
        {
            "actors": [{
                "id": 1,
                "fields": [
                    {"title": "a", "value": "42"},
                    {"title": "b", "value": 7},
                    {"title": "c", "value": " -3 "},
                    {"title": "d", "value": "2.5"},
                    {"title": "e", "value": "not a number"}
                ]
            }]
        }
    "#});

    let fields = &dump.actors[0].fields;
    assert_eq!(int(fields, "a"), Some(42));
    assert_eq!(int(fields, "b"), Some(7));
    assert_eq!(int(fields, "c"), Some(-3));
    assert_eq!(int(fields, "e"), None);
    assert_eq!(int(fields, "missing"), None);

    assert_eq!(number(fields, "d"), Some(2.5));
    assert_eq!(number(fields, "b"), Some(7.0));
}

#[test]
fn text_defaults_to_empty() {
    let dump = parse(r#"{"actors": [{"id": 1, "fields": []}]}"#);
    assert_eq!(text(&dump.actors[0].fields, "name"), "");
}
