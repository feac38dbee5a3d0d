//! Tests for formdoc-model serialization.

use formdoc_model::{AnswerMap, AnswerValue, Block, CompanySettings, FieldKind, FormDocument, Revision};

const STORED_FORM: &str = r#"{
    "title": "Daily Inspection",
    "description": "Pre-flight walkaround",
    "department": "Maintenance",
    "revision": "1.2",
    "published": true,
    "headerOnAllPages": true,
    "blocks": [
        {
            "id": "section1",
            "type": "section",
            "title": "Basic Information",
            "description": "",
            "level": 1,
            "children": [
                { "id": "field1", "type": "field", "title": "Aircraft Registration", "fieldType": "text", "required": true, "level": 2 },
                { "id": "field7", "type": "field", "title": "Condition", "fieldType": "radio", "choices": ["Good", "Poor"], "level": 2 },
                { "id": "field9", "type": "field", "title": "Gauge", "fieldType": "slider", "level": 2 }
            ]
        }
    ]
}"#;

#[test]
fn stored_form_deserializes() {
    let form: FormDocument = serde_json::from_str(STORED_FORM).expect("parse form");
    assert_eq!(form.revision, Revision::new(1, 2));
    assert!(form.header_on_all_pages);
    assert_eq!(form.blocks.len(), 1);

    let section = form.blocks[0].as_section().expect("section");
    assert_eq!(section.visible_description(), None);
    assert_eq!(section.children.len(), 3);

    let registration = section.children[0].as_field().expect("field");
    assert_eq!(registration.kind, FieldKind::ShortText);
    assert!(registration.required);

    let condition = section.children[1].as_field().expect("field");
    assert_eq!(condition.kind, FieldKind::SingleChoice);
    assert_eq!(condition.choices, vec!["Good", "Poor"]);

    let gauge = section.children[2].as_field().expect("field");
    assert_eq!(gauge.kind, FieldKind::Other("slider".to_string()));
}

#[test]
fn form_serializes_with_stored_tags() {
    let form: FormDocument = serde_json::from_str(STORED_FORM).expect("parse form");
    let value = serde_json::to_value(&form).expect("serialize");
    assert_eq!(value["headerOnAllPages"], true);
    assert_eq!(value["revision"], "1.2");
    let first_field = &value["blocks"][0]["children"][0];
    assert_eq!(first_field["type"], "field");
    assert_eq!(first_field["fieldType"], "text");
    assert_eq!(value["blocks"][0]["children"][2]["fieldType"], "slider");

    let round: FormDocument = serde_json::from_value(value).expect("deserialize");
    assert_eq!(round, form);
}

#[test]
fn field_with_children_is_rejected() {
    let json = r#"{ "id": "f1", "type": "field", "title": "Bad", "fieldType": "text", "level": 2, "children": [] }"#;
    assert!(serde_json::from_str::<Block>(json).is_err());
}

#[test]
fn malformed_revision_is_rejected() {
    let json = r#"{ "title": "T", "revision": "one", "blocks": [] }"#;
    assert!(serde_json::from_str::<FormDocument>(json).is_err());
}

#[test]
fn answers_deserialize_by_shape() {
    let json = r#"{
        "field1": "OY-ABC",
        "field5": 1250,
        "field6": true,
        "field8": ["Good", "Fair"],
        "field10": null
    }"#;
    let answers: AnswerMap = serde_json::from_str(json).expect("parse answers");
    assert_eq!(answers["field1"], AnswerValue::text("OY-ABC"));
    assert_eq!(answers["field5"], AnswerValue::Number(1250.0));
    assert_eq!(answers["field6"], AnswerValue::Bool(true));
    assert_eq!(answers["field8"], AnswerValue::list(["Good", "Fair"]));
    assert!(answers["field10"].is_empty());
}

#[test]
fn company_settings_accept_legacy_keys() {
    let json = r#"{ "name": "Copenhagen AirTaxi", "easaNumber": "DK.AOC.001", "legalText": "All rights reserved" }"#;
    let settings: CompanySettings = serde_json::from_str(json).expect("parse settings");
    assert_eq!(settings.approval_number, "DK.AOC.001");
    assert_eq!(settings.visible_legal_text(), Some("All rights reserved"));
    assert_eq!(settings.logo, None);
}
