use formdoc_model::{AnswerMap, AnswerValue, CompanySettings, Field, FieldKind, FormDocument, Revision, Section};
use chrono::{TimeZone, Utc};
use formdoc_store::{FormStore, JsonDirectoryStore, StoreError, Submission};
use tempfile::TempDir;

fn form(title: &str, published: bool) -> FormDocument {
    FormDocument {
        title: title.to_string(),
        description: None,
        department: Some("Maintenance".to_string()),
        revision: Revision::new(1, 2),
        published,
        header_on_all_pages: false,
        blocks: vec![
            Section::new("s1", "Basic Information", 1)
                .with_children(vec![
                    Field::new("reg", "Aircraft Registration", FieldKind::ShortText, 2)
                        .required()
                        .into(),
                ])
                .into(),
        ],
    }
}

fn store() -> (TempDir, JsonDirectoryStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonDirectoryStore::open(dir.path().join("data")).unwrap();
    (dir, store)
}

#[test]
fn form_round_trips_through_disk() {
    let (_dir, store) = store();
    let original = form("Daily Inspection", true);
    store.save_form("daily", &original).unwrap();
    assert_eq!(store.load_form("daily").unwrap(), original);

    let on_disk = std::fs::read_to_string(store.root().join("forms/daily.json")).unwrap();
    assert!(on_disk.contains("\"revision\": \"1.2\""));
    assert!(!store.root().join("forms/daily.json.tmp").exists());
}

#[test]
fn missing_form_is_not_found() {
    let (_dir, store) = store();
    let err = store.load_form("nope").unwrap_err();
    assert!(matches!(err, StoreError::FormNotFound { ref id } if id == "nope"));
    assert!(err.suggestion().is_some());
}

#[test]
fn listing_filters_unpublished_for_respondents() {
    let (_dir, store) = store();
    store.save_form("b-walkaround", &form("Walkaround", true)).unwrap();
    store.save_form("a-draft", &form("Draft", false)).unwrap();
    std::fs::write(store.root().join("forms/notes.txt"), "ignored").unwrap();

    let all = store.list_forms(false).unwrap();
    let ids: Vec<_> = all.iter().map(|summary| summary.id.as_str()).collect();
    assert_eq!(ids, vec!["a-draft", "b-walkaround"]);
    assert_eq!(all[1].revision, Revision::new(1, 2));

    let published = store.list_forms(true).unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].title, "Walkaround");
    assert!(published[0].published);
}

#[test]
fn answers_are_per_user() {
    let (_dir, store) = store();
    assert_eq!(store.load_answers("daily", "alice").unwrap(), None);

    let mut answers = AnswerMap::new();
    answers.insert("reg".to_string(), AnswerValue::text("OY-ABC"));
    store.save_answers("daily", "alice", &answers).unwrap();

    assert_eq!(store.load_answers("daily", "alice").unwrap(), Some(answers));
    assert_eq!(store.load_answers("daily", "bob").unwrap(), None);
}

#[test]
fn submissions_are_kept_apart_from_working_answers() {
    let (_dir, store) = store();
    assert_eq!(store.load_submission("daily", "alice").unwrap(), None);

    let mut answers = AnswerMap::new();
    answers.insert("reg".to_string(), AnswerValue::text("OY-ABC"));
    store.save_answers("daily", "alice", &answers).unwrap();
    let submission = Submission {
        form_id: "daily".to_string(),
        user_id: "alice".to_string(),
        revision: Revision::new(1, 2),
        answers: answers.clone(),
        submitted_at: Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap(),
    };
    store.save_submission(&submission).unwrap();

    answers.insert("reg".to_string(), AnswerValue::text("OY-XYZ"));
    store.save_answers("daily", "alice", &answers).unwrap();

    let loaded = store.load_submission("daily", "alice").unwrap().unwrap();
    assert_eq!(loaded, submission);
    assert_eq!(loaded.answers["reg"], AnswerValue::text("OY-ABC"));
    assert!(store.root().join("submissions/daily/alice.json").exists());
    assert_eq!(store.load_submission("daily", "bob").unwrap(), None);

    let escaping = Submission {
        user_id: "../alice".to_string(),
        ..submission
    };
    assert!(matches!(store.save_submission(&escaping), Err(StoreError::InvalidId { .. })));
}

#[test]
fn company_settings_absent_until_saved() {
    let (_dir, store) = store();
    assert_eq!(store.load_company_settings().unwrap(), None);

    let settings = CompanySettings {
        name: "Copenhagen AirTaxi".to_string(),
        legal_text: "All rights reserved".to_string(),
        ..CompanySettings::default()
    };
    store.save_company_settings(&settings).unwrap();
    assert_eq!(store.load_company_settings().unwrap(), Some(settings));
}

#[test]
fn identifiers_cannot_escape_the_store() {
    let (_dir, store) = store();
    for id in ["../etc", "a/b", "", "has space"] {
        assert!(matches!(
            store.save_form(id, &form("Bad", false)),
            Err(StoreError::InvalidId { .. })
        ));
    }
    assert!(matches!(
        store.load_answers("daily", "../../x"),
        Err(StoreError::InvalidId { .. })
    ));
}

#[test]
fn corrupt_file_reports_parse_error() {
    let (_dir, store) = store();
    std::fs::write(store.root().join("forms/broken.json"), "{ not json").unwrap();
    assert!(matches!(store.load_form("broken"), Err(StoreError::Parse { .. })));
}
