//! Storage for forms, answers, submissions and company settings.
//!
//! The layout and validation crates work on in-memory values; this crate
//! is the seam to wherever those values live. [`FormStore`] is the
//! interface, [`JsonDirectoryStore`] keeps everything as pretty-printed
//! JSON files under one directory.
//!
//! Concurrent writers are not reconciled: the last save wins.

mod error;
mod json_dir;

pub use error::{Result, StoreError};
pub use json_dir::JsonDirectoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formdoc_model::{AnswerMap, CompanySettings, FormDocument, Revision};

/// Listing entry for a stored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub revision: Revision,
    pub published: bool,
}

impl FormSummary {
    pub fn new(id: impl Into<String>, form: &FormDocument) -> Self {
        Self {
            id: id.into(),
            title: form.title.clone(),
            revision: form.revision,
            published: form.published,
        }
    }
}

/// Answers a user handed in, frozen at submission time.
///
/// Kept apart from the user's working answers: editing answers after
/// submitting does not change what was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub form_id: String,
    pub user_id: String,
    /// Revision of the form the answers were given against.
    pub revision: Revision,
    pub answers: AnswerMap,
    pub submitted_at: DateTime<Utc>,
}

pub trait FormStore {
    fn load_form(&self, form_id: &str) -> Result<FormDocument>;

    fn save_form(&self, form_id: &str, form: &FormDocument) -> Result<()>;

    /// Stored forms ordered by identifier; respondents see published ones only.
    fn list_forms(&self, published_only: bool) -> Result<Vec<FormSummary>>;

    /// A user's saved answers, `None` when they have not saved any.
    fn load_answers(&self, form_id: &str, user_id: &str) -> Result<Option<AnswerMap>>;

    fn save_answers(&self, form_id: &str, user_id: &str, answers: &AnswerMap) -> Result<()>;

    /// The user's latest submission, `None` before they first submit.
    fn load_submission(&self, form_id: &str, user_id: &str) -> Result<Option<Submission>>;

    /// Records a submission, replacing any earlier one by the same user.
    fn save_submission(&self, submission: &Submission) -> Result<()>;

    /// Company branding, `None` until an administrator saves some.
    fn load_company_settings(&self) -> Result<Option<CompanySettings>>;

    fn save_company_settings(&self, settings: &CompanySettings) -> Result<()>;
}

/// Identifiers become file names, so they are restricted to a safe set.
pub fn validate_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId { id: id.to_string() })
    }
}
