//! JSON files under a single directory.
//!
//! ```text
//! <root>/
//!   company.json
//!   forms/<form_id>.json
//!   answers/<form_id>/<user_id>.json
//!   submissions/<form_id>/<user_id>.json
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use formdoc_model::{AnswerMap, CompanySettings, FormDocument};

use crate::error::{Result, StoreError};
use crate::{FormStore, FormSummary, Submission, validate_id};

const FORMS_DIR: &str = "forms";
const ANSWERS_DIR: &str = "answers";
const SUBMISSIONS_DIR: &str = "submissions";
const COMPANY_FILE: &str = "company.json";

/// File-backed [`FormStore`].
#[derive(Debug, Clone)]
pub struct JsonDirectoryStore {
    root: PathBuf,
}

impl JsonDirectoryStore {
    /// Opens (and creates when missing) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for dir in [root.join(FORMS_DIR), root.join(ANSWERS_DIR), root.join(SUBMISSIONS_DIR)] {
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
                operation: "create directory",
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn form_path(&self, form_id: &str) -> Result<PathBuf> {
        validate_id(form_id)?;
        Ok(self.root.join(FORMS_DIR).join(format!("{form_id}.json")))
    }

    fn answers_path(&self, form_id: &str, user_id: &str) -> Result<PathBuf> {
        self.per_user_path(ANSWERS_DIR, form_id, user_id)
    }

    fn submission_path(&self, form_id: &str, user_id: &str) -> Result<PathBuf> {
        self.per_user_path(SUBMISSIONS_DIR, form_id, user_id)
    }

    fn per_user_path(&self, dir: &str, form_id: &str, user_id: &str) -> Result<PathBuf> {
        validate_id(form_id)?;
        validate_id(user_id)?;
        Ok(self.root.join(dir).join(form_id).join(format!("{user_id}.json")))
    }

    fn company_path(&self) -> PathBuf {
        self.root.join(COMPANY_FILE)
    }
}

impl FormStore for JsonDirectoryStore {
    fn load_form(&self, form_id: &str) -> Result<FormDocument> {
        let path = self.form_path(form_id)?;
        read_json(&path)?.ok_or_else(|| StoreError::FormNotFound {
            id: form_id.to_string(),
        })
    }

    fn save_form(&self, form_id: &str, form: &FormDocument) -> Result<()> {
        let path = self.form_path(form_id)?;
        write_json_atomic(&path, form, "form")?;
        info!(form = form_id, revision = %form.revision, published = form.published, "saved form");
        Ok(())
    }

    fn list_forms(&self, published_only: bool) -> Result<Vec<FormSummary>> {
        let dir = self.root.join(FORMS_DIR);
        let entries = fs::read_dir(&dir).map_err(|source| StoreError::Io {
            operation: "read directory",
            path: dir.clone(),
            source,
        })?;

        let mut forms = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                operation: "read directory",
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_id(id).is_err() {
                debug!(path = %path.display(), "skipping file with unusable name");
                continue;
            }
            let Some(form) = read_json::<FormDocument>(&path)? else {
                continue;
            };
            if published_only && !form.published {
                continue;
            }
            forms.push(FormSummary::new(id, &form));
        }
        forms.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(forms)
    }

    fn load_answers(&self, form_id: &str, user_id: &str) -> Result<Option<AnswerMap>> {
        read_json(&self.answers_path(form_id, user_id)?)
    }

    fn save_answers(&self, form_id: &str, user_id: &str, answers: &AnswerMap) -> Result<()> {
        let path = self.answers_path(form_id, user_id)?;
        create_parent(&path)?;
        write_json_atomic(&path, answers, "answers")?;
        debug!(form = form_id, user = user_id, count = answers.len(), "saved answers");
        Ok(())
    }

    fn load_submission(&self, form_id: &str, user_id: &str) -> Result<Option<Submission>> {
        read_json(&self.submission_path(form_id, user_id)?)
    }

    fn save_submission(&self, submission: &Submission) -> Result<()> {
        let path = self.submission_path(&submission.form_id, &submission.user_id)?;
        create_parent(&path)?;
        write_json_atomic(&path, submission, "submission")?;
        info!(
            form = %submission.form_id,
            user = %submission.user_id,
            revision = %submission.revision,
            "saved submission"
        );
        Ok(())
    }

    fn load_company_settings(&self) -> Result<Option<CompanySettings>> {
        read_json(&self.company_path())
    }

    fn save_company_settings(&self, settings: &CompanySettings) -> Result<()> {
        write_json_atomic(&self.company_path(), settings, "company settings")?;
        info!(company = %settings.name, "saved company settings");
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        operation: "create directory",
        path: parent.to_path_buf(),
        source,
    })
}

/// Reads and parses `path`; `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes to a sibling temp file, syncs it, then renames over `path`, so a
/// crash never leaves a half-written document behind.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize { what, source })?;
    let temp_path = path.with_extension("json.tmp");

    let io_err = |operation: &'static str| {
        let temp_path = temp_path.clone();
        move |source| StoreError::Io {
            operation,
            path: temp_path,
            source,
        }
    };

    {
        let file = File::create(&temp_path).map_err(io_err("create"))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes).map_err(io_err("write"))?;
        writer.write_all(b"\n").map_err(io_err("write"))?;
        let file = writer
            .into_inner()
            .map_err(|err| io_err("flush")(err.into_error()))?;
        file.sync_all().map_err(io_err("sync"))?;
    }

    fs::rename(&temp_path, path).map_err(|source| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })
}
