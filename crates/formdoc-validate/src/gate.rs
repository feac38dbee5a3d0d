use serde::Serialize;
use tracing::{debug, info};

use formdoc_model::{AnswerMap, Block};

use crate::required::{ValidationErrors, validate_all};

/// Outcome of the pre-submit check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionGate {
    pub blocked: bool,
    pub missing: ValidationErrors,
}

impl SubmissionGate {
    pub fn missing_ids(&self) -> impl Iterator<Item = &str> {
        self.missing.keys().map(String::as_str)
    }
}

/// Blocks submission while any required field is empty.
pub fn gate_submission(blocks: &[Block], answers: &AnswerMap) -> SubmissionGate {
    let missing = validate_all(blocks, answers);
    if missing.is_empty() {
        debug!(answers = answers.len(), "submission allowed");
        return SubmissionGate::default();
    }
    info!(missing = missing.len(), "submission blocked by required fields");
    SubmissionGate {
        blocked: true,
        missing,
    }
}
