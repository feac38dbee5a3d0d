//! Answer validation for forms.
//!
//! Validation never fails on empty trees or missing answers; it returns
//! empty results. The only outcome callers must act on is a non-empty
//! error map, which blocks submission.

mod gate;
mod progress;
mod required;

pub use gate::{SubmissionGate, gate_submission};
pub use progress::{FormProgress, SectionProgress, form_progress, section_progress};
pub use required::{FieldError, ValidationErrors, find_required_field_ids, is_empty, validate_all, validate_section};
