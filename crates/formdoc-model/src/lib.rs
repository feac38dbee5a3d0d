//! Data model for hierarchical forms.
//!
//! - [`Block`]: the section/field tree a form is made of
//! - [`BlockPath`]: positional addresses such as `2.1.3`
//! - [`FormDocument`]: a form with its revision and publish state
//! - [`AnswerMap`]: a respondent's answers keyed by field identifier
//! - [`CompanySettings`]: branding used when printing documents

pub mod answers;
pub mod block;
pub mod company;
pub mod error;
pub mod field_kind;
pub mod form;
pub mod path;
pub mod role;

pub use answers::{AnswerMap, AnswerValue};
pub use block::{Block, Field, MAX_LEVEL, Section};
pub use company::CompanySettings;
pub use error::{ModelError, Result};
pub use field_kind::FieldKind;
pub use form::{FormDocument, Revision, RevisionBump};
pub use path::BlockPath;
pub use role::Role;
