//! Draft and publish transitions of a form document.

use tracing::info;

use formdoc_model::{FormDocument, Revision, RevisionBump, Section};

use crate::editor::new_block_id;

/// Title of the section every new form starts with.
pub const FIRST_SECTION_TITLE: &str = "Section 1";

/// A new unpublished form at revision 1.0 with a single empty section.
pub fn new_draft(title: impl Into<String>) -> FormDocument {
    FormDocument {
        title: title.into(),
        description: None,
        department: None,
        revision: Revision::INITIAL,
        published: false,
        header_on_all_pages: false,
        blocks: vec![Section::new(new_block_id(), FIRST_SECTION_TITLE, 1).into()],
    }
}

/// Publishes `form`, bumping its revision.
///
/// Edits made to a published form reach respondents only after the next
/// publish.
pub fn publish(form: &FormDocument, bump: RevisionBump) -> FormDocument {
    let revision = form.revision.bumped(bump);
    info!(
        title = %form.title,
        from = %form.revision,
        to = %revision,
        "publish form"
    );
    FormDocument {
        revision,
        published: true,
        ..form.clone()
    }
}
