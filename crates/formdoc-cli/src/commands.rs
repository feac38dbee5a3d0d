use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, info_span, warn};

use formdoc_core::{
    FieldDraft, SectionDraft, add_field, add_section, delete, edit_block, find_field, move_down, move_up,
    new_draft, publish, sample_answers,
};
use formdoc_layout::{LayoutOptions, LayoutRequest, LayoutWarning, SubmissionInfo, decode_logo, layout_document};
use formdoc_model::{
    AnswerMap, AnswerValue, Block, BlockPath, CompanySettings, FieldKind, FormDocument, RevisionBump, Role,
};
use formdoc_report::{OutputFormat, RenderedFile, write_rendered};
use formdoc_store::{FormStore, FormSummary, JsonDirectoryStore, StoreError, Submission};
use formdoc_validate::{FormProgress, SubmissionGate, form_progress, gate_submission};

use crate::cli::{
    AddFieldArgs, AddSectionArgs, AnswerArgs, CompanyArgs, DirectionArg, EditArgs, FormArg, MoveArgs, NewArgs,
    OutputFormatArg, PathArgs, PublishArgs, RenderArgs, SubmitArgs, ValidateArgs,
};

/// Store, acting role and layout settings shared by every command.
pub struct Session {
    store: JsonDirectoryStore,
    role: Role,
    layout: LayoutOptions,
}

impl Session {
    pub fn new(store: JsonDirectoryStore, role: Role, layout: LayoutOptions) -> Self {
        Self { store, role, layout }
    }

    pub fn store(&self) -> &JsonDirectoryStore {
        &self.store
    }

    pub fn role(&self) -> Role {
        self.role
    }

    fn require_author(&self, action: &str) -> Result<()> {
        if self.role.can_author() {
            Ok(())
        } else {
            bail!("role '{}' may not {action}; use --role manager or --role admin", self.role)
        }
    }

    /// Loads a form the acting role may see: authors see drafts too.
    fn load_visible_form(&self, form_id: &str) -> Result<FormDocument> {
        let form = self
            .store
            .load_form(form_id)
            .with_context(|| format!("load form '{form_id}'"))?;
        if !form.published && !self.role.can_author() {
            bail!("form '{form_id}' is not published");
        }
        Ok(form)
    }

    fn save_form(&self, form_id: &str, form: &FormDocument) -> Result<()> {
        self.store
            .save_form(form_id, form)
            .with_context(|| format!("save form '{form_id}'"))
    }
}

/// Result of a structural edit.
#[derive(Debug)]
pub struct Edited {
    pub form: FormDocument,
    /// False when the addressed path did not resolve and nothing changed.
    pub changed: bool,
}

/// Everything `validate` reports.
pub struct ValidationReport {
    pub form: FormDocument,
    pub progress: FormProgress,
    pub gate: SubmissionGate,
}

/// Everything `submit` reports.
pub struct SubmitOutcome {
    pub form: FormDocument,
    pub gate: SubmissionGate,
    /// The stored submission; `None` when empty required fields blocked it.
    pub submission: Option<Submission>,
}

/// Everything `render` reports.
pub struct RenderOutcome {
    pub file: RenderedFile,
    pub warnings: Vec<LayoutWarning>,
}

pub fn run_new(session: &Session, args: &NewArgs) -> Result<FormDocument> {
    let _guard = info_span!("new", form = %args.form_id).entered();
    session.require_author("create forms")?;
    match session.store.load_form(&args.form_id) {
        Ok(_) => bail!("form '{}' already exists", args.form_id),
        Err(StoreError::FormNotFound { .. }) => {}
        Err(err) => return Err(err).with_context(|| format!("check form '{}'", args.form_id)),
    }
    let mut form = new_draft(args.title.clone());
    form.description = args.description.clone().filter(|text| !text.trim().is_empty());
    form.department = args.department.clone().filter(|text| !text.trim().is_empty());
    form.header_on_all_pages = args.header_on_all_pages;
    session.save_form(&args.form_id, &form)?;
    Ok(form)
}

pub fn run_list(session: &Session) -> Result<Vec<FormSummary>> {
    let published_only = !session.role.can_author();
    session
        .store
        .list_forms(published_only)
        .context("list forms")
}

pub fn run_outline(session: &Session, args: &FormArg) -> Result<FormDocument> {
    session.load_visible_form(&args.form_id)
}

pub fn run_add_section(session: &Session, args: &AddSectionArgs) -> Result<Edited> {
    let _guard = info_span!("add_section", form = %args.form_id).entered();
    session.require_author("edit forms")?;
    let parent = match &args.parent {
        Some(parent) => parse_path(parent)?,
        None => BlockPath::root(),
    };
    let mut draft = SectionDraft::default();
    if let Some(title) = &args.title {
        draft.title.clone_from(title);
    }
    draft.description.clone_from(&args.description);
    apply_edit(session, &args.form_id, |blocks| {
        add_section(blocks, &parent, draft).map_err(anyhow::Error::from)
    })
}

pub fn run_add_field(session: &Session, args: &AddFieldArgs) -> Result<Edited> {
    let _guard = info_span!("add_field", form = %args.form_id).entered();
    session.require_author("edit forms")?;
    let parent = parse_path(&args.parent)?;
    let kind = parse_kind(&args.kind)?;
    check_choices(&kind, &args.choices);
    let mut draft = FieldDraft {
        kind,
        required: args.required,
        description: args.description.clone(),
        choices: args.choices.clone(),
        ..FieldDraft::default()
    };
    if let Some(title) = &args.title {
        draft.title.clone_from(title);
    }
    apply_edit(session, &args.form_id, |blocks| {
        add_field(blocks, &parent, draft).map_err(anyhow::Error::from)
    })
}

pub fn run_edit(session: &Session, args: &EditArgs) -> Result<Edited> {
    let _guard = info_span!("edit", form = %args.form_id, path = %args.path).entered();
    session.require_author("edit forms")?;
    let path = parse_path(&args.path)?;
    let kind = args.kind.as_deref().map(parse_kind).transpose()?;
    let field_only = kind.is_some() || args.required.is_some() || !args.choices.is_empty();

    apply_edit(session, &args.form_id, |blocks| {
        if field_only
            && let Some(Block::Section(_)) = formdoc_core::resolve(blocks, &path)
        {
            bail!("block {path} is a section; --kind, --required and --choice apply to fields");
        }
        Ok(edit_block(blocks, &path, |block| {
            let description = args
                .description
                .as_ref()
                .map(|text| Some(text.clone()).filter(|text| !text.trim().is_empty()));
            match block {
                Block::Section(section) => {
                    if let Some(title) = &args.title {
                        section.title.clone_from(title);
                    }
                    if let Some(description) = description {
                        section.description = description;
                    }
                }
                Block::Field(field) => {
                    if let Some(title) = &args.title {
                        field.title.clone_from(title);
                    }
                    if let Some(description) = description {
                        field.description = description;
                    }
                    if let Some(required) = args.required {
                        field.required = required;
                    }
                    if let Some(kind) = kind.clone() {
                        field.kind = kind;
                    }
                    if !args.choices.is_empty() {
                        field.choices.clone_from(&args.choices);
                    }
                    check_choices(&field.kind, &field.choices);
                }
            }
        }))
    })
}

pub fn run_remove(session: &Session, args: &PathArgs) -> Result<Edited> {
    let _guard = info_span!("remove", form = %args.form_id, path = %args.path).entered();
    session.require_author("edit forms")?;
    let path = parse_path(&args.path)?;
    apply_edit(session, &args.form_id, |blocks| {
        delete(blocks, &path).map_err(anyhow::Error::from)
    })
}

pub fn run_move(session: &Session, args: &MoveArgs) -> Result<Edited> {
    let _guard = info_span!("move", form = %args.form_id, path = %args.path).entered();
    session.require_author("edit forms")?;
    let path = parse_path(&args.path)?;
    apply_edit(session, &args.form_id, |blocks| {
        Ok(match args.direction {
            DirectionArg::Up => move_up(blocks, &path),
            DirectionArg::Down => move_down(blocks, &path),
        })
    })
}

pub fn run_publish(session: &Session, args: &PublishArgs) -> Result<FormDocument> {
    let _guard = info_span!("publish", form = %args.form_id).entered();
    session.require_author("publish forms")?;
    let form = session.load_visible_form(&args.form_id)?;
    formdoc_core::check_structure(&form.blocks)
        .with_context(|| format!("form '{}' cannot be published", args.form_id))?;
    let bump = if args.major {
        RevisionBump::Major
    } else {
        RevisionBump::Minor
    };
    let published = publish(&form, bump);
    session.save_form(&args.form_id, &published)?;
    Ok(published)
}

pub fn run_answer(session: &Session, args: &AnswerArgs) -> Result<AnswerMap> {
    let _guard = info_span!("answer", form = %args.form_id, user = %args.user).entered();
    let form = session.load_visible_form(&args.form_id)?;
    let mut answers = session
        .store
        .load_answers(&args.form_id, &args.user)
        .context("load answers")?
        .unwrap_or_default();

    for assignment in &args.values {
        let (field_id, raw) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("expected FIELD_ID=VALUE, got '{assignment}'"))?;
        let field_id = field_id.trim();
        let (_, field) = find_field(&form.blocks, field_id)
            .ok_or_else(|| anyhow!("form '{}' has no field '{field_id}'", args.form_id))?;
        match parse_answer(&field.kind, raw)? {
            Some(value) => {
                answers.insert(field.id.clone(), value);
            }
            None => {
                answers.remove(&field.id);
            }
        }
    }

    session
        .store
        .save_answers(&args.form_id, &args.user, &answers)
        .context("save answers")?;
    Ok(answers)
}

pub fn run_validate(session: &Session, args: &ValidateArgs) -> Result<ValidationReport> {
    let _guard = info_span!("validate", form = %args.form_id, user = %args.user).entered();
    let form = session.load_visible_form(&args.form_id)?;
    let answers = session
        .store
        .load_answers(&args.form_id, &args.user)
        .context("load answers")?
        .unwrap_or_default();
    let progress = form_progress(&form.blocks, &answers);
    let gate = gate_submission(&form.blocks, &answers);
    info!(
        complete = progress.complete,
        total = progress.total,
        blocked = gate.blocked,
        "validated answers"
    );
    Ok(ValidationReport { form, progress, gate })
}

/// Freezes the user's saved answers as their submission, unless required
/// fields are still empty.
pub fn run_submit(session: &Session, args: &SubmitArgs, now: DateTime<Utc>) -> Result<SubmitOutcome> {
    let _guard = info_span!("submit", form = %args.form_id, user = %args.user).entered();
    let form = session.load_visible_form(&args.form_id)?;
    if !form.published {
        bail!("form '{}' is a draft; publish it before submitting answers", args.form_id);
    }
    let answers = session
        .store
        .load_answers(&args.form_id, &args.user)
        .context("load answers")?
        .unwrap_or_default();
    let gate = gate_submission(&form.blocks, &answers);
    if gate.blocked {
        warn!(missing = gate.missing.len(), "submission blocked by empty required fields");
        return Ok(SubmitOutcome {
            form,
            gate,
            submission: None,
        });
    }

    let submission = Submission {
        form_id: args.form_id.clone(),
        user_id: args.user.clone(),
        revision: form.revision,
        answers,
        submitted_at: now,
    };
    session
        .store
        .save_submission(&submission)
        .context("save submission")?;
    Ok(SubmitOutcome {
        form,
        gate,
        submission: Some(submission),
    })
}

pub fn run_render(session: &Session, args: &RenderArgs, today: NaiveDate) -> Result<RenderOutcome> {
    let _guard = info_span!("render", form = %args.form_id).entered();
    let form = session.load_visible_form(&args.form_id)?;
    let mut submission = args.submitted_by.as_deref().map(SubmissionInfo::new);
    let answers = if args.sample {
        sample_answers(&form.blocks)
    } else if let Some(user) = &args.user {
        let submitted = session
            .store
            .load_submission(&args.form_id, user)
            .context("load submission")?;
        match submitted {
            Some(submitted) => {
                if submitted.revision != form.revision {
                    warn!(
                        submitted = %submitted.revision,
                        current = %form.revision,
                        "submission predates the current revision"
                    );
                }
                let name = args.submitted_by.clone().unwrap_or(submitted.user_id);
                submission = Some(SubmissionInfo::new(name).at(submitted.submitted_at));
                submitted.answers
            }
            None => {
                let saved = session
                    .store
                    .load_answers(&args.form_id, user)
                    .context("load answers")?;
                if saved.is_none() {
                    warn!(user = %user, "no submission or saved answers; rendering a blank form");
                }
                saved.unwrap_or_default()
            }
        }
    } else {
        debug!("no answers requested; rendering a blank form");
        AnswerMap::new()
    };
    let company = session
        .store
        .load_company_settings()
        .context("load company settings")?;

    let mut request = LayoutRequest::new(&form, &answers).with_issue_date(today);
    if let Some(company) = &company {
        request = request.with_company(company);
    }
    if let Some(submission) = &submission {
        request = request.with_submission(submission);
    }
    let document = layout_document(&request, &session.layout)
        .with_context(|| format!("lay out form '{}'", args.form_id))?;

    let format = match args.format {
        OutputFormatArg::Pdf => OutputFormat::Pdf,
        OutputFormatArg::Svg => OutputFormat::Svg,
    };
    let output_dir = args.output_dir.as_deref().unwrap_or_else(|| Path::new("."));
    let file = write_rendered(&document, format, output_dir, today).context("write document")?;
    Ok(RenderOutcome {
        file,
        warnings: document.warnings,
    })
}

pub fn run_company(session: &Session, args: &CompanyArgs) -> Result<Option<CompanySettings>> {
    let current = session
        .store
        .load_company_settings()
        .context("load company settings")?;
    let updates = [
        &args.name,
        &args.address,
        &args.contact,
        &args.vat_number,
        &args.approval_number,
        &args.legal_text,
    ];
    if updates.iter().all(|value| value.is_none()) && args.logo.is_none() {
        return Ok(current);
    }

    let _guard = info_span!("company").entered();
    if session.role != Role::Admin {
        bail!("only admins may change company settings");
    }
    let mut settings = current.unwrap_or_default();
    let targets = [
        (&args.name, &mut settings.name),
        (&args.address, &mut settings.address),
        (&args.contact, &mut settings.contact),
        (&args.vat_number, &mut settings.vat_number),
        (&args.approval_number, &mut settings.approval_number),
        (&args.legal_text, &mut settings.legal_text),
    ];
    for (update, target) in targets {
        if let Some(value) = update {
            target.clone_from(value);
        }
    }
    if let Some(path) = &args.logo {
        settings.logo = Some(logo_data_url(path)?);
    }
    session
        .store
        .save_company_settings(&settings)
        .context("save company settings")?;
    Ok(Some(settings))
}

/// Reads an image file and returns it as a `data:` URL, rejecting anything
/// the layout could not embed.
pub fn logo_data_url(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read logo {}", path.display()))?;
    let format = image::guess_format(&bytes)
        .with_context(|| format!("logo {} is not a recognised image", path.display()))?;
    let url = format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(&bytes));
    let image = decode_logo(&url).with_context(|| format!("logo {} is not a usable image", path.display()))?;
    debug!(?format, width = image.width_px, height = image.height_px, "logo accepted");
    Ok(url)
}

/// Loads a form, applies `edit` to its blocks and saves it when anything
/// changed.
fn apply_edit<F>(session: &Session, form_id: &str, edit: F) -> Result<Edited>
where
    F: FnOnce(&[Block]) -> Result<Vec<Block>>,
{
    let mut form = session.load_visible_form(form_id)?;
    let blocks = edit(&form.blocks)?;
    if blocks == form.blocks {
        debug!(form = form_id, "edit left the form unchanged");
        return Ok(Edited { form, changed: false });
    }
    form.blocks = blocks;
    session.save_form(form_id, &form)?;
    Ok(Edited { form, changed: true })
}

fn parse_path(value: &str) -> Result<BlockPath> {
    value
        .parse()
        .with_context(|| format!("parse block path '{value}'"))
}

fn parse_kind(value: &str) -> Result<FieldKind> {
    value
        .parse()
        .with_context(|| format!("parse field kind '{value}'"))
}

fn check_choices(kind: &FieldKind, choices: &[String]) {
    if kind.has_choices() && choices.is_empty() {
        warn!(kind = %kind, "choice field has no choices");
    } else if !kind.has_choices() && !choices.is_empty() {
        warn!(kind = %kind, "choices are ignored for this field kind");
    }
}

/// Converts command-line text to the stored answer shape for `kind`.
///
/// `Ok(None)` for blank input, which clears the answer.
pub fn parse_answer(kind: &FieldKind, raw: &str) -> Result<Option<AnswerValue>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value = match kind {
        FieldKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => AnswerValue::Bool(true),
            "false" | "no" | "n" | "0" => AnswerValue::Bool(false),
            _ => bail!("'{raw}' is not yes or no"),
        },
        FieldKind::MultiChoice => AnswerValue::list(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty()),
        ),
        FieldKind::Number => {
            raw.parse::<f64>()
                .with_context(|| format!("'{raw}' is not a number"))?;
            AnswerValue::text(raw)
        }
        _ => AnswerValue::text(raw),
    };
    Ok(Some(value))
}
