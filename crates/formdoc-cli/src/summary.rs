//! Terminal output for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use formdoc_core::{find_field, numbered_blocks, numbered_title};
use formdoc_model::{Block, BlockPath, CompanySettings, FormDocument};
use formdoc_store::FormSummary;

use formdoc_validate::SubmissionGate;

use crate::commands::{Edited, RenderOutcome, SubmitOutcome, ValidationReport};

/// One row per block: path, kind, title, required marker, identifier.
pub fn outline_rows(form: &FormDocument) -> Vec<[String; 5]> {
    numbered_blocks(&form.blocks)
        .into_iter()
        .map(|(path, block)| {
            let indent = "  ".repeat(path.depth().saturating_sub(1));
            match block {
                Block::Section(section) => [
                    path.to_string(),
                    "section".to_string(),
                    format!("{indent}{}", section.title),
                    String::new(),
                    section.id.clone(),
                ],
                Block::Field(field) => [
                    path.to_string(),
                    field.kind.as_str().to_string(),
                    format!("{indent}{}", field.title),
                    if field.required { "yes" } else { "" }.to_string(),
                    field.id.clone(),
                ],
            }
        })
        .collect()
}

pub fn print_outline(form: &FormDocument) {
    let state = if form.published { "published" } else { "draft" };
    println!("{} (rev. {}, {state})", form.title, form.revision);
    if let Some(department) = form.visible_department() {
        println!("Department: {department}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Path"),
        header_cell("Kind"),
        header_cell("Title"),
        header_cell("Required"),
        header_cell("Id"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for [path, kind, title, required, id] in outline_rows(form) {
        let is_section = kind == "section";
        let title_cell = if is_section {
            Cell::new(title).add_attribute(Attribute::Bold)
        } else {
            Cell::new(title)
        };
        table.add_row(vec![
            Cell::new(path),
            dim_cell(kind),
            title_cell,
            Cell::new(required).fg(Color::Yellow),
            dim_cell(id),
        ]);
    }
    println!("{table}");
}

pub fn print_edited(edited: &Edited) {
    if !edited.changed {
        eprintln!("warning: path did not resolve; form unchanged");
    }
    print_outline(&edited.form);
}

pub fn print_forms(forms: &[FormSummary]) {
    if forms.is_empty() {
        println!("No forms.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Title"),
        header_cell("Revision"),
        header_cell("State"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for form in forms {
        let state = if form.published {
            Cell::new("published").fg(Color::Green)
        } else {
            dim_cell("draft")
        };
        table.add_row(vec![
            Cell::new(&form.id),
            Cell::new(&form.title),
            Cell::new(form.revision),
            state,
        ]);
    }
    println!("{table}");
}

pub fn print_validation(report: &ValidationReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Complete"),
        header_cell("Valid"),
        header_cell("Has data"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Center);
    }
    let sections = report.form.root_sections().zip(&report.progress.sections);
    for (number, (section, progress)) in sections.enumerate() {
        let label = numbered_title(&BlockPath::root().nth_child(number), &section.title);
        table.add_row(vec![
            Cell::new(label),
            flag_cell(progress.is_complete, Color::Green),
            flag_cell(progress.is_valid, Color::Green),
            flag_cell(progress.has_any_data, Color::Cyan),
            count_cell(progress.errors.len()),
        ]);
    }
    println!("{table}");
    println!(
        "Progress: {} of {} sections complete ({:.0}%)",
        report.progress.complete,
        report.progress.total,
        report.progress.percentage()
    );

    if report.gate.blocked {
        print_missing(&report.form, &report.gate);
    } else {
        println!("Ready to submit.");
    }
}

pub fn print_submission(outcome: &SubmitOutcome) {
    match &outcome.submission {
        Some(submission) => println!(
            "Submitted '{}' (revision {}) for {} at {}",
            outcome.form.title,
            submission.revision,
            submission.user_id,
            submission.submitted_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => print_missing(&outcome.form, &outcome.gate),
    }
}

fn print_missing(form: &FormDocument, gate: &SubmissionGate) {
    eprintln!("Submission blocked; required fields are empty:");
    for field_id in gate.missing_ids() {
        match find_field(&form.blocks, field_id) {
            Some((path, field)) => eprintln!("- {} ({field_id})", numbered_title(&path, &field.title)),
            None => eprintln!("- {field_id}"),
        }
    }
}

pub fn print_rendered(outcome: &RenderOutcome) {
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    let file = &outcome.file;
    println!("Output: {}", file.path.display());
    println!("Format: {}", file.format);
    println!("Pages: {}", file.pages);
    println!("Size: {} bytes", file.bytes);
    println!("SHA-256: {}", file.sha256);
}

pub fn print_company(settings: Option<&CompanySettings>) {
    let Some(settings) = settings else {
        println!("No company settings saved.");
        return;
    };
    let mut table = Table::new();
    apply_table_style(&mut table);
    let logo = match &settings.logo {
        Some(logo) => format!("{} bytes (base64)", logo.len()),
        None => String::new(),
    };
    for (label, value) in [
        ("Name", settings.name.as_str()),
        ("Address", settings.address.as_str()),
        ("Contact", settings.contact.as_str()),
        ("VAT number", settings.vat_number.as_str()),
        ("Approval number", settings.approval_number.as_str()),
        ("Legal text", settings.legal_text.as_str()),
        ("Logo", logo.as_str()),
    ] {
        table.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(value: bool, color: Color) -> Cell {
    if value {
        Cell::new("yes").fg(color)
    } else {
        dim_cell("no")
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
