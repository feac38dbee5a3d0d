//! CLI argument definitions for `formdoc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formdoc",
    version,
    about = "Author hierarchical forms, check answers and print them as documents",
    long_about = "Author hierarchical forms, check answers and print them as documents.\n\n\
                  Forms are trees of numbered sections and fields. Filled-in forms are\n\
                  laid out on fixed-size pages and rendered to PDF or SVG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store directory (overrides `[store] dir` in the config file).
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Config file (default: ./formdoc.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Role of the acting user; authoring commands need manager or admin.
    #[arg(long = "role", value_enum, default_value = "admin", global = true)]
    pub role: RoleArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a draft form with one empty section.
    New(NewArgs),

    /// List stored forms (employees only see published ones).
    List,

    /// Show the numbered outline of a form.
    Outline(FormArg),

    /// Append a section to the root or to another section.
    AddSection(AddSectionArgs),

    /// Append a field to a section.
    AddField(AddFieldArgs),

    /// Change a block's title, description or field settings.
    Edit(EditArgs),

    /// Delete a block and everything below it.
    Remove(PathArgs),

    /// Swap a block with its previous or next sibling.
    Move(MoveArgs),

    /// Bump the revision and publish the form.
    Publish(PublishArgs),

    /// Record answers for a user.
    Answer(AnswerArgs),

    /// Show completion per section and the fields blocking submission.
    Validate(ValidateArgs),

    /// Submit a user's answers once every required field is filled.
    Submit(SubmitArgs),

    /// Lay out and render a form with answers or sample data.
    Render(RenderArgs),

    /// Show or update the company branding used in document headers.
    Company(CompanyArgs),
}

#[derive(Args)]
pub struct FormArg {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,
}

#[derive(Args)]
pub struct NewArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    #[arg(long = "title")]
    pub title: String,

    #[arg(long = "description")]
    pub description: Option<String>,

    #[arg(long = "department")]
    pub department: Option<String>,

    /// Repeat the company header on every page instead of the first only.
    #[arg(long = "header-on-all-pages")]
    pub header_on_all_pages: bool,
}

#[derive(Args)]
pub struct AddSectionArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    /// Parent section path such as `2.1` (default: root).
    #[arg(long = "parent", value_name = "PATH")]
    pub parent: Option<String>,

    #[arg(long = "title")]
    pub title: Option<String>,

    #[arg(long = "description")]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct AddFieldArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    /// Path of the section receiving the field.
    #[arg(long = "parent", value_name = "PATH")]
    pub parent: String,

    #[arg(long = "title")]
    pub title: Option<String>,

    /// Field kind: text, textarea, number, date, checkbox, radio,
    /// multiCheckbox, dropdown or signature.
    #[arg(long = "kind", default_value = "text")]
    pub kind: String,

    #[arg(long = "required")]
    pub required: bool,

    #[arg(long = "description")]
    pub description: Option<String>,

    /// Choice label; repeat for each option.
    #[arg(long = "choice", value_name = "LABEL")]
    pub choices: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    #[arg(value_name = "PATH")]
    pub path: String,

    #[arg(long = "title")]
    pub title: Option<String>,

    /// New description; an empty string clears it.
    #[arg(long = "description")]
    pub description: Option<String>,

    #[arg(long = "required")]
    pub required: Option<bool>,

    #[arg(long = "kind")]
    pub kind: Option<String>,

    /// Replacement choice labels; repeat for each option.
    #[arg(long = "choice", value_name = "LABEL")]
    pub choices: Vec<String>,
}

#[derive(Args)]
pub struct PathArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(Args)]
pub struct MoveArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    #[arg(value_name = "PATH")]
    pub path: String,

    #[arg(value_enum)]
    pub direction: DirectionArg,
}

#[derive(Args)]
pub struct PublishArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    /// Start a new major revision instead of bumping the minor number.
    #[arg(long = "major")]
    pub major: bool,
}

#[derive(Args)]
pub struct AnswerArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    #[arg(long = "user", value_name = "USER")]
    pub user: String,

    /// `FIELD_ID=VALUE`; list answers are comma separated, an empty value
    /// clears the answer.
    #[arg(long = "set", value_name = "FIELD_ID=VALUE", required = true)]
    pub values: Vec<String>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    #[arg(long = "user", value_name = "USER")]
    pub user: String,
}

#[derive(Args)]
pub struct SubmitArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    #[arg(long = "user", value_name = "USER")]
    pub user: String,
}

#[derive(Args)]
pub struct RenderArgs {
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    /// Render this user's submission, or their saved answers when they
    /// have not submitted yet.
    #[arg(long = "user", value_name = "USER", conflicts_with = "sample")]
    pub user: Option<String>,

    /// Render a preview filled with generated sample answers.
    #[arg(long = "sample")]
    pub sample: bool,

    #[arg(long = "format", value_enum, default_value = "pdf")]
    pub format: OutputFormatArg,

    /// Output directory (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Name on the "Submitted by" line under the first-page header
    /// (default: the submitting user).
    #[arg(long = "submitted-by", value_name = "NAME")]
    pub submitted_by: Option<String>,
}

#[derive(Args)]
pub struct CompanyArgs {
    #[arg(long = "name")]
    pub name: Option<String>,

    #[arg(long = "address")]
    pub address: Option<String>,

    #[arg(long = "contact")]
    pub contact: Option<String>,

    #[arg(long = "vat-number")]
    pub vat_number: Option<String>,

    #[arg(long = "approval-number")]
    pub approval_number: Option<String>,

    #[arg(long = "legal-text")]
    pub legal_text: Option<String>,

    /// Image file (JPEG, PNG, GIF or BMP) to embed as the header logo.
    #[arg(long = "logo", value_name = "PATH")]
    pub logo: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Employee,
    Manager,
    Admin,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Pdf,
    Svg,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
