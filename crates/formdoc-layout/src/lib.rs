//! Document layout for forms.
//!
//! [`layout_document`] turns a form, its answers and the company branding
//! into a [`Document`]: fixed-size pages of positioned text, rectangles,
//! rules and images. The document knows nothing about output formats;
//! renderers in `formdoc-report` turn it into PDF or SVG.

mod document;
mod engine;
mod error;
mod format;
mod logo;
mod metrics;
mod options;

pub use document::{
    Anchor, Color, Document, Element, Font, ImagePlacement, LayoutWarning, Page, Rect, Rule, Span,
    TextLine,
};
pub use engine::{ColumnPlan, LayoutRequest, SubmissionInfo, layout_document, plan_columns};
pub use error::{LayoutError, Result};
pub use format::{field_label, format_date, format_value};
pub use logo::{JpegImage, LogoError, decode_logo};
pub use metrics::{text_width_mm, truncate_to_width, wrap};
pub use options::{LayoutOptions, PT_TO_MM, PageGeometry, line_height_mm, section_font_pt};
