//! Renderers for laid-out documents.
//!
//! - **PDF**: built with `pdf-writer`, using the standard Helvetica faces
//! - **SVG**: all pages stacked in one drawing, for quick inspection
//!
//! Both consume a [`formdoc_layout::Document`] and never re-flow it.

mod error;
mod format;
mod output;
mod pdf;
mod svg;

pub use error::{RenderError, Result};
pub use format::OutputFormat;
pub use output::{RenderedFile, output_file_name, render, sha256_hex, write_rendered};
pub use pdf::render_pdf;
pub use svg::{PAGE_GAP_MM, render_svg, write_svg};
