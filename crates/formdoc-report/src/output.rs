//! Output file naming, checksums and writing rendered bytes to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use formdoc_layout::Document;

use crate::error::{RenderError, Result};
use crate::format::OutputFormat;
use crate::pdf::render_pdf;
use crate::svg::render_svg;

/// `<title>_<YYYY-MM-DD>.<ext>`, with the title lowercased and every
/// character other than an ASCII letter or digit replaced by `_`.
pub fn output_file_name(title: &str, date: NaiveDate, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_{}.{extension}", date.format("%Y-%m-%d"))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Renders `document` in `format`.
pub fn render(document: &Document, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Pdf => render_pdf(document),
        OutputFormat::Svg => render_svg(document),
    }
}

/// A file written by [`write_rendered`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub pages: usize,
    pub bytes: usize,
    pub sha256: String,
}

/// Renders `document` and writes it into `output_dir` under its dated name.
pub fn write_rendered(
    document: &Document,
    format: OutputFormat,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<RenderedFile> {
    let bytes = render(document, format)?;
    fs::create_dir_all(output_dir).map_err(|source| RenderError::WriteOutput {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(output_file_name(&document.title, date, format.extension()));
    fs::write(&path, &bytes).map_err(|source| RenderError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    let file = RenderedFile {
        sha256: sha256_hex(&bytes),
        bytes: bytes.len(),
        pages: document.page_count(),
        format,
        path,
    };
    info!(
        path = %file.path.display(),
        format = %format,
        pages = file.pages,
        bytes = file.bytes,
        "rendered document written"
    );
    Ok(file)
}
