//! Page geometry and layout tunables.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const PT_TO_MM: f64 = 0.3528;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.25;

/// Header block height on pages that carry one.
pub const HEADER_HEIGHT_MM: f64 = 30.0;
/// Extra header height when the company registration line is printed.
pub const REGISTRATION_LINE_MM: f64 = 5.0;
/// Gap between the header rule and the first content row.
pub const HEADER_GAP_MM: f64 = 4.0;
pub const LOGO_WIDTH_MM: f64 = 40.0;
pub const LOGO_HEIGHT_MM: f64 = 20.0;

/// Minimum height reserved at the bottom of every page for the footer.
pub const FOOTER_MIN_MM: f64 = 6.0;
pub const FOOTER_GAP_MM: f64 = 2.0;
pub const FOOTER_FONT_PT: f64 = 8.0;

pub const FIELD_FONT_PT: f64 = 10.0;
pub const FIELD_PADDING_MM: f64 = 2.0;
pub const SECTION_FONT_PT: f64 = 13.0;
pub const SECTION_FONT_STEP_PT: f64 = 1.5;
pub const SECTION_PADDING_MM: f64 = 2.0;
pub const DESCRIPTION_FONT_PT: f64 = 9.0;
/// Vertical space after each section band, description and field row.
pub const ROW_GAP_MM: f64 = 1.5;

/// Physical page and margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_mm: f64,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 15.0,
    };

    pub fn content_width(&self) -> f64 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn left(&self) -> f64 {
        self.margin_mm
    }

    pub fn right(&self) -> f64 {
        self.width_mm - self.margin_mm
    }

    pub fn center(&self) -> f64 {
        self.width_mm / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Options for a layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub page: PageGeometry,
    /// A section header never starts with less space than this left above
    /// the footer, unless the page is still empty.
    pub break_threshold_mm: f64,
    /// chrono format string for date answers and header dates.
    pub date_format: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page: PageGeometry::A4,
            break_threshold_mm: 25.0,
            date_format: "%d %b %Y".to_string(),
        }
    }
}

impl LayoutOptions {
    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    pub fn with_break_threshold(mut self, threshold_mm: f64) -> Self {
        self.break_threshold_mm = threshold_mm;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

/// Height of one text line at `size_pt`.
pub fn line_height_mm(size_pt: f64) -> f64 {
    size_pt * PT_TO_MM * LINE_HEIGHT
}

/// Font size of a section header at `level` (1-based).
pub fn section_font_pt(level: u8) -> f64 {
    SECTION_FONT_PT - SECTION_FONT_STEP_PT * f64::from(level.saturating_sub(1))
}
