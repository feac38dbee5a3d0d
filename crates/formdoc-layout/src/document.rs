//! The laid-out document: pages of positioned drawing primitives.
//!
//! Coordinates are millimetres from the top-left corner of the page. Text
//! is positioned by the left end of its baseline; renderers draw the spans
//! of a line one after another.

use serde::Serialize;

use crate::logo::JpegImage;
use crate::metrics::text_width_mm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);
    pub const TEXT: Color = Color::gray(0.1);
    pub const MUTED: Color = Color::gray(0.45);
    pub const RULE: Color = Color::gray(0.6);
    pub const BORDER: Color = Color::gray(0.78);

    pub const fn gray(level: f64) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Section band fill, lighter for deeper levels.
    pub fn section_fill(level: u8) -> Self {
        match level {
            0 | 1 => Color::rgb(0.85, 0.88, 0.92),
            2 => Color::rgb(0.90, 0.92, 0.95),
            _ => Color::rgb(0.94, 0.95, 0.97),
        }
    }

    /// `#rrggbb` form used by the SVG renderer.
    pub fn to_hex(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub font: Font,
    pub color: Color,
}

impl Span {
    pub fn new(text: impl Into<String>, font: Font, color: Color) -> Self {
        Self {
            text: text.into(),
            font,
            color,
        }
    }
}

/// One line of text, possibly mixing fonts and colours on a shared baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub x: f64,
    pub baseline: f64,
    pub size_pt: f64,
    pub spans: Vec<Span>,
}

impl TextLine {
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn width_mm(&self) -> f64 {
        self.spans
            .iter()
            .map(|span| text_width_mm(&span.text, self.size_pt, span.font))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub color: Color,
}

/// Placement of an image from [`Document::images`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlacement {
    pub image: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Text(TextLine),
    Rect(Rect),
    Rule(Rule),
    Image(ImagePlacement),
}

/// Where a section header landed; used for navigation and bookmarks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub path: String,
    pub title: String,
    pub level: u8,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub has_header: bool,
    /// First y available for content below the header (or top margin).
    pub content_top: f64,
    /// Lowest y content may reach above the footer band.
    pub content_bottom: f64,
    pub elements: Vec<Element>,
    pub anchors: Vec<Anchor>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextLine> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(line) => Some(line),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|line| line.plain_text().contains(needle))
    }
}

/// Asset problems the layout worked around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    CompanySettingsMissing,
    LogoMissing,
    LogoUnreadable { reason: String },
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutWarning::CompanySettingsMissing => {
                write!(f, "company settings missing; header left blank")
            }
            LayoutWarning::LogoMissing => write!(f, "no company logo configured"),
            LayoutWarning::LogoUnreadable { reason } => {
                write!(f, "company logo unreadable ({reason}); placeholder drawn")
            }
        }
    }
}

/// A fully paginated document, independent of any output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub pages: Vec<Page>,
    pub images: Vec<JpegImage>,
    pub warnings: Vec<LayoutWarning>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page number holding the section header numbered `path`.
    pub fn page_of_section(&self, path: &str) -> Option<usize> {
        self.pages
            .iter()
            .find(|page| page.anchors.iter().any(|anchor| anchor.path == path))
            .map(|page| page.number)
    }
}
