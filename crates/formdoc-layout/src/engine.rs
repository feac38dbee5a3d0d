//! Form layout: header policy, section flow, pagination and footers.
//!
//! A layout run walks the block tree once in document order. Sections
//! become shaded bands, fields become two-column rows. Before every
//! section band the engine checks the space left above the footer: below
//! the break threshold, or too little for the band, its description and
//! the first child row, it moves to a new page. Field rows may split
//! across pages line by line. Page footers are stamped last, once the page
//! count is known.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use formdoc_core::{check_structure, numbered_blocks, numbered_title};
use formdoc_model::{AnswerMap, Block, BlockPath, CompanySettings, Field, FormDocument, Section};

use crate::document::{
    Anchor, Color, Document, Element, Font, ImagePlacement, LayoutWarning, Page, Rect, Rule, Span,
    TextLine,
};
use crate::error::{LayoutError, Result};
use crate::format::{field_label, format_checked, format_value};
use crate::logo::{JpegImage, decode_logo};
use crate::metrics::{text_width_mm, truncate_to_width, wrap};
use crate::options::{
    DESCRIPTION_FONT_PT, FIELD_FONT_PT, FIELD_PADDING_MM, FOOTER_FONT_PT, FOOTER_GAP_MM,
    FOOTER_MIN_MM, HEADER_GAP_MM, HEADER_HEIGHT_MM, LOGO_HEIGHT_MM, LOGO_WIDTH_MM, LayoutOptions,
    PT_TO_MM, PageGeometry, REGISTRATION_LINE_MM, ROW_GAP_MM, SECTION_PADDING_MM, line_height_mm,
    section_font_pt,
};

const COMPANY_FONT_PT: f64 = 12.0;
const TITLE_FONT_PT: f64 = 14.0;
const META_FONT_PT: f64 = 9.0;
const REGISTRATION_FONT_PT: f64 = 8.0;
const INTRO_FONT_PT: f64 = 10.0;
const HEADER_RULE_MM: f64 = 0.4;
const ROW_BORDER_MM: f64 = 0.2;
/// Share of the content width the legal text may use in the footer.
const LEGAL_TEXT_SHARE: f64 = 0.7;
/// Smallest content area a page must offer.
const MIN_CONTENT_MM: f64 = 20.0;
/// Rounding slack when a height reserved by a parent header is checked again.
const FIT_TOLERANCE_MM: f64 = 1e-9;

/// Who submitted the answers being printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInfo {
    pub submitted_by: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SubmissionInfo {
    pub fn new(submitted_by: impl Into<String>) -> Self {
        Self {
            submitted_by: submitted_by.into(),
            submitted_at: None,
        }
    }

    pub fn at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = Some(submitted_at);
        self
    }
}

/// Everything a layout run reads. Only the form and answers are required.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    pub form: &'a FormDocument,
    pub answers: &'a AnswerMap,
    pub company: Option<&'a CompanySettings>,
    pub submission: Option<&'a SubmissionInfo>,
    /// Date printed in the header metadata line.
    pub issued_on: Option<NaiveDate>,
}

impl<'a> LayoutRequest<'a> {
    pub fn new(form: &'a FormDocument, answers: &'a AnswerMap) -> Self {
        Self {
            form,
            answers,
            company: None,
            submission: None,
            issued_on: None,
        }
    }

    pub fn with_company(mut self, company: &'a CompanySettings) -> Self {
        self.company = Some(company);
        self
    }

    pub fn with_submission(mut self, submission: &'a SubmissionInfo) -> Self {
        self.submission = Some(submission);
        self
    }

    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issued_on = Some(date);
        self
    }
}

/// Label and value column widths shared by every field row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPlan {
    pub label_width: f64,
    pub value_width: f64,
    pub longest_field_label: usize,
    pub longest_section_label: usize,
}

/// Sizes the label column from the longest numbered field label.
pub fn plan_columns(blocks: &[Block], page: &PageGeometry) -> ColumnPlan {
    let mut longest_field_label = 0;
    let mut longest_section_label = 0;
    for (path, block) in numbered_blocks(blocks) {
        match block {
            Block::Field(field) => {
                longest_field_label = longest_field_label.max(field_label(&path, field).chars().count());
            }
            Block::Section(section) => {
                longest_section_label =
                    longest_section_label.max(numbered_title(&path, &section.title).chars().count());
            }
        }
    }
    let fraction = (0.25 + 0.005 * longest_field_label as f64).clamp(0.35, 0.60);
    let label_width = page.content_width() * fraction;
    ColumnPlan {
        label_width,
        value_width: page.content_width() - label_width,
        longest_field_label,
        longest_section_label,
    }
}

/// Lays out `request` into pages.
///
/// # Errors
///
/// [`LayoutError::InvalidStructure`] when the block tree breaks its
/// invariants, [`LayoutError::PageTooSmall`] when the page geometry leaves
/// no room for content.
pub fn layout_document(request: &LayoutRequest<'_>, options: &LayoutOptions) -> Result<Document> {
    check_structure(&request.form.blocks)?;

    let mut warnings = Vec::new();
    let mut images = Vec::new();
    let header = HeaderBlock::build(request, options, &mut images, &mut warnings);
    let legal_lines = legal_lines(request.company, &options.page);
    let footer_height = footer_height(legal_lines.len());
    check_page(&options.page, &header, footer_height)?;

    let columns = plan_columns(&request.form.blocks, &options.page);
    debug!(
        label_width = columns.label_width,
        longest_field_label = columns.longest_field_label,
        longest_section_label = columns.longest_section_label,
        "column plan"
    );

    let mut flow = Flow::new(request, options, header, columns, footer_height);
    flow.intro();
    for (index, block) in request.form.blocks.iter().enumerate() {
        if let Block::Section(section) = block {
            flow.section(section, &BlockPath::root().nth_child(index));
        }
    }
    let mut pages = flow.finish();
    stamp_footers(&mut pages, &legal_lines, &options.page);

    info!(
        title = %request.form.title,
        pages = pages.len(),
        warnings = warnings.len(),
        "layout complete"
    );
    Ok(Document {
        title: request.form.title.clone(),
        width_mm: options.page.width_mm,
        height_mm: options.page.height_mm,
        pages,
        images,
        warnings,
    })
}

fn check_page(page: &PageGeometry, header: &HeaderBlock, footer_height: f64) -> Result<()> {
    let usable = page.height_mm - 2.0 * page.margin_mm - header.height() - HEADER_GAP_MM - footer_height;
    if page.content_width() <= 2.0 * LOGO_WIDTH_MM || usable < MIN_CONTENT_MM {
        return Err(LayoutError::PageTooSmall {
            width_mm: page.width_mm,
            height_mm: page.height_mm,
            margin_mm: page.margin_mm,
        });
    }
    Ok(())
}

/// Baseline offset of a line of `size_pt` text inside its line box.
fn baseline_in_line(size_pt: f64) -> f64 {
    line_height_mm(size_pt) / 2.0 + 0.3 * size_pt * PT_TO_MM
}

fn text(x: f64, baseline: f64, size_pt: f64, spans: Vec<Span>) -> Element {
    Element::Text(TextLine {
        x,
        baseline,
        size_pt,
        spans,
    })
}

enum LogoSlot {
    Image(usize, JpegImage),
    Placeholder,
    Empty,
}

/// Header chrome, computed once and drawn on every page that carries it.
struct HeaderBlock {
    company_name: String,
    title: String,
    meta: String,
    registration: Option<String>,
    logo: LogoSlot,
}

impl HeaderBlock {
    fn build(
        request: &LayoutRequest<'_>,
        options: &LayoutOptions,
        images: &mut Vec<JpegImage>,
        warnings: &mut Vec<LayoutWarning>,
    ) -> Self {
        let form = request.form;
        let mut meta = vec![format!("Rev. {}", form.revision)];
        if let Some(department) = form.visible_department() {
            meta.push(department.to_string());
        }
        if let Some(date) = request.issued_on.and_then(|date| date.and_hms_opt(0, 0, 0))
            && let Some(printed) = format_checked(&date, &options.date_format)
        {
            meta.push(printed);
        }

        let Some(company) = request.company else {
            warn!("company settings missing; printing blank header chrome");
            warnings.push(LayoutWarning::CompanySettingsMissing);
            return Self {
                company_name: String::new(),
                title: form.title.clone(),
                meta: meta.join(" | "),
                registration: None,
                logo: LogoSlot::Empty,
            };
        };

        let logo = match company.logo.as_deref().map(str::trim).filter(|logo| !logo.is_empty()) {
            None => {
                warn!("no company logo configured");
                warnings.push(LayoutWarning::LogoMissing);
                LogoSlot::Empty
            }
            Some(payload) => match decode_logo(payload) {
                Ok(image) => {
                    images.push(image.clone());
                    LogoSlot::Image(images.len() - 1, image)
                }
                Err(err) => {
                    warn!(error = %err, "company logo unreadable; drawing placeholder");
                    warnings.push(LayoutWarning::LogoUnreadable {
                        reason: err.to_string(),
                    });
                    LogoSlot::Placeholder
                }
            },
        };

        Self {
            company_name: company.name.trim().to_string(),
            title: form.title.clone(),
            meta: meta.join(" | "),
            registration: company.registration_line(),
            logo,
        }
    }

    fn height(&self) -> f64 {
        if self.registration.is_some() {
            HEADER_HEIGHT_MM + REGISTRATION_LINE_MM
        } else {
            HEADER_HEIGHT_MM
        }
    }

    /// Draws the header and returns the first y available for content.
    fn draw(&self, elements: &mut Vec<Element>, page: &PageGeometry) -> f64 {
        let top = page.margin_mm;
        let side_width = LOGO_WIDTH_MM + 5.0;
        let center_width = page.content_width() - 2.0 * side_width;

        if !self.company_name.is_empty() {
            let name = truncate_to_width(&self.company_name, side_width, COMPANY_FONT_PT, Font::Bold);
            elements.push(text(
                page.left(),
                top + 6.0,
                COMPANY_FONT_PT,
                vec![Span::new(name, Font::Bold, Color::TEXT)],
            ));
        }

        let title = truncate_to_width(&self.title, center_width, TITLE_FONT_PT, Font::Bold);
        let width = text_width_mm(&title, TITLE_FONT_PT, Font::Bold);
        elements.push(text(
            page.center() - width / 2.0,
            top + 9.0,
            TITLE_FONT_PT,
            vec![Span::new(title, Font::Bold, Color::BLACK)],
        ));
        let meta = truncate_to_width(&self.meta, center_width, META_FONT_PT, Font::Regular);
        let width = text_width_mm(&meta, META_FONT_PT, Font::Regular);
        elements.push(text(
            page.center() - width / 2.0,
            top + 15.0,
            META_FONT_PT,
            vec![Span::new(meta, Font::Regular, Color::MUTED)],
        ));

        match &self.logo {
            LogoSlot::Image(index, image) => {
                let (width, height) = image.fit(LOGO_WIDTH_MM, LOGO_HEIGHT_MM);
                elements.push(Element::Image(ImagePlacement {
                    image: *index,
                    x: page.right() - width,
                    y: top + (LOGO_HEIGHT_MM - height) / 2.0,
                    width,
                    height,
                }));
            }
            LogoSlot::Placeholder => {
                elements.push(Element::Rect(Rect {
                    x: page.right() - LOGO_WIDTH_MM,
                    y: top,
                    width: LOGO_WIDTH_MM,
                    height: LOGO_HEIGHT_MM,
                    fill: None,
                    stroke: Some(Color::BORDER),
                }));
                let label = "LOGO";
                let width = text_width_mm(label, META_FONT_PT, Font::Regular);
                elements.push(text(
                    page.right() - (LOGO_WIDTH_MM + width) / 2.0,
                    top + LOGO_HEIGHT_MM / 2.0 + 1.0,
                    META_FONT_PT,
                    vec![Span::new(label, Font::Regular, Color::BORDER)],
                ));
            }
            LogoSlot::Empty => {}
        }

        if let Some(registration) = &self.registration {
            let line = truncate_to_width(
                registration,
                page.content_width(),
                REGISTRATION_FONT_PT,
                Font::Regular,
            );
            elements.push(text(
                page.left(),
                top + HEADER_HEIGHT_MM + 2.0,
                REGISTRATION_FONT_PT,
                vec![Span::new(line, Font::Regular, Color::MUTED)],
            ));
        }

        let rule_y = top + self.height();
        elements.push(Element::Rule(Rule {
            x1: page.left(),
            y1: rule_y,
            x2: page.right(),
            y2: rule_y,
            width: HEADER_RULE_MM,
            color: Color::RULE,
        }));
        rule_y + HEADER_GAP_MM
    }
}

/// Cursor state while content flows down the pages.
struct Flow<'a> {
    request: &'a LayoutRequest<'a>,
    options: &'a LayoutOptions,
    header: HeaderBlock,
    columns: ColumnPlan,
    footer_height: f64,
    done: Vec<Page>,
    current: Page,
    y: f64,
    /// Nothing has been placed on the current page yet.
    fresh: bool,
}

impl<'a> Flow<'a> {
    fn new(
        request: &'a LayoutRequest<'a>,
        options: &'a LayoutOptions,
        header: HeaderBlock,
        columns: ColumnPlan,
        footer_height: f64,
    ) -> Self {
        let mut flow = Self {
            request,
            options,
            header,
            columns,
            footer_height,
            done: Vec::new(),
            current: blank_page(0, 0.0, 0.0),
            y: 0.0,
            fresh: true,
        };
        flow.current = flow.open_page(1);
        flow
    }

    fn page(&self) -> &PageGeometry {
        &self.options.page
    }

    /// Page `number` with the header policy applied.
    fn open_page(&mut self, number: usize) -> Page {
        let with_header = number == 1 || self.request.form.header_on_all_pages;
        let content_bottom =
            self.page().height_mm - self.page().margin_mm - self.footer_height - FOOTER_GAP_MM;
        let mut page = blank_page(number, self.page().margin_mm, content_bottom);
        if with_header {
            page.has_header = true;
            page.content_top = self.header.draw(&mut page.elements, &self.options.page);
        }
        self.y = page.content_top;
        self.fresh = true;
        page
    }

    fn new_page(&mut self) {
        let number = self.current.number + 1;
        let next = self.open_page(number);
        self.done.push(std::mem::replace(&mut self.current, next));
        debug!(page = number, header = self.current.has_header, "page break");
    }

    fn remaining(&self) -> f64 {
        self.current.content_bottom - self.y
    }

    fn push(&mut self, element: Element) {
        self.current.elements.push(element);
        self.fresh = false;
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.current);
        self.done
    }

    /// Submission line and form description on the first page.
    fn intro(&mut self) {
        let left = self.page().left();
        let width = self.page().content_width();
        if let Some(submission) = self.request.submission {
            let mut line = format!("Submitted by {}", submission.submitted_by);
            let pattern = format!("{} %H:%M", self.options.date_format);
            if let Some(at) = submission
                .submitted_at
                .and_then(|at| format_checked(&at.naive_utc(), &pattern))
            {
                line.push_str(&format!(" on {at}"));
            }
            let lh = line_height_mm(META_FONT_PT);
            let baseline = self.y + baseline_in_line(META_FONT_PT);
            self.push(text(
                left,
                baseline,
                META_FONT_PT,
                vec![Span::new(line, Font::Oblique, Color::MUTED)],
            ));
            self.y += lh + ROW_GAP_MM;
        }
        if let Some(description) = self.request.form.visible_description() {
            let lh = line_height_mm(INTRO_FONT_PT);
            for line in wrap(description, width, INTRO_FONT_PT, Font::Regular) {
                if self.remaining() < lh {
                    self.new_page();
                }
                let baseline = self.y + baseline_in_line(INTRO_FONT_PT);
                self.push(text(
                    left,
                    baseline,
                    INTRO_FONT_PT,
                    vec![Span::new(line, Font::Regular, Color::TEXT)],
                ));
                self.y += lh;
            }
            self.y += 2.0 * ROW_GAP_MM;
        }
    }

    fn section(&mut self, section: &Section, path: &BlockPath) {
        let page = *self.page();
        let threshold = self.options.break_threshold_mm;
        let SectionHead {
            number,
            size,
            lines,
            band_height,
            description,
            description_height,
        } = SectionHead::measure(section, path, &page);
        let lh = line_height_mm(size);

        let needed = band_height
            + ROW_GAP_MM
            + description_height
            + lead_height(section.children.first(), &path.nth_child(0), &page, threshold);
        let remaining = self.remaining() + FIT_TOLERANCE_MM;
        if !self.fresh && (remaining < threshold || remaining < needed) {
            debug!(section = %number, remaining, needed, "section header moved to next page");
            self.new_page();
        }

        let top = self.y;
        self.push(Element::Rect(Rect {
            x: page.left(),
            y: top,
            width: page.content_width(),
            height: band_height,
            fill: Some(Color::section_fill(section.level)),
            stroke: None,
        }));
        for (index, line) in lines.iter().enumerate() {
            let spans = match line.strip_prefix(number.as_str()) {
                Some(rest) if index == 0 => vec![
                    Span::new(number.clone(), Font::Bold, Color::MUTED),
                    Span::new(rest, Font::Bold, Color::TEXT),
                ],
                _ => vec![Span::new(line.clone(), Font::Bold, Color::TEXT)],
            };
            let width = text_width_mm(line, size, Font::Bold);
            let baseline = top + SECTION_PADDING_MM + index as f64 * lh + baseline_in_line(size);
            self.push(text(page.center() - width / 2.0, baseline, size, spans));
        }
        self.current.anchors.push(Anchor {
            path: number,
            title: section.title.clone(),
            level: section.level,
            y: top,
        });
        self.y += band_height + ROW_GAP_MM;

        let description_lh = line_height_mm(DESCRIPTION_FONT_PT);
        for line in description {
            let baseline = self.y + baseline_in_line(DESCRIPTION_FONT_PT);
            self.push(text(
                page.left(),
                baseline,
                DESCRIPTION_FONT_PT,
                vec![Span::new(line, Font::Oblique, Color::MUTED)],
            ));
            self.y += description_lh;
        }
        if description_height > 0.0 {
            self.y += ROW_GAP_MM;
        }

        for (index, child) in section.children.iter().enumerate() {
            let child_path = path.nth_child(index);
            match child {
                Block::Section(child) => self.section(child, &child_path),
                Block::Field(field) => self.field_row(field, &child_path),
            }
        }
    }

    fn field_row(&mut self, field: &Field, path: &BlockPath) {
        let page = *self.page();
        let label_width = self.columns.label_width;
        let inner_label = label_width - 2.0 * FIELD_PADDING_MM;
        let inner_value = self.columns.value_width - 2.0 * FIELD_PADDING_MM;

        let mut label_lines: Vec<Span> = wrap(&field_label(path, field), inner_label, FIELD_FONT_PT, Font::Bold)
            .into_iter()
            .map(|line| Span::new(line, Font::Bold, Color::TEXT))
            .collect();
        if let Some(description) = field.description.as_deref().map(str::trim).filter(|body| !body.is_empty()) {
            label_lines.extend(
                wrap(description, inner_label, FIELD_FONT_PT, Font::Oblique)
                    .into_iter()
                    .map(|line| Span::new(line, Font::Oblique, Color::MUTED)),
            );
        }
        let value = format_value(field, self.request.answers.get(&field.id), &self.options.date_format);
        let value_lines = wrap(&value, inner_value, FIELD_FONT_PT, Font::Regular);

        let total = label_lines.len().max(value_lines.len()).max(1);
        let lh = line_height_mm(FIELD_FONT_PT);
        let mut start = 0;
        while start < total {
            let available = self.remaining() - 2.0 * FIELD_PADDING_MM;
            let mut fit = if available > 0.0 {
                (available / lh + 1e-9).floor() as usize
            } else {
                0
            };
            if fit == 0 {
                if !self.fresh {
                    self.new_page();
                    continue;
                }
                fit = 1;
            }
            let count = fit.min(total - start);
            let top = self.y;
            let height = count as f64 * lh + 2.0 * FIELD_PADDING_MM;
            self.push(Element::Rect(Rect {
                x: page.left(),
                y: top,
                width: page.content_width(),
                height,
                fill: None,
                stroke: Some(Color::BORDER),
            }));
            self.push(Element::Rule(Rule {
                x1: page.left() + label_width,
                y1: top,
                x2: page.left() + label_width,
                y2: top + height,
                width: ROW_BORDER_MM,
                color: Color::BORDER,
            }));
            for offset in 0..count {
                let baseline = top + FIELD_PADDING_MM + offset as f64 * lh + baseline_in_line(FIELD_FONT_PT);
                if let Some(span) = label_lines.get(start + offset) {
                    self.push(text(
                        page.left() + FIELD_PADDING_MM,
                        baseline,
                        FIELD_FONT_PT,
                        vec![span.clone()],
                    ));
                }
                if let Some(line) = value_lines.get(start + offset) {
                    self.push(text(
                        page.left() + label_width + FIELD_PADDING_MM,
                        baseline,
                        FIELD_FONT_PT,
                        vec![Span::new(line.clone(), Font::Regular, Color::TEXT)],
                    ));
                }
            }
            self.y = top + height;
            start += count;
            if start < total {
                debug!(field = %field.id, line = start, "field row continues on next page");
                self.new_page();
            }
        }
        self.y += ROW_GAP_MM;
    }
}

fn blank_page(number: usize, content_top: f64, content_bottom: f64) -> Page {
    Page {
        number,
        has_header: false,
        content_top,
        content_bottom,
        elements: Vec::new(),
        anchors: Vec::new(),
    }
}

/// Title band and description of a section header, measured before placement.
struct SectionHead {
    number: String,
    size: f64,
    lines: Vec<String>,
    band_height: f64,
    description: Vec<String>,
    description_height: f64,
}

impl SectionHead {
    fn measure(section: &Section, path: &BlockPath, page: &PageGeometry) -> Self {
        let size = section_font_pt(section.level);
        let lines = wrap(
            &numbered_title(path, &section.title),
            page.content_width() - 2.0 * SECTION_PADDING_MM,
            size,
            Font::Bold,
        );
        let band_height = lines.len().max(1) as f64 * line_height_mm(size) + 2.0 * SECTION_PADDING_MM;
        let description = section
            .visible_description()
            .map(|body| wrap(body, page.content_width(), DESCRIPTION_FONT_PT, Font::Oblique))
            .unwrap_or_default();
        let description_height = if description.is_empty() {
            0.0
        } else {
            description.len() as f64 * line_height_mm(DESCRIPTION_FONT_PT) + ROW_GAP_MM
        };
        Self {
            number: path.to_string(),
            size,
            lines,
            band_height,
            description,
            description_height,
        }
    }

    /// Distance from the top of the band to the first child.
    fn height(&self) -> f64 {
        self.band_height + ROW_GAP_MM + self.description_height
    }
}

/// Height a section must keep with its header: the first field line, or for
/// a leading subsection whatever that subsection's own break check demands.
fn lead_height(first: Option<&Block>, path: &BlockPath, page: &PageGeometry, threshold: f64) -> f64 {
    match first {
        None => 0.0,
        Some(Block::Field(_)) => line_height_mm(FIELD_FONT_PT) + 2.0 * FIELD_PADDING_MM,
        Some(Block::Section(section)) => {
            let chain = SectionHead::measure(section, path, page).height()
                + lead_height(section.children.first(), &path.nth_child(0), page, threshold);
            chain.max(threshold)
        }
    }
}

fn legal_lines(company: Option<&CompanySettings>, page: &PageGeometry) -> Vec<String> {
    company
        .and_then(CompanySettings::visible_legal_text)
        .map(|legal| {
            wrap(
                legal,
                page.content_width() * LEGAL_TEXT_SHARE,
                FOOTER_FONT_PT,
                Font::Regular,
            )
        })
        .unwrap_or_default()
}

fn footer_height(legal_lines: usize) -> f64 {
    let lines = legal_lines.max(1) as f64;
    (lines * line_height_mm(FOOTER_FONT_PT) + 1.0).max(FOOTER_MIN_MM)
}

/// "Page N of total" bottom right, legal text bottom left.
fn stamp_footers(pages: &mut [Page], legal_lines: &[String], page: &PageGeometry) {
    let total = pages.len();
    let baseline = page.height_mm - page.margin_mm;
    let lh = line_height_mm(FOOTER_FONT_PT);
    for current in pages.iter_mut() {
        let label = format!("Page {} of {total}", current.number);
        let width = text_width_mm(&label, FOOTER_FONT_PT, Font::Regular);
        current.elements.push(text(
            page.right() - width,
            baseline,
            FOOTER_FONT_PT,
            vec![Span::new(label, Font::Regular, Color::MUTED)],
        ));
        let first = baseline - lh * legal_lines.len().saturating_sub(1) as f64;
        for (index, line) in legal_lines.iter().enumerate() {
            current.elements.push(text(
                page.left(),
                first + index as f64 * lh,
                FOOTER_FONT_PT,
                vec![Span::new(line.clone(), Font::Regular, Color::MUTED)],
            ));
        }
    }
}
