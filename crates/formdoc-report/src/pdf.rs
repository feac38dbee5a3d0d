//! PDF writer.
//!
//! Writes the document with the three standard Helvetica faces (no font
//! embedding, WinAnsi encoding) and the logo passed through with
//! `DCTDecode`. Layout coordinates are millimetres from the top-left;
//! PDF user space is points from the bottom-left.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use formdoc_layout::{Color, Document, Element, Font, ImagePlacement, JpegImage, Page, Rule, TextLine};

use crate::error::{RenderError, Result};

const PRODUCER: &str = "formdoc";

/// Points per millimetre.
const MM: f64 = 72.0 / 25.4;

const STROKE_WIDTH_MM: f64 = 0.2;

const FONTS: [(Font, &str); 3] = [
    (Font::Regular, "Helvetica"),
    (Font::Bold, "Helvetica-Bold"),
    (Font::Oblique, "Helvetica-Oblique"),
];

/// Hands out object ids in writing order.
struct Refs(i32);

impl Refs {
    fn next(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

/// Renders `document` to PDF bytes.
pub fn render_pdf(document: &Document) -> Result<Vec<u8>> {
    if document.pages.is_empty() {
        return Err(RenderError::NoPages);
    }
    let mut pdf = Pdf::new();
    let mut refs = Refs(0);
    let catalog_id = refs.next();
    let pages_id = refs.next();
    let font_ids: Vec<Ref> = FONTS.iter().map(|_| refs.next()).collect();
    let info_id = refs.next();
    let image_ids: Vec<Ref> = document.images.iter().map(|_| refs.next()).collect();
    let page_ids: Vec<(Ref, Ref)> = document.pages.iter().map(|_| (refs.next(), refs.next())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(i32::try_from(page_ids.len()).unwrap_or(i32::MAX));

    for ((_, base_font), id) in FONTS.iter().zip(&font_ids) {
        pdf.type1_font(*id)
            .base_font(Name(base_font.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    pdf.document_info(info_id)
        .title(TextStr(&document.title))
        .producer(TextStr(PRODUCER));

    for (image, id) in document.images.iter().zip(&image_ids) {
        write_image(&mut pdf, *id, image);
    }

    let font_names: Vec<String> = FONTS.iter().map(|(font, _)| font_resource(*font)).collect();
    let image_names: Vec<String> = (0..document.images.len()).map(image_resource).collect();
    let media_box = Rect::new(0.0, 0.0, pt(document.width_mm), pt(document.height_mm));

    for (page, (page_id, content_id)) in document.pages.iter().zip(&page_ids) {
        {
            let mut writer = pdf.page(*page_id);
            writer.media_box(media_box).parent(pages_id).contents(*content_id);
            let mut resources = writer.resources();
            {
                let mut fonts = resources.fonts();
                for (name, id) in font_names.iter().zip(&font_ids) {
                    fonts.pair(Name(name.as_bytes()), *id);
                }
            }
            if !image_ids.is_empty() {
                let mut objects = resources.x_objects();
                for (name, id) in image_names.iter().zip(&image_ids) {
                    objects.pair(Name(name.as_bytes()), *id);
                }
            }
        }

        let content = page_content(page, document.height_mm);
        pdf.stream(*content_id, &content.finish());
    }

    let bytes = pdf.finish();
    debug!(pages = document.pages.len(), images = document.images.len(), bytes = bytes.len(), "pdf written");
    Ok(bytes)
}

fn write_image(pdf: &mut Pdf, id: Ref, image: &JpegImage) {
    let mut xobject = pdf.image_xobject(id, &image.data);
    xobject.filter(Filter::DctDecode);
    xobject.width(i32::try_from(image.width_px).unwrap_or(i32::MAX));
    xobject.height(i32::try_from(image.height_px).unwrap_or(i32::MAX));
    if image.components == 1 {
        xobject.color_space().device_gray();
    } else {
        xobject.color_space().device_rgb();
    }
    xobject.bits_per_component(8);
}

/// Drawing operators for one page.
fn page_content(page: &Page, height_mm: f64) -> Content {
    let mut content = Content::new();
    for element in &page.elements {
        match element {
            Element::Rect(rect) => draw_rect(&mut content, rect, height_mm),
            Element::Rule(rule) => draw_rule(&mut content, rule, height_mm),
            Element::Image(image) => draw_image(&mut content, image, height_mm),
            Element::Text(line) => draw_text(&mut content, line, height_mm),
        }
    }
    content
}

fn draw_rect(content: &mut Content, rect: &formdoc_layout::Rect, height_mm: f64) {
    if rect.fill.is_none() && rect.stroke.is_none() {
        return;
    }
    content.save_state();
    if let Some(fill) = rect.fill {
        let [r, g, b] = rgb(fill);
        content.set_fill_rgb(r, g, b);
    }
    if let Some(stroke) = rect.stroke {
        let [r, g, b] = rgb(stroke);
        content.set_stroke_rgb(r, g, b).set_line_width(pt(STROKE_WIDTH_MM));
    }
    content.rect(
        pt(rect.x),
        pt(height_mm - rect.y - rect.height),
        pt(rect.width),
        pt(rect.height),
    );
    match (rect.fill, rect.stroke) {
        (Some(_), Some(_)) => content.fill_nonzero_and_stroke(),
        (Some(_), None) => content.fill_nonzero(),
        _ => content.stroke(),
    };
    content.restore_state();
}

fn draw_rule(content: &mut Content, rule: &Rule, height_mm: f64) {
    let [r, g, b] = rgb(rule.color);
    content
        .save_state()
        .set_stroke_rgb(r, g, b)
        .set_line_width(pt(rule.width))
        .move_to(pt(rule.x1), pt(height_mm - rule.y1))
        .line_to(pt(rule.x2), pt(height_mm - rule.y2))
        .stroke()
        .restore_state();
}

fn draw_image(content: &mut Content, image: &ImagePlacement, height_mm: f64) {
    let name = image_resource(image.image);
    content
        .save_state()
        .transform([
            pt(image.width),
            0.0,
            0.0,
            pt(image.height),
            pt(image.x),
            pt(height_mm - image.y - image.height),
        ])
        .x_object(Name(name.as_bytes()))
        .restore_state();
}

fn draw_text(content: &mut Content, line: &TextLine, height_mm: f64) {
    content
        .begin_text()
        .set_text_matrix([1.0, 0.0, 0.0, 1.0, pt(line.x), pt(height_mm - line.baseline)]);
    for span in &line.spans {
        let name = font_resource(span.font);
        let [r, g, b] = rgb(span.color);
        let text = win_ansi_bytes(&span.text);
        content
            .set_font(Name(name.as_bytes()), line.size_pt as f32)
            .set_fill_rgb(r, g, b)
            .show(Str(&text));
    }
    content.end_text();
}

fn font_resource(font: Font) -> String {
    match font {
        Font::Regular => "F1",
        Font::Bold => "F2",
        Font::Oblique => "F3",
    }
    .to_string()
}

fn image_resource(index: usize) -> String {
    format!("Im{index}")
}

fn pt(mm: f64) -> f32 {
    (mm * MM) as f32
}

fn rgb(color: Color) -> [f32; 3] {
    [color.r as f32, color.g as f32, color.b as f32]
}

/// Encodes text for the standard fonts; characters outside WinAnsi become `?`.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi).collect()
}

fn win_ansi(ch: char) -> u8 {
    match ch {
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_page(elements: Vec<Element>, images: Vec<JpegImage>) -> Document {
        Document {
            title: "Logo".to_string(),
            width_mm: 210.0,
            height_mm: 297.0,
            pages: vec![Page {
                number: 1,
                has_header: true,
                content_top: 30.0,
                content_bottom: 280.0,
                elements,
                anchors: Vec::new(),
            }],
            images,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn text_is_encoded_for_standard_fonts() {
        assert_eq!(win_ansi_bytes("Ærø"), vec![0xc6, b'r', 0xf8]);
        assert_eq!(win_ansi_bytes("日本"), b"??".to_vec());
        assert_eq!(win_ansi_bytes("5 – 6"), vec![b'5', b' ', 0x96, b' ', b'6']);
    }

    #[test]
    fn logo_is_embedded_as_dct_image() {
        let logo = JpegImage {
            data: vec![0xff, 0xd8, 0xff, 0xd9],
            width_px: 200,
            height_px: 50,
            components: 3,
        };
        let placement = Element::Image(ImagePlacement {
            image: 0,
            x: 10.0,
            y: 10.0,
            width: 40.0,
            height: 10.0,
        });
        let pdf = render_pdf(&one_page(vec![placement], vec![logo])).unwrap();
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Filter /DCTDecode"));
        assert!(text.contains("/ColorSpace /DeviceRGB"));
        assert!(text.contains("/Im0 Do"));
        assert!(text.contains("/XObject"));
    }

    #[test]
    fn pages_without_images_list_only_fonts() {
        let pdf = render_pdf(&one_page(Vec::new(), Vec::new())).unwrap();
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/BaseFont /Helvetica-Oblique"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
        assert!(!text.contains("/XObject"));
    }
}
