//! Renderer output checks.

use chrono::NaiveDate;

use formdoc_layout::{
    Color, Document, Element, Font, LayoutOptions, LayoutRequest, Page, Span, TextLine,
    layout_document,
};
use formdoc_model::{AnswerMap, CompanySettings, Field, FieldKind, FormDocument, Revision, Section};
use formdoc_report::{OutputFormat, RenderError, render_pdf, render_svg, sha256_hex, write_rendered};

fn inspection(fields: usize) -> FormDocument {
    let children = (1..=fields)
        .map(|n| Field::new(format!("f{n}"), format!("Item ({n})"), FieldKind::ShortText, 2).into())
        .collect();
    FormDocument {
        title: "Daily Inspection".to_string(),
        description: None,
        department: None,
        revision: Revision::new(2, 0),
        published: true,
        header_on_all_pages: true,
        blocks: vec![Section::new("s", "Walkaround", 1).with_children(children).into()],
    }
}

fn laid_out(fields: usize) -> Document {
    let form = inspection(fields);
    let answers = AnswerMap::new();
    let company = CompanySettings {
        name: "Copenhagen AirTaxi".to_string(),
        ..CompanySettings::default()
    };
    layout_document(
        &LayoutRequest::new(&form, &answers).with_company(&company),
        &LayoutOptions::default(),
    )
    .expect("layout")
}

/// In-use entries of the cross-reference table as `(object id, offset)`.
fn xref_entries(pdf: &[u8]) -> Vec<(usize, usize)> {
    let text = String::from_utf8_lossy(pdf);
    let start = text.rfind("\nxref").expect("xref") + 1;
    let mut lines = text[start..].lines().skip(1);
    let header = lines.next().expect("subsection header");
    let mut header = header.split_whitespace().map(|part| part.parse::<usize>().expect("number"));
    let (first, count) = (header.next().expect("first id"), header.next().expect("count"));
    lines
        .take(count)
        .enumerate()
        .filter_map(|(index, line)| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            (parts.get(2) == Some(&"n")).then(|| (first + index, parts[0].parse().expect("offset")))
        })
        .collect()
}

#[test]
fn pdf_has_consistent_cross_reference_table() {
    let document = laid_out(60);
    assert!(document.page_count() > 1);
    let pdf = render_pdf(&document).expect("render");

    assert!(pdf.starts_with(b"%PDF-1."));
    assert!(pdf.trim_ascii_end().ends_with(b"%%EOF"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains(&format!("/Count {}", document.page_count())));
    assert!(text.contains("(Daily Inspection)"));
    assert!(text.contains("(1.1 Item \\(1\\))"));
    assert!(text.contains(&format!("(Page 2 of {})", document.page_count())));

    let entries = xref_entries(&pdf);
    assert_eq!(entries.len(), 6 + 2 * document.page_count());
    for (id, offset) in entries {
        let expected = format!("{id} 0 obj");
        assert!(pdf[offset..].starts_with(expected.as_bytes()), "object {id}");
    }
}

#[test]
fn empty_document_is_rejected() {
    let document = Document {
        title: "Empty".to_string(),
        width_mm: 210.0,
        height_mm: 297.0,
        pages: Vec::new(),
        images: Vec::new(),
        warnings: Vec::new(),
    };
    assert!(matches!(render_pdf(&document), Err(RenderError::NoPages)));
    assert!(matches!(render_svg(&document), Err(RenderError::NoPages)));
}

#[test]
fn svg_draws_section_number_as_separate_span() {
    let document = Document {
        title: "T".to_string(),
        width_mm: 100.0,
        height_mm: 50.0,
        pages: vec![Page {
            number: 1,
            has_header: false,
            content_top: 0.0,
            content_bottom: 50.0,
            elements: vec![Element::Text(TextLine {
                x: 10.0,
                baseline: 20.0,
                size_pt: 10.0,
                spans: vec![
                    Span::new("1", Font::Bold, Color::MUTED),
                    Span::new(" Intro", Font::Bold, Color::TEXT),
                ],
            })],
            anchors: Vec::new(),
        }],
        images: Vec::new(),
        warnings: Vec::new(),
    };
    let svg = String::from_utf8(render_svg(&document).expect("svg")).expect("utf-8");
    insta::assert_snapshot!(svg, @r##"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" width="100mm" height="50mm" viewBox="0 0 100 50" font-family="Helvetica, Arial, sans-serif"><title>T</title><g id="page-1" transform="translate(0 0)"><rect x="0" y="0" width="100" height="50" fill="#ffffff"/><text x="10" y="20" font-size="3.53" xml:space="preserve"><tspan fill="#737373" font-weight="bold">1</tspan><tspan fill="#1a1a1a" font-weight="bold"> Intro</tspan></text></g></svg>"##);
}

#[test]
fn svg_stacks_every_page() {
    let document = laid_out(60);
    let svg = String::from_utf8(render_svg(&document).expect("svg")).expect("utf-8");
    for number in 1..=document.page_count() {
        assert!(svg.contains(&format!("id=\"page-{number}\"")));
    }
    assert!(svg.contains("Item (1)"));
}

#[test]
fn rendered_file_is_named_and_hashed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let document = laid_out(3);
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let file = write_rendered(&document, OutputFormat::Pdf, dir.path(), date).expect("write");

    assert_eq!(file.path, dir.path().join("daily_inspection_2024-05-01.pdf"));
    let bytes = std::fs::read(&file.path).expect("read back");
    assert_eq!(file.bytes, bytes.len());
    assert_eq!(file.sha256, sha256_hex(&bytes));
    assert_eq!(file.pages, 1);

    let again = render_pdf(&document).expect("render");
    assert_eq!(sha256_hex(&again), file.sha256, "rendering is deterministic");
}

#[test]
fn output_format_parses() {
    assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
    assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
    assert!("docx".parse::<OutputFormat>().is_err());
}
