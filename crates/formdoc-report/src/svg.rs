//! SVG output: all pages stacked vertically in one drawing.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use formdoc_layout::{Document, Element, Font, PT_TO_MM, Page, TextLine};

use crate::error::{RenderError, Result};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
/// Vertical gap between stacked pages.
pub const PAGE_GAP_MM: f64 = 8.0;

pub fn render_svg(document: &Document) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_svg(&mut bytes, document)?;
    Ok(bytes)
}

pub fn write_svg<W: Write>(out: W, document: &Document) -> Result<()> {
    if document.pages.is_empty() {
        return Err(RenderError::NoPages);
    }
    let pages = document.pages.len() as f64;
    let total_height = pages * document.height_mm + (pages - 1.0) * PAGE_GAP_MM;

    let mut writer = Writer::new(out);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let width = coord(document.width_mm);
    let height = coord(total_height);
    let view_box = format!("0 0 {width} {height}");
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("width", format!("{width}mm").as_str()));
    root.push_attribute(("height", format!("{height}mm").as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("font-family", FONT_FAMILY));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("title")))?;
    writer.write_event(Event::Text(BytesText::new(&document.title)))?;
    writer.write_event(Event::End(BytesEnd::new("title")))?;

    let images: Vec<String> = document
        .images
        .iter()
        .map(|image| format!("data:image/jpeg;base64,{}", STANDARD.encode(&image.data)))
        .collect();

    for (index, page) in document.pages.iter().enumerate() {
        let offset = index as f64 * (document.height_mm + PAGE_GAP_MM);
        write_page(&mut writer, document, page, offset, &images)?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(())
}

fn write_page<W: Write>(
    writer: &mut Writer<W>,
    document: &Document,
    page: &Page,
    offset: f64,
    images: &[String],
) -> Result<()> {
    let mut group = BytesStart::new("g");
    group.push_attribute(("id", format!("page-{}", page.number).as_str()));
    group.push_attribute(("transform", format!("translate(0 {})", coord(offset)).as_str()));
    writer.write_event(Event::Start(group))?;

    let mut background = rect_start(0.0, 0.0, document.width_mm, document.height_mm);
    background.push_attribute(("fill", "#ffffff"));
    writer.write_event(Event::Empty(background))?;

    for element in &page.elements {
        match element {
            Element::Rect(rect) => {
                let mut start = rect_start(rect.x, rect.y, rect.width, rect.height);
                let fill = rect.fill.map_or_else(|| "none".to_string(), |fill| fill.to_hex());
                start.push_attribute(("fill", fill.as_str()));
                if let Some(stroke) = rect.stroke {
                    start.push_attribute(("stroke", stroke.to_hex().as_str()));
                    start.push_attribute(("stroke-width", "0.2"));
                }
                writer.write_event(Event::Empty(start))?;
            }
            Element::Rule(rule) => {
                let mut start = BytesStart::new("line");
                start.push_attribute(("x1", coord(rule.x1).as_str()));
                start.push_attribute(("y1", coord(rule.y1).as_str()));
                start.push_attribute(("x2", coord(rule.x2).as_str()));
                start.push_attribute(("y2", coord(rule.y2).as_str()));
                start.push_attribute(("stroke", rule.color.to_hex().as_str()));
                start.push_attribute(("stroke-width", coord(rule.width).as_str()));
                writer.write_event(Event::Empty(start))?;
            }
            Element::Image(image) => {
                let Some(href) = images.get(image.image) else {
                    continue;
                };
                let mut start = BytesStart::new("image");
                start.push_attribute(("x", coord(image.x).as_str()));
                start.push_attribute(("y", coord(image.y).as_str()));
                start.push_attribute(("width", coord(image.width).as_str()));
                start.push_attribute(("height", coord(image.height).as_str()));
                start.push_attribute(("href", href.as_str()));
                writer.write_event(Event::Empty(start))?;
            }
            Element::Text(line) => write_text(writer, line)?,
        }
    }

    writer.write_event(Event::End(BytesEnd::new("g")))?;
    Ok(())
}

fn write_text<W: Write>(writer: &mut Writer<W>, line: &TextLine) -> Result<()> {
    let mut start = BytesStart::new("text");
    start.push_attribute(("x", coord(line.x).as_str()));
    start.push_attribute(("y", coord(line.baseline).as_str()));
    start.push_attribute(("font-size", coord(line.size_pt * PT_TO_MM).as_str()));
    start.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(start))?;
    for span in &line.spans {
        let mut tspan = BytesStart::new("tspan");
        tspan.push_attribute(("fill", span.color.to_hex().as_str()));
        match span.font {
            Font::Bold => tspan.push_attribute(("font-weight", "bold")),
            Font::Oblique => tspan.push_attribute(("font-style", "italic")),
            Font::Regular => {}
        }
        writer.write_event(Event::Start(tspan))?;
        writer.write_event(Event::Text(BytesText::new(&span.text)))?;
        writer.write_event(Event::End(BytesEnd::new("tspan")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}

fn rect_start(x: f64, y: f64, width: f64, height: f64) -> BytesStart<'static> {
    let mut start = BytesStart::new("rect");
    start.push_attribute(("x", coord(x).as_str()));
    start.push_attribute(("y", coord(y).as_str()));
    start.push_attribute(("width", coord(width).as_str()));
    start.push_attribute(("height", coord(height).as_str()));
    start
}

/// Millimetre value with up to two decimals.
fn coord(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
