//! Text measurement with the standard Helvetica metrics.
//!
//! Widths are the AFM advance widths (1/1000 em) of the printable ASCII
//! range. Characters outside it measure as a digit. Bold text is measured
//! as regular text widened by five percent.

use crate::document::Font;
use crate::options::PT_TO_MM;

const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' .. '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' .. 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
    278, 278, 278, 469, 556, 333, // '[' .. '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' .. 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' .. 'z'
    334, 260, 334, 584, // '{' .. '~'
];

const FALLBACK_WIDTH: u16 = 556;
const BOLD_FACTOR: f64 = 1.05;

fn char_width(ch: char) -> u16 {
    let code = ch as u32;
    if (0x20..=0x7e).contains(&code) {
        HELVETICA_ASCII[(code - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in millimetres.
pub fn text_width_mm(text: &str, size_pt: f64, font: Font) -> f64 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(ch))).sum();
    let width = f64::from(units) / 1000.0 * size_pt * PT_TO_MM;
    match font {
        Font::Bold => width * BOLD_FACTOR,
        Font::Regular | Font::Oblique => width,
    }
}

/// Greedy word wrap into lines no wider than `max_mm`.
///
/// Words wider than a line are broken between characters. Explicit line
/// breaks in `text` are kept. Empty input yields no lines.
pub fn wrap(text: &str, max_mm: f64, size_pt: f64, font: Font) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width_mm(&candidate, size_pt, font) <= max_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width_mm(word, size_pt, font) <= max_mm {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, max_mm, size_pt, font);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn break_word(word: &str, max_mm: f64, size_pt: f64, font: Font) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if current.chars().count() > 1 && text_width_mm(&current, size_pt, font) > max_mm {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// `text` shortened with a trailing ellipsis until it fits `max_mm`.
pub fn truncate_to_width(text: &str, max_mm: f64, size_pt: f64, font: Font) -> String {
    if text_width_mm(text, size_pt, font) <= max_mm {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + "...";
        if text_width_mm(&candidate, size_pt, font) <= max_mm {
            return candidate;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_width_matches_afm() {
        let width = text_width_mm("0", 10.0, Font::Regular);
        assert!((width - 0.556 * 10.0 * PT_TO_MM).abs() < 1e-9);
        assert!(text_width_mm("0", 10.0, Font::Bold) > width);
    }

    #[test]
    fn wrap_respects_width() {
        let text = "Minor oil seepage at cylinder 3. Recommend monitoring at next inspection.";
        let lines = wrap(text, 40.0, 10.0, Font::Regular);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0, Font::Regular) <= 40.0, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_breaks_long_words_and_keeps_newlines() {
        let lines = wrap("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 10.0, 10.0, Font::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(wrap("one\ntwo", 100.0, 10.0, Font::Regular), vec!["one", "two"]);
        assert!(wrap("", 100.0, 10.0, Font::Regular).is_empty());
    }

    #[test]
    fn truncate_adds_ellipsis() {
        let short = truncate_to_width("Short", 100.0, 10.0, Font::Regular);
        assert_eq!(short, "Short");
        let long = truncate_to_width("A very long form title indeed", 20.0, 10.0, Font::Bold);
        assert!(long.ends_with("..."));
        assert!(text_width_mm(&long, 10.0, Font::Bold) <= 20.0);
    }
}
