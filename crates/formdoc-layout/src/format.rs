//! Answer values as printed text, one rule per field kind.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use formdoc_core::numbered_title;
use formdoc_model::{AnswerValue, BlockPath, Field, FieldKind};

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Printed form of `value` for `field`.
///
/// Unknown kinds print their raw text. Dates that do not parse are printed
/// unchanged.
pub fn format_value(field: &Field, value: Option<&AnswerValue>, date_format: &str) -> String {
    let Some(value) = value else {
        return match field.kind {
            FieldKind::Boolean => NO.to_string(),
            _ => String::new(),
        };
    };
    match &field.kind {
        FieldKind::Boolean => {
            if value.as_bool() == Some(true) {
                YES.to_string()
            } else {
                NO.to_string()
            }
        }
        FieldKind::MultiChoice => match value {
            AnswerValue::List(items) => items.join(", "),
            other => other.to_plain_text(),
        },
        FieldKind::Date => {
            let raw = value.to_plain_text();
            format_date(&raw, date_format).unwrap_or(raw)
        }
        FieldKind::ShortText
        | FieldKind::LongText
        | FieldKind::Number
        | FieldKind::SingleChoice
        | FieldKind::Dropdown
        | FieldKind::Signature
        | FieldKind::Other(_) => value.to_plain_text(),
    }
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp and formats its date.
pub fn format_date(raw: &str, date_format: &str) -> Option<String> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))?;
    format_checked(&date.and_hms_opt(0, 0, 0)?, date_format)
}

/// Formats with a user-supplied pattern, `None` when the pattern is invalid.
pub fn format_checked(value: &NaiveDateTime, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(value.format_with_items(items.into_iter()).to_string())
}

/// Label text for a field row: number, title and required marker.
pub fn field_label(path: &BlockPath, field: &Field) -> String {
    let mut label = numbered_title(path, &field.title);
    if field.required {
        label.push_str(" *");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind) -> Field {
        Field::new("f", "Field", kind, 2)
    }

    #[test]
    fn booleans_print_yes_or_no() {
        let check = field(FieldKind::Boolean);
        assert_eq!(format_value(&check, Some(&AnswerValue::Bool(true)), "%d"), "Yes");
        assert_eq!(format_value(&check, Some(&AnswerValue::Bool(false)), "%d"), "No");
        assert_eq!(format_value(&check, None, "%d"), "No");
    }

    #[test]
    fn multi_choice_joins() {
        let value = AnswerValue::list(["Good", "Fair"]);
        assert_eq!(format_value(&field(FieldKind::MultiChoice), Some(&value), "%d"), "Good, Fair");
    }

    #[test]
    fn dates_format_when_parseable() {
        let date = field(FieldKind::Date);
        let value = AnswerValue::text("2023-05-01");
        assert_eq!(format_value(&date, Some(&value), "%d %b %Y"), "01 May 2023");
        let value = AnswerValue::text("2023-05-01T10:30:00Z");
        assert_eq!(format_value(&date, Some(&value), "%Y/%m/%d"), "2023/05/01");
        let value = AnswerValue::text("next Tuesday");
        assert_eq!(format_value(&date, Some(&value), "%d %b %Y"), "next Tuesday");
        let value = AnswerValue::text("2023-05-01");
        assert_eq!(format_value(&date, Some(&value), "%Q"), "2023-05-01");
    }

    #[test]
    fn other_kinds_print_raw_text() {
        let value = AnswerValue::text("42.5");
        assert_eq!(format_value(&field(FieldKind::Other("slider".into())), Some(&value), "%d"), "42.5");
        assert_eq!(format_value(&field(FieldKind::Signature), None, "%d"), "");
        assert_eq!(format_value(&field(FieldKind::Number), Some(&AnswerValue::Number(1250.0)), "%d"), "1250");
    }

    #[test]
    fn label_marks_required() {
        let required = Field::new("f", "Registration", FieldKind::ShortText, 2).required();
        let path: BlockPath = "1.2".parse().unwrap();
        assert_eq!(field_label(&path, &required), "1.2 Registration *");
    }
}
