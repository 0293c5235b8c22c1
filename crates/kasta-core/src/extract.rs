//! Cell text extraction: worksheet cells to normalized text lines

use crate::cell::CellValue;
use crate::options::ConvertOptions;
use regex::Regex;

/// Marketing suffixes some exporter versions append to model codes
const MARKETING_SUFFIXES: &[&str] = &["AK", "ES"];

lazy_static::lazy_static! {
    /// Parenthesized annotation, shortest match
    static ref ANNOTATION_RE: Regex = Regex::new(r"\(.*?\)").unwrap();
}

/// Flatten cells into ordered, non-empty, normalized text lines
///
/// Non-string cells are ignored. Full-width brackets and colons are folded to
/// ASCII, parenthesized annotations removed, and multi-line values split.
pub fn flatten_cells<'a, I>(cells: I, options: &ConvertOptions) -> Vec<String>
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut lines = Vec::new();
    for cell in cells {
        if let Some(text) = cell.as_text() {
            lines.extend(normalize_text(text, options));
        }
    }
    lines
}

/// Normalize a single cell's text into zero or more lines
pub fn normalize_text(text: &str, options: &ConvertOptions) -> Vec<String> {
    let mut value = text
        .replace('\u{ff08}', "(")
        .replace('\u{ff09}', ")")
        .replace('\u{ff1a}', ":");

    if options.strip_marketing_suffixes {
        for suffix in MARKETING_SUFFIXES {
            value = value.replace(suffix, "");
        }
    }

    ANNOTATION_RE
        .replace_all(&value, "")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn test_full_width_punctuation_folded() {
        let lines = normalize_text("NAME\u{ff1a}D300IB\u{ff08}dimmer\u{ff09}", &ConvertOptions::default());
        assert_eq!(lines, vec!["NAME:D300IB"]);
    }

    #[test]
    fn test_annotations_removed_non_greedy() {
        let lines = normalize_text("Lamp (hall) ON (note)", &ConvertOptions::default());
        assert_eq!(lines, vec!["Lamp  ON"]);
    }

    #[test]
    fn test_multi_line_split_and_trimmed() {
        let lines = normalize_text("  NAME:D300IB \n\n QTY:2\n", &ConvertOptions::default());
        assert_eq!(lines, vec!["NAME:D300IB", "QTY:2"]);
    }

    #[test]
    fn test_marketing_suffixes_are_optional() {
        let keep = normalize_text("NAME:D300IBAK", &ConvertOptions::default());
        assert_eq!(keep, vec!["NAME:D300IBAK"]);

        let options = ConvertOptions {
            strip_marketing_suffixes: true,
            ..ConvertOptions::default()
        };
        let stripped = normalize_text("NAME:D300IBAK\nKBSKTRES", &options);
        assert_eq!(stripped, vec!["NAME:D300IB", "KBSKTR"]);
    }

    #[test]
    fn test_flatten_skips_non_text_cells() {
        let cells = vec![
            text("KASTA DEVICE"),
            CellValue::Integer(4),
            CellValue::Empty,
            text("   "),
            text("NAME:D300IB\nKitchen"),
        ];
        let lines = flatten_cells(&cells, &ConvertOptions::default());
        assert_eq!(lines, vec!["KASTA DEVICE", "NAME:D300IB", "Kitchen"]);
    }
}
