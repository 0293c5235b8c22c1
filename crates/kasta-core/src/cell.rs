//! Scalar worksheet cell values

use serde::{Deserialize, Serialize};

/// A worksheet cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Empty/null cell, or a kind the pipeline never reads (dates, errors)
    Empty,
}

impl CellValue {
    /// A field read from an untyped source such as CSV
    ///
    /// The text is never reinterpreted as a number: device names like `101`
    /// stay text. Blank fields are empty.
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            CellValue::Empty
        } else {
            // Keep the raw text: multi-line cells carry meaningful newlines
            CellValue::String(s.to_string())
        }
    }

    /// The text of a string cell, None for every other kind
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&calamine::Data> for CellValue {
    fn from(data: &calamine::Data) -> Self {
        match data {
            calamine::Data::Int(i) => CellValue::Integer(*i),
            calamine::Data::Float(f) => CellValue::Float(*f),
            calamine::Data::Bool(b) => CellValue::Bool(*b),
            calamine::Data::String(s) => CellValue::String(s.clone()),
            _ => CellValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_keeps_numeric_looking_text() {
        assert_eq!(CellValue::from_text("101"), CellValue::String("101".to_string()));
        assert_eq!(CellValue::from_text("-2.5"), CellValue::String("-2.5".to_string()));
        assert_eq!(CellValue::from_text("NaN"), CellValue::String("NaN".to_string()));
    }

    #[test]
    fn test_from_text_keeps_newlines() {
        assert_eq!(
            CellValue::from_text("NAME:D300IB\nQTY:2"),
            CellValue::String("NAME:D300IB\nQTY:2".to_string())
        );
    }

    #[test]
    fn test_from_text_blank_is_empty() {
        assert_eq!(CellValue::from_text(""), CellValue::Empty);
        assert_eq!(CellValue::from_text("   "), CellValue::Empty);
    }

    #[test]
    fn test_as_text_only_for_strings() {
        assert_eq!(CellValue::String("Lamp".to_string()).as_text(), Some("Lamp"));
        assert_eq!(CellValue::Integer(3).as_text(), None);
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(CellValue::from(&calamine::Data::Int(7)), CellValue::Integer(7));
        assert_eq!(
            CellValue::from(&calamine::Data::String("x".to_string())),
            CellValue::String("x".to_string())
        );
        assert_eq!(CellValue::from(&calamine::Data::Empty), CellValue::Empty);
    }
}
