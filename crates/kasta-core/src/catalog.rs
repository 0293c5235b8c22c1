//! Device type catalog and model-code classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Device categories that decide the shape of a scene record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "Dimmer Type")]
    Dimmer,
    #[serde(rename = "Relay Type")]
    Relay,
    #[serde(rename = "Curtain Type")]
    Curtain,
    #[serde(rename = "Fan Type")]
    Fan,
    #[serde(rename = "RGB Type")]
    Rgb,
    #[serde(rename = "PowerPoint Type (Single-Way)")]
    PowerPointSingleWay,
    #[serde(rename = "PowerPoint Type (Two-Way)")]
    PowerPointTwoWay,
}

impl DeviceType {
    /// Label used in the JSON output
    pub fn label(&self) -> &'static str {
        match self {
            DeviceType::Dimmer => "Dimmer Type",
            DeviceType::Relay => "Relay Type",
            DeviceType::Curtain => "Curtain Type",
            DeviceType::Fan => "Fan Type",
            DeviceType::Rgb => "RGB Type",
            DeviceType::PowerPointSingleWay => "PowerPoint Type (Single-Way)",
            DeviceType::PowerPointTwoWay => "PowerPoint Type (Two-Way)",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry: a type (with optional sub-label) and its model codes
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub device_type: DeviceType,
    pub type_label: &'static str,
    /// Only the PowerPoint category carries sub-labels
    pub sub_label: Option<&'static str>,
    pub model_codes: &'static [&'static str],
}

/// The catalog, in match-precedence order
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        device_type: DeviceType::Dimmer,
        type_label: "Dimmer Type",
        sub_label: None,
        model_codes: &["KBSKTDIM", "D300IB", "D300IB2", "DH10VIB", "DM300BH", "D0-10IB", "DDAL"],
    },
    CatalogEntry {
        device_type: DeviceType::Relay,
        type_label: "Relay Type",
        sub_label: None,
        model_codes: &["KBSKTREL", "S2400IB2", "RM1440BH", "KBSKTR", "Z2"],
    },
    CatalogEntry {
        device_type: DeviceType::Curtain,
        type_label: "Curtain Type",
        sub_label: None,
        model_codes: &["C300IBH"],
    },
    CatalogEntry {
        device_type: DeviceType::Fan,
        type_label: "Fan Type",
        sub_label: None,
        model_codes: &["FC150A2"],
    },
    CatalogEntry {
        device_type: DeviceType::Rgb,
        type_label: "RGB Type",
        sub_label: None,
        model_codes: &["KB8RGBG", "KB36RGBS", "KB9TWG", "KB12RGBD", "KB12RGBG"],
    },
    CatalogEntry {
        device_type: DeviceType::PowerPointSingleWay,
        type_label: "PowerPoint Type",
        sub_label: Some("Single-Way"),
        model_codes: &["H1PPWVBX"],
    },
    CatalogEntry {
        device_type: DeviceType::PowerPointTwoWay,
        type_label: "PowerPoint Type",
        sub_label: Some("Two-Way"),
        model_codes: &["K2PPHB", "H2PPHB", "H2PPWHB"],
    },
];

/// Classify a shortname by bidirectional substring match against the catalog
///
/// A model code matches when it appears inside the shortname or the shortname
/// appears inside it. The first match in catalog order wins.
pub fn classify(shortname: &str) -> Option<DeviceType> {
    let shortname = shortname.trim();
    // An empty shortname is contained in every code
    if shortname.is_empty() {
        return None;
    }

    CATALOG
        .iter()
        .find(|entry| {
            entry
                .model_codes
                .iter()
                .any(|code| shortname.contains(code) || code.contains(shortname))
        })
        .map(|entry| entry.device_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_codes() {
        assert_eq!(classify("D300IB"), Some(DeviceType::Dimmer));
        assert_eq!(classify("S2400IB2"), Some(DeviceType::Relay));
        assert_eq!(classify("C300IBH"), Some(DeviceType::Curtain));
        assert_eq!(classify("FC150A2"), Some(DeviceType::Fan));
        assert_eq!(classify("KB36RGBS"), Some(DeviceType::Rgb));
        assert_eq!(classify("H1PPWVBX"), Some(DeviceType::PowerPointSingleWay));
        assert_eq!(classify("H2PPWHB"), Some(DeviceType::PowerPointTwoWay));
    }

    #[test]
    fn test_classify_padded_shortname() {
        assert_eq!(classify("D300IB-WH"), Some(DeviceType::Dimmer));
        assert_eq!(classify("KBSKTR-AU"), Some(DeviceType::Relay));
    }

    #[test]
    fn test_classify_truncated_shortname() {
        assert_eq!(classify("H2PP"), Some(DeviceType::PowerPointTwoWay));
        assert_eq!(classify("FC150"), Some(DeviceType::Fan));
    }

    #[test]
    fn test_classify_first_match_wins() {
        // "KBSKT" is inside both KBSKTDIM (dimmer) and KBSKTREL (relay)
        assert_eq!(classify("KBSKT"), Some(DeviceType::Dimmer));
        assert_eq!(classify("KBSKT"), classify("KBSKT"));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("ABC"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("   "), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DeviceType::PowerPointTwoWay.to_string(), "PowerPoint Type (Two-Way)");
        assert_eq!(
            serde_json::to_string(&DeviceType::Dimmer).unwrap(),
            "\"Dimmer Type\""
        );
        for entry in CATALOG {
            let expected = match entry.sub_label {
                Some(sub) => format!("{} ({})", entry.type_label, sub),
                None => entry.type_label.to_string(),
            };
            assert_eq!(entry.device_type.label(), expected);
        }
    }
}
