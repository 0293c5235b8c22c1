//! Conversion pipeline: lines to buckets to the output document

use crate::devices::{build_devices, Device};
use crate::error::Result;
use crate::extract::flatten_cells;
use crate::groups::{build_groups, Group};
use crate::options::ConvertOptions;
use crate::remotes::{build_remotes, Remote};
use crate::scenes::{build_scenes, Scene};
use crate::sections::split_sections;
use crate::source::{read_csv_grid, read_workbook};
use serde::{Deserialize, Serialize};

/// Message reported when a workbook has no programming-details worksheet
pub const NO_MATCHING_WORKSHEETS: &str = "No matching worksheets found";

/// The converted installation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub devices: Vec<Device>,
    pub groups: Vec<Group>,
    pub scenes: Vec<Scene>,
    pub remote_controls: Vec<Remote>,
}

/// Either a converted document or the explicit no-content result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConversionOutput {
    Document(Conversion),
    NoContent { error: String },
}

impl ConversionOutput {
    fn no_content() -> Self {
        ConversionOutput::NoContent {
            error: NO_MATCHING_WORKSHEETS.to_string(),
        }
    }

    /// The converted document, if there is one
    pub fn document(&self) -> Option<&Conversion> {
        match self {
            ConversionOutput::Document(conversion) => Some(conversion),
            ConversionOutput::NoContent { .. } => None,
        }
    }
}

/// Convert flattened lines
///
/// The device index is local to this call, so runs never share state.
pub fn convert_lines<S: AsRef<str>>(lines: &[S], options: &ConvertOptions) -> Conversion {
    let buckets = split_sections(lines);

    let (devices, index) = build_devices(&buckets.devices, options);
    let groups = build_groups(&buckets.groups);
    let scenes = build_scenes(&buckets.scenes, &index, options);
    let remote_controls = build_remotes(&buckets.remote_controls);

    tracing::info!(
        devices = devices.len(),
        typed_devices = index.len(),
        groups = groups.len(),
        scenes = scenes.len(),
        remotes = remote_controls.len(),
        "converted export"
    );

    Conversion {
        devices,
        groups,
        scenes,
        remote_controls,
    }
}

/// Convert a workbook held in memory
pub fn convert_workbook(bytes: &[u8], options: &ConvertOptions) -> Result<ConversionOutput> {
    match read_workbook(bytes, options)? {
        Some(cells) => {
            let lines = flatten_cells(&cells, options);
            Ok(ConversionOutput::Document(convert_lines(&lines, options)))
        }
        None => Ok(ConversionOutput::no_content()),
    }
}

/// Convert a worksheet exported as CSV
///
/// A CSV export is the worksheet itself; it is reported as no content only
/// when it holds no section header at all.
pub fn convert_csv(bytes: &[u8], options: &ConvertOptions) -> Result<ConversionOutput> {
    let cells = read_csv_grid(bytes, options)?;
    let lines = flatten_cells(&cells, options);
    if split_sections(&lines).is_empty() {
        return Ok(ConversionOutput::no_content());
    }
    Ok(ConversionOutput::Document(convert_lines(&lines, options)))
}
