//! kasta-core: Core library for converting KASTA programming-detail exports
//!
//! This library provides functionality to:
//! - Read the "Programming Details" worksheet of an exported workbook (or CSV)
//! - Flatten its cells into normalized text lines
//! - Split the lines into device, group, scene and remote-control sections
//! - Classify devices against the model-code catalog
//! - Parse scenes and remote links into typed records ready for JSON output

pub mod catalog;
pub mod cell;
pub mod convert;
pub mod devices;
pub mod error;
pub mod extract;
pub mod groups;
pub mod options;
pub mod remotes;
pub mod scanner;
pub mod scenes;
pub mod sections;
pub mod source;

pub use catalog::{classify, DeviceType, CATALOG};
pub use cell::CellValue;
pub use convert::{convert_csv, convert_lines, convert_workbook, Conversion, ConversionOutput};
pub use devices::{build_devices, Device, DeviceIndex};
pub use error::{Error, Result};
pub use extract::flatten_cells;
pub use groups::{build_groups, Group};
pub use options::ConvertOptions;
pub use remotes::{build_remotes, parse_link, Link, LinkType, Remote};
pub use scanner::{scan_directory, ExportFile, InputFormat};
pub use scenes::{build_scenes, parse_scene_line, Scene, SceneContent, StatusConditions};
pub use sections::{split_sections, Buckets, Section};
pub use source::{read_csv_grid, read_workbook};
