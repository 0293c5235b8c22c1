//! Directory scanner for discovering exported workbooks

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Container format of an export file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Any spreadsheet format calamine detects (xlsx, xlsm, xlsb, xls, ods)
    Workbook,
    /// A single worksheet saved as CSV
    Csv,
}

impl InputFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputFormat::Workbook),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

/// An export file found while scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportFile {
    pub path: PathBuf,
    pub format: InputFormat,
}

/// Scan one or more directories for export files, sorted by path
pub fn scan_directory<P: AsRef<Path>>(roots: &[P]) -> Result<Vec<ExportFile>> {
    let mut files = Vec::new();

    for root in roots {
        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            // Lock files left behind by spreadsheet editors
            let is_lock_file = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("~$"));
            if is_lock_file {
                continue;
            }

            if let Some(format) = InputFormat::from_path(path) {
                files.push(ExportFile {
                    path: path.to_path_buf(),
                    format,
                });
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a/site.XLSX")), Some(InputFormat::Workbook));
        assert_eq!(InputFormat::from_path(Path::new("site.csv")), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.csv"), "x").unwrap();
        fs::write(nested.join("a.xlsx"), "x").unwrap();
        fs::write(nested.join("~$a.xlsx"), "x").unwrap();
        fs::write(nested.join("readme.txt"), "x").unwrap();

        let files = scan_directory(&[dir.path()]).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].format, InputFormat::Csv);
        assert_eq!(files[1].path, nested.join("a.xlsx"));
    }
}
