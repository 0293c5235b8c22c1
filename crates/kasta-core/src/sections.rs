//! Section splitting by sentinel header lines

use serde::{Deserialize, Serialize};

/// A named partition of the flattened line sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Devices,
    Groups,
    Scenes,
    RemoteControls,
}

impl Section {
    /// All sections in output order
    pub const ALL: [Section; 4] = [
        Section::Devices,
        Section::Groups,
        Section::Scenes,
        Section::RemoteControls,
    ];

    /// Sentinel line that opens this section
    pub fn sentinel(&self) -> &'static str {
        match self {
            Section::Devices => "KASTA DEVICE",
            Section::Groups => "KASTA GROUP",
            Section::Scenes => "KASTA SCENE",
            Section::RemoteControls => "REMOTE CONTROL LINK",
        }
    }

    /// Match a line against the sentinels (exact, case-sensitive)
    pub fn from_sentinel(line: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.sentinel() == line)
    }
}

/// Lines grouped by section, order within each section preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    pub devices: Vec<String>,
    pub groups: Vec<String>,
    pub scenes: Vec<String>,
    pub remote_controls: Vec<String>,
}

impl Buckets {
    /// Lines of one section
    pub fn get(&self, section: Section) -> &[String] {
        match section {
            Section::Devices => &self.devices,
            Section::Groups => &self.groups,
            Section::Scenes => &self.scenes,
            Section::RemoteControls => &self.remote_controls,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Devices => &mut self.devices,
            Section::Groups => &mut self.groups,
            Section::Scenes => &mut self.scenes,
            Section::RemoteControls => &mut self.remote_controls,
        }
    }

    /// Whether no section received any line
    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|s| self.get(*s).is_empty())
    }
}

/// Partition lines into sections
///
/// A sentinel switches the active section and is dropped. Lines before the
/// first sentinel are discarded.
pub fn split_sections<S: AsRef<str>>(lines: &[S]) -> Buckets {
    let mut buckets = Buckets::default();
    let mut current: Option<Section> = None;
    let mut discarded = 0usize;

    for line in lines {
        let line = line.as_ref();
        if let Some(section) = Section::from_sentinel(line) {
            current = Some(section);
            continue;
        }
        match current {
            Some(section) => buckets.get_mut(section).push(line.to_string()),
            None => discarded += 1,
        }
    }

    if discarded > 0 {
        tracing::debug!(discarded, "dropped lines before the first section header");
    }

    buckets
}
