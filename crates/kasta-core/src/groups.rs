//! Device groups

use serde::{Deserialize, Serialize};

/// One group line: the group name and a raw member descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_name: String,
    /// Member list exactly as written, not split further
    pub devices: String,
}

/// Build group records from the groups section
///
/// Lines under an empty `NAME:` header belong to no group and are dropped.
pub fn build_groups<S: AsRef<str>>(lines: &[S]) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut current: Option<String> = None;

    for line in lines {
        let line = line.as_ref().trim();

        if let Some(name) = line.strip_prefix("NAME:") {
            let name = name.trim();
            current = (!name.is_empty()).then(|| name.to_string());
            continue;
        }

        if line.starts_with("DEVICE CONTROL:") {
            continue;
        }

        if let Some(group_name) = &current {
            groups.push(Group {
                group_name: group_name.clone(),
                devices: line.to_string(),
            });
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_groups() {
        let lines = [
            "Stray",
            "NAME:Downstairs",
            "DEVICE CONTROL:",
            "Kitchen, Hall",
            "Porch",
            "NAME:Upstairs",
            "Bedroom",
        ];
        let groups = build_groups(&lines);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].group_name, "Downstairs");
        assert_eq!(groups[0].devices, "Kitchen, Hall");
        assert_eq!(groups[1].devices, "Porch");
        assert_eq!(groups[2].group_name, "Upstairs");
    }

    #[test]
    fn test_empty_group_name_drops_lines() {
        let groups = build_groups(&["NAME:", "Kitchen", "NAME:Upstairs", "Bedroom", "NAME:", "Hall"]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_name, "Upstairs");
        assert_eq!(groups[0].devices, "Bedroom");
    }

    #[test]
    fn test_group_json_shape() {
        let groups = build_groups(&["NAME:All", "Kitchen"]);
        assert_eq!(
            serde_json::to_value(&groups).unwrap(),
            serde_json::json!([{"groupName": "All", "devices": "Kitchen"}])
        );
    }
}
