//! Device registry: device records and the name-to-type index

use crate::catalog::{classify, DeviceType};
use crate::error::{Error, Result};
use crate::options::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A physical device instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Raw model code, matched against the catalog
    pub appearance_shortname: String,
    /// User-facing name, the join key used by scenes and groups
    pub device_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
}

/// Lookup from device name to resolved device type
///
/// Built fresh for every conversion run and read-only once the device
/// section has been processed.
#[derive(Debug, Clone, Default)]
pub struct DeviceIndex {
    types: HashMap<String, DeviceType>,
}

impl DeviceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a device's resolved type; a later entry for the same name wins
    pub fn insert(&mut self, name: impl Into<String>, device_type: DeviceType) {
        self.types.insert(name.into(), device_type);
    }

    /// Type of a device, if known
    pub fn get(&self, name: &str) -> Option<DeviceType> {
        self.types.get(name).copied()
    }

    /// Resolve a scene-line token to a device type
    ///
    /// Surrounding whitespace and commas are ignored.
    pub fn resolve(&self, token: &str) -> Result<DeviceType> {
        let name = token.trim().trim_matches(',');
        if name.is_empty() {
            return Err(Error::EmptyDeviceName(token.to_string()));
        }
        self.get(name)
            .ok_or_else(|| Error::UnknownDevice(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Build device records from the devices section
///
/// `NAME:<shortname>` opens a block, `QTY:` lines are skipped, and every other
/// line is a device of the open block. An empty `NAME:` closes the block.
/// Only classified devices enter the returned index.
pub fn build_devices<S: AsRef<str>>(lines: &[S], options: &ConvertOptions) -> (Vec<Device>, DeviceIndex) {
    let mut devices = Vec::new();
    let mut index = DeviceIndex::new();
    let mut current: Option<(String, Option<DeviceType>)> = None;

    for line in lines {
        let line = line.as_ref().trim();

        if let Some(shortname) = line.strip_prefix("NAME:") {
            let shortname = shortname.trim().to_string();
            if shortname.is_empty() {
                tracing::debug!("empty NAME: header in device section");
                current = None;
                continue;
            }
            let device_type = if options.classify_devices {
                classify(&shortname)
            } else {
                None
            };
            if options.classify_devices && device_type.is_none() {
                tracing::debug!(shortname = %shortname, "shortname matches no catalog entry");
            }
            current = Some((shortname, device_type));
            continue;
        }

        if line.starts_with("QTY:") {
            continue;
        }

        let Some((shortname, device_type)) = &current else {
            tracing::debug!(line, "device line before any NAME: header");
            continue;
        };

        if let Some(device_type) = device_type {
            index.insert(line, *device_type);
        }
        devices.push(Device {
            appearance_shortname: shortname.clone(),
            device_name: line.to_string(),
            device_type: *device_type,
        });
    }

    (devices, index)
}
