//! Remote-control link decoding
//!
//! Each remote is a `NAME:` header followed by one line per button link, for
//! example `3: SCENE Evening - DOUBLE`.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Action used when a link carries no ` - <ACTION>` modifier
pub const DEFAULT_ACTION: &str = "NORMAL";

/// What a remote button is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Device = 0,
    Group = 1,
    Scene = 2,
}

impl LinkType {
    /// Description prefixes, checked in this order
    const PREFIXES: [(&'static str, LinkType); 3] = [
        ("SCENE", LinkType::Scene),
        ("GROUP", LinkType::Group),
        ("DEVICE", LinkType::Device),
    ];

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LinkType::Device),
            1 => Some(LinkType::Group),
            2 => Some(LinkType::Scene),
            _ => None,
        }
    }
}

impl Serialize for LinkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for LinkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        LinkType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown link type {}", code)))
    }
}

/// A single button binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Zero-based button index
    pub link_index: u32,
    pub link_type: LinkType,
    pub link_name: String,
    pub action: String,
}

/// A remote control and its links, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remote {
    pub remote_name: String,
    pub links: Vec<Link>,
}

/// Build remotes from the remote-control section
///
/// Malformed link lines are logged and skipped; the remote itself is kept.
/// An empty `NAME:` header opens no remote.
pub fn build_remotes<S: AsRef<str>>(lines: &[S]) -> Vec<Remote> {
    let mut remotes = Vec::new();
    let mut current: Option<Remote> = None;

    for line in lines {
        let line = line.as_ref().trim();

        if line.starts_with("TOTAL") || line.starts_with("LINK:") {
            continue;
        }

        if let Some(name) = line.strip_prefix("NAME:") {
            remotes.extend(current.take());
            let name = name.trim();
            current = (!name.is_empty()).then(|| Remote {
                remote_name: name.to_string(),
                links: Vec::new(),
            });
            continue;
        }

        let Some(remote) = current.as_mut() else {
            tracing::debug!(line, "link line before any NAME: header");
            continue;
        };

        match parse_link(line) {
            Ok(link) => remote.links.push(link),
            Err(e @ Error::MissingLinkDescription(_)) => {
                tracing::debug!(remote = %remote.remote_name, "skipping link line: {}", e);
            }
            Err(e) if e.is_line_level() => {
                tracing::warn!(remote = %remote.remote_name, "skipping link line: {}", e);
            }
            Err(e) => {
                tracing::error!(remote = %remote.remote_name, "unexpected error on link line: {}", e);
            }
        }
    }

    remotes.extend(current);
    remotes
}

/// Parse `<index>: <SCENE|GROUP|DEVICE> <name>[ - <action>]`
pub fn parse_link(line: &str) -> Result<Link> {
    let (index, description) = line
        .split_once(':')
        .ok_or_else(|| Error::MissingLinkDescription(line.to_string()))?;

    let index = index.trim();
    let link_index = index
        .parse::<u32>()
        .ok()
        .and_then(|ordinal| ordinal.checked_sub(1))
        .ok_or_else(|| Error::InvalidLinkIndex {
            line: line.to_string(),
            index: index.to_string(),
        })?;

    let mut description = description.trim();
    let mut action = DEFAULT_ACTION.to_string();
    if let Some((target, modifier)) = description.rsplit_once(" - ") {
        description = target.trim();
        action = modifier.trim().to_uppercase();
    }

    let (link_type, link_name) = LinkType::PREFIXES
        .iter()
        .find_map(|(prefix, link_type)| {
            description
                .strip_prefix(prefix)
                .map(|name| (*link_type, name.trim().to_string()))
        })
        .ok_or_else(|| Error::UnknownLinkTarget(description.to_string()))?;

    Ok(Link {
        link_index,
        link_type,
        link_name,
        action,
    })
}
