//! Scene parsing
//!
//! Each scene is a `NAME:` header followed by free-form control lines such as
//! `Kitchen, Hall ON +45%` or `Fan1 ON RELAY ON SPEED 3`. The first token of a
//! line names a device; its resolved type picks the grammar for the rest.

use crate::catalog::DeviceType;
use crate::devices::DeviceIndex;
use crate::error::{Error, Result};
use crate::options::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Positional tokens a fan line must carry
const FAN_TOKENS: usize = 6;

/// Level applied when a dimmer is switched on without a usable percentage
const FULL_LEVEL: u32 = 100;

/// A named collection of device target states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub scene_name: String,
    pub contents: Vec<SceneContent>,
}

/// Target state of one device within a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneContent {
    pub name: String,
    /// Absent for power points, whose state lives in the conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub status_conditions: StatusConditions,
}

/// Type-dependent status fields of a scene record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusConditions {
    Fan {
        relay: String,
        speed: u32,
    },
    TwoWayPower {
        #[serde(rename = "leftPowerOnOff")]
        left_power_on_off: String,
        #[serde(rename = "rightPowerOnOff")]
        right_power_on_off: String,
    },
    SingleWayPower {
        #[serde(rename = "rightPowerOnOff")]
        right_power_on_off: String,
    },
    Level {
        level: u32,
    },
    Position {
        position: u32,
    },
    Empty {},
}

impl SceneContent {
    fn new(name: String, status: &str, status_conditions: StatusConditions) -> Self {
        Self {
            name,
            status: Some(status.to_string()),
            status_conditions,
        }
    }

    fn power(name: String, status_conditions: StatusConditions) -> Self {
        Self {
            name,
            status: None,
            status_conditions,
        }
    }
}

/// Build scenes from the scenes section
///
/// A repeated `NAME:` reopens the existing scene and keeps appending to it.
/// Lines that fail to parse are logged and skipped.
pub fn build_scenes<S: AsRef<str>>(lines: &[S], index: &DeviceIndex, options: &ConvertOptions) -> Vec<Scene> {
    let mut scenes: Vec<Scene> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for line in lines {
        let line = line.as_ref().trim();

        if line.starts_with("CONTROL CONTENT:") {
            continue;
        }

        if let Some(name) = line.strip_prefix("NAME:") {
            let name = name.trim();
            let position = *positions.entry(name.to_string()).or_insert_with(|| {
                scenes.push(Scene {
                    scene_name: name.to_string(),
                    contents: Vec::new(),
                });
                scenes.len() - 1
            });
            current = Some(position);
            continue;
        }

        let Some(position) = current else {
            tracing::debug!(line, "scene line before any NAME: header");
            continue;
        };

        let parsed = if options.classify_devices {
            parse_scene_line(line, index)
        } else {
            Ok(parse_untyped_line(line))
        };

        match parsed {
            Ok(contents) => scenes[position].contents.extend(contents),
            Err(e @ (Error::UnknownDevice(_) | Error::EmptyDeviceName(_))) => {
                tracing::debug!(scene = %scenes[position].scene_name, "skipping scene line: {}", e);
            }
            Err(e) if e.is_line_level() => {
                tracing::warn!(scene = %scenes[position].scene_name, "skipping scene line: {}", e);
            }
            Err(e) => {
                tracing::error!(scene = %scenes[position].scene_name, "unexpected error on scene line: {}", e);
            }
        }
    }

    scenes
}

/// Parse one control line using the type of its first device
pub fn parse_scene_line(line: &str, index: &DeviceIndex) -> Result<Vec<SceneContent>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Ok(Vec::new());
    }

    match index.resolve(parts[0])? {
        DeviceType::Relay => Ok(parse_relay(&parts)),
        DeviceType::Curtain => Ok(parse_curtain(&parts)),
        DeviceType::Dimmer => parse_dimmer(&parts, line),
        DeviceType::Fan => parse_fan(&parts, line),
        DeviceType::PowerPointTwoWay => Ok(parse_two_way_power(&parts)),
        DeviceType::PowerPointSingleWay => Ok(parse_single_way_power(&parts)),
        DeviceType::Rgb => {
            tracing::debug!(line, "RGB devices carry no scene state");
            Ok(Vec::new())
        }
    }
}

/// Parse a line without device types: every record carries status and level
pub fn parse_untyped_line(line: &str) -> Vec<SceneContent> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Vec::new();
    }
    let last = parts[parts.len() - 1];

    let (status, names) = if is_switch_status(last) {
        (last, &parts[..parts.len() - 1])
    } else {
        (parts[parts.len() - 2], &parts[..parts.len() - 2])
    };

    let mut level = if status == "ON" { FULL_LEVEL } else { 0 };
    if last.contains('+') {
        if let Some(parsed) = parse_percentage(last) {
            level = parsed;
        }
    }

    split_names(names)
        .into_iter()
        .map(|name| SceneContent::new(name, status, StatusConditions::Level { level }))
        .collect()
}

/// `<names...> <ON|OFF>`
fn parse_relay(parts: &[&str]) -> Vec<SceneContent> {
    let (status, names) = split_trailing(parts, 1);
    split_names(names)
        .into_iter()
        .map(|name| SceneContent::new(name, status[0], StatusConditions::Empty {}))
        .collect()
}

/// `<names...> <OPEN|CLOSE>`
fn parse_curtain(parts: &[&str]) -> Vec<SceneContent> {
    let (status, names) = split_trailing(parts, 1);
    let position = if status[0].eq_ignore_ascii_case("OPEN") { 100 } else { 0 };
    split_names(names)
        .into_iter()
        .map(|name| SceneContent::new(name, status[0], StatusConditions::Position { position }))
        .collect()
}

/// `<names...> <ON|OFF> [+NN%]`
fn parse_dimmer(parts: &[&str], line: &str) -> Result<Vec<SceneContent>> {
    let status_index = parts
        .iter()
        .position(|p| is_switch_status(p))
        .ok_or_else(|| Error::MissingStatus(line.to_string()))?;
    let status = parts[status_index];

    let level = if status == "OFF" {
        0
    } else {
        parts
            .get(status_index + 1)
            .and_then(|token| parse_percentage(token))
            .unwrap_or(FULL_LEVEL)
    };

    Ok(split_names(&parts[..status_index])
        .into_iter()
        .map(|name| SceneContent::new(name, status, StatusConditions::Level { level }))
        .collect())
}

/// `<name> <status> <label> <relay> <label> <speed>`
fn parse_fan(parts: &[&str], line: &str) -> Result<Vec<SceneContent>> {
    if parts.len() < FAN_TOKENS {
        return Err(Error::FanTokenCount {
            line: line.to_string(),
            expected: FAN_TOKENS,
            found: parts.len(),
        });
    }

    let speed = parts[5].parse::<u32>().map_err(|_| Error::InvalidFanSpeed {
        line: line.to_string(),
        speed: parts[5].to_string(),
    })?;

    Ok(vec![SceneContent::new(
        parts[0].trim_matches(',').to_string(),
        parts[1],
        StatusConditions::Fan {
            relay: parts[3].to_string(),
            speed,
        },
    )])
}

/// `<names...> <left> <right>`
fn parse_two_way_power(parts: &[&str]) -> Vec<SceneContent> {
    let (power, names) = split_trailing(parts, 2);
    split_names(names)
        .into_iter()
        .map(|name| {
            SceneContent::power(
                name,
                StatusConditions::TwoWayPower {
                    left_power_on_off: power[0].to_string(),
                    right_power_on_off: power[1].to_string(),
                },
            )
        })
        .collect()
}

/// `<names...> <power>`
fn parse_single_way_power(parts: &[&str]) -> Vec<SceneContent> {
    let (power, names) = split_trailing(parts, 1);
    split_names(names)
        .into_iter()
        .map(|name| {
            SceneContent::power(
                name,
                StatusConditions::SingleWayPower {
                    right_power_on_off: power[0].to_string(),
                },
            )
        })
        .collect()
}

/// Split off the last `n` tokens; callers guarantee at least two tokens
fn split_trailing<'p, 'a>(parts: &'p [&'a str], n: usize) -> (&'p [&'a str], &'p [&'a str]) {
    let at = parts.len().saturating_sub(n);
    (&parts[at..], &parts[..at])
}

/// Rejoin name tokens and split them on commas
fn split_names(tokens: &[&str]) -> Vec<String> {
    tokens
        .join(" ")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_switch_status(token: &str) -> bool {
    token == "ON" || token == "OFF"
}

/// `45`, `+45`, `45%` or `+45%`
fn parse_percentage(token: &str) -> Option<u32> {
    token.replace(['+', '%'], "").trim().parse().ok()
}
