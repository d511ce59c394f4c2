//! Canonical timeline data model.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use stickmotion_rig_core::Pose;

/// Roster entry for one animated character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Character {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            role: None,
        }
    }
}

/// Whether a frame is source truth or was synthesized by the interpolator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSource {
    #[default]
    Key,
    Interpolated,
}

/// A single timestamped pose snapshot for one or more characters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub timestamp_ms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub characters: HashMap<String, Pose>,
    #[serde(default)]
    pub source: FrameSource,
}

impl Keyframe {
    /// Authoritative keyframe carrying a single character's pose.
    pub fn for_character(
        timestamp_ms: u32,
        description: impl Into<String>,
        character_id: &str,
        pose: Pose,
    ) -> Self {
        let mut characters = HashMap::new();
        characters.insert(character_id.to_string(), pose);
        Self {
            timestamp_ms,
            description: Some(description.into()),
            characters,
            source: FrameSource::Key,
        }
    }
}

/// How a timeline's keyframes were produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Every action was synthesized from the template catalog.
    Template,
    /// At least one action came from the external fallback producer.
    ExternalFallback,
}

/// Ordered, time-monotonic keyframe sequence plus its character roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub characters: Vec<Character>,
    pub keyframes: Vec<Keyframe>,
    /// Rig variant the poses target.
    pub variant: String,
    pub method: GenerationMethod,
    /// Set by the interpolator once the timeline has been densified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_fps: Option<u32>,
}

impl Timeline {
    /// Timestamp of the last keyframe (0 for an empty timeline).
    pub fn duration_ms(&self) -> u32 {
        self.keyframes.last().map_or(0, |kf| kf.timestamp_ms)
    }

    /// Validate basic invariants: first timestamp 0, non-decreasing order.
    pub fn validate_basic(&self) -> Result<(), String> {
        if let Some(first) = self.keyframes.first() {
            if first.timestamp_ms != 0 {
                return Err(format!(
                    "first keyframe must start at 0 ms, got {}",
                    first.timestamp_ms
                ));
            }
        }
        let mut last = 0u32;
        for kf in &self.keyframes {
            if kf.timestamp_ms < last {
                return Err(format!(
                    "keyframe timestamps must be non-decreasing ({} after {})",
                    kf.timestamp_ms, last
                ));
            }
            last = kf.timestamp_ms;
        }
        Ok(())
    }
}
