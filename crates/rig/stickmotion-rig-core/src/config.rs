//! Per-variant rig configuration and its declarative source format.
//!
//! A `RigConfig` is immutable once built and is shared as `Arc<RigConfig>`
//! across concurrent pipeline invocations. The declarative source mirrors the
//! host's `skeleton_<variant>` document: per variant a joint count, a
//! bone-length table, an angle-limit table, and fractional tolerances.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

/// Joints may drift this far past the canvas edge before counting as
/// out-of-bounds.
pub const CANVAS_MARGIN: f32 = 50.0;

/// Structural parameters for one rig variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RigConfig {
    pub variant: String,
    pub joint_count: usize,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Segment name -> expected length in canvas units.
    #[serde(default)]
    pub bone_lengths: HashMap<String, f32>,
    /// Parameter name -> inclusive [min, max] range.
    #[serde(default)]
    pub angle_limits: HashMap<String, (f32, f32)>,
    /// Segment name -> fractional tolerance on the expected length.
    #[serde(default)]
    pub tolerance: HashMap<String, f32>,
}

impl RigConfig {
    /// Canvas center, the anchor for canonical standing poses.
    #[inline]
    pub fn canvas_center(&self) -> (f32, f32) {
        (self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    #[inline]
    pub fn bone_length_or(&self, segment: &str, default: f32) -> f32 {
        self.bone_lengths.get(segment).copied().unwrap_or(default)
    }

    #[inline]
    pub fn tolerance_or(&self, segment: &str, default: f32) -> f32 {
        self.tolerance.get(segment).copied().unwrap_or(default)
    }

    #[inline]
    pub fn angle_limit_or(&self, parameter: &str, default: (f32, f32)) -> (f32, f32) {
        self.angle_limits.get(parameter).copied().unwrap_or(default)
    }
}

/// One entry of the declarative source document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(default)]
    pub joint_count: Option<usize>,
    /// `proportions` is accepted as a legacy alias for `bone_lengths`.
    #[serde(default, alias = "proportions")]
    pub bone_lengths: HashMap<String, f32>,
    #[serde(default)]
    pub angle_limits: HashMap<String, (f32, f32)>,
    #[serde(default)]
    pub tolerance: HashMap<String, f32>,
}

/// Declarative configuration source, keyed `skeleton_<variant>`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RigConfigSource {
    #[serde(flatten)]
    entries: HashMap<String, SourceEntry>,
}

impl RigConfigSource {
    /// Parse the host-supplied JSON document. Loaded once, ahead of serving.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn entry(&self, variant: &str) -> Option<&SourceEntry> {
        self.entries.get(&format!("skeleton_{variant}"))
    }

    /// Variant names declared by this source, `skeleton_` prefix stripped.
    pub fn variants(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter_map(|k| k.strip_prefix("skeleton_"))
            .map(str::to_string)
            .collect()
    }

    /// Materialize a full `RigConfig` from a source entry.
    pub fn build(&self, variant: &str) -> Option<RigConfig> {
        let entry = self.entry(variant)?;
        Some(RigConfig {
            variant: variant.to_string(),
            joint_count: entry.joint_count.unwrap_or(0),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            bone_lengths: entry.bone_lengths.clone(),
            angle_limits: entry.angle_limits.clone(),
            tolerance: entry.tolerance.clone(),
        })
    }
}

/// Built-in defaults used when the source is absent or lacks the variant.
pub fn default_config(variant: &str) -> Option<RigConfig> {
    match variant {
        "6dof" => {
            let mut bone_lengths = HashMap::new();
            bone_lengths.insert("head_radius".to_string(), 20.0);
            bone_lengths.insert("body_length".to_string(), 60.0);
            bone_lengths.insert("arm_length".to_string(), 40.0);
            bone_lengths.insert("leg_length".to_string(), 50.0);

            let mut angle_limits = HashMap::new();
            angle_limits.insert("body_angle".to_string(), (-45.0, 45.0));
            angle_limits.insert("arm_angle".to_string(), (-180.0, 180.0));
            angle_limits.insert("leg_angle".to_string(), (-45.0, 45.0));

            Some(RigConfig {
                variant: variant.to_string(),
                joint_count: 6,
                canvas_width: DEFAULT_CANVAS_WIDTH,
                canvas_height: DEFAULT_CANVAS_HEIGHT,
                bone_lengths,
                angle_limits,
                tolerance: HashMap::new(),
            })
        }
        "12dof" => {
            let mut bone_lengths = HashMap::new();
            bone_lengths.insert("head_radius".to_string(), 20.0);
            bone_lengths.insert("neck_to_head".to_string(), 20.0);
            bone_lengths.insert("neck_to_waist".to_string(), 60.0);
            bone_lengths.insert("shoulder_width".to_string(), 40.0);
            bone_lengths.insert("arm_length".to_string(), 50.0);
            bone_lengths.insert("hip_width".to_string(), 30.0);
            bone_lengths.insert("leg_length".to_string(), 50.0);

            let mut tolerance = HashMap::new();
            tolerance.insert("head_radius".to_string(), 0.3);
            tolerance.insert("neck_to_head".to_string(), 0.3);
            tolerance.insert("neck_to_waist".to_string(), 0.3);
            tolerance.insert("shoulder_width".to_string(), 0.4);
            tolerance.insert("arm_length".to_string(), 0.5);
            tolerance.insert("hip_width".to_string(), 0.4);
            tolerance.insert("leg_length".to_string(), 0.6);

            Some(RigConfig {
                variant: variant.to_string(),
                joint_count: 12,
                canvas_width: DEFAULT_CANVAS_WIDTH,
                canvas_height: DEFAULT_CANVAS_HEIGHT,
                bone_lengths,
                angle_limits: HashMap::new(),
                tolerance,
            })
        }
        _ => None,
    }
}

/// Variants with built-in default tables.
pub const DEFAULT_VARIANTS: &[&str] = &["6dof", "12dof"];

#[cfg(test)]
mod tests {
    use super::*;

    /// it should accept `proportions` as an alias for `bone_lengths`
    #[test]
    fn source_accepts_proportions_alias() {
        let src = RigConfigSource::from_json(
            r#"{ "skeleton_12dof": { "joint_count": 12, "proportions": { "arm_length": 55.0 } } }"#,
        )
        .unwrap();
        let cfg = src.build("12dof").unwrap();
        assert_eq!(cfg.joint_count, 12);
        assert_eq!(cfg.bone_length_or("arm_length", 0.0), 55.0);
    }

    /// it should expose declared variants with the prefix stripped
    #[test]
    fn source_variant_names() {
        let src = RigConfigSource::from_json(
            r#"{ "skeleton_6dof": {}, "skeleton_12dof": {}, "unrelated": {} }"#,
        )
        .unwrap();
        let mut names = src.variants();
        names.sort();
        assert_eq!(names, vec!["12dof", "6dof"]);
    }

    /// it should carry the documented default tables for both variants
    #[test]
    fn builtin_defaults_present() {
        let cfg6 = default_config("6dof").unwrap();
        assert_eq!(cfg6.joint_count, 6);
        assert_eq!(cfg6.angle_limit_or("body_angle", (0.0, 0.0)), (-45.0, 45.0));

        let cfg12 = default_config("12dof").unwrap();
        assert_eq!(cfg12.joint_count, 12);
        assert_eq!(cfg12.bone_length_or("neck_to_waist", 0.0), 60.0);
        assert_eq!(cfg12.tolerance_or("leg_length", 0.0), 0.6);

        assert!(default_config("24dof").is_none());
    }
}
