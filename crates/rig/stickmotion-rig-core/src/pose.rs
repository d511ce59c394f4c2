//! 2D pose model shared by both rig variants.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// A named 2D point in canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub x: f32,
    pub y: f32,
}

impl Joint {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another joint.
    #[inline]
    pub fn distance(&self, other: &Joint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

pub type JointMap = HashMap<String, Joint>;
pub type ParamMap = HashMap<String, f32>;

/// One character's pose in a keyframe.
///
/// Coordinate rigs carry a joint-name -> point map; angular rigs carry a
/// parameter-name -> scalar map. The external tag matches the rig's data
/// field name (`joints` / `pose`) so planner/fallback payloads deserialize
/// directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pose {
    #[serde(rename = "joints")]
    Joints(JointMap),
    #[serde(rename = "pose")]
    Params(ParamMap),
}

impl Pose {
    pub fn joints(&self) -> Option<&JointMap> {
        match self {
            Pose::Joints(map) => Some(map),
            Pose::Params(_) => None,
        }
    }

    pub fn joints_mut(&mut self) -> Option<&mut JointMap> {
        match self {
            Pose::Joints(map) => Some(map),
            Pose::Params(_) => None,
        }
    }

    pub fn params(&self) -> Option<&ParamMap> {
        match self {
            Pose::Joints(_) => None,
            Pose::Params(map) => Some(map),
        }
    }

    pub fn params_mut(&mut self) -> Option<&mut ParamMap> {
        match self {
            Pose::Joints(_) => None,
            Pose::Params(map) => Some(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should serialize with the rig data field name as the tag
    #[test]
    fn pose_serde_tags() {
        let mut joints = JointMap::new();
        joints.insert("head".to_string(), Joint::new(400.0, 240.0));
        let s = serde_json::to_string(&Pose::Joints(joints)).unwrap();
        assert!(s.starts_with(r#"{"joints""#), "{s}");

        let mut params = ParamMap::new();
        params.insert("body_angle".to_string(), 15.0);
        let s = serde_json::to_string(&Pose::Params(params)).unwrap();
        assert!(s.starts_with(r#"{"pose""#), "{s}");
    }

    /// it should measure joint distance euclideanly
    #[test]
    fn joint_distance() {
        let a = Joint::new(0.0, 0.0);
        let b = Joint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }
}
