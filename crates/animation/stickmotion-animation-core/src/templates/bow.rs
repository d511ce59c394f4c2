//! Polite bow.
//!
//! Fixed six-phase sequence: stand, half-bow, full-bow, hold, half-unbow,
//! stand. At bow angle theta the torso leans forward by `30*sin(theta)` and
//! dips by `20*(1-cos(theta))`, scaled per joint by its distance from the hip
//! pivot: the head moves fully, the hips not at all.

use stickmotion_rig_core::{Joint, JointMap, Pose};

use crate::data::{Character, Keyframe};
use crate::descriptor::ActionParams;
use crate::templates::{ActionTemplate, TemplateContext};

const BOW_DOWN_MS: u32 = 800;
const BOW_UP_MS: u32 = 600;
const DEFAULT_HOLD_MS: u32 = 500;

const FORWARD_AMPLITUDE: f32 = 30.0;
const DOWN_AMPLITUDE: f32 = 20.0;

pub struct BowTemplate {
    ctx: TemplateContext,
}

impl BowTemplate {
    pub fn new(ctx: TemplateContext) -> Self {
        Self { ctx }
    }

    fn depth_angle(depth: &str) -> f32 {
        match depth {
            "shallow" => 15.0,
            "deep" => 45.0,
            _ => 30.0,
        }
    }

    /// Bowing joints around (x, y) at `angle_deg` of forward lean.
    fn bow_joints(x: f32, y: f32, angle_deg: f32) -> JointMap {
        let rad = angle_deg.to_radians();
        let forward = rad.sin() * FORWARD_AMPLITUDE;
        let down = (1.0 - rad.cos()) * DOWN_AMPLITUDE;

        let mut joints = JointMap::new();
        joints.insert("head".to_string(), Joint::new(x + forward, y - 60.0 + down));
        joints.insert(
            "neck".to_string(),
            Joint::new(x + forward * 0.8, y - 40.0 + down * 0.8),
        );
        joints.insert("waist".to_string(), Joint::new(x, y + 20.0));
        joints.insert(
            "left_shoulder".to_string(),
            Joint::new(x - 20.0 + forward * 0.6, y - 35.0 + down * 0.6),
        );
        // Arms hang toward the ground while bowing.
        joints.insert(
            "left_hand".to_string(),
            Joint::new(x - 30.0 + forward * 0.4, y + 20.0),
        );
        joints.insert(
            "right_shoulder".to_string(),
            Joint::new(x + 20.0 + forward * 0.6, y - 35.0 + down * 0.6),
        );
        joints.insert(
            "right_hand".to_string(),
            Joint::new(x + 30.0 + forward * 0.4, y + 20.0),
        );
        joints.insert("left_hip".to_string(), Joint::new(x - 15.0, y + 20.0));
        joints.insert("left_foot".to_string(), Joint::new(x - 15.0, y + 70.0));
        joints.insert("right_hip".to_string(), Joint::new(x + 15.0, y + 20.0));
        joints.insert("right_foot".to_string(), Joint::new(x + 15.0, y + 70.0));
        joints
    }
}

impl ActionTemplate for BowTemplate {
    fn action_type(&self) -> &'static str {
        "bow"
    }

    fn generate(&self, character: &Character, params: &ActionParams) -> Vec<Keyframe> {
        let depth = params.str_or("depth", "normal");
        let hold_ms = params.u32_or("hold_duration", DEFAULT_HOLD_MS);
        let bow_angle = Self::depth_angle(depth);

        let (cx, cy) = self.ctx.center();
        let total = BOW_DOWN_MS + hold_ms + BOW_UP_MS;

        let half_bow = Pose::Joints(Self::bow_joints(cx, cy, bow_angle * 0.5));
        let full_bow = Pose::Joints(Self::bow_joints(cx, cy, bow_angle));

        let mut keyframes = Vec::new();
        keyframes.push(Keyframe::for_character(
            0,
            "prepare to bow",
            &character.id,
            self.ctx.standing_pose(cx, cy),
        ));
        keyframes.push(Keyframe::for_character(
            BOW_DOWN_MS / 2,
            "bowing down",
            &character.id,
            half_bow.clone(),
        ));
        keyframes.push(Keyframe::for_character(
            BOW_DOWN_MS,
            format!("bow ({depth})"),
            &character.id,
            full_bow.clone(),
        ));
        if hold_ms > 0 {
            keyframes.push(Keyframe::for_character(
                BOW_DOWN_MS + hold_ms,
                "holding the bow",
                &character.id,
                full_bow,
            ));
        }
        keyframes.push(Keyframe::for_character(
            BOW_DOWN_MS + hold_ms + BOW_UP_MS / 2,
            "rising back up",
            &character.id,
            half_bow,
        ));
        keyframes.push(Keyframe::for_character(
            total,
            "standing upright",
            &character.id,
            self.ctx.standing_pose(cx, cy),
        ));
        keyframes
    }

    fn duration_ms(&self, params: &ActionParams) -> u32 {
        let hold_ms = params.u32_or("hold_duration", DEFAULT_HOLD_MS);
        BOW_DOWN_MS + hold_ms + BOW_UP_MS
    }

    fn validate_params(&self, params: &ActionParams) -> bool {
        let depth = params.str_or("depth", "normal");
        matches!(depth, "shallow" | "normal" | "deep")
    }
}
