//! Directional walk.
//!
//! Joints are displaced from the standing pose by phase-based trigonometric
//! offsets while the figure's center x lerps from start to end; legs and arms
//! swing 180 degrees out of phase and the torso bounces on |sin|.

use std::f32::consts::PI;

use stickmotion_rig_core::{Joint, JointMap, Pose};

use crate::data::{Character, Keyframe};
use crate::descriptor::ActionParams;
use crate::templates::{lerp, ActionTemplate, TemplateContext};

const BASE_DURATION_MS: f32 = 1200.0;
const FRAME_INTERVAL_MS: u32 = 200;
const MIN_FRAMES: usize = 3;

const LEG_AMPLITUDE: f32 = 20.0;
const ARM_AMPLITUDE: f32 = 15.0;
const BOUNCE_AMPLITUDE: f32 = 5.0;

/// Distance from the canvas edge where a walk starts.
const EDGE_INSET: f32 = 100.0;

pub struct WalkTemplate {
    ctx: TemplateContext,
}

impl WalkTemplate {
    pub fn new(ctx: TemplateContext) -> Self {
        Self { ctx }
    }

    fn speed_multiplier(speed: &str) -> f32 {
        match speed {
            "slow" => 1.5,
            "fast" => 0.7,
            _ => 1.0,
        }
    }

    /// Walking joints around (x, y) at step phase `phase` (two full steps
    /// over the clip).
    fn walk_joints(x: f32, y: f32, phase: f32) -> JointMap {
        let leg_swing = (phase * PI).sin() * LEG_AMPLITUDE;
        let arm_swing = (phase * PI + PI).sin() * ARM_AMPLITUDE;
        let bounce = (phase * PI).sin().abs() * BOUNCE_AMPLITUDE;

        let mut joints = JointMap::new();
        joints.insert("head".to_string(), Joint::new(x, y - 60.0 - bounce));
        joints.insert("neck".to_string(), Joint::new(x, y - 40.0 - bounce));
        joints.insert("waist".to_string(), Joint::new(x, y + 20.0 - bounce));
        joints.insert(
            "left_shoulder".to_string(),
            Joint::new(x - 20.0, y - 35.0 - bounce),
        );
        joints.insert(
            "left_hand".to_string(),
            Joint::new(x - 35.0 + arm_swing, y + 10.0 - bounce),
        );
        joints.insert(
            "right_shoulder".to_string(),
            Joint::new(x + 20.0, y - 35.0 - bounce),
        );
        joints.insert(
            "right_hand".to_string(),
            Joint::new(x + 35.0 - arm_swing, y + 10.0 - bounce),
        );
        joints.insert(
            "left_hip".to_string(),
            Joint::new(x - 15.0, y + 20.0 - bounce),
        );
        // Feet stay on the ground line; only their x swings.
        joints.insert(
            "left_foot".to_string(),
            Joint::new(x - 15.0 - leg_swing, y + 70.0),
        );
        joints.insert(
            "right_hip".to_string(),
            Joint::new(x + 15.0, y + 20.0 - bounce),
        );
        joints.insert(
            "right_foot".to_string(),
            Joint::new(x + 15.0 + leg_swing, y + 70.0),
        );
        joints
    }

    fn description(index: usize, total: usize, direction: &str) -> String {
        if index == 0 {
            format!("start walking {direction}")
        } else if index == total - 1 {
            "stop walking".to_string()
        } else {
            format!("walking (step {index}/{})", total - 1)
        }
    }
}

impl ActionTemplate for WalkTemplate {
    fn action_type(&self) -> &'static str {
        "walk"
    }

    fn generate(&self, character: &Character, params: &ActionParams) -> Vec<Keyframe> {
        let direction = params.str_or("direction", "right");
        let distance = params.f32_or("distance", 200.0);

        let (start_x, end_x) = if direction == "left" {
            let start = self.ctx.canvas_width - EDGE_INSET;
            (start, start - distance)
        } else {
            (EDGE_INSET, EDGE_INSET + distance)
        };
        let center_y = self.ctx.canvas_height / 2.0;

        let duration = self.duration_ms(params);
        let num_frames = ((duration / FRAME_INTERVAL_MS) as usize + 1).max(MIN_FRAMES);

        let mut keyframes = Vec::with_capacity(num_frames);
        for i in 0..num_frames {
            let t = if num_frames > 1 {
                i as f32 / (num_frames - 1) as f32
            } else {
                0.0
            };
            let timestamp = (duration as f32 * t) as u32;
            let x = lerp(start_x, end_x, t);
            let phase = t * 2.0;

            keyframes.push(Keyframe::for_character(
                timestamp,
                Self::description(i, num_frames, direction),
                &character.id,
                Pose::Joints(Self::walk_joints(x, center_y, phase)),
            ));
        }
        keyframes
    }

    fn duration_ms(&self, params: &ActionParams) -> u32 {
        let speed = params.str_or("speed", "normal");
        (BASE_DURATION_MS * Self::speed_multiplier(speed)) as u32
    }

    fn validate_params(&self, params: &ActionParams) -> bool {
        let direction = params.str_or("direction", "right");
        let speed = params.str_or("speed", "normal");
        matches!(direction, "left" | "right") && matches!(speed, "slow" | "normal" | "fast")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> WalkTemplate {
        WalkTemplate::new(TemplateContext::default())
    }

    fn character() -> Character {
        Character::new("char1", "Hero", "#2196F3")
    }

    /// it should walk right from x=100 over the requested distance
    #[test]
    fn walk_right_covers_distance() {
        let params = ActionParams::from_value(serde_json::json!({
            "direction": "right", "speed": "normal", "distance": 200
        }));
        let template = template();
        assert!(template.validate_params(&params));

        let frames = template.generate(&character(), &params);
        assert!(frames.len() >= 3);

        let first = frames.first().unwrap().characters["char1"].joints().unwrap();
        let last = frames.last().unwrap().characters["char1"].joints().unwrap();
        assert!((first["waist"].x - 100.0).abs() < 1e-3);
        assert!((last["waist"].x - 300.0).abs() < 1e-3);
        assert!(frames.iter().all(|kf| kf.timestamp_ms <= 1200));
    }

    /// it should start at the opposite edge when walking left
    #[test]
    fn walk_left_starts_at_far_edge() {
        let params = ActionParams::from_value(serde_json::json!({ "direction": "left" }));
        let frames = template().generate(&character(), &params);
        let first = frames.first().unwrap().characters["char1"].joints().unwrap();
        assert!((first["waist"].x - 700.0).abs() < 1e-3);
    }

    /// it should scale duration by the speed multiplier
    #[test]
    fn speed_scales_duration() {
        let template = template();
        let slow = ActionParams::from_value(serde_json::json!({ "speed": "slow" }));
        let fast = ActionParams::from_value(serde_json::json!({ "speed": "fast" }));
        assert_eq!(template.duration_ms(&slow), 1800);
        assert_eq!(template.duration_ms(&fast), 840);
        assert_eq!(template.duration_ms(&ActionParams::new()), 1200);
    }

    /// it should emit strictly increasing timestamps ending at the duration
    #[test]
    fn timestamps_strictly_increase() {
        let template = template();
        for speed in ["slow", "normal", "fast"] {
            let params = ActionParams::from_value(serde_json::json!({ "speed": speed }));
            let frames = template.generate(&character(), &params);
            for pair in frames.windows(2) {
                assert!(pair[0].timestamp_ms < pair[1].timestamp_ms);
            }
            assert_eq!(
                frames.last().unwrap().timestamp_ms,
                template.duration_ms(&params)
            );
        }
    }

    /// it should reject unknown directions and speeds
    #[test]
    fn rejects_bad_params() {
        let template = template();
        let bad_dir = ActionParams::from_value(serde_json::json!({ "direction": "up" }));
        let bad_speed = ActionParams::from_value(serde_json::json!({ "speed": "sprint" }));
        assert!(!template.validate_params(&bad_dir));
        assert!(!template.validate_params(&bad_speed));
    }
}
