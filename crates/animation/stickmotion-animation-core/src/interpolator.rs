//! Temporal densification: linear interpolation between keyframe pairs.
//!
//! For each consecutive pair `(A@tA, B@tB)` the interpolator inserts
//! `floor(gap / frame_interval) - 1` frames at fractional positions
//! `t = j/(n+1)`. Original keyframes are carried over verbatim; inserted
//! frames are tagged `FrameSource::Interpolated` so downstream consumers can
//! tell synthesized frames from source truth.

use hashbrown::HashMap;
use log::warn;

use stickmotion_rig_core::{Joint, Pose};

use crate::data::{FrameSource, Keyframe, Timeline};
use crate::templates::lerp;

/// Build a dense timeline at `target_fps`. The input is consumed conceptually:
/// the returned timeline replaces it wholesale.
pub fn interpolate_timeline(timeline: &Timeline, target_fps: u32) -> Timeline {
    if target_fps == 0 {
        warn!("interpolation skipped: target_fps is 0");
        return timeline.clone();
    }
    if timeline.keyframes.len() < 2 {
        let mut out = timeline.clone();
        out.target_fps = Some(target_fps);
        return out;
    }

    let mut frames = Vec::with_capacity(timeline.keyframes.len());
    for pair in timeline.keyframes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        frames.push(a.clone());

        if b.timestamp_ms <= a.timestamp_ms {
            continue;
        }
        let gap = b.timestamp_ms - a.timestamp_ms;
        // floor(gap / (1000/fps)) - 1, computed in integers so that exact
        // multiples of the frame interval do not lose a frame to rounding.
        let count = (u64::from(gap) * u64::from(target_fps) / 1000).saturating_sub(1);
        for j in 1..=count {
            let t = j as f32 / (count + 1) as f32;
            frames.push(lerp_keyframes(a, b, t));
        }
    }
    if let Some(last) = timeline.keyframes.last() {
        frames.push(last.clone());
    }

    Timeline {
        characters: timeline.characters.clone(),
        keyframes: frames,
        variant: timeline.variant.clone(),
        method: timeline.method,
        target_fps: Some(target_fps),
    }
}

/// Linear blend of two keyframes at fraction `t`. Characters and joints
/// absent from either endpoint are omitted rather than extrapolated.
fn lerp_keyframes(a: &Keyframe, b: &Keyframe, t: f32) -> Keyframe {
    let gap = (b.timestamp_ms - a.timestamp_ms) as f32;
    let timestamp_ms = a.timestamp_ms + (gap * t).round() as u32;

    let mut characters = HashMap::new();
    for (character_id, pose_a) in &a.characters {
        let Some(pose_b) = b.characters.get(character_id) else {
            continue;
        };
        let Some(pose) = lerp_pose(pose_a, pose_b, t) else {
            continue;
        };
        characters.insert(character_id.clone(), pose);
    }

    Keyframe {
        timestamp_ms,
        description: Some(format!("interpolated (t={t:.2})")),
        characters,
        source: FrameSource::Interpolated,
    }
}

fn lerp_pose(a: &Pose, b: &Pose, t: f32) -> Option<Pose> {
    match (a, b) {
        (Pose::Joints(ja), Pose::Joints(jb)) => {
            let mut joints = HashMap::new();
            for (name, joint_a) in ja {
                if let Some(joint_b) = jb.get(name) {
                    joints.insert(
                        name.clone(),
                        Joint::new(lerp(joint_a.x, joint_b.x, t), lerp(joint_a.y, joint_b.y, t)),
                    );
                }
            }
            Some(Pose::Joints(joints))
        }
        (Pose::Params(pa), Pose::Params(pb)) => {
            let mut params = HashMap::new();
            for (name, value_a) in pa {
                if let Some(value_b) = pb.get(name) {
                    params.insert(name.clone(), lerp(*value_a, *value_b, t));
                }
            }
            Some(Pose::Params(params))
        }
        // Mismatched pose kinds cannot be blended.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Character, GenerationMethod};
    use stickmotion_rig_core::JointMap;

    fn kf(timestamp_ms: u32, x: f32) -> Keyframe {
        let mut joints = JointMap::new();
        joints.insert("waist".to_string(), Joint::new(x, 300.0));
        Keyframe::for_character(timestamp_ms, "key", "char1", Pose::Joints(joints))
    }

    fn timeline(keyframes: Vec<Keyframe>) -> Timeline {
        Timeline {
            characters: vec![Character::new("char1", "Hero", "#2196F3")],
            keyframes,
            variant: "12dof".to_string(),
            method: GenerationMethod::Template,
            target_fps: None,
        }
    }

    /// it should insert exactly 17 frames between 0 and 600 ms at 30 fps
    #[test]
    fn dense_insertion_count() {
        let out = interpolate_timeline(&timeline(vec![kf(0, 100.0), kf(600, 400.0)]), 30);
        assert_eq!(out.keyframes.len(), 19);
        assert_eq!(out.target_fps, Some(30));
        let inserted = out
            .keyframes
            .iter()
            .filter(|f| f.source == FrameSource::Interpolated)
            .count();
        assert_eq!(inserted, 17);
    }

    /// it should insert nothing when the gap fits the frame interval
    #[test]
    fn already_dense_pair_untouched() {
        let out = interpolate_timeline(&timeline(vec![kf(0, 100.0), kf(33, 110.0)]), 30);
        assert_eq!(out.keyframes.len(), 2);
        assert!(out
            .keyframes
            .iter()
            .all(|f| f.source == FrameSource::Key));
    }

    /// it should preserve endpoint coordinates exactly
    #[test]
    fn endpoints_survive_verbatim() {
        let source = timeline(vec![kf(0, 100.0), kf(600, 400.0)]);
        let out = interpolate_timeline(&source, 30);
        assert_eq!(out.keyframes.first().unwrap(), &source.keyframes[0]);
        assert_eq!(out.keyframes.last().unwrap(), &source.keyframes[1]);
    }

    /// it should lerp joint coordinates component-wise at t=j/(n+1)
    #[test]
    fn linear_coordinates() {
        let out = interpolate_timeline(&timeline(vec![kf(0, 100.0), kf(600, 400.0)]), 30);
        // 17 inserted -> first inserted at t = 1/18
        let first = &out.keyframes[1];
        assert_eq!(first.timestamp_ms, 33);
        let waist = &first.characters["char1"].joints().unwrap()["waist"];
        let expected = 100.0 + (400.0 - 100.0) / 18.0;
        assert!((waist.x - expected).abs() < 1e-3);
    }

    /// it should omit joints absent from either endpoint
    #[test]
    fn missing_joints_are_omitted() {
        let a = kf(0, 100.0);
        let mut b = kf(600, 400.0);
        if let Some(joints) = b.characters.get_mut("char1").and_then(Pose::joints_mut) {
            joints.insert("head".to_string(), Joint::new(400.0, 240.0));
        }
        let out = interpolate_timeline(&timeline(vec![a, b]), 30);
        let mid = &out.keyframes[9];
        assert_eq!(mid.source, FrameSource::Interpolated);
        let joints = mid.characters["char1"].joints().unwrap();
        assert!(joints.contains_key("waist"));
        assert!(!joints.contains_key("head"));
    }

    /// it should lerp angular parameters scalar-wise
    #[test]
    fn angular_params_lerp() {
        let mk = |timestamp_ms: u32, angle: f32| {
            let mut params = stickmotion_rig_core::ParamMap::new();
            params.insert("body_angle".to_string(), angle);
            Keyframe::for_character(timestamp_ms, "key", "char1", Pose::Params(params))
        };
        let mut t = timeline(vec![mk(0, 0.0), mk(100, 30.0)]);
        t.variant = "6dof".to_string();
        let out = interpolate_timeline(&t, 30);
        assert_eq!(out.keyframes.len(), 4);
        let mid = out.keyframes[1].characters["char1"].params().unwrap();
        assert!((mid["body_angle"] - 10.0).abs() < 1e-3);
    }
}
