//! Stickmotion rig core (engine-agnostic)
//!
//! This crate defines the structural side of the stick-figure pipeline: the
//! per-variant rig configuration and its loader/cache, the 2D pose model, and
//! the `Rig` trait with its two concrete degree-of-freedom variants
//! (coordinate joints and angular parameters).

pub mod angular;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod loader;
pub mod pose;
pub mod rig;

// Re-exports for consumers (the animation core and host adapters)
pub use angular::AngularRig;
pub use config::{RigConfig, RigConfigSource, CANVAS_MARGIN, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
pub use coordinate::CoordinateRig;
pub use error::{PoseViolation, RigError, ViolationKind};
pub use loader::ConfigCache;
pub use pose::{Joint, JointMap, ParamMap, Pose};
pub use rig::{Rig, RigRegistry};
