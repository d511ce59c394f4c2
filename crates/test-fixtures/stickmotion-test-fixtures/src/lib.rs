use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "rig-configs")]
    rig_configs: HashMap<String, String>,
    plans: HashMap<String, String>,
    timelines: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn read_fixture(map: &HashMap<String, String>, kind: &str, name: &str) -> Result<String> {
    let rel = map
        .get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))?;
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

/// Declarative rig configuration sources (`skeleton_<variant>` documents).
pub mod rig_configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.rig_configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(&MANIFEST.rig_configs, "rig-config", name)
    }
}

/// Planner-shaped action plans (character roster plus action descriptors).
pub mod plans {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.plans.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(&MANIFEST.plans, "plan", name)
    }
}

/// Pre-built timelines, including external-fallback payloads.
pub mod timelines {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.timelines.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(&MANIFEST.timelines, "timeline", name)
    }
}
