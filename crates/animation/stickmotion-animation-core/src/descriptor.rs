//! Planner-facing action descriptors.
//!
//! Descriptors arrive as loose JSON from the external planning collaborator;
//! `ActionParams` keeps the raw map and exposes typed accessors with the
//! defaults each template documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::Character;

/// Coarse emphasis tag attached by the planner. The template catalog keys its
/// amplitudes off explicit params, so this is carried through untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Gentle,
    #[default]
    Normal,
    Strong,
}

/// Loose parameter map with typed accessors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionParams(#[serde(default)] Map<String, Value>);

impl ActionParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the fields of a JSON object; any other value yields empty params.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn f32_or(&self, key: &str, default: f32) -> f32 {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .map_or(default, |v| v as f32)
    }

    pub fn u32_or(&self, key: &str, default: u32) -> u32 {
        self.0
            .get(key)
            .and_then(Value::as_u64)
            .map_or(default, |v| v as u32)
    }
}

/// One abstract instruction for the template engine (or the external
/// fallback, when the type is not in the catalog).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    #[serde(rename = "type")]
    pub action: String,
    #[serde(default)]
    pub params: ActionParams,
    #[serde(default)]
    pub intensity: Intensity,
}

impl ActionDescriptor {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            params: ActionParams::new(),
            intensity: Intensity::Normal,
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.set(key, value);
        self
    }
}

/// Ordered actions plus the character roster they apply to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    #[serde(default)]
    pub characters: Vec<Character>,
    pub actions: Vec<ActionDescriptor>,
}

impl ActionPlan {
    pub fn new(characters: Vec<Character>, actions: Vec<ActionDescriptor>) -> Self {
        Self {
            characters,
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// it should fall back to documented defaults for absent or mistyped keys
    #[test]
    fn params_typed_accessors() {
        let params = ActionParams::from_value(json!({
            "direction": "left",
            "distance": 250,
            "repeat": 2,
            "speed": 4
        }));
        assert_eq!(params.str_or("direction", "right"), "left");
        assert_eq!(params.f32_or("distance", 200.0), 250.0);
        assert_eq!(params.u32_or("repeat", 1), 2);
        // a numeric value under a string key falls back
        assert_eq!(params.str_or("speed", "normal"), "normal");
        assert_eq!(params.str_or("missing", "normal"), "normal");
    }

    /// it should deserialize planner JSON with defaults applied
    #[test]
    fn descriptor_from_planner_json() {
        let descriptor: ActionDescriptor = serde_json::from_value(json!({
            "type": "walk",
            "params": { "direction": "right", "speed": "fast" }
        }))
        .unwrap();
        assert_eq!(descriptor.action, "walk");
        assert_eq!(descriptor.intensity, Intensity::Normal);
        assert_eq!(descriptor.params.str_or("speed", "normal"), "fast");
    }
}
