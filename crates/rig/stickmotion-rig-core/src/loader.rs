//! Variant -> configuration resolution with a process-lifetime cache.
//!
//! Resolution order: declarative source entry, then built-in defaults, then
//! `RigError::UnsupportedVariant`. The first successful load wins; concurrent
//! first loads for the same variant converge on a single cached instance.

use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::HashMap;
use log::info;

use crate::config::{default_config, RigConfig, RigConfigSource, DEFAULT_VARIANTS};
use crate::error::RigError;

/// The sole process-wide mutable state of the core.
#[derive(Debug, Default)]
pub struct ConfigCache {
    source: Option<RigConfigSource>,
    configs: Mutex<HashMap<String, Arc<RigConfig>>>,
}

impl ConfigCache {
    pub fn new(source: Option<RigConfigSource>) -> Self {
        Self {
            source,
            configs: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a variant, loading and caching on first use.
    pub fn get(&self, variant: &str) -> Result<Arc<RigConfig>, RigError> {
        {
            let configs = self
                .configs
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(cfg) = configs.get(variant) {
                return Ok(Arc::clone(cfg));
            }
        }

        let built = Arc::new(self.build(variant)?);

        // Insert-once: a concurrent loser discards its instance and adopts
        // the winner's so every caller observes the same Arc.
        let mut configs = self
            .configs
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = configs
            .entry(variant.to_string())
            .or_insert_with(|| {
                info!(
                    "loaded rig config for '{}' ({} joints)",
                    variant, built.joint_count
                );
                Arc::clone(&built)
            });
        Ok(Arc::clone(entry))
    }

    /// Variants resolvable through this cache (source entries plus defaults).
    pub fn known_variants(&self) -> Vec<String> {
        let mut names: Vec<String> = DEFAULT_VARIANTS.iter().map(|v| v.to_string()).collect();
        if let Some(source) = &self.source {
            for v in source.variants() {
                if !names.contains(&v) {
                    names.push(v);
                }
            }
        }
        names.sort();
        names
    }

    fn build(&self, variant: &str) -> Result<RigConfig, RigError> {
        if let Some(cfg) = self.source.as_ref().and_then(|s| s.build(variant)) {
            return Ok(cfg);
        }
        default_config(variant).ok_or_else(|| RigError::UnsupportedVariant {
            variant: variant.to_string(),
            available: self.known_variants(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should return the same Arc for repeated loads of one variant
    #[test]
    fn cache_returns_shared_instance() {
        let cache = ConfigCache::new(None);
        let a = cache.get("12dof").unwrap();
        let b = cache.get("12dof").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    /// it should prefer the source entry over built-in defaults
    #[test]
    fn source_wins_over_defaults() {
        let source = RigConfigSource::from_json(
            r#"{ "skeleton_12dof": { "joint_count": 12, "bone_lengths": { "arm_length": 99.0 } } }"#,
        )
        .unwrap();
        let cache = ConfigCache::new(Some(source));
        let cfg = cache.get("12dof").unwrap();
        assert_eq!(cfg.bone_length_or("arm_length", 0.0), 99.0);
        // Defaults still serve variants the source omits.
        assert!(cache.get("6dof").is_ok());
    }

    /// it should reject variants unknown to both source and defaults
    #[test]
    fn unknown_variant_errors() {
        let cache = ConfigCache::new(None);
        let err = cache.get("3dof").unwrap_err();
        let RigError::UnsupportedVariant { variant, available } = err;
        assert_eq!(variant, "3dof");
        assert!(available.contains(&"6dof".to_string()));
        assert!(available.contains(&"12dof".to_string()));
    }

    /// it should converge concurrent first loads on one cached instance
    #[test]
    fn concurrent_first_load_converges() {
        let cache = std::sync::Arc::new(ConfigCache::new(None));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = std::sync::Arc::clone(&cache);
                std::thread::spawn(move || cache.get("6dof").unwrap())
            })
            .collect();
        let configs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for cfg in &configs[1..] {
            assert!(Arc::ptr_eq(&configs[0], cfg));
        }
    }
}
