use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use crate::constants::env as env_keys;
use crate::constants::generator::{
    DEFAULT_DEPTH, DEFAULT_DEPTH_CEILING, DEFAULT_ITERATIONS, DEFAULT_MAX_ATTEMPTS_PER_SLOT,
    DEFAULT_OUTPUT_DIR, DEFAULT_RETAINED_PROPERTIES, DEFAULT_SYNONYM_RATIO,
};
use crate::data::RecordShape;
use crate::errors::SynthError;
use crate::types::{Domain, FieldKey, SchemaName, Subject};

/// Top-level synthesis configuration.
#[derive(Clone, Debug)]
pub struct SynthConfig {
    /// Number of triplets to persist per noise level.
    pub iterations: usize,
    /// Requested noise depth: one level per count of additionally excluded
    /// unique properties.
    pub depth: usize,
    /// Ceiling clamped onto `depth` before a run starts.
    pub depth_ceiling: usize,
    /// Fraction of top-level keys renamed to synonyms, in `[0, 1]`.
    pub synonym_ratio: f64,
    /// Rewrite modified-record keys to snake case as the final step.
    pub snake_case: bool,
    /// Domain the run targets (used for cross-subject negative draws).
    pub domain: Domain,
    /// Subject the run targets.
    pub subject: Subject,
    /// Schema name the run targets; empty fans out over the whole subject.
    pub name: SchemaName,
    /// Draw negative schemas from any subject of the domain instead of the
    /// target's subject.
    pub cross_subject_negatives: bool,
    /// Produce the normalized-shape stream.
    pub normalized_out: bool,
    /// Produce the key-values-shape stream.
    pub keyvalues_out: bool,
    /// Attribute keys that survive exclusion at every depth.
    pub retained_properties: HashSet<FieldKey>,
    /// Directory holding the per-worker triplet streams.
    pub output_dir: PathBuf,
    /// Retry budget per iteration slot before the worker gives up.
    pub max_attempts_per_slot: usize,
    /// Optional seed for reproducible worker RNG streams; `None` seeds
    /// each worker from the operating system.
    pub seed: Option<u64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            depth: DEFAULT_DEPTH,
            depth_ceiling: DEFAULT_DEPTH_CEILING,
            synonym_ratio: DEFAULT_SYNONYM_RATIO,
            snake_case: false,
            domain: String::new(),
            subject: String::new(),
            name: String::new(),
            cross_subject_negatives: false,
            normalized_out: true,
            keyvalues_out: false,
            retained_properties: DEFAULT_RETAINED_PROPERTIES
                .iter()
                .map(|key| (*key).to_string())
                .collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_attempts_per_slot: DEFAULT_MAX_ATTEMPTS_PER_SLOT,
            seed: None,
        }
    }
}

impl SynthConfig {
    /// Build a configuration from `SCHEMA_TRIPLETS_*` environment
    /// variables, falling back to defaults for anything unset or
    /// unparseable.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Build a configuration from an injected variable lookup.
    ///
    /// Tests use this to avoid mutating process-global environment state.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            iterations: parse_or(&lookup, env_keys::ITERATIONS, defaults.iterations),
            depth: parse_or(&lookup, env_keys::DEPTH, defaults.depth),
            depth_ceiling: parse_or(&lookup, env_keys::DEPTH_CEILING, defaults.depth_ceiling),
            synonym_ratio: parse_or(&lookup, env_keys::SYNONYM_RATIO, defaults.synonym_ratio),
            snake_case: parse_flag(&lookup, env_keys::SNAKE_CASE, defaults.snake_case),
            domain: lookup(env_keys::DOMAIN).unwrap_or(defaults.domain),
            subject: lookup(env_keys::SUBJECT).unwrap_or(defaults.subject),
            name: lookup(env_keys::NAME).unwrap_or(defaults.name),
            cross_subject_negatives: parse_flag(
                &lookup,
                env_keys::CROSS_SUBJECT_NEGATIVES,
                defaults.cross_subject_negatives,
            ),
            normalized_out: parse_flag(&lookup, env_keys::NORMALIZED_OUT, defaults.normalized_out),
            keyvalues_out: parse_flag(&lookup, env_keys::KEYVALUES_OUT, defaults.keyvalues_out),
            retained_properties: lookup(env_keys::RETAINED_PROPERTIES)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|key| !key.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.retained_properties),
            output_dir: lookup(env_keys::OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            max_attempts_per_slot: parse_or(
                &lookup,
                env_keys::MAX_ATTEMPTS_PER_SLOT,
                defaults.max_attempts_per_slot,
            ),
            seed: lookup(env_keys::SEED).and_then(|raw| raw.trim().parse().ok()),
        }
    }

    /// Requested depth with the ceiling applied.
    pub fn clamped_depth(&self) -> usize {
        self.depth.min(self.depth_ceiling)
    }

    /// Record shapes enabled for output, in pipeline order.
    pub fn enabled_shapes(&self) -> Vec<RecordShape> {
        let mut shapes = Vec::new();
        if self.normalized_out {
            shapes.push(RecordShape::Normalized);
        }
        if self.keyvalues_out {
            shapes.push(RecordShape::KeyValues);
        }
        shapes
    }

    /// Validate value ranges that cannot be expressed in the types.
    pub fn validated(self) -> Result<Self, SynthError> {
        if !(0.0..=1.0).contains(&self.synonym_ratio) {
            return Err(SynthError::Configuration(format!(
                "synonym ratio {} is outside [0, 1]",
                self.synonym_ratio
            )));
        }
        if self.max_attempts_per_slot == 0 {
            return Err(SynthError::Configuration(
                "retry budget must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(lookup: impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    lookup(key)
        .map(|raw| {
            let raw = raw.trim();
            raw == "1" || raw.eq_ignore_ascii_case("true")
        })
        .unwrap_or(default)
}
