/// Constants used for triplet match labeling.
pub mod labels {
    /// Match label assigned to positive (matching) samples.
    pub const MATCH_LABEL_POSITIVE: f64 = 0.9;
    /// Match label assigned to negative (non-matching) samples.
    pub const MATCH_LABEL_NEGATIVE: f64 = 0.1;
}

/// Constants used by sample synthesis and the pair-generation loop.
pub mod generator {
    /// Attribute keys retained through exclusion regardless of noise depth.
    pub const DEFAULT_RETAINED_PROPERTIES: [&str; 3] = ["id", "type", "@context"];
    /// Default iteration count per noise level.
    pub const DEFAULT_ITERATIONS: usize = 10;
    /// Default noise depth swept by the pair generator.
    pub const DEFAULT_DEPTH: usize = 1;
    /// Ceiling applied to the configured noise depth.
    pub const DEFAULT_DEPTH_CEILING: usize = 5;
    /// Default synonym-batch ratio (renaming disabled).
    pub const DEFAULT_SYNONYM_RATIO: f64 = 0.0;
    /// Maximum retried attempts for a single iteration slot before the
    /// worker surfaces an exhaustion error.
    pub const DEFAULT_MAX_ATTEMPTS_PER_SLOT: usize = 32;
    /// Default directory for persisted triplet streams.
    pub const DEFAULT_OUTPUT_DIR: &str = "output";
    /// File extension of persisted triplet streams.
    pub const OUTPUT_EXTENSION: &str = "jsonl";
    /// Wire name of the normalized record shape.
    pub const SHAPE_NORMALIZED: &str = "normalized";
    /// Wire name of the key-values record shape.
    pub const SHAPE_KEYVALUES: &str = "keyvalues";
}

/// Constants used by synonym-based field renaming.
pub mod synonyms {
    /// Minimum similarity (against the first candidate) a synonym must
    /// reach to stay in the replacement pool.
    pub const SIMILARITY_THRESHOLD: f64 = 0.1;
}

/// Environment variable names read by `SynthConfig::from_env`.
pub mod env {
    /// Iteration count per noise level.
    pub const ITERATIONS: &str = "SCHEMA_TRIPLETS_ITERATIONS";
    /// Requested noise depth.
    pub const DEPTH: &str = "SCHEMA_TRIPLETS_DEPTH";
    /// Ceiling clamped onto the requested depth.
    pub const DEPTH_CEILING: &str = "SCHEMA_TRIPLETS_DEPTH_CEILING";
    /// Synonym-batch ratio in `[0, 1]`.
    pub const SYNONYM_RATIO: &str = "SCHEMA_TRIPLETS_SYNONYM_RATIO";
    /// Snake-case rewrite flag.
    pub const SNAKE_CASE: &str = "SCHEMA_TRIPLETS_SNAKE_CASE";
    /// Target domain.
    pub const DOMAIN: &str = "SCHEMA_TRIPLETS_DOMAIN";
    /// Target subject.
    pub const SUBJECT: &str = "SCHEMA_TRIPLETS_SUBJECT";
    /// Target schema name (empty fans out over the whole subject).
    pub const NAME: &str = "SCHEMA_TRIPLETS_NAME";
    /// Cross-subject negative sampling flag.
    pub const CROSS_SUBJECT_NEGATIVES: &str = "SCHEMA_TRIPLETS_CROSS_SUBJECT_NEGATIVES";
    /// Normalized-shape output flag.
    pub const NORMALIZED_OUT: &str = "SCHEMA_TRIPLETS_NORMALIZED_OUT";
    /// Key-values-shape output flag.
    pub const KEYVALUES_OUT: &str = "SCHEMA_TRIPLETS_KEYVALUES_OUT";
    /// Comma-separated retained property list.
    pub const RETAINED_PROPERTIES: &str = "SCHEMA_TRIPLETS_RETAINED_PROPERTIES";
    /// Output directory for triplet streams.
    pub const OUTPUT_DIR: &str = "SCHEMA_TRIPLETS_OUTPUT_DIR";
    /// Retry budget per iteration slot.
    pub const MAX_ATTEMPTS_PER_SLOT: &str = "SCHEMA_TRIPLETS_MAX_ATTEMPTS_PER_SLOT";
    /// Optional deterministic seed for worker RNG streams.
    pub const SEED: &str = "SCHEMA_TRIPLETS_SEED";
}
