use std::io;

use thiserror::Error;

use crate::types::SchemaLocator;

/// Error type for catalog lookups, sample synthesis, and persistence
/// failures.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("example generator returned an invalid record for '{locator}': {reason}")]
    Generation {
        locator: SchemaLocator,
        reason: String,
    },
    #[error("requested sample of {requested} exceeds eligible population of {available}")]
    Sampling {
        requested: usize,
        available: usize,
    },
    #[error("catalog has no usable schemas for '{scope}'")]
    EmptyCatalog { scope: String },
    #[error("output stream failure: {0}")]
    Persistence(#[from] io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("retry budget of {attempts} attempts exhausted at noise level {level}")]
    Exhausted { level: usize, attempts: usize },
}

impl SynthError {
    /// True for failures the pair generator absorbs by abandoning the
    /// current attempt and retrying with fresh random choices. Terminal
    /// kinds (empty catalog, exhausted retry budget, bad configuration)
    /// stop the worker instead.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SynthError::Generation { .. }
                | SynthError::Sampling { .. }
                | SynthError::Persistence(_)
        )
    }
}
