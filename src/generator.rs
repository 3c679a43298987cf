use std::collections::HashMap;

use serde_json::Value;

use crate::data::RecordShape;
use crate::errors::SynthError;
use crate::types::SchemaLocator;

/// External example-record generator.
///
/// For a fixed locator and shape the output should be a structurally
/// representative record of that schema; values may vary between calls.
/// Safe for concurrent reads from multiple workers.
pub trait ExampleGenerator: Send + Sync {
    /// Produce one example record for the schema behind `locator`.
    fn generate(&self, locator: &str, shape: RecordShape) -> Result<Value, SynthError>;
}

/// In-memory example source for tests and small corpora.
///
/// Maps `(locator, shape)` to a fixture record returned on every call.
#[derive(Clone, Debug, Default)]
pub struct InMemoryGenerator {
    records: HashMap<(SchemaLocator, RecordShape), Value>,
}

impl InMemoryGenerator {
    /// Create an empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the record returned for one locator/shape pair.
    pub fn with_record(
        mut self,
        locator: impl Into<SchemaLocator>,
        shape: RecordShape,
        record: Value,
    ) -> Self {
        self.records.insert((locator.into(), shape), record);
        self
    }
}

impl ExampleGenerator for InMemoryGenerator {
    fn generate(&self, locator: &str, shape: RecordShape) -> Result<Value, SynthError> {
        self.records
            .get(&(locator.to_string(), shape))
            .cloned()
            .ok_or_else(|| SynthError::Generation {
                locator: locator.to_string(),
                reason: "no example registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registered_records_are_returned_per_shape() {
        let generator = InMemoryGenerator::new()
            .with_record("device/Device", RecordShape::KeyValues, json!({"id": 1}))
            .with_record(
                "device/Device",
                RecordShape::Normalized,
                json!({"id": {"value": 1}}),
            );

        let flat = generator
            .generate("device/Device", RecordShape::KeyValues)
            .unwrap();
        assert_eq!(flat, json!({"id": 1}));

        let nested = generator
            .generate("device/Device", RecordShape::Normalized)
            .unwrap();
        assert_eq!(nested, json!({"id": {"value": 1}}));
    }

    #[test]
    fn unknown_locators_fail_generation() {
        let generator = InMemoryGenerator::new();
        assert!(matches!(
            generator.generate("device/Missing", RecordShape::KeyValues),
            Err(SynthError::Generation { .. })
        ));
    }
}
