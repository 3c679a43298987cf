use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::generator::{SHAPE_KEYVALUES, SHAPE_NORMALIZED};
use crate::types::{AttributePath, Domain, FieldKey, SchemaLocator, SchemaName, Subject};

/// Nesting convention of a generated example record.
///
/// The same schema renders to either shape; `KeyValues` is one nesting
/// level shallower than `Normalized` for multi-valued attributes (the
/// scalar sits where `Normalized` keeps a `value` sub-key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// Nested mapping; multi-valued attributes carry a `value` sub-key
    /// alongside metadata siblings.
    Normalized,
    /// Flat mapping from attribute to its scalar/compound value.
    KeyValues,
}

impl RecordShape {
    /// Wire/file-name token for this shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordShape::Normalized => SHAPE_NORMALIZED,
            RecordShape::KeyValues => SHAPE_KEYVALUES,
        }
    }
}

/// Provenance block attached to every synthesized sample.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleMetadata {
    /// Record shape the sample was generated in.
    pub shape: RecordShape,
    /// Locator the external generator was called with.
    pub locator: SchemaLocator,
    /// Domain the run targets.
    pub domain: Domain,
    /// Subject of the sample's own schema.
    pub subject: Subject,
    /// Name of the sample's own schema.
    pub name: SchemaName,
    /// Synthesis timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Atomic output of the sample synthesizer.
///
/// Created per call, immutable, consumed once by the pair generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSample {
    /// Perturbed record after synonym renaming and optional snake-casing.
    pub modified_sample: Value,
    /// Record after exclusion and free-text blanking, before renaming.
    pub original_sample: Value,
    /// Attribute keys stripped from the record (reason: ambiguity).
    pub excluded_properties: Vec<AttributePath>,
    /// Paths whose free-text values were blanked (reason: gibberish).
    pub unfitting_properties: Vec<AttributePath>,
    /// Old-to-new key mapping for synonym renames (reason: synonyms).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub modified_properties: IndexMap<FieldKey, FieldKey>,
    /// Proposed match score used for embedding training.
    pub match_label: f64,
    /// Provenance of the sample.
    pub metadata: SampleMetadata,
}

/// One half of a persisted triplet (positive or negative).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripletSide {
    /// The perturbed record presented to the model.
    pub sample: Value,
    /// Paths whose free-text values were blanked.
    pub unfitting_properties: Vec<AttributePath>,
    /// Attribute keys stripped from the record.
    pub excluded_properties: Vec<AttributePath>,
    /// Old-to-new key mapping for synonym renames.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub modified_properties: IndexMap<FieldKey, FieldKey>,
    /// Match label (high score indicates a good match).
    pub label: f64,
    /// Provenance of the side's sample.
    pub metadata: SampleMetadata,
}

/// One persisted training example: target record plus a matching and a
/// non-matching perturbed counterpart. Never mutated after creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingTriplet {
    /// The correct schema representation: the positive's unrenamed record.
    pub target: Value,
    /// Perturbed sample of the target schema.
    pub positive: TripletSide,
    /// Perturbed sample of a verified non-matching schema.
    pub negative: TripletSide,
}

impl TrainingTriplet {
    /// Merge a positive and a negative generated sample into one triplet.
    ///
    /// The positive side carries its modified (renamed) record while the
    /// negative side carries its unrenamed record; the target is the
    /// positive's unrenamed record.
    pub fn assemble(positive: GeneratedSample, negative: GeneratedSample) -> Self {
        Self {
            target: positive.original_sample,
            positive: TripletSide {
                sample: positive.modified_sample,
                unfitting_properties: positive.unfitting_properties,
                excluded_properties: positive.excluded_properties,
                modified_properties: positive.modified_properties,
                label: positive.match_label,
                metadata: positive.metadata,
            },
            negative: TripletSide {
                sample: negative.original_sample,
                unfitting_properties: negative.unfitting_properties,
                excluded_properties: negative.excluded_properties,
                modified_properties: negative.modified_properties,
                label: negative.match_label,
                metadata: negative.metadata,
            },
        }
    }
}
