#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Schema catalog interface and in-memory snapshot.
pub mod catalog;
/// Free-text (noise) classification over generated records.
pub mod classifier;
/// Synthesis configuration types.
pub mod config;
/// Centralized constants used across synthesis, labeling, and output.
pub mod constants;
/// Sample, triplet, and record-shape types.
pub mod data;
/// Example-record generator interface and in-memory fixture source.
pub mod generator;
/// Dotted-path editing over nested records.
pub mod paths;
/// Shared/unique attribute-set analysis.
pub mod properties;
/// Schema-level worker fan-out.
pub mod runner;
/// Triplet persistence sinks.
pub mod sink;
/// Synonym-based field renaming and casing helpers.
pub mod synonyms;
/// Sample synthesis and pair generation.
pub mod synthesis;
/// Shared type aliases.
pub mod types;

mod errors;

pub use catalog::{locator_for, split_locator, InMemoryCatalog, SchemaCatalog, SchemaRef};
pub use classifier::{free_text_paths, is_free_text_sentence, FreeTextPaths};
pub use config::SynthConfig;
pub use data::{
    GeneratedSample, RecordShape, SampleMetadata, TrainingTriplet, TripletSide,
};
pub use errors::SynthError;
pub use generator::{ExampleGenerator, InMemoryGenerator};
pub use paths::{clear_path, delete_key};
pub use properties::{
    property_sets, shared_properties_by_domain, shared_properties_by_subject, PropertySets,
};
pub use runner::{CatalogRunner, ShapeRun, WorkerReport};
pub use sink::{JsonlTripletWriter, TripletSink};
pub use synonyms::{
    camel_case_split, camel_to_snake, randomize_key, snake_case_keys, StaticLexicon,
    SynonymCandidate, SynonymLexicon,
};
pub use synthesis::{GenerationReport, PairGenerator, SampleSynthesizer};
pub use types::{
    AttributePath, Domain, FieldKey, SchemaLocator, SchemaName, Subject, Word,
};
