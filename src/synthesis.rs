//! Sample synthesis and positive/negative pair generation.
//!
//! `SampleSynthesizer` produces one perturbed record with full
//! provenance; `PairGenerator` sweeps noise levels, pairs each positive
//! with a verified non-matching negative, and persists the triplets.

use std::collections::{BTreeSet, HashSet};

use chrono::Utc;
use indexmap::IndexMap;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::catalog::{locator_for, split_locator, SchemaCatalog, SchemaRef};
use crate::classifier::free_text_paths;
use crate::config::SynthConfig;
use crate::constants::labels::{MATCH_LABEL_NEGATIVE, MATCH_LABEL_POSITIVE};
use crate::data::{GeneratedSample, RecordShape, SampleMetadata, TrainingTriplet};
use crate::errors::SynthError;
use crate::generator::ExampleGenerator;
use crate::paths::{clear_path, delete_key};
use crate::properties::{property_sets, PropertySets};
use crate::sink::TripletSink;
use crate::synonyms::{randomize_key, snake_case_keys, SynonymLexicon};
use crate::types::{AttributePath, FieldKey, SchemaName, Subject};

/// Produces one perturbed record with full provenance.
pub struct SampleSynthesizer<'a> {
    generator: &'a dyn ExampleGenerator,
    lexicon: &'a dyn SynonymLexicon,
    domain: &'a str,
    synonym_ratio: f64,
    snake_case: bool,
    retained: &'a HashSet<FieldKey>,
}

impl<'a> SampleSynthesizer<'a> {
    /// Create a synthesizer over the run's collaborators and settings.
    pub fn new(
        generator: &'a dyn ExampleGenerator,
        lexicon: &'a dyn SynonymLexicon,
        domain: &'a str,
        synonym_ratio: f64,
        snake_case: bool,
        retained: &'a HashSet<FieldKey>,
    ) -> Self {
        Self {
            generator,
            lexicon,
            domain,
            synonym_ratio,
            snake_case,
            retained,
        }
    }

    /// Synthesize one perturbed sample for the schema behind `locator`.
    ///
    /// `unfitting` short-circuits free-text discovery; only pass paths
    /// computed against a structurally representative record of the same
    /// schema *and shape*, since paths are shape- and position-dependent.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        shape: RecordShape,
        locator: &str,
        match_label: f64,
        excluded: &BTreeSet<AttributePath>,
        unfitting: Option<&[AttributePath]>,
        rng: &mut R,
    ) -> Result<GeneratedSample, SynthError> {
        let mut record = self.generator.generate(locator, shape)?;
        if !record.is_object() {
            return Err(SynthError::Generation {
                locator: locator.to_string(),
                reason: format!("expected a mapping, got {}", value_kind(&record)),
            });
        }

        let unfitting_properties: Vec<AttributePath> = match unfitting {
            Some(paths) => paths.to_vec(),
            None => free_text_paths(&record),
        };
        debug!(locator, unfitting = unfitting_properties.len(), "classified free-text leaves");

        for key in excluded {
            delete_key(&mut record, key);
        }
        for path in &unfitting_properties {
            clear_path(&mut record, path);
        }

        let original_sample = record.clone();
        let mut modified_sample = record;
        let mut modified_properties = IndexMap::new();

        if self.synonym_ratio > 0.0 {
            if let Value::Object(map) = &mut modified_sample {
                let requested = (map.len() as f64 * self.synonym_ratio).floor() as usize;
                let eligible: Vec<FieldKey> = map
                    .keys()
                    .filter(|key| !self.retained.contains(*key))
                    .cloned()
                    .collect();
                if requested > eligible.len() {
                    return Err(SynthError::Sampling {
                        requested,
                        available: eligible.len(),
                    });
                }
                let chosen: Vec<FieldKey> =
                    eligible.choose_multiple(rng, requested).cloned().collect();
                for key in chosen {
                    let renamed = randomize_key(self.lexicon, &key, rng);
                    if let Some(value) = map.shift_remove(&key) {
                        // Renamed fields move to the end of the mapping.
                        map.insert(renamed.clone(), value);
                        modified_properties.insert(key, renamed);
                    }
                }
            }
        }

        if self.snake_case {
            modified_sample = snake_case_keys(&modified_sample);
        }

        let (subject, name) = split_locator(locator)?;
        Ok(GeneratedSample {
            modified_sample,
            original_sample,
            excluded_properties: excluded.iter().cloned().collect(),
            unfitting_properties,
            modified_properties,
            match_label,
            metadata: SampleMetadata {
                shape,
                locator: locator.to_string(),
                domain: self.domain.to_string(),
                subject,
                name,
                generated_at: Utc::now(),
            },
        })
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Outcome summary for one pair-generation sweep.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerationReport {
    /// Noise levels swept (after the depth clamp).
    pub levels: usize,
    /// Triplets persisted across all levels.
    pub triplets_written: usize,
}

/// Orchestrates positive/negative synthesis across a noise-depth sweep.
pub struct PairGenerator<'a> {
    catalog: &'a dyn SchemaCatalog,
    generator: &'a dyn ExampleGenerator,
    lexicon: &'a dyn SynonymLexicon,
    config: &'a SynthConfig,
}

impl<'a> PairGenerator<'a> {
    /// Create a pair generator over the run's collaborators.
    pub fn new(
        catalog: &'a dyn SchemaCatalog,
        generator: &'a dyn ExampleGenerator,
        lexicon: &'a dyn SynonymLexicon,
        config: &'a SynthConfig,
    ) -> Self {
        Self {
            catalog,
            generator,
            lexicon,
            config,
        }
    }

    /// Sweep noise levels `0..depth`, persisting `iterations` triplets at
    /// each level.
    ///
    /// Retryable failures (generation, sampling, persistence) abandon the
    /// attempt and retry with fresh random choices, bounded per iteration
    /// slot by the configured retry budget; terminal conditions (empty
    /// catalog, exhausted budget) stop the sweep.
    pub fn generate_samples<R: Rng + ?Sized>(
        &self,
        shape: RecordShape,
        target: &SchemaRef,
        sink: &mut dyn TripletSink,
        rng: &mut R,
    ) -> Result<GenerationReport, SynthError> {
        let depth = self.config.clamped_depth();
        let target_locator = target.locator();

        // Free-text baseline from one key-values reference record; reused
        // only when synthesis runs in that same shape, since paths do not
        // transfer across shapes.
        let reference = self
            .generator
            .generate(&target_locator, RecordShape::KeyValues)?;
        let baseline = free_text_paths(&reference);
        debug!(
            locator = %target_locator,
            baseline = baseline.len(),
            "computed free-text baseline"
        );
        let baseline = (shape == RecordShape::KeyValues).then_some(baseline);

        let sets = property_sets(self.catalog, &target.subject, &target.name)?;
        let unique_pool = eligible_unique(&sets, &self.config.retained_properties);
        let synthesizer = SampleSynthesizer::new(
            self.generator,
            self.lexicon,
            &target.domain,
            self.config.synonym_ratio,
            self.config.snake_case,
            &self.config.retained_properties,
        );

        let mut report = GenerationReport {
            levels: depth,
            triplets_written: 0,
        };
        for level in 0..depth {
            let extra_excluded = level.min(unique_pool.len());
            debug!(level, extra_excluded, "generating samples at noise level");

            let mut produced = 0;
            let mut slot_attempts = 0;
            while produced < self.config.iterations {
                slot_attempts += 1;
                if slot_attempts > self.config.max_attempts_per_slot {
                    return Err(SynthError::Exhausted {
                        level,
                        attempts: self.config.max_attempts_per_slot,
                    });
                }
                let attempt = self.attempt_triplet(
                    shape,
                    target,
                    &target_locator,
                    &sets,
                    &unique_pool,
                    extra_excluded,
                    level,
                    baseline.as_deref(),
                    &synthesizer,
                    sink,
                    rng,
                );
                match attempt {
                    Ok(()) => {
                        produced += 1;
                        slot_attempts = 0;
                        report.triplets_written += 1;
                    }
                    Err(err) if err.is_retryable() => {
                        error!(level, iteration = produced, %err, "sample attempt failed, retrying");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        info!(
            subject = %target.subject,
            name = %target.name,
            shape = shape.as_str(),
            written = report.triplets_written,
            "pair generation complete"
        );
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn attempt_triplet<R: Rng + ?Sized>(
        &self,
        shape: RecordShape,
        target: &SchemaRef,
        target_locator: &str,
        target_sets: &PropertySets,
        unique_pool: &[AttributePath],
        extra_excluded: usize,
        level: usize,
        baseline: Option<&[AttributePath]>,
        synthesizer: &SampleSynthesizer<'_>,
        sink: &mut dyn TripletSink,
        rng: &mut R,
    ) -> Result<(), SynthError> {
        let excluded = build_exclusion_set(
            &target_sets.shared,
            &self.config.retained_properties,
            unique_pool,
            extra_excluded,
            rng,
        )?;
        let positive = synthesizer.synthesize(
            shape,
            target_locator,
            MATCH_LABEL_POSITIVE,
            &excluded,
            baseline,
            rng,
        )?;

        let negative_subject = self.pick_negative_subject(target, rng)?;
        let negative_name = self.pick_negative_name(&negative_subject, &target.name, rng)?;
        let negative_locator = locator_for(&negative_subject, &negative_name);

        let negative_sets = property_sets(self.catalog, &negative_subject, &negative_name)?;
        let negative_pool = eligible_unique(&negative_sets, &self.config.retained_properties);
        let negative_excluded = build_exclusion_set(
            &negative_sets.shared,
            &self.config.retained_properties,
            &negative_pool,
            level.min(negative_pool.len()),
            rng,
        )?;
        let negative = synthesizer.synthesize(
            shape,
            &negative_locator,
            MATCH_LABEL_NEGATIVE,
            &negative_excluded,
            None,
            rng,
        )?;

        sink.append(&TrainingTriplet::assemble(positive, negative))
    }

    fn pick_negative_subject<R: Rng + ?Sized>(
        &self,
        target: &SchemaRef,
        rng: &mut R,
    ) -> Result<Subject, SynthError> {
        if !self.config.cross_subject_negatives {
            return Ok(target.subject.clone());
        }
        let subjects = self.catalog.subjects_of(&target.domain);
        subjects
            .choose(rng)
            .cloned()
            .ok_or_else(|| SynthError::EmptyCatalog {
                scope: target.domain.clone(),
            })
    }

    /// Pick a negative schema name differing from the target's.
    ///
    /// A subject without a distinct candidate is terminal when negatives
    /// are confined to the target's subject; under cross-subject sampling
    /// it is retryable, since the next attempt draws a fresh subject.
    fn pick_negative_name<R: Rng + ?Sized>(
        &self,
        subject: &str,
        target_name: &str,
        rng: &mut R,
    ) -> Result<SchemaName, SynthError> {
        let candidates: Vec<SchemaName> = self
            .catalog
            .schemas_of(subject)
            .into_iter()
            .filter(|name| name != target_name)
            .collect();
        match candidates.choose(rng) {
            Some(name) => Ok(name.clone()),
            None if self.config.cross_subject_negatives => Err(SynthError::Sampling {
                requested: 1,
                available: 0,
            }),
            None => Err(SynthError::EmptyCatalog {
                scope: format!("{subject} (negatives for '{target_name}')"),
            }),
        }
    }
}

/// Unique properties eligible for exclusion sampling.
///
/// Retained properties are kept out of the pool so they can never be
/// excluded, whatever the depth.
fn eligible_unique(sets: &PropertySets, retained: &HashSet<FieldKey>) -> Vec<AttributePath> {
    let mut pool: Vec<AttributePath> = sets
        .unique
        .iter()
        .filter(|path| !retained.contains(*path))
        .cloned()
        .collect();
    pool.sort();
    pool
}

fn build_exclusion_set<R: Rng + ?Sized>(
    shared: &HashSet<AttributePath>,
    retained: &HashSet<FieldKey>,
    unique_pool: &[AttributePath],
    extra: usize,
    rng: &mut R,
) -> Result<BTreeSet<AttributePath>, SynthError> {
    if extra > unique_pool.len() {
        return Err(SynthError::Sampling {
            requested: extra,
            available: unique_pool.len(),
        });
    }
    let mut excluded: BTreeSet<AttributePath> = shared
        .iter()
        .filter(|path| !retained.contains(*path))
        .cloned()
        .collect();
    excluded.extend(unique_pool.choose_multiple(rng, extra).cloned());
    Ok(excluded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::generator::InMemoryGenerator;
    use crate::synonyms::StaticLexicon;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn retained() -> HashSet<FieldKey> {
        ["id", "type", "@context"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn device_record() -> Value {
        json!({
            "id": "urn:ngsi-ld:Device:001",
            "type": "Device",
            "@context": "https://example.org/context.jsonld",
            "serialNumber": "9845A",
            "description": "A temperature sensor located outdoors.",
            "batteryLevel": 0.75
        })
    }

    fn generator() -> InMemoryGenerator {
        InMemoryGenerator::new()
            .with_record("device/Device", RecordShape::KeyValues, device_record())
            .with_record(
                "device/Device",
                RecordShape::Normalized,
                json!({
                    "id": "urn:ngsi-ld:Device:001",
                    "type": "Device",
                    "@context": "https://example.org/context.jsonld",
                    "serialNumber": {"type": "Property", "value": "9845A"},
                    "description": {
                        "type": "Property",
                        "value": "A temperature sensor located outdoors."
                    },
                    "batteryLevel": {"type": "Property", "value": 0.75}
                }),
            )
    }

    fn synthesizer<'a>(
        generator: &'a InMemoryGenerator,
        lexicon: &'a StaticLexicon,
        retained: &'a HashSet<FieldKey>,
        ratio: f64,
        snake_case: bool,
    ) -> SampleSynthesizer<'a> {
        SampleSynthesizer::new(generator, lexicon, "Cities", ratio, snake_case, retained)
    }

    #[test]
    fn synthesize_excludes_blanks_and_records_provenance() {
        let generator = generator();
        let lexicon = StaticLexicon::new();
        let retained = retained();
        let synthesizer = synthesizer(&generator, &lexicon, &retained, 0.0, false);
        let mut rng = StdRng::seed_from_u64(3);

        let excluded: BTreeSet<AttributePath> = ["serialNumber".to_string()].into();
        let sample = synthesizer
            .synthesize(
                RecordShape::KeyValues,
                "device/Device",
                MATCH_LABEL_POSITIVE,
                &excluded,
                None,
                &mut rng,
            )
            .unwrap();

        assert_eq!(
            sample.original_sample,
            json!({
                "id": "urn:ngsi-ld:Device:001",
                "type": "Device",
                "@context": "https://example.org/context.jsonld",
                "description": "",
                "batteryLevel": 0.75
            })
        );
        assert_eq!(sample.modified_sample, sample.original_sample);
        assert_eq!(sample.excluded_properties, vec!["serialNumber"]);
        assert_eq!(sample.unfitting_properties, vec!["description"]);
        assert!(sample.modified_properties.is_empty());
        assert_eq!(sample.match_label, MATCH_LABEL_POSITIVE);
        assert_eq!(sample.metadata.subject, "device");
        assert_eq!(sample.metadata.name, "Device");
        assert_eq!(sample.metadata.domain, "Cities");
        assert_eq!(sample.metadata.shape, RecordShape::KeyValues);
    }

    #[test]
    fn synthesize_renames_only_unretained_keys() {
        let generator = generator();
        let lexicon = StaticLexicon::new().with_entry("battery", [("accumulator", 0.8)]);
        let retained = retained();
        let synthesizer = synthesizer(&generator, &lexicon, &retained, 1.0, false);
        let mut rng = StdRng::seed_from_u64(3);

        // Ratio 1.0 over 6 keys asks for 6 renames but only 3 keys are
        // eligible once retained identity fields are excluded.
        let result = synthesizer.synthesize(
            RecordShape::KeyValues,
            "device/Device",
            MATCH_LABEL_POSITIVE,
            &BTreeSet::new(),
            None,
            &mut rng,
        );
        assert!(matches!(result, Err(SynthError::Sampling { .. })));

        let synthesizer = synthesizer_with_ratio_half(&generator, &lexicon, &retained);
        let sample = synthesizer
            .synthesize(
                RecordShape::KeyValues,
                "device/Device",
                MATCH_LABEL_POSITIVE,
                &BTreeSet::new(),
                None,
                &mut rng,
            )
            .unwrap();
        assert_eq!(sample.modified_properties.len(), 3);
        for (old, new) in &sample.modified_properties {
            assert!(!retained.contains(old));
            assert!(sample.modified_sample.get(new).is_some());
            if old != new {
                assert!(sample.modified_sample.get(old).is_none());
            }
        }
        assert_eq!(
            sample.modified_properties.get("batteryLevel"),
            Some(&"accumulatorLevel".to_string())
        );
        // Identity fields survive untouched.
        for key in ["id", "type", "@context"] {
            assert!(sample.modified_sample.get(key).is_some());
        }
    }

    fn synthesizer_with_ratio_half<'a>(
        generator: &'a InMemoryGenerator,
        lexicon: &'a StaticLexicon,
        retained: &'a HashSet<FieldKey>,
    ) -> SampleSynthesizer<'a> {
        // floor(6 × 0.5) = 3 = the eligible population.
        SampleSynthesizer::new(generator, lexicon, "Cities", 0.5, false, retained)
    }

    #[test]
    fn snake_casing_applies_after_renaming() {
        let generator = generator();
        let lexicon = StaticLexicon::new();
        let retained = retained();
        let synthesizer = synthesizer(&generator, &lexicon, &retained, 0.0, true);
        let mut rng = StdRng::seed_from_u64(3);

        let sample = synthesizer
            .synthesize(
                RecordShape::KeyValues,
                "device/Device",
                MATCH_LABEL_POSITIVE,
                &BTreeSet::new(),
                None,
                &mut rng,
            )
            .unwrap();
        assert!(sample.modified_sample.get("serial_number").is_some());
        assert!(sample.modified_sample.get("battery_level").is_some());
        // The unrenamed record keeps its original casing.
        assert!(sample.original_sample.get("serialNumber").is_some());
    }

    #[test]
    fn non_mapping_records_fail_generation() {
        let generator = InMemoryGenerator::new().with_record(
            "device/Device",
            RecordShape::KeyValues,
            json!(["not", "a", "mapping"]),
        );
        let lexicon = StaticLexicon::new();
        let retained = retained();
        let synthesizer = synthesizer(&generator, &lexicon, &retained, 0.0, false);
        let mut rng = StdRng::seed_from_u64(3);

        let result = synthesizer.synthesize(
            RecordShape::KeyValues,
            "device/Device",
            MATCH_LABEL_POSITIVE,
            &BTreeSet::new(),
            None,
            &mut rng,
        );
        assert!(matches!(result, Err(SynthError::Generation { .. })));
    }

    #[test]
    fn precomputed_unfitting_paths_short_circuit_discovery() {
        let generator = generator();
        let lexicon = StaticLexicon::new();
        let retained = retained();
        let synthesizer = synthesizer(&generator, &lexicon, &retained, 0.0, false);
        let mut rng = StdRng::seed_from_u64(3);

        let supplied = vec!["batteryLevel".to_string()];
        let sample = synthesizer
            .synthesize(
                RecordShape::KeyValues,
                "device/Device",
                MATCH_LABEL_POSITIVE,
                &BTreeSet::new(),
                Some(&supplied),
                &mut rng,
            )
            .unwrap();
        assert_eq!(sample.unfitting_properties, supplied);
        assert_eq!(sample.original_sample["batteryLevel"], json!(""));
        // Discovery skipped: the sentence value stays in place.
        assert_eq!(
            sample.original_sample["description"],
            json!("A temperature sensor located outdoors.")
        );
    }

    fn two_schema_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_schema(
                "Cities",
                "device",
                "Device",
                [
                    "id",
                    "type",
                    "@context",
                    "serialNumber",
                    "description",
                    "batteryLevel",
                ],
            )
            .with_schema(
                "Cities",
                "device",
                "DeviceModel",
                ["id", "type", "@context", "brandName", "description"],
            )
    }

    fn two_schema_generator() -> InMemoryGenerator {
        generator()
            .with_record(
                "device/DeviceModel",
                RecordShape::KeyValues,
                json!({
                    "id": "urn:ngsi-ld:DeviceModel:001",
                    "type": "DeviceModel",
                    "@context": "https://example.org/context.jsonld",
                    "brandName": "Acme",
                    "description": "Catalog model for outdoor sensors."
                }),
            )
            .with_record(
                "device/DeviceModel",
                RecordShape::Normalized,
                json!({
                    "id": "urn:ngsi-ld:DeviceModel:001",
                    "type": "DeviceModel",
                    "@context": "https://example.org/context.jsonld",
                    "brandName": {"type": "Property", "value": "Acme"},
                    "description": {
                        "type": "Property",
                        "value": "Catalog model for outdoor sensors."
                    }
                }),
            )
    }

    #[test]
    fn sweep_produces_iterations_per_level_with_correct_labels() {
        let catalog = two_schema_catalog();
        let generator = two_schema_generator();
        let lexicon = StaticLexicon::new();
        let mut config = SynthConfig::default();
        config.depth = 2;
        config.iterations = 3;
        let pair_generator = PairGenerator::new(&catalog, &generator, &lexicon, &config);
        let target = SchemaRef::new("Cities", "device", "Device");
        let mut sink: Vec<TrainingTriplet> = Vec::new();
        let mut rng = StdRng::seed_from_u64(11);

        let report = pair_generator
            .generate_samples(RecordShape::KeyValues, &target, &mut sink, &mut rng)
            .unwrap();

        assert_eq!(report.levels, 2);
        assert_eq!(report.triplets_written, 6);
        assert_eq!(sink.len(), 6);
        for triplet in &sink {
            assert_eq!(triplet.positive.label, MATCH_LABEL_POSITIVE);
            assert_eq!(triplet.negative.label, MATCH_LABEL_NEGATIVE);
            assert_eq!(triplet.negative.metadata.name, "DeviceModel");
            // Retained properties never land in an exclusion list.
            for path in triplet
                .positive
                .excluded_properties
                .iter()
                .chain(&triplet.negative.excluded_properties)
            {
                assert!(!["id", "type", "@context"].contains(&path.as_str()));
            }
        }
    }

    #[test]
    fn single_schema_subject_cannot_provide_negatives() {
        let catalog = InMemoryCatalog::new().with_schema(
            "Cities",
            "device",
            "Device",
            ["id", "type", "@context", "serialNumber"],
        );
        let generator = generator();
        let lexicon = StaticLexicon::new();
        let config = SynthConfig::default();
        let pair_generator = PairGenerator::new(&catalog, &generator, &lexicon, &config);
        let target = SchemaRef::new("Cities", "device", "Device");
        let mut sink: Vec<TrainingTriplet> = Vec::new();
        let mut rng = StdRng::seed_from_u64(11);

        let result =
            pair_generator.generate_samples(RecordShape::KeyValues, &target, &mut sink, &mut rng);
        assert!(matches!(result, Err(SynthError::EmptyCatalog { .. })));
        assert!(sink.is_empty());
    }

    #[test]
    fn persistent_failures_exhaust_the_retry_budget() {
        let catalog = two_schema_catalog();
        // The negative schema has no registered example, so every attempt
        // fails at negative synthesis.
        let generator = generator();
        let lexicon = StaticLexicon::new();
        let mut config = SynthConfig::default();
        config.max_attempts_per_slot = 4;
        let pair_generator = PairGenerator::new(&catalog, &generator, &lexicon, &config);
        let target = SchemaRef::new("Cities", "device", "Device");
        let mut sink: Vec<TrainingTriplet> = Vec::new();
        let mut rng = StdRng::seed_from_u64(11);

        let result =
            pair_generator.generate_samples(RecordShape::KeyValues, &target, &mut sink, &mut rng);
        assert!(matches!(
            result,
            Err(SynthError::Exhausted { attempts: 4, .. })
        ));
    }

    #[test]
    fn exclusion_sets_grow_with_the_noise_level() {
        let catalog = two_schema_catalog();
        let generator = two_schema_generator();
        let lexicon = StaticLexicon::new();
        let mut config = SynthConfig::default();
        config.depth = 3;
        config.iterations = 1;
        let pair_generator = PairGenerator::new(&catalog, &generator, &lexicon, &config);
        let target = SchemaRef::new("Cities", "device", "Device");
        let mut sink: Vec<TrainingTriplet> = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        pair_generator
            .generate_samples(RecordShape::KeyValues, &target, &mut sink, &mut rng)
            .unwrap();

        // Shared − retained is {description} here, so each level adds one
        // sampled unique property on top of it.
        assert_eq!(sink[0].positive.excluded_properties.len(), 1);
        assert_eq!(sink[1].positive.excluded_properties.len(), 2);
        assert_eq!(sink[2].positive.excluded_properties.len(), 3);
        assert!(sink[0]
            .positive
            .excluded_properties
            .contains(&"description".to_string()));
        for triplet in &sink {
            for path in &triplet.positive.excluded_properties {
                assert!(
                    ["serialNumber", "description", "batteryLevel"].contains(&path.as_str()),
                    "unexpected exclusion {path}"
                );
            }
        }
    }
}
