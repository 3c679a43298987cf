//! Schema-level worker fan-out.
//!
//! One independent worker per schema name inside a subject; each worker
//! sweeps the full pair-generation pipeline per enabled shape and owns
//! its randomness stream and output stream outright. The run completes
//! only when every worker has reported back.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;

use crate::catalog::{SchemaCatalog, SchemaRef};
use crate::config::SynthConfig;
use crate::data::RecordShape;
use crate::errors::SynthError;
use crate::generator::ExampleGenerator;
use crate::sink::JsonlTripletWriter;
use crate::synonyms::SynonymLexicon;
use crate::synthesis::PairGenerator;
use crate::types::{Domain, SchemaName, Subject};

/// Per-shape outcome inside one worker.
#[derive(Clone, Copy, Debug)]
pub struct ShapeRun {
    /// Record shape the pipeline ran in.
    pub shape: RecordShape,
    /// Triplets persisted to this shape's stream.
    pub triplets_written: usize,
}

/// Outcome of one schema worker.
#[derive(Clone, Debug)]
pub struct WorkerReport {
    /// Subject the worker belongs to.
    pub subject: Subject,
    /// Schema name the worker targeted.
    pub name: SchemaName,
    /// One entry per enabled shape, in pipeline order.
    pub runs: Vec<ShapeRun>,
}

/// Fans pair generation out across schema workers.
pub struct CatalogRunner {
    catalog: Arc<dyn SchemaCatalog>,
    generator: Arc<dyn ExampleGenerator>,
    lexicon: Arc<dyn SynonymLexicon>,
    config: SynthConfig,
}

impl CatalogRunner {
    /// Create a runner over the run's collaborators, validating the
    /// configuration up front.
    pub fn new(
        catalog: Arc<dyn SchemaCatalog>,
        generator: Arc<dyn ExampleGenerator>,
        lexicon: Arc<dyn SynonymLexicon>,
        config: SynthConfig,
    ) -> Result<Self, SynthError> {
        Ok(Self {
            catalog,
            generator,
            lexicon,
            config: config.validated()?,
        })
    }

    /// Run the configured target: one schema when a name is set, the
    /// whole subject otherwise.
    pub fn run(&self) -> Result<Vec<WorkerReport>, SynthError> {
        if self.config.name.is_empty() {
            self.run_subject(&self.config.subject)
        } else {
            self.run_schema(&self.config.subject, &self.config.name)
                .map(|report| vec![report])
        }
    }

    /// Run one worker per schema name of `subject`.
    ///
    /// Every worker runs to completion before results are inspected, so a
    /// failing worker never cancels its siblings; the first failure is
    /// then surfaced.
    pub fn run_subject(&self, subject: &str) -> Result<Vec<WorkerReport>, SynthError> {
        let names = self.catalog.schemas_of(subject);
        if names.is_empty() {
            return Err(SynthError::EmptyCatalog {
                scope: subject.to_string(),
            });
        }
        let results: Vec<Result<WorkerReport, SynthError>> = names
            .par_iter()
            .map(|name| self.run_schema(subject, name))
            .collect();
        let reports = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        info!(subject, workers = reports.len(), "all workers reported");
        Ok(reports)
    }

    /// Run the full pipeline for one schema, per enabled shape.
    ///
    /// When both shapes are enabled the key-values pipeline runs as a
    /// parallel side task next to the normalized one, joined before this
    /// worker reports done.
    pub fn run_schema(&self, subject: &str, name: &str) -> Result<WorkerReport, SynthError> {
        let target = SchemaRef::new(self.domain_for(subject, name), subject, name);
        let mut runs = Vec::new();
        let shapes = self.config.enabled_shapes();
        match shapes.as_slice() {
            [] => {}
            &[shape] => runs.push(self.run_shape(&target, shape)?),
            &[first, second, ..] => {
                let (first_run, second_run) = rayon::join(
                    || self.run_shape(&target, first),
                    || self.run_shape(&target, second),
                );
                runs.push(first_run?);
                runs.push(second_run?);
            }
        }
        Ok(WorkerReport {
            subject: subject.to_string(),
            name: name.to_string(),
            runs,
        })
    }

    fn run_shape(&self, target: &SchemaRef, shape: RecordShape) -> Result<ShapeRun, SynthError> {
        let mut rng = self.worker_rng(target, shape);
        let mut writer = JsonlTripletWriter::create(
            &self.config.output_dir,
            &target.subject,
            &target.name,
            shape,
        )?;
        let pair_generator = PairGenerator::new(
            &*self.catalog,
            &*self.generator,
            &*self.lexicon,
            &self.config,
        );
        let report = pair_generator.generate_samples(shape, target, &mut writer, &mut rng)?;
        Ok(ShapeRun {
            shape,
            triplets_written: report.triplets_written,
        })
    }

    /// Worker RNG stream: seeded from the OS by default, derived from the
    /// configured seed and the worker identity when reproducibility is
    /// requested.
    fn worker_rng(&self, target: &SchemaRef, shape: RecordShape) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(worker_seed(seed, target, shape)),
            None => StdRng::from_os_rng(),
        }
    }

    fn domain_for(&self, subject: &str, name: &str) -> Domain {
        if !self.config.domain.is_empty() {
            return self.config.domain.clone();
        }
        self.catalog
            .list_schemas()
            .into_iter()
            .find(|schema| schema.subject == subject && schema.name == name)
            .map(|schema| schema.domain)
            .unwrap_or_default()
    }
}

/// Distinct, stable seed per (subject, name, shape) worker so parallel
/// workers never share a randomness stream.
fn worker_seed(seed: u64, target: &SchemaRef, shape: RecordShape) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    target.subject.hash(&mut hasher);
    target.name.hash(&mut hasher);
    shape.as_str().hash(&mut hasher);
    hasher.finish()
}
