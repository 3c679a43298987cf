use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::SynthError;
use crate::types::{AttributePath, Domain, SchemaLocator, SchemaName, Subject};

/// Separator between subject and name inside a schema locator.
pub const LOCATOR_SEPARATOR: char = '/';

/// Identifies one schema definition in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaRef {
    /// Domain the schema belongs to.
    pub domain: Domain,
    /// Subject grouping the schema.
    pub subject: Subject,
    /// Schema name, unique within its subject.
    pub name: SchemaName,
}

impl SchemaRef {
    /// Create a schema reference.
    pub fn new(
        domain: impl Into<Domain>,
        subject: impl Into<Subject>,
        name: impl Into<SchemaName>,
    ) -> Self {
        Self {
            domain: domain.into(),
            subject: subject.into(),
            name: name.into(),
        }
    }

    /// Retrieval locator for this schema.
    pub fn locator(&self) -> SchemaLocator {
        locator_for(&self.subject, &self.name)
    }
}

/// Build the retrieval locator for a subject/name pair.
///
/// Pure function; `split_locator` is its inverse.
pub fn locator_for(subject: &str, name: &str) -> SchemaLocator {
    format!("{subject}{LOCATOR_SEPARATOR}{name}")
}

/// Recover the subject and name encoded in a locator.
///
/// The name is the segment after the last separator, so subjects may
/// themselves contain the separator character.
pub fn split_locator(locator: &str) -> Result<(Subject, SchemaName), SynthError> {
    locator
        .rsplit_once(LOCATOR_SEPARATOR)
        .map(|(subject, name)| (subject.to_string(), name.to_string()))
        .ok_or_else(|| {
            SynthError::Configuration(format!("locator '{locator}' has no subject separator"))
        })
}

/// Read-only schema catalog consumed by the synthesis pipeline.
///
/// Implementations expose an immutable snapshot; a run never re-fetches
/// or invalidates catalog state. Safe for concurrent reads from multiple
/// workers.
pub trait SchemaCatalog: Send + Sync {
    /// Every schema definition known to the catalog.
    fn list_schemas(&self) -> Vec<SchemaRef>;
    /// Full dotted attribute-path set of one schema.
    fn attributes_of(
        &self,
        subject: &str,
        name: &str,
    ) -> Result<HashSet<AttributePath>, SynthError>;
    /// Schema names grouped under a subject.
    fn schemas_of(&self, subject: &str) -> Vec<SchemaName>;
    /// All known domains.
    fn domains(&self) -> Vec<Domain>;
    /// Subjects grouped under a domain.
    fn subjects_of(&self, domain: &str) -> Vec<Subject>;
}

/// In-memory catalog snapshot for tests and small corpora.
///
/// Listings iterate in lexicographic subject/name order so workers see a
/// deterministic catalog regardless of insertion order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    schemas: BTreeMap<(Subject, SchemaName), SchemaEntry>,
}

#[derive(Clone, Debug)]
struct SchemaEntry {
    domain: Domain,
    attributes: HashSet<AttributePath>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one schema definition, replacing any previous entry for
    /// the same subject/name pair.
    pub fn with_schema<I, S>(
        mut self,
        domain: impl Into<Domain>,
        subject: impl Into<Subject>,
        name: impl Into<SchemaName>,
        attributes: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AttributePath>,
    {
        self.schemas.insert(
            (subject.into(), name.into()),
            SchemaEntry {
                domain: domain.into(),
                attributes: attributes.into_iter().map(Into::into).collect(),
            },
        );
        self
    }
}

impl SchemaCatalog for InMemoryCatalog {
    fn list_schemas(&self) -> Vec<SchemaRef> {
        self.schemas
            .iter()
            .map(|((subject, name), entry)| {
                SchemaRef::new(entry.domain.clone(), subject.clone(), name.clone())
            })
            .collect()
    }

    fn attributes_of(
        &self,
        subject: &str,
        name: &str,
    ) -> Result<HashSet<AttributePath>, SynthError> {
        self.schemas
            .get(&(subject.to_string(), name.to_string()))
            .map(|entry| entry.attributes.clone())
            .ok_or_else(|| SynthError::EmptyCatalog {
                scope: locator_for(subject, name),
            })
    }

    fn schemas_of(&self, subject: &str) -> Vec<SchemaName> {
        self.schemas
            .keys()
            .filter(|(candidate, _)| candidate == subject)
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn domains(&self) -> Vec<Domain> {
        let mut domains: Vec<Domain> = self
            .schemas
            .values()
            .map(|entry| entry.domain.clone())
            .collect();
        domains.sort();
        domains.dedup();
        domains
    }

    fn subjects_of(&self, domain: &str) -> Vec<Subject> {
        let mut subjects: Vec<Subject> = self
            .schemas
            .iter()
            .filter(|(_, entry)| entry.domain == domain)
            .map(|((subject, _), _)| subject.clone())
            .collect();
        subjects.dedup();
        subjects
    }
}
