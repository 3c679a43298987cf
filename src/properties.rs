//! Shared/unique attribute-set analysis over catalog snapshots.
//!
//! Pure functions of catalog state; exclusion sets are built from these
//! splits, so their invariants (disjointness, union restoring the full
//! attribute set) are what the rest of the pipeline leans on.

use std::collections::HashSet;

use crate::catalog::SchemaCatalog;
use crate::errors::SynthError;
use crate::types::{AttributePath, Subject};

/// Shared/unique split of one schema's attribute set.
#[derive(Clone, Debug)]
pub struct PropertySets {
    /// Attributes present in every schema of the subject.
    pub shared: HashSet<AttributePath>,
    /// Attributes specific to this schema.
    pub unique: HashSet<AttributePath>,
}

/// Intersection of attribute sets across every schema of a subject.
///
/// A single-schema subject's shared set equals that schema's full
/// attribute set. Fails with `EmptyCatalog` when the subject has no
/// schemas.
pub fn shared_properties_by_subject(
    catalog: &dyn SchemaCatalog,
    subject: &str,
) -> Result<HashSet<AttributePath>, SynthError> {
    let names = catalog.schemas_of(subject);
    let (first, rest) = names.split_first().ok_or_else(|| SynthError::EmptyCatalog {
        scope: subject.to_string(),
    })?;

    let mut shared = catalog.attributes_of(subject, first)?;
    for name in rest {
        let attributes = catalog.attributes_of(subject, name)?;
        shared.retain(|path| attributes.contains(path));
    }
    Ok(shared)
}

/// Intersection of per-subject shared sets across all non-excluded
/// subjects of a domain.
pub fn shared_properties_by_domain(
    catalog: &dyn SchemaCatalog,
    domain: &str,
    excluded_subjects: &[Subject],
) -> Result<HashSet<AttributePath>, SynthError> {
    let subjects: Vec<Subject> = catalog
        .subjects_of(domain)
        .into_iter()
        .filter(|subject| !excluded_subjects.contains(subject))
        .collect();
    let (first, rest) = subjects
        .split_first()
        .ok_or_else(|| SynthError::EmptyCatalog {
            scope: domain.to_string(),
        })?;

    let mut shared = shared_properties_by_subject(catalog, first)?;
    for subject in rest {
        let subject_shared = shared_properties_by_subject(catalog, subject)?;
        shared.retain(|path| subject_shared.contains(path));
    }
    Ok(shared)
}

/// Shared/unique split for one schema of a subject.
pub fn property_sets(
    catalog: &dyn SchemaCatalog,
    subject: &str,
    name: &str,
) -> Result<PropertySets, SynthError> {
    let shared = shared_properties_by_subject(catalog, subject)?;
    let attributes = catalog.attributes_of(subject, name)?;
    let unique = attributes
        .into_iter()
        .filter(|path| !shared.contains(path))
        .collect();
    Ok(PropertySets { shared, unique })
}
