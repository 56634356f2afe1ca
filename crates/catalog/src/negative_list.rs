//! Negative list: master articles missing from a positive list.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use sortiment_core::{ArticleId, DomainResult, Entity};

use crate::record::{ArticleRecord, Catalog};
use crate::schema::CatalogSchema;
use crate::table::Table;

/// A master record whose identifier is absent from the positive list.
pub type NegativeListEntry = ArticleRecord;

/// Set difference over entities, ordered by identifier.
///
/// Every entity of `master` whose id does not occur in `positive` is returned
/// once, in ascending id order. When `master` holds several entities with the
/// same id, the first one (in `master` order) is kept.
pub fn set_difference<'a, E: Entity>(master: &'a [E], positive: &[E]) -> Vec<&'a E> {
    let present: HashSet<&E::Id> = positive.iter().map(Entity::id).collect();

    let mut missing: BTreeMap<&E::Id, &'a E> = BTreeMap::new();
    for entity in master {
        if present.contains(entity.id()) {
            continue;
        }
        missing.entry(entity.id()).or_insert(entity);
    }

    missing.into_values().collect()
}

/// Result of comparing a master catalog with a positive list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegativeList {
    entries: Vec<NegativeListEntry>,
    master_size: usize,
    positive_size: usize,
}

impl NegativeList {
    pub fn entries(&self) -> &[NegativeListEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<NegativeListEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn master_size(&self) -> usize {
        self.master_size
    }

    pub fn positive_size(&self) -> usize {
        self.positive_size
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &ArticleId> + '_ {
        self.entries.iter().map(Entity::id)
    }

    /// User-facing summary line, e.g. `2 Artikel fehlen im Sortiment.`
    pub fn message(&self) -> String {
        format!("{} Artikel fehlen im Sortiment.", self.entries.len())
    }
}

/// Compute the negative list of `master` against `positive`.
///
/// Pure function of both catalogs; see [`set_difference`] for ordering and the
/// duplicate policy.
pub fn negative_list(master: &Catalog, positive: &Catalog) -> NegativeList {
    let entries: Vec<NegativeListEntry> = set_difference(master.records(), positive.records())
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        master = master.len(),
        positive = positive.len(),
        missing = entries.len(),
        "negative list computed"
    );

    NegativeList {
        entries,
        master_size: master.len(),
        positive_size: positive.len(),
    }
}

/// Compare a raw positive-list table against the master catalog.
///
/// The identifier column is checked before any row is read; a table without it
/// is rejected with a schema error and nothing is computed.
pub fn negative_list_from_table(
    master: &Catalog,
    positive: &Table,
    schema: &CatalogSchema,
) -> DomainResult<NegativeList> {
    positive.require_column(&schema.identifier_column)?;
    let positive = Catalog::from_table(positive, schema)?;
    Ok(negative_list(master, &positive))
}
