//! Canonical catalog index
//!
//! Every similarity space is built over the same ordered set of active
//! collections. Rows are addressed by dense index; the id→index map is the
//! only way to get from a collection id to a row.

use crate::model::{Collection, CollectionId, OrgId};
use crate::{Error, Result};
use ahash::{AHashMap, AHashSet};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    collections: Vec<Collection>,
    index: AHashMap<CollectionId, usize>,
}

impl Catalog {
    /// Build the catalog from raw collection rows.
    ///
    /// Soft-deleted rows are skipped. Two active rows with the same id are a
    /// precondition violation and abort the build.
    pub fn build(rows: &[Collection]) -> Result<Self> {
        let mut collections = Vec::with_capacity(rows.len());
        let mut index = AHashMap::with_capacity(rows.len());
        let mut names: AHashSet<&str> = AHashSet::with_capacity(rows.len());

        for row in rows.iter().filter(|c| c.is_active()) {
            if index.insert(row.id, collections.len()).is_some() {
                return Err(Error::DuplicateCollection(row.id));
            }
            if !names.insert(row.name.as_str()) {
                warn!(
                    collection_id = row.id,
                    name = %row.name,
                    "duplicate collection name in catalog"
                );
            }
            collections.push(row.clone());
        }

        Ok(Self { collections, index })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    #[inline]
    pub fn index_of(&self, id: CollectionId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Collection> {
        self.collections.get(idx)
    }

    pub fn by_id(&self, id: CollectionId) -> Option<&Collection> {
        self.index_of(id).and_then(|i| self.get(i))
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Rows owned by any of `orgs`, in catalog order
    pub fn indices_in_orgs(&self, orgs: &AHashSet<OrgId>) -> Vec<usize> {
        self.collections
            .iter()
            .enumerate()
            .filter(|(_, c)| orgs.contains(&c.organization_id))
            .map(|(i, _)| i)
            .collect()
    }
}
