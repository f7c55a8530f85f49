//! Interaction history and organization memberships joined to the catalog

use crate::catalog::Catalog;
use crate::model::{CollectionResult, OrgId, UserId, UserOrg};
use ahash::{AHashMap, AHashSet};
use std::collections::BTreeSet;
use tracing::debug;

/// Per-user set of catalog rows the user has interacted with
#[derive(Debug, Clone, Default)]
pub struct InteractionIndex {
    seen: AHashMap<UserId, BTreeSet<usize>>,
}

impl InteractionIndex {
    /// Inner join of interaction records against the catalog. Records for
    /// unknown or deleted collections, or with a null user or collection,
    /// are dropped.
    pub fn build(catalog: &Catalog, results: &[CollectionResult]) -> Self {
        let mut seen: AHashMap<UserId, BTreeSet<usize>> = AHashMap::new();
        let mut dropped = 0usize;
        for result in results {
            let joined = result
                .user_id
                .zip(result.collection_id.and_then(|id| catalog.index_of(id)));
            match joined {
                Some((user, row)) => {
                    seen.entry(user).or_default().insert(row);
                }
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, "interaction records without an active collection");
        }
        Self { seen }
    }

    /// Rows seen by `user`, ascending
    pub fn seen_by(&self, user: UserId) -> Option<&BTreeSet<usize>> {
        self.seen.get(&user)
    }

    pub fn users(&self) -> usize {
        self.seen.len()
    }
}

/// user → organizations
#[derive(Debug, Clone, Default)]
pub struct OrgDirectory {
    memberships: AHashMap<UserId, AHashSet<OrgId>>,
}

impl OrgDirectory {
    pub fn build(rows: &[UserOrg]) -> Self {
        let mut memberships: AHashMap<UserId, AHashSet<OrgId>> = AHashMap::new();
        for row in rows {
            memberships.entry(row.user_id).or_default().insert(row.org_id);
        }
        Self { memberships }
    }

    pub fn orgs_of(&self, user: UserId) -> Option<&AHashSet<OrgId>> {
        self.memberships.get(&user).filter(|orgs| !orgs.is_empty())
    }

    pub fn users(&self) -> usize {
        self.memberships.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;
    use chrono::Utc;

    #[test]
    fn test_interactions_join_on_active_catalog() {
        let catalog = Catalog::build(&[
            Collection::new(10, "a", "quiz", 1),
            Collection::new(20, "b", "quiz", 1).deleted(Utc::now()),
            Collection::new(30, "c", "quiz", 1),
        ])
        .unwrap();
        let results = vec![
            CollectionResult::new(1, 30),
            CollectionResult::new(1, 20),
            CollectionResult::new(1, 10),
            CollectionResult::new(1, 10),
            CollectionResult::new(2, 999),
            CollectionResult {
                collection_id: None,
                ..CollectionResult::new(3, 10)
            },
            CollectionResult {
                user_id: None,
                ..CollectionResult::new(3, 30)
            },
        ];

        let index = InteractionIndex::build(&catalog, &results);
        let seen: Vec<usize> = index.seen_by(1).unwrap().iter().copied().collect();
        assert_eq!(seen, vec![0, 1]);
        assert!(index.seen_by(2).is_none());
        assert!(index.seen_by(3).is_none());
        assert_eq!(index.users(), 1);
    }

    #[test]
    fn test_org_directory() {
        let dir = OrgDirectory::build(&[
            UserOrg { user_id: 1, org_id: 5 },
            UserOrg { user_id: 1, org_id: 6 },
            UserOrg { user_id: 1, org_id: 5 },
        ]);
        assert_eq!(dir.orgs_of(1).unwrap().len(), 2);
        assert!(dir.orgs_of(2).is_none());
    }
}
