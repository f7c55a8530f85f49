// Integration tests for collrec
use chrono::Utc;
use collrec::prelude::*;
use collrec::{explain, rank, OrgId, UserId};
use rand::Rng;
use std::collections::HashSet;
use tempfile::TempDir;

fn quiz_game_tables() -> Tables {
    Tables {
        collections: vec![
            Collection::new(1, "Alpha", "quiz", 1),
            Collection::new(2, "Bravo", "quiz", 1),
            Collection::new(3, "Charlie", "game", 1),
        ],
        collection_tags: vec![
            CollectionTag { collection_id: 1, tag_id: 1 },
            CollectionTag { collection_id: 2, tag_id: 1 },
            CollectionTag { collection_id: 3, tag_id: 2 },
        ],
        tags: vec![Tag::new(1, "x", "cat1"), Tag::new(2, "y", "cat2")],
        user_orgs: vec![UserOrg { user_id: 42, org_id: 1 }],
        collection_results: vec![CollectionResult::new(42, 1)],
        ..Default::default()
    }
}

fn ids(collections: &[Collection]) -> Vec<i64> {
    collections.iter().map(|c| c.id).collect()
}

#[test]
fn test_json_directory_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let mut tables = quiz_game_tables();
    tables.collections[1] =
        Collection::new(2, "Bravo", "quiz", 1).with_description("breathing drills");
    tables.activity_links = vec![ActivityLink::new(1, 100), ActivityLink::new(2, 100)];
    JsonTableLoader::write(temp_dir.path(), &tables).unwrap();

    let service = RecommendationService::new(JsonTableLoader::new(temp_dir.path()));
    let stats = service.preprocess().unwrap();
    assert_eq!(stats.collections, 3);

    let result = service.recommend(42, None, None).unwrap();
    assert_eq!(ids(&result), vec![2, 3]);
}

#[test]
fn test_tag_type_scenario() {
    let snapshot = CatalogSnapshot::build(&quiz_game_tables()).unwrap();
    let weights = SignalWeights::zero().with(Signal::Type, 1.0);

    let explained = explain(&snapshot, 42, Some(&weights), 5).unwrap();
    assert_eq!(explained[0].collection.id, 2);
    assert_eq!(explained[1].collection.id, 3);
    assert!(explained[0].score > explained[1].score);
    assert_eq!(explained[0].dominant_signal(), Some(Signal::Type));
}

#[test]
fn test_soft_deleted_collections_are_invisible() {
    let mut tables = quiz_game_tables();
    tables
        .collections
        .push(Collection::new(4, "Bravo", "quiz", 1).deleted(Utc::now()));
    tables.collection_tags.push(CollectionTag { collection_id: 4, tag_id: 1 });
    let snapshot = CatalogSnapshot::build(&tables).unwrap();

    let result = rank(&snapshot, 42, None, 10).unwrap();
    assert!(!ids(&result).contains(&4));

    // An interaction with a deleted collection does not count as seen
    tables.collection_results = vec![CollectionResult::new(42, 4)];
    let snapshot = CatalogSnapshot::build(&tables).unwrap();
    assert!(rank(&snapshot, 42, None, 10).unwrap().is_empty());
}

#[test]
fn test_malformed_tags_are_dropped() {
    let mut tables = quiz_game_tables();
    // "a-b-cat1" does not split into two parts
    tables.tags.push(Tag::new(3, "a-b", "cat1"));
    tables.collections.push(Collection::new(5, "Echo", "quiz", 1));
    tables.collection_tags.push(CollectionTag { collection_id: 5, tag_id: 3 });
    // valid tag alongside a malformed one still counts
    tables.collection_tags.push(CollectionTag { collection_id: 2, tag_id: 3 });

    let snapshot = CatalogSnapshot::build(&tables).unwrap();
    let types = snapshot.spaces().get(Signal::Type).unwrap();
    let row = |id| snapshot.catalog().index_of(id).unwrap();

    assert_eq!(types.get(row(5), row(5)), 0.0);
    assert_eq!(types.get(row(1), row(2)), 1.0);
}

#[test]
fn test_users_without_scope_or_history() {
    let mut tables = quiz_game_tables();
    tables.user_orgs.push(UserOrg { user_id: 7, org_id: 1 });
    let snapshot = CatalogSnapshot::build(&tables).unwrap();

    // unknown user
    assert!(rank(&snapshot, 999, None, 5).unwrap().is_empty());
    // member without interactions
    assert!(rank(&snapshot, 7, None, 5).unwrap().is_empty());
}

#[test]
fn test_failed_reload_keeps_serving() {
    let temp_dir = TempDir::new().unwrap();
    JsonTableLoader::write(temp_dir.path(), &quiz_game_tables()).unwrap();
    let service = RecommendationService::new(JsonTableLoader::new(temp_dir.path()));
    service.preprocess().unwrap();

    std::fs::remove_file(temp_dir.path().join("tag.json")).unwrap();
    let err = service.preprocess().unwrap_err();
    assert!(matches!(err, Error::DataUnavailable(_)));

    assert_eq!(service.recommend(42, None, None).unwrap().len(), 2);
}

fn random_tables(rng: &mut impl Rng) -> Tables {
    let words = ["yoga", "sprint", "breathing", "focus", "strength", "quiz", "stretch"];
    let orgs: Vec<OrgId> = vec![1, 2, 3];
    let n = 40;

    let collections = (1..=n)
        .map(|id| {
            let name = format!(
                "{} {}",
                words[rng.random_range(0..words.len())],
                words[rng.random_range(0..words.len())]
            );
            let collection_type = ["quiz", "game"][rng.random_range(0..2)];
            let c = Collection::new(id, name, collection_type, orgs[rng.random_range(0..3)]);
            if rng.random_bool(0.1) {
                c.deleted(Utc::now())
            } else {
                c
            }
        })
        .collect();

    let tags = (1..=6)
        .map(|id| Tag::new(id, format!("value{id}"), format!("cat{}", id % 3)))
        .collect();

    Tables {
        collections,
        tags,
        collection_tags: (0..80)
            .map(|_| CollectionTag {
                collection_id: rng.random_range(1..=n),
                tag_id: rng.random_range(1..=7),
            })
            .collect(),
        activity_links: (0..100)
            .map(|_| {
                ActivityLink::new(rng.random_range(1..=n), rng.random_range(1..=15))
            })
            .collect(),
        user_orgs: (1..=10)
            .map(|user_id| UserOrg {
                user_id,
                org_id: orgs[rng.random_range(0..3)],
            })
            .collect(),
        collection_results: (0..60)
            .map(|_| {
                CollectionResult::new(rng.random_range(1..=12), rng.random_range(1..=n + 5))
            })
            .collect(),
    }
}

#[test]
fn test_random_catalog_properties() {
    let mut rng = rand::rng();
    for _ in 0..5 {
        let tables = random_tables(&mut rng);
        let snapshot = CatalogSnapshot::build(&tables).unwrap();

        for (_, matrix) in snapshot.spaces().iter() {
            for i in 0..matrix.len() {
                for j in 0..matrix.len() {
                    let v = matrix.get(i, j);
                    assert!((0.0..=1.0).contains(&v));
                    assert!((v - matrix.get(j, i)).abs() < 1e-6);
                }
            }
        }

        for user_id in 1..=12 as UserId {
            let orgs: HashSet<OrgId> = tables
                .user_orgs
                .iter()
                .filter(|m| m.user_id == user_id)
                .map(|m| m.org_id)
                .collect();
            let seen: HashSet<i64> = tables
                .collection_results
                .iter()
                .filter(|r| r.user_id == Some(user_id))
                .filter_map(|r| r.collection_id)
                .collect();

            let top_n = rng.random_range(0..8);
            let explained = explain(&snapshot, user_id, None, top_n).unwrap();
            assert!(explained.len() <= top_n);

            for candidate in &explained {
                assert!(candidate.collection.is_active());
                assert!(orgs.contains(&candidate.collection.organization_id));
                assert!(!seen.contains(&candidate.collection.id));
                let sum: f32 = candidate.signal_scores.values().sum();
                assert!((sum - candidate.score).abs() < 1e-5);
            }

            for pair in explained.windows(2) {
                assert!(
                    pair[0].score > pair[1].score
                        || (pair[0].score == pair[1].score
                            && pair[0].collection.id < pair[1].collection.id)
                );
            }
        }
    }
}
