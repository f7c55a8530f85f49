//! Table loading
//!
//! The recommender only ever sees a [`Tables`] value. Where the rows come
//! from is the loader's business.

use anyhow::Context;
use collrec_core::{Error, Result, Tables};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const COLLECTIONS_FILE: &str = "collection.json";
pub const COLLECTION_RESULTS_FILE: &str = "collection_result.json";
pub const COLLECTION_TAGS_FILE: &str = "collection_to_tag.json";
pub const ACTIVITY_LINKS_FILE: &str = "activity_to_collection.json";
pub const USER_ORGS_FILE: &str = "user_to_org.json";
pub const TAGS_FILE: &str = "tag.json";

/// Source of the relational rows for one preprocessing pass
pub trait TableLoader: Send + Sync {
    /// Load every table. Any failure is reported as
    /// [`Error::DataUnavailable`].
    fn load(&self) -> Result<Tables>;
}

/// In-memory tables load as themselves
impl TableLoader for Tables {
    fn load(&self) -> Result<Tables> {
        Ok(self.clone())
    }
}

/// Reads one JSON array per table from a directory
#[derive(Debug, Clone)]
pub struct JsonTableLoader {
    dir: PathBuf,
}

impl JsonTableLoader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_table<T: DeserializeOwned>(&self, file: &str) -> anyhow::Result<Vec<T>> {
        let path = self.dir.join(file);
        let reader = File::open(&path)
            .map(BufReader::new)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let rows: Vec<T> = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        debug!(file, rows = rows.len(), "loaded table");
        Ok(rows)
    }

    fn read_all(&self) -> anyhow::Result<Tables> {
        Ok(Tables {
            collections: self.read_table(COLLECTIONS_FILE)?,
            collection_results: self.read_table(COLLECTION_RESULTS_FILE)?,
            collection_tags: self.read_table(COLLECTION_TAGS_FILE)?,
            activity_links: self.read_table(ACTIVITY_LINKS_FILE)?,
            user_orgs: self.read_table(USER_ORGS_FILE)?,
            tags: self.read_table(TAGS_FILE)?,
        })
    }

    /// Write `tables` in the layout [`JsonTableLoader`] reads
    pub fn write<P: AsRef<Path>>(dir: P, tables: &Tables) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        write_table(&dir.join(COLLECTIONS_FILE), &tables.collections)?;
        write_table(&dir.join(COLLECTION_RESULTS_FILE), &tables.collection_results)?;
        write_table(&dir.join(COLLECTION_TAGS_FILE), &tables.collection_tags)?;
        write_table(&dir.join(ACTIVITY_LINKS_FILE), &tables.activity_links)?;
        write_table(&dir.join(USER_ORGS_FILE), &tables.user_orgs)?;
        write_table(&dir.join(TAGS_FILE), &tables.tags)?;
        Ok(())
    }
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

impl TableLoader for JsonTableLoader {
    fn load(&self) -> Result<Tables> {
        let tables = self
            .read_all()
            .map_err(|e| Error::DataUnavailable(format!("{e:#}")))?;
        info!(
            dir = %self.dir.display(),
            collections = tables.collections.len(),
            interactions = tables.collection_results.len(),
            "tables loaded"
        );
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collrec_core::{Collection, CollectionResult, UserOrg};
    use tempfile::TempDir;

    #[test]
    fn test_write_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let tables = Tables {
            collections: vec![Collection::new(1, "Yoga", "quiz", 3).with_description("stretch")],
            collection_results: vec![CollectionResult::new(9, 1)],
            user_orgs: vec![UserOrg { user_id: 9, org_id: 3 }],
            ..Default::default()
        };
        JsonTableLoader::write(temp_dir.path(), &tables).unwrap();

        let loaded = JsonTableLoader::new(temp_dir.path()).load().unwrap();
        assert_eq!(loaded.collections, tables.collections);
        assert_eq!(loaded.user_orgs, tables.user_orgs);
        assert!(loaded.tags.is_empty());
    }

    #[test]
    fn test_reads_source_column_names() {
        let temp_dir = TempDir::new().unwrap();
        JsonTableLoader::write(temp_dir.path(), &Tables::default()).unwrap();
        std::fs::write(
            temp_dir.path().join(COLLECTION_TAGS_FILE),
            r#"[{"collectionId": 4, "tagId": 8}]"#,
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join(ACTIVITY_LINKS_FILE),
            r#"[{"collectionId": 4, "activityId": 2, "order": 1}]"#,
        )
        .unwrap();

        let loaded = JsonTableLoader::new(temp_dir.path()).load().unwrap();
        assert_eq!(loaded.collection_tags[0].tag_id, 8);
        assert_eq!(loaded.activity_links[0].order, Some(1));
    }

    #[test]
    fn test_null_ids_and_naive_timestamps_load() {
        let temp_dir = TempDir::new().unwrap();
        JsonTableLoader::write(temp_dir.path(), &Tables::default()).unwrap();
        std::fs::write(
            temp_dir.path().join(COLLECTIONS_FILE),
            r#"[{"id": 1, "name": "Yoga", "collectionType": "quiz", "organizationId": 3,
                 "createdAt": "2024-05-01T10:00:00", "deletedAt": null},
                {"id": 2, "name": "Run", "collectionType": "quiz", "organizationId": 3,
                 "deletedAt": "2024-06-01T09:15:00.123456"}]"#,
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join(COLLECTION_RESULTS_FILE),
            r#"[{"userId": 9, "collectionId": 1, "score": 3},
                {"userId": 9, "collectionId": null, "score": null},
                {"userId": null, "collectionId": 1}]"#,
        )
        .unwrap();

        let loaded = JsonTableLoader::new(temp_dir.path()).load().unwrap();
        assert_eq!(loaded.collection_results.len(), 3);
        assert!(loaded.collections[0].is_active());
        assert!(!loaded.collections[1].is_active());

        let snapshot = collrec_core::CatalogSnapshot::build(&loaded).unwrap();
        assert_eq!(snapshot.catalog().len(), 1);
        let seen = snapshot.interactions().seen_by(9).unwrap();
        assert_eq!(seen.iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_missing_directory_is_data_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let loader = JsonTableLoader::new(temp_dir.path().join("nope"));
        let err = loader.load().unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_malformed_file_is_data_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        JsonTableLoader::write(temp_dir.path(), &Tables::default()).unwrap();
        std::fs::write(temp_dir.path().join(TAGS_FILE), "{ not json").unwrap();
        let err = JsonTableLoader::new(temp_dir.path()).load().unwrap_err();
        match err {
            Error::DataUnavailable(msg) => assert!(msg.contains(TAGS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
