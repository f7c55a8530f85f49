//! Immutable product of one preprocessing pass

use crate::catalog::Catalog;
use crate::encoder::{activities_per_row, activity_encoder, CategoricalEncoder, Counting};
use crate::interactions::{InteractionIndex, OrgDirectory};
use crate::model::{Collection, Tables};
use crate::similarity::{Signal, SimilarityMatrix};
use crate::tags::{aggregate_tag_strings, decompose, TagComponents};
use crate::text::TfIdfEncoder;
use crate::vector::SparseVector;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::info;

/// One similarity matrix per signal, all over the same catalog rows
#[derive(Debug, Clone, Default)]
pub struct SimilaritySpaces {
    matrices: BTreeMap<Signal, SimilarityMatrix>,
}

impl SimilaritySpaces {
    pub fn insert(&mut self, signal: Signal, matrix: SimilarityMatrix) {
        self.matrices.insert(signal, matrix);
    }

    pub fn get(&self, signal: Signal) -> Option<&SimilarityMatrix> {
        self.matrices.get(&signal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Signal, &SimilarityMatrix)> {
        self.matrices.iter().map(|(s, m)| (*s, m))
    }
}

/// Encoded vectors for every signal, one per catalog row
#[derive(Debug, Clone, Default)]
pub struct EncodedSignals {
    pub vectors: BTreeMap<Signal, Vec<SparseVector>>,
    pub dims: BTreeMap<Signal, usize>,
}

impl EncodedSignals {
    /// Run every encoder over the catalog
    pub fn encode(catalog: &Catalog, tables: &Tables) -> Self {
        let tag_strings = aggregate_tag_strings(catalog, &tables.collection_tags, &tables.tags);
        let components: Vec<TagComponents> = tag_strings.iter().map(|s| decompose(s)).collect();

        let type_rows: Vec<Vec<String>> = components.iter().map(|c| c.tag_types.clone()).collect();
        let value_rows: Vec<Vec<String>> = components
            .iter()
            .map(|c| c.specific_values.clone())
            .collect();
        let collection_type_rows: Vec<Vec<String>> = catalog
            .collections()
            .iter()
            .map(|c| vec![c.collection_type.clone()])
            .collect();
        let texts: Vec<String> = catalog.collections().iter().map(Collection::text).collect();

        let mut encoded = Self::default();

        let types = CategoricalEncoder::fit(&type_rows, Counting::Binary);
        encoded.put(Signal::Type, types.dim(), types.transform_all(&type_rows));

        let values = CategoricalEncoder::fit(&value_rows, Counting::Binary);
        encoded.put(Signal::Tag, values.dim(), values.transform_all(&value_rows));

        let collection_types = CategoricalEncoder::fit(&collection_type_rows, Counting::Binary);
        encoded.put(
            Signal::CollectionType,
            collection_types.dim(),
            collection_types.transform_all(&collection_type_rows),
        );

        let activities = activity_encoder(&tables.activity_links);
        let activity_rows = activities_per_row(catalog, &tables.activity_links);
        encoded.put(
            Signal::Activities,
            activities.dim(),
            activities.transform_all(&activity_rows),
        );

        let text = TfIdfEncoder::fit(&texts);
        encoded.put(Signal::Description, text.dim(), text.transform_all(&texts));

        encoded
    }

    fn put(&mut self, signal: Signal, dim: usize, vectors: Vec<SparseVector>) {
        self.dims.insert(signal, dim);
        self.vectors.insert(signal, vectors);
    }
}

/// Sizes reported after a pass
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotStats {
    pub collections: usize,
    pub users_with_interactions: usize,
    pub users_with_orgs: usize,
    pub dims: BTreeMap<Signal, usize>,
    pub built_at: DateTime<Utc>,
}

/// Catalog, similarity spaces and joins, frozen for the lifetime of the
/// snapshot. Rankers only ever read from it.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    catalog: Catalog,
    spaces: SimilaritySpaces,
    interactions: InteractionIndex,
    orgs: OrgDirectory,
    dims: BTreeMap<Signal, usize>,
    built_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Full preprocessing pass over loaded tables
    pub fn build(tables: &Tables) -> Result<Self> {
        let start = Instant::now();
        let catalog = Catalog::build(&tables.collections)?;

        let encoded = EncodedSignals::encode(&catalog, tables);
        let mut spaces = SimilaritySpaces::default();
        for (signal, vectors) in &encoded.vectors {
            spaces.insert(*signal, SimilarityMatrix::from_vectors(vectors));
        }

        let interactions = InteractionIndex::build(&catalog, &tables.collection_results);
        let orgs = OrgDirectory::build(&tables.user_orgs);

        info!(
            collections = catalog.len(),
            users = interactions.users(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "catalog snapshot built"
        );

        Ok(Self {
            catalog,
            spaces,
            interactions,
            orgs,
            dims: encoded.dims,
            built_at: Utc::now(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn spaces(&self) -> &SimilaritySpaces {
        &self.spaces
    }

    pub fn interactions(&self) -> &InteractionIndex {
        &self.interactions
    }

    pub fn orgs(&self) -> &OrgDirectory {
        &self.orgs
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats {
            collections: self.catalog.len(),
            users_with_interactions: self.interactions.users(),
            users_with_orgs: self.orgs.users(),
            dims: self.dims.clone(),
            built_at: self.built_at,
        }
    }
}
