//! # collrec
//!
//! A multi-signal content-collection recommender.
//!
//! Collections are compared along several independent signals (description
//! text, tag type, tag value, constituent activities and declared collection
//! type). Each signal gets its own pairwise cosine similarity space; a user's
//! recommendations are the unseen collections of their organizations with the
//! highest weighted mean similarity to what they already interacted with.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! collrec --data-dir ./data --http-port 5000
//! curl localhost:5000/preprocess_data
//! curl localhost:5000/recommendations/42?top_n=5
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use collrec::prelude::*;
//!
//! let tables = Tables {
//!     collections: vec![
//!         Collection::new(1, "Morning yoga", "quiz", 7),
//!         Collection::new(2, "Evening yoga", "quiz", 7),
//!         Collection::new(3, "Sprint drills", "game", 7),
//!     ],
//!     user_orgs: vec![UserOrg { user_id: 5, org_id: 7 }],
//!     collection_results: vec![CollectionResult::new(5, 1)],
//!     ..Default::default()
//! };
//!
//! let service = RecommendationService::new(tables);
//! service.preprocess().unwrap();
//! let top = service.recommend(5, None, Some(2)).unwrap();
//! assert_eq!(top[0].id, 2);
//! ```
//!
//! ## Crate Structure
//!
//! - `collrec-core` - Catalog, encoders, similarity spaces, snapshots
//! - `collrec-ranking` - Weighted ranking with per-signal explanations
//! - `collrec-storage` - Table loading, snapshot store, service
//! - `collrec-api` - REST API

// Re-export core types
pub use collrec_core::{
    ActivityLink, CatalogSnapshot, Collection, CollectionId, CollectionResult, CollectionTag,
    Error, OrgId, Result, Signal, SimilarityMatrix, SnapshotStats, Tables, Tag, UserId, UserOrg,
};

// Re-export ranking
pub use collrec_ranking::{explain, rank, RankedCandidate, Ranker, SignalWeights, DEFAULT_TOP_N};

// Re-export storage
pub use collrec_storage::{JsonTableLoader, RecommendationService, SnapshotStore, TableLoader};

// Re-export API
pub use collrec_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ActivityLink, CatalogSnapshot, Collection, CollectionResult, CollectionTag, Error,
        JsonTableLoader, RecommendationService, Result, Signal, SignalWeights, Tables, Tag,
        TableLoader, UserOrg,
    };
}
