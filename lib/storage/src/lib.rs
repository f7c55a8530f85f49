//! # collrec Storage
//!
//! Where the recommender's state lives between requests:
//!
//! - [`TableLoader`] / [`JsonTableLoader`] - relational rows for one pass
//! - [`SnapshotStore`] - the installed [`CatalogSnapshot`](collrec_core::CatalogSnapshot)
//! - [`RecommendationService`] - preprocess and recommend on top of both

pub mod loader;
pub mod manager;
pub mod store;

pub use loader::{JsonTableLoader, TableLoader};
pub use manager::RecommendationService;
pub use store::SnapshotStore;
