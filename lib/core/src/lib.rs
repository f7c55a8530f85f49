//! # collrec Core
//!
//! Feature engineering and similarity spaces for the collection recommender.
//!
//! - [`Catalog`] - Active collections addressed by dense row index
//! - [`tags`] - Decomposition of compound `value-type` tag tokens
//! - [`CategoricalEncoder`] / [`TfIdfEncoder`] - One encoder per signal
//! - [`SimilarityMatrix`] - Pairwise cosine similarity per [`Signal`]
//! - [`CatalogSnapshot`] - Immutable result of one preprocessing pass
//!
//! ## Example
//!
//! ```rust
//! use collrec_core::{CatalogSnapshot, Collection, Signal, Tables};
//!
//! let tables = Tables {
//!     collections: vec![
//!         Collection::new(1, "Morning yoga", "quiz", 7),
//!         Collection::new(2, "Evening yoga", "quiz", 7),
//!     ],
//!     ..Default::default()
//! };
//! let snapshot = CatalogSnapshot::build(&tables).unwrap();
//! let text = snapshot.spaces().get(Signal::Description).unwrap();
//! assert!(text.get(0, 1) > 0.0);
//! ```

pub mod catalog;
pub mod encoder;
pub mod error;
pub mod interactions;
pub mod model;
pub mod similarity;
pub mod snapshot;
pub mod stopwords;
pub mod tags;
pub mod text;
pub mod vector;

pub use catalog::Catalog;
pub use encoder::{CategoricalEncoder, Counting, Vocabulary};
pub use error::{Error, Result};
pub use interactions::{InteractionIndex, OrgDirectory};
pub use model::{
    ActivityId, ActivityLink, Collection, CollectionId, CollectionResult, CollectionTag, OrgId,
    Tables, Tag, TagId, UserId, UserOrg,
};
pub use similarity::{Signal, SimilarityMatrix};
pub use snapshot::{CatalogSnapshot, EncodedSignals, SimilaritySpaces, SnapshotStats};
pub use tags::TagComponents;
pub use text::TfIdfEncoder;
pub use vector::SparseVector;
