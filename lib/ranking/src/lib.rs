//! # collrec Ranking
//!
//! Blends the per-signal similarity spaces of a
//! [`CatalogSnapshot`](collrec_core::CatalogSnapshot) into one score per
//! collection and returns the best unseen collections for a user.
//!
//! Ranking is scoped to the user's organizations. A user with no in-scope
//! interactions gets an empty result rather than a fallback list.
//!
//! ## Example
//!
//! ```rust
//! use collrec_core::{CatalogSnapshot, Collection, CollectionResult, Tables, UserOrg};
//! use collrec_ranking::{rank, SignalWeights};
//!
//! let tables = Tables {
//!     collections: vec![
//!         Collection::new(1, "Morning yoga", "quiz", 7),
//!         Collection::new(2, "Evening yoga", "quiz", 7),
//!     ],
//!     user_orgs: vec![UserOrg { user_id: 5, org_id: 7 }],
//!     collection_results: vec![CollectionResult::new(5, 1)],
//!     ..Default::default()
//! };
//! let snapshot = CatalogSnapshot::build(&tables).unwrap();
//! let top = rank(&snapshot, 5, Some(&SignalWeights::default()), 5).unwrap();
//! assert_eq!(top[0].id, 2);
//! ```

pub mod explain;
pub mod rank;
pub mod weights;

pub use explain::RankedCandidate;
pub use rank::{explain, rank, Ranker, DEFAULT_TOP_N};
pub use weights::SignalWeights;
