//! # collrec API
//!
//! REST surface of the recommender:
//!
//! - `GET /` - service banner and readiness
//! - `GET /preprocess_data` - rebuild the catalog snapshot
//! - `GET /recommendations/{user_id}?top_n=N` - default weights
//! - `POST /recommendations/{user_id}` - body `{"weights": {...}, "top_n": N}`

pub mod rest;

pub use rest::{configure, ApiError, RestApi};
