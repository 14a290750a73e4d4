//! # promatch Rank
//!
//! The weighted multi-field similarity ranking engine for promatch.
//!
//! Given one unit-normalized query embedding and a set of candidate records
//! (each with zero or more named field embeddings, all unit-normalized),
//! the engine combines per-field cosine similarities into one combined
//! score per candidate and produces a strictly ordered ranked list:
//!
//! - [`WeightSchema`] - static field/weight configuration per record kind
//! - [`Ranker`] - filtering, scoring, stable descending sort, truncation
//! - [`SearchRequest`] / [`SearchQuery`] - boundary-validated query model
//! - [`explain`] - deterministic match explanation templates
//!
//! ## Example
//!
//! ```rust,no_run
//! use promatch_core::{Embedding, ProfileRecord};
//! use promatch_rank::{Ranker, RoleFilter, WeightSchema};
//!
//! let ranker = Ranker::new(WeightSchema::profile());
//! let query = Embedding::new(vec![1.0, 0.0]).normalized();
//! let candidates: Vec<ProfileRecord> = vec![];
//! let filter = RoleFilter::new("founder");
//! let ranked = ranker.rank(&query, &candidates, Some(&filter), 5);
//! assert!(ranked.is_empty());
//! ```

pub mod engine;
pub mod explain;
pub mod query;
pub mod weights;

pub use engine::{
    interest_alignment, CandidateFilter, FieldVectors, RankedMatch, Ranker, RoleFilter,
};
pub use explain::{cofounder_explanation, company_explanation, profile_explanation};
pub use query::{SearchQuery, SearchRequest, SearchType, DEFAULT_NUM_RESULTS};
pub use weights::{FieldWeight, WeightError, WeightSchema};
