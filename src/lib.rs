//! # promatch
//!
//! A profile and company matching service built on weighted multi-field
//! vector similarity.
//!
//! Each record carries one unit-normalized embedding per semantic field
//! (role, bio, interests, education and AI bio for profiles; description,
//! industry and location for companies). A search embeds the query text,
//! scores every candidate as the weighted sum of per-field cosine
//! similarities, and returns a ranked list with a deterministic
//! explanation per match.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! GEMINI_API_KEY=... promatch --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use promatch::prelude::*;
//!
//! // Score candidates against a query embedding
//! let ranker = Ranker::new(WeightSchema::profile());
//! let query = Embedding::new(vec![1.0, 0.0]).normalized();
//! let candidates: Vec<ProfileRecord> = vec![];
//! let ranked = ranker.rank(&query, &candidates, None, 5);
//! assert!(ranked.is_empty());
//! ```
//!
//! ## Crate Structure
//!
//! - `promatch-core` - embedding vectors, record model, error taxonomy
//! - `promatch-rank` - weight schemas, ranking engine, query validation,
//!   match explanations
//! - `promatch-store` - vector store adapter, embedding/bio providers,
//!   refresh pipeline
//! - `promatch-api` - REST routes and search orchestration

// Re-export core types
pub use promatch_core::{
    CompanyField, CompanyRecord, CompanyVectors, Embedding, Error, NewCompany, NewProfile,
    ProfileField, ProfileRecord, ProfileVectors, Result,
};

// Re-export ranking
pub use promatch_rank::{
    cofounder_explanation, company_explanation, interest_alignment, profile_explanation,
    FieldWeight, RankedMatch, Ranker, RoleFilter, SearchQuery, SearchRequest, SearchType,
    WeightSchema,
};

// Re-export storage and providers
pub use promatch_store::{
    BioGenerator, Embedder, HttpBioGenerator, HttpEmbedder, MemoryStore, VectorStore,
};

// Re-export API
pub use promatch_api::{ApiContext, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ApiContext, BioGenerator, CompanyRecord, Embedder, Embedding, Error, MemoryStore,
        NewCompany, NewProfile, ProfileRecord, RankedMatch, Ranker, RestApi, Result, RoleFilter,
        SearchRequest, SearchType, VectorStore, WeightSchema,
    };
}
