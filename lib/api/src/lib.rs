//! # promatch API
//!
//! REST surface for the promatch matching service. One canonical route
//! table over the shared ranking engine and formatter:
//!
//! - `POST /profiles`, `PUT /profiles/{id}/embeddings`,
//!   `PUT /profiles/{id}/ai-bio`, `POST /profiles/embeddings`
//! - `POST /companies`, `PUT /companies/{id}/embeddings`,
//!   `POST /companies/embeddings`
//! - `POST /search`
//! - `GET /health`
//!
//! The search flow itself lives in [`search`] and runs without the HTTP
//! layer, which is how the integration tests exercise it.

pub mod rest;
pub mod search;

pub use rest::{ApiContext, RestApi};
pub use search::{CompanySummary, ProfileSummary, SearchResponse, SearchResult};
