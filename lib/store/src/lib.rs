//! # promatch Store
//!
//! Storage and provider adapters for the promatch matching service:
//!
//! - [`VectorStore`] - record CRUD + ordered candidate listing, with
//!   [`MemoryStore`] as the in-memory reference implementation
//! - [`Embedder`] - text to embedding vector, over an external API
//! - [`BioGenerator`] - AI-written profile bios, over an external API
//! - [`pipeline`] - the embedding refresh pipeline tying them together
//!
//! All adapters are constructor-injected; nothing here is ambient global
//! state. Provider calls carry a bounded timeout and surface typed errors.

pub mod embedder;
pub mod generate;
pub mod pipeline;
pub mod store;

pub use embedder::{Embedder, HttpEmbedder, DEFAULT_ENDPOINT, EMBEDDING_MODEL};
pub use generate::{bio_prompt, BioGenerator, HttpBioGenerator, GENERATION_MODEL};
pub use pipeline::{
    refresh_all_companies, refresh_all_profiles, refresh_company_vectors, refresh_profile_ai_bio,
    refresh_profile_vectors, AiBioUpdate,
};
pub use store::{MemoryStore, VectorStore};
