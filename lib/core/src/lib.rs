//! # promatch Core
//!
//! Core library for the promatch matching service.
//!
//! This crate provides the fundamental data model shared by every other
//! crate in the workspace:
//!
//! - [`Embedding`] - Dense embedding vector with L2 normalization
//! - [`ProfileRecord`] / [`CompanyRecord`] - Typed records with per-field
//!   vector sets
//! - [`Error`] - The crate-wide error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use promatch_core::{Embedding, ProfileField, ProfileVectors};
//!
//! let mut vectors = ProfileVectors::default();
//! vectors.set(ProfileField::Role, Embedding::new(vec![3.0, 4.0]));
//!
//! // Stored vectors are always unit-norm.
//! assert!(vectors.get(ProfileField::Role).unwrap().is_unit());
//! ```

pub mod embedding;
pub mod error;
pub mod record;

pub use embedding::Embedding;
pub use error::{Error, Result};
pub use record::{
    CompanyField, CompanyRecord, CompanyVectors, NewCompany, NewProfile, ProfileField,
    ProfileRecord, ProfileVectors,
};
