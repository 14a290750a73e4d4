//! Vector store adapter
//!
//! The external datastore holds both record kinds with their per-field
//! embeddings and hands candidates back for ranking (the engine performs
//! the full weighted scoring; the store only stores and lists). Candidate
//! listings preserve insertion/creation order, which the ranking tie-break
//! depends on.

use ahash::AHashMap;
use async_trait::async_trait;
use parking_lot::RwLock;
use promatch_core::{
    CompanyRecord, CompanyVectors, Embedding, Error, NewCompany, NewProfile, ProfileField,
    ProfileRecord, ProfileVectors, Result,
};

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn insert_profile(&self, fields: NewProfile) -> Result<ProfileRecord>;
    async fn profile(&self, id: &str) -> Result<ProfileRecord>;
    async fn update_profile_vectors(&self, id: &str, vectors: ProfileVectors) -> Result<()>;
    async fn update_profile_ai_bio(
        &self,
        id: &str,
        ai_bio: String,
        vector: Option<Embedding>,
    ) -> Result<()>;
    /// All profiles in insertion order, with their vector sets.
    async fn profile_candidates(&self) -> Result<Vec<ProfileRecord>>;

    async fn insert_company(&self, fields: NewCompany) -> Result<CompanyRecord>;
    async fn company(&self, id: &str) -> Result<CompanyRecord>;
    async fn update_company_vectors(&self, id: &str, vectors: CompanyVectors) -> Result<()>;
    /// All companies in insertion order, with their vector sets.
    async fn company_candidates(&self) -> Result<Vec<CompanyRecord>>;
}

/// Insertion-ordered row table with an id index.
struct Table<T> {
    rows: Vec<T>,
    index: AHashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: AHashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, id: String, row: T) {
        self.index.insert(id, self.rows.len());
        self.rows.push(row);
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.index.get(id).map(|&i| &mut self.rows[i])
    }
}

/// In-memory reference implementation of [`VectorStore`].
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<Table<ProfileRecord>>,
    companies: RwLock<Table<CompanyRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn insert_profile(&self, fields: NewProfile) -> Result<ProfileRecord> {
        let record = ProfileRecord::create(fields);
        self.profiles
            .write()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn profile(&self, id: &str) -> Result<ProfileRecord> {
        self.profiles
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ProfileNotFound(id.to_string()))
    }

    async fn update_profile_vectors(&self, id: &str, vectors: ProfileVectors) -> Result<()> {
        let mut profiles = self.profiles.write();
        let record = profiles
            .get_mut(id)
            .ok_or_else(|| Error::ProfileNotFound(id.to_string()))?;
        record.vectors = vectors;
        Ok(())
    }

    async fn update_profile_ai_bio(
        &self,
        id: &str,
        ai_bio: String,
        vector: Option<Embedding>,
    ) -> Result<()> {
        let mut profiles = self.profiles.write();
        let record = profiles
            .get_mut(id)
            .ok_or_else(|| Error::ProfileNotFound(id.to_string()))?;
        record.ai_bio = Some(ai_bio);
        match vector {
            Some(vector) => record.vectors.set(ProfileField::AiBio, vector),
            None => record.vectors.clear(ProfileField::AiBio),
        }
        Ok(())
    }

    async fn profile_candidates(&self) -> Result<Vec<ProfileRecord>> {
        Ok(self.profiles.read().rows.clone())
    }

    async fn insert_company(&self, fields: NewCompany) -> Result<CompanyRecord> {
        let record = CompanyRecord::create(fields);
        self.companies
            .write()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn company(&self, id: &str) -> Result<CompanyRecord> {
        self.companies
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::CompanyNotFound(id.to_string()))
    }

    async fn update_company_vectors(&self, id: &str, vectors: CompanyVectors) -> Result<()> {
        let mut companies = self.companies.write();
        let record = companies
            .get_mut(id)
            .ok_or_else(|| Error::CompanyNotFound(id.to_string()))?;
        record.vectors = vectors;
        Ok(())
    }

    async fn company_candidates(&self) -> Result<Vec<CompanyRecord>> {
        Ok(self.companies.read().rows.clone())
    }
}
