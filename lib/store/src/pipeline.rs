//! Embedding refresh pipeline
//!
//! Recomputes the per-field embeddings of a record from its current scalar
//! fields. Creation is a three-step sequence (insert, embed, generate bio)
//! with no transactional guarantee: a record can exist with partial
//! vectors, and a later failure is reported to the caller rather than
//! rolled back.

use promatch_core::{
    CompanyField, CompanyVectors, ProfileField, ProfileVectors, Result,
};
use tracing::{info, warn};

use crate::embedder::Embedder;
use crate::generate::BioGenerator;
use crate::store::VectorStore;

/// Outcome of regenerating a profile's AI bio.
#[derive(Debug, Clone)]
pub struct AiBioUpdate {
    pub ai_bio: String,
    /// False when the bio text was stored but its embedding could not be
    /// computed; the caller can re-invoke the embeddings endpoint.
    pub vector_refreshed: bool,
}

/// Re-embed every non-empty scalar field of a profile and persist the new
/// vector set. Returns the names of the fields that were refreshed.
///
/// Fields whose scalar is now empty lose their vector; the AI-bio vector is
/// carried over untouched (it has its own refresh path).
pub async fn refresh_profile_vectors(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    profile_id: &str,
) -> Result<Vec<&'static str>> {
    let profile = store.profile(profile_id).await?;

    let mut vectors = ProfileVectors::default();
    let mut refreshed = Vec::new();

    if !profile.role.is_empty() {
        vectors.set(ProfileField::Role, embedder.embed(&profile.role).await?);
        refreshed.push(ProfileField::Role.name());
    }
    if let Some(bio) = non_empty(profile.bio.as_deref()) {
        vectors.set(ProfileField::Bio, embedder.embed(bio).await?);
        refreshed.push(ProfileField::Bio.name());
    }
    if !profile.interests.is_empty() {
        let interests_text = profile.interests.join(" ");
        vectors.set(
            ProfileField::Interests,
            embedder.embed(&interests_text).await?,
        );
        refreshed.push(ProfileField::Interests.name());
    }
    if let Some(education) = non_empty(profile.education.as_deref()) {
        vectors.set(ProfileField::Education, embedder.embed(education).await?);
        refreshed.push(ProfileField::Education.name());
    }
    if let Some(ai_bio_vector) = profile.vectors.get(ProfileField::AiBio) {
        vectors.set(ProfileField::AiBio, ai_bio_vector.clone());
    }

    store.update_profile_vectors(profile_id, vectors).await?;
    info!(profile_id, fields = ?refreshed, "updated profile embeddings");
    Ok(refreshed)
}

/// Regenerate a profile's AI bio and its embedding.
///
/// The generated text is persisted even when its embedding fails; the
/// partial state is reported through [`AiBioUpdate::vector_refreshed`].
pub async fn refresh_profile_ai_bio(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    generator: &dyn BioGenerator,
    profile_id: &str,
) -> Result<AiBioUpdate> {
    let profile = store.profile(profile_id).await?;
    let ai_bio = generator.generate_bio(&profile).await?;

    let vector = match embedder.embed(&ai_bio).await {
        Ok(vector) => Some(vector),
        Err(e) => {
            warn!(profile_id, error = %e, "AI bio stored without embedding");
            None
        }
    };
    let vector_refreshed = vector.is_some();

    store
        .update_profile_ai_bio(profile_id, ai_bio.clone(), vector)
        .await?;
    info!(profile_id, vector_refreshed, "updated profile AI bio");
    Ok(AiBioUpdate {
        ai_bio,
        vector_refreshed,
    })
}

/// Re-embed every non-empty scalar field of a company.
pub async fn refresh_company_vectors(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    company_id: &str,
) -> Result<Vec<&'static str>> {
    let company = store.company(company_id).await?;

    let mut vectors = CompanyVectors::default();
    let mut refreshed = Vec::new();

    if let Some(description) = non_empty(company.description.as_deref()) {
        vectors.set(
            CompanyField::Description,
            embedder.embed(description).await?,
        );
        refreshed.push(CompanyField::Description.name());
    }
    if let Some(industry) = non_empty(company.industry.as_deref()) {
        vectors.set(CompanyField::Industry, embedder.embed(industry).await?);
        refreshed.push(CompanyField::Industry.name());
    }
    if let Some(location) = non_empty(company.location.as_deref()) {
        vectors.set(CompanyField::Location, embedder.embed(location).await?);
        refreshed.push(CompanyField::Location.name());
    }

    store.update_company_vectors(company_id, vectors).await?;
    info!(company_id, fields = ?refreshed, "updated company embeddings");
    Ok(refreshed)
}

/// Refresh embeddings for every profile. Per-record failures are logged and
/// skipped; the sweep continues. Returns the number of records updated.
pub async fn refresh_all_profiles(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
) -> Result<usize> {
    let profiles = store.profile_candidates().await?;
    let mut updated = 0;
    for profile in profiles {
        match refresh_profile_vectors(store, embedder, &profile.id).await {
            Ok(_) => updated += 1,
            Err(e) => warn!(profile_id = %profile.id, error = %e, "skipping profile"),
        }
    }
    info!(updated, "completed profile embedding sweep");
    Ok(updated)
}

/// Refresh embeddings for every company, skipping per-record failures.
pub async fn refresh_all_companies(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
) -> Result<usize> {
    let companies = store.company_candidates().await?;
    let mut updated = 0;
    for company in companies {
        match refresh_company_vectors(store, embedder, &company.id).await {
            Ok(_) => updated += 1,
            Err(e) => warn!(company_id = %company.id, error = %e, "skipping company"),
        }
    }
    info!(updated, "completed company embedding sweep");
    Ok(updated)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use promatch_core::{Embedding, Error, NewProfile, ProfileRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic embedder: vector depends on input length.
    struct StubEmbedder {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> promatch_core::Result<Embedding> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::EmbeddingUnavailable("stub failure".to_string()));
            }
            Ok(Embedding::new(vec![text.len() as f32, 1.0]))
        }
    }

    struct StubGenerator;

    #[async_trait]
    impl BioGenerator for StubGenerator {
        async fn generate_bio(&self, profile: &ProfileRecord) -> promatch_core::Result<String> {
            Ok(format!("{} is a {}.", profile.name, profile.role))
        }
    }

    fn new_profile() -> NewProfile {
        NewProfile {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "founder".to_string(),
            phone: None,
            bio: Some("Built two companies".to_string()),
            linkedin_url: None,
            education: None,
            company_id: None,
            interests: vec!["AI".to_string()],
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_refresh_embeds_only_non_empty_fields() {
        let store = MemoryStore::new();
        let embedder = StubEmbedder::new();
        let created = store.insert_profile(new_profile()).await.unwrap();

        let refreshed = refresh_profile_vectors(&store, &embedder, &created.id)
            .await
            .unwrap();
        assert_eq!(refreshed, vec!["role", "bio", "interests"]);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);

        let fetched = store.profile(&created.id).await.unwrap();
        assert!(fetched.vectors.get(ProfileField::Role).unwrap().is_unit());
        assert!(fetched.vectors.get(ProfileField::Education).is_none());
    }

    #[tokio::test]
    async fn test_refresh_propagates_embedding_failure() {
        let store = MemoryStore::new();
        let embedder = StubEmbedder::failing();
        let created = store.insert_profile(new_profile()).await.unwrap();

        let err = refresh_profile_vectors(&store, &embedder, &created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmbeddingUnavailable(_)));

        // Record still exists, just without vectors.
        let fetched = store.profile(&created.id).await.unwrap();
        assert!(fetched.vectors.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_unknown_profile_is_not_found() {
        let store = MemoryStore::new();
        let embedder = StubEmbedder::new();
        let err = refresh_profile_vectors(&store, &embedder, "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(_)));
    }

    #[tokio::test]
    async fn test_ai_bio_stored_even_when_embedding_fails() {
        let store = MemoryStore::new();
        let embedder = StubEmbedder::failing();
        let created = store.insert_profile(new_profile()).await.unwrap();

        let update = refresh_profile_ai_bio(&store, &embedder, &StubGenerator, &created.id)
            .await
            .unwrap();
        assert!(!update.vector_refreshed);
        assert_eq!(update.ai_bio, "Ada is a founder.");

        let fetched = store.profile(&created.id).await.unwrap();
        assert_eq!(fetched.ai_bio.as_deref(), Some("Ada is a founder."));
        assert!(fetched.vectors.get(ProfileField::AiBio).is_none());
    }

    #[tokio::test]
    async fn test_field_refresh_keeps_ai_bio_vector() {
        let store = MemoryStore::new();
        let embedder = StubEmbedder::new();
        let created = store.insert_profile(new_profile()).await.unwrap();

        refresh_profile_ai_bio(&store, &embedder, &StubGenerator, &created.id)
            .await
            .unwrap();
        refresh_profile_vectors(&store, &embedder, &created.id)
            .await
            .unwrap();

        let fetched = store.profile(&created.id).await.unwrap();
        assert!(fetched.vectors.get(ProfileField::AiBio).is_some());
    }

    #[tokio::test]
    async fn test_sweep_skips_failing_records() {
        let store = MemoryStore::new();
        store.insert_profile(new_profile()).await.unwrap();
        store.insert_profile(new_profile()).await.unwrap();

        let updated = refresh_all_profiles(&store, &StubEmbedder::new())
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let updated = refresh_all_profiles(&store, &StubEmbedder::failing())
            .await
            .unwrap();
        assert_eq!(updated, 0);
    }
}
