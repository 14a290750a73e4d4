//! Search orchestration
//!
//! Validate the query, embed and normalize it, retrieve candidates from the
//! store, rank them with the weighted engine, and format each match with a
//! similarity score and an explanation. Kept independent of the HTTP layer
//! so the full flow is testable without a server.

use promatch_core::{CompanyRecord, Embedding, Error, ProfileRecord, Result};
use promatch_rank::{
    cofounder_explanation, company_explanation, interest_alignment, profile_explanation,
    CandidateFilter, Ranker, RoleFilter, SearchRequest, SearchType, WeightSchema,
};
use promatch_store::{Embedder, VectorStore};
use serde::Serialize;

/// Profile fields echoed back in search results.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub role: String,
    pub education: Option<String>,
    pub bio: Option<String>,
    pub ai_bio: Option<String>,
    pub interests: Vec<String>,
    pub image_url: Option<String>,
}

impl From<&ProfileRecord> for ProfileSummary {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            role: record.role.clone(),
            education: record.education.clone(),
            bio: record.bio.clone(),
            ai_bio: record.ai_bio.clone(),
            interests: record.interests.clone(),
            image_url: record.image_url.clone(),
        }
    }
}

/// Company fields echoed back in search results.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<i32>,
    pub image_url: Option<String>,
}

impl From<&CompanyRecord> for CompanySummary {
    fn from(record: &CompanyRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            industry: record.industry.clone(),
            location: record.location.clone(),
            website: record.website.clone(),
            founded_year: record.founded_year,
            image_url: record.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Profile {
        profile: ProfileSummary,
        similarity_score: f32,
        match_explanation: String,
    },
    Company {
        company: CompanySummary,
        similarity_score: f32,
        match_explanation: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// Execute a search end to end.
///
/// `display_limit` caps how many ranked matches are returned; `None` means
/// the query's own num_results. Validation happens before the query text is
/// embedded, so contradictory requests never reach the provider.
pub async fn execute(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    display_limit: Option<usize>,
    request: SearchRequest,
) -> Result<SearchResponse> {
    let query = request.validate()?;
    let query_vector = embedder.embed(&query.query).await?.normalized();

    let limit = query.num_results;
    let display = display_limit.map_or(limit, |cap| cap.min(limit));

    let results = match query.search_type {
        SearchType::Profile => {
            let candidates = store.profile_candidates().await?;
            rank_profiles(
                &query.query,
                &query_vector,
                &candidates,
                query.role_filter.as_deref(),
                limit,
                display,
            )
        }
        SearchType::Company => {
            let candidates = store.company_candidates().await?;
            let ranker = Ranker::new(WeightSchema::company());
            ranker
                .rank(&query_vector, &candidates, None, limit)
                .into_iter()
                .take(display)
                .map(|m| SearchResult::Company {
                    company: CompanySummary::from(m.candidate),
                    similarity_score: m.score,
                    match_explanation: company_explanation(&query.query, m.candidate),
                })
                .collect()
        }
        SearchType::Cofounder => {
            let seed_id = query
                .profile_id
                .as_deref()
                .ok_or_else(|| Error::validation("profile_id", "is required for cofounder search"))?;
            let seed = store.profile(seed_id).await?;

            let mut candidates = store.profile_candidates().await?;
            candidates.retain(|c| c.id != seed.id);

            let ranker = Ranker::new(WeightSchema::profile());
            let filter = query.role_filter.as_deref().map(RoleFilter::new);
            ranker
                .rank(
                    &query_vector,
                    &candidates,
                    filter
                        .as_ref()
                        .map(|f| f as &dyn CandidateFilter<ProfileRecord>),
                    limit,
                )
                .into_iter()
                .take(display)
                .map(|m| {
                    let alignment = interest_alignment(&seed, m.candidate);
                    SearchResult::Profile {
                        profile: ProfileSummary::from(m.candidate),
                        similarity_score: m.score,
                        match_explanation: cofounder_explanation(
                            &m.candidate.interests,
                            &m.candidate.role,
                            alignment,
                        ),
                    }
                })
                .collect()
        }
    };

    Ok(SearchResponse { results })
}

fn rank_profiles(
    query_text: &str,
    query_vector: &Embedding,
    candidates: &[ProfileRecord],
    role_filter: Option<&str>,
    limit: usize,
    display: usize,
) -> Vec<SearchResult> {
    let ranker = Ranker::new(WeightSchema::profile());
    let filter = role_filter.map(RoleFilter::new);
    ranker
        .rank(
            query_vector,
            candidates,
            filter
                .as_ref()
                .map(|f| f as &dyn CandidateFilter<ProfileRecord>),
            limit,
        )
        .into_iter()
        .take(display)
        .map(|m| SearchResult::Profile {
            profile: ProfileSummary::from(m.candidate),
            similarity_score: m.score,
            match_explanation: profile_explanation(query_text, m.candidate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_serialization_shape() {
        let result = SearchResult::Profile {
            profile: ProfileSummary {
                id: "1".to_string(),
                name: "Ada".to_string(),
                role: "founder".to_string(),
                education: None,
                bio: None,
                ai_bio: None,
                interests: vec![],
                image_url: None,
            },
            similarity_score: 0.42,
            match_explanation: "matched".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["profile"]["name"], "Ada");
        assert_eq!(json["similarity_score"], serde_json::json!(0.42f32));
        assert_eq!(json["match_explanation"], "matched");
        assert!(json.get("company").is_none());
    }
}
