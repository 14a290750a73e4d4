//! Weighted similarity ranking engine
//!
//! Combines per-field cosine similarities between a query embedding and a
//! candidate's field embeddings into one ranked order. Pure and synchronous:
//! embedding generation and candidate retrieval happen elsewhere.

use ahash::AHashMap;
use promatch_core::{CompanyRecord, Embedding, ProfileField, ProfileRecord};

use crate::weights::WeightSchema;

/// Access to a candidate's named field embeddings.
pub trait FieldVectors {
    fn field_vector(&self, field: &str) -> Option<&Embedding>;
}

impl FieldVectors for ProfileRecord {
    fn field_vector(&self, field: &str) -> Option<&Embedding> {
        self.vectors.by_name(field)
    }
}

impl FieldVectors for CompanyRecord {
    fn field_vector(&self, field: &str) -> Option<&Embedding> {
        self.vectors.by_name(field)
    }
}

/// A filter applied to candidates before scoring. Candidates that fail it
/// are excluded entirely, never scored.
pub trait CandidateFilter<C> {
    fn matches(&self, candidate: &C) -> bool;
}

/// Case-insensitive exact match on a profile's role.
#[derive(Debug, Clone)]
pub struct RoleFilter {
    role: String,
}

impl RoleFilter {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

impl CandidateFilter<ProfileRecord> for RoleFilter {
    fn matches(&self, candidate: &ProfileRecord) -> bool {
        candidate.role.eq_ignore_ascii_case(&self.role)
    }
}

/// One ranked candidate with its combined score and the weighted per-field
/// contributions. Ephemeral: computed per query, never persisted.
#[derive(Debug, Clone)]
pub struct RankedMatch<'a, C> {
    pub candidate: &'a C,
    pub score: f32,
    /// Weighted contribution per field, for fields the candidate has a
    /// vector for. Absent fields contribute nothing and are omitted.
    pub field_scores: AHashMap<String, f32>,
}

/// Ranker that scores candidates against a weight schema.
#[derive(Debug, Clone)]
pub struct Ranker {
    schema: WeightSchema,
}

impl Ranker {
    pub fn new(schema: WeightSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &WeightSchema {
        &self.schema
    }

    /// Rank `candidates` against a unit-normalized query embedding.
    ///
    /// Candidates failing `filter` are excluded before scoring. The result
    /// is sorted by combined score descending; ties keep the candidates'
    /// input (insertion/creation) order. At most `limit` matches are
    /// returned; an empty result is not an error.
    pub fn rank<'a, C: FieldVectors>(
        &self,
        query: &Embedding,
        candidates: &'a [C],
        filter: Option<&dyn CandidateFilter<C>>,
        limit: usize,
    ) -> Vec<RankedMatch<'a, C>> {
        let mut results: Vec<RankedMatch<'a, C>> = candidates
            .iter()
            .filter(|c| filter.map_or(true, |f| f.matches(c)))
            .map(|c| {
                let (score, field_scores) = self.score(query, c);
                RankedMatch {
                    candidate: c,
                    score,
                    field_scores,
                }
            })
            .collect();

        // Stable sort: equal scores keep insertion order.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(limit);
        results
    }

    /// Combined similarity for one candidate.
    ///
    /// Sum of weight x dot(query, field vector) over fields present in both
    /// the schema and the candidate. A missing field's weight is lost, not
    /// redistributed across the remaining fields.
    pub fn score<C: FieldVectors>(
        &self,
        query: &Embedding,
        candidate: &C,
    ) -> (f32, AHashMap<String, f32>) {
        let mut field_scores = AHashMap::new();
        let mut total = 0.0f32;

        for entry in self.schema.fields() {
            let Some(vector) = candidate.field_vector(&entry.field) else {
                continue;
            };
            let contribution = entry.weight * query.dot(vector);
            field_scores.insert(entry.field.clone(), contribution);
            total += contribution;
        }

        (total, field_scores)
    }
}

/// Similarity between two profiles' interests vectors; 0.0 if either is
/// absent. Used by the co-founder explanation.
pub fn interest_alignment(a: &ProfileRecord, b: &ProfileRecord) -> f32 {
    match (
        a.vectors.get(ProfileField::Interests),
        b.vectors.get(ProfileField::Interests),
    ) {
        (Some(x), Some(y)) => x.dot(y),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promatch_core::{NewProfile, ProfileVectors};

    fn profile(name: &str, role: &str) -> ProfileRecord {
        ProfileRecord::create(NewProfile {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            role: role.to_string(),
            phone: None,
            bio: None,
            linkedin_url: None,
            education: None,
            company_id: None,
            interests: vec![],
            image_url: None,
        })
    }

    fn with_vectors(mut p: ProfileRecord, fields: &[(ProfileField, Vec<f32>)]) -> ProfileRecord {
        let mut vectors = ProfileVectors::default();
        for (field, data) in fields {
            vectors.set(*field, Embedding::new(data.clone()));
        }
        p.vectors = vectors;
        p
    }

    fn query() -> Embedding {
        Embedding::new(vec![1.0, 0.0])
    }

    #[test]
    fn test_role_only_vs_bio_and_education() {
        // A: role aligned at 1.0, weight 0.4 -> 0.4.
        // B: bio at 0.9 * 0.3 + education at 0.8 * 0.1 = 0.35.
        let a = with_vectors(
            profile("a", "founder"),
            &[(ProfileField::Role, vec![1.0, 0.0])],
        );
        let b = with_vectors(
            profile("b", "founder"),
            &[
                (ProfileField::Bio, vec![0.9, (1.0f32 - 0.81).sqrt()]),
                (ProfileField::Education, vec![0.8, 0.6]),
            ],
        );

        let candidates = vec![b, a];
        let ranker = Ranker::new(WeightSchema::profile());
        let ranked = ranker.rank(&query(), &candidates, None, 10);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.name, "a");
        assert!((ranked[0].score - 0.4).abs() < 1e-5);
        assert_eq!(ranked[1].candidate.name, "b");
        assert!((ranked[1].score - 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_missing_field_weight_not_redistributed() {
        // Only the role vector is present and perfectly aligned; the score
        // is capped at the role weight, not scaled up to 1.0.
        let p = with_vectors(
            profile("solo", "founder"),
            &[(ProfileField::Role, vec![1.0, 0.0])],
        );
        let ranker = Ranker::new(WeightSchema::profile());
        let (score, field_scores) = ranker.score(&query(), &p);
        assert!((score - 0.4).abs() < 1e-6);
        assert_eq!(field_scores.len(), 1);
    }

    #[test]
    fn test_score_bounded_by_present_weights() {
        let p = with_vectors(
            profile("full", "founder"),
            &[
                (ProfileField::Role, vec![1.0, 0.0]),
                (ProfileField::Bio, vec![1.0, 0.0]),
                (ProfileField::Interests, vec![1.0, 0.0]),
                (ProfileField::Education, vec![1.0, 0.0]),
            ],
        );
        let ranker = Ranker::new(WeightSchema::profile());
        let (score, _) = ranker.score(&query(), &p);
        assert!(score <= ranker.schema().total_weight() + 1e-6);
    }

    #[test]
    fn test_role_filter_excludes_top_candidate() {
        let investor = with_vectors(
            profile("inv", "investor"),
            &[(ProfileField::Role, vec![1.0, 0.0])],
        );
        let founder = with_vectors(
            profile("fnd", "founder"),
            &[(ProfileField::Role, vec![0.5, (1.0f32 - 0.25).sqrt()])],
        );

        let candidates = vec![investor, founder];
        let ranker = Ranker::new(WeightSchema::profile());
        let filter = RoleFilter::new("founder");
        let ranked = ranker.rank(&query(), &candidates, Some(&filter), 10);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate.name, "fnd");
    }

    #[test]
    fn test_role_filter_case_insensitive() {
        let p = profile("x", "Founder");
        let filter = RoleFilter::new("founder");
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let make = |name: &str| {
            with_vectors(
                profile(name, "founder"),
                &[(ProfileField::Role, vec![1.0, 0.0])],
            )
        };
        let candidates = vec![make("first"), make("second"), make("third")];
        let ranker = Ranker::new(WeightSchema::profile());
        let ranked = ranker.rank(&query(), &candidates, None, 10);

        let names: Vec<&str> = ranked.iter().map(|m| m.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_order_stable_under_permutation_for_distinct_scores() {
        let a = with_vectors(
            profile("a", "founder"),
            &[(ProfileField::Role, vec![1.0, 0.0])],
        );
        let b = with_vectors(
            profile("b", "founder"),
            &[(ProfileField::Role, vec![0.6, 0.8])],
        );
        let c = with_vectors(
            profile("c", "founder"),
            &[(ProfileField::Role, vec![0.0, 1.0])],
        );

        let ranker = Ranker::new(WeightSchema::profile());
        let forward = vec![a.clone(), b.clone(), c.clone()];
        let backward = vec![c, b, a];

        let names = |candidates: &[ProfileRecord]| -> Vec<String> {
            ranker
                .rank(&query(), candidates, None, 10)
                .iter()
                .map(|m| m.candidate.name.clone())
                .collect()
        };

        assert_eq!(names(&forward), names(&backward));
        assert_eq!(names(&forward), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_limit_zero_and_limit_beyond_count() {
        let p = with_vectors(
            profile("only", "founder"),
            &[(ProfileField::Role, vec![1.0, 0.0])],
        );
        let candidates = vec![p];
        let ranker = Ranker::new(WeightSchema::profile());

        assert!(ranker.rank(&query(), &candidates, None, 0).is_empty());
        assert_eq!(ranker.rank(&query(), &candidates, None, 100).len(), 1);
    }

    #[test]
    fn test_empty_candidates_is_empty_not_error() {
        let ranker = Ranker::new(WeightSchema::profile());
        let candidates: Vec<ProfileRecord> = vec![];
        assert!(ranker.rank(&query(), &candidates, None, 5).is_empty());
    }

    #[test]
    fn test_determinism() {
        let a = with_vectors(
            profile("a", "founder"),
            &[
                (ProfileField::Role, vec![0.7, (1.0f32 - 0.49).sqrt()]),
                (ProfileField::Bio, vec![0.2, (1.0f32 - 0.04).sqrt()]),
            ],
        );
        let b = with_vectors(
            profile("b", "founder"),
            &[(ProfileField::Interests, vec![0.9, (1.0f32 - 0.81).sqrt()])],
        );
        let candidates = vec![a, b];
        let ranker = Ranker::new(WeightSchema::profile());

        let first: Vec<(String, f32)> = ranker
            .rank(&query(), &candidates, None, 10)
            .iter()
            .map(|m| (m.candidate.id.clone(), m.score))
            .collect();
        let second: Vec<(String, f32)> = ranker
            .rank(&query(), &candidates, None, 10)
            .iter()
            .map(|m| (m.candidate.id.clone(), m.score))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_interest_alignment_absent_vectors() {
        let a = profile("a", "founder");
        let b = with_vectors(
            profile("b", "founder"),
            &[(ProfileField::Interests, vec![1.0, 0.0])],
        );
        assert_eq!(interest_alignment(&a, &b), 0.0);

        let a = with_vectors(
            profile("a", "founder"),
            &[(ProfileField::Interests, vec![1.0, 0.0])],
        );
        assert!((interest_alignment(&a, &b) - 1.0).abs() < 1e-6);
    }
}
