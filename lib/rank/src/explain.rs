//! Match explanations
//!
//! Deterministic, template-based sentences describing why a record matched
//! a query. Pure and total: never fails, never touches I/O. Clauses follow
//! the records' field declaration order and are joined with commas and a
//! final " and " before the last clause.

use promatch_core::{CompanyRecord, ProfileRecord};

/// Why this profile matched the query.
pub fn profile_explanation(query: &str, profile: &ProfileRecord) -> String {
    let mut reasons = Vec::new();

    if !profile.role.is_empty() {
        reasons.push(format!("their role as {}", profile.role));
    }
    if let Some(education) = non_empty(profile.education.as_deref()) {
        reasons.push(format!("their education background in {education}"));
    }
    if non_empty(profile.bio.as_deref()).is_some() {
        reasons.push("their professional experience".to_string());
    }
    if !profile.interests.is_empty() {
        reasons.push(format!(
            "their interests in {}",
            join_first(&profile.interests, 3)
        ));
    }

    join_reasons(
        format!("This profile matches your search '{query}' based on "),
        reasons,
    )
}

/// Why this company matched the query.
pub fn company_explanation(query: &str, company: &CompanyRecord) -> String {
    let mut reasons = Vec::new();

    if let Some(industry) = non_empty(company.industry.as_deref()) {
        reasons.push(format!("its industry focus in {industry}"));
    }
    if non_empty(company.description.as_deref()).is_some() {
        reasons.push("its business description".to_string());
    }
    if let Some(location) = non_empty(company.location.as_deref()) {
        reasons.push(format!("its location in {location}"));
    }
    if let Some(year) = company.founded_year {
        reasons.push(format!("being founded in {year}"));
    }

    join_reasons(
        format!("This company matches your search '{query}' based on "),
        reasons,
    )
}

/// Why this profile could be a good co-founder, keyed on the similarity
/// between the seed's and the candidate's interests vectors.
pub fn cofounder_explanation(interests: &[String], role: &str, interest_similarity: f32) -> String {
    let mut explanation = String::from("This potential co-founder could be a great match! ");
    explanation.push_str(&format!("They are a {role}. "));

    if !interests.is_empty() {
        if interest_similarity > 0.8 {
            explanation.push_str(&format!(
                "You share many common interests, including {}. ",
                join_first(interests, 3)
            ));
        } else if interest_similarity > 0.5 {
            explanation.push_str(&format!(
                "You have some interests in common, such as {}. ",
                join_first(interests, 2)
            ));
        } else {
            explanation.push_str(&format!(
                "They bring diverse interests including {}. ",
                join_first(interests, 2)
            ));
        }
    }

    if interest_similarity > 0.8 {
        explanation.push_str("Your interests align very strongly!");
    } else if interest_similarity > 0.6 {
        explanation.push_str("You have good interest alignment.");
    } else {
        explanation.push_str("Your different interests could bring diverse perspectives.");
    }

    explanation
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn join_first(items: &[String], count: usize) -> String {
    items
        .iter()
        .take(count)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_reasons(preamble: String, reasons: Vec<String>) -> String {
    let mut explanation = preamble;
    match reasons.len() {
        0 => {}
        1 => explanation.push_str(&reasons[0]),
        n => {
            explanation.push_str(&reasons[..n - 1].join(", "));
            explanation.push_str(" and ");
            explanation.push_str(&reasons[n - 1]);
        }
    }
    explanation
}
