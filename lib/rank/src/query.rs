//! Search query model
//!
//! Wire-level requests are validated once at the boundary into a
//! [`SearchQuery`]; invalid field combinations are rejected with the
//! offending field named, before any embedding call is made.

use promatch_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_RESULTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Profile,
    Company,
    Cofounder,
}

/// Raw search request as received over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_type: SearchType,
    #[serde(default)]
    pub num_results: Option<usize>,
    /// Required for cofounder search, forbidden for company search.
    #[serde(default)]
    pub profile_id: Option<String>,
    /// Forbidden for company search.
    #[serde(default)]
    pub role_filter: Option<String>,
}

/// A validated search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub search_type: SearchType,
    pub num_results: usize,
    pub profile_id: Option<String>,
    pub role_filter: Option<String>,
}

impl SearchRequest {
    pub fn validate(self) -> Result<SearchQuery> {
        if self.query.trim().is_empty() {
            return Err(Error::validation("query", "must not be empty"));
        }

        let num_results = self.num_results.unwrap_or(DEFAULT_NUM_RESULTS);
        if num_results == 0 {
            return Err(Error::validation("num_results", "must be greater than zero"));
        }

        match self.search_type {
            SearchType::Company => {
                if self.profile_id.is_some() {
                    return Err(Error::validation(
                        "profile_id",
                        "cannot be used with company search",
                    ));
                }
                if self.role_filter.is_some() {
                    return Err(Error::validation(
                        "role_filter",
                        "cannot be used with company search",
                    ));
                }
            }
            SearchType::Cofounder => {
                if self.profile_id.is_none() {
                    return Err(Error::validation(
                        "profile_id",
                        "is required for cofounder search",
                    ));
                }
            }
            SearchType::Profile => {}
        }

        Ok(SearchQuery {
            query: self.query,
            search_type: self.search_type,
            num_results,
            profile_id: self.profile_id,
            role_filter: self.role_filter,
        })
    }
}
