//! Bio generation adapter
//!
//! Produces an AI-written professional bio for a profile via an external
//! generative API. Failures are surfaced as [`Error::Generation`].

use async_trait::async_trait;
use promatch_core::{Error, ProfileRecord, Result};
use serde::{Deserialize, Serialize};

use crate::embedder::{DEFAULT_ENDPOINT, REQUEST_TIMEOUT};

pub const GENERATION_MODEL: &str = "gemini-1.5-flash";

#[async_trait]
pub trait BioGenerator: Send + Sync {
    async fn generate_bio(&self, profile: &ProfileRecord) -> Result<String>;
}

/// HTTP client for a Gemini-style `generateContent` endpoint.
pub struct HttpBioGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpBioGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: GENERATION_MODEL.to_string(),
        }
    }

    /// Override the provider base URL (testing, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// The prompt handed to the generative model.
pub fn bio_prompt(profile: &ProfileRecord) -> String {
    let interests = if profile.interests.is_empty() {
        "Not provided".to_string()
    } else {
        profile.interests.join(", ")
    };

    format!(
        "Create a comprehensive professional bio based on the following information:\n\
         Name: {name}\n\
         Role: {role}\n\
         Current Bio: {bio}\n\
         Education: {education}\n\
         Interests: {interests}\n\
         LinkedIn: {linkedin}\n\
         \n\
         Please write a concise but detailed professional biography that highlights \
         their expertise, background, and professional focus. The bio should be in \
         third person and maintain a professional tone.",
        name = profile.name,
        role = profile.role,
        bio = field_or_default(profile.bio.as_deref()),
        education = field_or_default(profile.education.as_deref()),
        interests = interests,
        linkedin = field_or_default(profile.linkedin_url.as_deref()),
    )
}

fn field_or_default(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "Not provided",
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

#[async_trait]
impl BioGenerator for HttpBioGenerator {
    async fn generate_bio(&self, profile: &ProfileRecord) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let prompt = bio_prompt(profile);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Generation(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Generation("provider returned no text".to_string()));
        }

        Ok(text)
    }
}
