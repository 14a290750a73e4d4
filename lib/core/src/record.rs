use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::embedding::Embedding;
use crate::error::{Error, Result};

/// Semantic fields of a profile that carry an embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Role,
    Bio,
    Interests,
    Education,
    AiBio,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::Role,
        ProfileField::Bio,
        ProfileField::Interests,
        ProfileField::Education,
        ProfileField::AiBio,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ProfileField::Role => "role",
            ProfileField::Bio => "bio",
            ProfileField::Interests => "interests",
            ProfileField::Education => "education",
            ProfileField::AiBio => "ai_bio",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Semantic fields of a company that carry an embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    Description,
    Industry,
    Location,
}

impl CompanyField {
    pub const ALL: [CompanyField; 3] = [
        CompanyField::Description,
        CompanyField::Industry,
        CompanyField::Location,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CompanyField::Description => "description",
            CompanyField::Industry => "industry",
            CompanyField::Location => "location",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Per-field embeddings for a profile.
///
/// Invariant: a stored vector is unit-norm or absent. Setters normalize on
/// the way in; a zero vector (no direction) stores as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileVectors {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Embedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<Embedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interests: Option<Embedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    education: Option<Embedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_bio: Option<Embedding>,
}

impl ProfileVectors {
    pub fn set(&mut self, field: ProfileField, embedding: Embedding) {
        *self.slot_mut(field) = store_normalized(embedding);
    }

    pub fn clear(&mut self, field: ProfileField) {
        *self.slot_mut(field) = None;
    }

    pub fn get(&self, field: ProfileField) -> Option<&Embedding> {
        match field {
            ProfileField::Role => self.role.as_ref(),
            ProfileField::Bio => self.bio.as_ref(),
            ProfileField::Interests => self.interests.as_ref(),
            ProfileField::Education => self.education.as_ref(),
            ProfileField::AiBio => self.ai_bio.as_ref(),
        }
    }

    pub fn by_name(&self, name: &str) -> Option<&Embedding> {
        ProfileField::from_name(name).and_then(|f| self.get(f))
    }

    /// Names of the fields that currently hold a vector.
    pub fn present_fields(&self) -> Vec<&'static str> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_some())
            .map(ProfileField::name)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        ProfileField::ALL.into_iter().all(|f| self.get(f).is_none())
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut Option<Embedding> {
        match field {
            ProfileField::Role => &mut self.role,
            ProfileField::Bio => &mut self.bio,
            ProfileField::Interests => &mut self.interests,
            ProfileField::Education => &mut self.education,
            ProfileField::AiBio => &mut self.ai_bio,
        }
    }
}

/// Per-field embeddings for a company. Same invariant as [`ProfileVectors`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyVectors {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Embedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    industry: Option<Embedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Embedding>,
}

impl CompanyVectors {
    pub fn set(&mut self, field: CompanyField, embedding: Embedding) {
        *self.slot_mut(field) = store_normalized(embedding);
    }

    pub fn clear(&mut self, field: CompanyField) {
        *self.slot_mut(field) = None;
    }

    pub fn get(&self, field: CompanyField) -> Option<&Embedding> {
        match field {
            CompanyField::Description => self.description.as_ref(),
            CompanyField::Industry => self.industry.as_ref(),
            CompanyField::Location => self.location.as_ref(),
        }
    }

    pub fn by_name(&self, name: &str) -> Option<&Embedding> {
        CompanyField::from_name(name).and_then(|f| self.get(f))
    }

    pub fn present_fields(&self) -> Vec<&'static str> {
        CompanyField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_some())
            .map(CompanyField::name)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        CompanyField::ALL.into_iter().all(|f| self.get(f).is_none())
    }

    fn slot_mut(&mut self, field: CompanyField) -> &mut Option<Embedding> {
        match field {
            CompanyField::Description => &mut self.description,
            CompanyField::Industry => &mut self.industry,
            CompanyField::Location => &mut self.location,
        }
    }
}

fn store_normalized(embedding: Embedding) -> Option<Embedding> {
    if embedding.norm() == 0.0 {
        None
    } else {
        Some(embedding.normalized())
    }
}

/// Incoming profile fields, validated at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewProfile {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("name", "must not be empty"));
        }
        if !self.email.contains('@') {
            return Err(Error::validation("email", "must be a valid email address"));
        }
        if self.role.trim().is_empty() {
            return Err(Error::validation("role", "must not be empty"));
        }
        Ok(())
    }
}

/// A stored profile with its scalar fields and per-field embeddings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub vectors: ProfileVectors,
}

impl ProfileRecord {
    /// Create a record from validated fields with a fresh id.
    ///
    /// Vectors are populated by the embedding pipeline after insertion.
    pub fn create(fields: NewProfile) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            email: fields.email,
            role: fields.role,
            phone: fields.phone,
            bio: fields.bio,
            ai_bio: None,
            linkedin_url: fields.linkedin_url,
            education: fields.education,
            company_id: fields.company_id,
            interests: fields.interests,
            image_url: fields.image_url,
            vectors: ProfileVectors::default(),
        }
    }
}

/// Incoming company fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("name", "must not be empty"));
        }
        Ok(())
    }
}

/// A stored company with its scalar fields and per-field embeddings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub vectors: CompanyVectors,
}

impl CompanyRecord {
    pub fn create(fields: NewCompany) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            description: fields.description,
            industry: fields.industry,
            website: fields.website,
            founded_year: fields.founded_year,
            location: fields.location,
            image_url: fields.image_url,
            vectors: CompanyVectors::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_profile() -> NewProfile {
        NewProfile {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "founder".to_string(),
            phone: None,
            bio: None,
            linkedin_url: None,
            education: None,
            company_id: None,
            interests: vec![],
            image_url: None,
        }
    }

    #[test]
    fn test_set_normalizes() {
        let mut vectors = ProfileVectors::default();
        vectors.set(ProfileField::Role, Embedding::new(vec![3.0, 4.0]));
        let stored = vectors.get(ProfileField::Role).unwrap();
        assert!(stored.is_unit());
    }

    #[test]
    fn test_set_zero_vector_stores_absent() {
        let mut vectors = ProfileVectors::default();
        vectors.set(ProfileField::Bio, Embedding::new(vec![0.0, 0.0]));
        assert!(vectors.get(ProfileField::Bio).is_none());
        assert!(vectors.is_empty());
    }

    #[test]
    fn test_by_name() {
        let mut vectors = CompanyVectors::default();
        vectors.set(CompanyField::Industry, Embedding::new(vec![1.0, 0.0]));
        assert!(vectors.by_name("industry").is_some());
        assert!(vectors.by_name("description").is_none());
        assert!(vectors.by_name("nonsense").is_none());
    }

    #[test]
    fn test_present_fields_order() {
        let mut vectors = ProfileVectors::default();
        vectors.set(ProfileField::Education, Embedding::new(vec![1.0]));
        vectors.set(ProfileField::Role, Embedding::new(vec![1.0]));
        assert_eq!(vectors.present_fields(), vec!["role", "education"]);
    }

    #[test]
    fn test_new_profile_validation() {
        assert!(new_profile().validate().is_ok());

        let mut missing_role = new_profile();
        missing_role.role = "  ".to_string();
        let err = missing_role.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "role", .. }));

        let mut bad_email = new_profile();
        bad_email.email = "not-an-email".to_string();
        let err = bad_email.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "email", .. }));
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let a = ProfileRecord::create(new_profile());
        let b = ProfileRecord::create(new_profile());
        assert_ne!(a.id, b.id);
        assert!(a.vectors.is_empty());
        assert!(a.ai_bio.is_none());
    }
}
