//! Field weight schemas
//!
//! A weight schema declares which semantic fields participate in ranking and
//! the relative importance of each. Weights are static configuration; the
//! engine never redistributes the weight of a field a candidate is missing,
//! so incomplete records score strictly lower than complete ones.

use promatch_core::{CompanyField, ProfileField};
use serde::{Deserialize, Serialize};

/// A single scored field and its relative importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeight {
    pub field: String,
    pub weight: f32,
}

impl FieldWeight {
    pub fn new(field: impl Into<String>, weight: f32) -> Self {
        Self {
            field: field.into(),
            weight,
        }
    }
}

/// Ordered field-weight configuration for one record kind.
///
/// Declaration order is preserved; it drives the order of per-field score
/// reporting but has no effect on the combined score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSchema {
    fields: Vec<FieldWeight>,
}

impl WeightSchema {
    pub fn new(fields: Vec<FieldWeight>) -> Result<Self, WeightError> {
        if fields.is_empty() {
            return Err(WeightError::EmptySchema);
        }
        for entry in &fields {
            if entry.weight < 0.0 {
                return Err(WeightError::NegativeWeight(entry.field.clone()));
            }
        }
        let total: f32 = fields.iter().map(|f| f.weight).sum();
        if total <= 0.0 {
            return Err(WeightError::ZeroTotalWeight);
        }
        Ok(Self { fields })
    }

    /// The standard profile schema: role 0.4, bio 0.3, interests 0.2,
    /// education 0.1.
    pub fn profile() -> Self {
        Self {
            fields: vec![
                FieldWeight::new(ProfileField::Role.name(), 0.4),
                FieldWeight::new(ProfileField::Bio.name(), 0.3),
                FieldWeight::new(ProfileField::Interests.name(), 0.2),
                FieldWeight::new(ProfileField::Education.name(), 0.1),
            ],
        }
    }

    /// The standard company schema: description 0.5, industry 0.3,
    /// location 0.2.
    pub fn company() -> Self {
        Self {
            fields: vec![
                FieldWeight::new(CompanyField::Description.name(), 0.5),
                FieldWeight::new(CompanyField::Industry.name(), 0.3),
                FieldWeight::new(CompanyField::Location.name(), 0.2),
            ],
        }
    }

    pub fn fields(&self) -> &[FieldWeight] {
        &self.fields
    }

    pub fn total_weight(&self) -> f32 {
        self.fields.iter().map(|f| f.weight).sum()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum WeightError {
    #[error("Schema cannot be empty")]
    EmptySchema,

    #[error("Field '{0}' has negative weight")]
    NegativeWeight(String),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
}
