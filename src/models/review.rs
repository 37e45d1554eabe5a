use serde::{Deserialize, Serialize};

use super::{BaseModel, Entity, ValidationError, ValidationResult};

pub const MAX_TEXT_CHARS: usize = 1024;
pub const MIN_RATING: i64 = 0;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: BaseModel,
    pub text: String,
    pub rating: i64,
    pub place_id: String,
    pub user_id: String,
}

/// Fields a review update may carry. Anything else in a request body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub rating: Option<i64>,
    pub place_id: Option<String>,
    pub user_id: Option<String>,
}

impl Review {
    pub fn new(
        text: impl Into<String>,
        rating: Option<i64>,
        place_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> ValidationResult<Self> {
        let text = text.into();
        let place_id = place_id.into();
        let user_id = user_id.into();

        let rating = Self::validate(&text, rating, &place_id, &user_id)?;
        Ok(Self {
            base: BaseModel::new(),
            text,
            rating,
            place_id,
            user_id,
        })
    }

    /// Returns the accepted rating.
    pub fn validate(text: &str, rating: Option<i64>, place_id: &str, user_id: &str) -> ValidationResult<i64> {
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(ValidationError::new("Text length exceeds 1024 characters"));
        }

        let rating = match rating {
            Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => r,
            _ => return Err(ValidationError::new("Rating must be between 0 and 5")),
        };

        if place_id.is_empty() {
            return Err(ValidationError::new("Place must be provided"));
        }

        if user_id.is_empty() {
            return Err(ValidationError::new("User must be provided"));
        }

        Ok(rating)
    }

    /// Merge the patch into a candidate, validate the candidate's full state,
    /// then commit.
    pub fn update(&mut self, patch: ReviewPatch) -> ValidationResult {
        let mut candidate = self.clone();
        if let Some(text) = patch.text {
            candidate.text = text;
        }
        if let Some(place_id) = patch.place_id {
            candidate.place_id = place_id;
        }
        if let Some(user_id) = patch.user_id {
            candidate.user_id = user_id;
        }
        let rating = patch.rating.unwrap_or(candidate.rating);

        candidate.rating = Self::validate(&candidate.text, Some(rating), &candidate.place_id, &candidate.user_id)?;
        candidate.base.touch();
        *self = candidate;
        Ok(())
    }
}

impl Entity for Review {
    fn base(&self) -> &BaseModel {
        &self.base
    }
}
