use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod amenity;
pub mod place;
pub mod review;
pub mod user;

pub use amenity::{Amenity, AmenityPatch};
pub use place::{NewPlace, Place, PlacePatch};
pub use review::{Review, ReviewPatch};
pub use user::{NewUser, User, UserPatch};

/// Rejected field values. The message is client-facing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Identity and lifecycle fields shared by every entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BaseModel {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` after a successful mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything the repository can store.
pub trait Entity: Clone + Send + Sync + 'static {
    fn base(&self) -> &BaseModel;

    fn id(&self) -> &str {
        &self.base().id
    }
}

pub(crate) fn require_text(value: &str, max_chars: usize, field: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} must be provided")));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}
