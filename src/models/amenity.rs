use serde::{Deserialize, Serialize};

use super::{require_text, BaseModel, Entity, ValidationResult};

const MAX_NAME_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityPatch {
    pub name: Option<String>,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self {
            base: BaseModel::new(),
            name,
        })
    }

    pub fn validate(name: &str) -> ValidationResult {
        require_text(name, MAX_NAME_CHARS, "Amenity name")
    }

    /// Apply a patch; on error the amenity is left untouched.
    pub fn update(&mut self, patch: AmenityPatch) -> ValidationResult {
        if let Some(name) = patch.name {
            Self::validate(&name)?;
            self.name = name;
            self.base.touch();
        }
        Ok(())
    }
}

impl Entity for Amenity {
    fn base(&self) -> &BaseModel {
        &self.base
    }
}
