use serde::{Deserialize, Serialize};

use super::{require_text, BaseModel, Entity, ValidationError, ValidationResult};

const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: BaseModel,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlace {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Owner is fixed at creation and absent here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub amenities: Option<Vec<String>>,
}

impl Place {
    pub fn new(input: NewPlace) -> ValidationResult<Self> {
        let mut place = Self {
            base: BaseModel::new(),
            title: input.title,
            description: input.description,
            price: input.price,
            latitude: input.latitude,
            longitude: input.longitude,
            owner_id: input.owner_id,
            amenities: Vec::new(),
        };
        place.set_amenities(input.amenities);
        place.validate()?;
        Ok(place)
    }

    pub fn validate(&self) -> ValidationResult {
        require_text(&self.title, MAX_TITLE_CHARS, "Title")?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::new("Price must be a non-negative number"));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::new("Latitude must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::new("Longitude must be between -180 and 180"));
        }
        if self.owner_id.is_empty() {
            return Err(ValidationError::new("Owner must be provided"));
        }
        Ok(())
    }

    pub fn update(&mut self, patch: PlacePatch) -> ValidationResult {
        let mut candidate = self.clone();
        if let Some(title) = patch.title {
            candidate.title = title;
        }
        if let Some(description) = patch.description {
            candidate.description = description;
        }
        if let Some(price) = patch.price {
            candidate.price = price;
        }
        if let Some(latitude) = patch.latitude {
            candidate.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            candidate.longitude = longitude;
        }
        if let Some(amenities) = patch.amenities {
            candidate.set_amenities(amenities);
        }

        candidate.validate()?;
        candidate.base.touch();
        *self = candidate;
        Ok(())
    }

    // Keeps first occurrence order, drops repeats.
    fn set_amenities(&mut self, amenities: Vec<String>) {
        self.amenities.clear();
        for id in amenities {
            if !self.amenities.contains(&id) {
                self.amenities.push(id);
            }
        }
    }
}

impl Entity for Place {
    fn base(&self) -> &BaseModel {
        &self.base
    }
}
