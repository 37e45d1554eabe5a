use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::database::{InMemoryRepository, Repository, RepositoryError};
use crate::models::user::normalize_email;
use crate::models::{
    Amenity, AmenityPatch, NewPlace, NewUser, Place, PlacePatch, Review, ReviewPatch, User, UserPatch,
    ValidationError,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FacadeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Email already registered")]
    EmailTaken,

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type FacadeResult<T> = Result<T, FacadeError>;

/// Input for a new review; rating stays optional so a missing rating is a
/// validation failure rather than a parse failure.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewReview {
    #[serde(default)]
    pub text: String,
    pub rating: Option<i64>,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub user_id: String,
}

/// Single access point to every entity store.
pub struct HbnbFacade {
    users: Arc<dyn Repository<User>>,
    amenities: Arc<dyn Repository<Amenity>>,
    places: Arc<dyn Repository<Place>>,
    reviews: Arc<dyn Repository<Review>>,
    // Held across every read-modify-write on the stores.
    writes: Mutex<()>,
}

impl HbnbFacade {
    pub fn new(
        users: Arc<dyn Repository<User>>,
        amenities: Arc<dyn Repository<Amenity>>,
        places: Arc<dyn Repository<Place>>,
        reviews: Arc<dyn Repository<Review>>,
    ) -> Self {
        Self {
            users,
            amenities,
            places,
            reviews,
            writes: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
        )
    }

    // --- users ---

    pub async fn create_user(&self, input: NewUser) -> FacadeResult<User> {
        let user = User::new(input)?;
        let _guard = self.writes.lock().await;
        if self.find_user_by_normalized_email(&user.email).await.is_some() {
            return Err(FacadeError::EmailTaken);
        }
        let user = self.users.add(user).await?;
        info!(user_id = %user.base.id, is_admin = user.is_admin, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).await
    }

    pub async fn get_all_users(&self) -> Vec<User> {
        self.users.get_all().await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.find_user_by_normalized_email(&normalize_email(email)).await
    }

    pub async fn update_user(&self, user_id: &str, patch: UserPatch) -> FacadeResult<User> {
        let _guard = self.writes.lock().await;
        let mut user = self.users.get(user_id).await.ok_or(FacadeError::NotFound("User"))?;

        if let Some(email) = &patch.email {
            let email = normalize_email(email);
            if let Some(other) = self.find_user_by_normalized_email(&email).await {
                if other.base.id != user.base.id {
                    return Err(FacadeError::EmailTaken);
                }
            }
        }

        user.update(patch)?;
        let user = self.users.update(user).await.map_err(missing("User"))?;
        info!(user_id = %user.base.id, "user updated");
        Ok(user)
    }

    /// Look up a user by credentials. Unknown email and wrong password are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        self.get_user_by_email(email)
            .await
            .filter(|user| user.verify_password(password))
    }

    async fn find_user_by_normalized_email(&self, email: &str) -> Option<User> {
        let email = email.to_string();
        self.users.find_by(&move |u: &User| u.email == email).await
    }

    // --- amenities ---

    pub async fn create_amenity(&self, name: &str) -> FacadeResult<Amenity> {
        let amenity = self.amenities.add(Amenity::new(name)?).await?;
        info!(amenity_id = %amenity.base.id, "amenity created");
        Ok(amenity)
    }

    pub async fn get_amenity(&self, amenity_id: &str) -> Option<Amenity> {
        self.amenities.get(amenity_id).await
    }

    pub async fn get_all_amenities(&self) -> Vec<Amenity> {
        self.amenities.get_all().await
    }

    pub async fn update_amenity(&self, amenity_id: &str, patch: AmenityPatch) -> FacadeResult<Amenity> {
        let _guard = self.writes.lock().await;
        let mut amenity = self
            .amenities
            .get(amenity_id)
            .await
            .ok_or(FacadeError::NotFound("Amenity"))?;
        amenity.update(patch)?;
        let amenity = self.amenities.update(amenity).await.map_err(missing("Amenity"))?;
        info!(amenity_id = %amenity.base.id, "amenity updated");
        Ok(amenity)
    }

    // --- places ---

    pub async fn create_place(&self, input: NewPlace) -> FacadeResult<Place> {
        let place = Place::new(input)?;
        let _guard = self.writes.lock().await;
        if self.users.get(&place.owner_id).await.is_none() {
            return Err(FacadeError::Rejected("Owner not found".to_string()));
        }
        self.ensure_amenities_exist(&place.amenities).await?;

        let place = self.places.add(place).await?;
        info!(place_id = %place.base.id, owner_id = %place.owner_id, "place created");
        Ok(place)
    }

    pub async fn get_place(&self, place_id: &str) -> Option<Place> {
        self.places.get(place_id).await
    }

    pub async fn get_all_places(&self) -> Vec<Place> {
        self.places.get_all().await
    }

    pub async fn update_place(&self, place_id: &str, patch: PlacePatch) -> FacadeResult<Place> {
        let _guard = self.writes.lock().await;
        let mut place = self.places.get(place_id).await.ok_or(FacadeError::NotFound("Place"))?;
        if let Some(amenities) = &patch.amenities {
            self.ensure_amenities_exist(amenities).await?;
        }
        place.update(patch)?;
        let place = self.places.update(place).await.map_err(missing("Place"))?;
        info!(place_id = %place.base.id, "place updated");
        Ok(place)
    }

    /// Resolve a place's amenity ids, skipping any that no longer exist.
    pub async fn get_place_amenities(&self, place: &Place) -> Vec<Amenity> {
        let mut amenities = Vec::with_capacity(place.amenities.len());
        for id in &place.amenities {
            if let Some(amenity) = self.amenities.get(id).await {
                amenities.push(amenity);
            }
        }
        amenities
    }

    async fn ensure_amenities_exist(&self, ids: &[String]) -> FacadeResult<()> {
        for id in ids {
            if self.amenities.get(id).await.is_none() {
                return Err(FacadeError::Rejected(format!("Amenity not found: {id}")));
            }
        }
        Ok(())
    }

    // --- reviews ---

    pub async fn create_review(&self, input: NewReview) -> FacadeResult<Review> {
        let review = Review::new(input.text, input.rating, input.place_id, input.user_id)?;

        let _guard = self.writes.lock().await;
        if self.users.get(&review.user_id).await.is_none() {
            return Err(FacadeError::Rejected("User not found".to_string()));
        }
        let place = self
            .places
            .get(&review.place_id)
            .await
            .ok_or_else(|| FacadeError::Rejected("Place not found".to_string()))?;
        if place.owner_id == review.user_id {
            return Err(FacadeError::Rejected("You cannot review your own place".to_string()));
        }

        let (user_id, place_id) = (review.user_id.clone(), review.place_id.clone());
        let already = self
            .reviews
            .find_by(&move |r: &Review| r.user_id == user_id && r.place_id == place_id)
            .await;
        if already.is_some() {
            return Err(FacadeError::Rejected("You have already reviewed this place".to_string()));
        }

        let review = self.reviews.add(review).await?;
        info!(review_id = %review.base.id, place_id = %review.place_id, "review created");
        Ok(review)
    }

    pub async fn get_review(&self, review_id: &str) -> Option<Review> {
        self.reviews.get(review_id).await
    }

    pub async fn get_all_reviews(&self) -> Vec<Review> {
        self.reviews.get_all().await
    }

    pub async fn get_reviews_by_place(&self, place_id: &str) -> FacadeResult<Vec<Review>> {
        if self.places.get(place_id).await.is_none() {
            return Err(FacadeError::NotFound("Place"));
        }
        let place_id = place_id.to_string();
        Ok(self.reviews.filter(&move |r: &Review| r.place_id == place_id).await)
    }

    pub async fn update_review(&self, review_id: &str, patch: ReviewPatch) -> FacadeResult<Review> {
        let _guard = self.writes.lock().await;
        let mut review = self.reviews.get(review_id).await.ok_or(FacadeError::NotFound("Review"))?;
        review.update(patch)?;
        let review = self.reviews.update(review).await.map_err(missing("Review"))?;
        info!(review_id = %review.base.id, "review updated");
        Ok(review)
    }

    pub async fn delete_review(&self, review_id: &str) -> FacadeResult<Review> {
        let _guard = self.writes.lock().await;
        let review = self.reviews.delete(review_id).await.map_err(missing("Review"))?;
        info!(review_id = %review.base.id, "review deleted");
        Ok(review)
    }
}

/// A record vanishing between lookup and write is a plain not-found.
fn missing(entity: &'static str) -> impl Fn(RepositoryError) -> FacadeError {
    move |err| match err {
        RepositoryError::NotFound(_) => FacadeError::NotFound(entity),
        other => FacadeError::Repository(other),
    }
}
