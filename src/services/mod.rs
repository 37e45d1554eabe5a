pub mod facade;

pub use facade::{FacadeError, FacadeResult, HbnbFacade, NewReview};
