pub mod amenity;
pub mod config;
pub mod login;
pub mod token;
pub mod user;
