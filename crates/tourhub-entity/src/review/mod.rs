//! Review domain entities.

pub mod model;

pub use model::{CreateReview, Review, UpdateReview};
