//! Tour domain entities.

pub mod difficulty;
pub mod model;

pub use difficulty::Difficulty;
pub use model::{CreateTour, Tour, UpdateTour};
