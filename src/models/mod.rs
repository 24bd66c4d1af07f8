//! Data models for the Dragon Ball API.
//!
//! - `Hero`: a hero record with its favorite flag
//! - `Transformation`: a transformation belonging to one hero

pub mod hero;
pub mod transformation;

pub use hero::Hero;
pub use transformation::Transformation;
