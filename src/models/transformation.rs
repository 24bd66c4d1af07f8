use serde::{Deserialize, Serialize};

/// A transformation belonging to one hero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transformation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo: String,
}
