use serde::{Deserialize, Serialize};

/// A hero record as served by the collection endpoint.
///
/// Field names match the wire format. Decoded records are immutable;
/// every fetch replaces the previous collection wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo: String,
    pub favorite: bool,
}
