use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub score: u32,
}

impl Player {
    pub fn new(id: &str, name: &str) -> Self {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            score: 0,
        }
    }
}
