use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub identifier: String,
    pub score: f32,
}

/// Ranked matches for one query, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub matches: Vec<Match>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.identifier.as_str()).collect()
    }
}
