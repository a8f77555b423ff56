use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TOP_K: usize = 5;

/// Number of matches a query asks for. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopK(usize);

impl TopK {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidArgument(format!(
                "topk must be a positive integer, got {value}"
            )));
        }
        Ok(TopK(value as usize))
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for TopK {
    type Error = DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(DomainError::InvalidArgument(
                "topk must be a positive integer, got 0".into(),
            ));
        }
        Ok(TopK(value))
    }
}

impl fmt::Display for TopK {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for TopK {
    fn default() -> Self {
        TopK(DEFAULT_TOP_K)
    }
}
