//! Product condition classification.

use serde::{Deserialize, Serialize};

/// Error parsing a [`Condition`] from its wire label.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid condition: {0}")]
pub struct ConditionParseError(String);

/// Physical condition of a catalog part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Used,
    Refurbished,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Used => write!(f, "used"),
            Self::Refurbished => write!(f, "refurbished"),
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = ConditionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "used" => Ok(Self::Used),
            "refurbished" => Ok(Self::Refurbished),
            _ => Err(ConditionParseError(s.to_string())),
        }
    }
}
