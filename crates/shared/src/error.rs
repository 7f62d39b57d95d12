use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CreatureId;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CatalogError {
    /// The identifier has no record. Recovered by the client and never surfaced.
    #[error("no catalog record for id {0}")]
    NotFound(CreatureId),
    #[error("failed to fetch a valid creature after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
    #[error("catalog fetch failed: {0}")]
    FetchFailure(String),
}

impl CatalogError {
    pub fn fetch_failure(message: impl Into<String>) -> Self {
        Self::FetchFailure(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
