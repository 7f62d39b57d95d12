use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use reqwest::{Client, ClientBuilder};
use shared::{
    domain::{Creature, CreatureId},
    error::CatalogError,
    protocol::CatalogCreaturePayload,
};
use tracing::{debug, info, warn};

use crate::config::CatalogSettings;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns one playable creature. `CatalogError::NotFound` is never returned.
    async fn fetch_random_creature(&self) -> Result<Creature, CatalogError>;
}

pub struct CatalogClient {
    http: Client,
    base_url: String,
    max_creature_id: u32,
    max_attempts: u32,
    rng: Mutex<StdRng>,
}

impl CatalogClient {
    pub fn new(settings: &CatalogSettings) -> anyhow::Result<Self> {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Same identifier sequence for the same seed.
    pub fn with_seed(settings: &CatalogSettings, seed: u64) -> anyhow::Result<Self> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &CatalogSettings, rng: StdRng) -> anyhow::Result<Self> {
        Self::with_http_builder(settings, rng, Client::builder())
    }

    fn with_http_builder(
        settings: &CatalogSettings,
        rng: StdRng,
        builder: ClientBuilder,
    ) -> anyhow::Result<Self> {
        settings.validate()?;
        let http = builder
            .timeout(settings.request_timeout())
            .build()
            .context("failed to build catalog http client")?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_creature_id: settings.max_creature_id,
            max_attempts: settings.max_attempts,
            rng: Mutex::new(rng),
        })
    }

    pub fn creature_url(&self, id: CreatureId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn next_id(&self) -> CreatureId {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        CreatureId(rng.random_range(1..=self.max_creature_id))
    }

    /// Single lookup without retry. Any non-2xx status is reported as `NotFound`.
    pub async fn fetch_creature(&self, id: CreatureId) -> Result<Creature, CatalogError> {
        let url = self.creature_url(id);
        debug!(creature_id = id.0, %url, "catalog: lookup");

        let response = self.http.get(&url).send().await.map_err(|e| {
            CatalogError::fetch_failure(format!("request to {url} failed: {e}"))
        })?;

        if !response.status().is_success() {
            debug!(
                creature_id = id.0,
                status = response.status().as_u16(),
                "catalog: no record"
            );
            return Err(CatalogError::NotFound(id));
        }

        let body = response.bytes().await.map_err(|e| {
            CatalogError::fetch_failure(format!("failed to read catalog response for id {id}: {e}"))
        })?;
        let payload: CatalogCreaturePayload = serde_json::from_slice(&body).map_err(|e| {
            CatalogError::fetch_failure(format!("malformed catalog payload for id {id}: {e}"))
        })?;
        Ok(payload.into_creature())
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_random_creature(&self) -> Result<Creature, CatalogError> {
        for attempt in 1..=self.max_attempts {
            let id = self.next_id();
            match self.fetch_creature(id).await {
                Ok(creature) => {
                    debug!(creature_id = id.0, attempt, "catalog: creature fetched");
                    return Ok(creature);
                }
                Err(err) if err.is_not_found() => {
                    info!(
                        creature_id = id.0,
                        attempt,
                        max_attempts = self.max_attempts,
                        "catalog: id has no record, drawing another"
                    );
                }
                Err(err) => {
                    warn!(creature_id = id.0, attempt, error = %err, "catalog: lookup failed");
                    return Err(err);
                }
            }
        }

        warn!(
            attempts = self.max_attempts,
            "catalog: exhausted retries without a record"
        );
        Err(CatalogError::ExhaustedRetries {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
