//! Supabase REST client for the hosted catalog.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::state::data::Material;

/// Read-only client for one Supabase project
pub struct RestClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Endpoint that returns every row of `table`, ordered by title
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}?select=*&order=title.asc", self.base_url)
    }

    /// Fetch every row of `table`. No pagination: the whole table or an error.
    pub async fn fetch_all(&self, table: &str) -> Result<Vec<Material>, FetchError> {
        let url = self.table_url(table);
        debug!(%url, "fetching catalog");

        let response = self
            .client
            .get(&url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(&self.anon_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let materials: Vec<Material> = response.json().await?;
        info!(count = materials.len(), table, "fetched hosted catalog");

        Ok(materials)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
