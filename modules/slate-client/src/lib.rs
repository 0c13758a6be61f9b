pub mod error;
pub mod types;

pub use error::{ClientError, Result};
pub use types::Outcome;

use std::time::Duration;

use slate_common::{Config, FormValues, MasterItem};
use types::{CreatedResponse, ErrorBody, ItemsResponse};

/// REST client for the ERP backend. Two endpoint families, two outcome
/// conventions: the legacy entity routes answer 200 with a success flag in
/// the body, the master routes answer with the HTTP status itself. Which
/// convention applies is fixed per route, never sniffed from the response.
pub struct EntityClient {
    client: reqwest::Client,
    base_url: String,
}

impl EntityClient {
    /// Client against `base_url` with the default 30s request timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for `config`'s API base, honoring its HTTP timeout.
    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(&config.api_base, Duration::from_secs(config.http_timeout_secs))
    }

    // --- Legacy entity family -------------------------------------------

    /// Create an entry from form fields. The flag in the body is the verdict;
    /// a `success: false` answer is an Ok result, not an error.
    pub async fn add_entry(&self, category: &str, fields: &FormValues) -> Result<Outcome> {
        let url = format!("{}/api/add/{}", self.base_url, category);
        tracing::debug!(category, "Adding entry");

        let resp = self.client.post(&url).json(fields).send().await?;
        flag_outcome(resp).await
    }

    /// Update an entry by id with the given form fields.
    pub async fn update_entry(
        &self,
        category: &str,
        id: &str,
        fields: &FormValues,
    ) -> Result<Outcome> {
        let url = format!("{}/api/update/{}/{}", self.base_url, category, id);
        tracing::debug!(category, id, "Updating entry");

        let resp = self.client.post(&url).json(fields).send().await?;
        flag_outcome(resp).await
    }

    /// Delete an entry by id. No body goes out; the verdict comes back in one.
    pub async fn delete_entry(&self, category: &str, id: &str) -> Result<Outcome> {
        let url = format!("{}/delete/{}/{}", self.base_url, category, id);
        tracing::debug!(category, id, "Deleting entry");

        let resp = self.client.post(&url).send().await?;
        flag_outcome(resp).await
    }

    // --- Master family ---------------------------------------------------

    /// Current items of a master category, in server order.
    pub async fn master_items(&self, category: &str) -> Result<Vec<MasterItem>> {
        let url = format!("{}/master/{}/items", self.base_url, category);

        let resp = self.client.get(&url).send().await?;
        let resp = status_outcome(resp).await?;

        let body: ItemsResponse = resp.json().await?;
        Ok(body.items)
    }

    /// Create a master item. Returns the server-assigned id.
    pub async fn create_master_item(&self, category: &str, name: &str) -> Result<String> {
        let url = format!("{}/master/{}/items", self.base_url, category);
        tracing::debug!(category, name, "Creating master item");

        let body = serde_json::json!({ "name": name });
        let resp = self.client.post(&url).json(&body).send().await?;
        let resp = status_outcome(resp).await?;

        let created: CreatedResponse = resp.json().await?;
        Ok(created.id)
    }

    /// Rename a master item.
    pub async fn update_master_item(&self, category: &str, id: &str, name: &str) -> Result<()> {
        let url = format!("{}/master/{}/items/{}", self.base_url, category, id);
        tracing::debug!(category, id, name, "Renaming master item");

        let body = serde_json::json!({ "name": name });
        let resp = self.client.put(&url).json(&body).send().await?;
        status_outcome(resp).await?;
        Ok(())
    }

    /// Delete a master item.
    pub async fn delete_master_item(&self, category: &str, id: &str) -> Result<()> {
        let url = format!("{}/master/{}/items/{}", self.base_url, category, id);
        tracing::debug!(category, id, "Deleting master item");

        let resp = self.client.delete(&url).send().await?;
        status_outcome(resp).await?;
        Ok(())
    }
}

// --- Response interpretation ---------------------------------------------

/// Legacy convention: the body carries the verdict whatever the status says.
async fn flag_outcome(resp: reqwest::Response) -> Result<Outcome> {
    let outcome: Outcome = resp.json().await?;
    Ok(outcome)
}

/// Master convention: a non-success status IS the failure. The body's
/// message rides along when there is one; otherwise the raw body does.
async fn status_outcome(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);

        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(resp)
}
