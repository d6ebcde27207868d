//! HTTP client for the fixture documents on the dashboard's static host.

use async_trait::async_trait;
use contralens_core::{ContractDetail, ContractSummary};
use tracing::info;

use crate::source::{
    CONTRACT_DETAILS_PATH, CONTRACT_LIST_PATH, ContractSource, SyncError, lookup_detail,
    parse_contract_list,
};

/// Fetches `contract.json` and `contract-details.json` over HTTP.
pub struct HttpFixtures {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFixtures {
    /// Create a client for the given static host.
    ///
    /// `base_url` should be like `http://localhost:3000`; a trailing slash is
    /// dropped.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a document and return its body. Any non-2xx status is an error.
    async fn get(&self, path: &str) -> Result<String, SyncError> {
        let url = format!("{}/{}", self.base_url, path);
        info!(url = %url, "fetching fixture");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl ContractSource for HttpFixtures {
    async fn fetch_contracts(&self) -> Result<Vec<ContractSummary>, SyncError> {
        let contracts = parse_contract_list(&self.get(CONTRACT_LIST_PATH).await?)?;
        info!(count = contracts.len(), "fetched contract list");
        Ok(contracts)
    }

    async fn fetch_detail(&self, id: &str) -> Result<ContractDetail, SyncError> {
        lookup_detail(&self.get(CONTRACT_DETAILS_PATH).await?, id)
    }
}
