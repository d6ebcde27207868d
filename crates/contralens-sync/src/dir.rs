//! Fixture documents read from a local directory.

use std::path::PathBuf;

use async_trait::async_trait;
use contralens_core::{ContractDetail, ContractSummary};
use tracing::info;

use crate::source::{
    CONTRACT_DETAILS_PATH, CONTRACT_LIST_PATH, ContractSource, SyncError, lookup_detail,
    parse_contract_list,
};

/// Serves `contract.json` and `contract-details.json` from a directory.
pub struct DirFixtures {
    root: PathBuf,
}

impl DirFixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read(&self, name: &str) -> Result<String, SyncError> {
        let path = self.root.join(name);
        info!(path = %path.display(), "reading fixture");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SyncError::Io { path, source })
    }
}

#[async_trait]
impl ContractSource for DirFixtures {
    async fn fetch_contracts(&self) -> Result<Vec<ContractSummary>, SyncError> {
        let contracts = parse_contract_list(&self.read(CONTRACT_LIST_PATH).await?)?;
        info!(count = contracts.len(), "read contract list");
        Ok(contracts)
    }

    async fn fetch_detail(&self, id: &str) -> Result<ContractDetail, SyncError> {
        lookup_detail(&self.read(CONTRACT_DETAILS_PATH).await?, id)
    }
}
