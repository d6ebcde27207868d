//! Fixture documents, their error taxonomy, and the load/retry state that
//! callers render from.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use contralens_core::{ContractDetail, ContractSummary};
use thiserror::Error;
use tracing::{info, warn};

/// Path of the contract list document, relative to the fixture root.
pub const CONTRACT_LIST_PATH: &str = "contract.json";
/// Path of the `id → detail` document, relative to the fixture root.
pub const CONTRACT_DETAILS_PATH: &str = "contract-details.json";

pub const LIST_FAILED_MESSAGE: &str = "Failed to load contracts. Please try again.";
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load contract details";
pub const NOT_FOUND_MESSAGE: &str = "Contract not found";

#[derive(Error, Debug)]
pub enum SyncError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("contract {id} not found")]
    NotFound { id: String },
}

impl SyncError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message for a failed detail lookup.
    pub fn detail_message(&self) -> &'static str {
        if self.is_not_found() {
            NOT_FOUND_MESSAGE
        } else {
            DETAIL_FAILED_MESSAGE
        }
    }
}

/// Read-only source of the two fixture documents.
#[async_trait]
pub trait ContractSource: Send + Sync {
    async fn fetch_contracts(&self) -> Result<Vec<ContractSummary>, SyncError>;
    async fn fetch_detail(&self, id: &str) -> Result<ContractDetail, SyncError>;
}

#[async_trait]
impl<T: ContractSource + ?Sized> ContractSource for Box<T> {
    async fn fetch_contracts(&self) -> Result<Vec<ContractSummary>, SyncError> {
        (**self).fetch_contracts().await
    }

    async fn fetch_detail(&self, id: &str) -> Result<ContractDetail, SyncError> {
        (**self).fetch_detail(id).await
    }
}

pub(crate) fn parse_contract_list(text: &str) -> Result<Vec<ContractSummary>, SyncError> {
    Ok(serde_json::from_str(text)?)
}

/// Pick one record out of the detail document.
///
/// Only the requested entry is decoded, so a malformed neighbour does not
/// hide a well-formed record.
pub(crate) fn lookup_detail(text: &str, id: &str) -> Result<ContractDetail, SyncError> {
    let mut entries: HashMap<String, serde_json::Value> = serde_json::from_str(text)?;
    let entry = entries.remove(id).ok_or_else(|| SyncError::NotFound { id: id.to_string() })?;
    Ok(serde_json::from_value(entry)?)
}

/// What a view renders while and after fetching.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed { message: &'static str, error: String },
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// The contract list for one page visit.
///
/// Fetch errors become [`LoadState::Failed`] here and go no further. Nothing
/// retries on its own; [`retry`](Self::retry) repeats the same fetch.
pub struct ContractList<C> {
    source: C,
    state: LoadState<Vec<ContractSummary>>,
}

impl<C: ContractSource> ContractList<C> {
    pub fn new(source: C) -> Self {
        Self {
            source,
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> &LoadState<Vec<ContractSummary>> {
        &self.state
    }

    pub fn contracts(&self) -> Option<&[ContractSummary]> {
        self.state.ready().map(Vec::as_slice)
    }

    pub async fn load(&mut self) -> &LoadState<Vec<ContractSummary>> {
        self.state = LoadState::Loading;
        self.state = match self.source.fetch_contracts().await {
            Ok(contracts) => {
                info!(count = contracts.len(), "contract list ready");
                LoadState::Ready(contracts)
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch contracts");
                LoadState::Failed {
                    message: LIST_FAILED_MESSAGE,
                    error: e.to_string(),
                }
            }
        };
        &self.state
    }

    pub async fn retry(&mut self) -> &LoadState<Vec<ContractSummary>> {
        self.load().await
    }
}

/// Fetch one detail record and fold any error into a [`LoadState`].
pub async fn load_detail<C: ContractSource + ?Sized>(source: &C, id: &str) -> LoadState<ContractDetail> {
    match source.fetch_detail(id).await {
        Ok(detail) => LoadState::Ready(detail),
        Err(e) => {
            warn!(id, error = %e, "failed to fetch contract detail");
            LoadState::Failed {
                message: e.detail_message(),
                error: e.to_string(),
            }
        }
    }
}
