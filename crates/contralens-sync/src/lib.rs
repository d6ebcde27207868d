//! Fixture sources for the contract list and detail documents.

pub mod dir;
pub mod source;

#[cfg(feature = "http")]
pub mod http;

pub use dir::DirFixtures;
pub use source::{
    CONTRACT_DETAILS_PATH, CONTRACT_LIST_PATH, ContractList, ContractSource, DETAIL_FAILED_MESSAGE,
    LIST_FAILED_MESSAGE, LoadState, NOT_FOUND_MESSAGE, SyncError, load_detail,
};

#[cfg(feature = "http")]
pub use http::HttpFixtures;
