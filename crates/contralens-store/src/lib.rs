//! Durable key/value storage and the mock session manager.

mod error;
pub use error::StoreError;

pub mod kv;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

pub mod session;
pub use session::{
    AUTH_TOKEN_KEY, AUTH_USERNAME_KEY, LOGIN_REJECTED_MESSAGE, MOCK_PASSWORD, Session,
    SessionError, SessionManager, TokenIssuer,
};
