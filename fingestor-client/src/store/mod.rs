//! Session persistence
//!
//! - `backend`: the [`Storage`] port and its memory/file implementations
//! - `session`: [`SessionStore`], the token + profile view over a backend

mod backend;
mod session;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use session::{
    ACCESS_TOKEN_KEY, ExpiryListener, SessionSnapshot, SessionStore, StoredSession, USER_KEY,
};
