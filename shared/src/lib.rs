//! Shared types for the FinGestor client
//!
//! Wire DTOs exchanged with the FinGestor backend, plus the presentation
//! helpers (document validation, display formatting) used by every view.

pub mod client;
pub mod document;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{NewUser, RecordId, TokenResponse, UserProfile, UserRole};
pub use document::{DocumentError, DocumentKind};
