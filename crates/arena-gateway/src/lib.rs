//! HTTP gateway for Arena.
//!
//! - `POST /api/compare`: validate `{prompt, models}` and fan out
//! - `GET /api/health`: version, live providers, supported model ids
//! - `GET /api/models`: catalog tiles for the UI

pub mod error;
pub mod health;
pub mod routes;

pub use error::ApiError;
pub use routes::{router, AppState};
