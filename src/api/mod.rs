//! HTTP API module for the PIT engine.
//!
//! This module exposes the engine over REST: a single conversion, a
//! side-by-side comparison of every regime, and the list of regimes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateRequest, SettingsOverride};
pub use response::{ApiError, ApiErrorResponse, CompareResponse, RegimeListResponse};
pub use state::AppState;
