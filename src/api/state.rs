//! Application state for the PIT engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::RegimeCatalog;

/// Shared application state.
///
/// Holds the regime catalog. Regimes are read-only once loaded, so handlers
/// share them without locking.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RegimeCatalog>,
}

impl AppState {
    /// Creates a new application state with the given regime catalog.
    pub fn new(catalog: RegimeCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Returns a reference to the regime catalog.
    pub fn catalog(&self) -> &RegimeCatalog {
        &self.catalog
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RegimeCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // axum state must be Clone
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_default_state_uses_builtin_regimes() {
        let state = AppState::default();
        assert_eq!(state.catalog().len(), 2);
    }
}
