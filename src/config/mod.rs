//! Tax regime configuration.
//!
//! This module holds the regime data model, the two built-in presets, the
//! YAML loader and the settings editor.
//!
//! # Example
//!
//! ```no_run
//! use pit_engine::config::{RegimeId, RegimeLoader};
//!
//! let catalog = RegimeLoader::load("./config/regimes").unwrap();
//! println!("Loaded regime: {}", catalog.get(RegimeId::DEFAULT).unwrap().name);
//! ```

mod editor;
mod loader;
pub mod presets;
mod types;

pub use editor::ConfigEditor;
pub use loader::{RegimeCatalog, RegimeLoader};
pub use types::{
    BracketCeiling, Deductions, InsuranceRates, MAX_AMOUNT, MAX_CAP_MULTIPLIER, Region, RegimeId,
    RegionalMinimumWage, TaxBracket, TaxConfig,
};
