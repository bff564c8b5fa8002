//! Request types for the PIT engine API.
//!
//! This module defines the JSON body accepted by `/calculate` and `/compare`:
//! a calculation request plus the regime to use and optional settings
//! overrides.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigEditor, RegimeCatalog, RegimeId, TaxConfig};
use crate::error::EngineResult;
use crate::models::CalculationRequest;

/// User edits applied to a regime before calculating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverride {
    /// Replacement base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Replacement personal deduction.
    #[serde(default)]
    pub personal_deduction: Option<Decimal>,
    /// Replacement per-dependent deduction.
    #[serde(default)]
    pub dependent_deduction: Option<Decimal>,
}

impl SettingsOverride {
    /// Applies the overrides to a copy of `config`.
    pub fn apply(&self, config: &TaxConfig) -> EngineResult<TaxConfig> {
        let mut editor = ConfigEditor::new(config);
        if let Some(value) = self.base_salary {
            editor = editor.set_base_salary(value)?;
        }
        if let Some(value) = self.personal_deduction {
            editor = editor.set_personal_deduction(value)?;
        }
        if let Some(value) = self.dependent_deduction {
            editor = editor.set_dependent_deduction(value)?;
        }
        Ok(editor.finish())
    }
}

/// Request body for the `/calculate` and `/compare` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Regime identifier ("2025" or "2026"); defaults to 2026.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regime: Option<String>,
    /// Settings edits applied on top of the regime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsOverride>,
    /// The calculation itself.
    #[serde(flatten)]
    pub calculation: CalculationRequest,
}

impl CalculateRequest {
    /// Wraps a calculation request with the default regime and no overrides.
    pub fn new(calculation: CalculationRequest) -> Self {
        Self {
            regime: None,
            settings: None,
            calculation,
        }
    }

    /// Parses the requested regime identifier.
    pub fn regime_id(&self) -> EngineResult<RegimeId> {
        match &self.regime {
            Some(id) => RegimeId::from_str(id),
            None => Ok(RegimeId::DEFAULT),
        }
    }

    /// Looks up the requested regime and applies any settings overrides.
    pub fn resolve_config(&self, catalog: &RegimeCatalog) -> EngineResult<TaxConfig> {
        let config = catalog.get(self.regime_id()?)?;
        self.apply_settings(config)
    }

    /// Applies any settings overrides to every regime in the catalog.
    pub fn resolve_catalog(&self, catalog: &RegimeCatalog) -> EngineResult<RegimeCatalog> {
        let configs = catalog
            .iter()
            .map(|config| self.apply_settings(config))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(RegimeCatalog::from_configs(configs))
    }

    fn apply_settings(&self, config: &TaxConfig) -> EngineResult<TaxConfig> {
        match &self.settings {
            Some(settings) => settings.apply(config),
            None => Ok(config.clone()),
        }
    }
}
