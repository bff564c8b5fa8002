//! Settings editing for tax regimes.
//!
//! A settings surface lets a user adjust the base salary and the deduction
//! amounts before running a calculation. [`ConfigEditor`] exposes one named,
//! validated setter per editable field and works on its own copy, so the
//! configuration it was started from is left untouched.

use rust_decimal::Decimal;

use crate::error::EngineResult;

use super::presets;
use super::types::{RegimeId, TaxConfig, amount_in_range};

/// Edits a copy of a [`TaxConfig`].
///
/// # Example
///
/// ```
/// use pit_engine::config::{ConfigEditor, presets};
/// use rust_decimal::Decimal;
///
/// let base = presets::current_2025();
/// let edited = ConfigEditor::new(&base)
///     .set_personal_deduction(Decimal::from(15_500_000))?
///     .finish();
///
/// assert_eq!(edited.deductions.personal, Decimal::from(15_500_000));
/// assert_eq!(base.deductions.personal, Decimal::from(11_000_000));
/// # Ok::<(), pit_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigEditor {
    config: TaxConfig,
}

impl ConfigEditor {
    /// Starts editing a copy of `config`.
    pub fn new(config: &TaxConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Sets the base salary used for the social/health insurance cap.
    pub fn set_base_salary(mut self, value: Decimal) -> EngineResult<Self> {
        amount_in_range("base_salary", value)?;
        self.config.base_salary = value;
        Ok(self)
    }

    /// Sets the flat personal deduction.
    pub fn set_personal_deduction(mut self, value: Decimal) -> EngineResult<Self> {
        amount_in_range("deductions.personal", value)?;
        self.config.deductions.personal = value;
        Ok(self)
    }

    /// Sets the per-dependent deduction.
    pub fn set_dependent_deduction(mut self, value: Decimal) -> EngineResult<Self> {
        amount_in_range("deductions.dependent", value)?;
        self.config.deductions.dependent = value;
        Ok(self)
    }

    /// Discards all edits and restarts from a built-in preset.
    pub fn reset_to(self, id: RegimeId) -> Self {
        Self {
            config: presets::preset(id),
        }
    }

    /// Returns the configuration being edited.
    pub fn current(&self) -> &TaxConfig {
        &self.config
    }

    /// Finishes editing and returns the edited configuration.
    pub fn finish(self) -> TaxConfig {
        self.config
    }
}
