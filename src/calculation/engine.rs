//! Entry points that pick the conversion direction and compare regimes.

use serde::{Deserialize, Serialize};

use crate::config::{RegimeCatalog, RegimeId, TaxConfig};
use crate::models::{CalculationRequest, CalculationResult, IncomeType};

use super::gross_to_net::compute_from_gross;
use super::net_to_gross::compute_from_net;

/// Runs the conversion selected by `request.income_type`.
pub fn compute(request: &CalculationRequest, config: &TaxConfig) -> CalculationResult {
    match request.income_type {
        IncomeType::Gross => compute_from_gross(request, config),
        IncomeType::Net => compute_from_net(request, config),
    }
}

/// The result of one request under one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeOutcome {
    /// The regime applied.
    pub regime: RegimeId,
    /// Its human-readable name.
    pub name: String,
    /// The conversion result.
    pub result: CalculationResult,
}

/// Runs one request under every regime in the catalog, oldest first.
///
/// # Examples
///
/// ```
/// use pit_engine::calculation::compare_regimes;
/// use pit_engine::config::{RegimeCatalog, Region};
/// use pit_engine::models::CalculationRequest;
/// use rust_decimal::Decimal;
///
/// let request = CalculationRequest::gross(Decimal::from(20_000_000), Region::I);
/// let outcomes = compare_regimes(&request, &RegimeCatalog::builtin());
///
/// assert_eq!(outcomes.len(), 2);
/// assert!(outcomes[1].result.net > outcomes[0].result.net);
/// ```
pub fn compare_regimes(
    request: &CalculationRequest,
    catalog: &RegimeCatalog,
) -> Vec<RegimeOutcome> {
    catalog
        .iter()
        .map(|config| RegimeOutcome {
            regime: config.id,
            name: config.name.clone(),
            result: compute(request, config),
        })
        .collect()
}
