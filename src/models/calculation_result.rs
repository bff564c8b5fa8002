//! Calculation result models for the PIT engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures: insurance contributions, the per-bracket tax breakdown, the
//! treatment of each supplementary income entry and the audit steps that
//! explain how every figure was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BracketCeiling;

use super::AdditionalIncomeCategory;

/// Employee insurance contributions.
///
/// # Example
///
/// ```
/// use pit_engine::models::InsuranceContributions;
/// use rust_decimal::Decimal;
///
/// let contributions = InsuranceContributions {
///     social: Decimal::from(1_600_000),
///     health: Decimal::from(300_000),
///     unemployment: Decimal::from(200_000),
/// };
/// assert_eq!(contributions.total(), Decimal::from(2_100_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceContributions {
    /// Social insurance (BHXH).
    pub social: Decimal,
    /// Health insurance (BHYT).
    pub health: Decimal,
    /// Unemployment insurance (BHTN).
    pub unemployment: Decimal,
}

impl InsuranceContributions {
    /// Sum of the three contributions.
    pub fn total(&self) -> Decimal {
        self.social + self.health + self.unemployment
    }
}

/// Tax owed within one progressive bracket.
///
/// One row exists per configured bracket, including brackets the income
/// never reaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDetail {
    /// 1-based bracket number.
    pub level: u32,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// Ceiling of the previous bracket (zero for the first).
    pub lower_bound: Decimal,
    /// Ceiling of this bracket.
    pub upper_bound: BracketCeiling,
    /// Slice of taxable income falling in this bracket.
    pub taxed_amount: Decimal,
    /// Tax owed on that slice.
    pub tax_amount: Decimal,
}

/// How one supplementary income entry was taxed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalIncomeDetail {
    /// Label from the request.
    pub label: String,
    /// Amount received.
    pub amount: Decimal,
    /// Category from the request.
    pub category: AdditionalIncomeCategory,
    /// Description of the rule that was applied.
    pub description: String,
    /// Tax owed on the entry.
    pub tax: Decimal,
    /// Amount left after tax.
    pub net: Decimal,
}

/// A single step in the calculation explaining one derived figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the rule applied (e.g. "progressive_tax").
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the step.
    pub reasoning: String,
}

/// The complete result of a gross/net conversion.
///
/// Every field is derived from the request and the regime; identical inputs
/// always produce an identical result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Gross salary.
    pub gross: Decimal,
    /// Net salary from the main salary only.
    pub net: Decimal,
    /// Social insurance contribution.
    pub social_insurance: Decimal,
    /// Health insurance contribution.
    pub health_insurance: Decimal,
    /// Unemployment insurance contribution.
    pub unemployment_insurance: Decimal,
    /// Gross minus total insurance.
    pub income_before_tax: Decimal,
    /// Personal + dependent + other deductions.
    pub total_deduction: Decimal,
    /// Income before tax minus total deduction, floored at zero.
    pub taxable_income: Decimal,
    /// Progressive tax on the main salary.
    pub personal_income_tax: Decimal,
    /// One row per configured bracket.
    pub detail_tax: Vec<BracketDetail>,
    /// Treatment of each supplementary income entry, in request order.
    pub additional_income: Vec<AdditionalIncomeDetail>,
    /// Main salary tax plus tax on all supplementary income.
    pub total_tax: Decimal,
    /// Main salary net plus net of all supplementary income.
    pub total_net: Decimal,
    /// Ordered explanation of the calculation.
    pub audit_steps: Vec<AuditStep>,
}

impl CalculationResult {
    /// Returns the insurance contributions as one value.
    pub fn insurance(&self) -> InsuranceContributions {
        InsuranceContributions {
            social: self.social_insurance,
            health: self.health_insurance,
            unemployment: self.unemployment_insurance,
        }
    }

    /// Total insurance withheld from the main salary.
    pub fn total_insurance(&self) -> Decimal {
        self.insurance().total()
    }
}
