//! Gross to net conversion.
//!
//! Insurance is withheld first, then family and other deductions reduce the
//! remaining income to the taxable base, and the progressive brackets are
//! applied to that base. Supplementary income is taxed separately and only
//! contributes to the aggregate totals.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxConfig;
use crate::models::{AuditStep, CalculationRequest, CalculationResult};

use super::additional_income::{additional_income_audit_step, evaluate_additional_income};
use super::insurance::{calculate_insurance, insurance_breakdown};
use super::progressive_tax::calculate_progressive_tax;

/// Personal deduction + dependent deduction × dependents + other deductions.
pub fn total_deduction(request: &CalculationRequest, config: &TaxConfig) -> Decimal {
    config.deductions.personal
        + config.deductions.dependent * Decimal::from(request.dependent_count)
        + request.other_deductions
}

/// Net main salary for a candidate gross, without building a full result.
pub(crate) fn main_salary_net(
    gross: Decimal,
    request: &CalculationRequest,
    config: &TaxConfig,
) -> Decimal {
    let declared_base = request.insurance_base.declared_base(gross);
    let insurance = calculate_insurance(declared_base, request.region, config).total();
    let income_before_tax = gross - insurance;
    let taxable_income = (income_before_tax - total_deduction(request, config)).max(Decimal::ZERO);
    let tax = calculate_progressive_tax(taxable_income, &config.brackets).total;
    gross - insurance - tax
}

/// Converts a gross salary into net pay with a full breakdown.
///
/// `request.income` is read as the gross salary regardless of
/// `request.income_type`. A zero income yields an all-zero main salary result.
///
/// # Examples
///
/// ```
/// use pit_engine::calculation::compute_from_gross;
/// use pit_engine::config::{Region, presets};
/// use pit_engine::models::CalculationRequest;
/// use rust_decimal::Decimal;
///
/// let config = presets::proposed_2026();
/// let request = CalculationRequest::gross(Decimal::from(20_000_000), Region::I);
///
/// let result = compute_from_gross(&request, &config);
/// assert_eq!(result.taxable_income, Decimal::from(2_400_000));
/// assert_eq!(result.personal_income_tax, Decimal::from(120_000));
/// assert_eq!(result.net, Decimal::from(17_780_000));
/// ```
pub fn compute_from_gross(request: &CalculationRequest, config: &TaxConfig) -> CalculationResult {
    let gross = request.income;
    let mut audit_steps = Vec::new();

    let declared_base = request.insurance_base.declared_base(gross);
    let insurance = insurance_breakdown(declared_base, request.region, config);
    audit_steps.push(insurance.audit_step(declared_base, request.region, 1));
    let contributions = insurance.contributions;
    let total_insurance = contributions.total();

    let income_before_tax = gross - total_insurance;
    let total_deduction = total_deduction(request, config);
    let taxable_income = (income_before_tax - total_deduction).max(Decimal::ZERO);
    audit_steps.push(deduction_audit_step(
        request,
        config,
        income_before_tax,
        total_deduction,
        taxable_income,
        2,
    ));

    let tax = calculate_progressive_tax(taxable_income, &config.brackets);
    audit_steps.push(tax.audit_step(taxable_income, 3));

    let net = gross - total_insurance - tax.total;

    let additional_income = evaluate_additional_income(&request.additional_income);
    if !additional_income.is_empty() {
        audit_steps.push(additional_income_audit_step(&additional_income, 4));
    }
    let additional_tax: Decimal = additional_income.iter().map(|d| d.tax).sum();
    let additional_net: Decimal = additional_income.iter().map(|d| d.net).sum();

    debug!(
        regime = %config.id,
        gross = %gross,
        insurance = %total_insurance,
        taxable_income = %taxable_income,
        tax = %tax.total,
        net = %net,
        "Computed net from gross"
    );

    CalculationResult {
        gross,
        net,
        social_insurance: contributions.social,
        health_insurance: contributions.health,
        unemployment_insurance: contributions.unemployment,
        income_before_tax,
        total_deduction,
        taxable_income,
        personal_income_tax: tax.total,
        detail_tax: tax.details,
        additional_income,
        total_tax: tax.total + additional_tax,
        total_net: net + additional_net,
        audit_steps,
    }
}

fn deduction_audit_step(
    request: &CalculationRequest,
    config: &TaxConfig,
    income_before_tax: Decimal,
    total_deduction: Decimal,
    taxable_income: Decimal,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Family Circumstance Deductions".to_string(),
        input: serde_json::json!({
            "income_before_tax": income_before_tax.normalize().to_string(),
            "personal": config.deductions.personal.normalize().to_string(),
            "dependent": config.deductions.dependent.normalize().to_string(),
            "dependent_count": request.dependent_count,
            "other": request.other_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deduction": total_deduction.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "{} - ({} + {} × {} + {}) = {}, floored at zero: {}",
            income_before_tax.normalize(),
            config.deductions.personal.normalize(),
            config.deductions.dependent.normalize(),
            request.dependent_count,
            request.other_deductions.normalize(),
            (income_before_tax - total_deduction).normalize(),
            taxable_income.normalize()
        ),
    }
}
