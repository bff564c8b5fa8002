//! Supplementary income taxation.
//!
//! Each supplementary income entry is taxed on its own at a flat rate and
//! never enters the progressive calculation of the main salary. Salary-like
//! income is a known approximation: it is estimated at a flat 10% rather than
//! merged with the main salary into the brackets.

use rust_decimal::Decimal;

use crate::models::{AdditionalIncome, AdditionalIncomeCategory, AdditionalIncomeDetail, AuditStep};

/// Freelance payments at or above this amount are subject to withholding.
pub const FREELANCE_WITHHOLDING_THRESHOLD: Decimal = Decimal::from_parts(2_000_000, 0, 0, false, 0);

/// Withholding rate on freelance payments at or above the threshold.
pub const FREELANCE_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Flat rate on investment income.
pub const INVESTMENT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Flat estimate applied to salary-like supplementary income.
pub const SALARY_LIKE_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Returns the tax on one entry and a description of the rule applied.
pub fn additional_income_tax(item: &AdditionalIncome) -> (Decimal, &'static str) {
    match item.category {
        AdditionalIncomeCategory::Freelance => {
            if item.amount >= FREELANCE_WITHHOLDING_THRESHOLD {
                (item.amount * FREELANCE_RATE, "Freelance (10% withholding)")
            } else {
                (Decimal::ZERO, "Freelance (below withholding threshold)")
            }
        }
        AdditionalIncomeCategory::Investment => {
            (item.amount * INVESTMENT_RATE, "Investment (5%)")
        }
        AdditionalIncomeCategory::SalaryLike => {
            (item.amount * SALARY_LIKE_RATE, "Salary-like (estimated 10%)")
        }
        AdditionalIncomeCategory::NonTaxable => (Decimal::ZERO, "Tax exempt"),
    }
}

/// Evaluates every supplementary income entry, preserving request order.
///
/// # Examples
///
/// ```
/// use pit_engine::calculation::evaluate_additional_income;
/// use pit_engine::models::{AdditionalIncome, AdditionalIncomeCategory};
/// use rust_decimal::Decimal;
///
/// let items = vec![AdditionalIncome::new(
///     "Consulting",
///     Decimal::from(3_000_000),
///     AdditionalIncomeCategory::Freelance,
/// )];
///
/// let details = evaluate_additional_income(&items);
/// assert_eq!(details[0].tax, Decimal::from(300_000));
/// assert_eq!(details[0].net, Decimal::from(2_700_000));
/// ```
pub fn evaluate_additional_income(items: &[AdditionalIncome]) -> Vec<AdditionalIncomeDetail> {
    items
        .iter()
        .map(|item| {
            let (tax, description) = additional_income_tax(item);
            AdditionalIncomeDetail {
                label: item.label.clone(),
                amount: item.amount,
                category: item.category,
                description: description.to_string(),
                tax,
                net: item.amount - tax,
            }
        })
        .collect()
}

/// Builds the audit step summarizing supplementary income.
pub(crate) fn additional_income_audit_step(
    details: &[AdditionalIncomeDetail],
    step_number: u32,
) -> AuditStep {
    let tax: Decimal = details.iter().map(|d| d.tax).sum();
    let net: Decimal = details.iter().map(|d| d.net).sum();
    let lines: Vec<String> = details
        .iter()
        .map(|d| format!("{}: {} → tax {}", d.label, d.description, d.tax.normalize()))
        .collect();

    AuditStep {
        step_number,
        rule_id: "additional_income".to_string(),
        rule_name: "Supplementary Income".to_string(),
        input: serde_json::json!({
            "items": details.len()
        }),
        output: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "net": net.normalize().to_string()
        }),
        reasoning: lines.join("; "),
    }
}
