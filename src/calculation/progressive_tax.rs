//! Progressive (marginal) tax calculation.
//!
//! Each bracket taxes only the slice of income between the previous bracket's
//! ceiling and its own. Every configured bracket produces a detail row, so a
//! bracket the income never reaches shows up with a zero slice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{BracketCeiling, TaxBracket};
use crate::models::{AuditStep, BracketDetail};

/// Total progressive tax and its per-bracket breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveTax {
    /// Sum of the tax owed in every bracket.
    pub total: Decimal,
    /// One row per bracket, in bracket order.
    pub details: Vec<BracketDetail>,
}

impl ProgressiveTax {
    /// Builds the audit step describing this calculation.
    pub fn audit_step(&self, taxable_income: Decimal, step_number: u32) -> AuditStep {
        let applied: Vec<String> = self
            .details
            .iter()
            .filter(|d| d.taxed_amount > Decimal::ZERO)
            .map(|d| {
                format!(
                    "{} × {}% = {}",
                    d.taxed_amount.normalize(),
                    (d.rate * Decimal::ONE_HUNDRED).normalize(),
                    d.tax_amount.normalize()
                )
            })
            .collect();

        let reasoning = if applied.is_empty() {
            "No taxable income, no tax owed".to_string()
        } else {
            format!("{} → {}", applied.join(" + "), self.total.normalize())
        };

        AuditStep {
            step_number,
            rule_id: "progressive_tax".to_string(),
            rule_name: "Progressive Income Tax".to_string(),
            input: serde_json::json!({
                "taxable_income": taxable_income.normalize().to_string(),
                "brackets": self.details.len()
            }),
            output: serde_json::json!({
                "tax": self.total.normalize().to_string(),
                "brackets_reached": applied.len()
            }),
            reasoning,
        }
    }
}

/// Calculates progressive tax on `taxable_income` over ascending `brackets`.
///
/// An empty bracket list yields zero tax and no detail rows.
///
/// # Examples
///
/// ```
/// use pit_engine::calculation::calculate_progressive_tax;
/// use pit_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     TaxBracket::bounded(Decimal::from(5_000_000), Decimal::new(5, 2)),
///     TaxBracket::bounded(Decimal::from(10_000_000), Decimal::new(10, 2)),
///     TaxBracket::unbounded(Decimal::new(15, 2)),
/// ];
///
/// let tax = calculate_progressive_tax(Decimal::from(12_000_000), &brackets);
/// assert_eq!(tax.total, Decimal::from(1_050_000));
/// assert_eq!(tax.details.len(), 3);
/// ```
pub fn calculate_progressive_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> ProgressiveTax {
    let mut total = Decimal::ZERO;
    let mut details = Vec::with_capacity(brackets.len());
    let mut previous_ceiling = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        let slice_top = match bracket.ceiling {
            BracketCeiling::Bounded(ceiling) => taxable_income.min(ceiling),
            BracketCeiling::Unbounded => taxable_income,
        };
        let taxed_amount = (slice_top - previous_ceiling).max(Decimal::ZERO);
        let tax_amount = taxed_amount * bracket.rate;
        total += tax_amount;

        details.push(BracketDetail {
            level: index as u32 + 1,
            rate: bracket.rate,
            lower_bound: previous_ceiling,
            upper_bound: bracket.ceiling,
            taxed_amount,
            tax_amount,
        });

        if let BracketCeiling::Bounded(ceiling) = bracket.ceiling {
            previous_ceiling = ceiling;
        }
    }

    ProgressiveTax { total, details }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn three_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::bounded(dec("5000000"), dec("0.05")),
            TaxBracket::bounded(dec("10000000"), dec("0.10")),
            TaxBracket::unbounded(dec("0.15")),
        ]
    }

    #[test]
    fn test_income_spanning_three_brackets() {
        let result = calculate_progressive_tax(dec("12000000"), &three_brackets());

        assert_eq!(result.total, dec("1050000"));
        assert_eq!(result.details[0].taxed_amount, dec("5000000"));
        assert_eq!(result.details[0].tax_amount, dec("250000"));
        assert_eq!(result.details[1].taxed_amount, dec("5000000"));
        assert_eq!(result.details[1].tax_amount, dec("500000"));
        assert_eq!(result.details[2].taxed_amount, dec("2000000"));
        assert_eq!(result.details[2].tax_amount, dec("300000"));
    }

    #[test]
    fn test_unreached_brackets_still_have_rows() {
        let result = calculate_progressive_tax(dec("3000000"), &three_brackets());

        assert_eq!(result.details.len(), 3);
        assert_eq!(result.total, dec("150000"));
        assert_eq!(result.details[1].taxed_amount, Decimal::ZERO);
        assert_eq!(result.details[2].taxed_amount, Decimal::ZERO);
        assert_eq!(result.details[2].tax_amount, Decimal::ZERO);
    }

    #[test]
    fn test_bounds_reported_per_row() {
        let result = calculate_progressive_tax(dec("12000000"), &three_brackets());

        assert_eq!(result.details[0].level, 1);
        assert_eq!(result.details[0].lower_bound, Decimal::ZERO);
        assert_eq!(
            result.details[0].upper_bound,
            BracketCeiling::Bounded(dec("5000000"))
        );
        assert_eq!(result.details[2].level, 3);
        assert_eq!(result.details[2].lower_bound, dec("10000000"));
        assert_eq!(result.details[2].upper_bound, BracketCeiling::Unbounded);
    }

    #[test]
    fn test_income_exactly_at_ceiling() {
        let result = calculate_progressive_tax(dec("5000000"), &three_brackets());

        assert_eq!(result.total, dec("250000"));
        assert_eq!(result.details[1].taxed_amount, Decimal::ZERO);
    }

    #[test]
    fn test_zero_income() {
        let result = calculate_progressive_tax(Decimal::ZERO, &three_brackets());

        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.details.len(), 3);
        assert!(result.details.iter().all(|d| d.taxed_amount.is_zero()));
    }

    #[test]
    fn test_empty_brackets_yield_zero_tax() {
        let result = calculate_progressive_tax(dec("50000000"), &[]);

        assert_eq!(result.total, Decimal::ZERO);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_2025_top_bracket() {
        let config = presets::current_2025();
        let result = calculate_progressive_tax(dec("100000000"), &config.brackets);

        // 250k + 500k + 1.2M + 2.8M + 5M + 8.4M + 20M × 35%
        assert_eq!(result.total, dec("25150000"));
        assert_eq!(result.details[6].taxed_amount, dec("20000000"));
    }

    #[test]
    fn test_slices_sum_to_taxable_income() {
        let config = presets::proposed_2026();
        let taxable = dec("73456789");
        let result = calculate_progressive_tax(taxable, &config.brackets);

        let sum: Decimal = result.details.iter().map(|d| d.taxed_amount).sum();
        assert_eq!(sum, taxable);
    }

    #[test]
    fn test_audit_step_reasoning() {
        let result = calculate_progressive_tax(dec("12000000"), &three_brackets());
        let step = result.audit_step(dec("12000000"), 3);

        assert_eq!(step.rule_id, "progressive_tax");
        assert_eq!(step.output["tax"].as_str().unwrap(), "1050000");
        assert_eq!(step.output["brackets_reached"].as_u64().unwrap(), 3);
        assert!(step.reasoning.contains("2000000 × 15% = 300000"));
    }

    #[test]
    fn test_audit_step_for_zero_income() {
        let result = calculate_progressive_tax(Decimal::ZERO, &three_brackets());
        let step = result.audit_step(Decimal::ZERO, 3);
        assert!(step.reasoning.contains("No taxable income"));
    }
}
