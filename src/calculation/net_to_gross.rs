//! Net to gross conversion.
//!
//! Net pay is a non-decreasing, piecewise-linear function of gross pay, so the
//! gross salary for a target net is found by bisection over
//! `[target, 2 × target]`. The search stops as soon as the candidate's net is
//! within the tolerance of the target, or after the iteration cap. The final
//! candidate is then run through [`compute_from_gross`] to produce the result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::TaxConfig;
use crate::models::{AuditStep, CalculationRequest, CalculationResult, IncomeType};

use super::gross_to_net::{compute_from_gross, main_salary_net};

/// Default iteration cap for the bisection.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Default tolerance between achieved and target net.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Bounds on the net-to-gross search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InversionSettings {
    /// Maximum number of bisection steps.
    pub max_iterations: u32,
    /// The search stops once `|net - target| < tolerance`.
    pub tolerance: Decimal,
}

impl Default for InversionSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// The outcome of the bisection alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossSolution {
    /// The gross salary found.
    pub gross: Decimal,
    /// Net pay that gross salary produces.
    pub achieved_net: Decimal,
    /// Number of bisection steps taken.
    pub iterations: u32,
    /// Whether the achieved net is within tolerance of the target.
    pub converged: bool,
}

/// A net-to-gross result together with how the search went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetInversion {
    /// The full breakdown for the gross salary found.
    pub result: CalculationResult,
    /// The search outcome.
    pub solution: GrossSolution,
}

/// Finds the gross salary whose net main salary matches `request.income`.
///
/// Only the main salary takes part; supplementary income does not move the
/// target.
pub fn solve_gross_for_net(
    request: &CalculationRequest,
    config: &TaxConfig,
    settings: &InversionSettings,
) -> GrossSolution {
    let target = request.income;
    let two = Decimal::TWO;
    let mut lower = target;
    let mut upper = target * two;
    let mut gross = target;
    let mut achieved_net = main_salary_net(gross, request, config);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < settings.max_iterations {
        iterations += 1;
        gross = (lower + upper) / two;
        achieved_net = main_salary_net(gross, request, config);

        if (achieved_net - target).abs() < settings.tolerance {
            converged = true;
            break;
        }
        if achieved_net < target {
            lower = gross;
        } else {
            upper = gross;
        }
    }

    GrossSolution {
        gross,
        achieved_net,
        iterations,
        converged,
    }
}

/// Converts a target net salary into the gross salary and full breakdown,
/// reporting whether the search converged.
///
/// Non-convergence is logged and reported through
/// [`GrossSolution::converged`]; the last candidate is still used.
pub fn compute_from_net_with(
    request: &CalculationRequest,
    config: &TaxConfig,
    settings: &InversionSettings,
) -> NetInversion {
    let solution = solve_gross_for_net(request, config, settings);

    if !solution.converged {
        warn!(
            regime = %config.id,
            target_net = %request.income,
            achieved_net = %solution.achieved_net,
            iterations = solution.iterations,
            "Net to gross search did not reach tolerance"
        );
    }

    let gross_request = CalculationRequest {
        income: solution.gross,
        income_type: IncomeType::Gross,
        ..request.clone()
    };
    let mut result = compute_from_gross(&gross_request, config);
    let step_number = result.audit_steps.len() as u32 + 1;
    result
        .audit_steps
        .push(inversion_audit_step(request.income, &solution, settings, step_number));

    NetInversion { result, solution }
}

/// Converts a target net salary into the gross salary and full breakdown
/// using the default search bounds (50 iterations, tolerance 1,000).
///
/// The tolerance applies to net pay. Net rises by only 0.58 to 0.9 per unit of
/// gross, so the gross found can sit up to `tolerance / slope` (about 1,700
/// with the defaults) away from the exact answer. Use
/// [`compute_from_net_with`] and a smaller tolerance when gross must be
/// closer.
///
/// Amounts are expected to lie within [`MAX_AMOUNT`](crate::config::MAX_AMOUNT);
/// [`CalculationRequest::validate`] enforces that.
///
/// # Examples
///
/// ```
/// use pit_engine::calculation::compute_from_net;
/// use pit_engine::config::{Region, presets};
/// use pit_engine::models::CalculationRequest;
/// use rust_decimal::Decimal;
///
/// let config = presets::proposed_2026();
/// let request = CalculationRequest::net(Decimal::from(17_780_000), Region::I);
///
/// let result = compute_from_net(&request, &config);
/// assert!((result.net - Decimal::from(17_780_000)).abs() < Decimal::from(1_000));
/// ```
pub fn compute_from_net(request: &CalculationRequest, config: &TaxConfig) -> CalculationResult {
    compute_from_net_with(request, config, &InversionSettings::default()).result
}

fn inversion_audit_step(
    target: Decimal,
    solution: &GrossSolution,
    settings: &InversionSettings,
    step_number: u32,
) -> AuditStep {
    let reasoning = if solution.converged {
        format!(
            "Gross {} yields net {} within {} of target {} after {} iterations",
            solution.gross.round_dp(0),
            solution.achieved_net.round_dp(0),
            settings.tolerance.normalize(),
            target.normalize(),
            solution.iterations
        )
    } else {
        format!(
            "Stopped after {} iterations short of tolerance {}; using gross {} (net {})",
            solution.iterations,
            settings.tolerance.normalize(),
            solution.gross.round_dp(0),
            solution.achieved_net.round_dp(0)
        )
    };

    AuditStep {
        step_number,
        rule_id: "net_inversion".to_string(),
        rule_name: "Net to Gross Search".to_string(),
        input: serde_json::json!({
            "target_net": target.normalize().to_string(),
            "max_iterations": settings.max_iterations,
            "tolerance": settings.tolerance.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross": solution.gross.normalize().to_string(),
            "achieved_net": solution.achieved_net.normalize().to_string(),
            "iterations": solution.iterations,
            "converged": solution.converged
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_from_gross;
    use crate::config::{MAX_AMOUNT, Region, presets};
    use crate::models::{AdditionalIncome, AdditionalIncomeCategory, InsuranceBase};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_recovers_gross_for_known_net() {
        let config = presets::proposed_2026();
        let request = CalculationRequest::net(dec("17780000"), Region::I);
        let inversion = compute_from_net_with(&request, &config, &InversionSettings::default());

        assert!(inversion.solution.converged);
        assert!((inversion.result.net - dec("17780000")).abs() < DEFAULT_TOLERANCE);
        // Slope of net in gross is at least 0.85 around 20M, so gross is within ~1,200
        assert!((inversion.result.gross - dec("20000000")).abs() < dec("1200"));
    }

    #[test]
    fn test_tight_tolerance_recovers_gross_closely() {
        let config = presets::current_2025();
        let gross = dec("55000000");
        let forward = compute_from_gross(&CalculationRequest::gross(gross, Region::I), &config);

        let settings = InversionSettings {
            max_iterations: 200,
            tolerance: dec("0.01"),
        };
        let request = CalculationRequest::net(forward.net, Region::I);
        let inversion = compute_from_net_with(&request, &config, &settings);

        assert!(inversion.solution.converged);
        assert!((inversion.result.gross - gross).abs() < dec("1"));
    }

    #[test]
    fn test_result_is_a_gross_calculation() {
        let config = presets::proposed_2026();
        let request = CalculationRequest::net(dec("30000000"), Region::II).with_dependents(1);
        let result = compute_from_net(&request, &config);

        let replay = compute_from_gross(
            &CalculationRequest {
                income: result.gross,
                income_type: IncomeType::Gross,
                ..request.clone()
            },
            &config,
        );
        assert_eq!(result.net, replay.net);
        assert_eq!(result.personal_income_tax, replay.personal_income_tax);
    }

    #[test]
    fn test_zero_target_converges_immediately() {
        let config = presets::proposed_2026();
        let request = CalculationRequest::net(Decimal::ZERO, Region::I);
        let inversion = compute_from_net_with(&request, &config, &InversionSettings::default());

        assert!(inversion.solution.converged);
        assert_eq!(inversion.solution.iterations, 1);
        assert_eq!(inversion.result.gross, Decimal::ZERO);
    }

    #[test]
    fn test_non_convergence_is_reported() {
        let config = presets::current_2025();
        let request = CalculationRequest::net(dec("80000000"), Region::I);
        let settings = InversionSettings {
            max_iterations: 3,
            tolerance: dec("1"),
        };
        let inversion = compute_from_net_with(&request, &config, &settings);

        assert!(!inversion.solution.converged);
        assert_eq!(inversion.solution.iterations, 3);
        // The last midpoint is used as-is
        assert_eq!(inversion.result.gross, inversion.solution.gross);

        let step = inversion.result.audit_steps.last().unwrap();
        assert_eq!(step.rule_id, "net_inversion");
        assert!(!step.output["converged"].as_bool().unwrap());
    }

    #[test]
    fn test_zero_iterations_uses_target_as_gross() {
        let config = presets::current_2025();
        let request = CalculationRequest::net(dec("10000000"), Region::I);
        let settings = InversionSettings {
            max_iterations: 0,
            tolerance: DEFAULT_TOLERANCE,
        };
        let solution = solve_gross_for_net(&request, &config, &settings);

        assert_eq!(solution.iterations, 0);
        assert_eq!(solution.gross, dec("10000000"));
        assert!(!solution.converged);
    }

    #[test]
    fn test_custom_insurance_base_is_respected() {
        let config = presets::proposed_2026();
        let request = CalculationRequest::net(dec("25000000"), Region::I).with_insurance_base(
            InsuranceBase::Custom {
                amount: dec("5000000"),
            },
        );
        let result = compute_from_net(&request, &config);

        assert_eq!(result.social_insurance, dec("400000"));
        assert!((result.net - dec("25000000")).abs() < DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_additional_income_does_not_move_target() {
        let config = presets::proposed_2026();
        let request = CalculationRequest::net(dec("20000000"), Region::I).with_additional_income(
            AdditionalIncome::new("Shares", dec("10000000"), AdditionalIncomeCategory::Investment),
        );
        let result = compute_from_net(&request, &config);

        assert!((result.net - dec("20000000")).abs() < DEFAULT_TOLERANCE);
        assert_eq!(result.total_net, result.net + dec("9500000"));
    }

    #[test]
    fn test_inversion_step_appended_last() {
        let config = presets::proposed_2026();
        let request = CalculationRequest::net(dec("17780000"), Region::I);
        let result = compute_from_net(&request, &config);

        let last = result.audit_steps.last().unwrap();
        assert_eq!(last.rule_id, "net_inversion");
        assert_eq!(last.step_number, result.audit_steps.len() as u32);
        assert!(last.output["converged"].as_bool().unwrap());
    }

    #[test]
    fn test_default_settings() {
        let settings = InversionSettings::default();
        assert_eq!(settings.max_iterations, 50);
        assert_eq!(settings.tolerance, dec("1000"));
    }

    #[test]
    fn test_target_at_amount_limit_completes() {
        let config = presets::proposed_2026();
        let request = CalculationRequest::net(MAX_AMOUNT, Region::I)
            .with_dependents(u32::MAX)
            .with_other_deductions(MAX_AMOUNT);
        assert!(request.validate().is_ok());

        let inversion = compute_from_net_with(&request, &config, &InversionSettings::default());

        assert!(inversion.result.gross >= MAX_AMOUNT);
        assert!(inversion.result.gross <= MAX_AMOUNT * Decimal::TWO);
        assert_eq!(inversion.result.personal_income_tax, Decimal::ZERO);
    }

    #[test]
    fn test_default_gross_error_stays_within_slope_bound() {
        // Net gains at least 0.58 per unit of gross
        let bound = DEFAULT_TOLERANCE / dec("0.58");
        for config in [presets::current_2025(), presets::proposed_2026()] {
            for region in Region::ALL {
                for gross in ["1000000", "20000000", "103725093", "250000000"] {
                    let gross = dec(gross);
                    let forward =
                        compute_from_gross(&CalculationRequest::gross(gross, region), &config);
                    let inversion = compute_from_net_with(
                        &CalculationRequest::net(forward.net, region),
                        &config,
                        &InversionSettings::default(),
                    );

                    assert!(inversion.solution.converged);
                    assert!(
                        (inversion.result.gross - gross).abs() < bound,
                        "gross {} recovered as {}",
                        gross,
                        inversion.result.gross
                    );
                }
            }
        }
    }
}
