//! Insurance contribution calculation.
//!
//! Social and health insurance are charged on the declared base capped at
//! `base_salary × social_cap_multiplier`. Unemployment insurance is charged
//! on the declared base capped at `regional minimum wage × unemployment_cap_multiplier`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{Region, TaxConfig};
use crate::models::{AuditStep, InsuranceContributions};

/// Insurance contributions together with the caps and capped bases used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceBreakdown {
    /// The three contribution amounts.
    pub contributions: InsuranceContributions,
    /// Cap on the social/health base.
    pub social_health_cap: Decimal,
    /// Cap on the unemployment base for the region.
    pub unemployment_cap: Decimal,
    /// Base social and health contributions were charged on.
    pub social_health_base: Decimal,
    /// Base the unemployment contribution was charged on.
    pub unemployment_base: Decimal,
}

impl InsuranceBreakdown {
    /// Builds the audit step describing this calculation.
    pub fn audit_step(
        &self,
        declared_base: Decimal,
        region: Region,
        step_number: u32,
    ) -> AuditStep {
        let c = &self.contributions;
        AuditStep {
            step_number,
            rule_id: "insurance".to_string(),
            rule_name: "Compulsory Insurance".to_string(),
            input: serde_json::json!({
                "declared_base": declared_base.normalize().to_string(),
                "region": region,
                "social_health_cap": self.social_health_cap.normalize().to_string(),
                "unemployment_cap": self.unemployment_cap.normalize().to_string()
            }),
            output: serde_json::json!({
                "social": c.social.normalize().to_string(),
                "health": c.health.normalize().to_string(),
                "unemployment": c.unemployment.normalize().to_string(),
                "total": c.total().normalize().to_string()
            }),
            reasoning: format!(
                "Social/health charged on {} (cap {}), unemployment on {} (cap {}), total {}",
                self.social_health_base.normalize(),
                self.social_health_cap.normalize(),
                self.unemployment_base.normalize(),
                self.unemployment_cap.normalize(),
                c.total().normalize()
            ),
        }
    }
}

/// Calculates insurance contributions with the caps and bases used.
///
/// A zero or negative declared base yields zero contributions.
pub fn insurance_breakdown(
    declared_base: Decimal,
    region: Region,
    config: &TaxConfig,
) -> InsuranceBreakdown {
    let rates = &config.insurance;
    let social_health_cap = config.base_salary * rates.social_cap_multiplier;
    let unemployment_cap =
        config.regional_minimum_wage.for_region(region) * rates.unemployment_cap_multiplier;

    let base = declared_base.max(Decimal::ZERO);
    let social_health_base = base.min(social_health_cap);
    let unemployment_base = base.min(unemployment_cap);

    InsuranceBreakdown {
        contributions: InsuranceContributions {
            social: social_health_base * rates.social,
            health: social_health_base * rates.health,
            unemployment: unemployment_base * rates.unemployment,
        },
        social_health_cap,
        unemployment_cap,
        social_health_base,
        unemployment_base,
    }
}

/// Calculates the social, health and unemployment contributions for a
/// declared contribution base.
///
/// # Examples
///
/// ```
/// use pit_engine::calculation::calculate_insurance;
/// use pit_engine::config::{Region, presets};
/// use rust_decimal::Decimal;
///
/// let config = presets::proposed_2026();
/// let insurance = calculate_insurance(Decimal::from(20_000_000), Region::I, &config);
///
/// assert_eq!(insurance.social, Decimal::from(1_600_000));
/// assert_eq!(insurance.health, Decimal::from(300_000));
/// assert_eq!(insurance.unemployment, Decimal::from(200_000));
/// ```
pub fn calculate_insurance(
    declared_base: Decimal,
    region: Region,
    config: &TaxConfig,
) -> InsuranceContributions {
    insurance_breakdown(declared_base, region, config).contributions
}
