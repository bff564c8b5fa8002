//! Built-in regime presets.
//!
//! Both regimes share the insurance rates, the base salary and the regional
//! minimum wages; they differ in deductions and brackets.

use rust_decimal::Decimal;

use super::types::{
    Deductions, InsuranceRates, RegimeId, RegionalMinimumWage, TaxBracket, TaxConfig,
};

/// Base salary (lương cơ sở) in force since 1 July 2024.
pub const BASE_SALARY: Decimal = Decimal::from_parts(2_340_000, 0, 0, false, 0);

fn common_insurance() -> InsuranceRates {
    InsuranceRates {
        social: Decimal::new(8, 2),
        health: Decimal::new(15, 3),
        unemployment: Decimal::new(1, 2),
        social_cap_multiplier: Decimal::from(20),
        unemployment_cap_multiplier: Decimal::from(20),
    }
}

fn common_regional_minimum_wage() -> RegionalMinimumWage {
    RegionalMinimumWage {
        region_i: Decimal::from(4_960_000),
        region_ii: Decimal::from(4_410_000),
        region_iii: Decimal::from(3_860_000),
        region_iv: Decimal::from(3_250_000),
    }
}

fn bracket(ceiling: i64, percent: i64) -> TaxBracket {
    TaxBracket::bounded(Decimal::from(ceiling), Decimal::new(percent, 2))
}

/// The regime currently in force: seven brackets from 5% to 35%.
pub fn current_2025() -> TaxConfig {
    TaxConfig {
        id: RegimeId::Current2025,
        name: "Current regulations 2025".to_string(),
        base_salary: BASE_SALARY,
        regional_minimum_wage: common_regional_minimum_wage(),
        insurance: common_insurance(),
        deductions: Deductions {
            personal: Decimal::from(11_000_000),
            dependent: Decimal::from(4_400_000),
        },
        brackets: vec![
            bracket(5_000_000, 5),
            bracket(10_000_000, 10),
            bracket(18_000_000, 15),
            bracket(32_000_000, 20),
            bracket(52_000_000, 25),
            bracket(80_000_000, 30),
            TaxBracket::unbounded(Decimal::new(35, 2)),
        ],
    }
}

/// The proposed 2026 regime: five brackets (5/10/20/30/35%) and deductions
/// raised to 15.5M personal and 6.2M per dependent.
pub fn proposed_2026() -> TaxConfig {
    TaxConfig {
        id: RegimeId::Proposed2026,
        name: "Proposed regulations 2026".to_string(),
        base_salary: BASE_SALARY,
        regional_minimum_wage: common_regional_minimum_wage(),
        insurance: common_insurance(),
        deductions: Deductions {
            personal: Decimal::from(15_500_000),
            dependent: Decimal::from(6_200_000),
        },
        brackets: vec![
            bracket(10_000_000, 5),
            bracket(30_000_000, 10),
            bracket(60_000_000, 20),
            bracket(100_000_000, 30),
            TaxBracket::unbounded(Decimal::new(35, 2)),
        ],
    }
}

/// Returns the preset for a regime identifier.
pub fn preset(id: RegimeId) -> TaxConfig {
    match id {
        RegimeId::Current2025 => current_2025(),
        RegimeId::Proposed2026 => proposed_2026(),
    }
}
