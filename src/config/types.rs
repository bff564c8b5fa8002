//! Configuration types for PIT regimes.
//!
//! A regime is one plain data structure. The built-in 2025 and 2026 regimes
//! are two values of [`TaxConfig`], selected by [`RegimeId`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monetary amount accepted anywhere (10^18).
///
/// Keeps every intermediate product inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_808_348_672, 232_830_643, 0, false, 0);

/// Largest insurance cap multiplier accepted.
pub const MAX_CAP_MULTIPLIER: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Identifies one of the supported tax-law regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegimeId {
    /// The regime currently in force (2025 rules).
    #[serde(rename = "2025")]
    Current2025,
    /// The proposed 2026 regime with five brackets and higher deductions.
    #[serde(rename = "2026")]
    Proposed2026,
}

impl RegimeId {
    /// The regime used when a caller does not pick one.
    pub const DEFAULT: RegimeId = RegimeId::Proposed2026;

    /// All known regimes, oldest first.
    pub const ALL: [RegimeId; 2] = [RegimeId::Current2025, RegimeId::Proposed2026];

    /// Returns the wire identifier ("2025" or "2026").
    pub fn as_str(&self) -> &'static str {
        match self {
            RegimeId::Current2025 => "2025",
            RegimeId::Proposed2026 => "2026",
        }
    }
}

impl fmt::Display for RegimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegimeId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2025" => Ok(RegimeId::Current2025),
            "2026" => Ok(RegimeId::Proposed2026),
            other => Err(EngineError::RegimeNotFound {
                id: other.to_string(),
            }),
        }
    }
}

/// One of the four ordinal minimum-wage regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Region I.
    #[serde(rename = "I")]
    I,
    /// Region II.
    #[serde(rename = "II")]
    II,
    /// Region III.
    #[serde(rename = "III")]
    III,
    /// Region IV.
    #[serde(rename = "IV")]
    IV,
}

impl Region {
    /// All regions in ordinal order.
    pub const ALL: [Region; 4] = [Region::I, Region::II, Region::III, Region::IV];
}

/// Regional minimum wage, one figure per region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalMinimumWage {
    /// Region I minimum wage.
    #[serde(rename = "I")]
    pub region_i: Decimal,
    /// Region II minimum wage.
    #[serde(rename = "II")]
    pub region_ii: Decimal,
    /// Region III minimum wage.
    #[serde(rename = "III")]
    pub region_iii: Decimal,
    /// Region IV minimum wage.
    #[serde(rename = "IV")]
    pub region_iv: Decimal,
}

impl RegionalMinimumWage {
    /// Returns the minimum wage for a region.
    pub fn for_region(&self, region: Region) -> Decimal {
        match region {
            Region::I => self.region_i,
            Region::II => self.region_ii,
            Region::III => self.region_iii,
            Region::IV => self.region_iv,
        }
    }
}

/// Employee-side insurance rates and the multipliers that cap their bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRates {
    /// Social insurance rate (e.g. 0.08).
    pub social: Decimal,
    /// Health insurance rate (e.g. 0.015).
    pub health: Decimal,
    /// Unemployment insurance rate (e.g. 0.01).
    pub unemployment: Decimal,
    /// Social/health base is capped at `base_salary` times this.
    pub social_cap_multiplier: Decimal,
    /// Unemployment base is capped at the regional minimum wage times this.
    pub unemployment_cap_multiplier: Decimal,
}

/// Family-circumstance deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Flat deduction for the taxpayer.
    pub personal: Decimal,
    /// Deduction per declared dependent.
    pub dependent: Decimal,
}

/// The upper bound of a tax bracket.
///
/// Serialized as a plain amount, or `null` for the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum BracketCeiling {
    /// The bracket ends at this amount (inclusive).
    Bounded(Decimal),
    /// The bracket has no upper bound.
    Unbounded,
}

impl BracketCeiling {
    /// Returns the bound, or `None` when unbounded.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            BracketCeiling::Bounded(amount) => Some(*amount),
            BracketCeiling::Unbounded => None,
        }
    }

    /// Returns true for the open-ended top bracket.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, BracketCeiling::Unbounded)
    }
}

impl From<Option<Decimal>> for BracketCeiling {
    fn from(value: Option<Decimal>) -> Self {
        match value {
            Some(amount) => BracketCeiling::Bounded(amount),
            None => BracketCeiling::Unbounded,
        }
    }
}

impl From<BracketCeiling> for Option<Decimal> {
    fn from(value: BracketCeiling) -> Self {
        value.amount()
    }
}

/// A single progressive tax bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of taxable income covered by this bracket.
    #[serde(default = "unbounded")]
    pub ceiling: BracketCeiling,
    /// Marginal rate for income inside this bracket.
    pub rate: Decimal,
}

fn unbounded() -> BracketCeiling {
    BracketCeiling::Unbounded
}

impl TaxBracket {
    /// Creates a bracket ending at `ceiling`.
    pub fn bounded(ceiling: Decimal, rate: Decimal) -> Self {
        Self {
            ceiling: BracketCeiling::Bounded(ceiling),
            rate,
        }
    }

    /// Creates the open-ended top bracket.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            ceiling: BracketCeiling::Unbounded,
            rate,
        }
    }
}

/// A complete tax-law regime.
///
/// The engine only ever reads a `TaxConfig`. Callers are expected to run
/// [`TaxConfig::validate`] before handing a hand-built or loaded configuration
/// to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Which regime this configuration describes.
    pub id: RegimeId,
    /// Human-readable regime name.
    pub name: String,
    /// Reference wage used to cap the social/health contribution base.
    pub base_salary: Decimal,
    /// Minimum wage per region, used to cap the unemployment contribution base.
    pub regional_minimum_wage: RegionalMinimumWage,
    /// Insurance rates and cap multipliers.
    pub insurance: InsuranceRates,
    /// Personal and dependent deductions.
    pub deductions: Deductions,
    /// Progressive brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}

impl TaxConfig {
    /// Checks the configuration against the invariants the engine relies on.
    ///
    /// Brackets must be non-empty with strictly increasing ceilings, and only
    /// the last bracket may (and must) be unbounded. Every rate must lie in
    /// `[0, 1]`, every amount must lie in `[0, MAX_AMOUNT]` and every cap
    /// multiplier in `[0, MAX_CAP_MULTIPLIER]`.
    pub fn validate(&self) -> EngineResult<()> {
        amount_in_range("base_salary", self.base_salary)?;
        for region in Region::ALL {
            amount_in_range(
                &format!("regional_minimum_wage.{:?}", region),
                self.regional_minimum_wage.for_region(region),
            )?;
        }

        rate_in_range("insurance.social", self.insurance.social)?;
        rate_in_range("insurance.health", self.insurance.health)?;
        rate_in_range("insurance.unemployment", self.insurance.unemployment)?;
        multiplier_in_range(
            "insurance.social_cap_multiplier",
            self.insurance.social_cap_multiplier,
        )?;
        multiplier_in_range(
            "insurance.unemployment_cap_multiplier",
            self.insurance.unemployment_cap_multiplier,
        )?;

        amount_in_range("deductions.personal", self.deductions.personal)?;
        amount_in_range("deductions.dependent", self.deductions.dependent)?;

        if self.brackets.is_empty() {
            return Err(invalid("brackets", "at least one bracket is required"));
        }

        let last = self.brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (index, bracket) in self.brackets.iter().enumerate() {
            let field = format!("brackets[{}]", index);
            rate_in_range(&format!("{}.rate", field), bracket.rate)?;

            match bracket.ceiling {
                BracketCeiling::Bounded(ceiling) => {
                    if index == last {
                        return Err(invalid(&field, "the last bracket must be unbounded"));
                    }
                    if ceiling <= previous {
                        return Err(invalid(
                            &field,
                            &format!(
                                "ceiling {} must be greater than {}",
                                ceiling.normalize(),
                                previous.normalize()
                            ),
                        ));
                    }
                    previous = ceiling;
                }
                BracketCeiling::Unbounded => {
                    if index != last {
                        return Err(invalid(&field, "only the last bracket may be unbounded"));
                    }
                }
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

pub(crate) fn amount_in_range(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "must not be negative"));
    }
    if value > MAX_AMOUNT {
        return Err(invalid(field, &format!("must not exceed {}", MAX_AMOUNT)));
    }
    Ok(())
}

fn multiplier_in_range(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > MAX_CAP_MULTIPLIER {
        return Err(invalid(
            field,
            &format!("multiplier must be between 0 and {}", MAX_CAP_MULTIPLIER),
        ));
    }
    Ok(())
}

fn rate_in_range(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(field, "rate must be between 0 and 1"));
    }
    Ok(())
}
