//! Calculation request model.
//!
//! A [`CalculationRequest`] carries everything the engine needs besides the
//! regime: the salary figure and how to read it, the region, dependents, the
//! insurance contribution base, extra deductions and supplementary income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_AMOUNT, Region};
use crate::error::{EngineError, EngineResult};

/// How the request's `income` figure should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    /// `income` is pre-tax, pre-insurance pay.
    Gross,
    /// `income` is the desired take-home pay.
    Net,
}

/// The salary figure insurance percentages are applied to.
///
/// # Example
///
/// ```
/// use pit_engine::models::InsuranceBase;
/// use rust_decimal::Decimal;
///
/// let official = InsuranceBase::Official;
/// assert_eq!(official.declared_base(Decimal::from(20_000_000)), Decimal::from(20_000_000));
///
/// let custom = InsuranceBase::Custom { amount: Decimal::from(5_000_000) };
/// assert_eq!(custom.declared_base(Decimal::from(20_000_000)), Decimal::from(5_000_000));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InsuranceBase {
    /// Contributions are computed on the gross salary itself.
    #[default]
    Official,
    /// Contributions are computed on a separately declared amount.
    Custom {
        /// The declared contribution base.
        amount: Decimal,
    },
}

impl InsuranceBase {
    /// Resolves the contribution base for a given gross salary.
    pub fn declared_base(&self, gross: Decimal) -> Decimal {
        match self {
            InsuranceBase::Official => gross,
            InsuranceBase::Custom { amount } => *amount,
        }
    }
}

/// Tax treatment category of a supplementary income entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalIncomeCategory {
    /// Salary-like income (taxed at a flat estimate, not merged into brackets).
    SalaryLike,
    /// Casual/freelance service income subject to withholding.
    Freelance,
    /// Capital investment income.
    Investment,
    /// Income exempt from PIT.
    NonTaxable,
}

/// A supplementary income entry, taxed independently of the main salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalIncome {
    /// Free-text label shown back to the user.
    pub label: String,
    /// Amount received.
    pub amount: Decimal,
    /// How the amount is taxed.
    pub category: AdditionalIncomeCategory,
}

impl AdditionalIncome {
    /// Creates an additional income entry.
    pub fn new(
        label: impl Into<String>,
        amount: Decimal,
        category: AdditionalIncomeCategory,
    ) -> Self {
        Self {
            label: label.into(),
            amount,
            category,
        }
    }
}

fn default_region() -> Region {
    Region::I
}

/// Input to the engine for a single conversion.
///
/// # Example
///
/// ```
/// use pit_engine::config::Region;
/// use pit_engine::models::{CalculationRequest, IncomeType};
/// use rust_decimal::Decimal;
///
/// let request = CalculationRequest::gross(Decimal::from(20_000_000), Region::I)
///     .with_dependents(1);
/// assert_eq!(request.income_type, IncomeType::Gross);
/// assert_eq!(request.dependent_count, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross salary or target net salary, depending on `income_type`.
    pub income: Decimal,
    /// Whether `income` is gross or net.
    pub income_type: IncomeType,
    /// Region selecting the unemployment-insurance cap.
    #[serde(default = "default_region")]
    pub region: Region,
    /// Number of declared dependents.
    #[serde(default)]
    pub dependent_count: u32,
    /// Contribution base for insurance.
    #[serde(default)]
    pub insurance_base: InsuranceBase,
    /// Extra flat deduction beyond personal and dependent deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Supplementary income entries.
    #[serde(default)]
    pub additional_income: Vec<AdditionalIncome>,
}

impl CalculationRequest {
    /// Creates a gross request with no dependents, official insurance base,
    /// no extra deductions and no additional income.
    pub fn gross(income: Decimal, region: Region) -> Self {
        Self {
            income,
            income_type: IncomeType::Gross,
            region,
            dependent_count: 0,
            insurance_base: InsuranceBase::Official,
            other_deductions: Decimal::ZERO,
            additional_income: Vec::new(),
        }
    }

    /// Creates a net request with the same defaults as [`CalculationRequest::gross`].
    pub fn net(income: Decimal, region: Region) -> Self {
        Self {
            income_type: IncomeType::Net,
            ..Self::gross(income, region)
        }
    }

    /// Sets the number of dependents.
    pub fn with_dependents(mut self, count: u32) -> Self {
        self.dependent_count = count;
        self
    }

    /// Sets the insurance contribution base.
    pub fn with_insurance_base(mut self, base: InsuranceBase) -> Self {
        self.insurance_base = base;
        self
    }

    /// Sets the extra flat deduction.
    pub fn with_other_deductions(mut self, amount: Decimal) -> Self {
        self.other_deductions = amount;
        self
    }

    /// Appends a supplementary income entry.
    pub fn with_additional_income(mut self, item: AdditionalIncome) -> Self {
        self.additional_income.push(item);
        self
    }

    /// Rejects amounts outside `[0, MAX_AMOUNT]`.
    ///
    /// The engine does not check its input; the API layer calls this before
    /// handing a request over.
    pub fn validate(&self) -> EngineResult<()> {
        amount_in_range("income", self.income)?;
        amount_in_range("other_deductions", self.other_deductions)?;
        if let InsuranceBase::Custom { amount } = self.insurance_base {
            amount_in_range("insurance_base.amount", amount)?;
        }
        for (index, item) in self.additional_income.iter().enumerate() {
            amount_in_range(&format!("additional_income[{}].amount", index), item.amount)?;
        }
        Ok(())
    }
}

fn amount_in_range(field: &str, value: Decimal) -> EngineResult<()> {
    let message = if value < Decimal::ZERO {
        "must not be negative".to_string()
    } else if value > MAX_AMOUNT {
        format!("must not exceed {}", MAX_AMOUNT)
    } else {
        return Ok(());
    };
    Err(EngineError::InvalidRequest {
        field: field.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"income": "20000000", "income_type": "gross"}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.income, Decimal::from(20_000_000));
        assert_eq!(request.region, Region::I);
        assert_eq!(request.dependent_count, 0);
        assert_eq!(request.insurance_base, InsuranceBase::Official);
        assert_eq!(request.other_deductions, Decimal::ZERO);
        assert!(request.additional_income.is_empty());
    }

    #[test]
    fn test_deserialize_custom_insurance_base() {
        let json = r#"{
            "income": "30000000",
            "income_type": "net",
            "region": "III",
            "dependent_count": 2,
            "insurance_base": {"mode": "custom", "amount": "5000000"},
            "additional_income": [
                {"label": "Rent", "amount": "3000000", "category": "non_taxable"}
            ]
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.income_type, IncomeType::Net);
        assert_eq!(request.region, Region::III);
        assert_eq!(
            request.insurance_base,
            InsuranceBase::Custom {
                amount: Decimal::from(5_000_000)
            }
        );
        assert_eq!(
            request.additional_income[0].category,
            AdditionalIncomeCategory::NonTaxable
        );
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&AdditionalIncomeCategory::SalaryLike).unwrap(),
            "\"salary_like\""
        );
        assert_eq!(
            serde_json::to_string(&AdditionalIncomeCategory::NonTaxable).unwrap(),
            "\"non_taxable\""
        );
    }

    #[test]
    fn test_net_constructor() {
        let request = CalculationRequest::net(Decimal::from(15_000_000), Region::II);
        assert_eq!(request.income_type, IncomeType::Net);
        assert_eq!(request.region, Region::II);
    }

    #[test]
    fn test_validate_accepts_zero_income() {
        let request = CalculationRequest::gross(Decimal::ZERO, Region::I);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_income() {
        let request = CalculationRequest::gross(Decimal::from(-1), Region::I);
        match request.validate() {
            Err(EngineError::InvalidRequest { field, .. }) => assert_eq!(field, "income"),
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_additional_amount() {
        let request = CalculationRequest::gross(Decimal::from(10_000_000), Region::I)
            .with_additional_income(AdditionalIncome::new(
                "Refund",
                Decimal::from(-500),
                AdditionalIncomeCategory::NonTaxable,
            ));
        match request.validate() {
            Err(EngineError::InvalidRequest { field, .. }) => {
                assert_eq!(field, "additional_income[0].amount")
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_custom_base() {
        let request = CalculationRequest::gross(Decimal::from(10_000_000), Region::I)
            .with_insurance_base(InsuranceBase::Custom {
                amount: Decimal::from(-1),
            });
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_max_amount() {
        let request = CalculationRequest::net(MAX_AMOUNT, Region::I)
            .with_other_deductions(MAX_AMOUNT)
            .with_insurance_base(InsuranceBase::Custom { amount: MAX_AMOUNT });
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_income_above_max() {
        let request = CalculationRequest::net(MAX_AMOUNT + Decimal::ONE, Region::I);
        match request.validate() {
            Err(EngineError::InvalidRequest { field, message }) => {
                assert_eq!(field, "income");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_oversized_deductions_and_items() {
        let deductions = CalculationRequest::gross(Decimal::from(10_000_000), Region::I)
            .with_other_deductions(Decimal::MAX);
        match deductions.validate() {
            Err(EngineError::InvalidRequest { field, .. }) => {
                assert_eq!(field, "other_deductions")
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }

        let items = CalculationRequest::gross(Decimal::from(10_000_000), Region::I)
            .with_additional_income(AdditionalIncome::new(
                "Windfall",
                Decimal::MAX,
                AdditionalIncomeCategory::Investment,
            ));
        match items.validate() {
            Err(EngineError::InvalidRequest { field, .. }) => {
                assert_eq!(field, "additional_income[0].amount")
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }
}
