//! Core data models for the PIT engine.
//!
//! This module contains the request the engine consumes and the result it
//! produces.

mod calculation_result;
mod request;

pub use calculation_result::{
    AdditionalIncomeDetail, AuditStep, BracketDetail, CalculationResult, InsuranceContributions,
};
pub use request::{
    AdditionalIncome, AdditionalIncomeCategory, CalculationRequest, IncomeType, InsuranceBase,
};
