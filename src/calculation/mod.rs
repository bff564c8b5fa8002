//! Calculation logic for the PIT engine.
//!
//! This module contains the insurance calculation, the progressive tax
//! calculation, supplementary income taxation, the gross to net conversion
//! and the net to gross search. Every function here is pure: it reads the
//! request and the regime and returns a fresh value.

mod additional_income;
mod engine;
mod gross_to_net;
mod insurance;
mod net_to_gross;
mod progressive_tax;

pub use additional_income::{
    FREELANCE_RATE, FREELANCE_WITHHOLDING_THRESHOLD, INVESTMENT_RATE, SALARY_LIKE_RATE,
    additional_income_tax, evaluate_additional_income,
};
pub use engine::{RegimeOutcome, compare_regimes, compute};
pub use gross_to_net::{compute_from_gross, total_deduction};
pub use insurance::{InsuranceBreakdown, calculate_insurance, insurance_breakdown};
pub use net_to_gross::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, GrossSolution, InversionSettings, NetInversion,
    compute_from_net, compute_from_net_with, solve_gross_for_net,
};
pub use progressive_tax::{ProgressiveTax, calculate_progressive_tax};
