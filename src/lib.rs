//! Vietnamese Personal Income Tax Engine
//!
//! This crate converts salaries between gross and net under Vietnamese
//! personal income tax law. It computes the compulsory insurance
//! contributions, the family-circumstance deductions and the progressive tax,
//! and supports the current (2025) and proposed (2026) regimes side by side.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
