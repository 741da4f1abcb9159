//! # SRS Validator
//!
//! Validation engine for rule sheets. This crate evaluates parsed
//! [`ColumnRule`](srs_core::ColumnRule)s against a
//! [`DataTable`](srs_core::DataTable) and reports every failed check:
//!
//! - Column presence (short-circuits the remaining checks for that rule)
//! - Required values
//! - Type checks (integer, float, date)
//! - Min and max bounds, skipped when the column is not numeric
//!
//! It also pairs data sheets with rule sheets by name similarity.
//!
//! ## Example
//!
//! ```rust
//! use srs_core::{CellValue, ExpectedType, RuleBuilder, TableBuilder};
//! use srs_validator::evaluate;
//!
//! let rules = vec![
//!     RuleBuilder::new("Salary")
//!         .expected_type(ExpectedType::Float)
//!         .range(30000.0, 500000.0)
//!         .build(),
//! ];
//! let table = TableBuilder::new("Employees")
//!     .values("Salary", [45000_i64, 25000])
//!     .build()
//!     .unwrap();
//!
//! let report = evaluate(&rules, &table);
//!
//! if report.passed() {
//!     println!("Validation passed!");
//! } else {
//!     for finding in &report.findings {
//!         println!("{}: {}", finding.column, finding.error);
//!     }
//! }
//! ```

mod checks;
mod coerce;
mod engine;
mod matching;

pub use checks::*;
pub use coerce::*;
pub use engine::*;
pub use matching::*;
