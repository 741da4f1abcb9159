//! # SRS Validator Core
//!
//! Core data structures for checking tabular data sheets against a rule sheet
//! ("SRS", specification sheet).
//!
//! A rule sheet describes, one row per column, what a data sheet is expected
//! to contain: the column's type, whether every value is required, numeric
//! bounds and a pattern. This crate holds the strongly-typed form of those
//! rules, the in-memory table they are checked against, and the report types
//! the validation engine produces.
//!
//! ## Key Concepts
//!
//! - **ColumnRule**: one parsed row of the rule sheet
//! - **DataTable**: one named, fully materialized sheet
//! - **ValidationFinding**: one failed check, scoped to a column
//! - **ValidationReport**: summary plus the ordered list of findings
//!
//! ## Example
//!
//! ```rust
//! use srs_core::{CellValue, ExpectedType, RuleBuilder, TableBuilder};
//!
//! let rule = RuleBuilder::new("Salary")
//!     .expected_type(ExpectedType::Float)
//!     .required(true)
//!     .min(30000.0)
//!     .build();
//!
//! let table = TableBuilder::new("Employees")
//!     .column("Salary", vec![Some(CellValue::Integer(45000)), None])
//!     .build()
//!     .unwrap();
//!
//! assert!(table.has_column(&rule.column_name));
//! assert_eq!(table.rows(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod rule;
pub mod table;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use rule::*;
pub use table::*;
