//! Firerule Domain Layer
//!
//! This crate contains the domain model shared by every other firerule crate.
//! It defines the units the extraction pipeline moves between stages and the
//! trait boundary to the external reasoning service.
//!
//! ## Key Concepts
//!
//! - **Clause**: one recognized, possibly continuation-merged, line of regulation text
//! - **FilteredDocument**: the capped, ordered set of clauses sent for extraction
//! - **Rule**: one structured compliance fact (clause, parameter, condition, unit, note)
//! - **RuleSet**: every rule produced by one successful extraction
//! - **Condition**: a comparison, optionally scoped to a building type (`高层厂房:>=0.5`)
//!
//! ## Architecture
//!
//! - Pure data and logic only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clause;
pub mod condition;
pub mod rule;
pub mod traits;

// Re-exports for convenience
pub use clause::{Clause, FilteredDocument};
pub use condition::{Condition, Operator};
pub use rule::{Parameter, Rule, RuleSet};
