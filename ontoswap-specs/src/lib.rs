//! Fixture-driven testing for ontoswap.
//!
//! Each `.toml` fixture declares a small vocabulary and hierarchy together
//! with the inputs to match against it and the expected normals or
//! rewritten text.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture schema and parsing
//! - [`loader`] - Loading fixtures from disk
//! - [`runner`] - Running fixture cases against a generated ontology
//! - [`formatter`] - Report rendering
//! - [`errors`] - Error types for the harness

pub mod errors;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use fixture::{parse_fixture, Expectation, FixtureCase, VocabularyFixture};
pub use formatter::{format_report, format_summary};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{run_fixture, CaseOutcome, CaseResult, FixtureReport};

#[cfg(test)]
mod tests;
