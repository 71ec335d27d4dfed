//! Deterministic, vocabulary-driven entity normalization.
//!
//! Tokens are matched against an ontology and each mention is rewritten to
//! the canonical entity it names. Matching runs in three ordered stages:
//!
//! - [`ExactMatcher`] - Longest-first contiguous phrase matching
//! - [`SpanMatcher`] - Discontiguous matches anchored on a known sub-entity
//! - [`HierarchyAugmenter`] - Ancestor/descendant annotation and candidate filtering
//!
//! [`Pipeline`] runs the stages over a bounded number of passes, and
//! [`OntologyParser`] wraps it for plain text.
//!
//! ## Example
//!
//! ```
//! use ontoswap::{OntologyParser, Token};
//! use ontoswap_mda::OntologyFacts;
//!
//! let facts = OntologyFacts::new().entity("geometry").entity("abstract_algebra");
//! let parser = OntologyParser::from_facts(&facts).unwrap();
//!
//! let tokens = parser
//!     .swap_input_text("I studied abstract algebra today")
//!     .unwrap()
//!     .unwrap();
//! let normals: Vec<&str> = tokens.iter().map(Token::normal).collect();
//! assert_eq!(normals, ["i", "studied", "abstract_algebra", "today"]);
//! ```

mod config;
mod display;
mod errors;
mod exact;
mod hierarchy;
mod parser;
mod span;
mod swap;
mod token;
mod tokenize;

// Stage ordering and bounded convergence passes
pub mod pipeline;

pub use config::MatcherConfig;
pub use display::SwapDisplay;
pub use errors::{MatchError, MatchResult};
pub use exact::{ExactMatcher, ExactOutcome};
pub use hierarchy::HierarchyAugmenter;
pub use parser::OntologyParser;
pub use pipeline::{PassReport, Pipeline, PipelineOutput, Stage};
pub use span::{AcceptAll, SpanCandidate, SpanContextCheck, SpanMatcher};
pub use swap::SwapBuilder;
pub use token::{PlainToken, SwapToken, SwapType, Token};
pub use tokenize::tokenize;

#[cfg(test)]
mod tests {
    mod properties;
    mod scenarios;
}
