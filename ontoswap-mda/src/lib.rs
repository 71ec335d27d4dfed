//! Precomputed lookup structures for ontology-driven entity matching.
//!
//! Raw facts about an ontology (entities, synonyms, subclass edges,
//! equivalents, predicates) are turned once into an immutable artifact, the
//! [`Mda`], which the matchers in `ontoswap` query through [`Ontology`].
//!
//! ## Modules
//!
//! - [`facts`] - The [`FactSource`] boundary and an in-memory implementation
//! - [`synonyms`] - Forward and reverse synonym views
//! - [`spans`] - Discontiguous span rules keyed by anchor token
//! - [`trie`] - Word-count grouped phrase tables and the nested trie
//! - [`hierarchy`] - Parent/child tables and transitive closures
//! - [`mda`] - The artifact, its generator and JSON/RON persistence
//! - [`ontology`] - Read-only query facade
//! - [`config`] - Generator settings
//! - [`errors`] - Error types

pub mod config;
pub mod errors;
pub mod facts;
pub mod hierarchy;
pub mod mda;
pub mod ontology;
pub mod spans;
pub mod synonyms;
pub mod trie;

pub use config::{GeneratorConfig, SPAN_DISTANCE_ENV};
pub use errors::{MdaError, MdaResult};
pub use facts::{FactSource, OntologyFacts, Triple};
pub use mda::{Mda, MdaGenerator, SynonymTables, MAX_NGRAM_LEVEL};
pub use ontology::{cleanse_canon, normalize_phrase, Ontology};
pub use spans::{SpanRule, SpanRules};
pub use synonyms::SynonymView;
pub use trie::{GramLevels, Trie, TrieNode};
