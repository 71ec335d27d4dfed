//! The boundary to whatever extracts facts from an ontology document.
//!
//! Generators only see the [`FactSource`] trait, so facts can come from a
//! live graph query or from a previously materialized snapshot as long as
//! both produce identical structures.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A `(subject, predicate, object)` statement about two entities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// Raw ontology facts consumed by [`MdaGenerator`](crate::MdaGenerator).
pub trait FactSource {
    /// Every entity name (lowercase, spaces as underscores).
    fn entities(&self) -> Vec<String>;

    /// `(child, parent)` subclass edges.
    fn subclass_edges(&self) -> Vec<(String, String)>;

    /// Entity to raw surface strings (labels, alt-labels, inflections, see-also).
    fn synonyms(&self) -> BTreeMap<String, Vec<String>>;

    /// Entity to human readable label.
    fn labels(&self) -> BTreeMap<String, String>;

    /// Pairs of mutually equivalent entities.
    fn equivalent_pairs(&self) -> Vec<(String, String)>;

    fn predicate_triples(&self) -> Vec<Triple>;

    /// Entity to named-entity tag.
    fn ner_tags(&self) -> BTreeMap<String, String>;
}

/// In-memory fact table.
///
/// Any entity mentioned by a fact is registered implicitly.
///
/// ```
/// use ontoswap_mda::{FactSource, OntologyFacts};
///
/// let facts = OntologyFacts::new()
///     .synonym("abstract_algebra", "Abstract Algebra")
///     .subclass_of("abstract_algebra", "mathematics");
///
/// assert_eq!(facts.entities(), vec!["abstract_algebra", "mathematics"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyFacts {
    #[serde(default)]
    pub entities: BTreeSet<String>,
    #[serde(default)]
    pub subclass_edges: Vec<(String, String)>,
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub equivalents: Vec<(String, String)>,
    #[serde(default)]
    pub triples: Vec<Triple>,
    #[serde(default)]
    pub ner: BTreeMap<String, String>,
}

impl OntologyFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entities.insert(entity.into());
        self
    }

    pub fn synonym(mut self, entity: impl Into<String>, variant: impl Into<String>) -> Self {
        let entity = entity.into();
        self.synonyms
            .entry(entity.clone())
            .or_default()
            .push(variant.into());
        self.entity(entity)
    }

    pub fn variants<I, S>(self, entity: &str, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        variants
            .into_iter()
            .fold(self.entity(entity), |facts, variant| facts.synonym(entity, variant))
    }

    pub fn subclass_of(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        let (child, parent) = (child.into(), parent.into());
        self.entities.insert(child.clone());
        self.entities.insert(parent.clone());
        self.subclass_edges.push((child, parent));
        self
    }

    pub fn label(mut self, entity: impl Into<String>, label: impl Into<String>) -> Self {
        let entity = entity.into();
        self.labels.insert(entity.clone(), label.into());
        self.entity(entity)
    }

    pub fn equivalent(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        let (left, right) = (left.into(), right.into());
        self.entities.insert(left.clone());
        self.entities.insert(right.clone());
        self.equivalents.push((left, right));
        self
    }

    pub fn triple(
        mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        self.triples.push(Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        });
        self
    }

    pub fn ner(mut self, entity: impl Into<String>, tag: impl Into<String>) -> Self {
        let entity = entity.into();
        self.ner.insert(entity.clone(), tag.into());
        self.entity(entity)
    }
}

impl FactSource for OntologyFacts {
    fn entities(&self) -> Vec<String> {
        self.entities.iter().cloned().collect()
    }

    fn subclass_edges(&self) -> Vec<(String, String)> {
        self.subclass_edges.clone()
    }

    /// See-also values are stored comma separated, so each raw value is split.
    fn synonyms(&self) -> BTreeMap<String, Vec<String>> {
        self.synonyms
            .iter()
            .map(|(entity, values)| {
                let variants = values
                    .iter()
                    .flat_map(|value| value.split(','))
                    .map(str::trim)
                    .filter(|variant| !variant.is_empty())
                    .map(String::from)
                    .collect();
                (entity.clone(), variants)
            })
            .collect()
    }

    fn labels(&self) -> BTreeMap<String, String> {
        self.labels.clone()
    }

    fn equivalent_pairs(&self) -> Vec<(String, String)> {
        self.equivalents.clone()
    }

    fn predicate_triples(&self) -> Vec<Triple> {
        self.triples.clone()
    }

    fn ner_tags(&self) -> BTreeMap<String, String> {
        self.ner.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_registers_entities() {
        let facts = OntologyFacts::new()
            .entity("geometry")
            .equivalent("algebra", "abstract_algebra")
            .label("calculus", "Calculus");

        assert_eq!(
            facts.entities(),
            vec!["abstract_algebra", "algebra", "calculus", "geometry"]
        );
    }

    #[test]
    fn comma_separated_synonyms_are_split() {
        let facts = OntologyFacts::new().variants("statistics", ["stats, statistic", " ,stat"]);

        assert_eq!(
            facts.synonyms().get("statistics").unwrap(),
            &vec!["stats", "statistic", "stat"]
        );
    }

    #[test]
    fn triples_do_not_register_entities() {
        let facts = OntologyFacts::new().triple("geometry", "rdfs:comment", "shapes");
        assert!(facts.entities().is_empty());
        assert_eq!(facts.predicate_triples().len(), 1);
    }
}
