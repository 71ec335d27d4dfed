//! Read-only query facade over a loaded [`Mda`].
//!
//! An [`Ontology`] is immutable after construction and safe to share across
//! threads. Transitive hierarchy closures are computed on first use and
//! memoized per instance.

use crate::errors::{MdaError, MdaResult};
use crate::hierarchy::{closure_index, Adjacency};
use crate::mda::Mda;
use crate::spans::SpanRule;
use crate::trie::Trie;
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::warn;

/// Lowercase, trimmed, spaces as underscores, apostrophes removed.
pub fn cleanse_canon(text: &str) -> String {
    text.trim().to_lowercase().replace('\'', "").replace(' ', "_")
}

/// Underscores as spaces, apostrophes removed, whitespace collapsed.
pub fn normalize_phrase(text: &str) -> String {
    text.replace('_', " ")
        .replace('\'', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug)]
pub struct Ontology {
    mda: Mda,
    lookup_index: BTreeMap<usize, HashSet<String>>,
    ancestors: OnceCell<Adjacency>,
    descendants: OnceCell<Adjacency>,
}

impl Ontology {
    /// Wrap an artifact, rejecting ones the matchers cannot use.
    pub fn new(mda: Mda) -> MdaResult<Self> {
        if mda.synonyms.fwd.is_empty() {
            return Err(MdaError::EmptyOntology);
        }
        if let Some((anchor, _)) = mda
            .spans
            .iter()
            .find(|(_, rules)| rules.iter().any(|rule| rule.distance == 0))
        {
            return Err(MdaError::InvalidConfig {
                field: "spans.distance",
                message: format!("span rule anchored on `{}` has a zero distance", anchor),
            });
        }

        let lookup_index = mda
            .synonyms
            .lookup
            .iter()
            .map(|(size, phrases)| (*size, phrases.iter().cloned().collect()))
            .collect();

        Ok(Self {
            mda,
            lookup_index,
            ancestors: OnceCell::new(),
            descendants: OnceCell::new(),
        })
    }

    pub fn mda(&self) -> &Mda {
        &self.mda
    }

    pub fn into_mda(self) -> Mda {
        self.mda
    }

    pub fn trie(&self) -> &Trie {
        &self.mda.trie
    }

    // ------------------------------------------------------------------
    // Synonyms
    // ------------------------------------------------------------------

    /// Resolve a surface string to its entity.
    ///
    /// Tries, in order: the string as an entity name, as a known variant,
    /// as a variant with underscores read as spaces, and finally the
    /// cleansed entity form of the string.
    pub fn find_canon(&self, text: &str) -> Option<&str> {
        if let Some((entity, _)) = self.mda.synonyms.fwd.get_key_value(text) {
            return Some(entity.as_str());
        }
        if let Some(canon) = self.canon_for_variant(text) {
            return Some(canon);
        }
        if text.contains('_') {
            if let Some(canon) = self.canon_for_variant(&text.replace('_', " ")) {
                return Some(canon);
            }
        }
        if text.contains(' ') || text.contains('\'') {
            let cleansed = cleanse_canon(text);
            if cleansed != text {
                return self.find_canon(&cleansed);
            }
        }
        None
    }

    /// The entity a variant maps to; ties prefer the entity spelled like the
    /// variant, then the alphabetically first.
    fn canon_for_variant(&self, variant: &str) -> Option<&str> {
        let canons = self.mda.synonyms.rev.get(variant)?;
        if canons.len() > 1 {
            warn!(variant, candidates = ?canons, "variant maps to multiple entities");
            let spelled = variant.replace(' ', "_");
            if let Some(canon) = canons.iter().find(|canon| **canon == spelled) {
                return Some(canon.as_str());
            }
        }
        canons.first().map(String::as_str)
    }

    pub fn is_canon(&self, text: &str) -> bool {
        self.mda.synonyms.fwd.contains_key(text)
    }

    pub fn is_variant(&self, text: &str) -> bool {
        self.mda.synonyms.rev.contains_key(text)
    }

    pub fn find_variants(&self, entity: &str) -> &[String] {
        self.mda
            .synonyms
            .fwd
            .get(entity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entity_exists(&self, entity: &str) -> bool {
        self.is_canon(entity)
            || self.mda.children.contains_key(entity)
            || self.mda.parents.contains_key(entity)
    }

    pub fn find_ner(&self, entity: &str) -> Option<&str> {
        self.mda.ner.get(entity).map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Phrase tables
    // ------------------------------------------------------------------

    /// True when any phrase of `size` words is known.
    pub fn has_gram_level(&self, size: usize) -> bool {
        self.lookup_index
            .get(&size)
            .map_or(false, |phrases| !phrases.is_empty())
            || self.mda.trie.has_level(size)
    }

    /// Longest known phrase, in words.
    pub fn max_gram_level(&self) -> usize {
        let lookup_max = self
            .lookup_index
            .iter()
            .filter(|(_, phrases)| !phrases.is_empty())
            .map(|(size, _)| *size)
            .max()
            .unwrap_or(0);
        lookup_max.max(self.mda.trie.max_level())
    }

    pub fn lookup_contains(&self, size: usize, phrase: &str) -> bool {
        self.lookup_index
            .get(&size)
            .map_or(false, |phrases| phrases.contains(phrase))
    }

    /// `phrase` (of `size` words) is known verbatim, or after normalizing
    /// underscores and apostrophes.
    pub fn is_known_phrase(&self, size: usize, phrase: &str) -> bool {
        if self.lookup_contains(size, phrase) {
            return true;
        }
        let normalized = normalize_phrase(phrase);
        let words = normalized.split(' ').filter(|word| !word.is_empty()).count();
        normalized != phrase && self.lookup_contains(words, &normalized)
    }

    // ------------------------------------------------------------------
    // Spans
    // ------------------------------------------------------------------

    pub fn has_spans(&self) -> bool {
        !self.mda.spans.is_empty()
    }

    pub fn span_rules(&self, anchor: &str) -> &[SpanRule] {
        self.mda
            .spans
            .get(anchor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Span anchors, shortest first.
    pub fn span_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.mda.spans.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        keys
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    pub fn children(&self, entity: &str) -> &[String] {
        related(&self.mda.children, entity)
    }

    pub fn parents(&self, entity: &str) -> &[String] {
        related(&self.mda.parents, entity)
    }

    pub fn ancestors(&self, entity: &str) -> &[String] {
        let index = self
            .ancestors
            .get_or_init(|| closure_index(&self.mda.parents));
        related(index, entity)
    }

    pub fn descendants(&self, entity: &str) -> &[String] {
        let index = self
            .descendants
            .get_or_init(|| closure_index(&self.mda.children));
        related(index, entity)
    }

    pub fn children_and_self(&self, entity: &str) -> Vec<String> {
        with_self(entity, self.children(entity))
    }

    pub fn parents_and_self(&self, entity: &str) -> Vec<String> {
        with_self(entity, self.parents(entity))
    }

    pub fn ancestors_and_self(&self, entity: &str) -> Vec<String> {
        with_self(entity, self.ancestors(entity))
    }

    pub fn descendants_and_self(&self, entity: &str) -> Vec<String> {
        with_self(entity, self.descendants(entity))
    }

    pub fn has_parent(&self, entity: &str, parent: &str) -> bool {
        self.parents(entity).iter().any(|p| p == parent)
    }

    pub fn has_ancestor(&self, entity: &str, ancestor: &str) -> bool {
        self.ancestors(entity).iter().any(|a| a == ancestor)
    }

    // ------------------------------------------------------------------
    // Labels, equivalents and predicates
    // ------------------------------------------------------------------

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.mda.labels
    }

    pub fn label_by_entity(&self, entity: &str) -> Option<&str> {
        self.mda.labels.get(entity).map(String::as_str)
    }

    /// Label to every entity carrying it.
    pub fn labels_rev(&self) -> BTreeMap<String, Vec<String>> {
        let mut rev: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (entity, label) in &self.mda.labels {
            rev.entry(label.clone()).or_default().push(entity.clone());
        }
        rev
    }

    /// Equivalents of each given entity; names are accepted in any case and
    /// with spaces or underscores.
    pub fn equivalents_map<S: AsRef<str>>(&self, entities: &[S]) -> BTreeMap<String, Vec<String>> {
        entities
            .iter()
            .map(|entity| cleanse_canon(entity.as_ref()))
            .filter_map(|entity| {
                let others = self.mda.equivalents.get(&entity)?;
                Some((entity, others.clone()))
            })
            .collect()
    }

    /// Flattened, sorted equivalents of the given entities.
    pub fn equivalents<S: AsRef<str>>(&self, entities: &[S]) -> Vec<String> {
        self.equivalents_map(entities)
            .into_values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn predicates(&self) -> &[String] {
        &self.mda.predicates
    }

    /// Subject to objects for `predicate`.
    pub fn by_predicate(&self, predicate: &str) -> Option<&Adjacency> {
        self.mda.by_predicate.get(predicate)
    }

    /// Object to subjects for `predicate`.
    pub fn by_predicate_rev(&self, predicate: &str) -> Adjacency {
        let mut rev: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (subject, objects) in self.by_predicate(predicate).into_iter().flatten() {
            for object in objects {
                rev.entry(object.clone()).or_default().insert(subject.clone());
            }
        }
        rev.into_iter()
            .map(|(object, subjects)| (object, subjects.into_iter().collect()))
            .collect()
    }
}

fn related<'a>(table: &'a Adjacency, entity: &str) -> &'a [String] {
    table.get(entity).map(Vec::as_slice).unwrap_or(&[])
}

fn with_self(entity: &str, related: &[String]) -> Vec<String> {
    std::iter::once(entity.to_string())
        .chain(related.iter().cloned())
        .collect()
}
