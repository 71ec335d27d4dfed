//! Forward (entity to variants) and reverse (variant to entities) synonym views.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Joins the anchor of a discontiguous variant to its remaining terms.
pub const SPAN_MARKER: char = '+';

const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Cleaned synonym maps for one ontology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymView {
    /// Entity to variants, shortest first.
    pub fwd: BTreeMap<String, Vec<String>>,
    /// Variant to every entity that lists it, alphabetical.
    pub rev: BTreeMap<String, Vec<String>>,
}

/// Collapse runs of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value.trim(), " ").into_owned()
}

/// Orders by length, then alphabetically so equal lengths stay stable.
pub(crate) fn by_length(left: &String, right: &String) -> std::cmp::Ordering {
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// Every surface form a single raw variant should be recognized under.
fn expand_variant(raw: &str, forms: &mut BTreeSet<String>) {
    let mut value = raw.trim().to_lowercase();
    if value.contains(SPAN_MARKER) {
        value = value.replace(SPAN_MARKER, " ");
    }

    forms.insert(collapse_whitespace(&value));

    if value.contains('_') {
        forms.insert(collapse_whitespace(&value.replace('_', " ")));
    }

    if let Some(stripped) = value.strip_suffix(&TERMINAL_PUNCTUATION[..]) {
        forms.insert(collapse_whitespace(stripped));
    }

    // "e.g." style abbreviations are tokenized with the period split off
    if value.contains('.') && !value.contains("...") {
        forms.insert(collapse_whitespace(&value.replace('.', " . ")));
    }
}

/// Build both synonym views from raw `entity -> variants` facts.
///
/// Variant casing is normalized; entity names are kept exactly as given.
pub fn generate_synonyms(raw: &BTreeMap<String, Vec<String>>) -> SynonymView {
    let mut fwd = BTreeMap::new();
    for (entity, variants) in raw {
        let mut forms = BTreeSet::new();
        for variant in variants {
            expand_variant(variant, &mut forms);
        }
        let mut forms: Vec<String> = forms.into_iter().filter(|f| !f.is_empty()).collect();
        forms.sort_by(by_length);
        fwd.insert(entity.clone(), forms);
    }

    let rev = reverse(&fwd);
    SynonymView { fwd, rev }
}

fn reverse(fwd: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut rev: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (entity, variants) in fwd {
        for variant in variants {
            rev.entry(variant.clone())
                .or_default()
                .insert(entity.clone());
        }
    }
    rev.into_iter()
        .map(|(variant, entities)| (variant, entities.into_iter().collect()))
        .collect()
}
