//! Span rules: discontiguous matches anchored on a known sub-entity.
//!
//! A variant written as `anchor+term` (or a variant whose leading word
//! bigram is itself an entity) produces a rule keyed by `anchor` that fires
//! when every content term appears near the anchor in the input.

use crate::config::GeneratorConfig;
use crate::synonyms::{by_length, collapse_whitespace, SPAN_MARKER};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Span rules grouped by anchor token.
pub type SpanRules = BTreeMap<String, Vec<SpanRule>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRule {
    /// Terms that must also be present, shortest first.
    pub content: Vec<String>,
    /// Maximum filler tokens between neighbouring terms.
    pub distance: usize,
    pub forward: bool,
    pub reverse: bool,
    /// Entity the matched span resolves to.
    pub canon: String,
}

/// Structural identity of a rule, used to store each rule once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SpanRuleKey {
    anchor: String,
    content: Vec<String>,
    distance: usize,
    forward: bool,
    reverse: bool,
    canon: String,
}

impl SpanRuleKey {
    fn new(anchor: &str, rule: &SpanRule) -> Self {
        Self {
            anchor: anchor.to_string(),
            content: rule.content.clone(),
            distance: rule.distance,
            forward: rule.forward,
            reverse: rule.reverse,
            canon: rule.canon.clone(),
        }
    }
}

/// Adjacent word pairs of `text`, joined with underscores.
pub fn sliding_bigrams(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .windows(2)
        .map(|pair| format!("{}_{}", pair[0], pair[1]))
        .collect()
}

/// Variants of one entity that carry a span marker, including the ones
/// produced by folding a known entity bigram into an anchor.
fn marked_variants(variants: &[String], raw: &BTreeMap<String, Vec<String>>) -> BTreeSet<String> {
    let mut sources = BTreeSet::new();
    for variant in variants {
        let variant = variant.to_lowercase();
        let mut rewritten = variant.clone();
        for bigram in sliding_bigrams(&variant) {
            if !raw.contains_key(&bigram) {
                continue;
            }
            rewritten = rewritten.replace(
                &bigram.replace('_', " "),
                &format!("{} {}", bigram, SPAN_MARKER),
            );
            if !rewritten.trim_end().ends_with(SPAN_MARKER) {
                sources.insert(rewritten.clone());
            }
        }
        sources.insert(variant);
    }
    sources.retain(|source| source.contains(SPAN_MARKER));
    sources
}

fn to_rule(canon: &str, segments: &[&str], config: &GeneratorConfig) -> Option<SpanRule> {
    let mut content: Vec<String> = segments
        .iter()
        .map(|segment| collapse_whitespace(segment))
        .filter(|segment| !segment.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if content.is_empty() {
        return None;
    }
    content.sort_by(by_length);

    Some(SpanRule {
        content,
        distance: config.span_distance,
        forward: config.forward,
        reverse: config.reverse,
        canon: canon.to_string(),
    })
}

/// Derive span rules from raw `entity -> variants` facts.
pub fn generate_span_rules(
    raw: &BTreeMap<String, Vec<String>>,
    config: &GeneratorConfig,
) -> SpanRules {
    let mut seen: HashSet<SpanRuleKey> = HashSet::new();
    let mut spans = SpanRules::new();

    for (entity, variants) in raw {
        for source in marked_variants(variants, raw) {
            let segments: Vec<&str> = source.split(SPAN_MARKER).collect();
            let anchor = segments[0].trim();
            if anchor.is_empty() {
                continue;
            }
            let rule = match to_rule(entity, &segments[1..], config) {
                Some(rule) => rule,
                None => continue,
            };
            if seen.insert(SpanRuleKey::new(anchor, &rule)) {
                spans.entry(anchor.to_string()).or_default().push(rule);
            }
        }
    }

    spans
}
