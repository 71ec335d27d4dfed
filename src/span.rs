//! Stage 2: discontiguous span matching.
//!
//! Candidates pass through three filters, each working on the survivors of
//! the previous one:
//!
//! 1. content: the anchor is present and every content term occurs
//!    somewhere in the input
//! 2. distance: anchor and terms sit close enough in input order
//! 3. context: a pluggable [`SpanContextCheck`]
//!
//! At most one span swap is made per call.

use crate::swap::SwapBuilder;
use crate::token::{SwapType, Token};
use ontoswap_mda::{Ontology, SpanRule};
use std::collections::BTreeSet;
use tracing::debug;

/// A rule whose anchor and content terms were found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanCandidate {
    pub anchor: String,
    pub rule: SpanRule,
    /// Anchor plus content terms, shortest first.
    pub terms: Vec<String>,
    /// Matched token positions, ascending. Empty until the distance check.
    pub positions: Vec<usize>,
}

/// Final filter over distance-checked candidates.
pub trait SpanContextCheck: Send + Sync {
    fn accept(&self, tokens: &[Token], candidate: &SpanCandidate) -> bool;
}

/// Keeps every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SpanContextCheck for AcceptAll {
    fn accept(&self, _tokens: &[Token], _candidate: &SpanCandidate) -> bool {
        true
    }
}

pub struct SpanMatcher<'a> {
    ontology: &'a Ontology,
    context: &'a dyn SpanContextCheck,
}

impl<'a> SpanMatcher<'a> {
    pub fn new(ontology: &'a Ontology) -> Self {
        Self {
            ontology,
            context: &AcceptAll,
        }
    }

    pub fn with_context_check(mut self, context: &'a dyn SpanContextCheck) -> Self {
        self.context = context;
        self
    }

    /// Rules whose anchor is present and whose content is a subset of the
    /// input's normals. Anchors are visited in input order.
    pub fn content_candidates(&self, tokens: &[Token]) -> Vec<SpanCandidate> {
        let present: BTreeSet<&str> = tokens.iter().map(Token::normal).collect();
        let mut visited = BTreeSet::new();
        let mut candidates = Vec::new();

        for token in tokens {
            let anchor = token.normal();
            if !visited.insert(anchor) {
                continue;
            }
            for rule in self.ontology.span_rules(anchor) {
                if !rule.content.iter().all(|term| present.contains(term.as_str())) {
                    continue;
                }
                let mut terms: Vec<String> = std::iter::once(anchor.to_string())
                    .chain(rule.content.iter().cloned())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                terms.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
                candidates.push(SpanCandidate {
                    anchor: anchor.to_string(),
                    rule: rule.clone(),
                    terms,
                    positions: Vec::new(),
                });
            }
        }
        candidates
    }

    /// Keep candidates with an anchor occurrence whose terms all fall within
    /// the rule's distance, recording the matched positions.
    pub fn distance_filter(
        &self,
        tokens: &[Token],
        candidates: Vec<SpanCandidate>,
    ) -> Vec<SpanCandidate> {
        candidates
            .into_iter()
            .filter_map(|mut candidate| {
                candidate.positions = locate(tokens, &candidate)?;
                Some(candidate)
            })
            .collect()
    }

    pub fn context_filter(
        &self,
        tokens: &[Token],
        candidates: Vec<SpanCandidate>,
    ) -> Vec<SpanCandidate> {
        candidates
            .into_iter()
            .filter(|candidate| self.context.accept(tokens, candidate))
            .collect()
    }

    /// Best surviving candidate, or `None` as soon as a filter empties.
    pub fn find(&self, tokens: &[Token]) -> Option<SpanCandidate> {
        let candidates = self.content_candidates(tokens);
        if candidates.is_empty() {
            return None;
        }
        let candidates = self.distance_filter(tokens, candidates);
        if candidates.is_empty() {
            return None;
        }
        let candidates = self.context_filter(tokens, candidates);
        select_most_specific(candidates)
    }

    /// Make at most one span swap. Returns whether the stream changed.
    pub fn process(&self, tokens: &mut Vec<Token>) -> bool {
        let candidate = match self.find(tokens) {
            Some(candidate) => candidate,
            None => return false,
        };
        let (first, last) = match (candidate.positions.first(), candidate.positions.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return false,
        };
        debug!(
            anchor = %candidate.anchor,
            canon = %candidate.rule.canon,
            first,
            last,
            "span match"
        );
        SwapBuilder::new(self.ontology).replace_range(
            tokens,
            first..last + 1,
            &candidate.rule.canon,
            SwapType::Span,
        )
    }
}

/// Prefer the canon with the most underscore-separated parts; the first
/// candidate wins ties.
fn select_most_specific(candidates: Vec<SpanCandidate>) -> Option<SpanCandidate> {
    let mut best: Option<(usize, SpanCandidate)> = None;
    for candidate in candidates {
        let parts = candidate.rule.canon.matches('_').count();
        match &best {
            Some((best_parts, _)) if *best_parts >= parts => {}
            _ => best = Some((parts, candidate)),
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Nearest occurrence of `term` around `anchor_at`, honouring the rule's
/// direction flags. Ties go to the earlier position.
fn nearest(tokens: &[Token], term: &str, anchor_at: usize, rule: &SpanRule) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(idx, token)| *idx != anchor_at && token.normal() == term)
        .map(|(idx, _)| idx)
        .filter(|idx| (*idx > anchor_at && rule.forward) || (*idx < anchor_at && rule.reverse))
        .min_by_key(|idx| (idx.abs_diff(anchor_at), *idx))
}

fn locate(tokens: &[Token], candidate: &SpanCandidate) -> Option<Vec<usize>> {
    let anchors = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.normal() == candidate.anchor)
        .map(|(idx, _)| idx);

    'anchor: for anchor_at in anchors {
        let mut positions = vec![anchor_at];
        for term in candidate.terms.iter().filter(|term| **term != candidate.anchor) {
            match nearest(tokens, term, anchor_at, &candidate.rule) {
                Some(idx) => positions.push(idx),
                None => continue 'anchor,
            }
        }
        positions.sort_unstable();
        positions.dedup();

        let within = positions
            .windows(2)
            .all(|pair| pair[1] - pair[0] - 1 <= candidate.rule.distance);
        if within {
            return Some(positions);
        }
    }
    None
}
