//! Stage 3: hierarchy augmentation and candidate filtering.
//!
//! Unmatched alphabetic tokens, and the plain constituents of swaps, get
//! their ancestor and descendant sets attached. Windows that carry
//! hierarchy information anywhere are then reported as candidates for
//! downstream inference; no canon is resolved here.

use crate::token::{SwapType, Token};
use ontoswap_mda::Ontology;
use std::ops::Range;

#[derive(Debug, Clone, Copy)]
pub struct HierarchyAugmenter<'a> {
    ontology: &'a Ontology,
    window: usize,
}

impl<'a> HierarchyAugmenter<'a> {
    pub fn new(ontology: &'a Ontology, window: usize) -> Self {
        Self { ontology, window }
    }

    /// Attach ancestors and descendants to alphabetic plain tokens, descending
    /// into swap constituents.
    pub fn augment(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut() {
            match token {
                Token::Plain(plain) => {
                    let alphabetic =
                        !plain.normal.is_empty() && plain.normal.chars().all(char::is_alphabetic);
                    if !alphabetic {
                        continue;
                    }
                    plain.ancestors = self.ontology.ancestors(&plain.normal).to_vec();
                    plain.descendants = self.ontology.descendants(&plain.normal).to_vec();
                }
                Token::Matched(swap) => self.augment(&mut swap.constituents),
            }
        }
    }

    fn carries_hierarchy(token: &Token) -> bool {
        match token {
            Token::Plain(plain) => plain.has_hierarchy(),
            Token::Matched(swap) => swap.swap_type != SwapType::Hierarchy && swap.has_hierarchy(),
        }
    }

    /// Sliding windows of the configured size holding at least one token with
    /// hierarchy information. A stream shorter than the window is one window.
    pub fn candidate_windows(&self, tokens: &[Token]) -> Vec<Range<usize>> {
        if tokens.is_empty() {
            return Vec::new();
        }
        let size = self.window.min(tokens.len()).max(1);
        (0..=tokens.len() - size)
            .map(|start| start..start + size)
            .filter(|range| tokens[range.clone()].iter().any(Self::carries_hierarchy))
            .collect()
    }

    /// Augment in place and return the candidate windows.
    pub fn process(&self, tokens: &mut [Token]) -> Vec<Range<usize>> {
        self.augment(tokens);
        self.candidate_windows(tokens)
    }
}
