//! Stage 1: longest-first exact phrase matching.

use crate::errors::{MatchError, MatchResult};
use crate::swap::SwapBuilder;
use crate::token::{SwapType, Token};
use ontoswap_mda::{normalize_phrase, Ontology};
use tracing::{debug, error};

/// Result of one exact stage run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactOutcome {
    pub tokens: Vec<Token>,
    pub swaps: usize,
}

/// Replaces contiguous windows whose joined text is a known phrase.
///
/// Gram sizes are tried from the largest down. After every swap the
/// descent restarts from the top on the updated stream, so overlapping
/// windows are never matched inconsistently.
#[derive(Debug, Clone, Copy)]
pub struct ExactMatcher<'a> {
    ontology: &'a Ontology,
    max_gram_size: usize,
}

fn joined_normal(window: &[Token]) -> String {
    window
        .iter()
        .map(Token::normal)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl<'a> ExactMatcher<'a> {
    pub fn new(ontology: &'a Ontology, max_gram_size: usize) -> Self {
        Self {
            ontology,
            max_gram_size,
        }
    }

    /// Start of the first window of `gram_size` tokens that is a known phrase.
    fn first_candidate(&self, tokens: &[Token], gram_size: usize) -> Option<usize> {
        tokens
            .windows(gram_size)
            .enumerate()
            .filter(|(_, window)| !(gram_size == 1 && window[0].is_matched()))
            .find(|(_, window)| {
                self.ontology
                    .is_known_phrase(gram_size, &joined_normal(window))
            })
            .map(|(start, _)| start)
    }

    fn resolve_canon(&self, phrase: &str) -> MatchResult<String> {
        let canon = self
            .ontology
            .find_canon(phrase)
            .or_else(|| self.ontology.find_canon(&normalize_phrase(phrase)));
        match canon {
            Some(canon) => Ok(canon.to_string()),
            None => {
                error!(phrase, "known phrase has no canonical entity");
                Err(MatchError::CanonNotFound {
                    phrase: phrase.to_string(),
                })
            }
        }
    }

    pub fn process(&self, tokens: Vec<Token>) -> MatchResult<ExactOutcome> {
        let builder = SwapBuilder::new(self.ontology);
        let mut tokens = tokens;
        let mut swaps = 0;

        'descent: loop {
            let top = self
                .max_gram_size
                .min(self.ontology.max_gram_level())
                .min(tokens.len());
            // joined words can normalize to a different word count
            let normalizable = tokens.iter().any(|token| {
                token.normal().contains(|c: char| c == '_' || c == '\'')
            });

            for gram_size in (1..=top).rev() {
                if !normalizable && !self.ontology.has_gram_level(gram_size) {
                    continue;
                }
                let start = match self.first_candidate(&tokens, gram_size) {
                    Some(start) => start,
                    None => continue,
                };

                let phrase = joined_normal(&tokens[start..start + gram_size]);
                let canon = self.resolve_canon(&phrase)?;
                debug!(gram_size, phrase = %phrase, canon = %canon, "exact match");
                let range = start..start + gram_size;
                if builder.replace_range(&mut tokens, range, &canon, SwapType::Exact) {
                    swaps += 1;
                    continue 'descent;
                }
            }

            return Ok(ExactOutcome { tokens, swaps });
        }
    }
}
