//! Materializes swap tokens and splices them into a token stream.

use crate::token::{SwapToken, SwapType, Token};
use ontoswap_mda::Ontology;
use std::ops::Range;
use tracing::debug;

/// Shared by every matcher so swaps are built the same way.
#[derive(Debug, Clone, Copy)]
pub struct SwapBuilder<'a> {
    ontology: &'a Ontology,
}

impl<'a> SwapBuilder<'a> {
    pub fn new(ontology: &'a Ontology) -> Self {
        Self { ontology }
    }

    /// A swap subsuming `constituents`, or `None` when there are none.
    pub fn build(
        &self,
        constituents: Vec<Token>,
        canon: &str,
        swap_type: SwapType,
    ) -> Option<Token> {
        let id = constituents.first()?.id();
        let text = constituents
            .iter()
            .map(Token::text)
            .collect::<Vec<_>>()
            .join(" ");

        Some(Token::Matched(SwapToken {
            id,
            text,
            canon: canon.to_string(),
            swap_type,
            constituents,
            ner: self.ontology.find_ner(canon).map(String::from),
        }))
    }

    /// Replace `tokens[range]` with one swap. Empty or out of bounds ranges
    /// leave the stream untouched and return `false`.
    pub fn replace_range(
        &self,
        tokens: &mut Vec<Token>,
        range: Range<usize>,
        canon: &str,
        swap_type: SwapType,
    ) -> bool {
        if range.start >= range.end || range.end > tokens.len() {
            return false;
        }
        let start = range.start;
        let constituents: Vec<Token> = tokens.drain(range).collect();
        match self.build(constituents, canon, swap_type) {
            Some(swap) => {
                debug!(canon, %swap_type, text = swap.text(), "swapped tokens");
                tokens.insert(start, swap);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoswap_mda::{MdaGenerator, OntologyFacts};

    fn ontology() -> Ontology {
        let facts = OntologyFacts::new()
            .entity("abstract_algebra")
            .ner("abstract_algebra", "SUBJECT");
        Ontology::new(MdaGenerator::default().generate(&facts).unwrap()).unwrap()
    }

    fn tokens(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(id, word)| Token::plain(id, *word))
            .collect()
    }

    #[test]
    fn splices_range() {
        let onto = ontology();
        let mut stream = tokens(&["I", "like", "Abstract", "Algebra", "!"]);

        assert!(SwapBuilder::new(&onto).replace_range(
            &mut stream,
            2..4,
            "abstract_algebra",
            SwapType::Exact
        ));

        let normals: Vec<&str> = stream.iter().map(Token::normal).collect();
        assert_eq!(normals, vec!["i", "like", "abstract_algebra", "!"]);

        match &stream[2] {
            Token::Matched(swap) => {
                assert_eq!(swap.id, 2);
                assert_eq!(swap.text, "Abstract Algebra");
                assert_eq!(swap.constituents.len(), 2);
                assert_eq!(swap.ner.as_deref(), Some("SUBJECT"));
            }
            other => panic!("expected a swap, found {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_ranges() {
        let onto = ontology();
        let builder = SwapBuilder::new(&onto);
        let mut stream = tokens(&["abstract", "algebra"]);

        assert!(!builder.replace_range(&mut stream, 1..1, "abstract_algebra", SwapType::Exact));
        assert!(!builder.replace_range(&mut stream, 1..3, "abstract_algebra", SwapType::Exact));
        assert_eq!(stream, tokens(&["abstract", "algebra"]));
        assert!(builder.build(Vec::new(), "abstract_algebra", SwapType::Span).is_none());
    }
}
