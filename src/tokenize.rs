//! Minimal word-boundary tokenizer for the text-in/text-out wrapper.

use crate::token::Token;
use unicode_segmentation::UnicodeSegmentation;

/// Split on Unicode word boundaries, dropping whitespace. Ids count from 0.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_word_bounds()
        .filter(|segment| !segment.trim().is_empty())
        .enumerate()
        .map(|(id, segment)| Token::plain(id, segment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize(text).iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn splits_punctuation() {
        assert_eq!(
            texts("for Input Text: MODERN WORLD HIST S1"),
            vec!["for", "Input", "Text", ":", "MODERN", "WORLD", "HIST", "S1"]
        );
    }

    #[test]
    fn keeps_underscores_and_apostrophes_inside_words() {
        assert_eq!(
            texts("modern world_history, Crohn's"),
            vec!["modern", "world_history", ",", "Crohn's"]
        );
    }

    #[test]
    fn ids_and_normals() {
        let tokens = tokenize("  Abstract\tALGEBRA ");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].id(), 1);
        assert_eq!(tokens[1].normal(), "algebra");
        assert!(tokenize(" \n ").is_empty());
    }
}
