//! Tokens flowing through the matching pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a swap was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapType {
    Exact,
    Span,
    Hierarchy,
}

impl fmt::Display for SwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SwapType::Exact => "exact",
            SwapType::Span => "span",
            SwapType::Hierarchy => "hierarchy",
        })
    }
}

/// An input unit that has not been matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainToken {
    pub id: usize,
    /// Surface text as it appeared in the input.
    pub text: String,
    /// Lowercased surface text.
    pub normal: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descendants: Vec<String>,
}

impl PlainToken {
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id,
            normal: text.to_lowercase(),
            text,
            ancestors: Vec::new(),
            descendants: Vec::new(),
        }
    }

    /// Carries hierarchy annotations.
    pub fn has_hierarchy(&self) -> bool {
        !self.ancestors.is_empty() || !self.descendants.is_empty()
    }
}

/// One or more tokens replaced by the entity they resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapToken {
    /// Id of the first constituent.
    pub id: usize,
    /// Constituent texts joined with spaces.
    pub text: String,
    pub canon: String,
    #[serde(rename = "type")]
    pub swap_type: SwapType,
    pub constituents: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ner: Option<String>,
}

impl SwapToken {
    /// Constituents at any depth that carry hierarchy annotations.
    pub fn has_hierarchy(&self) -> bool {
        self.constituents.iter().any(|token| match token {
            Token::Plain(plain) => plain.has_hierarchy(),
            Token::Matched(swap) => swap.has_hierarchy(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    Plain(PlainToken),
    Matched(SwapToken),
}

impl Token {
    /// A plain token whose `normal` is the lowercased `text`.
    pub fn plain(id: usize, text: impl Into<String>) -> Self {
        Token::Plain(PlainToken::new(id, text))
    }

    pub fn id(&self) -> usize {
        match self {
            Token::Plain(plain) => plain.id,
            Token::Matched(swap) => swap.id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Token::Plain(plain) => &plain.text,
            Token::Matched(swap) => &swap.text,
        }
    }

    /// Lowercased text of a plain token; the canon of a swap.
    pub fn normal(&self) -> &str {
        match self {
            Token::Plain(plain) => &plain.normal,
            Token::Matched(swap) => &swap.canon,
        }
    }

    pub fn canon(&self) -> Option<&str> {
        match self {
            Token::Plain(_) => None,
            Token::Matched(swap) => Some(&swap.canon),
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Token::Matched(_))
    }

    pub fn swap_type(&self) -> Option<SwapType> {
        match self {
            Token::Plain(_) => None,
            Token::Matched(swap) => Some(swap.swap_type),
        }
    }

    pub fn constituents(&self) -> &[Token] {
        match self {
            Token::Plain(_) => &[],
            Token::Matched(swap) => &swap.constituents,
        }
    }
}
