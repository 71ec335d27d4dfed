//! Phrase tables grouped by word count.
//!
//! [`Trie`] nests multi-word entity phrases under their leading words.
//! [`build_lookup`] produces the flat per-level tables the exact matcher
//! filters candidate windows against.

use crate::synonyms::SynonymView;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Phrases per word count, longest first.
pub type GramLevels = BTreeMap<usize, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrieNode {
    /// Final words, longest first.
    Leaves(Vec<String>),
    /// Next word to the subtree of remaining words.
    Branch(BTreeMap<String, TrieNode>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trie {
    pub levels: BTreeMap<usize, TrieNode>,
}

fn longest_first(phrases: &mut Vec<String>) {
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    phrases.dedup();
}

/// Words of a phrase, treating underscores as spaces.
fn words(phrase: &str) -> Vec<&str> {
    phrase
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect()
}

fn group_level(phrases: Vec<Vec<&str>>) -> TrieNode {
    if phrases.iter().all(|words| words.len() <= 1) {
        let mut leaves: Vec<String> = phrases.into_iter().map(|words| words.join(" ")).collect();
        longest_first(&mut leaves);
        return TrieNode::Leaves(leaves);
    }

    let mut groups: BTreeMap<String, Vec<Vec<&str>>> = BTreeMap::new();
    for words in phrases {
        if let Some((first, rest)) = words.split_first() {
            groups.entry(first.to_string()).or_default().push(rest.to_vec());
        }
    }
    TrieNode::Branch(
        groups
            .into_iter()
            .map(|(first, rest)| (first, group_level(rest)))
            .collect(),
    )
}

impl Trie {
    /// Build from entity names or phrases.
    pub fn build<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|phrase| words(phrase.as_ref()).join(" "))
            .filter(|phrase| !phrase.is_empty())
            .collect();

        let mut by_size: BTreeMap<usize, Vec<Vec<&str>>> = BTreeMap::new();
        for phrase in &phrases {
            let words: Vec<&str> = phrase.split(' ').collect();
            by_size.entry(words.len()).or_default().push(words);
        }

        Trie {
            levels: by_size
                .into_iter()
                .map(|(size, phrases)| (size, group_level(phrases)))
                .collect(),
        }
    }

    pub fn has_level(&self, size: usize) -> bool {
        self.levels.contains_key(&size)
    }

    pub fn max_level(&self) -> usize {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    /// True when `phrase` (space or underscore separated) is stored.
    pub fn contains(&self, phrase: &str) -> bool {
        let words = words(phrase);
        let mut node = match self.levels.get(&words.len()) {
            Some(node) => node,
            None => return false,
        };
        for (idx, word) in words.iter().enumerate() {
            match node {
                TrieNode::Branch(children) => match children.get(*word) {
                    Some(next) => node = next,
                    None => return false,
                },
                TrieNode::Leaves(leaves) => {
                    return idx + 1 == words.len() && leaves.iter().any(|leaf| leaf == word);
                }
            }
        }
        false
    }
}

/// Every entity name (underscores as spaces) and every variant, grouped by
/// whitespace word count.
pub fn build_lookup(view: &SynonymView) -> GramLevels {
    let mut levels = GramLevels::new();
    let phrases = view
        .fwd
        .keys()
        .map(|entity| entity.replace('_', " "))
        .chain(view.rev.keys().cloned());
    for phrase in phrases {
        let size = phrase.split_whitespace().count();
        if size > 0 {
            levels.entry(size).or_default().push(phrase);
        }
    }
    for phrases in levels.values_mut() {
        longest_first(phrases);
    }
    levels
}

/// Entity names grouped by underscore-separated component count, `1..=max`.
pub fn build_ngrams<'a, I>(entities: I, max: usize) -> GramLevels
where
    I: IntoIterator<Item = &'a String>,
{
    let mut levels: GramLevels = (1..=max).map(|size| (size, Vec::new())).collect();
    for entity in entities {
        let size = entity.matches('_').count() + 1;
        if let Some(level) = levels.get_mut(&size) {
            level.push(entity.clone());
        }
    }
    for level in levels.values_mut() {
        level.sort();
        level.dedup();
    }
    levels
}
