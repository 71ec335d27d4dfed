use crate::token::Token;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// A swap to underline: inclusive leaf range plus its label.
struct IncludedSwap {
    first_leaf: usize,
    last_leaf: usize,
    label: String,
}

/// Renders leaf tokens on one line and underlines every swap beneath them,
/// innermost first.
pub struct SwapDisplay<'a> {
    tokens: &'a [Token],
}

// 0, 1,       2,        3,       4,     - leaf indexes
// i  studied  abstract  algebra  today
//             ╰───────────────╯exact(abstract_algebra)
impl<'a> std::fmt::Display for SwapDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;

        let mut leaves = Vec::new();
        let mut swaps = Vec::new();
        for token in self.tokens {
            collect(token, &mut leaves, &mut swaps);
        }

        let mut leaf_idx_to_start_display_char_idx = Vec::new();
        let mut leaf_idx_to_end_display_char_idx = Vec::new();
        let mut opening_line = String::new();
        {
            // for skipping padding at beginning
            let mut is_first = true;
            for text in &leaves {
                if is_first {
                    is_first = false;
                } else {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }

                leaf_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
                opening_line.push_str(text);
                leaf_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
        }

        f.write_str(&opening_line)?;

        for swap in &swaps {
            f.write_char('\n')?;

            let start_char_idx = leaf_idx_to_start_display_char_idx[swap.first_leaf];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = leaf_idx_to_end_display_char_idx[swap.last_leaf];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&swap.label)?;
        }

        Ok(())
    }
}

/// Post-order walk: leaves in input order, inner swaps before outer ones.
fn collect<'t>(token: &'t Token, leaves: &mut Vec<&'t str>, swaps: &mut Vec<IncludedSwap>) {
    match token {
        Token::Plain(plain) => leaves.push(&plain.text),
        Token::Matched(swap) => {
            let first_leaf = leaves.len();
            for constituent in &swap.constituents {
                collect(constituent, leaves, swaps);
            }
            if leaves.len() > first_leaf {
                swaps.push(IncludedSwap {
                    first_leaf,
                    last_leaf: leaves.len() - 1,
                    label: format!("{}({})", swap.swap_type, swap.canon),
                });
            }
        }
    }
}

impl<'a> SwapDisplay<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        SwapDisplay { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OntologyParser;
    use ontoswap_mda::OntologyFacts;

    fn display(facts: OntologyFacts, text: &str) -> String {
        let parser = OntologyParser::from_facts(&facts).unwrap();
        let tokens = parser.swap_input_text(text).unwrap().unwrap_or_default();
        SwapDisplay::new(&tokens).to_string()
    }

    #[test]
    fn underlines_exact_swap() {
        let facts = OntologyFacts::new()
            .entity("geometry")
            .entity("abstract_algebra");

        insta::assert_snapshot!(display(facts, "i studied abstract algebra today"), @r###"
        i  studied  abstract  algebra  today
                    ╰───────────────╯exact(abstract_algebra)
        "###);
    }

    #[test]
    fn nested_swaps_render_inner_first() {
        let facts = OntologyFacts::new()
            .synonym("research_methods", "research methods")
            .synonym("research_methods_statistics", "research methods statistics")
            .entity("statistics");

        insta::assert_snapshot!(display(facts, "research methods in statistics"), @r###"
        research  methods  in  statistics
        ╰───────────────╯exact(research_methods)
                               ╰────────╯exact(statistics)
        ╰───────────────────────────────╯span(research_methods_statistics)
        "###);
    }

    #[test]
    fn single_character_swap() {
        let facts = OntologyFacts::new().entity("x");

        insta::assert_snapshot!(display(facts, "x y"), @r###"
        x  y
        ╰exact(x)
        "###);
    }
}
