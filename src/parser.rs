//! Text-in/text-out wrapper around the matching pipeline.

use crate::config::MatcherConfig;
use crate::errors::MatchResult;
use crate::pipeline::{Pipeline, PipelineOutput};
use crate::span::{AcceptAll, SpanContextCheck};
use crate::token::Token;
use crate::tokenize::tokenize;
use ontoswap_mda::{FactSource, GeneratorConfig, Mda, MdaGenerator, Ontology};

/// Owns one ontology and matches text or tokens against it.
///
/// ```
/// use ontoswap::OntologyParser;
/// use ontoswap_mda::OntologyFacts;
///
/// let facts = OntologyFacts::new().entity("geometry").entity("abstract_algebra");
/// let parser = OntologyParser::from_facts(&facts).unwrap();
///
/// assert_eq!(
///     parser.parse("I studied Abstract Algebra today").unwrap(),
///     "I studied abstract_algebra today"
/// );
/// ```
pub struct OntologyParser {
    ontology: Ontology,
    config: MatcherConfig,
    context: Box<dyn SpanContextCheck>,
}

impl OntologyParser {
    pub fn new(mda: Mda) -> MatchResult<Self> {
        Ok(Self {
            ontology: Ontology::new(mda)?,
            config: MatcherConfig::default(),
            context: Box::new(AcceptAll),
        })
    }

    /// Generate the artifact from live facts. The span distance comes from
    /// `SPAN_DISTANCE` when set; use [`OntologyParser::from_facts_with`] to
    /// pin it.
    pub fn from_facts(source: &impl FactSource) -> MatchResult<Self> {
        Self::from_facts_with(source, GeneratorConfig::from_env()?)
    }

    pub fn from_facts_with(
        source: &impl FactSource,
        config: GeneratorConfig,
    ) -> MatchResult<Self> {
        Self::new(MdaGenerator::new(config).generate(source)?)
    }

    pub fn with_config(mut self, config: MatcherConfig) -> MatchResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_context_check(mut self, context: impl SpanContextCheck + 'static) -> Self {
        self.context = Box::new(context);
        self
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The artifact, for persistence.
    pub fn mda(&self) -> &Mda {
        self.ontology.mda()
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::standard(&self.ontology, self.config).with_context_check(self.context.as_ref())
    }

    /// Match pre-tokenized input.
    pub fn swap_input_tokens(&self, tokens: Vec<Token>) -> MatchResult<Vec<Token>> {
        self.pipeline().swap(tokens, 0)
    }

    /// Match pre-tokenized input and report what each pass did.
    pub fn swap_input_tokens_with_report(
        &self,
        tokens: Vec<Token>,
    ) -> MatchResult<PipelineOutput> {
        self.pipeline().run(tokens)
    }

    /// Tokenize and match. `None` when the text holds no tokens.
    pub fn swap_input_text(&self, text: &str) -> MatchResult<Option<Vec<Token>>> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(None);
        }
        self.swap_input_tokens(tokens).map(Some)
    }

    /// Rewrite `text`, replacing each match with its canon. Text without
    /// tokens comes back unchanged.
    pub fn parse(&self, text: &str) -> MatchResult<String> {
        let tokens = match self.swap_input_text(text)? {
            Some(tokens) => tokens,
            None => return Ok(text.to_string()),
        };

        let parts: Vec<&str> = tokens
            .iter()
            .map(|token| match token.canon() {
                Some(canon) => canon,
                None => token.text().trim(),
            })
            .filter(|part| !part.is_empty())
            .collect();
        Ok(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoswap_mda::OntologyFacts;

    fn parser() -> OntologyParser {
        OntologyParser::from_facts(
            &OntologyFacts::new()
                .entity("geometry")
                .variants("modern_world_history", ["Modern World Hist"]),
        )
        .unwrap()
    }

    #[test]
    fn empty_text_is_not_an_error() {
        let parser = parser();
        assert_eq!(parser.swap_input_text("").unwrap(), None);
        assert_eq!(parser.swap_input_text("   ").unwrap(), None);
        assert_eq!(parser.parse("   ").unwrap(), "   ");
    }

    #[test]
    fn parse_joins_canons_and_text() {
        let parser = parser();
        assert_eq!(
            parser.parse("for Input Text: MODERN WORLD HIST S1").unwrap(),
            "for Input Text : modern_world_history S1"
        );
        assert_eq!(parser.parse("nothing to see").unwrap(), "nothing to see");
    }

    #[test]
    fn config_is_validated() {
        let err = parser()
            .with_config(MatcherConfig::default().with_hierarchy_window(0))
            .err()
            .unwrap();
        assert!(err.to_string().contains("hierarchy_window"));
    }

    #[test]
    fn report_counts_passes() {
        let parser = parser().with_config(MatcherConfig::default().with_max_depth(0)).unwrap();
        let output = parser
            .swap_input_tokens_with_report(tokenize("geometry"))
            .unwrap();
        assert_eq!(output.passes.len(), 1);
        assert_eq!(output.passes[0].exact_swaps, 1);
    }
}
