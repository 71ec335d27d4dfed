//! Runs the matching stages in order over a bounded number of passes.
//!
//! Each pass runs exact matching, span matching (only when the ontology has
//! span rules) and hierarchy augmentation. Later passes catch matches that
//! only appear once an earlier substitution has been made.

use crate::config::MatcherConfig;
use crate::errors::MatchResult;
use crate::exact::ExactMatcher;
use crate::hierarchy::HierarchyAugmenter;
use crate::span::{AcceptAll, SpanContextCheck, SpanMatcher};
use crate::token::Token;
use ontoswap_mda::Ontology;
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Exact,
    Span,
    Hierarchy,
}

/// What one pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub depth: usize,
    pub exact_swaps: usize,
    pub span_swaps: usize,
    pub hierarchy_candidates: usize,
}

impl PassReport {
    pub fn swaps(&self) -> usize {
        self.exact_swaps + self.span_swaps
    }
}

/// Result of one pipeline call. Nothing outlives the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub tokens: Vec<Token>,
    pub passes: Vec<PassReport>,
    /// Hierarchy candidate windows from the final pass.
    pub hierarchy_candidates: Vec<Range<usize>>,
}

pub struct Pipeline<'a> {
    ontology: &'a Ontology,
    config: MatcherConfig,
    stages: Vec<Stage>,
    context: &'a dyn SpanContextCheck,
}

impl<'a> Pipeline<'a> {
    /// Exact, span and hierarchy stages.
    pub fn standard(ontology: &'a Ontology, config: MatcherConfig) -> Self {
        Self::with_stages(
            ontology,
            config,
            vec![Stage::Exact, Stage::Span, Stage::Hierarchy],
        )
    }

    /// Exact matching only.
    pub fn exact_only(ontology: &'a Ontology, config: MatcherConfig) -> Self {
        Self::with_stages(ontology, config, vec![Stage::Exact])
    }

    pub fn with_stages(ontology: &'a Ontology, config: MatcherConfig, stages: Vec<Stage>) -> Self {
        Self {
            ontology,
            config,
            stages,
            context: &AcceptAll,
        }
    }

    pub fn with_context_check(mut self, context: &'a dyn SpanContextCheck) -> Self {
        self.context = context;
        self
    }

    /// Match `tokens` starting at pass `depth`. A depth at or beyond
    /// `max_depth` runs a single pass.
    pub fn swap(&self, tokens: Vec<Token>, depth: usize) -> MatchResult<Vec<Token>> {
        Ok(self.run_from(tokens, depth)?.tokens)
    }

    pub fn run(&self, tokens: Vec<Token>) -> MatchResult<PipelineOutput> {
        self.run_from(tokens, 0)
    }

    pub fn run_from(&self, tokens: Vec<Token>, depth: usize) -> MatchResult<PipelineOutput> {
        self.config.validate()?;

        let mut tokens = tokens;
        let mut passes = Vec::new();
        let mut hierarchy_candidates = Vec::new();

        for pass in depth..=self.config.max_depth.max(depth) {
            let mut report = PassReport {
                depth: pass,
                ..PassReport::default()
            };

            for stage in &self.stages {
                match stage {
                    Stage::Exact => {
                        let outcome = ExactMatcher::new(self.ontology, self.config.max_gram_size)
                            .process(tokens)?;
                        tokens = outcome.tokens;
                        report.exact_swaps = outcome.swaps;
                    }
                    Stage::Span => {
                        if !self.ontology.has_spans() {
                            continue;
                        }
                        let matcher =
                            SpanMatcher::new(self.ontology).with_context_check(self.context);
                        if matcher.process(&mut tokens) {
                            report.span_swaps += 1;
                        }
                    }
                    Stage::Hierarchy => {
                        hierarchy_candidates =
                            HierarchyAugmenter::new(self.ontology, self.config.hierarchy_window)
                                .process(&mut tokens);
                        report.hierarchy_candidates = hierarchy_candidates.len();
                    }
                }
            }

            debug!(
                depth = pass,
                exact = report.exact_swaps,
                span = report.span_swaps,
                hierarchy = report.hierarchy_candidates,
                "pipeline pass"
            );
            passes.push(report);
        }

        Ok(PipelineOutput {
            tokens,
            passes,
            hierarchy_candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MatchError;
    use ontoswap_mda::{MdaGenerator, OntologyFacts};

    fn research() -> Ontology {
        let facts = OntologyFacts::new()
            .synonym("research_methods", "research methods")
            .synonym("research_methods_statistics", "research methods statistics")
            .entity("statistics");
        Ontology::new(MdaGenerator::default().generate(&facts).unwrap()).unwrap()
    }

    fn tokens(text: &str) -> Vec<Token> {
        text.split_whitespace()
            .enumerate()
            .map(|(id, word)| Token::plain(id, word))
            .collect()
    }

    fn normals(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::normal).collect()
    }

    #[test]
    fn exact_then_span_in_one_pass() {
        let onto = research();
        let output = Pipeline::standard(&onto, MatcherConfig::default())
            .run(tokens("research methods and applied statistics"))
            .unwrap();

        assert_eq!(normals(&output.tokens), vec!["research_methods_statistics"]);
        assert_eq!(output.passes.len(), 3);
        assert_eq!(output.passes[0].exact_swaps, 2);
        assert_eq!(output.passes[0].span_swaps, 1);
        assert_eq!(output.passes[1].swaps(), 0);
        assert_eq!(output.passes[2].depth, 2);
    }

    #[test]
    fn saturated_depth_runs_one_pass() {
        let onto = research();
        let pipeline = Pipeline::standard(&onto, MatcherConfig::default());

        let output = pipeline.run_from(tokens("statistics"), 2).unwrap();
        assert_eq!(output.passes.len(), 1);

        let output = pipeline.run_from(tokens("statistics"), 7).unwrap();
        assert_eq!(output.passes.len(), 1);
        assert_eq!(output.passes[0].depth, 7);
    }

    #[test]
    fn later_passes_pick_up_new_spans() {
        let facts = OntologyFacts::new()
            .synonym("eye_injury", "eye+wound")
            .synonym("severe_eye_injury", "eye_injury+severe");
        let onto = Ontology::new(MdaGenerator::default().generate(&facts).unwrap()).unwrap();
        let pipeline = Pipeline::standard(&onto, MatcherConfig::default());

        let output = pipeline.run(tokens("wound to the eye was severe")).unwrap();
        assert_eq!(normals(&output.tokens), vec!["severe_eye_injury"]);
        assert_eq!(output.passes[0].span_swaps, 1);
        assert_eq!(output.passes[1].span_swaps, 1);

        let single = pipeline.swap(tokens("wound to the eye was severe"), 2).unwrap();
        assert_eq!(normals(&single), vec!["eye_injury", "was", "severe"]);
    }

    #[test]
    fn exact_only_skips_spans() {
        let onto = research();
        let output = Pipeline::exact_only(&onto, MatcherConfig::default())
            .run(tokens("research methods and applied statistics"))
            .unwrap();

        assert_eq!(
            normals(&output.tokens),
            vec!["research_methods", "and", "applied", "statistics"]
        );
        assert!(output.hierarchy_candidates.is_empty());
    }

    #[test]
    fn invalid_config_fails_before_matching() {
        let onto = research();
        let config = MatcherConfig::default().with_max_gram_size(0);
        let err = Pipeline::standard(&onto, config)
            .run(tokens("statistics"))
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig { field: "max_gram_size", .. }));
    }
}
