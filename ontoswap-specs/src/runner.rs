//! Runs each fixture case through an ontology built from the fixture's
//! own vocabulary.

use crate::errors::{SpecError, SpecResult};
use crate::fixture::{Expectation, VocabularyFixture};
use ontoswap::{OntologyParser, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Mismatch { expected: String, actual: String },
    /// Matching itself failed.
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub input: String,
    pub outcome: CaseOutcome,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome == CaseOutcome::Passed
    }
}

/// Per-case results for one fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureReport {
    pub title: Option<String>,
    pub cases: Vec<CaseResult>,
}

impl FixtureReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Top-level normals of a matched stream.
fn normals(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|token| token.normal().to_string()).collect()
}

fn check(parser: &OntologyParser, input: &str, expectation: &Expectation) -> CaseOutcome {
    let actual = match expectation {
        Expectation::Normals(_) => parser
            .swap_input_text(input)
            .map(|tokens| Expectation::Normals(tokens.as_deref().map(normals).unwrap_or_default())),
        Expectation::Text(_) => parser.parse(input).map(Expectation::Text),
    };

    match actual {
        Ok(actual) if actual == *expectation => CaseOutcome::Passed,
        Ok(actual) => CaseOutcome::Mismatch {
            expected: expectation.to_string(),
            actual: actual.to_string(),
        },
        Err(e) => CaseOutcome::Error {
            message: e.to_string(),
        },
    }
}

/// Build the fixture's ontology and run every case against it.
pub fn run_fixture(fixture: &VocabularyFixture) -> SpecResult<FixtureReport> {
    let parser = OntologyParser::from_facts_with(&fixture.to_facts(), fixture.generator_config())
        .map_err(|e| SpecError::Build {
            message: e.to_string(),
        })?;

    let cases = fixture
        .cases
        .iter()
        .enumerate()
        .map(|(index, case)| {
            let outcome = match case.expectation() {
                Some(expectation) => check(&parser, &case.input, &expectation),
                None => CaseOutcome::Error {
                    message: "no expectation".to_string(),
                },
            };
            CaseResult {
                name: case.display_name(index),
                input: case.input.clone(),
                outcome,
            }
        })
        .collect();

    Ok(FixtureReport {
        title: fixture.title.clone(),
        cases,
    })
}
