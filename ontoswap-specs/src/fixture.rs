//! Vocabulary fixtures: a small ontology plus the cases to run against it.
//!
//! ```toml
//! title = "Course names"
//! span_distance = 4
//!
//! [vocabulary]
//! abstract_algebra = []
//! modern_world_history = ["Modern World Hist"]
//!
//! [hierarchy]
//! abstract_algebra = ["mathematics"]
//!
//! [[case]]
//! input = "I studied abstract algebra today"
//! expect = ["i", "studied", "abstract_algebra", "today"]
//!
//! [[case]]
//! input = "Modern World Hist"
//! expect_text = "modern_world_history"
//! ```

use crate::errors::{SpecError, SpecResult};
use ontoswap_mda::{GeneratorConfig, OntologyFacts};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyFixture {
    #[serde(default)]
    pub title: Option<String>,
    /// Overrides the generator's default span distance.
    #[serde(default)]
    pub span_distance: Option<usize>,
    /// Entity to surface variants. The entity's own name is always a variant.
    #[serde(default)]
    pub vocabulary: BTreeMap<String, Vec<String>>,
    /// Child to parents.
    #[serde(default)]
    pub hierarchy: BTreeMap<String, Vec<String>>,
    #[serde(default, rename = "case")]
    pub cases: Vec<FixtureCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureCase {
    #[serde(default)]
    pub name: Option<String>,
    pub input: String,
    /// Expected top-level normals.
    #[serde(default)]
    pub expect: Option<Vec<String>>,
    /// Expected rewritten text.
    #[serde(default)]
    pub expect_text: Option<String>,
}

/// What a case checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Normals(Vec<String>),
    Text(String),
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Normals(normals) => write!(f, "[{}]", normals.join(", ")),
            Expectation::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl FixtureCase {
    /// `expect` wins when both are given.
    pub fn expectation(&self) -> Option<Expectation> {
        match (&self.expect, &self.expect_text) {
            (Some(normals), _) => Some(Expectation::Normals(normals.clone())),
            (None, Some(text)) => Some(Expectation::Text(text.clone())),
            (None, None) => None,
        }
    }

    /// Display name; unnamed cases are numbered from 1.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("case {}", index + 1),
        }
    }
}

impl VocabularyFixture {
    pub fn to_facts(&self) -> OntologyFacts {
        let facts = self
            .vocabulary
            .iter()
            .fold(OntologyFacts::new(), |facts, (entity, variants)| {
                facts.variants(entity, variants.iter().cloned())
            });
        self.hierarchy
            .iter()
            .flat_map(|(child, parents)| parents.iter().map(move |parent| (child, parent)))
            .fold(facts, |facts, (child, parent)| {
                facts.subclass_of(child.clone(), parent.clone())
            })
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        match self.span_distance {
            Some(distance) => GeneratorConfig::default().with_span_distance(distance),
            None => GeneratorConfig::default(),
        }
    }
}

/// Parse fixture TOML, rejecting cases with nothing to check.
pub fn parse_fixture(content: &str) -> SpecResult<VocabularyFixture> {
    let fixture: VocabularyFixture = toml::from_str(content).map_err(|e| SpecError::Parse {
        line: e
            .span()
            .map_or(0, |span| content[..span.start].matches('\n').count() + 1),
        message: e.message().to_string(),
    })?;

    for (index, case) in fixture.cases.iter().enumerate() {
        if case.expectation().is_none() {
            return Err(SpecError::Invalid {
                message: format!(
                    "{} has neither `expect` nor `expect_text`",
                    case.display_name(index)
                ),
            });
        }
    }
    Ok(fixture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoswap_mda::FactSource;

    #[test]
    fn reads_every_section() {
        let fixture = parse_fixture(
            r#"
title = "Courses"
span_distance = 2

[vocabulary]
abstract_algebra = []
modern_world_history = ["Modern World Hist", "MWH"]

[hierarchy]
abstract_algebra = ["mathematics", "algebra"]

[[case]]
name = "plain"
input = "abstract algebra"
expect = ["abstract_algebra"]

[[case]]
input = "MWH"
expect_text = "modern_world_history"
"#,
        )
        .unwrap();

        assert_eq!(fixture.title.as_deref(), Some("Courses"));
        assert_eq!(fixture.generator_config().span_distance, 2);
        assert_eq!(fixture.cases.len(), 2);
        assert_eq!(fixture.cases[1].display_name(1), "case 2");
        assert_eq!(
            fixture.cases[1].expectation(),
            Some(Expectation::Text("modern_world_history".into()))
        );

        let facts = fixture.to_facts();
        assert_eq!(
            facts.entities(),
            vec!["abstract_algebra", "algebra", "mathematics", "modern_world_history"]
        );
        assert_eq!(facts.subclass_edges().len(), 2);
        assert_eq!(
            facts.synonyms["modern_world_history"],
            vec!["Modern World Hist", "MWH"]
        );
    }

    #[test]
    fn syntax_errors_carry_a_line() {
        let err = parse_fixture("title = \"x\"\n\n[vocabulary\ngeometry = []\n").unwrap_err();
        assert!(matches!(err, SpecError::Parse { line: 3, .. }), "{:?}", err);
    }

    #[test]
    fn case_without_expectation_is_rejected() {
        let err = parse_fixture(
            r#"
[vocabulary]
geometry = []

[[case]]
input = "geometry"
"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid fixture: case 1 has neither `expect` nor `expect_text`"
        );
    }

    #[test]
    fn expectation_display() {
        assert_eq!(
            Expectation::Normals(vec!["i".into(), "abstract_algebra".into()]).to_string(),
            "[i, abstract_algebra]"
        );
        assert_eq!(Expectation::Text("a b".into()).to_string(), "\"a b\"");
    }
}
