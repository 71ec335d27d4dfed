//! The precomputed artifact and its generator.

use crate::config::GeneratorConfig;
use crate::errors::{MdaError, MdaResult};
use crate::facts::FactSource;
use crate::hierarchy::{build_adjacency, Adjacency};
use crate::spans::{generate_span_rules, SpanRules};
use crate::synonyms::generate_synonyms;
use crate::trie::{build_lookup, build_ngrams, GramLevels, Trie};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Highest n-gram level stored in [`Mda::ngrams`].
pub const MAX_NGRAM_LEVEL: usize = 9;

/// Predicates that never carry entity relations.
const IGNORED_PREDICATES: [&str; 2] = ["nil", "rdfs:comment"];

/// Synonym tables consumed at match time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymTables {
    pub fwd: BTreeMap<String, Vec<String>>,
    pub rev: BTreeMap<String, Vec<String>>,
    /// Known phrases per word count.
    pub lookup: GramLevels,
}

/// Everything the matching pipeline needs for one ontology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mda {
    pub children: Adjacency,
    pub parents: Adjacency,
    pub trie: Trie,
    pub ngrams: GramLevels,
    pub spans: SpanRules,
    pub labels: BTreeMap<String, String>,
    pub equivalents: Adjacency,
    pub predicates: Vec<String>,
    /// Predicate to subject to objects.
    pub by_predicate: BTreeMap<String, Adjacency>,
    pub ner: BTreeMap<String, String>,
    pub synonyms: SynonymTables,
}

impl Mda {
    pub fn to_json_string(&self) -> MdaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> MdaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_ron_string(&self) -> MdaResult<String> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(8)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    pub fn from_ron_str(ron: &str) -> MdaResult<Self> {
        Ok(ron::from_str(ron)?)
    }

    /// Write to `path`; RON when the extension is `ron`, JSON otherwise.
    pub fn save(&self, path: &Path) -> MdaResult<()> {
        let content = if is_ron(path) {
            self.to_ron_string()?
        } else {
            self.to_json_string()?
        };
        fs::write(path, content).map_err(|source| MdaError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read an artifact written by [`Mda::save`].
    pub fn load(path: &Path) -> MdaResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| MdaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if is_ron(path) {
            Self::from_ron_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }
}

fn is_ron(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "ron")
}

/// Builds an [`Mda`] from a [`FactSource`].
#[derive(Debug, Clone, Default)]
pub struct MdaGenerator {
    config: GeneratorConfig,
}

impl MdaGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generator configured from the environment (`SPAN_DISTANCE`).
    pub fn from_env() -> MdaResult<Self> {
        Ok(Self::new(GeneratorConfig::from_env()?))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, source: &impl FactSource) -> MdaResult<Mda> {
        self.config.validate()?;

        let raw = raw_synonyms(source);
        if raw.is_empty() {
            return Err(MdaError::EmptyOntology);
        }

        let view = generate_synonyms(&raw);
        let spans = generate_span_rules(&raw, &self.config);
        let trie = Trie::build(view.fwd.keys());
        let lookup = build_lookup(&view);
        let ngrams = build_ngrams(view.fwd.keys(), MAX_NGRAM_LEVEL);
        let (children, parents) = build_adjacency(&source.subclass_edges());
        let (predicates, by_predicate) = predicate_tables(source);

        debug!(
            entities = view.fwd.len(),
            variants = view.rev.len(),
            span_anchors = spans.len(),
            "generated artifact"
        );

        Ok(Mda {
            children,
            parents,
            trie,
            ngrams,
            spans,
            labels: source.labels(),
            equivalents: equivalents(source),
            predicates,
            by_predicate,
            ner: source.ner_tags(),
            synonyms: SynonymTables {
                fwd: view.fwd,
                rev: view.rev,
                lookup,
            },
        })
    }
}

/// Raw variants per entity, seeded with the entity's own spaced name so
/// entities without explicit synonyms are still recognized.
fn raw_synonyms(source: &impl FactSource) -> BTreeMap<String, Vec<String>> {
    let mut raw: BTreeMap<String, Vec<String>> = source
        .entities()
        .into_iter()
        .map(|entity| {
            let name = entity.replace('_', " ");
            (entity, vec![name])
        })
        .collect();

    for (entity, variants) in source.synonyms() {
        raw.entry(entity.clone())
            .or_insert_with(|| vec![entity.replace('_', " ")])
            .extend(variants);
    }
    raw
}

fn equivalents(source: &impl FactSource) -> Adjacency {
    let mut table: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (left, right) in source.equivalent_pairs() {
        if left == right {
            continue;
        }
        table.entry(left.clone()).or_default().insert(right.clone());
        table.entry(right).or_default().insert(left);
    }
    table
        .into_iter()
        .map(|(entity, others)| (entity, others.into_iter().collect()))
        .collect()
}

fn predicate_tables(source: &impl FactSource) -> (Vec<String>, BTreeMap<String, Adjacency>) {
    let mut tables: BTreeMap<String, BTreeMap<String, BTreeSet<String>>> = BTreeMap::new();
    for triple in source.predicate_triples() {
        if IGNORED_PREDICATES.contains(&triple.predicate.as_str()) {
            continue;
        }
        let subjects = tables.entry(triple.predicate).or_default();
        if triple.subject == "class" || triple.subject == triple.object {
            continue;
        }
        subjects
            .entry(triple.subject)
            .or_default()
            .insert(triple.object);
    }

    let predicates = tables.keys().cloned().collect();
    let by_predicate = tables
        .into_iter()
        .map(|(predicate, subjects)| {
            let subjects = subjects
                .into_iter()
                .map(|(subject, objects)| (subject, objects.into_iter().collect()))
                .collect();
            (predicate, subjects)
        })
        .collect();
    (predicates, by_predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::OntologyFacts;

    fn facts() -> OntologyFacts {
        OntologyFacts::new()
            .entity("geometry")
            .synonym("abstract_algebra", "Modern Algebra")
            .subclass_of("geometry", "mathematics")
            .subclass_of("abstract_algebra", "mathematics")
            .label("abstract_algebra", "Abstract Algebra")
            .equivalent("abstract_algebra", "modern_algebra")
            .triple("geometry", "requires", "algebra")
            .triple("geometry", "requires", "algebra")
            .triple("geometry", "requires", "geometry")
            .triple("class", "requires", "anything")
            .triple("geometry", "rdfs:comment", "shapes")
            .ner("geometry", "SUBJECT")
    }

    #[test]
    fn generates_every_table() {
        let mda = MdaGenerator::default().generate(&facts()).unwrap();

        assert_eq!(mda.children["mathematics"], vec!["abstract_algebra", "geometry"]);
        assert_eq!(mda.parents["geometry"], vec!["mathematics"]);
        assert_eq!(
            mda.synonyms.fwd["abstract_algebra"],
            vec!["modern algebra", "abstract algebra"]
        );
        assert_eq!(mda.synonyms.rev["geometry"], vec!["geometry"]);
        assert_eq!(mda.ngrams[&2], vec!["abstract_algebra", "modern_algebra"]);
        assert_eq!(mda.equivalents["modern_algebra"], vec!["abstract_algebra"]);
        assert_eq!(mda.labels["abstract_algebra"], "Abstract Algebra");
        assert_eq!(mda.ner["geometry"], "SUBJECT");
        assert_eq!(mda.predicates, vec!["requires"]);
        assert_eq!(mda.by_predicate["requires"].len(), 1);
        assert_eq!(mda.by_predicate["requires"]["geometry"], vec!["algebra"]);
        assert!(mda.spans.is_empty());
        assert!(mda.trie.contains("abstract algebra"));
    }

    #[test]
    fn empty_source_is_rejected() {
        let err = MdaGenerator::default()
            .generate(&OntologyFacts::new())
            .unwrap_err();
        assert!(matches!(err, MdaError::EmptyOntology));
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let generator = MdaGenerator::new(GeneratorConfig::default().with_span_distance(0));
        assert!(matches!(
            generator.generate(&facts()),
            Err(MdaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn json_and_ron_round_trip() {
        let mda = MdaGenerator::default()
            .generate(&facts().synonym("eye_injury", "eye+wound"))
            .unwrap();

        let json = mda.to_json_string().unwrap();
        assert_eq!(Mda::from_json_str(&json).unwrap(), mda);

        let ron = mda.to_ron_string().unwrap();
        assert_eq!(Mda::from_ron_str(&ron).unwrap(), mda);
    }

    #[test]
    fn save_and_load() {
        let mda = MdaGenerator::default().generate(&facts()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        for name in ["artifact.json", "artifact.ron"] {
            let path = dir.path().join(name);
            mda.save(&path).unwrap();
            assert_eq!(Mda::load(&path).unwrap(), mda);
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Mda::load(Path::new("/nonexistent/artifact.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to access artifact: /nonexistent/artifact.json"));
    }
}
