//! Fixture file loading.

use crate::{parse_fixture, SpecError, VocabularyFixture};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> Result<VocabularyFixture, SpecError> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&content).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load every `.toml` fixture under `dir`, keyed and ordered by path
/// relative to `dir`. A missing directory yields no fixtures.
pub fn load_all_fixtures(dir: &Path) -> Result<Vec<(String, VocabularyFixture)>, SpecError> {
    let mut paths = fixture_paths(dir)?;
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let name = path
                .strip_prefix(dir)
                .unwrap_or(&path)
                .display()
                .to_string();
            load_fixture(&path).map(|fixture| (name, fixture))
        })
        .collect()
}

fn fixture_paths(root: &Path) -> Result<Vec<PathBuf>, SpecError> {
    let read_error = |dir: &Path, e: std::io::Error| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        if !dir.is_dir() {
            continue;
        }
        for entry in fs::read_dir(&dir).map_err(|e| read_error(&dir, e))? {
            let path = entry.map_err(|e| read_error(&dir, e))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                found.push(path);
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[vocabulary]
geometry = []

[[case]]
input = "geometry"
expect = ["geometry"]
"#;

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("end-to-end.toml");
        let fixture = load_fixture(&path).unwrap();
        assert!(fixture.title.is_some());
    }

    #[test]
    fn test_load_all_fixtures() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures = load_all_fixtures(&dir).unwrap();
        assert!(fixtures.len() >= 5);
    }

    #[test]
    fn walks_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.toml"), MINIMAL).unwrap();
        fs::write(dir.path().join("nested").join("a.toml"), MINIMAL).unwrap();
        fs::write(dir.path().join("notes.md"), "not a fixture").unwrap();

        let names: Vec<String> = load_all_fixtures(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name.replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["b.toml", "nested/a.toml"]);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_fixture(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SpecError::Load { .. }));
        assert!(load_all_fixtures(&dir.path().join("absent")).unwrap().is_empty());
    }
}
