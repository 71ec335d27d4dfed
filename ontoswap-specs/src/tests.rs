use crate::{format_report, format_summary, load_all_fixtures, parse_fixture, run_fixture};
use std::path::Path;

fn fixtures_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[test]
fn every_fixture_passes() {
    let fixtures = load_all_fixtures(&fixtures_dir()).unwrap();
    assert!(fixtures.len() >= 5);

    let reports: Vec<_> = fixtures
        .iter()
        .map(|(name, fixture)| (name.clone(), run_fixture(fixture).unwrap()))
        .collect();

    for (name, report) in &reports {
        assert!(report.is_success(), "{}", format_report(name, report));
    }
    assert!(format_summary(&reports).ends_with(", 0 failed"));
}

#[test]
fn fixtures_are_not_empty() {
    for (name, fixture) in load_all_fixtures(&fixtures_dir()).unwrap() {
        assert!(!fixture.cases.is_empty(), "{} has no cases", name);
        assert!(!fixture.vocabulary.is_empty(), "{} has no vocabulary", name);
    }
}

#[test]
fn failing_report() {
    let fixture = parse_fixture(
        r#"
title = "Broken"

[vocabulary]
geometry = []

[[case]]
name = "right"
input = "Geometry"
expect = ["geometry"]

[[case]]
input = "plane geometry"
expect = ["plane_geometry"]
"#,
    )
    .unwrap();
    let report = run_fixture(&fixture).unwrap();

    insta::assert_snapshot!(format_report("broken.toml", &report), @r###"
    FAIL: broken.toml (Broken)
      ✓ right
      ✗ case 2
          input:    plane geometry
          expected: [plane_geometry]
          found:    [plane, geometry]
      1 passed, 1 failed
    "###);
}

#[test]
fn summary_lists_each_fixture() {
    let pass = parse_fixture(
        r#"
[vocabulary]
geometry = []

[[case]]
input = "geometry"
expect = ["geometry"]
"#,
    )
    .unwrap();
    let fail = parse_fixture(
        r#"
[vocabulary]
geometry = []

[[case]]
input = "geometry"
expect_text = "Geometry"
"#,
    )
    .unwrap();

    let reports = vec![
        ("pass.toml".to_string(), run_fixture(&pass).unwrap()),
        ("fail.toml".to_string(), run_fixture(&fail).unwrap()),
    ];
    insta::assert_snapshot!(format_summary(&reports), @r###"
    PASS pass.toml (1/1)
    FAIL fail.toml (0/1)
    2 cases, 1 failed
    "###);
}
