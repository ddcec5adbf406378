//! Conformance test fixture runner.
//!
//! Loads YAML fixtures and runs them through the full resolution pipeline,
//! asserting on the mode and the bit-exact rendered target. Fixtures are
//! black-box: they exercise only the public `resolve_and_route_with` entry
//! point, same as every real entry adapter.

use loqr::prelude::*;
use serde::Deserialize;

use crate::sample_registry;

/// A complete test fixture.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    /// Inline registry entities; omitted means the shared sample registry.
    #[serde(default)]
    pub registry: Option<Vec<LocationEntity>>,
    pub cases: Vec<TestCase>,
}

/// One input → expected decision case.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    /// The raw query as the user would submit it.
    pub input: String,
    /// Listing toggle; defaults to sale.
    #[serde(default)]
    pub listing: ListingType,
    pub expect: Expectation,
}

/// Expected decision fields.
#[derive(Debug, Deserialize)]
pub struct Expectation {
    pub mode: RenderMode,
    /// The bit-exact rendered target URL.
    pub target: String,
    /// Slug of the expected matched entity; omit to skip the assertion.
    #[serde(default)]
    pub matched_slug: Option<String>,
}

/// Result of running a single case.
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

impl Fixture {
    /// Parse a fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns the underlying YAML error if the document is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators.
    ///
    /// # Errors
    ///
    /// Returns the underlying YAML error if any document is malformed.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the registry snapshot this fixture runs against.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        match &self.registry {
            Some(entities) => RegistrySnapshot::build(entities.clone()),
            None => sample_registry(),
        }
    }

    /// Run all cases and return results.
    #[must_use]
    pub fn run(&self) -> Vec<CaseResult> {
        let snapshot = self.snapshot();
        self.cases
            .iter()
            .map(|case| {
                let decision = resolve_and_route_with(&case.input, &snapshot, case.listing);
                let actual_target = decision.target.render();
                let actual_slug = decision.matched.as_ref().map(|e| e.slug.clone());

                let mode_ok = decision.mode == case.expect.mode;
                let target_ok = actual_target == case.expect.target;
                let slug_ok = match &case.expect.matched_slug {
                    Some(expected) => actual_slug.as_deref() == Some(expected.as_str()),
                    None => true,
                };

                CaseResult {
                    case_name: case.name.clone(),
                    passed: mode_ok && target_ok && slug_ok,
                    expected: format!("{} {}", case.expect.mode, case.expect.target),
                    actual: format!("{} {}", decision.mode, actual_target),
                }
            })
            .collect()
    }

    /// Run all cases, panicking with a readable report on the first failure.
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "fixture \"{}\" case \"{}\":\n  expected: {}\n  actual:   {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_runs_inline_fixture() {
        let yaml = r#"
name: smoke
description: inline fixture smoke test
cases:
  - name: city hit
    input: "durban"
    expect:
      mode: srp
      target: "/property-for-sale?city=durban"
      matched_slug: durban
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        fixture.run_and_assert();
    }

    #[test]
    fn inline_registry_overrides_sample() {
        let yaml = r#"
name: custom registry
description: one-province registry
registry:
  - id: p1
    kind: province
    name: Teststate
cases:
  - name: province hit
    input: "teststate"
    expect:
      mode: seo
      target: "/property-for-sale/teststate"
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        fixture.run_and_assert();
    }

    #[test]
    fn multi_document_parsing() {
        let yaml = r#"
name: first
description: one
cases: []
---
name: second
description: two
cases: []
"#;
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[1].name, "second");
    }

    #[test]
    fn failing_case_is_reported_not_hidden() {
        let yaml = r#"
name: failing
description: wrong expectation
cases:
  - name: wrong target
    input: "durban"
    expect:
      mode: seo
      target: "/property-for-sale/durban"
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let results = fixture.run();
        assert!(!results[0].passed);
    }
}
