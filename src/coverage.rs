use crate::artifact::ArtifactLoader;
use crate::config::CoverageConfig;
use crate::types::{ContractArtifact, CoverageReport, CoverageResult};
use eyre::Result;
use std::collections::HashSet;

/// Signature text before the first parenthesis: `transfer(address,uint256)`
/// becomes `transfer`.
pub fn bare_name(signature: &str) -> &str {
    signature.split('(').next().unwrap_or(signature)
}

/// Getters, `is*` checks and all-caps constants.
///
/// Plain prefix tests: `getter` and `island` match too.
pub fn is_boilerplate(name: &str) -> bool {
    name.starts_with("get") || name.starts_with("is") || name == name.to_uppercase()
}

/// Bare names inherited from excluded parent contracts.
#[derive(Debug, Default, Clone)]
pub struct ExclusionSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl ExclusionSet {
    pub fn from_parents(loader: &dyn ArtifactLoader, parents: &[String]) -> Result<Self> {
        let mut set = Self::default();
        for parent in parents {
            let artifact = loader.load(parent)?;
            set.extend_from(&artifact);
        }
        tracing::debug!(count = set.len(), names = ?set.names(), "built exclusion set");
        Ok(set)
    }

    pub fn extend_from(&mut self, artifact: &ContractArtifact) {
        for signature in &artifact.signatures {
            self.insert(bare_name(signature));
        }
    }

    pub fn insert(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Names in first-seen order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Classify every function of one contract against the test output.
pub fn analyze_contract(
    artifact: &ContractArtifact,
    exclusions: &ExclusionSet,
    test_stdout: &str,
) -> CoverageResult {
    let mut excluded = 0;
    let mut uncovered = Vec::new();

    for signature in &artifact.signatures {
        let name = bare_name(signature);
        if exclusions.contains(name) || is_boilerplate(name) {
            excluded += 1;
        } else if !test_stdout.contains(name) {
            uncovered.push(name.to_string());
        }
    }

    CoverageResult {
        contract: artifact.name.clone(),
        total: artifact.signatures.len(),
        excluded,
        uncovered,
    }
}

/// Build the report for every configured target, in target order.
///
/// Any artifact that fails to load aborts the whole report.
pub fn build_report(
    config: &CoverageConfig,
    loader: &dyn ArtifactLoader,
    test_stdout: &str,
) -> Result<CoverageReport> {
    let exclusions = ExclusionSet::from_parents(loader, &config.excluded_parents)?;

    let mut report = CoverageReport::default();
    for target in &config.targets {
        let artifact = loader.load(target)?;
        let result = analyze_contract(&artifact, &exclusions, test_stdout);
        tracing::debug!(
            contract = %result.contract,
            total = result.total,
            excluded = result.excluded,
            uncovered = result.uncovered.len(),
            "analyzed contract"
        );
        report.contracts.push(result);
    }

    Ok(report)
}
