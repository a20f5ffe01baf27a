use serde::Serialize;
use std::fmt;

/// A contract's compiled interface, as far as coverage accounting cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    pub name: String,
    /// Canonical signatures (`transfer(address,uint256)`), in artifact order.
    pub signatures: Vec<String>,
}

/// Captured result of one test-suite run.
#[derive(Debug, Clone, Default)]
pub struct TestOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal or the output was
    /// read from a file.
    pub status: Option<i32>,
}

/// Top-level output: one entry per target contract, in target order.
#[derive(Debug, Default, Serialize)]
pub struct CoverageReport {
    pub contracts: Vec<CoverageResult>,
}

/// Per-contract coverage accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageResult {
    pub contract: String,
    pub total: usize,
    pub excluded: usize,
    pub uncovered: Vec<String>,
}

impl CoverageResult {
    /// Total functions minus the uncovered ones. Excluded functions are
    /// still counted here; they only come off the denominator.
    pub fn covered(&self) -> usize {
        self.total - self.uncovered.len()
    }

    pub fn denominator(&self) -> usize {
        self.total - self.excluded
    }
}

impl fmt::Display for CoverageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.contract, self.covered(), self.denominator())
    }
}
