use crate::types::ContractArtifact;
use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of compiled contract artifacts.
pub trait ArtifactLoader {
    fn load(&self, contract: &str) -> Result<ContractArtifact>;
}

/// Loads artifacts from a forge `out/` directory.
#[derive(Debug, Clone)]
pub struct FileSystemArtifactLoader {
    out_dir: PathBuf,
}

/// The slice of a forge artifact this tool reads.
#[derive(Deserialize)]
struct RawArtifact {
    #[serde(rename = "methodIdentifiers")]
    method_identifiers: serde_json::Map<String, serde_json::Value>,
}

impl FileSystemArtifactLoader {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    /// Forge writes artifacts under `out/<FileName>.sol/<ContractName>.json`;
    /// contracts are assumed to live in a file of the same name.
    pub fn artifact_path(&self, contract: &str) -> PathBuf {
        self.out_dir
            .join(format!("{contract}.sol"))
            .join(format!("{contract}.json"))
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl ArtifactLoader for FileSystemArtifactLoader {
    fn load(&self, contract: &str) -> Result<ContractArtifact> {
        let path = self.artifact_path(contract);
        let contents = fs::read_to_string(&path)
            .wrap_err_with(|| format!("cannot read artifact for {contract}: {}", path.display()))?;
        let raw: RawArtifact = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse artifact {}", path.display()))?;

        tracing::debug!(
            contract,
            functions = raw.method_identifiers.len(),
            "loaded artifact"
        );

        Ok(ContractArtifact {
            name: contract.to_string(),
            signatures: raw.method_identifiers.into_iter().map(|(sig, _)| sig).collect(),
        })
    }
}
