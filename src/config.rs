use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TARGETS: &[&str] = &[
    "IAstariaRouter",
    "ClearingHouse",
    "ICollateralToken",
    "ILienToken",
    "IPublicVault",
    "IVaultImplementation",
    "WithdrawProxy",
];

/// Parents whose functions are inherited boilerplate for the targets.
pub const DEFAULT_EXCLUDED_PARENTS: &[&str] = &[
    "AuthInitializable",
    "Initializable",
    "AmountDeriver",
    "Clone",
    "IERC1155",
    "IERC721Receiver",
    "ERC721",
    "ZoneInterface",
    "IERC4626",
];

pub const DEFAULT_REPORT: &str = "coverage.txt";

/// Everything the reporter needs to know about a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageConfig {
    pub targets: Vec<String>,
    pub excluded_parents: Vec<String>,
    /// Forge artifact directory (`out/` by default).
    pub out_dir: PathBuf,
    pub report_path: PathBuf,
    pub test_command: TestCommand,
}

/// Program plus arguments used to run the test suite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for TestCommand {
    fn default() -> Self {
        Self {
            program: "forge".to_string(),
            args: ["test", "--ffi", "--no-match-contract", "ForkedTest", "-vvvvv"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            targets: owned_names(DEFAULT_TARGETS),
            excluded_parents: owned_names(DEFAULT_EXCLUDED_PARENTS),
            out_dir: PathBuf::from("out"),
            report_path: PathBuf::from(DEFAULT_REPORT),
            test_command: TestCommand::default(),
        }
    }
}

fn owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// On-disk shape of a `--config` TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub targets: Option<Vec<String>>,
    pub excluded_parents: Option<Vec<String>>,
    pub out: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub test_command: Option<TestCommand>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))
    }
}

impl CoverageConfig {
    /// Builds the config for a project rooted at `root`.
    ///
    /// Relative `out`/`report` paths from the file are taken relative to
    /// `root`. Without an explicit `out`, the artifact directory comes from
    /// `foundry.toml`.
    pub fn resolve(root: &Path, file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            targets: file.targets.unwrap_or(defaults.targets),
            excluded_parents: file.excluded_parents.unwrap_or(defaults.excluded_parents),
            out_dir: match file.out {
                Some(out) => root.join(out),
                None => parse_forge_out_dir(root),
            },
            report_path: root.join(file.report.unwrap_or(defaults.report_path)),
            test_command: file.test_command.unwrap_or(defaults.test_command),
        }
    }
}

/// Reads `[profile.default].out` from `foundry.toml`, falling back to `out/`.
pub fn parse_forge_out_dir(foundry_root: &Path) -> PathBuf {
    let toml_path = foundry_root.join("foundry.toml");
    if let Ok(contents) = fs::read_to_string(&toml_path) {
        if let Ok(value) = toml::from_str::<toml::Table>(&contents) {
            if let Some(out) = value
                .get("profile")
                .and_then(|p| p.get("default"))
                .and_then(|d| d.get("out"))
                .and_then(|o| o.as_str())
            {
                return foundry_root.join(out);
            }
        }
    }
    foundry_root.join("out")
}
