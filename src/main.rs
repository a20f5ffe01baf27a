mod artifact;
mod config;
mod coverage;
mod forge;
mod report;
mod types;

use artifact::FileSystemArtifactLoader;
use clap::Parser;
use config::{ConfigFile, CoverageConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "forge-fn-coverage",
    about = "Run forge tests and report which contract functions never show up in the test output."
)]
struct Cli {
    /// Foundry project root
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// TOML file with targets, excluded parents and paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Artifact directory (defaults to `out` from foundry.toml)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Where to write uncovered function names
    #[arg(long)]
    report: Option<PathBuf>,

    /// Contract to report on; repeat to replace the configured list
    #[arg(long = "target")]
    targets: Vec<String>,

    /// Parent contract whose functions are excluded; repeat to replace the configured list
    #[arg(long = "exclude-parent")]
    excluded_parents: Vec<String>,

    /// Use previously captured `forge test` output instead of running the suite
    #[arg(long)]
    test_output: Option<PathBuf>,

    /// Print the report as JSON instead of summary lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> eyre::Result<(CoverageConfig, Option<PathBuf>, bool)> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let mut config = CoverageConfig::resolve(&self.root, file);

        if let Some(out) = self.out {
            config.out_dir = out;
        }
        if let Some(report) = self.report {
            config.report_path = report;
        }
        if !self.targets.is_empty() {
            config.targets = self.targets;
        }
        if !self.excluded_parents.is_empty() {
            config.excluded_parents = self.excluded_parents;
        }

        Ok((config, self.test_output, self.json))
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.root.is_dir() {
        eyre::bail!("Project root not found: {}", cli.root.display());
    }
    let root = cli.root.clone();
    let (config, test_output, json) = cli.into_config()?;

    // Step 1: Run the test suite (or reuse its output)
    let output = match &test_output {
        Some(path) => forge::read_captured(path)?,
        None => forge::run_tests(&config.test_command, &root)?,
    };

    // Step 2: Classify every target's functions
    let loader = FileSystemArtifactLoader::new(&config.out_dir);
    tracing::debug!(out_dir = %loader.out_dir().display(), "reading artifacts");
    let report = coverage::build_report(&config, &loader, &output.stdout)?;

    // Step 3: Write uncovered names, then print the summary
    report::write_uncovered(&report, &config.report_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report::summary_lines(&report) {
            println!("{line}");
        }
    }

    Ok(())
}
