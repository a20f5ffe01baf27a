use crate::types::{CoverageReport, CoverageResult};
use eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;

/// One results-file entry: `\n<Contract>: a, b, `.
pub fn render_entry(result: &CoverageResult) -> String {
    let mut entry = format!("\n{}: ", result.contract);
    for name in &result.uncovered {
        entry.push_str(name);
        entry.push_str(", ");
    }
    entry
}

/// Full results-file text, entries in report order.
pub fn render_uncovered(report: &CoverageReport) -> String {
    report.contracts.iter().map(render_entry).collect()
}

/// Console summary lines, `<Contract>: <covered>/<total>`.
pub fn summary_lines(report: &CoverageReport) -> Vec<String> {
    report.contracts.iter().map(ToString::to_string).collect()
}

/// Truncate and write the results file in one go.
pub fn write_uncovered(report: &CoverageReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("cannot create directory {}", parent.display()))?;
    }
    fs::write(path, render_uncovered(report))
        .wrap_err_with(|| format!("cannot write results file {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote uncovered functions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(contract: &str, total: usize, excluded: usize, uncovered: &[&str]) -> CoverageResult {
        CoverageResult {
            contract: contract.to_string(),
            total,
            excluded,
            uncovered: uncovered.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample() -> CoverageReport {
        CoverageReport {
            contracts: vec![
                result("ClearingHouse", 10, 4, &["settle", "safeTransferFrom"]),
                result("WithdrawProxy", 6, 6, &[]),
            ],
        }
    }

    #[test]
    fn entry_keeps_trailing_separator() {
        let entry = render_entry(&result("ILienToken", 3, 0, &["stopLiens", "makePayment"]));
        assert_eq!(entry, "\nILienToken: stopLiens, makePayment, ");
    }

    #[test]
    fn entry_without_uncovered_functions() {
        assert_eq!(render_entry(&result("IPublicVault", 2, 2, &[])), "\nIPublicVault: ");
    }

    #[test]
    fn one_entry_per_contract_in_order() {
        assert_eq!(
            render_uncovered(&sample()),
            "\nClearingHouse: settle, safeTransferFrom, \nWithdrawProxy: "
        );
    }

    #[test]
    fn summary_uses_total_minus_uncovered_over_total_minus_excluded() {
        assert_eq!(summary_lines(&sample()), ["ClearingHouse: 8/6", "WithdrawProxy: 6/0"]);
    }

    #[test]
    fn write_truncates_previous_results() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("coverage.txt");
        fs::write(&path, "stale contents from an older run").unwrap();

        write_uncovered(&sample(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render_uncovered(&sample()));
    }

    #[test]
    fn json_report_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["contracts"][0]["contract"], "ClearingHouse");
        assert_eq!(json["contracts"][0]["uncovered"][1], "safeTransferFrom");
        assert_eq!(json["contracts"][1]["excluded"], 6);
    }
}
