use crate::config::TestCommand;
use crate::types::TestOutput;
use eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Run the test suite in `project_root` and capture its output.
///
/// Blocks until the process exits. A failing test run is not an error:
/// the report is built from whatever was printed.
pub fn run_tests(command: &TestCommand, project_root: &Path) -> Result<TestOutput> {
    tracing::info!(
        program = %command.program,
        args = ?command.args,
        "running test suite"
    );

    let output = Command::new(&command.program)
        .args(&command.args)
        .current_dir(project_root)
        .output()
        .wrap_err_with(|| {
            format!("failed to run `{}` (is it installed?)", command.program)
        })?;

    let captured = TestOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status.code(),
    };

    if !output.status.success() {
        tracing::warn!(
            status = ?captured.status,
            "test run exited unsuccessfully; reporting from captured output anyway"
        );
    }
    if !captured.stderr.is_empty() {
        tracing::debug!(stderr = %captured.stderr, "test run stderr");
    }

    Ok(captured)
}

/// Load previously captured test output instead of running the suite.
pub fn read_captured(path: &Path) -> Result<TestOutput> {
    let bytes = fs::read(path)
        .wrap_err_with(|| format!("cannot read test output: {}", path.display()))?;
    Ok(TestOutput {
        stdout: String::from_utf8_lossy(&bytes).into_owned(),
        ..TestOutput::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn captures_stdout_of_command() {
        let tmp = tempfile::tempdir().unwrap();
        let command = TestCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo testDeposit; echo oops >&2".to_string()],
        };
        let output = run_tests(&command, tmp.path()).unwrap();
        assert_eq!(output.stdout, "testDeposit\n");
        assert_eq!(output.stderr, "oops\n");
        assert_eq!(output.status, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn failing_test_run_is_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let command = TestCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo partial; exit 1".to_string()],
        };
        let output = run_tests(&command, tmp.path()).unwrap();
        assert_eq!(output.stdout, "partial\n");
        assert_eq!(output.status, Some(1));
    }

    #[test]
    fn missing_program_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let command = TestCommand {
            program: "definitely-not-a-real-test-runner".to_string(),
            args: Vec::new(),
        };
        assert!(run_tests(&command, tmp.path()).is_err());
    }

    #[test]
    fn reads_captured_output_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("forge-test.log");
        fs::write(&path, "[PASS] testTransfer()").unwrap();
        let output = read_captured(&path).unwrap();
        assert_eq!(output.stdout, "[PASS] testTransfer()");
        assert_eq!(output.status, None);
    }
}
