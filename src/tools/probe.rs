//! Installed-version probing shared by the cluster tool implementations.

use super::exec;
use crate::error::{MnqnError, Result};
use regex::Regex;
use semver::Version;
use std::path::PathBuf;

/// Resolve `binary` on `PATH` (or as given, when it is a path).
pub fn locate(tool: &str, binary: &str) -> Result<PathBuf> {
    which::which(binary).map_err(|_| MnqnError::DependencyUnavailable {
        tool: tool.to_string(),
        reason: format!("\"{}\" is not installed or not in PATH", binary),
    })
}

/// First capture group of `pattern` in `output`, as a semantic version.
pub fn parse_version(pattern: &Regex, output: &str) -> Option<Version> {
    let raw = pattern.captures(output)?.get(1)?.as_str();
    Version::parse(raw).ok()
}

pub fn require_minimum(tool: &str, found: &Version, minimum: &Version) -> Result<()> {
    if found < minimum {
        return Err(MnqnError::DependencyUnavailable {
            tool: tool.to_string(),
            reason: format!("version v{} is installed, v{} or newer is required", found, minimum),
        });
    }
    Ok(())
}

/// Run the version command of `binary` and check the result against `minimum`.
///
/// Returns the detected version as `v<major>.<minor>.<patch>`.
pub fn check_version(
    tool: &str,
    binary: &str,
    args: &[&str],
    pattern: &Regex,
    minimum: &Version,
) -> Result<String> {
    let program = locate(tool, binary)?;
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

    let captured = exec::run(&program.to_string_lossy(), &args, None, exec::PROBE_TIMEOUT)?;
    if !captured.success() {
        return Err(MnqnError::DependencyUnavailable {
            tool: tool.to_string(),
            reason: format!("version check failed: {}", captured.diagnostics()),
        });
    }

    let version = parse_version(pattern, &captured.stdout).ok_or_else(|| {
        MnqnError::DependencyUnavailable {
            tool: tool.to_string(),
            reason: "could not detect installed version".to_string(),
        }
    })?;
    require_minimum(tool, &version, minimum)?;

    Ok(format!("v{}", version))
}
