use super::{exec, probe};
use crate::error::{MnqnError, Result};
use crate::traits::ClusterControl;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

const TOOL: &str = "kubectl";

/// Matches both `Client Version: v1.29.0` and the older
/// `GitVersion:"v1.15.0"` layouts.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:GitVersion:"|Client Version: )v(\d+\.\d+\.\d+)"#)
        .expect("Invalid regex pattern")
});

pub struct Kubectl {
    binary: String,
    minimum: Version,
}

impl Default for Kubectl {
    fn default() -> Self {
        Self {
            binary: TOOL.to_string(),
            minimum: Version::new(1, 0, 0),
        }
    }
}

/// `kubectl config use-context` acknowledges with exactly this line.
pub fn switched_to(name: &str) -> String {
    format!("Switched to context \"{}\".", name)
}

impl ClusterControl for Kubectl {
    fn check_installed(&self) -> Result<String> {
        probe::check_version(TOOL, &self.binary, &["version", "--client"], &VERSION_RE, &self.minimum)
    }

    fn use_context(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(MnqnError::Validation("context name is required".to_string()));
        }

        let args = vec!["config".to_string(), "use-context".to_string(), name.to_string()];
        let captured = exec::run_checked(&self.binary, &args, None, exec::PROBE_TIMEOUT)?;

        let answer = captured.stdout.trim();
        if answer != switched_to(name) {
            return Err(MnqnError::Other(format!(
                "couldn't set context {}: {}",
                name, answer
            )));
        }
        Ok(())
    }
}
