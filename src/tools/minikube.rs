use super::{exec, probe};
use crate::error::{MnqnError, Result};
use crate::traits::LocalCluster;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

const TOOL: &str = "minikube";

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"minikube version: v(\d+\.\d+\.\d+)").expect("Invalid regex pattern")
});

static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(host|kubelet|apiserver):\s*(\S+)").expect("Invalid regex pattern")
});

const REQUIRED_COMPONENTS: [&str; 3] = ["host", "kubelet", "apiserver"];

pub struct Minikube {
    binary: String,
    minimum: Version,
}

impl Default for Minikube {
    fn default() -> Self {
        Self {
            binary: TOOL.to_string(),
            minimum: Version::new(1, 0, 0),
        }
    }
}

/// Components from `minikube status` output that are not `Running`.
pub fn stopped_components(status: &str) -> Vec<String> {
    REQUIRED_COMPONENTS
        .iter()
        .filter(|component| {
            !COMPONENT_RE
                .captures_iter(status)
                .any(|c| &c[1] == **component && &c[2] == "Running")
        })
        .map(|component| component.to_string())
        .collect()
}

impl LocalCluster for Minikube {
    fn check_installed(&self) -> Result<String> {
        probe::check_version(TOOL, &self.binary, &["version"], &VERSION_RE, &self.minimum)
    }

    fn check_running(&self) -> Result<()> {
        let program = probe::locate(TOOL, &self.binary)?;
        let captured = exec::run(
            &program.to_string_lossy(),
            &["status".to_string()],
            None,
            exec::PROBE_TIMEOUT,
        )?;

        if !captured.success() {
            let code = captured
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "none".to_string());
            return Err(MnqnError::DependencyNotReady {
                tool: TOOL.to_string(),
                reason: format!(
                    "cluster is not running (status code {}): {}",
                    code,
                    captured.diagnostics()
                ),
            });
        }

        let stopped = stopped_components(&captured.stdout);
        if !stopped.is_empty() {
            return Err(MnqnError::DependencyNotReady {
                tool: TOOL.to_string(),
                reason: format!("cluster is not running: {} not ready", stopped.join(", ")),
            });
        }
        Ok(())
    }
}
