use super::{exec, probe};
use crate::config::ReleaseConfig;
use crate::error::Result;
use crate::traits::ReleaseManager;
use crate::ui;
use crate::utils::paths;
use crate::vars::VarStore;
use regex::Regex;
use semver::Version;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

const TOOL: &str = "helm";

/// Helm 3 prints `Version:"v3.14.0"`, helm 2 `SemVer:"v2.16.1"`.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:SemVer|Version):"v(\d+\.\d+\.\d+)"#).expect("Invalid regex pattern")
});

pub struct Helm {
    minimum: Version,
}

impl Default for Helm {
    fn default() -> Self {
        Self {
            minimum: Version::new(3, 0, 0),
        }
    }
}

/// Arguments for `helm upgrade --install`, without the binary itself.
///
/// `release` must already carry its defaults (see
/// [`ReleaseConfig::with_defaults`]). Every configured value goes through
/// `vars` once, right here.
pub fn upgrade_args(release: &ReleaseConfig, vars: &dyn VarStore) -> Vec<String> {
    let mut args = vec![
        "upgrade".to_string(),
        "--install".to_string(),
        "--namespace".to_string(),
        vars.replace(&release.namespace),
    ];

    if !release.values_path.is_empty() {
        args.push("--values".to_string());
        args.push(vars.replace(&release.values_path));
    }

    for (key, value) in &release.set_overrides {
        args.push("--set".to_string());
        args.push(format!("{}={}", vars.replace(key), vars.replace(value)));
    }

    for (flag, value) in &release.extra_flags {
        args.push(vars.replace(flag));
        if !value.is_empty() {
            args.push(vars.replace(value));
        }
    }

    args.push(vars.replace(&release.release_name));
    args.push(vars.replace(&release.chart_path));
    args
}

impl ReleaseManager for Helm {
    fn check_installed(&self, binary: &str) -> Result<String> {
        probe::check_version(TOOL, binary, &["version"], &VERSION_RE, &self.minimum)
    }

    fn deploy(
        &self,
        _out: &mut dyn Write,
        vars: &dyn VarStore,
        release: &ReleaseConfig,
        project_dir: &Path,
    ) -> Result<String> {
        release.validate()?;
        let release = release.with_defaults();
        let args = upgrade_args(&release, vars);

        let captured = exec::run_checked(release.binary(), &args, Some(project_dir), exec::LONG_TIMEOUT)?;
        Ok(captured.stdout)
    }

    fn update_dependencies(
        &self,
        out: &mut dyn Write,
        release: &ReleaseConfig,
        project_dir: &Path,
    ) -> Result<()> {
        release.validate()?;
        paths::ensure_dir(project_dir, &release.chart_path)?;

        let args = vec![
            "dependency".to_string(),
            "update".to_string(),
            release.chart_path.clone(),
        ];
        let captured = exec::run_checked(release.binary(), &args, Some(project_dir), exec::LONG_TIMEOUT)?;

        if ui::is_verbose() {
            write!(out, "{}", captured.stdout)?;
        }
        Ok(())
    }
}
