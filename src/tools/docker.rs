use super::exec;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::traits::ImageBuilder;
use crate::ui;
use crate::utils::paths;
use crate::vars::{self, VarStore};
use std::io::Write;
use std::path::Path;

pub struct Docker {
    binary: String,
}

impl Default for Docker {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }
}

/// Arguments for `docker build`, tagged from the variable store.
pub fn build_args(build: &BuildConfig, vars: &dyn VarStore) -> Result<Vec<String>> {
    let tag = vars.var(vars::VAR_DOCKER_IMAGE_TAG)?;
    Ok(vec![
        "build".to_string(),
        "-t".to_string(),
        tag,
        "-f".to_string(),
        vars.replace(build.dockerfile()),
        ".".to_string(),
    ])
}

impl ImageBuilder for Docker {
    fn build(
        &self,
        out: &mut dyn Write,
        vars: &dyn VarStore,
        build: &BuildConfig,
        project_dir: &Path,
    ) -> Result<()> {
        paths::ensure_file(project_dir, &vars.replace(build.dockerfile()))?;
        let args = build_args(build, vars)?;

        writeln!(out, "Building:")?;
        ui::separator(out)?;

        let captured = exec::run_streaming_checked(
            &self.binary,
            &args,
            Some(project_dir),
            exec::LONG_TIMEOUT,
            out,
        )?;
        if ui::is_verbose() {
            write!(out, "{}", captured.stderr)?;
        }

        ui::separator(out)?;
        writeln!(out, "Successfully built!")?;
        Ok(())
    }
}
