//! `deploy latest`: redeploy every declared dependency before the project.

use crate::cli::registry::Feature;
use crate::config::{ConfigFile, Dependency, DependencyKind, GlobalRegistry, ReleaseConfig};
use crate::context::Context;
use crate::error::{MnqnError, Result};
use crate::pipeline::{self, DeployPipeline};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Latest;

impl Feature for Latest {
    fn name(&self) -> &str {
        "latest"
    }

    fn about(&self) -> &str {
        "Before deploying, fetch the latest versions for all the project dependencies and redeploy it"
    }

    fn run(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<()> {
        let project_dir = ctx.settings().working_dir.clone();
        let descriptor = pipeline::load_descriptor(&project_dir)?;

        if descriptor.dependencies.is_empty() {
            writeln!(
                ctx,
                "No dependencies declared for \"{}\".",
                descriptor.project_name
            )?;
            return Ok(());
        }

        let registry = ConfigFile::<GlobalRegistry>::load(ctx.settings().global_config.clone())?
            .into_record();

        let mut dependencies = descriptor.dependencies.clone();
        for dep in &mut dependencies {
            bind(dep, &registry, &descriptor.release, &project_dir)?;
            dep.validate().map_err(|e| {
                MnqnError::Validation(format!("\"{}\" is not a valid dependency: {}", dep.name, e))
            })?;
        }

        for dep in &dependencies {
            writeln!(ctx, "Preparing {} dependency \"{}\".", dep.kind, dep.name)?;
            dep.prepare(ctx)
                .map_err(|e| e.in_stage(format!("dependency \"{}\"", dep.name)))?;
        }
        Ok(())
    }
}

/// Attach the prepare action matching the dependency's kind.
pub fn bind(
    dep: &mut Dependency,
    registry: &GlobalRegistry,
    release: &ReleaseConfig,
    project_dir: &Path,
) -> Result<()> {
    match dep.kind {
        DependencyKind::Project => {
            let project = registry.find(&dep.name).ok_or_else(|| {
                MnqnError::NotFound(format!(
                    "project \"{}\" is not registered: run `init` in its folder first",
                    dep.name
                ))
            })?;
            if project.path == project_dir {
                return Err(MnqnError::Validation(format!(
                    "project \"{}\" cannot depend on itself",
                    dep.name
                )));
            }

            let path: PathBuf = project.path.clone();
            dep.bind(move |ctx| DeployPipeline::new(path.clone()).run(ctx, |_| Ok(())));
        }
        DependencyKind::Service => {
            let release = release.clone();
            let dir = project_dir.to_path_buf();
            dep.bind(move |ctx| {
                let toolchain = ctx.toolchain();
                toolchain
                    .release
                    .update_dependencies(ctx.out(), &release, &dir)
            });
        }
    }
    Ok(())
}
