pub mod survey;

use crate::cli::registry::Feature;
use crate::config::{ConfigFile, GlobalRegistry, LocalDescriptor, Project, Record};
use crate::context::Context;
use crate::error::{MnqnError, Result};
use crate::utils::paths;
use std::io::Write;
use std::path::Path;

pub struct Init;

impl Feature for Init {
    fn name(&self) -> &str {
        "init"
    }

    fn about(&self) -> &str {
        "Runs the survey to register the project \
         (it is presumed that the command is ran within the project root folder)"
    }

    fn run(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<()> {
        let project_dir = ctx.settings().working_dir.clone();
        let project_name = project_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let descriptor = local_descriptor(ctx, &project_dir, &project_name)
            .map_err(|e| e.in_stage("couldn't initialize local configuration"))?;

        let global_config = ctx.settings().global_config.clone();
        let mut registry = ConfigFile::<GlobalRegistry>::load(global_config)?;
        registry
            .register(Project::new(&descriptor.project_name, &project_dir))
            .map_err(|e| e.in_stage("couldn't register project to the configuration"))?;

        writeln!(
            ctx,
            "Project \"{}\" is successfully registered",
            descriptor.project_name
        )?;
        Ok(())
    }
}

/// Load the existing descriptor of `project_dir`, or survey and save one.
fn local_descriptor(
    ctx: &mut Context<'_>,
    project_dir: &Path,
    project_name: &str,
) -> Result<LocalDescriptor> {
    if project_name.is_empty() {
        return Err(MnqnError::Validation("project name is required".to_string()));
    }

    let path = paths::local_config_file(project_dir);
    if path.exists() {
        let descriptor = ConfigFile::<LocalDescriptor>::load(&path)?.into_record();
        descriptor.validate()?;
        return Ok(descriptor);
    }

    let (out, input) = ctx.streams();
    let descriptor = survey::run(out, input, project_dir, project_name)?;
    Ok(ConfigFile::create(&path, descriptor)?.into_record())
}
