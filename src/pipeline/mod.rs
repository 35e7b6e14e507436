//! Deployment pipeline
//!
//! A fixed, linear sequence of stages. The first failing stage aborts the
//! run and its error is wrapped with the stage label; nothing is retried
//! and every run starts from the top with a fresh image version.

use crate::config::{BuildConfig, ConfigFile, LocalDescriptor, Record};
use crate::context::Context;
use crate::error::Result;
use crate::traits::Toolchain;
use crate::ui;
use crate::utils::paths;
use crate::vars::{self, VarStore, VariableStore};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SubDispatch,
    LoadDescriptor,
    CheckDependencies,
    SelectContext,
    GenerateTag,
    Build,
    Deploy,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::SubDispatch => "couldn't run sub-command",
            Stage::LoadDescriptor => "couldn't load local configuration",
            Stage::CheckDependencies => "global dependencies are not ready",
            Stage::SelectContext => "couldn't select cluster context",
            Stage::GenerateTag => "couldn't generate image tag",
            Stage::Build => "couldn't build image",
            Stage::Deploy => "couldn't deploy release",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

trait InStage<T> {
    fn in_stage(self, stage: Stage) -> Result<T>;
}

impl<T> InStage<T> for Result<T> {
    fn in_stage(self, stage: Stage) -> Result<T> {
        self.map_err(|e| e.in_stage(stage))
    }
}

/// Deploys the project found in `project_dir`.
#[derive(Debug, Clone)]
pub struct DeployPipeline {
    project_dir: PathBuf,
}

impl DeployPipeline {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Run every stage. `sub_dispatch` runs first; its failure aborts the
    /// run before the descriptor is even read.
    pub fn run<F>(&self, ctx: &mut Context<'_>, sub_dispatch: F) -> Result<()>
    where
        F: FnOnce(&mut Context<'_>) -> Result<()>,
    {
        sub_dispatch(ctx).in_stage(Stage::SubDispatch)?;

        writeln!(ctx, "Reading local configuration.")?;
        let descriptor = load_descriptor(&self.project_dir).in_stage(Stage::LoadDescriptor)?;
        writeln!(
            ctx,
            "Found local configuration for \"{}\".",
            descriptor.project_name
        )?;

        let toolchain = ctx.toolchain();

        writeln!(ctx, "Checking global dependencies.")?;
        check_dependencies(toolchain, &descriptor).in_stage(Stage::CheckDependencies)?;

        let kube_context = ctx.settings().kube_context.clone();
        writeln!(ctx, "Setting kubectl context to \"{}\".", kube_context)?;
        toolchain
            .cluster
            .use_context(&kube_context)
            .in_stage(Stage::SelectContext)?;

        writeln!(ctx, "Building image.")?;
        let build = generate_tag(&descriptor).in_stage(Stage::GenerateTag)?;

        let mut store = VariableStore::new();
        register_build_vars(&mut store, &build)
            .and_then(|_| {
                toolchain
                    .builder
                    .build(ctx.out(), &store, &build, &self.project_dir)
            })
            .in_stage(Stage::Build)?;

        writeln!(ctx, "Ready to deploy.")?;
        let release = descriptor.release.with_defaults();
        let output = toolchain
            .release
            .deploy(ctx.out(), &store, &release, &self.project_dir)
            .in_stage(Stage::Deploy)?;

        writeln!(ctx, "Deploying:")?;
        ui::separator(ctx.out())?;
        writeln!(ctx, "{}", output.trim_end())?;
        ui::separator(ctx.out())?;
        writeln!(ctx, "Successfully deployed!")?;
        Ok(())
    }
}

/// Read and validate the descriptor of `project_dir`. The file lock is
/// released as soon as the record is decoded.
pub fn load_descriptor(project_dir: &Path) -> Result<LocalDescriptor> {
    let descriptor = ConfigFile::<LocalDescriptor>::load(paths::local_config_file(project_dir))?
        .into_record();
    descriptor.validate()?;
    Ok(descriptor)
}

/// Installed tools at acceptable versions, and a running local cluster.
pub fn check_dependencies(toolchain: &Toolchain, descriptor: &LocalDescriptor) -> Result<()> {
    let kubectl = toolchain.cluster.check_installed()?;
    ui::debug(&format!("kubectl {}", kubectl));

    let helm = toolchain
        .release
        .check_installed(descriptor.release.binary())?;
    ui::debug(&format!("helm {}", helm));

    let minikube = toolchain.local_cluster.check_installed()?;
    ui::debug(&format!("minikube {}", minikube));

    toolchain.local_cluster.check_running()
}

/// Derive name and a fresh version for this run.
fn generate_tag(descriptor: &LocalDescriptor) -> Result<BuildConfig> {
    let mut build = descriptor.build.clone();
    build.generate_image_name(&descriptor.project_name)?;
    build.generate_version()?;
    build.image_tag()?;
    Ok(build)
}

fn register_build_vars(store: &mut dyn VarStore, build: &BuildConfig) -> Result<()> {
    store.register(vars::VAR_DOCKER_IMAGE_TAG, &build.image_tag()?)?;
    store.register(vars::VAR_DOCKER_IMAGE_VERSION, &build.image_version)?;
    store.register(vars::VAR_DOCKER_IMAGE_NAME, &build.image_name)
}
