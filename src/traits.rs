//! Collaborator traits for dependency injection and testability
//!
//! The deployment pipeline never spawns processes itself. It talks to the
//! container builder, the release manager and the cluster tools through
//! these traits, bundled in a [`Toolchain`]. Production code uses the
//! implementations in [`crate::tools`]; tests swap in recording fakes.

use crate::config::{BuildConfig, ReleaseConfig};
use crate::error::Result;
use crate::vars::VarStore;
use std::io::Write;
use std::path::Path;

/// Builds the project image.
pub trait ImageBuilder {
    /// Build and tag the image from `project_dir`. The tag, name and version
    /// are read from `vars`.
    fn build(
        &self,
        out: &mut dyn Write,
        vars: &dyn VarStore,
        build: &BuildConfig,
        project_dir: &Path,
    ) -> Result<()>;
}

/// Chart-based release manager.
pub trait ReleaseManager {
    /// Installed version of the release manager found at `binary`.
    fn check_installed(&self, binary: &str) -> Result<String>;

    /// Install or upgrade the release. Returns the captured tool output.
    fn deploy(
        &self,
        out: &mut dyn Write,
        vars: &dyn VarStore,
        release: &ReleaseConfig,
        project_dir: &Path,
    ) -> Result<String>;

    /// Refresh the chart's own dependencies.
    fn update_dependencies(
        &self,
        out: &mut dyn Write,
        release: &ReleaseConfig,
        project_dir: &Path,
    ) -> Result<()>;
}

/// Cluster CLI used to pick the target context.
pub trait ClusterControl {
    fn check_installed(&self) -> Result<String>;
    fn use_context(&self, name: &str) -> Result<()>;
}

/// Local single-node cluster runtime.
pub trait LocalCluster {
    fn check_installed(&self) -> Result<String>;

    /// Installed is not enough; the cluster has to be up.
    fn check_running(&self) -> Result<()>;
}

/// All external collaborators of one CLI invocation.
pub struct Toolchain {
    pub builder: Box<dyn ImageBuilder>,
    pub release: Box<dyn ReleaseManager>,
    pub cluster: Box<dyn ClusterControl>,
    pub local_cluster: Box<dyn LocalCluster>,
}

impl Toolchain {
    pub fn new(
        builder: Box<dyn ImageBuilder>,
        release: Box<dyn ReleaseManager>,
        cluster: Box<dyn ClusterControl>,
        local_cluster: Box<dyn LocalCluster>,
    ) -> Self {
        Self {
            builder,
            release,
            cluster,
            local_cluster,
        }
    }

    /// docker, helm, kubectl and minikube from `PATH`.
    pub fn system() -> Self {
        Self {
            builder: Box::new(crate::tools::docker::Docker::default()),
            release: Box::new(crate::tools::helm::Helm::default()),
            cluster: Box::new(crate::tools::kubectl::Kubectl::default()),
            local_cluster: Box::new(crate::tools::minikube::Minikube::default()),
        }
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
pub(crate) mod fakes;
