//! Recording fakes of every collaborator, shared by unit tests.

use super::{ClusterControl, ImageBuilder, LocalCluster, ReleaseManager, Toolchain};
use crate::config::{BuildConfig, ConfigFile, LocalDescriptor, ReleaseConfig};
use crate::context::Settings;
use crate::error::{MnqnError, Result};
use crate::project_identity;
use crate::utils::paths;
use crate::vars::{self, VarStore};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Ordered log of collaborator calls.
#[derive(Clone, Default)]
pub(crate) struct Calls(Arc<Mutex<Vec<String>>>);

impl Calls {
    fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub(crate) fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn starting_with(&self, prefix: &str) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|call| call.starts_with(prefix))
            .collect()
    }
}

/// Which collaborator calls should fail.
#[derive(Clone, Copy, Default)]
pub(crate) struct Failures {
    pub kubectl_missing: bool,
    pub helm_missing: bool,
    pub minikube_missing: bool,
    pub minikube_stopped: bool,
    pub use_context: bool,
    pub build: bool,
    pub deploy: bool,
}

struct FakeBuilder(Calls, Failures);

impl ImageBuilder for FakeBuilder {
    fn build(
        &self,
        out: &mut dyn Write,
        vars: &dyn VarStore,
        build: &BuildConfig,
        project_dir: &Path,
    ) -> Result<()> {
        let tag = vars.var(vars::VAR_DOCKER_IMAGE_TAG)?;
        self.0.push(format!(
            "build {} {} {}",
            tag,
            build.dockerfile(),
            project_dir.display()
        ));
        if self.1.build {
            return Err(MnqnError::ExternalFailure {
                command: format!("docker build -t {}", tag),
                code: Some(1),
                diagnostics: "no space left on device".to_string(),
            });
        }
        writeln!(out, "built {}", tag)?;
        Ok(())
    }
}

struct FakeRelease(Calls, Failures);

impl ReleaseManager for FakeRelease {
    fn check_installed(&self, binary: &str) -> Result<String> {
        self.0.push(format!("check {}", binary));
        if self.1.helm_missing {
            return Err(MnqnError::DependencyUnavailable {
                tool: "helm".to_string(),
                reason: "\"helm\" is not installed or not in PATH".to_string(),
            });
        }
        Ok("v3.14.0".to_string())
    }

    fn deploy(
        &self,
        _out: &mut dyn Write,
        vars: &dyn VarStore,
        release: &ReleaseConfig,
        project_dir: &Path,
    ) -> Result<String> {
        self.0.push(format!(
            "deploy {} {} {} {} {}",
            vars.replace(&release.namespace),
            release.release_name,
            release.chart_path,
            vars.var(vars::VAR_DOCKER_IMAGE_VERSION)?,
            project_dir.display()
        ));
        if self.1.deploy {
            return Err(MnqnError::ExternalFailure {
                command: "helm upgrade --install".to_string(),
                code: Some(1),
                diagnostics: "UPGRADE FAILED".to_string(),
            });
        }
        Ok(format!("Release \"{}\" has been upgraded.", release.release_name))
    }

    fn update_dependencies(
        &self,
        _out: &mut dyn Write,
        release: &ReleaseConfig,
        project_dir: &Path,
    ) -> Result<()> {
        self.0.push(format!(
            "dependency update {} {}",
            release.chart_path,
            project_dir.display()
        ));
        Ok(())
    }
}

struct FakeCluster(Calls, Failures);

impl ClusterControl for FakeCluster {
    fn check_installed(&self) -> Result<String> {
        self.0.push("check kubectl".to_string());
        if self.1.kubectl_missing {
            return Err(MnqnError::DependencyUnavailable {
                tool: "kubectl".to_string(),
                reason: "\"kubectl\" is not installed or not in PATH".to_string(),
            });
        }
        Ok("v1.29.2".to_string())
    }

    fn use_context(&self, name: &str) -> Result<()> {
        self.0.push(format!("use-context {}", name));
        if self.1.use_context {
            return Err(MnqnError::Other(format!("couldn't set context {}", name)));
        }
        Ok(())
    }
}

struct FakeLocalCluster(Calls, Failures);

impl LocalCluster for FakeLocalCluster {
    fn check_installed(&self) -> Result<String> {
        self.0.push("check minikube".to_string());
        if self.1.minikube_missing {
            return Err(MnqnError::DependencyUnavailable {
                tool: "minikube".to_string(),
                reason: "\"minikube\" is not installed or not in PATH".to_string(),
            });
        }
        Ok("v1.32.0".to_string())
    }

    fn check_running(&self) -> Result<()> {
        self.0.push("status minikube".to_string());
        if self.1.minikube_stopped {
            return Err(MnqnError::DependencyNotReady {
                tool: "minikube".to_string(),
                reason: "cluster is not running".to_string(),
            });
        }
        Ok(())
    }
}

pub(crate) fn toolchain(calls: &Calls, failures: Failures) -> Toolchain {
    Toolchain::new(
        Box::new(FakeBuilder(calls.clone(), failures)),
        Box::new(FakeRelease(calls.clone(), failures)),
        Box::new(FakeCluster(calls.clone(), failures)),
        Box::new(FakeLocalCluster(calls.clone(), failures)),
    )
}

/// Settings rooted in `home`, working in `working_dir`.
pub(crate) fn settings(home: &Path, working_dir: &Path) -> Settings {
    Settings {
        version: project_identity::TOOL_VERSION.to_string(),
        kube_context: project_identity::DEFAULT_KUBE_CONTEXT.to_string(),
        working_dir: working_dir.to_path_buf(),
        global_config: home
            .join(project_identity::CONFIG_DIR_NAME)
            .join(project_identity::CONFIG_FILE_NAME),
        assume_yes: false,
    }
}

/// Write a minimal valid descriptor for `name` with chart `./chart`.
pub(crate) fn write_descriptor(project_dir: &Path, name: &str) -> LocalDescriptor {
    let descriptor = LocalDescriptor::new(
        name,
        ReleaseConfig::new("./chart", name).unwrap(),
        Vec::new(),
    )
    .unwrap();
    drop(ConfigFile::create(paths::local_config_file(project_dir), descriptor.clone()).unwrap());
    descriptor
}
