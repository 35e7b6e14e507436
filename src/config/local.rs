//! Per-project descriptor (`.mnqn.yaml` in the project root).

use super::build::BuildConfig;
use super::release::ReleaseConfig;
use super::store::Record;
use crate::context::Context;
use crate::error::{MnqnError, Result};
use crate::project_identity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalDescriptor {
    #[serde(rename = "version")]
    pub tool_version: String,

    #[serde(rename = "name")]
    pub project_name: String,

    #[serde(rename = "docker", default)]
    pub build: BuildConfig,

    #[serde(rename = "helm", default)]
    pub release: ReleaseConfig,

    #[serde(rename = "deps", default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl LocalDescriptor {
    /// Fresh descriptor for `project_name`; every dependency must be valid.
    pub fn new(
        project_name: &str,
        release: ReleaseConfig,
        dependencies: Vec<Dependency>,
    ) -> Result<Self> {
        for dep in &dependencies {
            dep.validate().map_err(|e| {
                MnqnError::Validation(format!("\"{}\" is not a valid dependency: {}", dep.name, e))
            })?;
        }

        Ok(Self {
            tool_version: project_identity::TOOL_VERSION.to_string(),
            project_name: project_name.to_string(),
            build: BuildConfig::default(),
            release,
            dependencies,
        })
    }

}

impl Record for LocalDescriptor {
    const LABEL: &'static str = "local configuration";

    fn validate(&self) -> Result<()> {
        if self.tool_version.is_empty() {
            return Err(MnqnError::Validation("version is required".to_string()));
        }
        if self.project_name.is_empty() {
            return Err(MnqnError::Validation("name is required".to_string()));
        }

        self.build.validate().map_err(|e| {
            MnqnError::Validation(format!("docker configuration is invalid: {}", e))
        })?;
        self.release
            .validate()
            .map_err(|e| MnqnError::Validation(format!("helm configuration is invalid: {}", e)))?;

        // Prepare actions are bound at runtime, so only the persisted
        // fields are checked here.
        for dep in &self.dependencies {
            if dep.name.is_empty() {
                return Err(MnqnError::Validation(format!(
                    "dependency of kind \"{}\" has no name",
                    dep.kind
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Another project registered in the global registry.
    Project,
    /// A chart-level service pulled in by the release manager.
    Service,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Project => write!(f, "project"),
            DependencyKind::Service => write!(f, "service"),
        }
    }
}

pub type PrepareAction = Arc<dyn Fn(&mut Context<'_>) -> Result<()> + Send + Sync>;

#[derive(Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: DependencyKind,

    #[serde(skip)]
    prepare: Option<PrepareAction>,
}

impl Dependency {
    pub fn new(name: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            prepare: None,
        }
    }

    pub fn bind<F>(&mut self, action: F)
    where
        F: Fn(&mut Context<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.prepare = Some(Arc::new(action));
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MnqnError::Validation("name is required".to_string()));
        }
        if self.prepare.is_none() {
            return Err(MnqnError::Validation(format!(
                "prepare action of dependency \"{}\" is required",
                self.name
            )));
        }
        Ok(())
    }

    pub fn prepare(&self, ctx: &mut Context<'_>) -> Result<()> {
        self.validate()?;
        match &self.prepare {
            Some(action) => action(ctx),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("bound", &self.prepare.is_some())
            .finish()
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}
