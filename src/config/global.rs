//! Global registry of known projects (`~/.mnqn/config.yaml`).

use super::store::{ConfigFile, Record};
use crate::error::{MnqnError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRegistry {
    #[serde(rename = "version")]
    pub tool_version: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// A project registered with `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
}

impl Project {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MnqnError::Validation("project name is required".to_string()));
        }
        if self.path.as_os_str().is_empty() {
            return Err(MnqnError::Validation(format!(
                "path of project \"{}\" is required",
                self.name
            )));
        }
        Ok(())
    }
}

impl GlobalRegistry {
    pub fn new(tool_version: &str) -> Result<Self> {
        let registry = Self {
            tool_version: tool_version.to_string(),
            projects: Vec::new(),
        };
        registry.validate()?;
        Ok(registry)
    }

    pub fn find(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Append `project` unless its name is already taken.
    ///
    /// Registration is never idempotent: an identical entry is rejected just
    /// like a same-name entry on another path, with a distinct message.
    pub fn add_project(&mut self, project: Project) -> Result<()> {
        project.validate()?;

        if let Some(existing) = self.find(&project.name) {
            if existing.path == project.path {
                return Err(MnqnError::Conflict(format!(
                    "project with name \"{}\" is already registered",
                    project.name
                )));
            }
            return Err(MnqnError::Conflict(format!(
                "project \"{}\" is already registered but on different path ({}): \
                 re-register the project or move it back to the original path",
                existing.name,
                existing.path.display()
            )));
        }

        self.projects.push(project);
        Ok(())
    }
}

impl Record for GlobalRegistry {
    const LABEL: &'static str = "global configuration";

    fn validate(&self) -> Result<()> {
        if self.tool_version.is_empty() {
            return Err(MnqnError::Validation("version is required".to_string()));
        }
        Ok(())
    }
}

impl ConfigFile<GlobalRegistry> {
    /// Register `project` and persist the whole registry.
    ///
    /// The in-memory registry is left unchanged if the write fails.
    pub fn register(&mut self, project: Project) -> Result<()> {
        self.record_mut().add_project(project)?;

        if let Err(e) = self.save() {
            self.record_mut().projects.pop();
            return Err(e);
        }
        Ok(())
    }
}
