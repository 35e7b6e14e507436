use crate::error::{MnqnError, Result};
use crate::project_identity;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Layout of generated image versions, e.g. `2026-10-19-14-03-59`.
pub const IMAGE_VERSION_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Image build settings (`docker:` section of the local descriptor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_name: String,

    /// Generated per run, never persisted.
    #[serde(skip)]
    pub image_version: String,

    #[serde(rename = "file", default, skip_serializing_if = "String::is_empty")]
    pub dockerfile_path: String,
}

impl BuildConfig {
    /// Nothing is mandatory until a tag is composed.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    pub fn dockerfile(&self) -> &str {
        if self.dockerfile_path.is_empty() {
            project_identity::DEFAULT_DOCKERFILE
        } else {
            &self.dockerfile_path
        }
    }

    /// `<image name>:<image version>`
    pub fn image_tag(&self) -> Result<String> {
        if self.image_name.is_empty() {
            return Err(MnqnError::Validation("image name is required".to_string()));
        }
        if self.image_version.is_empty() {
            return Err(MnqnError::Validation("image version is required".to_string()));
        }
        Ok(format!("{}:{}", self.image_name, self.image_version))
    }

    /// Derive the image name from the project name, keeping a configured one.
    pub fn generate_image_name(&mut self, project_name: &str) -> Result<()> {
        if !self.image_name.is_empty() {
            return Ok(());
        }
        if project_name.is_empty() {
            return Err(MnqnError::Validation(
                "project name is required to derive the image name".to_string(),
            ));
        }

        self.image_name = project_identity::default_image_name(project_name);
        Ok(())
    }

    pub fn generate_version(&mut self) -> Result<()> {
        self.generate_version_at(Local::now())
    }

    /// Versions are single-shot: generating twice in one run is an error.
    pub fn generate_version_at(&mut self, now: DateTime<Local>) -> Result<()> {
        if !self.image_version.is_empty() {
            return Err(MnqnError::Validation(format!(
                "image version is already set to \"{}\"",
                self.image_version
            )));
        }

        self.image_version = now.format(IMAGE_VERSION_FORMAT).to_string();
        Ok(())
    }
}
