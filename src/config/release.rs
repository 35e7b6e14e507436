use crate::error::{MnqnError, Result};
use crate::project_identity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Release settings (`helm:` section of the local descriptor).
///
/// Every string here may contain `$VAR` tokens; they are substituted
/// right before the release manager is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub binary_path: String,

    #[serde(rename = "values", default, skip_serializing_if = "String::is_empty")]
    pub values_path: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// `--set key=value` overrides.
    #[serde(rename = "set", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set_overrides: BTreeMap<String, String>,

    /// Extra flags; an empty value emits the flag alone.
    #[serde(rename = "flags", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_flags: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub release_name: String,

    #[serde(rename = "chart", default)]
    pub chart_path: String,
}

impl ReleaseConfig {
    pub fn new(chart_path: &str, release_name: &str) -> Result<Self> {
        let release = Self {
            binary_path: project_identity::DEFAULT_HELM_BINARY.to_string(),
            release_name: release_name.to_string(),
            chart_path: chart_path.to_string(),
            ..Self::default()
        };
        release.validate()?;
        Ok(release)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chart_path.is_empty() {
            return Err(MnqnError::Validation("chart path is required".to_string()));
        }
        if self.release_name.is_empty() {
            return Err(MnqnError::Validation("release name is required".to_string()));
        }
        Ok(())
    }

    pub fn binary(&self) -> &str {
        if self.binary_path.is_empty() {
            project_identity::DEFAULT_HELM_BINARY
        } else {
            &self.binary_path
        }
    }

    /// Copy with the binary and namespace defaults filled in.
    pub fn with_defaults(&self) -> Self {
        let mut release = self.clone();
        if release.binary_path.is_empty() {
            release.binary_path = project_identity::DEFAULT_HELM_BINARY.to_string();
        }
        if release.namespace.is_empty() {
            release.namespace = release.release_name.clone();
        }
        release
    }
}
