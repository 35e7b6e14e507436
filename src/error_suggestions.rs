//! Error suggestions and helpful messages
//!
//! Provides actionable suggestions for common error scenarios

use crate::error::MnqnError;
use crate::project_identity;
use colored::Colorize;

/// Extension trait to add suggestions to errors
pub trait ErrorSuggestions {
    /// Get a helpful suggestion for this error
    fn suggestion(&self) -> Option<String>;

    /// Display the error with its suggestion
    fn display_with_suggestion(&self) -> String;
}

impl ErrorSuggestions for MnqnError {
    fn suggestion(&self) -> Option<String> {
        match self.root() {
            MnqnError::NotFound(msg) if msg.contains(project_identity::LOCAL_CONFIG_FILE_NAME) => {
                Some(format!(
                    "Run '{}' in the project root to create it",
                    project_identity::cli_with("init").cyan()
                ))
            }
            MnqnError::Conflict(msg) if msg.contains("different path") => Some(format!(
                "Run '{}' to reset the registry, then register the project again",
                project_identity::cli_with("implode").cyan()
            )),
            MnqnError::DependencyUnavailable { tool, .. } => Some(format!(
                "Install '{}' first, then retry the operation",
                tool.cyan()
            )),
            MnqnError::DependencyNotReady { tool, .. } if tool == "minikube" => Some(format!(
                "Start the local cluster with '{}'",
                "minikube start".cyan()
            )),
            MnqnError::NotInitialized(_) => Some(format!(
                "Run any '{}' command and accept the initialization prompt",
                project_identity::BINARY_NAME.cyan()
            )),
            MnqnError::ParseError { path, .. } => Some(format!(
                "Fix the YAML syntax in {} or remove the file to start over",
                path.display().to_string().cyan()
            )),
            _ => None,
        }
    }

    fn display_with_suggestion(&self) -> String {
        match self.suggestion() {
            Some(hint) => format!("{}\n{} {}", self, "Hint:".yellow().bold(), hint),
            None => self.to_string(),
        }
    }
}
