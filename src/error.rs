use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MnqnError {
    /// Malformed or incomplete configuration record.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Duplicate project registration or duplicate command name.
    #[error("{0}")]
    Conflict(String),

    /// External tool missing or installed at an unsupported version.
    #[error("{tool}: {reason}")]
    DependencyUnavailable { tool: String, reason: String },

    /// External tool installed but not in a usable runtime state.
    #[error("{tool}: {reason}")]
    DependencyNotReady { tool: String, reason: String },

    #[error("'{command}' failed: {}: {diagnostics}", exit_label(.code))]
    ExternalFailure {
        command: String,
        code: Option<i32>,
        diagnostics: String,
    },

    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Parsing error in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// A pipeline stage failed; `source` is the stage's own error.
    #[error("{stage}: {source}")]
    Stage {
        stage: String,
        #[source]
        source: Box<MnqnError>,
    },

    #[error("{name} is not initialized: {0}", name = crate::project_identity::DISPLAY_NAME)]
    NotInitialized(String),

    #[error("Declined by user")]
    Declined,

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MnqnError>;

/// Root classification of an error, independent of stage breadcrumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    DependencyUnavailable,
    DependencyNotReady,
    ExternalFailure,
    Io,
    Parse,
    NotInitialized,
    Declined,
    Interrupted,
    Other,
}

impl MnqnError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MnqnError::Validation(_) => ErrorKind::Validation,
            MnqnError::NotFound(_) => ErrorKind::NotFound,
            MnqnError::Conflict(_) => ErrorKind::Conflict,
            MnqnError::DependencyUnavailable { .. } => ErrorKind::DependencyUnavailable,
            MnqnError::DependencyNotReady { .. } => ErrorKind::DependencyNotReady,
            MnqnError::ExternalFailure { .. } | MnqnError::TimedOut { .. } => {
                ErrorKind::ExternalFailure
            }
            MnqnError::IoError { .. } | MnqnError::StdIoError(_) => ErrorKind::Io,
            MnqnError::ParseError { .. } => ErrorKind::Parse,
            MnqnError::Stage { source, .. } => source.kind(),
            MnqnError::NotInitialized(_) => ErrorKind::NotInitialized,
            MnqnError::Declined => ErrorKind::Declined,
            MnqnError::Interrupted => ErrorKind::Interrupted,
            MnqnError::Other(_) => ErrorKind::Other,
        }
    }

    /// Innermost error behind any stage breadcrumbs.
    pub fn root(&self) -> &MnqnError {
        match self {
            MnqnError::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wrap the error with a stage label.
    pub fn in_stage(self, stage: impl fmt::Display) -> Self {
        MnqnError::Stage {
            stage: stage.to_string(),
            source: Box::new(self),
        }
    }

    /// Process exit status for the CLI boundary.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::NotInitialized => 2,
            ErrorKind::Declined => 3,
            ErrorKind::Interrupted => 130,
            _ => 1,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MnqnError::IoError {
            path: path.into(),
            source,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
