//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values:
//! file names, directories and defaults shared by the CLI and the pipeline.

pub const DISPLAY_NAME: &str = "Mannequin";
pub const BINARY_NAME: &str = "mnqnctl";
pub const REPO_URL: &str = "https://github.com/kostkobv/mannequin";

/// Version written into every configuration file this build creates.
pub const TOOL_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Dot-directory under the user's home that holds the global registry.
pub const CONFIG_DIR_NAME: &str = ".mnqn";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Reserved per-project descriptor file, looked up in the working directory.
pub const LOCAL_CONFIG_FILE_NAME: &str = ".mnqn.yaml";

/// Namespace prefix for generated image names (`mnqn.local/<project>`).
pub const IMAGE_NAMESPACE: &str = "mnqn.local";

pub const DEFAULT_KUBE_CONTEXT: &str = "minikube";
pub const DEFAULT_DOCKERFILE: &str = "./Dockerfile";
pub const DEFAULT_HELM_BINARY: &str = "helm";

pub fn cli_with(args: &str) -> String {
    format!("{} {}", BINARY_NAME, args)
}

pub fn default_image_name(project: &str) -> String {
    format!("{}/{}", IMAGE_NAMESPACE, project)
}
