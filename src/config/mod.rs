pub mod build;
pub mod global;
pub mod local;
pub mod release;
pub mod store;

pub use build::BuildConfig;
pub use global::{GlobalRegistry, Project};
pub use local::{Dependency, DependencyKind, LocalDescriptor, PrepareAction};
pub use release::ReleaseConfig;
pub use store::{ConfigFile, Record};
