pub mod args;
pub mod dispatcher;
pub mod registry;

pub use args::{Cli, GlobalFlags};
pub use registry::{Feature, FeatureRegistry};
