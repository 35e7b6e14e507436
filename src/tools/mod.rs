//! System implementations of the collaborator traits.
//!
//! Each tool shells out through [`exec`], which applies deadlines and turns
//! failing invocations into `ExternalFailure` errors with trimmed
//! diagnostics.

pub mod docker;
pub mod exec;
pub mod helm;
pub mod kubectl;
pub mod minikube;
pub mod probe;
