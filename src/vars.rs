//! Run-scoped variable store
//!
//! Pipeline stages register generated values (image tag, version, name)
//! here, and collaborators interpolate them into tool arguments using
//! `$NAME` tokens.

use crate::error::{MnqnError, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Prefix that marks a variable token inside a string.
pub const SIGIL: char = '$';

/// Registered by the build stage.
pub const VAR_DOCKER_IMAGE_TAG: &str = "DOCKER_IMAGE_TAG";
pub const VAR_DOCKER_IMAGE_NAME: &str = "DOCKER_IMAGE_NAME";
pub const VAR_DOCKER_IMAGE_VERSION: &str = "DOCKER_IMAGE_VERSION";

/// Abstraction used by collaborators to read and set variables.
pub trait VarStore {
    fn register(&mut self, name: &str, value: &str) -> Result<()>;
    fn var(&self, name: &str) -> Result<String>;
    fn replace(&self, text: &str) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: HashMap<String, String>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Alternation of all names, longest first, so `$A_B` wins over `$A`.
    fn token_pattern(&self) -> Option<Regex> {
        if self.values.is_empty() {
            return None;
        }

        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&format!("{}({})", regex::escape(&SIGIL.to_string()), alternation)).ok()
    }
}

impl VarStore for VariableStore {
    /// Set `name` to `value`. Re-registering a name overwrites it.
    fn register(&mut self, name: &str, value: &str) -> Result<()> {
        match (name.is_empty(), value.is_empty()) {
            (true, true) => Err(MnqnError::Validation(
                "attempt to register variable without name and value".to_string(),
            )),
            (true, false) => Err(MnqnError::Validation(format!(
                "name for variable with value \"{}\" is not provided",
                value
            ))),
            _ => {
                self.values.insert(name.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    fn var(&self, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(MnqnError::Validation("variable name is required".to_string()));
        }

        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| MnqnError::NotFound(format!("variable \"{}\" is not set", name)))
    }

    /// Substitute every `$NAME` token of a registered variable.
    ///
    /// Single pass: substituted values are not scanned again, and tokens
    /// for unknown names are left as they are.
    fn replace(&self, text: &str) -> String {
        let Some(pattern) = self.token_pattern() else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                self.values
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
