//! Feature registry
//!
//! Commands are [`Feature`]s registered by name. A registry is itself a
//! feature, so `deploy latest` resolves in two hops: the root registry
//! finds `deploy`, and the `deploy` registry finds `latest`.

use crate::context::Context;
use crate::error::{MnqnError, Result};
use crate::project_identity;
use std::collections::BTreeMap;
use std::io::Write;

pub trait Feature {
    fn name(&self) -> &str;

    /// One-line description used in a parent's listing.
    fn about(&self) -> &str;

    /// Full descriptive text shown when the feature is asked for help.
    fn info(&self) -> String {
        self.about().to_string()
    }

    fn run(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()>;
}

pub struct FeatureRegistry {
    name: String,
    about: String,
    summary: String,
    features: BTreeMap<String, Box<dyn Feature>>,
}

impl FeatureRegistry {
    /// `about` is the one-liner shown by a parent registry, `summary`
    /// opens this registry's own listing.
    pub fn new(name: &str, about: &str, summary: &str) -> Self {
        Self {
            name: name.to_string(),
            about: about.to_string(),
            summary: summary.to_string(),
            features: BTreeMap::new(),
        }
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, feature: impl Feature + 'static) -> Result<Self> {
        self.register(Box::new(feature))?;
        Ok(self)
    }

    /// Names are unique; registering a taken name is a conflict.
    pub fn register(&mut self, feature: Box<dyn Feature>) -> Result<()> {
        let name = feature.name().to_string();
        if name.is_empty() {
            return Err(MnqnError::Validation(format!(
                "command registered in \"{}\" has no name",
                self.name
            )));
        }
        if self.features.contains_key(&name) {
            return Err(MnqnError::Conflict(format!(
                "command \"{}\" is already registered in \"{}\"",
                name, self.name
            )));
        }

        self.features.insert(name, feature);
        Ok(())
    }

    pub fn by_name(&self, name: &str) -> Result<&dyn Feature> {
        self.features
            .get(name)
            .map(|feature| feature.as_ref())
            .ok_or_else(|| {
                MnqnError::NotFound(format!(
                    "command \"{}\" is not registered in \"{}\"",
                    name, self.name
                ))
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Resolve one level of `args` and forward the rest.
    ///
    /// No arguments prints the listing. An unknown name prints a notice
    /// and the listing; neither is an error.
    pub fn dispatch(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        let Some((target, rest)) = args.split_first() else {
            write!(ctx, "{}", self.info())?;
            return Ok(());
        };

        match self.features.get(target) {
            Some(feature) => feature.run(ctx, rest),
            None => {
                writeln!(ctx, "Unknown command \"{}\"", target)?;
                write!(ctx, "{}", self.info())?;
                Ok(())
            }
        }
    }

    /// `name\t\tabout` per registered feature, sorted by name.
    pub fn listing(&self) -> String {
        self.features
            .values()
            .map(|feature| format!("{}\t\t{}\n", feature.name(), feature.about()))
            .collect()
    }
}

impl Feature for FeatureRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn about(&self) -> &str {
        &self.about
    }

    fn info(&self) -> String {
        format!(
            "{}\n\nFor more information - {}\n\nAvailable commands:\n\n{}",
            self.summary,
            project_identity::REPO_URL,
            self.listing()
        )
    }

    fn run(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        self.dispatch(ctx, args)
    }
}

#[cfg(test)]
mod tests;
