use crate::cli::registry::Feature;
use crate::context::Context;
use crate::error::Result;
use crate::project_identity;
use std::io::Write;

pub struct Version;

impl Feature for Version {
    fn name(&self) -> &str {
        "version"
    }

    fn about(&self) -> &str {
        "Returns application version information"
    }

    fn run(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<()> {
        let version = ctx.settings().version.clone();
        writeln!(ctx, "{} version: {}", project_identity::DISPLAY_NAME, version)?;
        Ok(())
    }
}
