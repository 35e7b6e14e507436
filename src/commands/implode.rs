use crate::cli::registry::Feature;
use crate::context::Context;
use crate::error::{MnqnError, Result};
use crate::ui;
use std::fs;
use std::io::{ErrorKind, Write};

pub struct Implode;

impl Feature for Implode {
    fn name(&self) -> &str {
        "implode"
    }

    fn about(&self) -> &str {
        "Implodes previously made global configuration"
    }

    fn run(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<()> {
        let assume_yes = ctx.settings().assume_yes;
        let global_config = ctx.settings().global_config.clone();

        let confirmed = assume_yes || {
            let (out, input) = ctx.streams();
            ui::confirm(
                out,
                input,
                "Are you sure you want to purge current configuration?",
                false,
            )?
        };
        if !confirmed {
            writeln!(ctx, "Skipping.")?;
            return Ok(());
        }

        let Some(config_dir) = global_config.parent() else {
            return Err(MnqnError::Other(format!(
                "couldn't resolve configuration folder of {}",
                global_config.display()
            )));
        };

        match fs::remove_dir_all(config_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(MnqnError::io(config_dir, e)),
        }
        ui::debug(&format!("Removed {}", config_dir.display()));

        writeln!(ctx, "Purged.")?;
        Ok(())
    }
}
