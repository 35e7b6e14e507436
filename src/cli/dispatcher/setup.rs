use crate::config::{ConfigFile, GlobalRegistry, Record};
use crate::context::Settings;
use crate::error::{MnqnError, Result};
use crate::project_identity;
use crate::ui;
use std::fs;
use std::io::{BufRead, Write};

/// Make sure the global configuration exists, offering to create it.
pub(crate) fn ensure_initialized(
    settings: &Settings,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<()> {
    if settings.global_config.is_file() {
        return Ok(());
    }

    writeln!(
        out,
        "{} is not initialised yet.",
        project_identity::DISPLAY_NAME
    )?;
    let accepted = settings.assume_yes
        || ui::confirm(out, input, "Do you want to initialise the client now?", true)?;
    if !accepted {
        writeln!(out, "Not initializing.")?;
        return Err(MnqnError::Declined);
    }

    initialize(settings).map_err(|e| MnqnError::NotInitialized(format!("couldn't initialize: {}", e)))?;
    ui::success(&format!(
        "Initialised configuration at {}",
        settings.global_config.display()
    ));
    Ok(())
}

fn initialize(settings: &Settings) -> Result<()> {
    if let Some(dir) = settings.global_config.parent() {
        fs::create_dir_all(dir).map_err(|e| MnqnError::io(dir, e))?;
    }
    let registry = GlobalRegistry::new(&settings.version)?;
    ConfigFile::create(&settings.global_config, registry)?;
    Ok(())
}

/// Read and validate the global configuration; any failure is a setup error.
pub(crate) fn load_global(settings: &Settings) -> Result<GlobalRegistry> {
    let registry = ConfigFile::<GlobalRegistry>::load(&settings.global_config)
        .map(ConfigFile::into_record)
        .map_err(|e| MnqnError::NotInitialized(format!("couldn't read the configuration: {}", e)))?;

    registry.validate().map_err(|e| {
        MnqnError::NotInitialized(format!("couldn't parse the configuration: {}", e))
    })?;
    ui::debug(&format!(
        "{} project(s) registered in {}",
        registry.projects.len(),
        settings.global_config.display()
    ));
    Ok(registry)
}
