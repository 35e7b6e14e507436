//! Per-invocation command context
//!
//! Carries the resolved settings, the injected toolchain and the
//! input/output streams every command handler works with. Handlers write
//! through the context instead of printing, so they can be exercised with
//! in-memory buffers.

use crate::error::{MnqnError, Result};
use crate::project_identity;
use crate::traits::Toolchain;
use crate::utils::paths;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub version: String,
    pub kube_context: String,
    pub working_dir: PathBuf,
    pub global_config: PathBuf,
    /// Answer yes to every confirmation prompt.
    pub assume_yes: bool,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn detect(kube_context: Option<String>, assume_yes: bool) -> Result<Self> {
        let working_dir = std::env::current_dir()
            .map_err(|e| MnqnError::Other(format!("couldn't get working dir: {}", e)))?;

        Ok(Self {
            version: project_identity::TOOL_VERSION.to_string(),
            kube_context: kube_context
                .unwrap_or_else(|| project_identity::DEFAULT_KUBE_CONTEXT.to_string()),
            working_dir,
            global_config: paths::global_config_file()?,
            assume_yes,
        })
    }
}

pub struct Context<'a> {
    settings: Settings,
    toolchain: &'a Toolchain,
    out: &'a mut dyn Write,
    input: &'a mut dyn BufRead,
}

impl<'a> Context<'a> {
    pub fn new(
        settings: Settings,
        toolchain: &'a Toolchain,
        out: &'a mut dyn Write,
        input: &'a mut dyn BufRead,
    ) -> Self {
        Self {
            settings,
            toolchain,
            out,
            input,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn toolchain(&self) -> &'a Toolchain {
        self.toolchain
    }

    pub fn out(&mut self) -> &mut (dyn Write + 'a) {
        &mut *self.out
    }

    /// Output and input together, for prompts.
    pub fn streams(&mut self) -> (&mut (dyn Write + 'a), &mut (dyn BufRead + 'a)) {
        (&mut *self.out, &mut *self.input)
    }
}

impl Write for Context<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
