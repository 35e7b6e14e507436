//! Command dispatcher
//!
//! Builds the feature tree, makes sure the tool is initialized and routes
//! the positional words of the command line through the root registry.

mod normalization;
mod setup;

use crate::cli::args::Cli;
use crate::cli::registry::FeatureRegistry;
use crate::commands;
use crate::context::{Context, Settings};
use crate::error::Result;
use crate::traits::Toolchain;
use std::io::{self, BufRead, Write};

pub(crate) use normalization::{lift_global_flags, strip_flags};
pub(crate) use setup::{ensure_initialized, load_global};

const ROOT_ABOUT: &str = "Local development of microservices within k8s";
const ROOT_SUMMARY: &str = "mnqnctl makes local development of microservices within k8s simple";

/// The complete command tree: `deploy [latest]`, `init`, `implode`, `version`.
pub fn features() -> Result<FeatureRegistry> {
    FeatureRegistry::new("mnqn", ROOT_ABOUT, ROOT_SUMMARY)
        .with(commands::deploy::Deploy::new()?)?
        .with(commands::init::Init)?
        .with(commands::implode::Implode)?
        .with(commands::version::Version)
}

/// Dispatch the parsed command line against the real system.
pub fn dispatch(args: &Cli) -> Result<()> {
    let settings = Settings::detect(Some(args.global.kube_context.clone()), args.global.yes)?;
    let toolchain = Toolchain::system();

    let stdout = io::stdout();
    let stdin = io::stdin();
    let mut out = stdout.lock();
    let mut input = stdin.lock();

    run(settings, &toolchain, &mut out, &mut input, &args.words)
}

/// Startup check, global configuration load, then routing of `words`.
pub fn run(
    settings: Settings,
    toolchain: &Toolchain,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
    words: &[String],
) -> Result<()> {
    ensure_initialized(&settings, out, input)?;
    load_global(&settings)?;

    let root = features()?;
    let words = strip_flags(words);

    let mut ctx = Context::new(settings, toolchain, out, input);
    let result = root.dispatch(&mut ctx, &words);
    ctx.flush()?;
    result
}
