use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Disable colors when requested or when `NO_COLOR` is set.
pub fn init_colors(no_color: bool) {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), msg);
    }
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Diagnostic line, only shown with `--verbose`.
pub fn debug(msg: &str) {
    if is_verbose() {
        eprintln!("{} {}", "·".bright_black(), msg.bright_black());
    }
}

pub fn separator(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(52).bright_black())
}

/// Ask a yes/no question on `out` and read the answer from `input`.
///
/// An empty answer selects `default`. A closed or broken input also falls
/// back to `default`, so non-interactive runs behave predictably.
pub fn confirm(
    out: &mut dyn Write,
    input: &mut dyn BufRead,
    question: &str,
    default: bool,
) -> io::Result<bool> {
    let choices = if default { "Y/n" } else { "y/N" };
    write!(out, "{} {} ({}): ", "?".yellow().bold(), question, choices)?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(out)?;
        return Ok(default);
    }

    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return Ok(default);
    }
    Ok(answer == "y" || answer == "yes")
}

/// Read one trimmed line after printing `question`. `None` on end of input.
pub fn ask(out: &mut dyn Write, input: &mut dyn BufRead, question: &str) -> io::Result<Option<String>> {
    writeln!(out, "{} {}", "?".yellow().bold(), question)?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}
