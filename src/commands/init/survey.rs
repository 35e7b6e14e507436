//! Interactive questions for a project's first descriptor.

use crate::config::{LocalDescriptor, ReleaseConfig};
use crate::error::{MnqnError, Result};
use crate::project_identity;
use crate::ui;
use crate::utils::paths;
use std::io::{BufRead, Write};
use std::path::Path;

/// Ask for whatever cannot be derived from `project_dir` and build a valid
/// descriptor for `project_name`.
///
/// Invalid answers are asked again. Running out of input aborts the survey.
pub fn run(
    out: &mut dyn Write,
    input: &mut dyn BufRead,
    project_dir: &Path,
    project_name: &str,
) -> Result<LocalDescriptor> {
    if project_name.is_empty() {
        return Err(MnqnError::Validation("project name is required".to_string()));
    }

    let dockerfile = ask_dockerfile(out, input, project_dir)?;
    let chart = ask_chart(out, input, project_dir)?;
    let values = ask_values(out, input, project_dir)?;

    let mut release = ReleaseConfig::new(&chart, project_name)?;
    release.values_path = values;

    let mut descriptor = LocalDescriptor::new(project_name, release, Vec::new())?;
    descriptor.build.dockerfile_path = dockerfile;
    Ok(descriptor)
}

fn ask_dockerfile(out: &mut dyn Write, input: &mut dyn BufRead, project_dir: &Path) -> Result<String> {
    let default = project_identity::DEFAULT_DOCKERFILE;
    if paths::ensure_file(project_dir, default).is_ok() {
        return Ok(default.to_string());
    }

    writeln!(out, "Dockerfile is not found")?;
    loop {
        let answer = prompt(
            out,
            input,
            &format!("Please provide path to the working Dockerfile (example: {}):", default),
        )?;
        if answer.is_empty() {
            writeln!(out, "Value is required")?;
            continue;
        }
        match paths::ensure_file(project_dir, &answer) {
            Ok(_) => return Ok(answer),
            Err(e) => writeln!(out, "Couldn't find Dockerfile: {}", e)?,
        }
    }
}

fn ask_chart(out: &mut dyn Write, input: &mut dyn BufRead, project_dir: &Path) -> Result<String> {
    loop {
        let answer = prompt(out, input, "Please provide relative path to the Helm chart:")?;
        if answer.is_empty() {
            writeln!(out, "Value is required")?;
            continue;
        }
        match paths::ensure_dir(project_dir, &answer) {
            Ok(_) => return Ok(answer),
            Err(e) => writeln!(out, "Couldn't find chart dir: {}", e)?,
        }
    }
}

fn ask_values(out: &mut dyn Write, input: &mut dyn BufRead, project_dir: &Path) -> Result<String> {
    loop {
        let answer = prompt(
            out,
            input,
            "Please provide relative path to the Helm values (skip, if you don't need values):",
        )?;
        if answer.is_empty() {
            return Ok(answer);
        }
        match paths::ensure_file(project_dir, &answer) {
            Ok(_) => return Ok(answer),
            Err(e) => writeln!(out, "Couldn't find values file: {}", e)?,
        }
    }
}

fn prompt(out: &mut dyn Write, input: &mut dyn BufRead, question: &str) -> Result<String> {
    ui::ask(out, input, question)?.ok_or_else(|| {
        MnqnError::Validation("survey aborted: input ended before all answers were given".to_string())
    })
}
