use super::*;
use crate::error::ErrorKind;
use crate::traits::fakes::{self, Calls, Failures};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Records every argument list it is run with.
struct Probe {
    name: &'static str,
    seen: Arc<Mutex<Vec<Vec<String>>>>,
    fail: bool,
}

impl Probe {
    fn new(name: &'static str) -> (Self, Arc<Mutex<Vec<Vec<String>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                name,
                seen: seen.clone(),
                fail: false,
            },
            seen,
        )
    }
}

impl Feature for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn about(&self) -> &str {
        "records its arguments"
    }

    fn run(&self, _ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        self.seen.lock().unwrap().push(args.to_vec());
        if self.fail {
            return Err(MnqnError::Other(format!("{} failed", self.name)));
        }
        Ok(())
    }
}

fn words(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Dispatch `args` on `registry`, returning the written output.
fn dispatch(registry: &FeatureRegistry, args: &[&str]) -> (String, Result<()>) {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let toolchain = fakes::toolchain(&Calls::default(), Failures::default());
    let mut out = Vec::new();
    let mut input = Cursor::new(Vec::new());

    let result = {
        let mut ctx = Context::new(
            fakes::settings(home.path(), work.path()),
            &toolchain,
            &mut out,
            &mut input,
        );
        registry.dispatch(&mut ctx, &words(args))
    };
    (String::from_utf8(out).unwrap(), result)
}

#[test]
fn forwards_remaining_arguments_to_the_named_feature() {
    let (deploy, deploy_seen) = Probe::new("deploy");
    let (version, version_seen) = Probe::new("version");
    let registry = FeatureRegistry::new("mnqn", "root", "root summary")
        .with(deploy)
        .unwrap()
        .with(version)
        .unwrap();

    let (out, result) = dispatch(&registry, &["deploy", "latest", "extra"]);
    result.unwrap();

    assert!(out.is_empty());
    assert_eq!(*deploy_seen.lock().unwrap(), vec![words(&["latest", "extra"])]);
    assert!(version_seen.lock().unwrap().is_empty());
}

#[test]
fn feature_errors_propagate_unchanged() {
    let (mut deploy, _) = Probe::new("deploy");
    deploy.fail = true;
    let registry = FeatureRegistry::new("mnqn", "root", "root summary")
        .with(deploy)
        .unwrap();

    let (_, result) = dispatch(&registry, &["deploy"]);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
    assert_eq!(err.to_string(), "deploy failed");
}

#[test]
fn unknown_command_prints_notice_and_listing() {
    let (deploy, deploy_seen) = Probe::new("deploy");
    let registry = FeatureRegistry::new("mnqn", "root", "root summary")
        .with(deploy)
        .unwrap();

    let (out, result) = dispatch(&registry, &["destroy"]);
    result.unwrap();

    assert!(out.starts_with("Unknown command \"destroy\"\n"));
    assert!(out.contains("Available commands:"));
    assert!(out.contains("deploy\t\trecords its arguments"));
    assert!(deploy_seen.lock().unwrap().is_empty());
}

#[test]
fn no_arguments_prints_listing() {
    let (version, _) = Probe::new("version");
    let (deploy, _) = Probe::new("deploy");
    let registry = FeatureRegistry::new("mnqn", "root", "root summary")
        .with(version)
        .unwrap()
        .with(deploy)
        .unwrap();

    let (out, result) = dispatch(&registry, &[]);
    result.unwrap();

    assert!(out.starts_with("root summary\n\nFor more information - "));
    let deploy_at = out.find("deploy\t\t").unwrap();
    let version_at = out.find("version\t\t").unwrap();
    assert!(deploy_at < version_at, "listing is sorted by name");
}

#[test]
fn nested_registry_resolves_one_level_per_hop() {
    let (latest, latest_seen) = Probe::new("latest");
    let deploy = FeatureRegistry::new("deploy", "deploys the project", "deploy summary")
        .with(latest)
        .unwrap();
    let root = FeatureRegistry::new("mnqn", "root", "root summary")
        .with(deploy)
        .unwrap();

    let (out, result) = dispatch(&root, &["deploy", "latest", "now"]);
    result.unwrap();
    assert!(out.is_empty());
    assert_eq!(*latest_seen.lock().unwrap(), vec![words(&["now"])]);

    let (out, _) = dispatch(&root, &[]);
    assert!(out.contains("deploy\t\tdeploys the project\n"));
    assert!(!out.contains("latest"));

    let (out, _) = dispatch(&root, &["deploy"]);
    assert!(out.starts_with("deploy summary"));
    assert!(out.contains("latest\t\trecords its arguments"));
}

#[test]
fn duplicate_names_conflict() {
    let (first, _) = Probe::new("version");
    let (second, _) = Probe::new("version");
    let registry = FeatureRegistry::new("mnqn", "root", "root summary")
        .with(first)
        .unwrap();

    let err = registry.with(second).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.to_string().contains("\"version\" is already registered"));
}

#[test]
fn by_name_finds_registered_features_only() {
    let (version, _) = Probe::new("version");
    let registry = FeatureRegistry::new("mnqn", "root", "root summary")
        .with(version)
        .unwrap();

    assert_eq!(registry.by_name("version").unwrap().name(), "version");
    assert_eq!(
        registry.by_name("deploy").err().unwrap().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["version"]);
}
