//! CLI command definitions and dispatch.

pub mod create;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use jailrun_common::config::RuntimeConfig;
use jailrun_common::constants::{SPEC_FILE_NAME, STATE_ROOT_ENV};
use jailrun_jail::Spec;

/// jailrun — jail configuration writer for container bundles.
#[derive(Parser, Debug)]
#[command(name = "jailrun", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON runtime configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding per-container state directories.
    #[arg(long, global = true, env = STATE_ROOT_ENV)]
    pub state_root: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write jail.conf and fstab for a container.
    Create(create::CreateArgs),
    /// Print the jail.conf and fstab a create would write.
    Render(render::RenderArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if configuration loading or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = runtime_config(cli.config.as_deref(), cli.state_root)?;
    match cli.command {
        Command::Create(args) => create::execute(args, &config),
        Command::Render(args) => render::execute(args, &config),
    }
}

/// Builds the runtime configuration from an optional file and overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid.
pub fn runtime_config(
    file: Option<&Path>,
    state_root: Option<PathBuf>,
) -> anyhow::Result<RuntimeConfig> {
    let mut config = match file {
        Some(path) => RuntimeConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RuntimeConfig::default(),
    };
    if let Some(root) = state_root {
        config.state_root = root;
    }
    config.validate()?;
    Ok(config)
}

/// Reads `config.json` from a bundle directory.
///
/// # Errors
///
/// Returns an error if the file is missing or is not valid JSON.
pub fn load_spec(bundle: &Path) -> anyhow::Result<Spec> {
    let path = bundle.join(SPEC_FILE_NAME);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading bundle spec {}", path.display()))?;
    let spec = serde_json::from_str(&raw)
        .with_context(|| format!("parsing bundle spec {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded bundle spec");
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_create_with_global_state_root() {
        let cli = Cli::try_parse_from([
            "jailrun",
            "--state-root",
            "/tmp/jails",
            "create",
            "c1",
            "--bundle",
            "/var/bundles/c1",
        ])
        .expect("parse");
        assert_eq!(cli.state_root, Some(PathBuf::from("/tmp/jails")));
        assert!(matches!(cli.command, Command::Create(ref a) if a.id == "c1"));
    }

    #[test]
    fn state_root_flag_overrides_default() {
        let config = runtime_config(None, Some(PathBuf::from("/srv/jails"))).expect("config");
        assert_eq!(config.state_root, PathBuf::from("/srv/jails"));
    }

    #[test]
    fn relative_state_root_is_rejected() {
        assert!(runtime_config(None, Some(PathBuf::from("jails"))).is_err());
    }

    #[test]
    fn load_spec_reads_bundle_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("config.json"),
            r#"{ "root": { "path": "rootfs" }, "mounts": [] }"#,
        )
        .expect("write");
        let spec = load_spec(dir.path()).expect("load");
        assert_eq!(spec.root.path, PathBuf::from("rootfs"));
    }

    #[test]
    fn load_spec_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_spec(dir.path()).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}
