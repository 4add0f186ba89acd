//! `jailrun create` — Write jail.conf and fstab for a container.

use std::path::PathBuf;

use clap::Args;
use jailrun_common::config::RuntimeConfig;
use jailrun_common::types::ContainerId;
use jailrun_jail::{ConfigWriter, FsStateDirs};

/// Arguments for the `create` command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Container ID, also used as the jail name.
    pub id: String,

    /// Bundle directory containing config.json.
    #[arg(short, long, default_value = ".")]
    pub bundle: PathBuf,
}

/// Executes the `create` command.
///
/// Allocates the state directory, then writes both artifacts and prints
/// the path of the new `jail.conf`.
///
/// # Errors
///
/// Returns an error if the spec cannot be loaded or either artifact
/// cannot be created.
#[allow(clippy::print_stdout)]
pub fn execute(args: CreateArgs, config: &RuntimeConfig) -> anyhow::Result<()> {
    let spec = super::load_spec(&args.bundle)?;
    let bundle = std::path::absolute(&args.bundle)?;
    let id = ContainerId::new(args.id);

    let state = FsStateDirs::from_config(config);
    let dir = state.allocate(&id)?;
    tracing::info!(
        id = %id,
        root = %state.root().display(),
        state_dir = %dir.display(),
        "creating jail artifacts"
    );

    let conf = ConfigWriter::with_config(state, config).create(&id, &bundle, &spec)?;
    println!("{}", conf.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_writes_into_configured_state_root() {
        let bundle = tempfile::tempdir().expect("bundle");
        std::fs::write(
            bundle.path().join("config.json"),
            r#"{ "root": { "path": "rootfs" },
                 "mounts": [{ "destination": "/dev", "type": "devfs", "source": "devfs" }] }"#,
        )
        .expect("write spec");
        let state = tempfile::tempdir().expect("state");
        let config = RuntimeConfig {
            state_root: state.path().to_path_buf(),
            ..RuntimeConfig::default()
        };

        let args = CreateArgs {
            id: "cli-1".into(),
            bundle: bundle.path().to_path_buf(),
        };
        execute(args, &config).expect("create");

        let dir = state.path().join("cli-1");
        assert!(dir.join("fstab").is_file());
        assert!(dir.join("jail.conf").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn absolute_id_writes_inside_state_root() {
        let bundle = tempfile::tempdir().expect("bundle");
        std::fs::write(bundle.path().join("config.json"), r#"{ "root": { "path": "rootfs" } }"#)
            .expect("write spec");
        let state = tempfile::tempdir().expect("state");
        let outside = tempfile::tempdir().expect("outside");
        let config = RuntimeConfig {
            state_root: state.path().to_path_buf(),
            ..RuntimeConfig::default()
        };

        let args = CreateArgs {
            id: outside.path().display().to_string(),
            bundle: bundle.path().to_path_buf(),
        };
        execute(args, &config).expect("create");

        assert!(!outside.path().join("jail.conf").exists());
        assert!(!outside.path().join("fstab").exists());
        let relative = outside.path().strip_prefix("/").expect("absolute tempdir");
        assert!(state.path().join(relative).join("jail.conf").is_file());
    }
}
