//! `jailrun render` — Print the artifacts a create would write.

use std::path::PathBuf;

use clap::Args;
use jailrun_common::config::RuntimeConfig;
use jailrun_common::types::ContainerId;
use jailrun_jail::FsStateDirs;
use jailrun_jail::conf::render_config;
use jailrun_jail::fstab::render_fstab;
use jailrun_jail::path::resolve_root;
use jailrun_jail::state::fstab_path;

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Container ID, also used as the jail name.
    pub id: String,

    /// Bundle directory containing config.json.
    #[arg(short, long, default_value = ".")]
    pub bundle: PathBuf,
}

/// Executes the `render` command.
///
/// Nothing is written to disk. The `mount.fstab` line shows the nominal
/// fstab path, since no file exists yet to resolve.
///
/// # Errors
///
/// Returns an error if the spec cannot be loaded or rendering fails.
#[allow(clippy::print_stdout)]
pub fn execute(args: RenderArgs, config: &RuntimeConfig) -> anyhow::Result<()> {
    let (conf, fstab) = render(&args, config)?;
    println!("# jail.conf");
    print!("{conf}");
    println!("# fstab");
    print!("{fstab}");
    Ok(())
}

fn render(args: &RenderArgs, config: &RuntimeConfig) -> anyhow::Result<(String, String)> {
    let spec = super::load_spec(&args.bundle)?;
    let bundle = std::path::absolute(&args.bundle)?;
    let id = ContainerId::new(args.id.as_str());

    let root = resolve_root(&bundle, &spec.root.path);
    let fstab = render_fstab(&root, &spec.mounts)?;
    let state = FsStateDirs::from_config(config);
    let conf = render_config(&id, &root, &fstab_path(&state, &id))?;
    Ok((conf, fstab))
}
