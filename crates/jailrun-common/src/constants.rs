//! System-wide constants and default paths.

/// Default directory under which per-container state directories live.
pub const DEFAULT_STATE_ROOT: &str = "/var/lib/jailrun/jails";

/// File name of the jail configuration inside a state directory.
pub const CONF_FILE_NAME: &str = "jail.conf";

/// File name of the mount table inside a state directory.
pub const FSTAB_FILE_NAME: &str = "fstab";

/// Name of the runtime specification file inside a bundle.
pub const SPEC_FILE_NAME: &str = "config.json";

/// Devfs ruleset applied to every jail (`devfsrules_jail`).
pub const DEVFS_RULESET: u32 = 4;

/// Permission bits for generated artifacts.
pub const ARTIFACT_MODE: u32 = 0o644;

/// Environment variable overriding the state root.
pub const STATE_ROOT_ENV: &str = "JAILRUN_STATE_ROOT";
