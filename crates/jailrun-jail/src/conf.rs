//! `jail.conf(5)` rendering.

use std::fmt::{self, Write as _};
use std::path::Path;

use jailrun_common::constants::{CONF_FILE_NAME, DEVFS_RULESET};
use jailrun_common::error::{JailrunError, Result};
use jailrun_common::types::ContainerId;

/// Fields templated into a jail configuration block.
///
/// Everything else in the block is fixed for this runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JailConf<'a> {
    /// Jail name.
    pub name: &'a ContainerId,
    /// Resolved root filesystem path.
    pub root: &'a Path,
    /// Absolute path of the fstab the jail mounts.
    pub fstab: &'a Path,
}

impl fmt::Display for JailConf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.name)?;
        writeln!(f, "  path = \"{}\";", self.root.display())?;
        writeln!(f, "  devfs_ruleset = {DEVFS_RULESET};")?;
        writeln!(f, "  mount.devfs;")?;
        writeln!(f, "  mount.fstab = \"{}\";", self.fstab.display())?;
        writeln!(f, "  persist;")?;
        writeln!(f, "}}")
    }
}

/// Renders the jail configuration block for `id`.
///
/// # Errors
///
/// Returns `JailrunError::Render` if formatting fails.
pub fn render_config(id: &ContainerId, root: &Path, fstab: &Path) -> Result<String> {
    let mut out = String::new();
    write!(
        out,
        "{}",
        JailConf {
            name: id,
            root,
            fstab,
        }
    )
    .map_err(|e| JailrunError::Render {
        artifact: CONF_FILE_NAME,
        message: e.to_string(),
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_exact_block() {
        let id = ContainerId::new("c1");
        let conf = render_config(
            &id,
            Path::new("/var/bundles/c1/rootfs"),
            Path::new("/var/lib/jailrun/jails/c1/fstab"),
        )
        .expect("render");

        assert_eq!(
            conf,
            "c1 {\n  \
             path = \"/var/bundles/c1/rootfs\";\n  \
             devfs_ruleset = 4;\n  \
             mount.devfs;\n  \
             mount.fstab = \"/var/lib/jailrun/jails/c1/fstab\";\n  \
             persist;\n\
             }\n"
        );
    }

    #[test]
    fn jail_name_is_the_container_id() {
        let id = ContainerId::new("web-7f3a");
        let conf = render_config(&id, Path::new("/r"), Path::new("/s/fstab")).expect("render");
        assert!(conf.starts_with("web-7f3a {\n"));
        assert!(conf.ends_with("}\n"));
    }
}
