//! Lexical path resolution.
//!
//! Paths are joined and cleaned without touching the filesystem, so a
//! missing rootfs or mount target is reported later by the OS rather than
//! here.

use std::path::{Component, Path, PathBuf};

/// Resolves the container root against the bundle directory.
///
/// An absolute `root` is returned verbatim. A relative one is joined onto
/// `bundle` and cleaned.
#[must_use]
pub fn resolve_root(bundle: &Path, root: &Path) -> PathBuf {
    if root.is_absolute() {
        root.to_path_buf()
    } else {
        join_clean(bundle, root)
    }
}

/// Joins `child` under `base` and cleans the result.
///
/// Unlike [`Path::join`], an absolute `child` does not replace `base`:
/// `/r` joined with `/dev` is `/r/dev`. `.` components are dropped and
/// `..` removes the preceding component, never climbing above a root.
#[must_use]
pub fn join_clean(base: &Path, child: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in base.components() {
        push_component(&mut out, component);
    }
    for component in child.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => push_component(&mut out, other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

fn push_component(out: &mut PathBuf, component: Component<'_>) {
    match component {
        Component::CurDir => {}
        Component::ParentDir => match out.components().next_back() {
            Some(Component::Normal(_)) => {
                let _ = out.pop();
            }
            Some(Component::RootDir | Component::Prefix(_)) => {}
            Some(Component::ParentDir | Component::CurDir) | None => out.push(".."),
        },
        other => out.push(other.as_os_str()),
    }
}
