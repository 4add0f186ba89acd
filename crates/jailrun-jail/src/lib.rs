//! # jailrun-jail
//!
//! Turns a runtime-agnostic container specification into the two files a
//! FreeBSD jail needs to start: a `jail.conf` block and the `fstab` it
//! references.
//!
//! - **Rendering** (`fstab`, `conf`): pure formatting over small field
//!   structs, no I/O.
//! - **Persistence** (`writer`, `create`): create-only writes keyed by the
//!   container id. A partially written artifact is removed before the error
//!   is returned.
//!
//! Mutual exclusion between concurrent creators of the same id relies on
//! exclusive file creation alone.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod conf;
pub mod create;
pub mod fstab;
pub mod path;
pub mod spec;
pub mod state;
pub mod writer;

pub use create::{ConfigWriter, create_config};
pub use spec::{Mount, Root, Spec};
pub use state::{FsStateDirs, StateDirs};
