//! PID file management for tracking the supervised server.
//!
//! Provides exclusive publication, tolerant reads, idempotent deletion and
//! the liveness probe used to detect stale files.
//!
//! # Safety guarantees
//! - Publication never overwrites an existing PID file
//! - Readers never see a partially written file
//! - Deletion is idempotent

mod io;
mod verify;

pub use io::{delete_pidfile, publish_pidfile, read_pidfile, replace_pidfile};
pub use verify::probe_pid;
