//! Process operations for the supervised server.
//!
//! - `spawn_detached`: fire-and-forget launch, returns only the PID
//! - `send_signal`: single signal delivery with errno mapped to `ProcessError`
//! - `terminate_pid`: SIGTERM with optional SIGKILL escalation

mod shutdown;
mod signal;
mod spawn;

pub use shutdown::terminate_pid;
pub use signal::send_signal;
pub use spawn::spawn_detached;
