#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

mod control;
pub mod logs;
pub mod pidfile;
pub mod process;
mod supervisor;

#[cfg(test)]
mod test_utils;

// Re-export the real ProcessControl implementation
pub use control::OsProcessControl;

// Re-export log following
pub use logs::{DEFAULT_TAIL_LINES, LogFollower};

// Re-export the lifecycle service
pub use supervisor::Supervisor;
