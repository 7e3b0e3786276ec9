#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod outcome;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    DEFAULT_APP_NAME, DEFAULT_ENTRY_ARGS, DEFAULT_PROGRAM, DEFAULT_RESTART_DELAY, LaunchSpec,
    SupervisorConfig,
};
pub use domain::{Liveness, StopSignal};
pub use error::{ConfigError, ProcessError, SupervisorError};
pub use events::LifecycleEvent;
pub use outcome::{RestartOutcome, StartOutcome, StatusReport, StopOutcome};
pub use ports::{LifecycleObserver, NoopObserver, ProcessControl};
