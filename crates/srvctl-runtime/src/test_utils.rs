//! Shared test doubles.

use std::path::Path;
use std::sync::Mutex;

use mockall::mock;
use srvctl_core::{
    LaunchSpec, LifecycleEvent, LifecycleObserver, Liveness, ProcessControl, ProcessError,
    StopSignal,
};

mock! {
    pub Control {}
    impl ProcessControl for Control {
        fn spawn_detached(&self, launch: &LaunchSpec, cwd: &Path, log_file: &Path) -> Result<u32, ProcessError>;
        fn probe(&self, pid: u32) -> Liveness;
        fn signal(&self, pid: u32, signal: StopSignal) -> Result<(), ProcessError>;
    }
}

/// Keeps every emitted event in order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().expect("observer lock").clone()
    }
}

impl LifecycleObserver for RecordingObserver {
    fn emit(&self, event: LifecycleEvent) {
        self.events.lock().expect("observer lock").push(event);
    }
}
