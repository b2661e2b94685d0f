// src/progress.rs
/// Step reporting for the import flow (save upload → process → publish).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of steps, if known.
    fn begin(&mut self, _steps: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One step finished.
    fn step_done(&mut self, _step: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every message; used by tests and the CLI summary.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) { self.lines.push(s!(msg)); }
    fn step_done(&mut self, step: &str) { self.lines.push(format!("done: {step}")); }
    fn finish(&mut self) { self.finished = true; }
}
