// src/progress.rs
/// Human-facing progress for long-running phases (archive load, live fetch).
/// The CLI implements this; library callers can pass `NullProgress`.
pub trait Progress {
    /// Called at the start of a phase with the number of units (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit (a bundle, a game/month request) finished.
    fn item_done(&mut self, _label: &str) {}

    /// One unit was skipped because it failed.
    fn item_failed(&mut self, _label: &str) {}

    /// Called at the end of the phase, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
