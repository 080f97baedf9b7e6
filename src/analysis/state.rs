//! Analysis lifecycle state machine
//!
//! Hosts that drive analysis from a UI thread track each job with this small
//! state machine instead of polling the pipeline. Transitions:
//!
//! ```text
//! Idle -> Running -> Succeeded(T)
//!                 -> Failed(message)
//! ```
//!
//! `start` from any state re-arms the machine, so a wrapper can be reused
//! across repeated analyses of the same slot.

/// Lifecycle of one analysis job
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisState<T> {
    /// No job has been started
    #[default]
    Idle,
    /// A job is in flight
    Running,
    /// The last job completed with a value
    Succeeded(T),
    /// The last job failed; the message is host-displayable
    Failed(String),
}

impl<T> AnalysisState<T> {
    /// Enter `Running`, discarding any previous outcome
    pub fn start(&mut self) {
        *self = AnalysisState::Running;
    }

    /// Record a successful outcome
    pub fn succeed(&mut self, value: T) {
        *self = AnalysisState::Succeeded(value);
    }

    /// Record a failure
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = AnalysisState::Failed(message.into());
    }

    /// Drive one job through the machine: enter `Running`, execute, record
    /// the outcome, and hand back a reference to the stored result
    pub fn run<E, F>(&mut self, job: F) -> Option<&T>
    where
        E: std::fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        self.start();
        match job() {
            Ok(value) => self.succeed(value),
            Err(err) => self.fail(err.to_string()),
        }
        self.result()
    }

    pub fn is_running(&self) -> bool {
        matches!(self, AnalysisState::Running)
    }

    /// The successful value, if the last job succeeded
    pub fn result(&self) -> Option<&T> {
        match self {
            AnalysisState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if the last job failed
    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state: AnalysisState<u32> = AnalysisState::default();
        assert_eq!(state, AnalysisState::Idle);
        assert!(!state.is_running());
    }

    #[test]
    fn test_success_path() {
        let mut state = AnalysisState::Idle;
        state.start();
        assert!(state.is_running());

        state.succeed(128u32);
        assert_eq!(state.result(), Some(&128));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_failure_path() {
        let mut state: AnalysisState<u32> = AnalysisState::Idle;
        state.start();
        state.fail("empty buffer");

        assert_eq!(state.result(), None);
        assert_eq!(state.error(), Some("empty buffer"));
    }

    #[test]
    fn test_run_records_outcome() {
        let mut state: AnalysisState<u32> = AnalysisState::default();

        let ok = state.run(|| Ok::<_, String>(120));
        assert_eq!(ok, Some(&120));

        let err = state.run(|| Err::<u32, _>("decode failed"));
        assert_eq!(err, None);
        assert_eq!(state.error(), Some("decode failed"));
    }

    #[test]
    fn test_start_rearms_after_outcome() {
        let mut state = AnalysisState::Succeeded(90u32);
        state.start();
        assert!(state.is_running());
        assert_eq!(state.result(), None);
    }
}
