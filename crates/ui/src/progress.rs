//! Synthetic upload progress.
//!
//! The indexing endpoint reports nothing until it finishes, so the upload bar
//! advances on a timer instead of on transferred bytes. `SyntheticProgress` is
//! that policy; `ProgressReporter` delivers each change to whoever draws the bar.

use ikms_core::config::ProgressConfig;
use std::sync::Arc;
use std::time::Duration;

/// Fixed-step, timer-driven progress policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticProgress {
    /// Percentage added per tick
    pub step: u8,

    /// Time between ticks
    pub interval: Duration,

    /// Highest value reachable before the request resolves (below 100)
    pub cap: u8,

    /// Delay after completion before the bar returns to zero
    pub reset_delay: Duration,
}

impl SyntheticProgress {
    /// Value after one tick. Never decreases and never passes the cap.
    pub fn advance(&self, current: u8) -> u8 {
        let cap = self.cap.min(99);
        current.saturating_add(self.step).min(cap).max(current)
    }
}

impl Default for SyntheticProgress {
    fn default() -> Self {
        Self::from(&ProgressConfig::default())
    }
}

impl From<&ProgressConfig> for SyntheticProgress {
    fn from(config: &ProgressConfig) -> Self {
        Self {
            step: config.step_percent,
            interval: Duration::from_millis(config.interval_ms.max(1)),
            cap: config.cap_percent.min(99),
            reset_delay: Duration::from_millis(config.reset_delay_ms),
        }
    }
}

/// Progress change emitted during an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Phase of the operation, currently always "upload"
    pub phase: String,

    /// Bar value in `0..=100`
    pub percent: u8,

    /// File being uploaded
    pub file_name: String,
}

impl ProgressEvent {
    pub fn new(phase: impl Into<String>, percent: u8, file_name: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            percent: percent.min(100),
            file_name: file_name.into(),
        }
    }

    /// Format as a single status line, e.g. `[upload] 40% - paper.pdf`.
    pub fn format_simple(&self) -> String {
        format!("[{}] {}% - {}", self.phase, self.percent, self.file_name)
    }
}

/// Callback for progress events.
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Progress reporter that emits events through a callback.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Create a no-op reporter (no events emitted).
    pub fn noop() -> Self {
        Self { callback: None }
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(callback) = &self.callback {
            tracing::debug!(
                phase = %event.phase,
                percent = event.percent,
                file = %event.file_name,
                "Progress event"
            );

            callback(event);
        }
    }

    /// Emit an upload progress change for `file_name`.
    pub fn upload(&self, percent: u8, file_name: &str) {
        self.emit(ProgressEvent::new("upload", percent, file_name));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::noop()
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_advance_steps_and_caps() {
        let policy = SyntheticProgress::default();
        let mut p = 0;
        let mut seen = Vec::new();
        for _ in 0..12 {
            p = policy.advance(p);
            seen.push(p);
        }
        assert_eq!(&seen[..9], &[10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert!(seen[9..].iter().all(|&v| v == 90));
    }

    #[test]
    fn test_advance_never_decreases_or_reaches_100() {
        let policy = SyntheticProgress {
            step: 250,
            interval: Duration::from_millis(1),
            cap: 120,
            reset_delay: Duration::ZERO,
        };
        assert_eq!(policy.advance(0), 99);
        assert_eq!(policy.advance(99), 99);
        // A value above the cap is left alone rather than pulled back.
        let policy = SyntheticProgress::default();
        assert_eq!(policy.advance(95), 95);
    }

    #[test]
    fn test_from_config() {
        let config = ProgressConfig {
            step_percent: 5,
            interval_ms: 100,
            cap_percent: 80,
            reset_delay_ms: 500,
        };
        let policy = SyntheticProgress::from(&config);
        assert_eq!(policy.step, 5);
        assert_eq!(policy.interval, Duration::from_millis(100));
        assert_eq!(policy.cap, 80);
        assert_eq!(policy.reset_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_progress_event_format() {
        let event = ProgressEvent::new("upload", 40, "paper.pdf");
        assert_eq!(event.format_simple(), "[upload] 40% - paper.pdf");
        assert_eq!(ProgressEvent::new("upload", 140, "x").percent, 100);
    }

    #[test]
    fn test_progress_reporter_emit() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let reporter = ProgressReporter::new(Arc::new(move |event| {
            events_clone.lock().unwrap().push(event);
        }));

        reporter.upload(30, "paper.pdf");

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].phase, "upload");
        assert_eq!(captured[0].percent, 30);
        assert_eq!(captured[0].file_name, "paper.pdf");
    }

    #[test]
    fn test_noop_reporter() {
        let reporter = ProgressReporter::noop();
        reporter.upload(10, "test"); // Should not panic
    }
}
