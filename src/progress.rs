//! Progress reporting utilities using indicatif.
//!
//! The matcher and scanner report through the [`ProgressCallback`] trait;
//! [`Progress`] renders those updates as terminal progress bars for the
//! CLI. Library consumers can plug in their own implementation.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for scanning and matching phases.
///
/// Implement this trait to receive progress updates during corpus
/// scanning and similarity-matrix construction.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "scan", "compare")
    /// * `total` - Total number of items to process (0 if unknown)
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called as items complete.
    ///
    /// # Arguments
    ///
    /// * `completed` - Number of items completed so far
    fn on_progress(&self, completed: usize);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Progress reporter rendering an indicatif bar per phase.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars are displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }
        let bar = if total > 0 {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    "{msg:>10} [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
            );
            bar
        } else {
            let bar = ProgressBar::new_spinner();
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        bar.set_message(phase.to_string());
        *self.bar.lock().expect("progress bar lock poisoned") = Some(bar);
    }

    fn on_progress(&self, completed: usize) {
        if let Some(bar) = self.bar.lock().expect("progress bar lock poisoned").as_ref() {
            bar.set_position(completed as u64);
        }
    }

    fn on_phase_end(&self, _phase: &str) {
        if let Some(bar) = self.bar.lock().expect("progress bar lock poisoned").take() {
            bar.finish_and_clear();
        }
    }
}

/// No-op callback for library use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_phase_start(&self, _phase: &str, _total: usize) {}
    fn on_progress(&self, _completed: usize) {}
    fn on_phase_end(&self, _phase: &str) {}
}
