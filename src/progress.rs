//! Spinner and log helpers for the command-line tools.
//!
//! Spinners are drawn on stderr so stdout carries only results. In log-only
//! mode spinners are hidden and phases are reported as plain `[phase]` lines,
//! which keeps piped or redirected output clean.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Global flag for log-only mode (set from args in main)
pub static LOG_ONLY: AtomicBool = AtomicBool::new(false);

/// Set log-only mode globally
pub fn set_log_only(value: bool) {
    LOG_ONLY.store(value, Ordering::Relaxed);
}

/// Check if log-only mode is enabled
pub fn is_log_only() -> bool {
    LOG_ONLY.load(Ordering::Relaxed)
}

/// Format duration in human-readable format
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

/// Print a phase line to stderr. Only shown in log-only mode, where it
/// stands in for the hidden spinner.
pub fn log_phase(phase: &str, msg: &str) {
    if is_log_only() {
        eprintln!("[{}] {}", phase, msg);
    }
}

/// Create a spinner for indeterminate progress.
/// In log-only mode, the spinner is hidden.
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if is_log_only() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    } else {
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg} {spinner} [{elapsed_precise}]") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
    }
    pb.set_message(msg.to_string());
    pb
}

/// Finish a spinner with a final message, echoing it as a phase line in
/// log-only mode.
pub fn finish_spinner(pb: &ProgressBar, phase: &str, msg: String) {
    log_phase(phase, &msg);
    pb.finish_with_message(msg);
}
