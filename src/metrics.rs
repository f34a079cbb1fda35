//! Optional performance metrics, enabled via TEXTDIFF_METRICS=1.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

static METRICS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Environment variable that switches metrics on.
pub const METRICS_ENV: &str = "TEXTDIFF_METRICS";

/// Initialize metrics from environment. Call once at startup.
pub fn init() {
    let enabled = std::env::var(METRICS_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    set_enabled(enabled);
}

/// Force metrics on or off.
pub fn set_enabled(enabled: bool) {
    METRICS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if metrics collection is enabled.
#[inline]
pub fn enabled() -> bool {
    METRICS_ENABLED.load(Ordering::Relaxed)
}

/// RAII timer that logs duration on drop.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Start a timer if metrics are enabled.
    #[inline]
    pub fn start(label: &'static str) -> Option<Self> {
        if enabled() {
            Some(Self {
                label,
                start: Instant::now(),
            })
        } else {
            None
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log_metric(self.label, self.start.elapsed());
    }
}

fn log_metric(label: &str, duration: Duration) {
    log::info!(target: "metrics", "{}: {:?}", label, duration);
}
