//! Shared constants for the engine

use std::time::Duration;

/// Minimum time between two drain iterations; bounds the output frame rate
pub const DEFAULT_MIN_REFRESH: Duration = Duration::from_millis(100);

/// Lowest accepted drain floor, to keep a misconfigured bar from spinning
pub const MIN_REFRESH_LOWER_BOUND: Duration = Duration::from_millis(10);

/// How long shutdown waits for tasks before aborting them
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(2);
