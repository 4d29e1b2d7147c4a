//! Wall-clock aligned tick computation
//!
//! Ticks fall on multiples of the interval counted from the Unix epoch, so a
//! one minute interval ticks at the top of every minute regardless of how
//! long each pass took.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Time left until the next interval boundary
///
/// `since_epoch` is the current wall-clock time. Standing exactly on a
/// boundary waits a full interval. The result is never negative, so a pass
/// that overran its interval simply waits for the next boundary after it.
/// A zero interval yields zero.
pub fn next_delay(since_epoch: Duration, interval: Duration) -> Duration {
    let interval_nanos = interval.as_nanos();
    if interval_nanos == 0 {
        return Duration::ZERO;
    }

    let remainder = since_epoch.as_nanos() % interval_nanos;
    let wait = interval_nanos - remainder;
    // wait <= interval, which itself fit in a Duration.
    Duration::new(
        (wait / 1_000_000_000) as u64,
        (wait % 1_000_000_000) as u32,
    )
}

/// [`next_delay`] applied to the current system time
pub fn delay_until_next_tick(interval: Duration) -> Duration {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    next_delay(now, interval)
}
