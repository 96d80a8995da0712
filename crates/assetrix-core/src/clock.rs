//! Time sources for response bodies.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Supplies wall-clock time and process uptime to handlers.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// A timestamp strictly after every one previously returned by this method.
    ///
    /// The default only forwards to [`Clock::now`], which is enough for clocks
    /// that are advanced by hand between reads.
    fn next_timestamp(&self) -> DateTime<Utc> {
        self.now()
    }

    /// Elapsed time since the clock was started.
    fn uptime(&self) -> Duration;
}

/// Production clock backed by the system time.
///
/// Readings are tracked in nanoseconds since the Unix epoch. [`Clock::now`]
/// never goes backward; [`Clock::next_timestamp`] additionally never repeats,
/// stepping at most one nanosecond past the previous reading when the wall
/// clock has not moved.
#[derive(Debug)]
pub struct SystemClock {
    started: Instant,
    last_issued_ns: AtomicI64,
}

impl SystemClock {
    /// Starts the clock. Uptime is measured from this call.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            last_issued_ns: AtomicI64::new(i64::MIN),
        }
    }

    fn wall_ns() -> i64 {
        Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }

    /// Stores `next(previous)` and returns it.
    fn issue(&self, next: impl Fn(i64) -> i64) -> DateTime<Utc> {
        // The closure never returns None, so both arms carry the previous value.
        let previous = match self
            .last_issued_ns
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(next(last)))
        {
            Ok(last) | Err(last) => last,
        };
        DateTime::from_timestamp_nanos(next(previous))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let wall = Self::wall_ns();
        self.issue(|last| wall.max(last))
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let wall = Self::wall_ns();
        self.issue(|last| wall.max(last.saturating_add(1)))
    }

    fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: DateTime<Utc>,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Creates a clock whose `now()` starts at `origin` with zero uptime.
    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Moves both `now()` and `uptime()` forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *elapsed += by;
    }

    fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    /// Starts at the Unix epoch with zero uptime.
    fn default() -> Self {
        Self::starting_at(DateTime::<Utc>::default())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.elapsed())
            .ok()
            .and_then(|elapsed| self.origin.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn uptime(&self) -> Duration {
        self.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_system_clock_next_timestamp_strictly_increasing() {
        let clock = SystemClock::new();
        let mut last = clock.next_timestamp();
        for _ in 0..10_000 {
            let next = clock.next_timestamp();
            assert!(next > last, "{next} should be after {last}");
            last = next;
        }
    }

    #[test]
    fn test_system_clock_next_timestamp_stays_near_wall_time() {
        let clock = SystemClock::new();
        let mut last = clock.next_timestamp();
        for _ in 0..200_000 {
            last = clock.next_timestamp();
        }
        let lead = last - Utc::now();
        assert!(
            lead <= chrono::Duration::milliseconds(5),
            "issued {last} runs {lead} ahead of the wall clock"
        );
    }

    #[test]
    fn test_system_clock_now_does_not_tick() {
        let clock = SystemClock::new();
        let mut last = clock.now();
        for _ in 0..200_000 {
            let next = clock.now();
            assert!(next >= last, "{next} went back from {last}");
            last = next;
        }
        assert!(last <= Utc::now());
    }

    #[test]
    fn test_system_clock_strictly_increasing_across_threads() {
        let clock = Arc::new(SystemClock::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = clock.clone();
                std::thread::spawn(move || {
                    (0..250)
                        .map(|_| clock.next_timestamp().timestamp_nanos_opt().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut issued: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = issued.len();
        issued.sort_unstable();
        issued.dedup();
        assert_eq!(issued.len(), total);
    }

    #[test]
    fn test_system_clock_uptime_non_decreasing() {
        let clock = SystemClock::new();
        let first = clock.uptime();
        let second = clock.uptime();
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::default();
        assert_eq!(clock.uptime(), Duration::ZERO);
        assert_eq!(clock.now(), DateTime::<Utc>::default());

        clock.advance(Duration::from_millis(1_500));
        assert_eq!(clock.uptime(), Duration::from_millis(1_500));
        assert_eq!(clock.now().timestamp_millis(), 1_500);
        assert_eq!(clock.next_timestamp(), clock.now());
    }

    #[test]
    fn test_manual_clock_custom_origin() {
        let origin = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let clock = ManualClock::starting_at(origin);
        clock.advance(Duration::from_secs(60));
        assert_eq!(clock.now().to_rfc3339(), "2024-01-01T00:01:00+00:00");
        assert_eq!(clock.uptime(), Duration::from_secs(60));
    }
}
