// Time Provider Port (for testability)

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::Mutex;

/// Time provider interface (allows mocking in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;

    /// Current wall-clock time in the server's local zone
    fn now(&self) -> NaiveDateTime;

    /// Current calendar day in the server's local zone
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Manually advanced clock (tests and fixtures)
///
/// `now_millis` treats the naive time as UTC.
pub struct ManualTimeProvider {
    now: Mutex<NaiveDateTime>,
}

impl ManualTimeProvider {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl TimeProvider for ManualTimeProvider {
    fn now_millis(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }

    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        let clock = ManualTimeProvider::new(start);
        assert_eq!(clock.today(), start.date());

        clock.advance(Duration::hours(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
        assert_eq!(
            clock.now_millis() - start.and_utc().timestamp_millis(),
            3_600_000
        );
    }
}
