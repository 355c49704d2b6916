//! Two-tier fixed-window rate limiter for outbound Cal.com calls.
//!
//! Requests are counted in a 1-second burst window and a 1-day window.
//! A call is rejected when either window is full; rejected calls do not
//! consume budget. Counters reset once more than a full window length has
//! elapsed since the window started.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Length of the burst window.
pub const SECOND_WINDOW: Duration = Duration::from_millis(1_000);

/// Length of the daily window.
pub const DAY_WINDOW: Duration = Duration::from_millis(86_400_000);

/// Request budget for both windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBudget {
    /// Maximum calls per 1-second window.
    pub per_second: u32,

    /// Maximum calls per 1-day window.
    pub per_day: u32,
}

impl Default for RateBudget {
    fn default() -> Self {
        Self {
            per_second: 5,
            per_day: 1000,
        }
    }
}

/// Which window rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateWindow {
    Second,
    Day,
}

impl std::fmt::Display for RateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Second => write!(f, "per-second"),
            Self::Day => write!(f, "per-day"),
        }
    }
}

#[derive(Debug)]
struct RateWindowState {
    second_count: u32,
    day_count: u32,
    second_window_start: Instant,
    day_window_start: Instant,
}

impl RateWindowState {
    fn new(now: Instant) -> Self {
        Self {
            second_count: 0,
            day_count: 0,
            second_window_start: now,
            day_window_start: now,
        }
    }
}

/// Fixed-window limiter shared by every tool call.
#[derive(Debug)]
pub struct RateLimiter {
    budget: RateBudget,
    state: Mutex<RateWindowState>,
}

impl RateLimiter {
    /// Create a limiter whose windows both start now.
    pub fn new(budget: RateBudget) -> Self {
        Self::new_at(budget, Instant::now())
    }

    /// Create a limiter whose windows both start at `now`.
    pub fn new_at(budget: RateBudget, now: Instant) -> Self {
        Self {
            budget,
            state: Mutex::new(RateWindowState::new(now)),
        }
    }

    /// The configured budget.
    pub fn budget(&self) -> RateBudget {
        self.budget
    }

    /// Record one call, or reject it if either window is exhausted.
    pub fn check_and_consume(&self) -> Result<(), RateWindow> {
        self.check_and_consume_at(Instant::now())
    }

    /// Same as [`check_and_consume`](Self::check_and_consume) with an explicit clock.
    pub fn check_and_consume_at(&self, now: Instant) -> Result<(), RateWindow> {
        // A poisoned lock still holds valid counters.
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if now.saturating_duration_since(state.second_window_start) > SECOND_WINDOW {
            state.second_count = 0;
            state.second_window_start = now;
        }

        if now.saturating_duration_since(state.day_window_start) > DAY_WINDOW {
            state.day_count = 0;
            state.day_window_start = now;
        }

        if state.second_count >= self.budget.per_second {
            warn!(
                limit = self.budget.per_second,
                "Rate limit exceeded (per-second window)"
            );
            return Err(RateWindow::Second);
        }

        if state.day_count >= self.budget.per_day {
            warn!(
                limit = self.budget.per_day,
                "Rate limit exceeded (per-day window)"
            );
            return Err(RateWindow::Day);
        }

        state.second_count += 1;
        state.day_count += 1;

        debug!(
            second_count = state.second_count,
            day_count = state.day_count,
            "Rate budget consumed"
        );

        Ok(())
    }

    /// Current `(second_count, day_count)`.
    pub fn usage(&self) -> (u32, u32) {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        (state.second_count, state.day_count)
    }

    /// Clear both windows, restarting them now.
    pub fn reset(&self) {
        self.reset_at(Instant::now());
    }

    /// Clear both windows, restarting them at `now`.
    pub fn reset_at(&self, now: Instant) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = RateWindowState::new(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(per_second: u32, per_day: u32) -> (RateLimiter, Instant) {
        let start = Instant::now();
        let budget = RateBudget {
            per_second,
            per_day,
        };
        (RateLimiter::new_at(budget, start), start)
    }

    #[test]
    fn test_accepts_up_to_per_second_limit() {
        let (limiter, start) = limiter(5, 1000);
        for _ in 0..5 {
            assert!(limiter.check_and_consume_at(start).is_ok());
        }
        assert_eq!(
            limiter.check_and_consume_at(start + Duration::from_millis(500)),
            Err(RateWindow::Second)
        );
    }

    #[test]
    fn test_rejected_call_does_not_consume() {
        let (limiter, start) = limiter(1, 1000);
        assert!(limiter.check_and_consume_at(start).is_ok());
        assert!(limiter.check_and_consume_at(start).is_err());
        assert!(limiter.check_and_consume_at(start).is_err());
        assert_eq!(limiter.usage(), (1, 1));
    }

    #[test]
    fn test_second_window_resets_after_elapsed() {
        let (limiter, start) = limiter(2, 1000);
        assert!(limiter.check_and_consume_at(start).is_ok());
        assert!(limiter.check_and_consume_at(start).is_ok());
        assert!(limiter.check_and_consume_at(start).is_err());

        let later = start + Duration::from_millis(1_001);
        assert!(limiter.check_and_consume_at(later).is_ok());
        assert_eq!(limiter.usage(), (1, 3));
    }

    #[test]
    fn test_second_window_boundary_is_exclusive() {
        let (limiter, start) = limiter(1, 1000);
        assert!(limiter.check_and_consume_at(start).is_ok());
        // Exactly one window length is not yet "elapsed".
        assert_eq!(
            limiter.check_and_consume_at(start + SECOND_WINDOW),
            Err(RateWindow::Second)
        );
    }

    #[test]
    fn test_day_window_boundary_is_exclusive() {
        let (limiter, start) = limiter(5, 1);
        assert!(limiter.check_and_consume_at(start).is_ok());
        assert_eq!(
            limiter.check_and_consume_at(start + DAY_WINDOW),
            Err(RateWindow::Day)
        );
        assert!(
            limiter
                .check_and_consume_at(start + DAY_WINDOW + Duration::from_millis(1))
                .is_ok()
        );
    }

    #[test]
    fn test_reset_at_restarts_windows() {
        let (limiter, start) = limiter(1, 1000);
        assert!(limiter.check_and_consume_at(start).is_ok());

        let restart = start + Duration::from_millis(400);
        limiter.reset_at(restart);
        assert!(limiter.check_and_consume_at(restart).is_ok());
        // Measured from the restart, not the original start.
        assert_eq!(
            limiter.check_and_consume_at(restart + SECOND_WINDOW),
            Err(RateWindow::Second)
        );
    }

    #[test]
    fn test_day_limit_applies_across_second_windows() {
        let (limiter, start) = limiter(5, 3);
        for i in 0..3u64 {
            let t = start + Duration::from_secs(2 * i);
            assert!(limiter.check_and_consume_at(t).is_ok());
        }
        let fresh_second = start + Duration::from_secs(60);
        assert_eq!(
            limiter.check_and_consume_at(fresh_second),
            Err(RateWindow::Day)
        );
    }

    #[test]
    fn test_day_window_resets_after_a_day() {
        let (limiter, start) = limiter(5, 1);
        assert!(limiter.check_and_consume_at(start).is_ok());
        assert!(limiter.check_and_consume_at(start + Duration::from_secs(10)).is_err());

        let next_day = start + DAY_WINDOW + Duration::from_millis(1);
        assert!(limiter.check_and_consume_at(next_day).is_ok());
    }

    #[test]
    fn test_reset_clears_counters() {
        let (limiter, start) = limiter(1, 1);
        assert!(limiter.check_and_consume_at(start).is_ok());
        limiter.reset();
        assert_eq!(limiter.usage(), (0, 0));
        assert!(limiter.check_and_consume().is_ok());
    }

    #[test]
    fn test_concurrent_calls_never_exceed_budget() {
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::new(RateBudget {
            per_second: 1000,
            per_day: 50,
        }));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| limiter.check_and_consume().is_ok())
                        .count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(accepted, 50);
    }
}
