use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chambers_core_ratelimit_contracts::{RateLimitError, RateLimitService};
use chambers_di::Build;
use chambers_models::SourceId;
use chambers_shared_contracts::time::TimeService;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Sliding-window rate limiter with two gates: a global window shared by all
/// sources and one window per source identifier.
///
/// The full prune-check-record sequence runs under a single lock acquisition,
/// so two concurrent requests can never both claim the last free slot.
#[derive(Debug, Clone, Build)]
pub struct RateLimitServiceImpl<Time> {
    time: Time,
    config: RateLimitServiceConfig,
    #[state]
    state: Arc<Mutex<Windows>>,
}

#[derive(Debug, Clone)]
pub struct RateLimitServiceConfig {
    pub global_window: Duration,
    pub global_capacity: usize,
    pub source_window: Duration,
    pub source_capacity: usize,
}

#[derive(Debug, Default)]
struct Windows {
    global: VecDeque<DateTime<Utc>>,
    per_source: HashMap<SourceId, VecDeque<DateTime<Utc>>>,
}

impl<Time: TimeService> RateLimitService for RateLimitServiceImpl<Time> {
    fn admit(&self, source: &SourceId) -> Result<(), RateLimitError> {
        let now = self.time.now();
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let windows = &mut *guard;

        // The global gate is evaluated first, independent of the source.
        prune(&mut windows.global, now - self.config.global_window);
        if windows.global.len() >= self.config.global_capacity {
            debug!(%source, "rejecting request, global window saturated");
            return Err(RateLimitError::DailyLimit);
        }

        let window = windows.per_source.entry(source.clone()).or_default();
        prune(window, now - self.config.source_window);
        if window.len() >= self.config.source_capacity {
            debug!(%source, "rejecting request, source window saturated");
            return Err(RateLimitError::TooManyRequests);
        }

        // Only admitted requests are recorded, in both windows.
        window.push_back(now);
        windows.global.push_back(now);

        Ok(())
    }
}

fn prune(window: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
    while window.front().is_some_and(|&ts| ts <= cutoff) {
        window.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use chambers_shared_contracts::time::MockTimeService;
    use chambers_utils::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn config() -> RateLimitServiceConfig {
        RateLimitServiceConfig {
            global_window: Duration::from_secs(24 * 3600),
            global_capacity: 100,
            source_window: Duration::from_secs(15 * 60),
            source_capacity: 5,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap()
    }

    fn sut(config: RateLimitServiceConfig, time: MockTimeService) -> RateLimitServiceImpl<MockTimeService> {
        RateLimitServiceImpl {
            time,
            config,
            state: Default::default(),
        }
    }

    #[test]
    fn admits_up_to_source_capacity() {
        // Arrange
        let time = MockTimeService::new().with_now_const(now());
        let sut = sut(config(), time);
        let source = SourceId::from("203.0.113.7");

        // Act + Assert
        for _ in 0..5 {
            sut.admit(&source).unwrap();
        }
        assert_matches!(sut.admit(&source), Err(RateLimitError::TooManyRequests));

        // a different source is unaffected
        sut.admit(&SourceId::from("203.0.113.8")).unwrap();
    }

    #[test]
    fn global_gate_rejects_across_sources() {
        // Arrange
        let time = MockTimeService::new().with_now_const(now());
        let sut = sut(
            RateLimitServiceConfig {
                global_capacity: 2,
                ..config()
            },
            time,
        );

        // Act + Assert
        sut.admit(&SourceId::from("a")).unwrap();
        sut.admit(&SourceId::from("b")).unwrap();
        assert_matches!(
            sut.admit(&SourceId::from("c")),
            Err(RateLimitError::DailyLimit)
        );
    }

    #[test]
    fn global_gate_checked_before_source_gate() {
        // Arrange
        let time = MockTimeService::new().with_now_const(now());
        let sut = sut(
            RateLimitServiceConfig {
                global_capacity: 1,
                source_capacity: 1,
                ..config()
            },
            time,
        );
        let source = SourceId::from("a");

        // Act
        sut.admit(&source).unwrap();
        let result = sut.admit(&source);

        // Assert: both gates are saturated, the global one wins
        assert_matches!(result, Err(RateLimitError::DailyLimit));
    }

    #[test]
    fn rejected_requests_consume_no_quota() {
        // Arrange
        let time = MockTimeService::new().with_now_const(now());
        let sut = sut(
            RateLimitServiceConfig {
                global_capacity: 2,
                source_capacity: 1,
                ..config()
            },
            time,
        );

        // Act + Assert
        sut.admit(&SourceId::from("a")).unwrap();
        for _ in 0..3 {
            assert_matches!(
                sut.admit(&SourceId::from("a")),
                Err(RateLimitError::TooManyRequests)
            );
        }

        // the rejections above did not count towards the global window
        sut.admit(&SourceId::from("b")).unwrap();
        assert_matches!(
            sut.admit(&SourceId::from("c")),
            Err(RateLimitError::DailyLimit)
        );
    }

    #[test]
    fn source_window_slides() {
        // Arrange
        let time = MockTimeService::new()
            .with_now(now())
            .with_now(now() + Duration::from_secs(14 * 60 + 59))
            .with_now(now() + Duration::from_secs(15 * 60));
        let sut = sut(
            RateLimitServiceConfig {
                source_capacity: 1,
                ..config()
            },
            time,
        );
        let source = SourceId::from("a");

        // Act + Assert
        sut.admit(&source).unwrap();
        assert_matches!(sut.admit(&source), Err(RateLimitError::TooManyRequests));
        // the first timestamp has left the window by now
        sut.admit(&source).unwrap();
    }

    #[test]
    fn global_window_slides() {
        // Arrange
        let time = MockTimeService::new()
            .with_now(now())
            .with_now(now() + Duration::from_secs(23 * 3600))
            .with_now(now() + Duration::from_secs(24 * 3600 + 1));
        let sut = sut(
            RateLimitServiceConfig {
                global_capacity: 1,
                ..config()
            },
            time,
        );

        // Act + Assert
        sut.admit(&SourceId::from("a")).unwrap();
        assert_matches!(
            sut.admit(&SourceId::from("b")),
            Err(RateLimitError::DailyLimit)
        );
        sut.admit(&SourceId::from("b")).unwrap();
    }
}
