use chambers_models::SourceId;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RateLimitService: Send + Sync + 'static {
    /// Decides whether a request from `source` may proceed. On admission the
    /// request is recorded against both the global and the per-source window;
    /// rejected requests consume no quota.
    fn admit(&self, source: &SourceId) -> Result<(), RateLimitError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitError {
    #[error("Daily email limit reached. Please try again tomorrow.")]
    DailyLimit,
    #[error("Too many requests. Please try again later.")]
    TooManyRequests,
}

#[cfg(feature = "mock")]
impl MockRateLimitService {
    pub fn with_admit(mut self, source: SourceId, result: Result<(), RateLimitError>) -> Self {
        self.expect_admit()
            .once()
            .with(mockall::predicate::eq(source))
            .return_once(move |_| result);
        self
    }
}
