use chambers_core_contact_impl::ContactFeatureServiceImpl;
use chambers_core_health_impl::HealthFeatureServiceImpl;
use chambers_core_ratelimit_impl::RateLimitServiceImpl;
use chambers_email_impl::EmailServiceImpl;
use chambers_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = chambers_api_rest::RestServer<HealthFeature, RateLimit, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Email>;
pub type RateLimit = RateLimitServiceImpl<Time>;
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
