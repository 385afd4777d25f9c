use std::sync::Arc;

use chambers_config::Config;
use chambers_core_contact_impl::ContactFeatureConfig;
use chambers_core_health_impl::HealthFeatureConfig;
use chambers_core_ratelimit_impl::RateLimitServiceConfig;
use chambers_di::provider;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            ContactFeatureConfig,
            HealthFeatureConfig,
            RateLimitServiceConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        contact_feature_config: ContactFeatureConfig,
        health_feature_config: HealthFeatureConfig,
        ratelimit_service_config: RateLimitServiceConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let contact_feature_config = ContactFeatureConfig {
            recipient: Arc::new(config.contact.recipient.clone()),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        let ratelimit_service_config = RateLimitServiceConfig {
            global_window: config.ratelimit.global_window.into(),
            global_capacity: config.ratelimit.global_capacity,
            source_window: config.ratelimit.source_window.into(),
            source_capacity: config.ratelimit.source_capacity,
        };

        Self {
            _cache: Default::default(),
            contact_feature_config,
            health_feature_config,
            ratelimit_service_config,
        }
    }
}
