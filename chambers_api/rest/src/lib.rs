use std::net::IpAddr;

use axum::Router;
use chambers_core_contact_contracts::ContactFeatureService;
use chambers_core_health_contracts::HealthFeatureService;
use chambers_core_ratelimit_contracts::RateLimitService;
use chambers_di::Build;
use tokio::net::TcpListener;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, RateLimit, Contact> {
    health: Health,
    ratelimit: RateLimit,
    contact: Contact,
}

impl<Health, RateLimit, Contact> RestServer<Health, RateLimit, Contact>
where
    Health: HealthFeatureService,
    RateLimit: RateLimitService,
    Contact: ContactFeatureService,
{
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(
                self.ratelimit.into(),
                self.contact.into(),
            ));

        // source_id and request_id are applied outermost so the trace span can
        // pick both up from the request extensions
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::source_id::add(router)
    }
}
