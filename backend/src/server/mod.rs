//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{
    InMemoryIdentityProvider, InMemoryOpportunityRepository, InMemoryProfileRepository,
};
use crate::domain::{AccountService, OpportunityService};
use crate::inbound::http::auth::{current_user, login, logout, signup};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::opportunities::{
    create_opportunity, delete_opportunity, list_opportunities,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::{DieselOpportunityRepository, DieselProfileRepository};

/// Build the HTTP state, using database-backed repositories when a pool is
/// available and in-memory stores otherwise.
///
/// The identity provider is always the in-memory implementation: credential
/// storage is owned by an external provider in production deployments, and no
/// database adapter exists for it here.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let identity = Arc::new(InMemoryIdentityProvider::new());

    match &config.db_pool {
        Some(pool) => {
            let accounts = Arc::new(AccountService::new(
                identity,
                Arc::new(DieselProfileRepository::new(pool.clone())),
            ));
            let opportunities = Arc::new(OpportunityService::new(Arc::new(
                DieselOpportunityRepository::new(pool.clone()),
            )));
            HttpState::new(
                accounts.clone(),
                accounts,
                opportunities.clone(),
                opportunities,
            )
        }
        None => {
            let accounts = Arc::new(AccountService::new(
                identity,
                Arc::new(InMemoryProfileRepository::new()),
            ));
            let opportunities = Arc::new(OpportunityService::new(Arc::new(
                InMemoryOpportunityRepository::new(),
            )));
            HttpState::new(
                accounts.clone(),
                accounts,
                opportunities.clone(),
                opportunities,
            )
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(signup)
        .service(login)
        .service(logout)
        .service(current_user)
        .service(create_opportunity)
        .service(list_opportunities)
        .service(delete_opportunity);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Smoke tests over the assembled application with in-memory stores.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    fn in_memory_config() -> ServerConfig {
        ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("loopback address"),
        )
    }

    #[actix_web::test]
    async fn assembled_app_serves_probes_and_auth() {
        let config = in_memory_config();
        let http_state = web::Data::new(build_http_state(&config));
        let app = test::init_service(build_app(AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state,
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(json!({ "email": "jo@example.com", "password": "hunter2" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        // Session-guarded routes respond 401 without a cookie.
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/opportunities")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
