//! Server construction and route wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, BindAddrError, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::auth::{issue_token, logout};
use crate::inbound::http::health::{HealthState, live, ready, root};
use crate::inbound::http::posts::{
    create_post, delete_post, get_post, list_posts, list_posts_by_owner, list_soonest_posts,
    replace_post, search_posts,
};
use crate::inbound::http::requests::{create_request, delete_request, list_requests_by_owner};
use crate::inbound::http::state::HttpState;

/// Shared data handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application with every route and the trace middleware.
///
/// `GET /allVolunteer/limit` is registered ahead of `GET /allVolunteer/{id}`.
pub fn build_app(
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
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(root)
        .service(ready)
        .service(live)
        .service(issue_token)
        .service(logout)
        .service(create_post)
        .service(list_posts)
        .service(search_posts)
        .service(list_soonest_posts)
        .service(get_post)
        .service(delete_post)
        .service(replace_post)
        .service(list_posts_by_owner)
        .service(create_request)
        .service(list_requests_by_owner)
        .service(delete_request);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness flips to ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr();
    // The signing key now lives in the token adapter; drop this copy.
    drop(config);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Tests for server bootstrap and readiness signalling.

    use super::*;
    use crate::inbound::http::identity_config::{BuildMode, identity_settings_from_env};
    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use std::net::SocketAddr;

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    #[fixture]
    fn server_config() -> ServerConfig {
        let mut env = MockEnv::new();
        env.expect_string().times(0..).returning(|_| None);
        let identity =
            identity_settings_from_env(&env, BuildMode::Debug).expect("debug identity settings");
        ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)), identity)
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready(
        health_state: web::Data<HealthState>,
        server_config: ServerConfig,
    ) {
        assert!(!health_state.is_ready(), "state should start unready");

        let _server = create_server(health_state.clone(), server_config).expect("server binds");

        assert!(health_state.is_ready(), "server should mark ready");
    }
}
