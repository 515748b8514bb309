//! HTTP server assembly: routes, session middleware, and the run loop.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, web};

use crate::inbound::http::state::HttpState;
use crate::inbound::http::{login, pages, users};
use crate::middleware::MethodOverride;

pub mod config;

pub use config::ServerConfig;

/// Register every route of the authentication flow.
///
/// Shared between the production server and test applications so both wire
/// the identical surface.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::login_form)
        .service(pages::register_form)
        .service(login::login)
        .service(login::logout)
        .service(users::register);
}

fn session_middleware(config: &ServerConfig) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), config.key().clone())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(config.cookie_secure())
        .cookie_http_only(true)
        .cookie_same_site(config.same_site())
        .build()
}

/// Bind and run the HTTP server until shutdown.
///
/// # Errors
/// Returns the bind or accept-loop error from the underlying server.
pub async fn run(config: ServerConfig, state: HttpState) -> std::io::Result<()> {
    let state = web::Data::new(state);
    let bind_addr = config.bind_addr();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(session_middleware(&config))
            .wrap(MethodOverride)
            .configure(routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
