//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};

use crate::inbound::http::state::HttpState;
use crate::middleware::MethodOverride;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build the full application with fresh in-memory state, the method
/// override middleware, and a test session middleware.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::in_memory()))
        .wrap(MethodOverride)
        .wrap(test_session_middleware())
        .configure(crate::server::routes)
}

/// Extract the `session` cookie from a response, if one was set.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Submit the registration form.
pub async fn register_response<S, B, E>(
    app: &S,
    name: &str,
    email: &str,
    password: &str,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_form([("name", name), ("email", email), ("password", password)])
            .to_request(),
    )
    .await
}

/// Register the fixture user `Alice <a@x.com>` with password `secret1`.
pub async fn register_alice<S, B, E>(app: &S)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    let res = register_response(app, "Alice", "a@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "fixture registration");
}

/// Submit the login form.
pub async fn login_response<S, B, E>(app: &S, email: &str, password: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("email", email), ("password", password)])
            .to_request(),
    )
    .await
}

/// Log in and return the freshly issued session cookie.
pub async fn login_response_cookie<S, B, E>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    let res = login_response(app, email, password).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "fixture login");
    session_cookie(&res).expect("login must set a session cookie")
}
