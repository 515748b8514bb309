//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: carrying the opaque session token and the
//! one-shot flash messages. The cookie never holds the identity itself; it
//! holds the token the server-side registry resolves.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::Error;
use crate::domain::ports::SessionToken;

pub(crate) const TOKEN_KEY: &str = "session_token";
pub(crate) const FLASH_KEY: &str = "flash";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind a freshly minted token to this client, cycling the cookie.
    ///
    /// `renew` issues a new cookie identity so nothing from the
    /// pre-authentication session survives into the authenticated one.
    ///
    /// # Errors
    /// Returns [`Error`] when the session state cannot be written.
    pub fn establish(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(TOKEN_KEY, token)
            .map_err(|error| Error::internal(format!("failed to persist session token: {error}")))
    }

    /// Fetch the session token presented by this request, if any.
    ///
    /// A corrupt or unreadable token is treated as an absent session, not
    /// an error; the request simply proceeds unauthenticated.
    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        match self.0.get::<SessionToken>(TOKEN_KEY) {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(%error, "unreadable session token in cookie");
                None
            }
        }
    }

    /// Drop all session state and instruct the client to discard the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Append a one-shot message shown on the next rendered page.
    ///
    /// # Errors
    /// Returns [`Error`] when the session state cannot be written.
    pub fn push_flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut messages = self.peek_flashes();
        messages.push(message.into());
        self.0
            .insert(FLASH_KEY, messages)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    /// Read and clear the pending flash messages.
    ///
    /// Messages are one-shot: a second call returns an empty list unless
    /// something was pushed in between.
    #[must_use]
    pub fn take_flashes(&self) -> Vec<String> {
        let messages = self.peek_flashes();
        self.0.remove(FLASH_KEY);
        messages
    }

    fn peek_flashes(&self) -> Vec<String> {
        match self.0.get::<Vec<String>>(FLASH_KEY) {
            Ok(Some(messages)) => messages,
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "unreadable flash messages in session");
                Vec::new()
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_session_token() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let token = SessionToken::new("token-1").expect("fixture token");
                        session.establish(&token)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        match session.token() {
                            Some(token) => HttpResponse::Ok().body(token.to_string()),
                            None => HttpResponse::NoContent().finish(),
                        }
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "token-1");
    }

    #[actix_web::test]
    async fn flash_messages_are_one_shot() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/push",
                    web::get().to(|session: SessionContext| async move {
                        session.push_flash("first")?;
                        session.push_flash("second")?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|session: SessionContext| async move {
                        HttpResponse::Ok().body(session.take_flashes().join("|"))
                    }),
                ),
        )
        .await;

        let push_res =
            test::call_service(&app, test::TestRequest::get().uri("/push").to_request()).await;
        let cookie = push_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let first_read = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let drained_cookie = first_read
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("updated session cookie")
            .into_owned();
        let body = test::read_body(first_read).await;
        assert_eq!(body, "first|second");

        let second_read = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(drained_cookie)
                .to_request(),
        )
        .await;
        let body = test::read_body(second_read).await;
        assert!(body.is_empty(), "flash messages must clear after one read");
    }

    #[actix_web::test]
    async fn missing_session_yields_no_token() {
        let app = test::init_service(session_test_app().route(
            "/get",
            web::get().to(|session: SessionContext| async move {
                match session.token() {
                    Some(_) => HttpResponse::Ok().finish(),
                    None => HttpResponse::NoContent().finish(),
                }
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
