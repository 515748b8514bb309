//! Login and logout handlers.
//!
//! ```text
//! POST /login     email=...&password=...
//! DELETE /logout  (HTML forms reach this via POST + _method=DELETE)
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::Deserialize;

use crate::domain::{AuthFailure, Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::Anonymous;
use crate::inbound::http::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Flash shown for every refused login.
///
/// One generic message for both unknown emails and wrong passwords, so
/// responses never confirm whether an email is registered.
pub const LOGIN_FAILED_FLASH: &str = "Invalid email or password";

/// Login form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Email the account was registered under.
    pub email: String,
    /// Plaintext password to verify.
    pub password: String,
}

/// Verify credentials and establish a session.
///
/// Success binds a freshly minted token to the user and redirects to `/`.
/// Bad credentials set a generic flash and redirect back to `/login`.
/// Internal verifier or registry failures surface as 500, never as a
/// silent redirect.
#[post("/login")]
pub async fn login(
    _guest: Anonymous,
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(reason) => {
            tracing::debug!(%reason, "login rejected before verification");
            session.push_flash(LOGIN_FAILED_FLASH)?;
            return Ok(see_other("/login"));
        }
    };

    match state.authenticator().authenticate(&credentials).await {
        Ok(user) => {
            let token = state
                .sessions()
                .start(user.id())
                .map_err(|err| Error::internal(err.to_string()))?;
            session.establish(&token)?;
            tracing::debug!(user_id = %user.id(), "login succeeded");
            Ok(see_other("/"))
        }
        Err(AuthFailure::Internal { message }) => Err(Error::internal(message)),
        Err(reason) => {
            // The distinct reason stays in the logs only.
            tracing::debug!(%reason, "login refused");
            session.push_flash(LOGIN_FAILED_FLASH)?;
            Ok(see_other("/login"))
        }
    }
}

/// Revoke the session server-side and discard the client cookie.
///
/// A registry failure propagates to the error handler; the handler never
/// pretends a logout succeeded.
#[delete("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(token) = session.token() {
        state
            .sessions()
            .revoke(&token)
            .map_err(|err| Error::internal(err.to_string()))?;
    }
    session.purge();
    Ok(see_other("/login"))
}
