//! Access guards gating handlers on the resolved identity.
//!
//! Two extractors cover the whole policy: [`Authenticated`] keeps strangers
//! off the home page, [`Anonymous`] keeps logged-in users from re-submitting
//! the login and registration forms. Both only inspect the identity the
//! session manager resolves; their sole side effect is the redirect
//! decision.

use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::StatusCode, http::header, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserRecord};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Resolve the request's identity through the session manager chain:
/// cookie token -> session registry -> credential store.
///
/// A missing, invalid, or revoked token yields `Ok(None)` (the request is
/// simply unauthenticated); only backend failures become errors. A live
/// token whose user record no longer exists also yields `Ok(None)`.
pub(crate) fn resolve_identity(
    session: &SessionContext,
    state: &HttpState,
) -> Result<Option<UserRecord>, Error> {
    let Some(token) = session.token() else {
        return Ok(None);
    };
    let Some(user_id) = state
        .sessions()
        .resolve(&token)
        .map_err(|err| Error::internal(err.to_string()))?
    else {
        return Ok(None);
    };
    let user = state
        .users()
        .find_by_id(user_id)
        .map_err(|err| Error::internal(err.to_string()))?;
    if user.is_none() {
        tracing::warn!(%user_id, "live session token references a missing user record");
    }
    Ok(user)
}

/// Where a guard sends a request it refuses to let through.
#[derive(Debug)]
pub enum GuardRedirect {
    /// Unauthenticated request for an authenticated-only page.
    ToLogin,
    /// Authenticated request for a guest-only page.
    ToHome,
    /// Identity resolution itself failed; not a redirect.
    Failure(Error),
}

impl std::fmt::Display for GuardRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToLogin => write!(f, "redirecting unauthenticated request to /login"),
            Self::ToHome => write!(f, "redirecting authenticated request to /"),
            Self::Failure(err) => write!(f, "identity resolution failed: {err}"),
        }
    }
}

impl std::error::Error for GuardRedirect {}

impl ResponseError for GuardRedirect {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ToLogin | Self::ToHome => StatusCode::FOUND,
            Self::Failure(err) => err.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::ToLogin => HttpResponse::Found()
                .insert_header((header::LOCATION, "/login"))
                .finish(),
            Self::ToHome => HttpResponse::Found()
                .insert_header((header::LOCATION, "/"))
                .finish(),
            Self::Failure(err) => err.error_response(),
        }
    }
}

fn extract_identity(
    req: &HttpRequest,
    payload: &mut Payload,
) -> LocalBoxFuture<'static, Result<Option<UserRecord>, GuardRedirect>> {
    let state = req.app_data::<web::Data<HttpState>>().cloned();
    let session_fut = SessionContext::from_request(req, payload);
    Box::pin(async move {
        let Some(state) = state else {
            return Err(GuardRedirect::Failure(Error::internal(
                "HttpState missing from app data",
            )));
        };
        let session = session_fut
            .await
            .map_err(|err| GuardRedirect::Failure(Error::from(err)))?;
        resolve_identity(&session, &state).map_err(GuardRedirect::Failure)
    })
}

/// Guard admitting only authenticated requests; carries the resolved record.
pub struct Authenticated(pub UserRecord);

impl FromRequest for Authenticated {
    type Error = GuardRedirect;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = extract_identity(req, payload);
        Box::pin(async move {
            match identity.await? {
                Some(user) => Ok(Self(user)),
                None => Err(GuardRedirect::ToLogin),
            }
        })
    }
}

/// Guard admitting only unauthenticated requests.
pub struct Anonymous;

impl FromRequest for Anonymous {
    type Error = GuardRedirect;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = extract_identity(req, payload);
        Box::pin(async move {
            match identity.await? {
                Some(_) => Err(GuardRedirect::ToHome),
                None => Ok(Self),
            }
        })
    }
}
