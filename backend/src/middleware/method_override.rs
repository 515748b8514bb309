//! Method override middleware for HTML forms.
//!
//! Browsers only submit GET and POST, so the logout form posts with
//! `_method=DELETE` in the query string and this middleware rewrites the
//! request method before routing, mirroring Express's `method-override`.
//! Only POST requests are rewritten, and only to DELETE, PUT, or PATCH.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{Ready, ready};

const OVERRIDE_PARAM: &str = "_method";

fn override_from_query(query: &str) -> Option<Method> {
    let value = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == OVERRIDE_PARAM).then_some(value)
    })?;
    match value.to_ascii_uppercase().as_str() {
        "DELETE" => Some(Method::DELETE),
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        _ => None,
    }
}

/// Middleware rewriting `POST ...?_method=X` into method `X` before routing.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use wicket::MethodOverride;
///
/// let app = App::new().wrap(MethodOverride);
/// ```
#[derive(Clone, Copy)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_from_query(req.query_string()) {
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}
