//! HTTP inbound adapter exposing the authentication flow.

use actix_web::{HttpResponse, http::header};

pub mod error;
pub mod guard;
pub mod login;
pub mod pages;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;


pub use error::ApiResult;

/// Redirect issued after a form submission (`303 See Other`).
pub(crate) fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
