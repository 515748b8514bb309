//! Registration handler.
//!
//! ```text
//! POST /register  name=...&email=...&password=...
//! ```
//!
//! Every failure (validation, hashing, duplicate email, store backend)
//! collapses to a redirect back to the form; the reason is logged, never
//! shown. Success lands on the login form.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{NewUser, UserId, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::Anonymous;
use crate::inbound::http::see_other;
use crate::inbound::http::state::HttpState;

/// Registration form body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Display name for the new account.
    pub name: String,
    /// Email the account will be looked up by.
    pub email: String,
    /// Plaintext password; hashed before anything is stored.
    pub password: String,
}

/// Hash the password and append the user record.
#[post("/register")]
pub async fn register(
    _guest: Anonymous,
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let new_user = match NewUser::try_from_parts(&form.name, &form.email, &form.password) {
        Ok(new_user) => new_user,
        Err(reason) => {
            tracing::debug!(%reason, "registration rejected");
            return Ok(see_other("/register"));
        }
    };

    // Hashing is CPU-bound; run it on the blocking pool so simple reads on
    // other requests are never stalled, and before any store lock is taken.
    let passwords = std::sync::Arc::clone(state.passwords());
    let plaintext = Zeroizing::new(new_user.password().to_owned());
    let password_hash = match web::block(move || passwords.hash(&plaintext)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(reason)) => {
            tracing::warn!(%reason, "password hashing failed during registration");
            return Ok(see_other("/register"));
        }
        Err(reason) => {
            tracing::warn!(%reason, "hashing task failed during registration");
            return Ok(see_other("/register"));
        }
    };

    let record = UserRecord::new(
        UserId::random(),
        new_user.name(),
        new_user.email(),
        password_hash,
    );
    if let Err(reason) = state.users().insert(record) {
        tracing::debug!(%reason, "registration insert refused");
        return Ok(see_other("/register"));
    }

    Ok(see_other("/login"))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;

    use crate::inbound::http::test_utils::{register_response, test_app};

    #[actix_web::test]
    async fn successful_registration_redirects_to_login() {
        let app = test::init_service(test_app()).await;
        let res = register_response(&app, "Alice", "a@x.com", "secret1").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .expect("redirect location"),
            "/login"
        );
    }

    #[actix_web::test]
    async fn blank_fields_redirect_back_to_register() {
        let app = test::init_service(test_app()).await;
        for (name, email, password) in [("", "a@x.com", "pw"), ("Alice", "", "pw"), ("Alice", "a@x.com", "")] {
            let res = register_response(&app, name, email, password).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                res.headers()
                    .get(header::LOCATION)
                    .expect("redirect location"),
                "/register",
                "fields: {name:?} {email:?} {password:?}"
            );
        }
    }

    #[actix_web::test]
    async fn duplicate_email_redirects_back_without_detail() {
        let app = test::init_service(test_app()).await;
        let first = register_response(&app, "Alice", "a@x.com", "secret1").await;
        assert_eq!(first.status(), StatusCode::SEE_OTHER);

        let second = register_response(&app, "Impostor", "a@x.com", "other").await;
        assert_eq!(second.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            second
                .headers()
                .get(header::LOCATION)
                .expect("redirect location"),
            "/register"
        );
    }
}
