//! Server-rendered pages for the authentication flow.
//!
//! ```text
//! GET /          Home page greeting the signed-in user
//! GET /login     Login form plus any pending flash messages
//! GET /register  Registration form
//! ```
//!
//! Views are deliberately small `format!` fragments; everything
//! user-supplied is HTML-escaped before interpolation.

use actix_web::{HttpResponse, get, http::header::ContentType};

use crate::inbound::http::guard::{Anonymous, Authenticated};
use crate::inbound::http::session::SessionContext;

/// Escape text for safe interpolation into an HTML body.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn home_page(name: &str) -> String {
    let name = escape_html(name);
    page(
        "Home",
        &format!(
            "<h1>Hi {name}</h1>\n\
             <form action=\"/logout?_method=DELETE\" method=\"post\">\n\
             <button type=\"submit\">Log Out</button>\n\
             </form>"
        ),
    )
}

fn login_page(flashes: &[String]) -> String {
    let mut body = String::from("<h1>Login</h1>\n");
    for flash in flashes {
        body.push_str(&format!("<p class=\"flash\">{}</p>\n", escape_html(flash)));
    }
    body.push_str(
        "<form action=\"/login\" method=\"post\">\n\
         <label for=\"email\">Email</label>\n\
         <input type=\"email\" id=\"email\" name=\"email\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" id=\"password\" name=\"password\" required>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <a href=\"/register\">Register</a>",
    );
    page("Login", &body)
}

fn register_page() -> String {
    page(
        "Register",
        "<h1>Register</h1>\n\
         <form action=\"/register\" method=\"post\">\n\
         <label for=\"name\">Name</label>\n\
         <input type=\"text\" id=\"name\" name=\"name\" required>\n\
         <label for=\"email\">Email</label>\n\
         <input type=\"email\" id=\"email\" name=\"email\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" id=\"password\" name=\"password\" required>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <a href=\"/login\">Login</a>",
    )
}

/// Home page; only reachable with a live session.
#[get("/")]
pub async fn home(user: Authenticated) -> HttpResponse {
    html(home_page(user.0.name()))
}

/// Login form; only reachable without a session. Drains flash messages.
#[get("/login")]
pub async fn login_form(_guest: Anonymous, session: SessionContext) -> HttpResponse {
    html(login_page(&session.take_flashes()))
}

/// Registration form; only reachable without a session.
#[get("/register")]
pub async fn register_form(_guest: Anonymous) -> HttpResponse {
    html(register_page())
}
