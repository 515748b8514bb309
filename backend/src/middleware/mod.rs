//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns;
//! currently the HTML-form method override.

pub mod method_override;

pub use method_override::MethodOverride;
