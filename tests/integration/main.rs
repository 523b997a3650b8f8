//! HTTP-level integration tests against in-memory stores.

mod helpers;

mod access_test;
mod auth_test;
mod overview_test;
mod password_reset_test;
mod reviews_test;
mod tours_test;
