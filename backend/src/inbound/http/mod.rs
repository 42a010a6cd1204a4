//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod guard;
pub mod health;
pub mod identity_config;
pub mod identity_cookie;
pub mod posts;
pub mod requests;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
