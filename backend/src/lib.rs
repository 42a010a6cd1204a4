//! Volunteer marketplace backend.
//!
//! Hexagonal layout: `domain` holds the aggregates, validation rules, and
//! ports; `inbound::http` maps Actix requests onto those ports;
//! `outbound` provides PostgreSQL, in-memory, and JWT adapters; `server`
//! wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
