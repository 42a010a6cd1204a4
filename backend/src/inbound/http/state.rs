//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{IdentityTokens, VolunteerPostRepository, VolunteerRequestRepository};

use super::identity_cookie::CookiePolicy;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub posts: Arc<dyn VolunteerPostRepository>,
    pub requests: Arc<dyn VolunteerRequestRepository>,
    pub tokens: Arc<dyn IdentityTokens>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<dyn VolunteerPostRepository>,
    pub requests: Arc<dyn VolunteerRequestRepository>,
    pub tokens: Arc<dyn IdentityTokens>,
    pub clock: Arc<dyn Clock>,
    /// Attributes for the `token` cookie on issue and clear.
    pub cookies: CookiePolicy,
}

impl HttpState {
    /// Construct state from port implementations and a cookie policy.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use volunteer_backend::inbound::http::identity_cookie::CookiePolicy;
    /// use volunteer_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use volunteer_backend::outbound::memory::InMemoryVolunteerStore;
    /// use volunteer_backend::outbound::token::JwtIdentityTokens;
    ///
    /// let store = InMemoryVolunteerStore::new();
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         posts: Arc::new(store.clone()),
    ///         requests: Arc::new(store),
    ///         tokens: Arc::new(JwtIdentityTokens::new(&[7; 32], Arc::new(DefaultClock))),
    ///         clock: Arc::new(DefaultClock),
    ///     },
    ///     CookiePolicy::development(),
    /// );
    /// assert!(!state.cookies.secure());
    /// ```
    pub fn new(ports: HttpStatePorts, cookies: CookiePolicy) -> Self {
        let HttpStatePorts {
            posts,
            requests,
            tokens,
            clock,
        } = ports;
        Self {
            posts,
            requests,
            tokens,
            clock,
            cookies,
        }
    }
}
