//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::IdentityTokens;
use crate::outbound::memory::InMemoryVolunteerStore;
use crate::outbound::token::JwtIdentityTokens;
use crate::test_support::MutableClock;

use super::identity_cookie::CookiePolicy;
use super::state::{HttpState, HttpStatePorts};

/// Signing secret shared by handler tests.
pub const TEST_SECRET: &[u8] = b"handler-tests-secret-of-adequate-length";

/// Fixed instant handler tests start from.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Handles a test needs alongside the state it built.
pub struct TestContext {
    pub state: HttpState,
    pub store: InMemoryVolunteerStore,
    pub clock: Arc<MutableClock>,
}

impl TestContext {
    /// Sign a token for `email` with the shared test secret.
    pub fn token_for(&self, email: &str) -> String {
        let email = crate::domain::Email::new(email).expect("valid test email");
        self.state
            .tokens
            .issue(&email)
            .expect("issue test token")
            .token()
            .to_owned()
    }
}

/// Build HTTP state over an empty in-memory store and a movable clock.
pub fn test_context() -> TestContext {
    let store = InMemoryVolunteerStore::new();
    let clock = Arc::new(MutableClock::new(test_now()));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let tokens: Arc<dyn IdentityTokens> =
        Arc::new(JwtIdentityTokens::new(TEST_SECRET, dyn_clock.clone()));
    let state = HttpState::new(
        HttpStatePorts {
            posts: Arc::new(store.clone()),
            requests: Arc::new(store.clone()),
            tokens,
            clock: dyn_clock,
        },
        CookiePolicy::development(),
    );
    TestContext {
        state,
        store,
        clock,
    }
}
