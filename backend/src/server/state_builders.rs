//! Builders wiring port implementations into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::domain::ports::{IdentityTokens, VolunteerPostRepository, VolunteerRequestRepository};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryVolunteerStore;
use crate::outbound::persistence::{
    DbPool, DieselVolunteerPostRepository, DieselVolunteerRequestRepository,
};
use crate::outbound::token::JwtIdentityTokens;

use super::ServerConfig;

type StorePair = (
    Arc<dyn VolunteerPostRepository>,
    Arc<dyn VolunteerRequestRepository>,
);

/// Pick database-backed repositories when a pool exists, otherwise one shared
/// in-memory store serving both ports.
fn build_store_pair<Pool>(
    pool: Option<&Pool>,
    make_repositories: impl FnOnce(&Pool) -> StorePair,
) -> StorePair {
    match pool {
        Some(pool) => make_repositories(pool),
        None => {
            info!("no database configured; using in-memory store");
            let store = InMemoryVolunteerStore::new();
            (Arc::new(store.clone()), Arc::new(store))
        }
    }
}

fn diesel_repositories(pool: &DbPool) -> StorePair {
    (
        Arc::new(DieselVolunteerPostRepository::new(pool.clone())),
        Arc::new(DieselVolunteerRequestRepository::new(pool.clone())),
    )
}

/// Build the shared HTTP state from server configuration.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (posts, requests) = build_store_pair(config.db_pool.as_ref(), diesel_repositories);
    let tokens: Arc<dyn IdentityTokens> = Arc::new(JwtIdentityTokens::new(
        config.identity.secret(),
        clock.clone(),
    ));
    HttpState::new(
        HttpStatePorts {
            posts,
            requests,
            tokens,
            clock,
        },
        config.identity.cookie_policy,
    )
}
