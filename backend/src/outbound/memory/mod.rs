//! In-process store used when no database is configured.
//!
//! A single [`InMemoryVolunteerStore`] implements both repository ports over
//! shared state, so request submission can reserve capacity under the same
//! write lock that records the request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{
    DeleteOutcome, InsertOutcome, UpsertOutcome, VolunteerPostRepository,
    VolunteerPostRepositoryError, VolunteerRequestRepository, VolunteerRequestRepositoryError,
};
use crate::domain::{Email, PostId, RequestId, VolunteerPost, VolunteerRequest};

#[derive(Debug, Default)]
struct StoreState {
    posts: HashMap<PostId, VolunteerPost>,
    requests: Vec<VolunteerRequest>,
}

impl StoreState {
    fn sorted_posts<F>(&self, keep: F) -> Vec<VolunteerPost>
    where
        F: Fn(&VolunteerPost) -> bool,
    {
        let mut posts: Vec<VolunteerPost> =
            self.posts.values().filter(|post| keep(post)).cloned().collect();
        posts.sort_by(|a, b| {
            a.deadline()
                .cmp(&b.deadline())
                .then_with(|| a.id().cmp(&b.id()))
        });
        posts
    }
}

/// Shared in-memory implementation of the posting and request ports.
///
/// Cloning yields another handle onto the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVolunteerStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryVolunteerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VolunteerPostRepository for InMemoryVolunteerStore {
    async fn insert(
        &self,
        post: &VolunteerPost,
    ) -> Result<InsertOutcome, VolunteerPostRepositoryError> {
        let mut state = self.state.write().await;
        if state.posts.contains_key(&post.id()) {
            return Err(VolunteerPostRepositoryError::query("duplicate record"));
        }
        state.posts.insert(post.id(), post.clone());
        Ok(InsertOutcome::new(*post.id().as_uuid()))
    }

    async fn list_all(&self) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        Ok(self.state.read().await.sorted_posts(|_| true))
    }

    async fn search_by_title(
        &self,
        needle: &str,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .sorted_posts(|post| post.title_contains(needle)))
    }

    async fn list_soonest(
        &self,
        limit: usize,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        let mut posts = self.state.read().await.sorted_posts(|_| true);
        posts.truncate(limit);
        Ok(posts)
    }

    async fn find_by_id(
        &self,
        id: &PostId,
    ) -> Result<Option<VolunteerPost>, VolunteerPostRepositoryError> {
        Ok(self.state.read().await.posts.get(id).cloned())
    }

    async fn delete(&self, id: &PostId) -> Result<DeleteOutcome, VolunteerPostRepositoryError> {
        let removed = self.state.write().await.posts.remove(id);
        Ok(DeleteOutcome::from_rows(usize::from(removed.is_some())))
    }

    async fn upsert(
        &self,
        post: &VolunteerPost,
    ) -> Result<UpsertOutcome, VolunteerPostRepositoryError> {
        let mut state = self.state.write().await;
        let outcome = match state.posts.get(&post.id()) {
            Some(existing) => UpsertOutcome::matched(existing != post),
            None => UpsertOutcome::inserted(*post.id().as_uuid()),
        };
        state.posts.insert(post.id(), post.clone());
        Ok(outcome)
    }

    async fn list_by_organizer(
        &self,
        email: &Email,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .sorted_posts(|post| post.organizer().email() == email))
    }
}

#[async_trait]
impl VolunteerRequestRepository for InMemoryVolunteerStore {
    async fn submit(
        &self,
        request: &VolunteerRequest,
    ) -> Result<InsertOutcome, VolunteerRequestRepositoryError> {
        let mut state = self.state.write().await;
        let post_id = request.volunteer_post_id();
        let Some(post) = state.posts.get_mut(&post_id) else {
            debug!(%post_id, "request references unknown posting");
            return Err(VolunteerRequestRepositoryError::post_not_found(
                post_id.to_string(),
            ));
        };
        if !post.reserve_place() {
            debug!(%post_id, "request rejected, posting is full");
            return Err(VolunteerRequestRepositoryError::no_capacity(
                post_id.to_string(),
            ));
        }
        state.requests.push(request.clone());
        Ok(InsertOutcome::new(*request.id().as_uuid()))
    }

    async fn list_by_volunteer(
        &self,
        email: &Email,
    ) -> Result<Vec<VolunteerRequest>, VolunteerRequestRepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .requests
            .iter()
            .filter(|request| request.volunteer().email() == email)
            .cloned()
            .collect())
    }

    async fn delete(
        &self,
        id: &RequestId,
    ) -> Result<DeleteOutcome, VolunteerRequestRepositoryError> {
        let mut state = self.state.write().await;
        let before = state.requests.len();
        state.requests.retain(|request| request.id() != *id);
        Ok(DeleteOutcome::from_rows(before - state.requests.len()))
    }
}
