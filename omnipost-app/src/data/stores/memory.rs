use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::data::feed_store::{FeedStore, UserRecord};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::User;

/// In-memory [`FeedStore`] for tests and embedding. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<UserRecord>>>,
    posts: Arc<Mutex<Vec<Post>>>,
    session: Arc<Mutex<Option<User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<'a, T>(
    mutex: &'a Mutex<T>,
    collection: &str,
) -> Result<MutexGuard<'a, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::Storage(format!("{collection}: poisoned lock")))
}

#[async_trait]
impl FeedStore for MemoryStore {
    async fn load_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        Ok(lock(&self.users, "users")?.clone())
    }

    async fn save_users(&self, users: &[UserRecord]) -> Result<(), DomainError> {
        *lock(&self.users, "users")? = users.to_vec();
        Ok(())
    }

    async fn load_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(lock(&self.posts, "posts")?.clone())
    }

    async fn save_posts(&self, posts: &[Post]) -> Result<(), DomainError> {
        *lock(&self.posts, "posts")? = posts.to_vec();
        Ok(())
    }

    async fn load_session(&self) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.session, "session")?.clone())
    }

    async fn save_session(&self, user: &User) -> Result<(), DomainError> {
        *lock(&self.session, "session")? = Some(user.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), DomainError> {
        *lock(&self.session, "session")? = None;
        Ok(())
    }
}
