use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::User;

/// Stored user record: the public profile plus the sealed credential.
///
/// Serializes flat, so the persisted object keeps the historical shape
/// (`{"id": …, "name": …, "password": …}`). The credential never leaves the
/// data layer inside a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

/// Storage port over the three persisted collections: users, posts, and the
/// single active session.
///
/// A load returns the full collection in stored order (empty when the key
/// was never written); a save overwrites the whole collection. There is no
/// indexing or querying — filtering and sorting belong to the caller.
///
/// Writes are atomic only from this process's point of view. Two processes
/// saving the same collection race with last-write-wins semantics; the
/// design accepts that (single-device, single-process store).
///
/// Any I/O or decode failure maps to the fatal [`DomainError::Storage`];
/// there is no retry and no partial recovery.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn load_users(&self) -> Result<Vec<UserRecord>, DomainError>;
    async fn save_users(&self, users: &[UserRecord]) -> Result<(), DomainError>;

    async fn load_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn save_posts(&self, posts: &[Post]) -> Result<(), DomainError>;

    async fn load_session(&self) -> Result<Option<User>, DomainError>;
    async fn save_session(&self, user: &User) -> Result<(), DomainError>;
    async fn clear_session(&self) -> Result<(), DomainError>;
}
