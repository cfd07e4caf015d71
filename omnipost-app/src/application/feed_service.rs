use chrono::Utc;
use tracing::debug;

use crate::data::feed_store::FeedStore;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft};
use crate::domain::user::User;

pub struct FeedService<S: FeedStore> {
    store: S,
}

impl<S: FeedStore> FeedService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Full collection in stored order (newest-first, see [`create`]).
    ///
    /// [`create`]: FeedService::create
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        self.store.load_posts().await
    }

    /// Render order: creation time descending, stable so ties keep stored
    /// order.
    pub async fn timeline(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.store.load_posts().await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Builds the post (time-derived id, zero likes, author copied by value),
    /// prepends it so storage order stays newest-first, and returns the
    /// updated full collection.
    ///
    /// Gating on [`PostDraft::validate`] is the compose flow's job; the
    /// service accepts any draft.
    pub async fn create(&self, author: &User, draft: PostDraft) -> Result<Vec<Post>, DomainError> {
        let post = Post::compose(author, draft, Utc::now());
        debug!(post_id = %post.id, author = %author.handle, "creating post");

        let mut posts = self.store.load_posts().await?;
        posts.insert(0, post);
        self.store.save_posts(&posts).await?;
        Ok(posts)
    }

    /// Increments the matching post's like counter by exactly 1; unknown ids
    /// are a no-op. Deliberately not idempotent per caller — any per-viewer
    /// cap is transient presentation state.
    pub async fn like(&self, post_id: &str) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.store.load_posts().await?;
        for post in posts.iter_mut().filter(|post| post.id == post_id) {
            post.likes += 1;
        }
        self.store.save_posts(&posts).await?;
        Ok(posts)
    }
}
