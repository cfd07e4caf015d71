use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::millis_floor;
use super::user::User;

/// A feed post. The author is a full snapshot copied at posting time, not a
/// reference into the user collection: later profile edits must not rewrite
/// history. `likes` is the only field mutated after creation.
///
/// Field names follow the persisted camelCase layout. `isAiEnhanced` was
/// absent in early records and reads as `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub author: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_ai_enhanced: bool,
}

impl Post {
    pub(crate) fn compose(author: &User, draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            // the id keeps the full microsecond clock so back-to-back posts
            // stay distinct even though createdAt is floored to millis
            id: now.timestamp_micros().to_string(),
            content: draft.content,
            image_url: draft.image_url,
            created_at: millis_floor(now),
            likes: 0,
            author: author.clone(),
            tags: draft.tags,
            is_ai_enhanced: draft.is_ai_enhanced,
        }
    }
}

/// Compose-side payload for a new post.
///
/// The feed service accepts any draft; gating submission on
/// [`PostDraft::validate`] is the compose flow's job.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_ai_enhanced: bool,
}

impl PostDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, data_uri: impl Into<String>) -> Self {
        self.image_url = Some(data_uri.into());
        self
    }

    /// A post needs text and/or an image.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.trim().is_empty() && self.image_url.is_none() {
            return Err(DomainError::Validation {
                field: "content",
                message: "text or image is required",
            });
        }
        Ok(())
    }
}

/// Encodes image bytes into a self-contained `data:` URI, so the post embeds
/// the image instead of referencing a file.
pub fn image_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Post, PostDraft, User, image_data_uri};

    fn sample_author() -> User {
        User::create("A", "@a", "a@x.com", Utc::now())
    }

    #[test]
    fn compose_starts_with_zero_likes_and_snapshots_author() {
        let author = sample_author();
        let post = Post::compose(&author, PostDraft::text("hello"), Utc::now());

        assert_eq!(post.likes, 0);
        assert_eq!(post.author, author);
        assert!(!post.is_ai_enhanced);
        assert!(post.image_url.is_none());
    }

    #[test]
    fn compose_derives_id_from_creation_time() {
        let author = sample_author();
        let now = Utc.timestamp_micros(1_700_000_000_123_456).unwrap();
        let post = Post::compose(&author, PostDraft::text("hello"), now);

        assert_eq!(post.id, "1700000000123456");
        assert_eq!(post.created_at.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn draft_requires_text_or_image() {
        assert!(PostDraft::text("   ").validate().is_err());
        assert!(PostDraft::text("hello").validate().is_ok());
        assert!(
            PostDraft::text("")
                .with_image("data:image/png;base64,AAAA")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn post_json_round_trips_with_persisted_layout() {
        let author = sample_author();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let post = Post::compose(
            &author,
            PostDraft::text("hi").with_image(image_data_uri(b"png", "image/png")),
            now,
        );

        let raw = serde_json::to_string(&post).expect("must serialize");
        assert!(raw.contains("\"createdAt\":1700000000000"));
        assert!(raw.contains("\"imageUrl\":\"data:image/png;base64,cG5n\""));
        assert!(raw.contains("\"isAiEnhanced\":false"));

        let back: Post = serde_json::from_str(&raw).expect("must deserialize");
        assert_eq!(back.id, post.id);
        assert_eq!(back.created_at, post.created_at);
    }

    #[test]
    fn records_without_enhancement_flag_read_as_false() {
        let raw = r#"{
            "id": "1700000000000",
            "content": "old post",
            "createdAt": 1700000000000,
            "likes": 3,
            "author": {
                "id": "user_1",
                "name": "A",
                "handle": "@a",
                "email": "a@x.com",
                "avatarUrl": "https://api.dicebear.com/7.x/avataaars/svg?seed=@a",
                "joinedAt": 1690000000000
            }
        }"#;

        let post: Post = serde_json::from_str(raw).expect("old record must parse");
        assert!(!post.is_ai_enhanced);
        assert!(post.tags.is_none());
        assert_eq!(post.likes, 3);
    }
}
