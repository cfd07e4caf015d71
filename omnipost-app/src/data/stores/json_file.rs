use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data::feed_store::{FeedStore, UserRecord};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::User;

const USERS_KEY: &str = "omnipost_users";
const POSTS_KEY: &str = "omnipost_posts";
const SESSION_KEY: &str = "omnipost_session";

/// File-backed [`FeedStore`]: one JSON document per collection under a base
/// directory, file names matching the well-known storage keys. A missing
/// file reads as the empty collection / no session.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base: PathBuf,
}

impl JsonFileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, DomainError> {
        let raw = match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(storage_error(key, err)),
        };
        serde_json::from_str(&raw).map_err(|err| storage_error(key, err))
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base).map_err(|err| storage_error(key, err))?;
        let raw = serde_json::to_string(value).map_err(|err| storage_error(key, err))?;
        fs::write(self.key_path(key), raw).map_err(|err| storage_error(key, err))
    }
}

fn storage_error(key: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::Storage(format!("{key}: {err}"))
}

#[async_trait]
impl FeedStore for JsonFileStore {
    async fn load_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.read_collection(USERS_KEY)
    }

    async fn save_users(&self, users: &[UserRecord]) -> Result<(), DomainError> {
        self.write_json(USERS_KEY, users)
    }

    async fn load_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.read_collection(POSTS_KEY)
    }

    async fn save_posts(&self, posts: &[Post]) -> Result<(), DomainError> {
        self.write_json(POSTS_KEY, posts)
    }

    async fn load_session(&self) -> Result<Option<User>, DomainError> {
        let raw = match fs::read_to_string(self.key_path(SESSION_KEY)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error(SESSION_KEY, err)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| storage_error(SESSION_KEY, err))
    }

    async fn save_session(&self, user: &User) -> Result<(), DomainError> {
        self.write_json(SESSION_KEY, user)
    }

    async fn clear_session(&self) -> Result<(), DomainError> {
        match fs::remove_file(self.key_path(SESSION_KEY)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(SESSION_KEY, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chrono::{TimeZone, Utc};

    use super::JsonFileStore;
    use crate::data::feed_store::{FeedStore, UserRecord};
    use crate::domain::error::DomainError;
    use crate::domain::post::{Post, PostDraft};
    use crate::domain::user::User;

    fn temp_store(tag: &str) -> (JsonFileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("omnipost_{tag}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        (JsonFileStore::new(dir.clone()), dir)
    }

    fn sample_record(handle: &str) -> UserRecord {
        UserRecord {
            user: User::create("A", handle, "a@x.com", Utc::now()),
            password: "p".to_string(),
        }
    }

    fn sample_post(content: &str, micros: i64) -> Post {
        let author = User::create("A", "@a", "a@x.com", Utc::now());
        let now = Utc.timestamp_micros(micros).unwrap();
        Post::compose(&author, PostDraft::text(content), now)
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let (store, dir) = temp_store("empty");

        assert!(store.load_users().await.expect("must load").is_empty());
        assert!(store.load_posts().await.expect("must load").is_empty());
        assert!(store.load_session().await.expect("must load").is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn posts_round_trip_in_stored_order() {
        let (store, dir) = temp_store("roundtrip");

        let posts = vec![
            sample_post("second", 2_000_000),
            sample_post("first", 1_000_000),
        ];
        store.save_posts(&posts).await.expect("must save");

        let loaded = store.load_posts().await.expect("must load");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].content, "second");
        assert_eq!(loaded[1].content, "first");

        let _ = fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn reopened_store_sees_persisted_state() {
        let (store, dir) = temp_store("reopen");

        store
            .save_users(&[sample_record("@a")])
            .await
            .expect("must save");
        store
            .save_session(&sample_record("@a").user)
            .await
            .expect("must save");

        let reopened = JsonFileStore::new(dir.clone());
        assert_eq!(reopened.load_users().await.expect("must load").len(), 1);
        assert!(reopened.load_session().await.expect("must load").is_some());

        let _ = fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn clear_session_is_idempotent() {
        let (store, dir) = temp_store("clear");

        store.clear_session().await.expect("clear on empty must be ok");
        store
            .save_session(&sample_record("@a").user)
            .await
            .expect("must save");
        store.clear_session().await.expect("must clear");
        store.clear_session().await.expect("second clear must be ok");
        assert!(store.load_session().await.expect("must load").is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn corrupted_collection_surfaces_storage_error() {
        let (store, dir) = temp_store("corrupt");

        fs::create_dir_all(&dir).expect("must create dir");
        fs::write(dir.join("omnipost_posts.json"), "{not-json").expect("must write");

        let err = store.load_posts().await.expect_err("must fail");
        assert!(matches!(err, DomainError::Storage(_)));

        let _ = fs::remove_dir_all(dir);
    }
}
