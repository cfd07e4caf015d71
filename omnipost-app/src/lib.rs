//! Core library of the OmniPost local-first social feed: domain model,
//! auth and feed services, the storage port with its JSON-file and
//! in-memory backends, and the compose-side AI glue.
//!
//! All persistent state lives in three JSON collections behind
//! [`FeedStore`]; an embedding presentation layer talks to
//! [`AuthService`] / [`FeedService`] and never touches storage directly.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;

pub use application::auth_service::{
    Argon2Credentials, AuthService, CredentialScheme, PlainTextCredentials,
};
pub use application::composer::{Composer, Polished};
pub use application::feed_service::FeedService;
pub use data::feed_store::{FeedStore, UserRecord};
pub use data::stores::json_file::JsonFileStore;
pub use data::stores::memory::MemoryStore;
pub use domain::error::DomainError;
pub use domain::post::{Post, PostDraft, image_data_uri};
pub use domain::user::{LoginRequest, RegisterRequest, User};
