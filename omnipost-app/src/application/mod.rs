pub mod auth_service;
pub mod composer;
pub mod feed_service;
