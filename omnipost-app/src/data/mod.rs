pub mod feed_store;
pub mod stores;
