pub mod kv;
pub mod moodstore;
pub mod userstore;

pub use kv::{FileStore, KeyValueStore, StoreClient, StoreError};
pub use moodstore::MoodStoreExt;
pub use userstore::UserStoreExt;
