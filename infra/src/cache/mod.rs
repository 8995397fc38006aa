//! Cache module for attempt notes
//!
//! This module provides the Redis client with retry logic and the note
//! stores backing `AuthNoteStore`.

pub mod memory_note_store;
pub mod redis_client;
pub mod redis_note_store;


pub use memory_note_store::InMemoryAuthNoteStore;
pub use redis_client::RedisClient;
pub use redis_note_store::RedisAuthNoteStore;

// Re-export commonly used types
pub use emailcode_shared::config::cache::CacheConfig;
