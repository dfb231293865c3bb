//! Caching of parsed env files.
//!
//! Each distinct `.env` path is parsed once and kept for the life of the
//! [`FileCache`]. Under [`CachePolicy::Mtime`](crate::config::CachePolicy)
//! a newer modification time triggers a reload.

pub mod entry;
pub mod store;

pub use entry::FileCacheEntry;
pub use store::FileCache;
