//! In-process caching for rendered content and merchant lookups.

mod memory;
mod null_cache;
mod service;

pub use memory::MemoryCache;
pub use null_cache::NullCache;
pub use service::{CacheError, CacheResult, PageCache};
