//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.
//! To change the store layout or resync paging, only edit this file.

/// Default key prefix for fraud records in the durable store
///
/// Records live one-per-key under `<prefix><YYYY>/<MM>/<record_id>.json`,
/// partitioned by event year/month to bound list-page sizes. The physical
/// bucket/region belongs to the store implementation, not to this core.
pub const DEFAULT_STORE_PREFIX: &str = "fraud-records/";

/// Default page size for resync list calls
pub const DEFAULT_RESYNC_PAGE_SIZE: usize = 1000;

/// Crate version
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the store key prefix from environment or use default
pub fn get_store_prefix() -> String {
    std::env::var("FRAUD_STORE_PREFIX")
        .unwrap_or_else(|_| DEFAULT_STORE_PREFIX.to_string())
}

/// Get the resync page size from environment or use default
pub fn get_resync_page_size() -> usize {
    std::env::var("FRAUD_RESYNC_PAGE_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RESYNC_PAGE_SIZE)
}
