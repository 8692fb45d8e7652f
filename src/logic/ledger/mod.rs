//! Ledger Module
//!
//! Shared fraud-intelligence ledger: nhiều tổ chức cùng submit và query các
//! fraud indicator đã được ẩn danh hóa. Eventual consistency với durable
//! store qua read-time resync.
//!
//! ## Structure
//! - `types`: Core types (FraudRecord, Severity, request/response shapes)
//! - `record`: Record Adapter (verdict + sample -> anonymized submission)
//! - `store`: Durable-store interface + in-memory reference implementation
//! - `manager`: The ledger itself (working set, resync, submit/query/analytics)

pub mod types;
pub mod record;
pub mod store;
pub mod manager;

// Re-export main types for convenience
pub use types::{
    AnalyticsReport, FraudRecord, LedgerError, QueryRequest, QueryResponse, Severity,
    SubmitReceipt, SubmitRequest,
};
pub use store::{FraudStore, InMemoryStore, StoreError};
pub use manager::FraudLedger;
