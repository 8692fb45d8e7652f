//! FraudShield Core - Fraud Risk Scoring & Shared Intelligence
//!
//! Scores banking actions for fraud risk along two axes - live user-behavior
//! telemetry and pending-transaction attributes - and maintains a shared,
//! anonymized ledger of known fraud indicators that multiple institutions
//! can submit to and query.
//!
//! HTTP routing, request validation and the durable object store itself are
//! external collaborators. This crate only needs put/list/get semantics from
//! the store (see [`logic::ledger::FraudStore`]).
//!
//! ## Usage
//! ```ignore
//! use fraudshield_core::{analyze_transaction, TransactionSample};
//!
//! let verdict = analyze_transaction(&sample);
//! if verdict.is_fraudulent() {
//!     // build an anonymized record and submit it to the ledger
//! }
//! ```

pub mod constants;
pub mod logic;

// Re-export the main API surface for embedding callers
pub use logic::behavior::{analyze_behavior, BehaviorSample, BehaviorVerdict};
pub use logic::transaction::{
    analyze_transaction, RecommendedAction, PredictionResult, ReasonCode,
    TransactionSample, TransactionVerdict,
};
pub use logic::ledger::{
    AnalyticsReport, FraudLedger, FraudRecord, FraudStore, InMemoryStore,
    LedgerError, QueryRequest, QueryResponse, Severity, StoreError,
    SubmitReceipt, SubmitRequest,
};
pub use logic::ledger::record::{behavior_record, transaction_record};
