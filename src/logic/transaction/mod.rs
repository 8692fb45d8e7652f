//! Transaction Module
//!
//! Chấm điểm rủi ro cho giao dịch đang chờ xử lý. Đây là trục thứ hai của
//! fraud scoring: amount, type, location, device, timing, recipient.
//!
//! ## Structure
//! - `types`: Core types (TransactionSample, TransactionVerdict, ReasonCode)
//! - `rules`: Thresholds, weights and keyword sets
//! - `scorer`: Scoring logic + action state machine
//!
//! ## Usage
//! ```ignore
//! use fraudshield_core::logic::transaction::{analyze_transaction, RecommendedAction};
//!
//! let verdict = analyze_transaction(&sample);
//! if verdict.recommended_action == RecommendedAction::Block {
//!     // hold the transaction
//! }
//! ```

pub mod types;
pub mod rules;
pub mod scorer;

// Re-export main types for convenience
pub use types::{
    PredictionResult, ReasonCode, RecommendedAction, TransactionSample, TransactionVerdict,
};
pub use rules::TransactionRules;
pub use scorer::{analyze_transaction, analyze_transaction_with_rules};
