//! Transaction Types
//!
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

/// One pending transaction, as submitted for scoring.
///
/// Immutable once received. The timestamp is an ISO-8601 string; an
/// unparseable value is a risk signal of its own, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSample {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub recipient_account: String,
    /// User's historical average amount; <= 0 means "no baseline"
    pub average_amount: f64,
    pub transaction_type: String,
    pub location: String,
    /// ISO-8601 timestamp of the transaction
    pub timestamp: String,
    pub device_id: String,
}

/// Categorical verdict for a scored transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionResult {
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "SUSPICIOUS")]
    Suspicious,
    #[serde(rename = "HIGH_RISK")]
    HighRisk,
}

impl PredictionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionResult::Safe => "SAFE",
            PredictionResult::Suspicious => "SUSPICIOUS",
            PredictionResult::HighRisk => "HIGH_RISK",
        }
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recommended handling for a scored transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "APPROVE")]
    Approve,
    #[serde(rename = "FLAG_FOR_REVIEW")]
    FlagForReview,
    #[serde(rename = "DELAY_AND_MFA")]
    DelayAndMfa,
    #[serde(rename = "BLOCK")]
    Block,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::Approve => "APPROVE",
            RecommendedAction::FlagForReview => "FLAG_FOR_REVIEW",
            RecommendedAction::DelayAndMfa => "DELAY_AND_MFA",
            RecommendedAction::Block => "BLOCK",
        }
    }
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which risk factor fired, in factor-evaluation order.
///
/// A factor contributes at most one code; lower tiers of several factors
/// contribute score without any code (known under-counting, kept as shipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCode {
    #[serde(rename = "VERY_HIGH_AMOUNT")]
    VeryHighAmount,
    #[serde(rename = "HIGH_AMOUNT")]
    HighAmount,
    #[serde(rename = "HIGH_RISK_TRANSACTION_TYPE")]
    HighRiskTransactionType,
    #[serde(rename = "HIGH_RISK_LOCATION")]
    HighRiskLocation,
    #[serde(rename = "NEW_DEVICE")]
    NewDevice,
    #[serde(rename = "UNUSUAL_TIMING")]
    UnusualTiming,
    #[serde(rename = "NEW_RECIPIENT")]
    NewRecipient,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::VeryHighAmount => "VERY_HIGH_AMOUNT",
            ReasonCode::HighAmount => "HIGH_AMOUNT",
            ReasonCode::HighRiskTransactionType => "HIGH_RISK_TRANSACTION_TYPE",
            ReasonCode::HighRiskLocation => "HIGH_RISK_LOCATION",
            ReasonCode::NewDevice => "NEW_DEVICE",
            ReasonCode::UnusualTiming => "UNUSUAL_TIMING",
            ReasonCode::NewRecipient => "NEW_RECIPIENT",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of transaction risk scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionVerdict {
    pub transaction_id: String,
    /// Risk score in [0.00, 1.00], two-decimal rounding
    pub risk_score: f64,
    pub prediction: PredictionResult,
    pub recommended_action: RecommendedAction,
    /// Insertion order = factor evaluation order, never re-sorted
    pub reason_codes: Vec<ReasonCode>,
}

impl TransactionVerdict {
    /// Fraud threshold used when deriving a ledger record from this verdict
    pub fn is_fraudulent(&self) -> bool {
        self.prediction != PredictionResult::Safe
    }
}
