//! Ledger Types
//!
//! KHÔNG chứa logic - chỉ data structures cho fraud ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// SEVERITY
// ============================================================================

/// Coarse seriousness bucket for a fraud record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Parse from the wire label. Anything else is rejected at submit time.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FRAUD RECORD
// ============================================================================

/// One anonymized fraud indicator in the shared ledger.
///
/// Immutable after creation; never updated, only appended or
/// administratively deleted by id. The three hash fields are one-way
/// digests - the raw samples never enter the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudRecord {
    /// Time-ordered id with a random suffix (submission-order disambiguation)
    pub record_id: String,
    /// Submitting institution
    pub institution_id: String,
    pub device_hash: String,
    pub account_hash: String,
    /// Digest of the canonicalized behavior/transaction pattern
    pub pattern_hash: String,
    /// e.g. "human_intent_fraud", "predictive_scam"
    pub fraud_type: String,
    /// When the fraudulent event happened
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    /// When the record entered the ledger (distinct from `timestamp`)
    pub reported_at: DateTime<Utc>,
}

// ============================================================================
// SUBMIT
// ============================================================================

/// Institution-submitted record fields. All seven are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub institution_id: String,
    pub device_hash: String,
    pub account_hash: String,
    pub pattern_hash: String,
    pub fraud_type: String,
    pub timestamp: DateTime<Utc>,
    /// One of "low", "medium", "high", "critical"
    pub severity: String,
}

/// Returned to the submitter on success.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub success: bool,
    pub record_id: String,
}

// ============================================================================
// QUERY
// ============================================================================

/// Hash lookup against the ledger. At least one hash is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    pub device_hash: Option<String>,
    pub account_hash: Option<String>,
    pub pattern_hash: Option<String>,
}

/// Per-field match summary plus the matching records, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub found: bool,
    pub device_match: bool,
    pub account_match: bool,
    pub pattern_match: bool,
    pub matches: Vec<FraudRecord>,
}

// ============================================================================
// ANALYTICS
// ============================================================================

/// Aggregate view of the working set.
///
/// String fields are "N/A" (never null) when the working set is empty.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub total_records: usize,
    /// Event date of the most recent record, MM/DD/YYYY
    pub latest_activity: String,
    /// Device hash of the most recent record
    pub latest_device_hash: String,
    /// Highest count wins; ties go to the type first seen in insertion order
    pub most_common_fraud_type: String,
    pub fraud_type_counts: HashMap<String, u64>,
    pub severity_counts: HashMap<String, u64>,
}

impl AnalyticsReport {
    /// Fixed response for an empty working set.
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            latest_activity: "N/A".to_string(),
            latest_device_hash: "N/A".to_string(),
            most_common_fraud_type: "N/A".to_string(),
            fraud_type_counts: HashMap::new(),
            severity_counts: HashMap::new(),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Validation failures on the ledger's own operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid severity: {0:?} (expected low/medium/high/critical)")]
    InvalidSeverity(String),
    #[error("query requires at least one of device_hash, account_hash, pattern_hash")]
    EmptyQuery,
}
