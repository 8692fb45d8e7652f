//! Record Adapter
//!
//! Pure transformation from a scorer verdict plus its input sample into
//! anonymized ledger submission fields. Nothing identifiable survives the
//! conversion: device, account and pattern inputs are reduced to one-way
//! digests before they reach the ledger.
//!
//! A record is only produced when the verdict crosses the fraud predicate
//! (behavior score >= 0.7; transaction category not SAFE).

use chrono::Utc;
use serde_json::json;

use crate::logic::behavior::{BehaviorSample, BehaviorVerdict};
use crate::logic::hashing::{digest, digest_canonical};
use crate::logic::transaction::{
    scorer::parse_timestamp, PredictionResult, TransactionSample, TransactionVerdict,
};

use super::types::{Severity, SubmitRequest};

/// Fraud-type label for behavior-derived records
pub const FRAUD_TYPE_BEHAVIOR: &str = "human_intent_fraud";

/// Fraud-type label for transaction-derived records
pub const FRAUD_TYPE_TRANSACTION: &str = "predictive_scam";

// ============================================================================
// ADAPTERS
// ============================================================================

/// Build ledger submission fields from a behavior verdict.
///
/// Returns None when the verdict does not cross the fraud threshold.
pub fn behavior_record(
    institution_id: &str,
    sample: &BehaviorSample,
    verdict: &BehaviorVerdict,
) -> Option<SubmitRequest> {
    if !verdict.is_fraudulent() {
        return None;
    }

    let pattern = json!({
        "typing_speed": sample.typing_speed,
        "mouse_movement": sample.mouse_movement,
        "click_pattern": sample.click_pattern,
        "pages_visited": sample.pages_visited,
    });

    Some(SubmitRequest {
        institution_id: institution_id.to_string(),
        device_hash: digest(&sample.session_id),
        account_hash: digest(&sample.user_id),
        pattern_hash: digest_canonical(&pattern),
        fraud_type: FRAUD_TYPE_BEHAVIOR.to_string(),
        timestamp: Utc::now(),
        severity: behavior_severity(verdict.risk_score).as_str().to_string(),
    })
}

/// Build ledger submission fields from a transaction verdict.
///
/// Returns None when the verdict does not cross the fraud threshold.
pub fn transaction_record(
    institution_id: &str,
    sample: &TransactionSample,
    verdict: &TransactionVerdict,
) -> Option<SubmitRequest> {
    if !verdict.is_fraudulent() {
        return None;
    }

    let pattern = json!({
        "transaction_type": sample.transaction_type,
        "amount": sample.amount,
        "location": sample.location,
        "recipient_account": sample.recipient_account,
    });

    Some(SubmitRequest {
        institution_id: institution_id.to_string(),
        device_hash: digest(&sample.device_id),
        account_hash: digest(&sample.user_id),
        pattern_hash: digest_canonical(&pattern),
        fraud_type: FRAUD_TYPE_TRANSACTION.to_string(),
        timestamp: parse_timestamp(&sample.timestamp).unwrap_or_else(Utc::now),
        severity: transaction_severity(verdict).as_str().to_string(),
    })
}

// ============================================================================
// SEVERITY BUCKETING
// ============================================================================

fn behavior_severity(score: f64) -> Severity {
    if score >= 0.8 {
        Severity::Critical
    } else if score >= 0.6 {
        Severity::High
    } else if score >= 0.4 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn transaction_severity(verdict: &TransactionVerdict) -> Severity {
    match verdict.prediction {
        PredictionResult::HighRisk if verdict.risk_score >= 0.8 => Severity::Critical,
        PredictionResult::HighRisk => Severity::High,
        PredictionResult::Suspicious if verdict.risk_score >= 0.5 => Severity::High,
        PredictionResult::Suspicious => Severity::Medium,
        PredictionResult::Safe => Severity::Low,
    }
}

// ============================================================================
// TESTS
// ============================================================================
