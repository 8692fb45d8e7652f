//! Behavior Types
//!
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

/// One sample of live user-behavior telemetry for a session.
///
/// Immutable once received; owned by the caller, never persisted in raw form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorSample {
    pub user_id: String,
    pub session_id: String,
    /// Typing speed (chars/min)
    pub typing_speed: f64,
    /// Total mouse travel this session (pixels)
    pub mouse_movement: f64,
    /// Ordered inter-click intervals (ms)
    pub click_pattern: Vec<f64>,
    /// Time spent on the current page (seconds)
    pub navigation_time: f64,
    /// Ordered page identifiers visited this session
    pub pages_visited: Vec<String>,
}

/// Result of behavioral intent scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorVerdict {
    pub session_id: String,
    /// Risk score in [0.00, 1.00], two-decimal rounding
    pub risk_score: f64,
    /// One flag per triggered factor, deduplicated by construction
    pub flags: Vec<String>,
}

impl BehaviorVerdict {
    /// Fraud threshold used when deriving a ledger record from this verdict
    pub fn is_fraudulent(&self) -> bool {
        self.risk_score >= super::rules::FRAUD_SCORE_THRESHOLD
    }
}
