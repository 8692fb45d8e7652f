//! Transaction Scoring Rules & Thresholds
//!
//! Định nghĩa các threshold cho transaction scoring.
//! KHÔNG chứa logic - chỉ constants và config.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// WEIGHTS
// ============================================================================
//
// ⚠️ The weights intentionally sum to 1.14, not 1.0. The raw weighted sum can
// exceed 1.0 for extreme inputs and is clamped at the end. Do NOT renormalize
// - flagged for product sign-off, reproduced as shipped.

/// Weight of the amount-to-baseline ratio (32%)
pub const AMOUNT_WEIGHT: f64 = 0.32;

/// Weight of the transaction type (22%)
pub const TYPE_WEIGHT: f64 = 0.22;

/// Weight of the location signal (18%)
pub const LOCATION_WEIGHT: f64 = 0.18;

/// Weight of the device novelty heuristic (18%)
pub const DEVICE_WEIGHT: f64 = 0.18;

/// Weight of the timing signal (12%)
pub const TIMING_WEIGHT: f64 = 0.12;

/// Weight of the recipient novelty heuristic (12%)
pub const RECIPIENT_WEIGHT: f64 = 0.12;

// ============================================================================
// AMOUNT THRESHOLDS (multiples of the user's historical average)
// ============================================================================

/// Ratio at or above this emits VERY_HIGH_AMOUNT
pub const AMOUNT_VERY_HIGH_MULTIPLIER: f64 = 5.0;

/// Ratio at or above this emits HIGH_AMOUNT
pub const AMOUNT_HIGH_MULTIPLIER: f64 = 3.0;

/// Fixed risk when the user has no baseline (average <= 0)
pub const NO_BASELINE_RISK: f64 = 0.65;

// ============================================================================
// VERDICT THRESHOLDS
// ============================================================================

/// Score at or above this = HIGH_RISK
pub const HIGH_RISK_THRESHOLD: f64 = 0.6;

/// Score at or above this = SUSPICIOUS
pub const SUSPICIOUS_THRESHOLD: f64 = 0.3;

// ============================================================================
// KEYWORD SETS
// ============================================================================

/// Transaction types that are high risk by themselves
/// (matched after lowercasing and mapping `_`/`-` to spaces)
pub const HIGH_RISK_TYPES: &[&str] = &[
    "wire transfer",
    "international transfer",
    "cryptocurrency",
    "money order",
    "cash advance",
];

/// Location keywords that are high risk by themselves
pub const HIGH_RISK_LOCATION_KEYWORDS: &[&str] = &["offshore", "tax haven", "sanctioned"];

/// Expected device identifier shape, e.g. "device-abc123".
///
/// Identifiers that do not match are treated as unrecognized hardware.
/// Placeholder for a real device-history lookup, which is out of scope.
pub static KNOWN_DEVICE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z]+-[a-z0-9]{4,}$").expect("device format regex is valid")
});

// ============================================================================
// CONFIGURABLE RULES (for runtime adjustment)
// ============================================================================

/// Transaction scoring breakpoints (configurable; weights are fixed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRules {
    pub amount_very_high_multiplier: f64,
    pub amount_high_multiplier: f64,
    pub high_risk_threshold: f64,
    pub suspicious_threshold: f64,
}

impl Default for TransactionRules {
    fn default() -> Self {
        Self {
            amount_very_high_multiplier: AMOUNT_VERY_HIGH_MULTIPLIER,
            amount_high_multiplier: AMOUNT_HIGH_MULTIPLIER,
            high_risk_threshold: HIGH_RISK_THRESHOLD,
            suspicious_threshold: SUSPICIOUS_THRESHOLD,
        }
    }
}
