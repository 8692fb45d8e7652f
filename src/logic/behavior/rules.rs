//! Behavior Scoring Rules & Thresholds
//!
//! Định nghĩa các threshold cho behavioral scoring.
//! KHÔNG chứa logic - chỉ constants và config.

use serde::{Deserialize, Serialize};

// ============================================================================
// WEIGHTS (How much each factor contributes to final score)
// ============================================================================
//
// ⚠️ The weights intentionally sum to 1.12, not 1.0. The raw weighted sum can
// exceed 1.0 for extreme inputs and is clamped at the end. Do NOT renormalize
// - flagged for product sign-off, reproduced as shipped.

/// Weight of typing speed (28%)
pub const TYPING_WEIGHT: f64 = 0.28;

/// Weight of mouse travel (22%)
pub const MOUSE_WEIGHT: f64 = 0.22;

/// Weight of click-interval irregularity (22%)
pub const CLICK_WEIGHT: f64 = 0.22;

/// Weight of dwell time on sensitive pages (28%)
pub const NAVIGATION_WEIGHT: f64 = 0.28;

/// Weight of page-visit sequence anomaly (12%)
pub const SEQUENCE_WEIGHT: f64 = 0.12;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Typing below this rate (chars/min) starts looking scripted or coerced
pub const TYPING_SPEED_LOW: f64 = 200.0;

/// Typing above this rate (chars/min) starts looking automated
pub const TYPING_SPEED_HIGH: f64 = 600.0;

/// Mouse travel below this (pixels) is abnormally static
pub const MOUSE_TRAVEL_LOW: f64 = 1000.0;

/// Mouse travel above this (pixels) is abnormally erratic
pub const MOUSE_TRAVEL_HIGH: f64 = 8000.0;

/// Population std-dev of inter-click intervals (ms) above which the
/// click cadence is considered irregular
pub const CLICK_STDDEV_THRESHOLD: f64 = 150.0;

/// Base dwell time (seconds) on a sensitive page; tiers are multiples of this
pub const NAVIGATION_TIME_THRESHOLD: f64 = 30.0;

/// Behavior score at or above this derives a ledger record
pub const FRAUD_SCORE_THRESHOLD: f64 = 0.7;

// ============================================================================
// PAGE KEYWORDS (case-insensitive substring match)
// ============================================================================

/// Pages where long dwell time is a risk signal
pub const SENSITIVE_PAGE_KEYWORDS: &[&str] = &["transfer", "confirmation", "payment", "withdrawal"];

/// Pages that should never appear without a prior login
pub const SEQUENCE_SENSITIVE_KEYWORDS: &[&str] = &["transfer", "confirmation", "payment"];

/// Login page keyword
pub const LOGIN_PAGE_KEYWORD: &str = "login";

// ============================================================================
// FLAG NAMES (one per factor, at most one flag per factor)
// ============================================================================

pub const FLAG_TYPING_SLOW: &str = "typing_slow";
pub const FLAG_TYPING_FAST: &str = "typing_fast";
pub const FLAG_MOUSE_LOW: &str = "mouse_movement_low";
pub const FLAG_MOUSE_HIGH: &str = "mouse_movement_high";
pub const FLAG_CLICK_IRREGULAR: &str = "click_pattern_irregular";
pub const FLAG_SENSITIVE_DWELL: &str = "sensitive_page_dwell";
pub const FLAG_SEQUENCE_ANOMALY: &str = "page_sequence_anomaly";

// ============================================================================
// CONFIGURABLE RULES (for runtime adjustment)
// ============================================================================

/// Behavior scoring breakpoints (configurable; weights are fixed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorRules {
    pub typing_speed_low: f64,
    pub typing_speed_high: f64,
    pub mouse_travel_low: f64,
    pub mouse_travel_high: f64,
    pub click_stddev_threshold: f64,
    pub navigation_time_threshold: f64,
}

impl Default for BehaviorRules {
    fn default() -> Self {
        Self {
            typing_speed_low: TYPING_SPEED_LOW,
            typing_speed_high: TYPING_SPEED_HIGH,
            mouse_travel_low: MOUSE_TRAVEL_LOW,
            mouse_travel_high: MOUSE_TRAVEL_HIGH,
            click_stddev_threshold: CLICK_STDDEV_THRESHOLD,
            navigation_time_threshold: NAVIGATION_TIME_THRESHOLD,
        }
    }
}
