//! Transaction Risk Scorer
//!
//! CHỈ chứa logic scoring - không có types, không có thresholds.
//! Input: TransactionSample
//! Output: TransactionVerdict
//!
//! Six independent weighted factors evaluated in a fixed order. Reason codes
//! are appended in that same order and never re-sorted. Several lower tiers
//! contribute score without emitting a code, so action rules that count codes
//! can under-count contributing factors - kept as shipped.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc, Weekday};

use super::rules::{self, TransactionRules};
use super::types::{
    PredictionResult, ReasonCode, RecommendedAction, TransactionSample, TransactionVerdict,
};

// ============================================================================
// MAIN SCORING FUNCTION
// ============================================================================

/// Score a transaction with the default rules.
pub fn analyze_transaction(sample: &TransactionSample) -> TransactionVerdict {
    analyze_transaction_with_rules(sample, &TransactionRules::default())
}

/// Score a transaction with custom rules.
pub fn analyze_transaction_with_rules(
    sample: &TransactionSample,
    rules: &TransactionRules,
) -> TransactionVerdict {
    let mut score = 0.0f64;
    let mut reason_codes: Vec<ReasonCode> = Vec::new();

    // Factor evaluation order is part of the contract (reason code order)
    let factors = [
        (score_amount(sample.amount, sample.average_amount, rules), rules::AMOUNT_WEIGHT),
        (score_transaction_type(&sample.transaction_type), rules::TYPE_WEIGHT),
        (score_location(&sample.location), rules::LOCATION_WEIGHT),
        (score_device(&sample.device_id), rules::DEVICE_WEIGHT),
        (score_timing(&sample.timestamp), rules::TIMING_WEIGHT),
        (score_recipient(&sample.recipient_account), rules::RECIPIENT_WEIGHT),
    ];

    for ((sub_score, code), weight) in factors {
        score += sub_score * weight;
        if let Some(code) = code {
            reason_codes.push(code);
        }
    }

    let risk_score = round2(score.clamp(0.0, 1.0));

    let prediction = if risk_score >= rules.high_risk_threshold {
        PredictionResult::HighRisk
    } else if risk_score >= rules.suspicious_threshold {
        PredictionResult::Suspicious
    } else {
        PredictionResult::Safe
    };

    let recommended_action = recommend_action(risk_score, &reason_codes);

    log::debug!(
        "Transaction scored: tx={} score={:.2} prediction={} action={} codes={:?}",
        sample.transaction_id, risk_score, prediction, recommended_action, reason_codes
    );

    TransactionVerdict {
        transaction_id: sample.transaction_id.clone(),
        risk_score,
        prediction,
        recommended_action,
        reason_codes,
    }
}

// ============================================================================
// ACTION STATE MACHINE (checked in priority order, first match wins)
// ============================================================================

fn recommend_action(score: f64, codes: &[ReasonCode]) -> RecommendedAction {
    let has = |c: ReasonCode| codes.contains(&c);

    if score >= 0.85
        || (score >= 0.7 && (has(ReasonCode::VeryHighAmount) || has(ReasonCode::HighRiskLocation)))
        || codes.len() >= 4
    {
        RecommendedAction::Block
    } else if score >= 0.6
        || (score >= 0.5
            && (has(ReasonCode::HighAmount)
                || has(ReasonCode::NewDevice)
                || has(ReasonCode::HighRiskTransactionType)))
        || codes.len() >= 3
    {
        RecommendedAction::DelayAndMfa
    } else if score >= 0.3 || codes.len() >= 2 || score >= 0.25 {
        RecommendedAction::FlagForReview
    } else {
        RecommendedAction::Approve
    }
}

// ============================================================================
// SUB-SCORES (each returns tier score + optional reason code)
// ============================================================================

/// Amount relative to the user's historical average.
///
/// The code choice is decided by the 5x threshold alone, independent of
/// which risk tier fired.
fn score_amount(amount: f64, average: f64, rules: &TransactionRules) -> (f64, Option<ReasonCode>) {
    if average <= 0.0 {
        // No baseline to compare against
        return (rules::NO_BASELINE_RISK, None);
    }

    let ratio = amount / average;

    let code = if ratio >= rules.amount_very_high_multiplier {
        Some(ReasonCode::VeryHighAmount)
    } else if ratio >= rules.amount_high_multiplier {
        Some(ReasonCode::HighAmount)
    } else {
        None
    };

    let score = if ratio >= rules.amount_very_high_multiplier {
        0.98
    } else if ratio >= rules.amount_high_multiplier {
        0.85
    } else if ratio >= 2.0 {
        0.65
    } else if ratio >= 1.5 {
        0.45
    } else if ratio >= 1.2 {
        0.25
    } else {
        0.0
    };

    (score, code)
}

/// Transaction type against the fixed high-risk set.
fn score_transaction_type(raw_type: &str) -> (f64, Option<ReasonCode>) {
    let normalized = raw_type.to_lowercase().replace(['_', '-'], " ");
    let normalized = normalized.trim();

    if rules::HIGH_RISK_TYPES.contains(&normalized) {
        (0.85, Some(ReasonCode::HighRiskTransactionType))
    } else if normalized.contains("transfer") || normalized.contains("payment") {
        (0.45, None)
    } else if !normalized.is_empty() {
        (0.15, None)
    } else {
        (0.0, None)
    }
}

/// Location string against high-risk keywords.
fn score_location(location: &str) -> (f64, Option<ReasonCode>) {
    let location = location.to_lowercase();

    if rules::HIGH_RISK_LOCATION_KEYWORDS.iter().any(|kw| location.contains(kw)) {
        (0.9, Some(ReasonCode::HighRiskLocation))
    } else if location.contains("international") || location.contains("foreign") {
        (0.55, None)
    } else if location.contains("country") || location.contains("state") || location.contains("abroad") {
        (0.3, None)
    } else {
        (0.0, None)
    }
}

/// Device novelty heuristic. Placeholder for a real device-history lookup.
fn score_device(device_id: &str) -> (f64, Option<ReasonCode>) {
    let device = device_id.to_lowercase();

    if device.contains("new") || device.contains("temp") {
        (0.8, Some(ReasonCode::NewDevice))
    } else if device.contains("unknown") || device.contains("guest") || device.len() < 5 {
        (0.7, None)
    } else if !rules::KNOWN_DEVICE_FORMAT.is_match(&device) {
        (0.4, None)
    } else {
        (0.0, None)
    }
}

/// Timing signal from the transaction timestamp (UTC).
///
/// An unparseable timestamp is fail-open: fixed risk, no code.
fn score_timing(timestamp: &str) -> (f64, Option<ReasonCode>) {
    let Some(ts) = parse_timestamp(timestamp) else {
        return (0.35, None);
    };

    let hour = ts.hour();
    let weekend = matches!(ts.weekday(), Weekday::Sat | Weekday::Sun);

    if (1..7).contains(&hour) {
        (0.65, Some(ReasonCode::UnusualTiming))
    } else if hour >= 22 || hour < 1 {
        (0.45, None)
    } else if (7..9).contains(&hour) {
        (0.3, None)
    } else if weekend {
        (0.25, None)
    } else {
        (0.0, None)
    }
}

/// Recipient novelty heuristic. Placeholder for a real recipient-history lookup.
fn score_recipient(recipient: &str) -> (f64, Option<ReasonCode>) {
    let recipient = recipient.to_lowercase();
    let all_numeric = !recipient.is_empty() && recipient.chars().all(|c| c.is_ascii_digit());

    if recipient.len() < 6 || recipient.starts_with("temp") || recipient.starts_with("test") {
        (0.85, Some(ReasonCode::NewRecipient))
    } else if recipient.contains("unknown") || recipient.contains("new") || all_numeric {
        (0.6, None)
    } else if recipient.len() < 8 {
        (0.35, Some(ReasonCode::NewRecipient))
    } else {
        (0.0, None)
    }
}

/// Lenient ISO-8601 parsing: RFC 3339 first, then a naive fallback.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn routine_sample() -> TransactionSample {
        TransactionSample {
            transaction_id: "tx-1".to_string(),
            user_id: "user-1".to_string(),
            amount: 100.0,
            currency: "USD".to_string(),
            recipient_account: "acct-789012345".to_string(),
            average_amount: 100.0,
            transaction_type: "purchase".to_string(),
            location: "New York".to_string(),
            timestamp: "2025-01-15T14:00:00Z".to_string(), // Wednesday afternoon
            device_id: "device-abc123".to_string(),
        }
    }

    #[test]
    fn test_routine_transaction_approved() {
        let verdict = analyze_transaction(&routine_sample());
        assert_eq!(verdict.risk_score, 0.03); // only the generic-type tier fires
        assert_eq!(verdict.prediction, PredictionResult::Safe);
        assert_eq!(verdict.recommended_action, RecommendedAction::Approve);
        assert!(verdict.reason_codes.is_empty());
    }

    #[test]
    fn test_high_risk_reference_vector() {
        // 25x average, wire transfer, offshore, 3am, short recipient -> 0.78, BLOCK
        let sample = TransactionSample {
            amount: 5000.0,
            average_amount: 200.0,
            transaction_type: "wire_transfer".to_string(),
            location: "offshore".to_string(),
            timestamp: "2025-01-15T03:00:00Z".to_string(),
            recipient_account: "acc999".to_string(),
            device_id: "device-xyz789".to_string(),
            ..routine_sample()
        };

        let verdict = analyze_transaction(&sample);
        assert_eq!(verdict.risk_score, 0.78);
        assert_eq!(verdict.prediction, PredictionResult::HighRisk);
        assert_eq!(verdict.recommended_action, RecommendedAction::Block);
        assert_eq!(
            verdict.reason_codes,
            vec![
                ReasonCode::VeryHighAmount,
                ReasonCode::HighRiskTransactionType,
                ReasonCode::HighRiskLocation,
                ReasonCode::UnusualTiming,
                ReasonCode::NewRecipient,
            ]
        );
    }

    #[test]
    fn test_no_baseline_fixed_risk() {
        let sample = TransactionSample {
            average_amount: 0.0,
            ..routine_sample()
        };
        let (sub, code) = score_amount(sample.amount, sample.average_amount, &TransactionRules::default());
        assert_eq!(sub, 0.65);
        assert!(code.is_none());
    }

    #[test]
    fn test_amount_code_follows_five_x_threshold() {
        let rules = TransactionRules::default();
        assert_eq!(score_amount(1000.0, 200.0, &rules).1, Some(ReasonCode::VeryHighAmount));
        assert_eq!(score_amount(700.0, 200.0, &rules).1, Some(ReasonCode::HighAmount));
        assert_eq!(score_amount(500.0, 200.0, &rules).1, None); // 2.5x: score but no code
    }

    #[test]
    fn test_unparseable_timestamp_fails_open() {
        let sample = TransactionSample {
            timestamp: "not-a-date".to_string(),
            ..routine_sample()
        };
        let verdict = analyze_transaction(&sample);
        // 0.15*0.22 (generic type) + 0.35*0.12 (timing fallback) = 0.075 -> 0.08
        assert_eq!(verdict.risk_score, 0.08);
        assert!(verdict.reason_codes.is_empty());
        assert_eq!(verdict.prediction, PredictionResult::Safe);
    }

    #[test]
    fn test_timing_tiers() {
        assert_eq!(score_timing("2025-01-15T03:00:00Z"), (0.65, Some(ReasonCode::UnusualTiming)));
        assert_eq!(score_timing("2025-01-15T23:00:00Z"), (0.45, None));
        assert_eq!(score_timing("2025-01-15T08:00:00Z"), (0.3, None));
        // Saturday noon
        assert_eq!(score_timing("2025-01-18T12:00:00Z"), (0.25, None));
        // Weekday noon
        assert_eq!(score_timing("2025-01-15T12:00:00Z"), (0.0, None));
    }

    #[test]
    fn test_type_normalization() {
        assert_eq!(
            score_transaction_type("Wire_Transfer").1,
            Some(ReasonCode::HighRiskTransactionType)
        );
        assert_eq!(score_transaction_type("bill-payment"), (0.45, None));
        assert_eq!(score_transaction_type("purchase"), (0.15, None));
        assert_eq!(score_transaction_type(""), (0.0, None));
    }

    #[test]
    fn test_device_tiers() {
        assert_eq!(score_device("temp-device-1").1, Some(ReasonCode::NewDevice));
        assert_eq!(score_device("guest-machine"), (0.7, None));
        assert_eq!(score_device("ab1"), (0.7, None)); // shorter than 5 chars
        assert_eq!(score_device("weird format!!"), (0.4, None));
        assert_eq!(score_device("device-abc123"), (0.0, None));
    }

    #[test]
    fn test_recipient_tiers() {
        assert_eq!(score_recipient("ab12"), (0.85, Some(ReasonCode::NewRecipient)));
        assert_eq!(score_recipient("test-account-999").1, Some(ReasonCode::NewRecipient));
        assert_eq!(score_recipient("unknown-recipient-1"), (0.6, None));
        assert_eq!(score_recipient("12345678901"), (0.6, None)); // all numeric
        assert_eq!(score_recipient("acc999"), (0.35, Some(ReasonCode::NewRecipient)));
        assert_eq!(score_recipient("acct-789012345"), (0.0, None));
    }

    #[test]
    fn test_delay_and_mfa_via_high_amount_rule() {
        // 3.5x average + payment type + abroad + unknown device = 0.55
        let sample = TransactionSample {
            amount: 700.0,
            average_amount: 200.0,
            transaction_type: "payment".to_string(),
            location: "abroad".to_string(),
            device_id: "unknown".to_string(),
            recipient_account: "recipient-9988776655".to_string(),
            ..routine_sample()
        };

        let verdict = analyze_transaction(&sample);
        assert_eq!(verdict.risk_score, 0.55);
        assert_eq!(verdict.prediction, PredictionResult::Suspicious);
        // Below 0.6, but >= 0.5 with HIGH_AMOUNT present
        assert_eq!(verdict.recommended_action, RecommendedAction::DelayAndMfa);
    }

    #[test]
    fn test_flag_for_review_below_suspicious_threshold() {
        // 1.3x average + transfer-ish type + vague location = 0.28:
        // SAFE category, but the >= 0.25 action rule still flags it
        let sample = TransactionSample {
            amount: 130.0,
            average_amount: 100.0,
            transaction_type: "transfer".to_string(),
            location: "international".to_string(),
            ..routine_sample()
        };

        let verdict = analyze_transaction(&sample);
        assert_eq!(verdict.risk_score, 0.28);
        assert_eq!(verdict.prediction, PredictionResult::Safe);
        assert_eq!(verdict.recommended_action, RecommendedAction::FlagForReview);
    }

    #[test]
    fn test_block_via_reason_code_count() {
        let codes = vec![
            ReasonCode::HighAmount,
            ReasonCode::NewDevice,
            ReasonCode::UnusualTiming,
            ReasonCode::NewRecipient,
        ];
        assert_eq!(recommend_action(0.55, &codes), RecommendedAction::Block);
    }

    #[test]
    fn test_score_always_in_range() {
        // Everything at the worst tier
        let sample = TransactionSample {
            amount: 100_000.0,
            average_amount: 10.0,
            transaction_type: "cryptocurrency".to_string(),
            location: "offshore tax haven".to_string(),
            timestamp: "2025-01-15T03:00:00Z".to_string(),
            device_id: "new-temp-device".to_string(),
            recipient_account: "test1".to_string(),
            ..routine_sample()
        };

        let verdict = analyze_transaction(&sample);
        assert!(verdict.risk_score <= 1.0);
        assert_eq!(verdict.risk_score, 0.99);
        assert_eq!(verdict.prediction, PredictionResult::HighRisk);
        assert_eq!(verdict.recommended_action, RecommendedAction::Block);
        assert!(verdict.is_fraudulent());
    }
}
