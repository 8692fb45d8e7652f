//! Behavioral Intent Scorer
//!
//! CHỈ chứa logic scoring - không có types, không có thresholds.
//! Input: BehaviorSample
//! Output: BehaviorVerdict
//!
//! Five independent weighted factors, each tiered into [0,1]. Every non-zero
//! factor contributes exactly one named flag. The weighted sum is clamped to
//! [0,1] and rounded to two decimals.

use super::rules::{self, BehaviorRules};
use super::types::{BehaviorSample, BehaviorVerdict};

// ============================================================================
// MAIN SCORING FUNCTION
// ============================================================================

/// Score a behavior sample with the default rules.
pub fn analyze_behavior(sample: &BehaviorSample) -> BehaviorVerdict {
    analyze_behavior_with_rules(sample, &BehaviorRules::default())
}

/// Score a behavior sample with custom rules.
pub fn analyze_behavior_with_rules(sample: &BehaviorSample, rules: &BehaviorRules) -> BehaviorVerdict {
    let mut score = 0.0f64;
    let mut flags: Vec<String> = Vec::new();

    let factors = [
        (score_typing_speed(sample.typing_speed, rules), rules::TYPING_WEIGHT),
        (score_mouse_travel(sample.mouse_movement, rules), rules::MOUSE_WEIGHT),
        (score_click_irregularity(&sample.click_pattern, rules), rules::CLICK_WEIGHT),
        (score_navigation_time(sample, rules), rules::NAVIGATION_WEIGHT),
        (score_page_sequence(&sample.pages_visited), rules::SEQUENCE_WEIGHT),
    ];

    for ((sub_score, flag), weight) in factors {
        score += sub_score * weight;
        if let Some(flag) = flag {
            flags.push(flag.to_string());
        }
    }

    let risk_score = round2(score.clamp(0.0, 1.0));

    log::debug!(
        "Behavior scored: session={} score={:.2} flags={:?}",
        sample.session_id, risk_score, flags
    );

    BehaviorVerdict {
        session_id: sample.session_id.clone(),
        risk_score,
        flags,
    }
}

// ============================================================================
// SUB-SCORES (each returns tier score + optional flag)
// ============================================================================

/// Typing speed: too slow = coerced/scripted entry, too fast = automation.
fn score_typing_speed(speed: f64, rules: &BehaviorRules) -> (f64, Option<&'static str>) {
    let low = rules.typing_speed_low;
    let high = rules.typing_speed_high;

    if speed < low * 0.7 {
        (0.95, Some(rules::FLAG_TYPING_SLOW))
    } else if speed < low {
        (0.85, Some(rules::FLAG_TYPING_SLOW))
    } else if speed < low * 1.15 {
        (0.65, Some(rules::FLAG_TYPING_SLOW))
    } else if speed < low * 1.3 {
        (0.35, Some(rules::FLAG_TYPING_SLOW))
    } else if speed > high * 1.2 {
        (0.5, Some(rules::FLAG_TYPING_FAST))
    } else if speed > high {
        (0.4, Some(rules::FLAG_TYPING_FAST))
    } else {
        (0.0, None)
    }
}

/// Mouse travel: a near-static pointer is the stronger signal.
fn score_mouse_travel(pixels: f64, rules: &BehaviorRules) -> (f64, Option<&'static str>) {
    let low = rules.mouse_travel_low;
    let high = rules.mouse_travel_high;

    if pixels < low * 0.5 {
        (0.85, Some(rules::FLAG_MOUSE_LOW))
    } else if pixels < low {
        (0.7, Some(rules::FLAG_MOUSE_LOW))
    } else if pixels < low * 1.2 {
        (0.45, Some(rules::FLAG_MOUSE_LOW))
    } else if pixels > high * 1.3 {
        (0.6, Some(rules::FLAG_MOUSE_HIGH))
    } else if pixels > high {
        (0.5, Some(rules::FLAG_MOUSE_HIGH))
    } else {
        (0.0, None)
    }
}

/// Click-interval irregularity via population std-dev of the interval series.
///
/// Needs at least 2 samples, otherwise 0 regardless of other inputs.
fn score_click_irregularity(intervals: &[f64], rules: &BehaviorRules) -> (f64, Option<&'static str>) {
    if intervals.len() < 2 {
        return (0.0, None);
    }

    let n = intervals.len() as f64;
    let mean = intervals.iter().sum::<f64>() / n;
    let variance = intervals.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    let t = rules.click_stddev_threshold;
    if stddev > t * 1.5 {
        (0.9, Some(rules::FLAG_CLICK_IRREGULAR))
    } else if stddev > t {
        (0.8, Some(rules::FLAG_CLICK_IRREGULAR))
    } else if stddev > t * 0.6 {
        (0.55, Some(rules::FLAG_CLICK_IRREGULAR))
    } else if stddev > t * 0.4 {
        (0.3, Some(rules::FLAG_CLICK_IRREGULAR))
    } else {
        (0.0, None)
    }
}

/// Dwell time on sensitive pages, tiered by multiples of the base threshold.
///
/// Only evaluated when the visited pages contain a sensitive keyword.
fn score_navigation_time(sample: &BehaviorSample, rules: &BehaviorRules) -> (f64, Option<&'static str>) {
    let on_sensitive_page = sample.pages_visited.iter().any(|page| {
        let page = page.to_lowercase();
        rules::SENSITIVE_PAGE_KEYWORDS.iter().any(|kw| page.contains(kw))
    });

    if !on_sensitive_page {
        return (0.0, None);
    }

    let t = rules.navigation_time_threshold;
    let dwell = sample.navigation_time;

    if dwell >= t * 3.0 {
        (0.95, Some(rules::FLAG_SENSITIVE_DWELL))
    } else if dwell >= t * 2.0 {
        (0.9, Some(rules::FLAG_SENSITIVE_DWELL))
    } else if dwell >= t * 1.5 {
        (0.75, Some(rules::FLAG_SENSITIVE_DWELL))
    } else if dwell >= t {
        (0.65, Some(rules::FLAG_SENSITIVE_DWELL))
    } else if dwell >= t * 0.7 {
        // Near the threshold but not over it - lower tier
        (0.35, Some(rules::FLAG_SENSITIVE_DWELL))
    } else {
        (0.0, None)
    }
}

/// Page-visit sequence anomaly.
///
/// A sensitive page reached without a prior login is the strongest signal;
/// a confirmation page with no transfer/payment and an implausibly short
/// session are weaker ones. First match wins.
fn score_page_sequence(pages: &[String]) -> (f64, Option<&'static str>) {
    let pages: Vec<String> = pages.iter().map(|p| p.to_lowercase()).collect();

    let first_sensitive = pages.iter().position(|page| {
        rules::SEQUENCE_SENSITIVE_KEYWORDS.iter().any(|kw| page.contains(kw))
    });

    let Some(idx) = first_sensitive else {
        return (0.0, None);
    };

    let login_before = pages[..idx].iter().any(|p| p.contains(rules::LOGIN_PAGE_KEYWORD));
    if !login_before {
        return (0.9, Some(rules::FLAG_SEQUENCE_ANOMALY));
    }

    let has = |kw: &str| pages.iter().any(|p| p.contains(kw));
    if has("confirmation") && !has("transfer") && !has("payment") {
        return (0.65, Some(rules::FLAG_SEQUENCE_ANOMALY));
    }

    if pages.len() <= 2 {
        return (0.5, Some(rules::FLAG_SEQUENCE_ANOMALY));
    }

    (0.0, None)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
