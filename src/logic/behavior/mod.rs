//! Behavior Module
//!
//! Chấm điểm rủi ro dựa trên hành vi người dùng trong phiên (typing, mouse,
//! navigation). Đây là trục thứ nhất của fraud scoring.
//!
//! ## Structure
//! - `types`: Core types (BehaviorSample, BehaviorVerdict)
//! - `rules`: Thresholds, weights and flag names
//! - `scorer`: Scoring logic
//!
//! ## Usage
//! ```ignore
//! use fraudshield_core::logic::behavior::{analyze_behavior, BehaviorSample};
//!
//! let verdict = analyze_behavior(&sample);
//! println!("{}: {:.2} {:?}", verdict.session_id, verdict.risk_score, verdict.flags);
//! ```

pub mod types;
pub mod rules;
pub mod scorer;

// Re-export main types for convenience
pub use types::{BehaviorSample, BehaviorVerdict};
pub use rules::BehaviorRules;
pub use scorer::{analyze_behavior, analyze_behavior_with_rules};
