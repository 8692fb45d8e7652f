//! Logic Module - Scoring Engines & Ledger
//!
//! Chứa các engines xử lý: Behavior Scorer, Transaction Scorer, Fraud Ledger.
//!
//! ## Structure
//! - `hashing` - One-way digest utility (anonymization)
//! - `behavior/` - Behavioral intent scoring (typing, mouse, navigation)
//! - `transaction/` - Transaction risk scoring (amount, type, location, ...)
//! - `ledger/` - Shared fraud-intelligence ledger + durable-store sync

pub mod hashing;

pub mod behavior;
pub mod transaction;
pub mod ledger;
