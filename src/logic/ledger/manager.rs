//! Fraud Ledger Manager
//!
//! Owns the in-memory working set of fraud records and its eventual
//! consistency with the durable store.
//!
//! Consistency contract:
//! - Submit appends in memory first, then writes through to the store.
//!   A store failure is logged and swallowed - the submission still
//!   succeeds if the in-memory append did (availability over durability).
//! - Every read path (query, analytics) triggers a resync first. Resync is
//!   a read-merge: list from the store, skip ids already present, append
//!   the rest. Idempotent, append-only.
//! - The resync gate is a non-blocking try-lock. A caller arriving while a
//!   resync is in flight does not wait; it reads the working set as-is.
//!   Concurrent readers can therefore observe different freshness - this
//!   staleness window is accepted, not a bug.

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::constants;

use super::store::FraudStore;
use super::types::{
    AnalyticsReport, FraudRecord, LedgerError, QueryRequest, QueryResponse, Severity,
    SubmitReceipt, SubmitRequest,
};

pub struct FraudLedger<S: FraudStore> {
    store: S,
    records: Mutex<Vec<FraudRecord>>,
    /// Non-blocking resync gate; holding it means a resync is in flight
    resync_gate: Mutex<()>,
    store_prefix: String,
    resync_page_size: usize,
}

impl<S: FraudStore> FraudLedger<S> {
    /// Create a ledger with an empty working set.
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Mutex::new(Vec::new()),
            resync_gate: Mutex::new(()),
            store_prefix: constants::get_store_prefix(),
            resync_page_size: constants::get_resync_page_size(),
        }
    }

    /// Create a ledger and perform a one-shot load from the durable store.
    pub fn with_initial_load(store: S) -> Self {
        let ledger = Self::new(store);
        ledger.resync();
        log::info!(
            "Fraud ledger v{} initialized with {} record(s)",
            constants::CORE_VERSION,
            ledger.len()
        );
        ledger
    }

    // ========================================================================
    // SUBMIT
    // ========================================================================

    /// Validate and append a record, then write through to the durable store.
    pub fn submit(&self, request: SubmitRequest) -> Result<SubmitReceipt, LedgerError> {
        let severity = validate(&request)?;

        let now = Utc::now();
        let record = FraudRecord {
            record_id: generate_record_id(),
            institution_id: request.institution_id,
            device_hash: request.device_hash,
            account_hash: request.account_hash,
            pattern_hash: request.pattern_hash,
            fraud_type: request.fraud_type,
            timestamp: request.timestamp,
            severity,
            reported_at: now,
        };

        let record_id = record.record_id.clone();
        let key = self.record_key(&record);

        self.records.lock().push(record.clone());

        // Write-through is fire-and-forget relative to the caller: the
        // in-memory append already happened and is not rolled back.
        if let Err(e) = self.store.put(&key, &record) {
            log::error!(
                "Durable write-through failed for {} (record kept in memory): {}",
                record_id, e
            );
        }

        log::info!("Fraud record {} submitted by {}", record_id, record.institution_id);

        Ok(SubmitReceipt {
            success: true,
            record_id,
        })
    }

    // ========================================================================
    // QUERY
    // ========================================================================

    /// OR-match the provided hashes against the working set.
    ///
    /// Resyncs from the durable store first. Returns a per-field match
    /// summary plus the matching records in insertion order.
    pub fn query(&self, request: QueryRequest) -> Result<QueryResponse, LedgerError> {
        if request.device_hash.is_none()
            && request.account_hash.is_none()
            && request.pattern_hash.is_none()
        {
            return Err(LedgerError::EmptyQuery);
        }

        self.resync();

        let records = self.records.lock();

        let mut device_match = false;
        let mut account_match = false;
        let mut pattern_match = false;
        let mut matches = Vec::new();

        for record in records.iter() {
            let d = request.device_hash.as_deref() == Some(record.device_hash.as_str());
            let a = request.account_hash.as_deref() == Some(record.account_hash.as_str());
            let p = request.pattern_hash.as_deref() == Some(record.pattern_hash.as_str());

            device_match |= d;
            account_match |= a;
            pattern_match |= p;

            if d || a || p {
                matches.push(record.clone());
            }
        }

        let found = !matches.is_empty();
        log::debug!("Ledger query: found={} matches={}", found, matches.len());

        Ok(QueryResponse {
            found,
            device_match,
            account_match,
            pattern_match,
            matches,
        })
    }

    // ========================================================================
    // ANALYTICS
    // ========================================================================

    /// Aggregate the working set. Resyncs from the durable store first.
    pub fn analytics(&self) -> AnalyticsReport {
        self.resync();

        let records = self.records.lock();
        if records.is_empty() {
            return AnalyticsReport::empty();
        }

        // Most recent by event timestamp. The sort is stable, so records
        // sharing a timestamp keep their insertion order.
        let mut by_recency: Vec<&FraudRecord> = records.iter().collect();
        by_recency.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let latest = by_recency[0];

        let mut fraud_type_counts: HashMap<String, u64> = HashMap::new();
        let mut severity_counts: HashMap<String, u64> = HashMap::new();
        // Insertion order of first occurrence decides count ties
        let mut first_seen: Vec<&str> = Vec::new();

        for record in records.iter() {
            if !first_seen.contains(&record.fraud_type.as_str()) {
                first_seen.push(record.fraud_type.as_str());
            }
            *fraud_type_counts.entry(record.fraud_type.clone()).or_insert(0) += 1;
            *severity_counts.entry(record.severity.as_str().to_string()).or_insert(0) += 1;
        }

        let mut most_common = "";
        let mut most_common_count = 0u64;
        for fraud_type in &first_seen {
            let count = fraud_type_counts[*fraud_type];
            if count > most_common_count {
                most_common = *fraud_type;
                most_common_count = count;
            }
        }

        AnalyticsReport {
            total_records: records.len(),
            latest_activity: latest.timestamp.format("%m/%d/%Y").to_string(),
            latest_device_hash: latest.device_hash.clone(),
            most_common_fraud_type: most_common.to_string(),
            fraud_type_counts,
            severity_counts,
        }
    }

    // ========================================================================
    // ADMIN / STATUS
    // ========================================================================

    /// Administrative delete by record id. Working set only; durable
    /// retention is external policy.
    pub fn delete(&self, record_id: &str) -> bool {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| r.record_id != record_id);
        let deleted = records.len() < before;
        if deleted {
            log::warn!("Fraud record {} administratively deleted", record_id);
        }
        deleted
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    // ========================================================================
    // RESYNC
    // ========================================================================

    /// Read-merge reconciliation against the durable store.
    ///
    /// If a resync is already in flight the call is a no-op and the caller
    /// proceeds against the working set in its current state.
    fn resync(&self) {
        let Some(_guard) = self.resync_gate.try_lock() else {
            log::debug!("Resync already in flight, serving current working set");
            return;
        };

        match self.store.list(&self.store_prefix, self.resync_page_size) {
            Ok(stored) => {
                let mut records = self.records.lock();
                let mut merged = 0;
                for record in stored {
                    let known = records.iter().any(|r| r.record_id == record.record_id);
                    if !known {
                        records.push(record);
                        merged += 1;
                    }
                }
                if merged > 0 {
                    log::info!("Resync merged {} record(s) from durable store", merged);
                }
            }
            Err(e) => {
                // Degrade to last known state rather than failing the read
                log::warn!("Resync failed, serving last known state: {}", e);
            }
        }
    }

    fn record_key(&self, record: &FraudRecord) -> String {
        format!(
            "{}{}/{}.json",
            self.store_prefix,
            record.timestamp.format("%Y/%m"),
            record.record_id
        )
    }
}

/// Per-process submission sequence; disambiguates ids sharing a millisecond
static SUBMISSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Time-ordered id with a submission sequence and a random suffix, e.g.
/// `fraud_1736900000123_000042_9f3a2b1c`. Ids are strictly increasing in
/// submission order even when submissions land on the same millisecond.
fn generate_record_id() -> String {
    let seq = SUBMISSION_SEQ.fetch_add(1, Ordering::Relaxed);
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "fraud_{}_{:06}_{}",
        Utc::now().timestamp_millis(),
        seq,
        &suffix[..8]
    )
}

fn validate(request: &SubmitRequest) -> Result<Severity, LedgerError> {
    if request.institution_id.is_empty() {
        return Err(LedgerError::MissingField("institution_id"));
    }
    if request.device_hash.is_empty() {
        return Err(LedgerError::MissingField("device_hash"));
    }
    if request.account_hash.is_empty() {
        return Err(LedgerError::MissingField("account_hash"));
    }
    if request.pattern_hash.is_empty() {
        return Err(LedgerError::MissingField("pattern_hash"));
    }
    if request.fraud_type.is_empty() {
        return Err(LedgerError::MissingField("fraud_type"));
    }
    if request.severity.is_empty() {
        return Err(LedgerError::MissingField("severity"));
    }

    Severity::parse(&request.severity)
        .ok_or_else(|| LedgerError::InvalidSeverity(request.severity.clone()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::ledger::store::{InMemoryStore, StoreError};
    use chrono::TimeZone;

    /// Run with RUST_LOG=debug to see ledger logging in test output
    fn init_test_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn request(institution: &str, fraud_type: &str, device_hash: &str) -> SubmitRequest {
        init_test_logger();
        SubmitRequest {
            institution_id: institution.to_string(),
            device_hash: device_hash.to_string(),
            account_hash: "account-hash-1".to_string(),
            pattern_hash: "pattern-hash-1".to_string(),
            fraud_type: fraud_type.to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 1, 15, 3, 0, 0).unwrap(),
            severity: "high".to_string(),
        }
    }

    #[test]
    fn test_submit_appends_and_writes_through() {
        let ledger = FraudLedger::new(InMemoryStore::new());

        let receipt = ledger.submit(request("bank-a", "predictive_scam", "dh-1")).unwrap();
        assert!(receipt.success);
        assert!(receipt.record_id.starts_with("fraud_"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.store.len(), 1);
    }

    #[test]
    fn test_submit_rejects_missing_fields_and_bad_severity() {
        let ledger = FraudLedger::new(InMemoryStore::new());

        let mut bad = request("bank-a", "predictive_scam", "dh-1");
        bad.institution_id = String::new();
        assert!(matches!(ledger.submit(bad), Err(LedgerError::MissingField("institution_id"))));

        let mut bad = request("bank-a", "predictive_scam", "dh-1");
        bad.severity = "catastrophic".to_string();
        assert!(matches!(ledger.submit(bad), Err(LedgerError::InvalidSeverity(_))));

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_submit_succeeds_when_store_write_fails() {
        struct BrokenStore;
        impl FraudStore for BrokenStore {
            fn put(&self, _: &str, _: &FraudRecord) -> Result<(), StoreError> {
                Err(StoreError::Backend("disk on fire".to_string()))
            }
            fn list(&self, _: &str, _: usize) -> Result<Vec<FraudRecord>, StoreError> {
                Err(StoreError::Backend("disk on fire".to_string()))
            }
            fn get(&self, _: &str) -> Result<Option<FraudRecord>, StoreError> {
                Err(StoreError::Backend("disk on fire".to_string()))
            }
        }

        let ledger = FraudLedger::new(BrokenStore);
        let receipt = ledger.submit(request("bank-a", "predictive_scam", "dh-1")).unwrap();
        // Availability over durability: in-memory append carries the submission
        assert!(receipt.success);
        assert_eq!(ledger.len(), 1);

        // Reads degrade to last known state instead of failing
        let report = ledger.analytics();
        assert_eq!(report.total_records, 1);
    }

    #[test]
    fn test_query_requires_at_least_one_hash() {
        let ledger = FraudLedger::new(InMemoryStore::new());
        assert!(matches!(
            ledger.query(QueryRequest::default()),
            Err(LedgerError::EmptyQuery)
        ));
    }

    #[test]
    fn test_query_per_field_match_flags() {
        let ledger = FraudLedger::new(InMemoryStore::new());
        ledger.submit(request("bank-a", "predictive_scam", "dh-1")).unwrap();
        ledger.submit(request("bank-b", "predictive_scam", "dh-2")).unwrap();

        let response = ledger
            .query(QueryRequest {
                device_hash: Some("dh-2".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert!(response.found);
        assert!(response.device_match);
        // Unrelated records exist, but only the queried field may flip
        assert!(!response.account_match);
        assert!(!response.pattern_match);
        assert_eq!(response.matches.len(), 1);
        assert_eq!(response.matches[0].institution_id, "bank-b");

        let miss = ledger
            .query(QueryRequest {
                device_hash: Some("dh-404".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(!miss.found);
        assert!(miss.matches.is_empty());
    }

    #[test]
    fn test_query_resyncs_records_written_by_others() {
        let store = InMemoryStore::new();

        // Another institution wrote directly to the shared store
        let foreign = FraudRecord {
            record_id: "fraud_1_aaaaaaaa".to_string(),
            institution_id: "bank-z".to_string(),
            device_hash: "dh-foreign".to_string(),
            account_hash: "ah-foreign".to_string(),
            pattern_hash: "ph-foreign".to_string(),
            fraud_type: "human_intent_fraud".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
            severity: Severity::Critical,
            reported_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 5).unwrap(),
        };
        store.put("fraud-records/2025/01/fraud_1_aaaaaaaa.json", &foreign).unwrap();

        let ledger = FraudLedger::new(store);
        assert!(ledger.is_empty());

        let response = ledger
            .query(QueryRequest {
                device_hash: Some("dh-foreign".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(response.found);

        // Idempotence: a second read-path resync adds no duplicates
        ledger.analytics();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_analytics_empty_working_set() {
        let ledger = FraudLedger::new(InMemoryStore::new());
        let report = ledger.analytics();

        assert_eq!(report.total_records, 0);
        assert_eq!(report.latest_activity, "N/A");
        assert_eq!(report.latest_device_hash, "N/A");
        assert_eq!(report.most_common_fraud_type, "N/A");
        assert!(report.fraud_type_counts.is_empty());
        assert!(report.severity_counts.is_empty());
    }

    #[test]
    fn test_analytics_counts_and_latest() {
        let ledger = FraudLedger::new(InMemoryStore::new());

        let mut old = request("bank-a", "predictive_scam", "dh-old");
        old.timestamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        ledger.submit(old).unwrap();

        let mut newest = request("bank-a", "predictive_scam", "dh-new");
        newest.timestamp = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        ledger.submit(newest).unwrap();

        ledger.submit(request("bank-b", "human_intent_fraud", "dh-x")).unwrap();

        let report = ledger.analytics();
        assert_eq!(report.total_records, 3);
        assert_eq!(report.latest_activity, "03/20/2025");
        assert_eq!(report.latest_device_hash, "dh-new");
        assert_eq!(report.most_common_fraud_type, "predictive_scam");
        assert_eq!(report.fraud_type_counts["predictive_scam"], 2);
        assert_eq!(report.severity_counts["high"], 3);
    }

    #[test]
    fn test_most_common_type_tie_goes_to_first_inserted() {
        let ledger = FraudLedger::new(InMemoryStore::new());
        ledger.submit(request("bank-a", "human_intent_fraud", "dh-1")).unwrap();
        ledger.submit(request("bank-a", "predictive_scam", "dh-2")).unwrap();

        // Equal counts: the type whose first record came earlier wins
        let report = ledger.analytics();
        assert_eq!(report.most_common_fraud_type, "human_intent_fraud");
    }

    #[test]
    fn test_record_ids_strictly_increase_with_submission_order() {
        // Back-to-back ids routinely share a millisecond; the sequence
        // component must still order them by submission.
        let ids: Vec<String> = (0..64).map(|_| generate_record_id()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_delete_by_id() {
        let ledger = FraudLedger::new(InMemoryStore::new());
        let receipt = ledger.submit(request("bank-a", "predictive_scam", "dh-1")).unwrap();

        assert!(ledger.delete(&receipt.record_id));
        assert!(!ledger.delete(&receipt.record_id));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_score_then_submit_then_query_pipeline() {
        use crate::logic::hashing::digest;
        use crate::logic::ledger::record::transaction_record;
        use crate::logic::transaction::{analyze_transaction, TransactionSample};

        let sample = TransactionSample {
            transaction_id: "tx-42".to_string(),
            user_id: "user-42".to_string(),
            amount: 5000.0,
            currency: "USD".to_string(),
            recipient_account: "acc999".to_string(),
            average_amount: 200.0,
            transaction_type: "wire_transfer".to_string(),
            location: "offshore".to_string(),
            timestamp: "2025-01-15T03:00:00Z".to_string(),
            device_id: "device-xyz789".to_string(),
        };

        let verdict = analyze_transaction(&sample);
        let submission = transaction_record("bank-a", &sample, &verdict)
            .expect("HIGH_RISK verdict must derive a record");

        let ledger = FraudLedger::new(InMemoryStore::new());
        ledger.submit(submission).unwrap();

        // A second institution checking the same device gets a hit
        let response = ledger
            .query(QueryRequest {
                device_hash: Some(digest("device-xyz789")),
                ..Default::default()
            })
            .unwrap();
        assert!(response.found);
        assert!(response.device_match);
        assert_eq!(response.matches[0].fraud_type, "predictive_scam");
    }

    #[test]
    fn test_initial_load_from_store() {
        let store = InMemoryStore::new();
        let record = FraudRecord {
            record_id: "fraud_2_bbbbbbbb".to_string(),
            institution_id: "bank-a".to_string(),
            device_hash: "dh".to_string(),
            account_hash: "ah".to_string(),
            pattern_hash: "ph".to_string(),
            fraud_type: "predictive_scam".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 2, 2, 2, 0, 0).unwrap(),
            severity: Severity::Medium,
            reported_at: Utc::now(),
        };
        store.put("fraud-records/2025/02/fraud_2_bbbbbbbb.json", &record).unwrap();

        let ledger = FraudLedger::with_initial_load(store);
        assert_eq!(ledger.len(), 1);
    }
}
