//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::reconcile::Reconciliation;
use crate::core::transform::EnrichOutcome;
use crate::domain::DateRange;
use std::path::PathBuf;
use std::time::Duration;

/// A file written by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub rows: usize,
    /// Hex SHA-256 of the file contents
    pub checksum: String,
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Run identifier, also attached to every log line of the run
    pub run_id: String,

    /// Ship-date range exported
    pub range: DateRange,

    /// Shipments returned by the shipment search
    pub shipments_fetched: usize,

    /// Orders returned by the bulk order search
    pub orders_bulk: usize,

    /// Orders resolved by individual lookup
    pub orders_backfilled: usize,

    /// Referenced orders that could not be resolved
    pub orders_missing: usize,

    /// Shipments skipped because they were voided
    pub voided_skipped: usize,

    /// Shipments skipped because their order did not resolve
    pub order_missing_skipped: usize,

    /// Shipments skipped because they had no line items
    pub items_missing_skipped: usize,

    /// Raw export file, `None` when there was nothing to write
    pub export: Option<WrittenFile>,

    /// Post-processed file, `None` when post-processing did not run
    pub processed: Option<WrittenFile>,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(run_id: impl Into<String>, range: DateRange) -> Self {
        Self {
            run_id: run_id.into(),
            range,
            shipments_fetched: 0,
            orders_bulk: 0,
            orders_backfilled: 0,
            orders_missing: 0,
            voided_skipped: 0,
            order_missing_skipped: 0,
            items_missing_skipped: 0,
            export: None,
            processed: None,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn record_reconciliation(&mut self, reconciliation: &Reconciliation) {
        self.orders_bulk = reconciliation.bulk_count;
        self.orders_backfilled = reconciliation.backfilled;
        self.orders_missing = reconciliation.missing.len();
    }

    pub fn record_enrichment(&mut self, outcome: &EnrichOutcome) {
        self.voided_skipped = outcome.voided;
        self.order_missing_skipped = outcome.order_missing;
        self.items_missing_skipped = outcome.items_missing;
    }

    /// Rows in the raw export
    pub fn records_written(&self) -> usize {
        self.export.as_ref().map_or(0, |f| f.rows)
    }

    /// Shipments excluded for any reason
    pub fn total_skipped(&self) -> usize {
        self.voided_skipped + self.order_missing_skipped + self.items_missing_skipped
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            range = %self.range,
            shipments = self.shipments_fetched,
            orders_bulk = self.orders_bulk,
            orders_backfilled = self.orders_backfilled,
            orders_missing = self.orders_missing,
            voided = self.voided_skipped,
            order_missing = self.order_missing_skipped,
            items_missing = self.items_missing_skipped,
            records = self.records_written(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        match &self.export {
            Some(file) => tracing::info!(
                path = %file.path.display(),
                checksum = %file.checksum,
                "Export file"
            ),
            None => tracing::info!("No shipments to export; no file written"),
        }

        if let Some(file) = &self.processed {
            tracing::info!(
                path = %file.path.display(),
                rows = file.rows,
                checksum = %file.checksum,
                "Post-processed file"
            );
        }

        if self.orders_missing > 0 {
            tracing::warn!(
                orders_missing = self.orders_missing,
                "Some orders could not be resolved; their shipments were excluded"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderId;

    fn range() -> DateRange {
        DateRange::parse("2024-02-01", "2024-02-29").unwrap()
    }

    #[test]
    fn test_new_summary_is_empty() {
        let summary = ExportSummary::new("run-1", range());
        assert_eq!(summary.records_written(), 0);
        assert_eq!(summary.total_skipped(), 0);
        assert!(summary.export.is_none());
    }

    #[test]
    fn test_records_counts() {
        let mut summary = ExportSummary::new("run-1", range());
        summary.record_reconciliation(&Reconciliation {
            bulk_count: 4,
            backfilled: 1,
            missing: vec![OrderId::new(9)],
            ..Default::default()
        });
        summary.record_enrichment(&EnrichOutcome {
            voided: 2,
            order_missing: 1,
            ..Default::default()
        });
        summary.export = Some(WrittenFile {
            path: PathBuf::from("out.csv"),
            rows: 7,
            checksum: "abc".to_string(),
        });

        assert_eq!(summary.orders_missing, 1);
        assert_eq!(summary.total_skipped(), 3);
        assert_eq!(summary.records_written(), 7);
    }
}
