//! Export coordinator - main orchestrator for the export process
//!
//! One run fetches shipments for a date range, resolves their orders,
//! carriers and services, writes the raw export and, if enabled, the
//! post-processed file.

use super::post_process::PostProcessor;
use super::summary::ExportSummary;
use super::writer::{write_export, write_processed};
use crate::adapters::shipstation::ShippingSource;
use crate::config::ShipexConfig;
use crate::core::fetch::RemoteFetcher;
use crate::core::reconcile::EntityReconciler;
use crate::core::retry::RetryPolicies;
use crate::core::table::Table;
use crate::core::transform::RecordEnricher;
use crate::core::zones::ZoneTable;
use crate::domain::{CarrierLookup, DateRange, Result, ShipexError};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Export coordinator
pub struct ExportCoordinator {
    config: ShipexConfig,
    fetcher: RemoteFetcher,
    zones: Option<ZoneTable>,
}

impl ExportCoordinator {
    /// Create a coordinator over a shipping source
    ///
    /// `zones` is the reference table used to fill zone gaps during
    /// post-processing.
    pub fn new(
        config: ShipexConfig,
        source: Arc<dyn ShippingSource>,
        zones: Option<ZoneTable>,
    ) -> Self {
        let policies = RetryPolicies::from_config(&config.retry);
        Self::with_policies(config, source, zones, policies)
    }

    /// Create a coordinator with explicit retry policies
    pub fn with_policies(
        config: ShipexConfig,
        source: Arc<dyn ShippingSource>,
        zones: Option<ZoneTable>,
        policies: RetryPolicies,
    ) -> Self {
        tracing::debug!(source = %source.base_url(), "Export coordinator created");
        Self {
            config,
            fetcher: RemoteFetcher::new(source, policies),
            zones,
        }
    }

    /// Execute the export for `range`
    ///
    /// 1. Fetch shipments (empty answers retried)
    /// 2. Concurrently fetch carriers with their services, and bulk orders
    /// 3. Look up orders missing from the bulk result
    /// 4. Enrich into export records and write the raw export
    /// 5. Post-process, if enabled
    pub async fn execute_export(&self, range: &DateRange) -> Result<ExportSummary> {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("export_run", run_id = %run_id, range = %range);

        self.run(run_id, range).instrument(span).await
    }

    async fn run(&self, run_id: String, range: &DateRange) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(run_id, *range);

        tracing::info!("Starting export process");

        let shipments = self.fetcher.fetch_shipments(range).await?;
        summary.shipments_fetched = shipments.len();

        if shipments.is_empty() {
            tracing::info!("No shipments found for range");
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        let reconciler = EntityReconciler::new(&self.fetcher, self.config.export.order_lookback_days);

        let lookup_future = async {
            let carriers = self.fetcher.fetch_carriers().await?;
            let services = self.fetcher.fetch_all_services(&carriers).await?;
            Ok::<_, ShipexError>(CarrierLookup::new(carriers, services))
        };
        let (lookup, bulk) = tokio::try_join!(lookup_future, reconciler.fetch_bulk(range))?;

        let reconciliation = reconciler.reconcile(&shipments, bulk).await?;
        summary.record_reconciliation(&reconciliation);

        let outcome = RecordEnricher::new(&reconciliation.orders, &lookup).enrich(&shipments);
        summary.record_enrichment(&outcome);

        summary.export = write_export(&outcome.records, &self.config.export.output_path)?;

        if summary.export.is_some() && self.config.post_processing.enabled {
            let processor =
                PostProcessor::new(self.config.post_processing.clone(), self.zones.clone());
            let table = Table::from_records(&outcome.records)?;
            let processed = processor.process(&table)?;
            summary.processed = Some(write_processed(
                &processed,
                &self.config.post_processing.output_path,
            )?);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}
