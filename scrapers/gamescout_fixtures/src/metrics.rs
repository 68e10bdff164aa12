use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::pipeline::IngestReport;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceMetrics {
    pub total_queries: u64,
    pub queries_with_rows: u64,
    pub empty_results: u64,
    pub read_errors: u64,
    pub last_error: Option<String>,
    pub last_error_time: Option<DateTime<Utc>>,
    pub last_ingest: Option<IngestReport>,
    pub last_ingest_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: Arc<Mutex<ServiceMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ServiceMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_query(&self, rows: usize) {
        let mut metrics = self.lock();
        metrics.total_queries += 1;
        if rows > 0 {
            metrics.queries_with_rows += 1;
        } else {
            metrics.empty_results += 1;
        }
    }

    pub fn record_read_error(&self, error: String) {
        let mut metrics = self.lock();
        metrics.total_queries += 1;
        metrics.read_errors += 1;
        metrics.last_error = Some(error);
        metrics.last_error_time = Some(Utc::now());
    }

    pub fn record_ingest(&self, report: IngestReport) {
        let mut metrics = self.lock();
        metrics.last_ingest = Some(report);
        metrics.last_ingest_time = Some(Utc::now());
    }

    pub fn get_metrics(&self) -> ServiceMetrics {
        self.lock().clone()
    }
}
