//! Persisting a projected graph into a content store.
//!
//! Projection and persistence are two passes: [`GraphProjector`] yields
//! records lazily, and [`Exporter`] pulls them in batches and submits each
//! batch to the store. A batch is awaited before the next one is projected,
//! so a slow store slows projection down instead of piling up records.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_BATCH_SIZE;
use crate::graph::DocumentGraph;
use crate::projection::GraphProjector;
use crate::store::{ContentStore, UpsertOutcome};

/// Progress reported after every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    /// Records submitted so far.
    pub processed: usize,
    /// Records this export will submit in total.
    pub total: usize,
    /// Records that failed so far.
    pub failed: usize,
}

/// Per-record results of an export.
#[derive(Debug)]
pub struct ExportReport {
    /// One outcome per submitted record, in projection order.
    pub outcomes: Vec<UpsertOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExportReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Outcomes that carry an error.
    pub fn failures(&self) -> impl Iterator<Item = &UpsertOutcome> + '_ {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed = self.finished_at - self.started_at;
        write!(
            f,
            "{} records exported, {} failed in {} ms",
            self.succeeded(),
            self.total() - self.succeeded(),
            elapsed.num_milliseconds()
        )
    }
}

/// Writes every node of a graph into a [`ContentStore`].
pub struct Exporter<'s, S: ContentStore + ?Sized> {
    store: &'s S,
    batch_size: usize,
    limit: Option<usize>,
}

impl<'s, S: ContentStore + ?Sized> Exporter<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
            limit: None,
        }
    }

    /// Records per store call. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Stop after `limit` records; later nodes are left untouched.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub async fn export(&self, graph: &DocumentGraph) -> ExportReport {
        self.export_with_progress(graph, |_| {}).await
    }

    /// Export, calling `on_batch` after each batch is stored.
    ///
    /// Failed upserts are logged and recorded; they never stop the export.
    pub async fn export_with_progress<F>(&self, graph: &DocumentGraph, mut on_batch: F) -> ExportReport
    where
        F: FnMut(ExportProgress),
    {
        let started_at = Utc::now();
        let records = GraphProjector::new(graph).records();
        let total = self.limit.map_or(records.len(), |limit| limit.min(records.len()));
        let mut records = records.take(total);

        let mut outcomes = Vec::with_capacity(total);
        let mut failed = 0;
        let mut batch = Vec::with_capacity(self.batch_size);

        info!(total, batch_size = self.batch_size, "exporting graph");

        loop {
            batch.clear();
            batch.extend(records.by_ref().take(self.batch_size));
            if batch.is_empty() {
                break;
            }

            for outcome in self.store.upsert_batch(&batch).await {
                match &outcome.result {
                    Ok(()) => debug!(node_id = %outcome.id, "stored node"),
                    Err(e) => {
                        failed += 1;
                        warn!(node_id = %outcome.id, error = %e, "failed to store node");
                    }
                }
                outcomes.push(outcome);
            }

            on_batch(ExportProgress {
                processed: outcomes.len(),
                total,
                failed,
            });
        }

        let report = ExportReport {
            outcomes,
            started_at,
            finished_at: Utc::now(),
        };
        info!("{}", report);
        report
    }
}
