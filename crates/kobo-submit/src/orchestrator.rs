//! Batch orchestration: sequential match + build, bounded concurrent
//! dispatch.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use kobo_ingest::ChildIndex;
use kobo_model::{Record, SubmissionConfig};

use crate::dispatch::{DEFAULT_REQUEST_TIMEOUT, DispatchOutcome, build_client, dispatch};
use crate::document::{InstanceIdSource, build_document};
use crate::xml::serialize;

/// Runtime knobs for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum simultaneous in-flight dispatches.
    pub concurrency: usize,
    /// Build and serialize every document without sending anything.
    pub dry_run: bool,
    pub instance_ids: InstanceIdSource,
}

impl BatchOptions {
    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            dry_run: false,
            instance_ids: InstanceIdSource::default(),
        }
    }
}

/// A parent row that never reached the dispatcher.
#[derive(Debug, Clone)]
pub struct RowFailure {
    pub parent_key: String,
    pub error: String,
}

/// Aggregated result of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// One outcome per dispatched document, in completion order.
    pub outcomes: Vec<DispatchOutcome>,
    /// Parent rows skipped by build or serialization failure.
    pub skipped: Vec<RowFailure>,
    /// Documents built but not sent (dry run).
    pub planned: usize,
}

impl BatchSummary {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0 || !self.skipped.is_empty()
    }
}

/// Run the full batch over parent rows.
///
/// Matching and document building happen sequentially on this task; a
/// build failure skips that row and the batch continues. Each built
/// document is handed to the dispatcher through a semaphore-bounded
/// pool (slot acquired on submit, released when the dispatch
/// finishes), so building the next row overlaps in-flight requests up
/// to `concurrency` of them. Dispatch failures land in the summary,
/// never abort the batch.
pub async fn run_batch(
    parents: &[Record],
    children: &ChildIndex,
    config: &SubmissionConfig,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let client = build_client(DEFAULT_REQUEST_TIMEOUT).context("build http client")?;
    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut tasks: JoinSet<DispatchOutcome> = JoinSet::new();
    let mut summary = BatchSummary::default();
    let start = Instant::now();

    for parent in parents {
        let parent_key = match parent.key(&config.parent_id_column) {
            Ok(key) => key,
            Err(err) => {
                error!(row = parent.row, error = %err, "cannot identify parent row");
                summary.skipped.push(RowFailure {
                    parent_key: format!("row {}", parent.row),
                    error: err.to_string(),
                });
                continue;
            }
        };
        let matched = children.matching(&parent_key);
        let instance_id = options.instance_ids.next(&config.project_uuid);
        let xml = match build_document(parent, matched, &config.project_uuid, &instance_id)
            .map_err(anyhow::Error::from)
            .and_then(|document| serialize(&document))
        {
            Ok(xml) => xml,
            Err(err) => {
                error!(parent_key = %parent_key, error = %err, "skipping parent row");
                summary.skipped.push(RowFailure {
                    parent_key,
                    error: err.to_string(),
                });
                continue;
            }
        };

        if options.dry_run {
            debug!(parent_key = %parent_key, bytes = xml.len(), "dry run, not sending");
            summary.planned += 1;
            continue;
        }

        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .context("acquire dispatch slot")?;
        let client = client.clone();
        let endpoint = config.endpoint.clone();
        let token = config.api_token.clone();
        tasks.spawn(async move {
            let _permit = permit;
            dispatch(&client, &endpoint, &token, parent_key, xml).await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => summary.outcomes.push(outcome),
            Err(err) => summary.skipped.push(RowFailure {
                parent_key: "unknown".to_string(),
                error: format!("dispatch task failed: {err}"),
            }),
        }
    }

    info!(
        parents = parents.len(),
        dispatched = summary.outcomes.len(),
        delivered = summary.delivered(),
        failed = summary.failed(),
        skipped = summary.skipped.len(),
        planned = summary.planned,
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );
    Ok(summary)
}
