use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use kobo_cli::config::load_config;
use kobo_ingest::{load_child_index, read_csv_table};
use kobo_model::SubmissionConfig;
use kobo_submit::{BatchOptions, BatchSummary, InstanceIdSource, run_batch};

use crate::cli::{CheckArgs, SubmitArgs};
use crate::summary::apply_table_style;

pub fn run_submit(args: &SubmitArgs) -> Result<BatchSummary> {
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, args);
    let span = info_span!("submit", config = %args.config.display());
    let _guard = span.enter();

    let ingest_start = Instant::now();
    let parent_table = read_csv_table(&config.parent_data_path).context("load parent table")?;
    let index = load_child_index(&config.child_data_paths, &config.child_id_column)?;
    info!(
        parents = parent_table.records.len(),
        child_rows = index.row_count(),
        child_keys = index.key_count(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let options = BatchOptions {
        concurrency: config.concurrency,
        dry_run: args.dry_run,
        instance_ids: if args.unique_instance_id {
            InstanceIdSource::PerSubmission
        } else {
            InstanceIdSource::ProjectUuid
        },
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build async runtime")?;
    runtime.block_on(run_batch(&parent_table.records, &index, &config, &options))
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let parent_table = read_csv_table(&config.parent_data_path).context("load parent table")?;
    let index = load_child_index(&config.child_data_paths, &config.child_id_column)?;

    let mut table = Table::new();
    table.set_header(vec!["Household", "Members", "HHSize"]);
    apply_table_style(&mut table);
    for parent in &parent_table.records {
        let key = parent.key(&config.parent_id_column)?;
        let members = index.matching(&key).len();
        table.add_row(vec![key, members.to_string(), (members + 1).to_string()]);
    }
    println!("Endpoint: {}", config.endpoint);
    println!(
        "Households: {}  Child rows: {}",
        parent_table.records.len(),
        index.row_count()
    );
    println!("{table}");
    Ok(())
}

fn apply_overrides(config: &mut SubmissionConfig, args: &SubmitArgs) {
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
}
