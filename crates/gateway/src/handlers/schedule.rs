//! Delivery-priority recompute
//!
//! The batch pass refreshes the `(delivery_date, priority_level)` pair of
//! every production record from its order's issuance date and the current
//! date. It runs as a side effect of record registration and is also
//! exposed here as its own operation, so it can be triggered (and tested)
//! independently.

use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use stitchline_common::{db::Repository, errors::Result, metrics::RecomputeMetrics};
use stitchline_scheduler::plan_recompute;

/// Outcome of one recompute pass
#[derive(Debug, Serialize)]
pub struct RecomputeSummary {
    /// Records whose pair was rewritten
    pub updated: usize,
    /// Records skipped because their order has no issuance date
    pub skipped: Vec<Uuid>,
    pub duration_ms: u64,
}

/// Run a full recompute pass and persist it atomically
pub async fn run_recompute(repo: &Repository, buffer_days: i64) -> Result<RecomputeSummary> {
    let timer = RecomputeMetrics::start();

    let inputs = repo.schedule_inputs().await?;
    let today = chrono::Local::now().date_naive();
    let plan = plan_recompute(&inputs, today, buffer_days);

    for record_id in &plan.skipped {
        tracing::warn!(
            record_id = %record_id,
            "Order has no issuance date, skipping priority recompute"
        );
    }

    repo.apply_schedule(&plan.updates).await?;

    let updated = plan.updates.len();
    let elapsed = timer.finish(updated, plan.skipped.len());

    let summary = RecomputeSummary {
        updated,
        skipped: plan.skipped,
        duration_ms: elapsed.as_millis() as u64,
    };

    tracing::info!(
        updated = summary.updated,
        skipped = summary.skipped.len(),
        duration_ms = summary.duration_ms,
        "Priority recompute complete"
    );

    Ok(summary)
}

/// Recompute every record's delivery date and priority band
pub async fn recompute(State(state): State<AppState>) -> Result<Json<RecomputeSummary>> {
    let repo = Repository::new(state.db.clone());
    let summary = run_recompute(&repo, state.config.scheduling.buffer_days).await?;
    Ok(Json(summary))
}
