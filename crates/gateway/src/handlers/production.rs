//! Production tracking handlers
//!
//! Registration creates the work-tracking row for an order line and then
//! refreshes every record's priority, so the whole table stays current.
//! The tracking grid reads the joined table and saves row edits back
//! through the update handler; the scheduler-derived pair is read-only
//! from here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::handlers::schedule::{run_recompute, RecomputeSummary};
use crate::AppState;
use stitchline_common::{
    db::{NewProductionRecord, ProductionPatch, ProductionRow, Repository},
    errors::{AppError, Result},
    metrics,
};
use stitchline_scheduler::PriorityBand;

/// Invoicing-status value that stamps the invoicing date at registration
const INVOICED_STATUS: &str = "OK";

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductionRequest {
    pub order_line_id: Uuid,

    #[validate(length(max = 100))]
    pub fabric_status: Option<String>,

    #[validate(length(max = 100))]
    pub invoicing_status: Option<String>,

    #[validate(length(max = 100))]
    pub carrier: Option<String>,

    #[validate(length(max = 64))]
    pub invoice_number: Option<String>,

    #[validate(length(max = 64))]
    pub manufacturing_order: Option<String>,

    #[validate(range(min = 0))]
    pub planned_quantity: i32,

    #[validate(range(min = 0.0))]
    pub fabric_consumption: f64,

    #[validate(length(max = 100))]
    pub fabric: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductionRequest {
    #[validate(length(max = 100))]
    pub fabric_status: Option<String>,

    #[validate(length(max = 100))]
    pub invoicing_status: Option<String>,

    #[validate(length(max = 100))]
    pub carrier: Option<String>,

    #[validate(length(max = 64))]
    pub invoice_number: Option<String>,

    #[validate(length(max = 64))]
    pub manufacturing_order: Option<String>,

    #[validate(range(min = 0))]
    pub planned_quantity: i32,

    #[validate(range(min = 0.0))]
    pub fabric_consumption: f64,

    #[validate(length(max = 100))]
    pub fabric: Option<String>,
}

#[derive(Serialize)]
pub struct CreateProductionResponse {
    pub id: Uuid,
    /// Summary of the recompute pass triggered by this registration,
    /// absent when `scheduling.recompute_on_create` is off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recompute: Option<RecomputeSummary>,
}

#[derive(Serialize)]
pub struct UpdateProductionResponse {
    pub id: Uuid,
    pub updated_at: String,
}

/// One tracking-table row with its display color
#[derive(Serialize)]
pub struct ProductionRowResponse {
    #[serde(flatten)]
    pub row: ProductionRow,
    pub priority_color: Option<&'static str>,
}

fn priority_color(level: Option<i16>) -> Option<&'static str> {
    level
        .and_then(PriorityBand::from_severity)
        .map(PriorityBand::color)
}

/// Register production for an order line, then refresh every record's
/// priority
pub async fn create_production(
    State(state): State<AppState>,
    Json(request): Json<CreateProductionRequest>,
) -> Result<(StatusCode, Json<CreateProductionResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    repo.find_order_line_by_id(request.order_line_id)
        .await?
        .ok_or_else(|| AppError::OrderLineNotFound {
            id: request.order_line_id.to_string(),
        })?;

    let invoiced_on = (request.invoicing_status.as_deref() == Some(INVOICED_STATUS))
        .then(|| chrono::Local::now().date_naive());

    let record = repo
        .create_production_record(NewProductionRecord {
            order_line_id: request.order_line_id,
            fabric_status: request.fabric_status,
            invoicing_status: request.invoicing_status,
            invoiced_on,
            carrier: request.carrier,
            invoice_number: request.invoice_number,
            manufacturing_order: request.manufacturing_order,
            planned_quantity: request.planned_quantity,
            fabric_consumption: request.fabric_consumption,
            fabric: request.fabric,
        })
        .await?;

    metrics::record_production_created();

    tracing::info!(
        record_id = %record.id,
        order_line_id = %record.order_line_id,
        "Production record registered"
    );

    // Registration keeps every record's priority fresh, not just this one
    let recompute = if state.config.scheduling.recompute_on_create {
        Some(run_recompute(&repo, state.config.scheduling.buffer_days).await?)
    } else {
        None
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateProductionResponse {
            id: record.id,
            recompute,
        }),
    ))
}

/// The joined production tracking table, newest first
pub async fn list_production(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductionRowResponse>>> {
    let repo = Repository::new(state.db.clone());
    let rows = repo.list_production().await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| ProductionRowResponse {
                priority_color: priority_color(row.priority_level),
                row,
            })
            .collect(),
    ))
}

/// Save the mutable production-state fields of one record
pub async fn update_production(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Json(request): Json<UpdateProductionRequest>,
) -> Result<Json<UpdateProductionResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    repo.find_production_by_id(record_id)
        .await?
        .ok_or_else(|| AppError::ProductionRecordNotFound {
            id: record_id.to_string(),
        })?;

    let record = repo
        .update_production(
            record_id,
            ProductionPatch {
                fabric_status: request.fabric_status,
                invoicing_status: request.invoicing_status,
                carrier: request.carrier,
                invoice_number: request.invoice_number,
                manufacturing_order: request.manufacturing_order,
                planned_quantity: request.planned_quantity,
                fabric_consumption: request.fabric_consumption,
                fabric: request.fabric,
            },
        )
        .await?;

    tracing::info!(record_id = %record.id, "Production record updated");

    Ok(Json(UpdateProductionResponse {
        id: record.id,
        updated_at: record.updated_at.to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateProductionRequest {
        CreateProductionRequest {
            order_line_id: Uuid::from_u128(1),
            fabric_status: Some("Em estoque".into()),
            invoicing_status: Some("OK".into()),
            carrier: Some("Transportadora Norte".into()),
            invoice_number: Some("NF-1042".into()),
            manufacturing_order: Some("OF-2301".into()),
            planned_quantity: 1200,
            fabric_consumption: 1.85,
            fabric: Some("Brim hospitalar".into()),
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_negative_planned_quantity_fails_validation() {
        let mut request = valid_request();
        request.planned_quantity = -5;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_consumption_fails_validation() {
        let mut request = valid_request();
        request.fabric_consumption = -0.5;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_priority_color_mapping() {
        assert_eq!(priority_color(Some(1)), Some("black"));
        assert_eq!(priority_color(Some(2)), Some("red"));
        assert_eq!(priority_color(Some(5)), Some("blue"));
        // Unset or out-of-range levels have no color
        assert_eq!(priority_color(None), None);
        assert_eq!(priority_color(Some(9)), None);
    }
}
