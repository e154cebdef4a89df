//! Purchase-order import handlers
//!
//! Import is a two-step flow: `POST /orders/extract` scrapes a draft from
//! the uploaded PDF for user review, and `POST /orders` persists the
//! confirmed draft. Orders are immutable once imported.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stitchline_ingestion::OrderDraft;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use stitchline_common::{
    db::{NewOrder, NewOrderLine, OrderLineOption, Repository},
    errors::{AppError, Result},
    metrics,
};

/// Draft returned for review before persistence
#[derive(Serialize)]
pub struct ExtractResponse {
    pub order: OrderDraft,
    /// Header fields the scraper could not find
    pub missing: Vec<&'static str>,
}

/// A confirmed order ready to persist
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 64))]
    pub order_number: String,

    pub issued_on: Option<NaiveDate>,

    #[validate(length(max = 500))]
    pub hospital: Option<String>,

    #[validate(length(max = 1000))]
    pub delivery_address: Option<String>,

    #[validate(length(max = 100))]
    pub state: Option<String>,

    #[validate(length(max = 10))]
    pub state_code: Option<String>,

    #[validate(nested)]
    pub lines: Vec<OrderLineInput>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderLineInput {
    #[validate(length(min = 1, max = 32))]
    pub material_code: String,

    #[validate(length(min = 1, max = 500))]
    pub description: String,

    #[validate(range(min = 0))]
    pub quantity: i32,

    #[validate(range(min = 0.0))]
    pub unit_price: f64,

    pub requested_delivery: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub line_count: usize,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub issued_on: Option<NaiveDate>,
    pub hospital: Option<String>,
    pub delivery_address: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub material_code: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub requested_delivery: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub lines: Vec<OrderLineResponse>,
}

fn order_response(order: stitchline_common::db::models::Order) -> OrderResponse {
    OrderResponse {
        id: order.id,
        order_number: order.order_number,
        issued_on: order.issued_on,
        hospital: order.hospital,
        delivery_address: order.delivery_address,
        state: order.state,
        state_code: order.state_code,
        created_at: order.created_at.to_rfc3339(),
    }
}

/// Extract an order draft from an uploaded purchase-order PDF.
/// Nothing is persisted; the draft comes back for review.
pub async fn extract_order(body: Bytes) -> Result<Json<ExtractResponse>> {
    if body.is_empty() {
        return Err(AppError::Validation {
            message: "Request body must contain the purchase-order PDF".into(),
            field: None,
        });
    }

    let draft = stitchline_ingestion::extract_order(&body)
        .map_err(|e| AppError::Extraction {
            message: e.to_string(),
        })?;

    let missing = draft.missing_fields();
    tracing::info!(
        order_number = ?draft.order_number,
        line_count = draft.lines.len(),
        missing = missing.len(),
        "Purchase order extracted for review"
    );

    Ok(Json(ExtractResponse {
        missing,
        order: draft,
    }))
}

/// Persist a confirmed order with its line items
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    // Each purchase order is imported at most once
    if repo
        .find_order_by_number(&request.order_number)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateOrder {
            number: request.order_number,
        });
    }

    let line_count = request.lines.len();
    let order = repo
        .create_order(NewOrder {
            order_number: request.order_number,
            issued_on: request.issued_on,
            hospital: request.hospital,
            delivery_address: request.delivery_address,
            state: request.state,
            state_code: request.state_code,
            lines: request
                .lines
                .into_iter()
                .map(|line| NewOrderLine {
                    material_code: line.material_code,
                    description: line.description,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    requested_delivery: line.requested_delivery,
                })
                .collect(),
        })
        .await?;

    metrics::record_order_imported(line_count);

    tracing::info!(
        order_id = %order.id,
        order_number = %order.order_number,
        line_count,
        "Purchase order imported"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            id: order.id,
            order_number: order.order_number,
            line_count,
        }),
    ))
}

/// List imported orders, newest first
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderResponse>>> {
    let repo = Repository::new(state.db.clone());
    let orders = repo.list_orders().await?;

    Ok(Json(orders.into_iter().map(order_response).collect()))
}

/// Get one order with its line items
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDetailResponse>> {
    let repo = Repository::new(state.db.clone());

    let order = repo
        .find_order_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::OrderNotFound {
            id: order_id.to_string(),
        })?;

    let lines = repo.get_lines_by_order(order_id).await?;

    Ok(Json(OrderDetailResponse {
        order: order_response(order),
        lines: lines
            .into_iter()
            .map(|line| OrderLineResponse {
                id: line.id,
                material_code: line.material_code,
                description: line.description,
                quantity: line.quantity,
                unit_price: line.unit_price,
                requested_delivery: line.requested_delivery,
            })
            .collect(),
    }))
}

/// List every order line labeled with its order number (feeds the
/// production registration form)
pub async fn list_order_lines(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderLineOption>>> {
    let repo = Repository::new(state.db.clone());
    Ok(Json(repo.list_order_line_options().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateOrderRequest {
        CreateOrderRequest {
            order_number: "4500123456".into(),
            issued_on: NaiveDate::from_ymd_opt(2024, 3, 5),
            hospital: Some("HOSPITAL GERAL DA ENCRUZILHADA".into()),
            delivery_address: Some("RUA CORONEL SUASSUNA, 323".into()),
            state: Some("Pernambuco".into()),
            state_code: Some("PE".into()),
            lines: vec![OrderLineInput {
                material_code: "401234".into(),
                description: "CAMISOLA PACIENTE ADULTO GG".into(),
                quantity: 1200,
                unit_price: 15.5,
                requested_delivery: None,
            }],
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_order_number_fails_validation() {
        let mut request = valid_request();
        request.order_number = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_quantity_fails_validation() {
        let mut request = valid_request();
        request.lines[0].quantity = -1;
        assert!(request.validate().is_err());
    }
}
