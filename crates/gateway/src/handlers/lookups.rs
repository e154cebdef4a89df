//! Lookup-table handlers
//!
//! Fabric-status and invoicing-status options are seeded by operations;
//! logistics carriers can be added from the UI.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use stitchline_common::{
    db::Repository,
    errors::{AppError, Result},
};

#[derive(Serialize)]
pub struct LookupResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarrierRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// List fabric-status options
pub async fn list_fabric_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupResponse>>> {
    let repo = Repository::new(state.db.clone());
    let options = repo.list_fabric_status_options().await?;

    Ok(Json(
        options
            .into_iter()
            .map(|o| LookupResponse {
                id: o.id,
                name: o.name,
            })
            .collect(),
    ))
}

/// List invoicing-status options
pub async fn list_invoicing_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupResponse>>> {
    let repo = Repository::new(state.db.clone());
    let options = repo.list_invoicing_status_options().await?;

    Ok(Json(
        options
            .into_iter()
            .map(|o| LookupResponse {
                id: o.id,
                name: o.name,
            })
            .collect(),
    ))
}

/// List logistics carriers
pub async fn list_carriers(State(state): State<AppState>) -> Result<Json<Vec<LookupResponse>>> {
    let repo = Repository::new(state.db.clone());
    let carriers = repo.list_carriers().await?;

    Ok(Json(
        carriers
            .into_iter()
            .map(|c| LookupResponse {
                id: c.id,
                name: c.name,
            })
            .collect(),
    ))
}

/// Add a logistics carrier
pub async fn create_carrier(
    State(state): State<AppState>,
    Json(request): Json<CreateCarrierRequest>,
) -> Result<(StatusCode, Json<LookupResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("name".into()),
    })?;

    let repo = Repository::new(state.db.clone());

    if repo.find_carrier_by_name(&request.name).await?.is_some() {
        return Err(AppError::Duplicate {
            message: format!("Carrier '{}' is already registered", request.name),
        });
    }

    let carrier = repo.create_carrier(request.name).await?;

    tracing::info!(carrier_id = carrier.id, name = %carrier.name, "Carrier added");

    Ok((
        StatusCode::CREATED,
        Json(LookupResponse {
            id: carrier.id,
            name: carrier.name,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_name_must_not_be_empty() {
        let request = CreateCarrierRequest { name: String::new() };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_carrier_name_within_bounds_is_valid() {
        let request = CreateCarrierRequest {
            name: "Transportadora Norte".into(),
        };
        assert!(request.validate().is_ok());
    }
}
