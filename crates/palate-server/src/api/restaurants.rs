use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use palate_core::{MatchPayload, MatchRequest, NewRestaurant, RestaurantRecord, RestaurantStore};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_resolve_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Match payload plus the optional fields stored on insert.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ImportRequest {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub price_level: Option<i16>,
}

impl ImportRequest {
    fn into_new_restaurant(self) -> NewRestaurant {
        NewRestaurant {
            external_id: self.place_id.filter(|s| !s.is_empty()),
            title: self.name.unwrap_or_default(),
            address: self.address.filter(|s| !s.is_empty()),
            latitude: self.latitude,
            longitude: self.longitude,
            image_url: self.image_url.filter(|s| !s.is_empty()),
            price_level: self.price_level,
            ..NewRestaurant::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ImportData {
    pub created: bool,
    pub restaurant: RestaurantRecord,
}

fn bad_body(request_id: String, rejection: &JsonRejection) -> ApiError {
    ApiError::new(request_id, "validation_error", rejection.body_text())
}

pub(super) async fn match_restaurant<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MatchPayload>>, ApiError>
where
    S: RestaurantStore + 'static,
{
    let Json(request) = payload.map_err(|e| bad_body(req_id.0.clone(), &e))?;

    let result = state
        .resolver
        .resolve(request)
        .await
        .map_err(|e| map_resolve_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: MatchPayload::from(result),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn import_restaurant<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ImportData>>), ApiError>
where
    S: RestaurantStore + 'static,
{
    let Json(request) = payload.map_err(|e| bad_body(req_id.0.clone(), &e))?;

    let outcome = state
        .resolver
        .import(request.into_new_restaurant())
        .await
        .map_err(|e| map_resolve_error(req_id.0.clone(), &e))?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ApiResponse {
            data: ImportData {
                created: outcome.created,
                restaurant: outcome.restaurant,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
