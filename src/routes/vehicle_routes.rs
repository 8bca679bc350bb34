use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, DeleteResponse, ListQueryParams, UpdateVehicleRequest,
    VehicleListResponse,
};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/filters/:field", get(get_filter_values))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    request: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let Json(request) = request.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let Json(request) = request.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn get_filter_values(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.distinct_values(&field).await?;
    Ok(Json(response))
}
